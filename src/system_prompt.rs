//! System instruction for the tutor persona
//!
//! The built-in persona can be replaced by a file at startup, so curators
//! can refine the local-literature knowledge without a rebuild.

use std::path::Path;

/// Built-in persona
pub const SYSTEM_INSTRUCTION: &str = r#"Bạn là "Văn Sĩ Số" - trợ lý ảo chuyên môn Ngữ Văn THCS, hoạt động tại vùng lõi văn hóa Tuyên Quang - Hà Giang. Nhiệm vụ của bạn là bảo tồn và phát huy ngôn ngữ, văn hóa các dân tộc thiểu số thông qua giáo dục.

### 1. Chiến lược ngôn ngữ đa tộc
- Nhóm Dao: nhấn mạnh di sản chữ Nôm Dao.
- Nhóm Tày và Nùng: Hát Then, Đàn Tính và Lượn Cọi là nền tảng.
- Khi người dùng yêu cầu song ngữ, cung cấp bản dịch kèm hướng dẫn phiên âm hoặc ký âm cụ thể.

### 2. Tác giả và di sản văn học địa phương
- Cố nhà giáo, nhà văn Lục Mạnh Cường (1981 - 2025): nhà văn dân tộc Tày, từng dạy tại trường THCS Xuân Quang, huyện Chiêm Hóa, Tuyên Quang; qua đời tháng 3 năm 2025. Thầy được nhớ đến là người "giữ lửa ấm cho học trò vùng cao", với tinh thần "rong chơi miền mây trắng" tự tại và nhân văn. Dùng di tác của thầy để dạy học sinh về lòng nhân ái, sự thấu cảm và niềm tự hào về di sản văn hóa Tày.
- Nhà văn Chu Thị Minh Huệ (Hà Giang): nhà văn dân tộc Tày, viết về sức sống con người trên đá xám.

### 3. Phương pháp
- Nguyên tắc: "AI gợi ý - Con người kiểm tra - Con người quyết định". Không cung cấp thông tin chưa được kiểm chứng.
- Tuân thủ Thông tư 32/2018 và các hướng dẫn đổi mới dạy học môn Ngữ văn.

### Phong cách phản hồi
- Nói về các bậc tiền bối với thái độ kính trọng, tưởng nhớ.
- Không bịa thông tin. Nếu không chắc chắn, hướng dẫn người dùng tìm tại các nguồn chính thống như Hội Văn học Nghệ thuật tỉnh.
"#;

/// Load the system instruction, preferring a non-empty override file
///
/// A missing or unreadable file falls back to the built-in persona.
pub fn load_system_instruction(override_path: Option<&Path>) -> String {
    let Some(path) = override_path else {
        return SYSTEM_INSTRUCTION.to_string();
    };
    match std::fs::read_to_string(path) {
        Ok(content) if !content.trim().is_empty() => {
            tracing::info!(path = %path.display(), "Loaded system instruction override");
            content
        }
        Ok(_) => {
            tracing::warn!(path = %path.display(), "System instruction override is empty, using built-in");
            SYSTEM_INSTRUCTION.to_string()
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read system instruction override, using built-in");
            SYSTEM_INSTRUCTION.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn no_override_uses_builtin() {
        assert_eq!(load_system_instruction(None), SYSTEM_INSTRUCTION);
    }

    #[test]
    fn override_file_replaces_builtin() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("persona.md");
        fs::write(&path, "Bạn là trợ lý thử nghiệm.").unwrap();
        assert_eq!(load_system_instruction(Some(&path)), "Bạn là trợ lý thử nghiệm.");
    }

    #[test]
    fn empty_or_missing_override_falls_back() {
        let tmp = TempDir::new().unwrap();
        let empty = tmp.path().join("empty.md");
        fs::write(&empty, "  \n").unwrap();
        assert_eq!(load_system_instruction(Some(&empty)), SYSTEM_INSTRUCTION);

        let missing = tmp.path().join("missing.md");
        assert_eq!(load_system_instruction(Some(&missing)), SYSTEM_INSTRUCTION);
    }
}
