//! Canned texts: greetings, banners, quick-action prompts and fallbacks

use crate::language::Language;
use crate::progression::ActionKind;
use serde::{Deserialize, Serialize};

/// Greeting of the very first session and of the session after clear-all
pub const WELCOME_MESSAGE: &str = "Chào em! Văn Sĩ Số ở đây để cùng em tìm về những giá trị văn hóa bản làng và những trang văn đầy tình thương của các bậc tiền bối. Hôm nay em muốn tìm hiểu về di sản của nhà văn nào?";

/// Stored as the reply when the model call fails
pub const APOLOGY_MESSAGE: &str = "Văn sĩ số đang gặp sự cố kết nối. Em/Thầy cô vui lòng kiểm tra lại mạng và thử lại sau giây lát nhé.";

/// Stored as the reply when the model answers with no text
pub const EMPTY_REPLY_FALLBACK: &str =
    "Rất xin lỗi, tôi chưa thể đưa ra câu trả lời lúc này. Bạn vui lòng thử lại sau nhé.";

pub const HISTORY_CLEARED: &str = "Đã xóa lịch sử và đặt lại thành tích.";

/// Who is using the tutor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserMode {
    #[default]
    Learner,
    Instructor,
}

impl UserMode {
    /// Greeting of a session opened with "new chat"
    pub fn new_chat_greeting(self) -> &'static str {
        match self {
            UserMode::Learner => "Chào em! Em cần mình giúp gì nào?",
            UserMode::Instructor => "Kính chào Thầy/Cô, mời bắt đầu.",
        }
    }

    /// Greeting of the session opened by switching into this mode
    pub fn banner(self) -> &'static str {
        match self {
            UserMode::Learner => "Chế độ Học sinh đã bật!",
            UserMode::Instructor => "Chế độ Giáo viên đã bật.",
        }
    }
}

/// Greeting of the session opened by switching language
pub fn language_greeting(language: &Language) -> String {
    format!("Đã kích hoạt kho ngữ liệu {}.", language.name)
}

/// Prompt asking the model to review a student's writing
pub fn feedback_prompt(student_text: &str) -> String {
    format!("Phân tích và góp ý đoạn văn sau của học sinh:\n---\n{student_text}\n---")
}

/// One-click prompts offered in each mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickAction {
    // Learner
    LocalExplore,
    Roleplay,
    Polish,
    GenreAnalysis,
    ScriptExplore,
    MusicExplore,
    LocalAuthorExplore,
    // Instructor
    LessonPlan,
    NlsActivity,
    Assessment,
    CurriculumLookup,
    LuonCoiLesson,
    DanTinhLesson,
    TuyenQuangMaterial,
}

impl QuickAction {
    pub const LEARNER: [QuickAction; 7] = [
        QuickAction::LocalExplore,
        QuickAction::Roleplay,
        QuickAction::Polish,
        QuickAction::GenreAnalysis,
        QuickAction::ScriptExplore,
        QuickAction::MusicExplore,
        QuickAction::LocalAuthorExplore,
    ];

    pub const INSTRUCTOR: [QuickAction; 7] = [
        QuickAction::LessonPlan,
        QuickAction::NlsActivity,
        QuickAction::Assessment,
        QuickAction::CurriculumLookup,
        QuickAction::LuonCoiLesson,
        QuickAction::DanTinhLesson,
        QuickAction::TuyenQuangMaterial,
    ];

    pub fn for_mode(mode: UserMode) -> &'static [QuickAction] {
        match mode {
            UserMode::Learner => &Self::LEARNER,
            UserMode::Instructor => &Self::INSTRUCTOR,
        }
    }

    pub fn mode(self) -> UserMode {
        if self.action_kind().is_some() {
            UserMode::Learner
        } else {
            UserMode::Instructor
        }
    }

    /// Progression credit; instructor actions earn none
    pub fn action_kind(self) -> Option<ActionKind> {
        match self {
            QuickAction::LocalExplore => Some(ActionKind::LocalExplore),
            QuickAction::Roleplay => Some(ActionKind::Roleplay),
            QuickAction::Polish => Some(ActionKind::Polish),
            QuickAction::GenreAnalysis => Some(ActionKind::GenreAnalysis),
            QuickAction::ScriptExplore => Some(ActionKind::ScriptExplore),
            QuickAction::MusicExplore => Some(ActionKind::MusicExplore),
            QuickAction::LocalAuthorExplore => Some(ActionKind::LocalAuthorExplore),
            QuickAction::LessonPlan
            | QuickAction::NlsActivity
            | QuickAction::Assessment
            | QuickAction::CurriculumLookup
            | QuickAction::LuonCoiLesson
            | QuickAction::DanTinhLesson
            | QuickAction::TuyenQuangMaterial => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QuickAction::LocalExplore => "Lễ hội Nhảy lửa",
            QuickAction::Roleplay => "Nhập vai song ngữ",
            QuickAction::Polish => "Trau chuốt câu từ",
            QuickAction::GenreAnalysis => "Hát Pao Dung",
            QuickAction::ScriptExplore => "Chữ Nôm Dao",
            QuickAction::MusicExplore => "Hát Then - Đàn Tính",
            QuickAction::LocalAuthorExplore => "Nhà văn Lục Mạnh Cường",
            QuickAction::LessonPlan => "Soạn giáo án",
            QuickAction::NlsActivity => "Năng lực số",
            QuickAction::Assessment => "Ra đề đọc hiểu",
            QuickAction::CurriculumLookup => "Yêu cầu cần đạt",
            QuickAction::LuonCoiLesson => "Lượn Cọi",
            QuickAction::DanTinhLesson => "Đàn Tính",
            QuickAction::TuyenQuangMaterial => "Ngữ liệu Tuyên Quang",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            QuickAction::LocalExplore => "Giải thích ý nghĩa Lễ hội Nhảy lửa của người Pà Thẻn.",
            QuickAction::Roleplay => "Nhập vai người già bản kể truyền thuyết bằng tiếng Việt và tiếng Mông.",
            QuickAction::Polish => "Sửa giúp mình đoạn văn này cho hay hơn.",
            QuickAction::GenreAnalysis => "Đặc điểm nghệ thuật của Hát Pao Dung là gì?",
            QuickAction::ScriptExplore => "Tìm hiểu về chữ Nôm Dao.",
            QuickAction::MusicExplore => "Hát Then và Đàn Tính có ý nghĩa gì?",
            QuickAction::LocalAuthorExplore => "Tưởng nhớ và tìm hiểu di sản văn chương, cuộc đời của cố nhà giáo - nhà văn Lục Mạnh Cường (1981-2025), người đã dành cả tâm huyết cho giáo dục và văn học vùng cao Chiêm Hóa.",
            QuickAction::LessonPlan => "Soạn giáo án lấy cảm hứng từ tình thầy trò trong các di tác của cố nhà giáo Lục Mạnh Cường.",
            QuickAction::NlsActivity => "Gợi ý hoạt động tích hợp Năng lực số cho văn học địa phương.",
            QuickAction::Assessment => "Tạo đề đọc hiểu sử dụng trích đoạn của Chu Thị Minh Huệ hoặc di tác của Lục Mạnh Cường.",
            QuickAction::CurriculumLookup => "Yêu cầu cần đạt môn Ngữ văn lớp 8.",
            QuickAction::LuonCoiLesson => "Dạy học về Lượn Cọi.",
            QuickAction::DanTinhLesson => "Tìm hiểu về Đàn Tính.",
            QuickAction::TuyenQuangMaterial => "Phân tích giá trị nhân văn và tinh thần 'rong chơi miền mây trắng' trong di tác của cố nhà văn Lục Mạnh Cường.",
        }
    }
}
