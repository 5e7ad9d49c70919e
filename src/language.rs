//! Language contexts and the bilingual context annotation
//!
//! When a non-default language is selected, typed user messages are stored
//! with a bracketed prefix asking the model for bilingual guidance. The
//! prefix is part of the stored and sent text; display and copy strip it.

/// A language the tutor can pair with Vietnamese
#[derive(Debug, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

impl Language {
    pub fn is_default(&self) -> bool {
        self.code == DEFAULT_LANGUAGE
    }
}

pub const DEFAULT_LANGUAGE: &str = "vi";

pub static LANGUAGES: [Language; 11] = [
    Language { code: "vi", name: "Tiếng Việt" },
    Language { code: "hmong", name: "Tiếng Mông (RPA)" },
    Language { code: "tay", name: "Tiếng Tày" },
    Language { code: "dao", name: "Tiếng Dao (Kìm Miền)" },
    Language { code: "lolo", name: "Tiếng Lô Lô" },
    Language { code: "giay", name: "Tiếng Giáy" },
    Language { code: "colao", name: "Tiếng Cờ Lao" },
    Language { code: "pupeo", name: "Tiếng Pu Péo" },
    Language { code: "pathen", name: "Tiếng Pà Thẻn" },
    Language { code: "nung", name: "Tiếng Nùng" },
    Language { code: "hoa", name: "Tiếng Hoa (Quảng Đông/Hán)" },
];

const ANNOTATION_OPEN: &str = "[Bối cảnh ngôn ngữ:";

pub fn find_language(code: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|language| language.code == code)
}

pub fn default_language() -> &'static Language {
    &LANGUAGES[0]
}

/// Prefix `text` with the context annotation for `language`
///
/// The default language leaves the text untouched.
pub fn annotate(text: &str, language: &Language) -> String {
    if language.is_default() {
        return text.to_string();
    }
    format!(
        "{ANNOTATION_OPEN} Song ngữ Việt - {}. Hãy cung cấp bản dịch và hướng dẫn phiên âm/ký âm cụ thể] {text}",
        language.name
    )
}

/// Remove a leading context annotation, if any
///
/// The annotation ends at the first `]` on its line; whitespace after it
/// is dropped too.
pub fn strip_annotation(text: &str) -> &str {
    let Some(rest) = text.strip_prefix(ANNOTATION_OPEN) else {
        return text;
    };
    match rest.split_once(']') {
        Some((inside, after)) if !inside.contains('\n') => after.trim_start(),
        _ => text,
    }
}
