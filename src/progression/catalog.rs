//! Static badge catalog

use super::ActionKind;

/// A badge earned by repeating one kind of learning action
#[derive(Debug)]
pub struct BadgeDefinition {
    pub kind: ActionKind,
    pub display_name: &'static str,
    pub icon: &'static str,
    pub threshold: u32,
    /// `{}` is replaced by the threshold
    description_template: &'static str,
}

impl BadgeDefinition {
    pub fn description(&self) -> String {
        self.description_template
            .replace("{}", &self.threshold.to_string())
    }
}

/// Every badge, in unlock-evaluation order
pub static BADGES: [BadgeDefinition; 7] = [
    BadgeDefinition {
        kind: ActionKind::Polish,
        display_name: "Nhà Văn Triệu Nâng",
        icon: "✨",
        threshold: 5,
        description_template: "Hoàn thành {} lần trau chuốt câu từ.",
    },
    BadgeDefinition {
        kind: ActionKind::Roleplay,
        display_name: "Diễn Viên Cửu Phẩm",
        icon: "🎭",
        threshold: 3,
        description_template: "Tham gia {} lần nhập vai nhân vật.",
    },
    BadgeDefinition {
        kind: ActionKind::LocalExplore,
        display_name: "Thổ Địa Dân Gian",
        icon: "🏔️",
        threshold: 10,
        description_template: "Khám phá {} lần văn hóa địa phương.",
    },
    BadgeDefinition {
        kind: ActionKind::GenreAnalysis,
        display_name: "Giải Mã Sư",
        icon: "📚",
        threshold: 7,
        description_template: "Phân tích {} lần thể loại văn học.",
    },
    BadgeDefinition {
        kind: ActionKind::ScriptExplore,
        display_name: "Khảo Cổ Gia Văn Tự",
        icon: "📜",
        threshold: 2,
        description_template: "Tìm hiểu {} lần về cổ tự/văn tự cổ.",
    },
    BadgeDefinition {
        kind: ActionKind::MusicExplore,
        display_name: "Nhạc Sĩ Dân Tộc",
        icon: "🎻",
        threshold: 4,
        description_template: "Khám phá {} lần các làn điệu dân tộc.",
    },
    BadgeDefinition {
        kind: ActionKind::LocalAuthorExplore,
        display_name: "Sử Gia Vùng Cao",
        icon: "✍️",
        threshold: 3,
        description_template: "Tìm hiểu {} lần về tác giả địa phương.",
    },
];

/// Look up the badge awarded for an action kind
pub fn badge_for(kind: ActionKind) -> Option<&'static BadgeDefinition> {
    BADGES.iter().find(|badge| badge.kind == kind)
}
