//! Learner progression: XP, levels and badges
//!
//! All operations are pure. `apply_action` returns the next profile and
//! the events the caller should surface as notifications.

mod catalog;

#[cfg(test)]
mod proptests;

pub use catalog::{badge_for, BADGES};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// XP awarded for every action, regardless of kind
pub const XP_PER_ACTION: u32 = 50;

/// Learning actions that earn XP and count toward badges
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Polish,
    Roleplay,
    LocalExplore,
    GenreAnalysis,
    ScriptExplore,
    MusicExplore,
    LocalAuthorExplore,
}

impl ActionKind {
    #[allow(dead_code)] // Used in tests
    pub const ALL: [ActionKind; 7] = [
        ActionKind::Polish,
        ActionKind::Roleplay,
        ActionKind::LocalExplore,
        ActionKind::GenreAnalysis,
        ActionKind::ScriptExplore,
        ActionKind::MusicExplore,
        ActionKind::LocalAuthorExplore,
    ];
}

/// XP needed to advance from `level` to the next one
///
/// `floor(100 × (level + 0.5))`, kept in integer arithmetic.
pub fn xp_required_for_level(level: u32) -> u32 {
    level.saturating_mul(100).saturating_add(50)
}

fn first_level() -> u32 {
    1
}

/// Persisted progression state of the learner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionProfile {
    #[serde(default)]
    pub xp: u32,
    #[serde(default = "first_level")]
    pub level: u32,
    #[serde(default)]
    pub action_counts: BTreeMap<ActionKind, u32>,
    /// Unlock order is preserved; entries are never removed
    #[serde(default)]
    pub unlocked_badges: Vec<ActionKind>,
}

impl Default for ProgressionProfile {
    fn default() -> Self {
        Self {
            xp: 0,
            level: first_level(),
            action_counts: BTreeMap::new(),
            unlocked_badges: Vec::new(),
        }
    }
}

impl ProgressionProfile {
    pub fn count(&self, kind: ActionKind) -> u32 {
        self.action_counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn has_badge(&self, kind: ActionKind) -> bool {
        self.unlocked_badges.contains(&kind)
    }

    /// Repair values no leveling transition can produce
    ///
    /// Level 0 becomes level 1 and duplicate badge entries are dropped.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.level = self.level.max(first_level());
        let mut seen = Vec::with_capacity(self.unlocked_badges.len());
        self.unlocked_badges.retain(|kind| {
            if seen.contains(kind) {
                false
            } else {
                seen.push(*kind);
                true
            }
        });
        self
    }

    pub fn summary(&self) -> ProgressSummary {
        let xp_required = xp_required_for_level(self.level);
        let percent = u64::from(self.xp) * 100 / u64::from(xp_required.max(1));
        ProgressSummary {
            level: self.level,
            xp: self.xp,
            xp_required,
            xp_remaining: xp_required.saturating_sub(self.xp),
            percent: u32::try_from(percent.min(100)).unwrap_or(100),
        }
    }

    /// Catalog badges split into unlocked and locked, each in catalog order
    pub fn badge_board(&self) -> BadgeBoard {
        let (unlocked, locked) = BADGES
            .iter()
            .map(|badge| BadgeView {
                kind: badge.kind,
                display_name: badge.display_name,
                icon: badge.icon,
                threshold: badge.threshold,
                description: badge.description(),
                progress: self.count(badge.kind).min(badge.threshold),
                unlocked: self.has_badge(badge.kind),
            })
            .partition(|view| view.unlocked);
        BadgeBoard { unlocked, locked }
    }
}

/// Something worth telling the learner about
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressionEvent {
    LevelUp { level: u32 },
    BadgeUnlocked { kind: ActionKind },
}

impl ProgressionEvent {
    pub fn notification(&self) -> String {
        match self {
            ProgressionEvent::LevelUp { level } => {
                format!("Chúc mừng bạn đã lên cấp {level}!")
            }
            ProgressionEvent::BadgeUnlocked { kind } => {
                let name = badge_for(*kind).map_or("?", |badge| badge.display_name);
                format!("Bạn đã mở khóa huy hiệu \"{name}\"!")
            }
        }
    }
}

/// Apply one learning action to a profile
///
/// Adds [`XP_PER_ACTION`], bumps the action counter, levels up while the
/// XP covers the current threshold (surplus carries over), then unlocks
/// every catalog badge whose threshold is now met.
pub fn apply_action(
    profile: &ProgressionProfile,
    kind: ActionKind,
) -> (ProgressionProfile, Vec<ProgressionEvent>) {
    let mut next = profile.clone().normalized();
    let mut events = Vec::new();

    next.xp = next.xp.saturating_add(XP_PER_ACTION);
    let counter = next.action_counts.entry(kind).or_insert(0);
    *counter = counter.saturating_add(1);

    let mut required = xp_required_for_level(next.level);
    while next.xp >= required && next.level < u32::MAX {
        next.xp -= required;
        next.level += 1;
        events.push(ProgressionEvent::LevelUp { level: next.level });
        required = xp_required_for_level(next.level);
    }

    for badge in &BADGES {
        if !next.has_badge(badge.kind) && next.count(badge.kind) >= badge.threshold {
            next.unlocked_badges.push(badge.kind);
            events.push(ProgressionEvent::BadgeUnlocked { kind: badge.kind });
        }
    }

    (next, events)
}

/// Level progress for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    pub level: u32,
    pub xp: u32,
    pub xp_required: u32,
    pub xp_remaining: u32,
    /// Progress toward the next level, 0..=100
    pub percent: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BadgeView {
    pub kind: ActionKind,
    pub display_name: &'static str,
    pub icon: &'static str,
    pub threshold: u32,
    pub description: String,
    pub progress: u32,
    pub unlocked: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BadgeBoard {
    pub unlocked: Vec<BadgeView>,
    pub locked: Vec<BadgeView>,
}
