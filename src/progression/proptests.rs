//! Property-based tests for progression
//!
//! - XP stays below the current threshold after every action
//! - Levels, counters and badges never go backwards
//! - Total XP earned equals actions × `XP_PER_ACTION`

use super::*;
use proptest::prelude::*;

fn arb_action_kind() -> impl Strategy<Value = ActionKind> {
    proptest::sample::select(ActionKind::ALL.to_vec())
}

fn arb_actions() -> impl Strategy<Value = Vec<ActionKind>> {
    proptest::collection::vec(arb_action_kind(), 0..80)
}

/// XP spent to reach `level` from level 1, plus the XP currently held
fn lifetime_xp(profile: &ProgressionProfile) -> u64 {
    (1..profile.level)
        .map(|level| u64::from(xp_required_for_level(level)))
        .sum::<u64>()
        + u64::from(profile.xp)
}

proptest! {
    #[test]
    fn xp_stays_below_threshold(actions in arb_actions()) {
        let mut profile = ProgressionProfile::default();
        for kind in actions {
            profile = apply_action(&profile, kind).0;
            prop_assert!(profile.xp < xp_required_for_level(profile.level));
        }
    }

    #[test]
    fn progress_is_monotonic(actions in arb_actions()) {
        let mut profile = ProgressionProfile::default();
        for kind in actions {
            let (next, _) = apply_action(&profile, kind);
            prop_assert!(next.level >= profile.level);
            for badge in &profile.unlocked_badges {
                prop_assert!(next.unlocked_badges.contains(badge));
            }
            for (kind, count) in &profile.action_counts {
                prop_assert!(next.count(*kind) >= *count);
            }
            profile = next;
        }
    }

    #[test]
    fn no_xp_is_lost(actions in arb_actions()) {
        let mut profile = ProgressionProfile::default();
        for kind in &actions {
            profile = apply_action(&profile, *kind).0;
        }
        let earned = u64::from(XP_PER_ACTION) * actions.len() as u64;
        prop_assert_eq!(lifetime_xp(&profile), earned);
    }

    #[test]
    fn badges_match_thresholds(actions in arb_actions()) {
        let mut profile = ProgressionProfile::default();
        for kind in actions {
            profile = apply_action(&profile, kind).0;
        }
        for badge in &BADGES {
            let earned = profile.count(badge.kind) >= badge.threshold;
            prop_assert_eq!(profile.has_badge(badge.kind), earned);
        }
    }

    #[test]
    fn events_mirror_state_changes(
        xp in 0u32..2000,
        level in 1u32..20,
        kind in arb_action_kind(),
    ) {
        let start = ProgressionProfile { xp, level, ..ProgressionProfile::default() };
        let (next, events) = apply_action(&start, kind);
        let level_ups = events
            .iter()
            .filter(|e| matches!(e, ProgressionEvent::LevelUp { .. }))
            .count();
        prop_assert_eq!(level_ups as u32, next.level - start.level);
        let unlocks = events.len() - level_ups;
        prop_assert_eq!(unlocks, next.unlocked_badges.len() - start.unlocked_badges.len());
    }
}
