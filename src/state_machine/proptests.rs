//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::transition::*;
use super::*;
use crate::language::LANGUAGES;
use crate::progression::ActionKind;
use crate::prompts::UserMode;
use crate::session::Citation;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_mode() -> impl Strategy<Value = UserMode> {
    prop_oneof![Just(UserMode::Learner), Just(UserMode::Instructor)]
}

fn arb_context() -> impl Strategy<Value = TurnContext> {
    (
        arb_mode(),
        0..LANGUAGES.len(),
        proptest::option::weighted(0.9, "[a-f0-9]{8}"),
    )
        .prop_map(|(mode, language, session)| TurnContext::new(mode, &LANGUAGES[language], session))
}

fn arb_action() -> impl Strategy<Value = Option<ActionKind>> {
    proptest::option::of(proptest::sample::select(ActionKind::ALL.to_vec()))
}

fn arb_state() -> impl Strategy<Value = TurnState> {
    prop_oneof![
        Just(TurnState::Idle),
        ("[a-f0-9]{8}", arb_action()).prop_map(|(session_id, progression)| {
            TurnState::AwaitingReply {
                session_id,
                progression,
            }
        }),
    ]
}

fn arb_citation() -> impl Strategy<Value = Citation> {
    ("[a-zA-Z ]{1,20}", "https://[a-z]{3,10}\\.vn").prop_map(|(title, uri)| Citation { title, uri })
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        ("[a-zA-Zà-ỹ \n]{0,40}", arb_action(), any::<bool>()).prop_map(
            |(text, action, annotate)| Event::Submit {
                text,
                action,
                annotate
            }
        ),
        (
            "[a-zA-Z ]{0,40}",
            proptest::collection::vec(arb_citation(), 0..3)
        )
            .prop_map(|(text, citations)| Event::ReplyReceived { text, citations }),
        "[a-z ]{0,20}".prop_map(|message| Event::ReplyFailed { message }),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Same inputs, same outputs
    #[test]
    fn transition_is_deterministic(
        state in arb_state(),
        ctx in arb_context(),
        event in arb_event(),
    ) {
        let first = transition(&state, &ctx, event.clone());
        let second = transition(&state, &ctx, event);
        match (first, second) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.new_state, b.new_state);
                prop_assert_eq!(a.effects, b.effects);
            }
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            _ => prop_assert!(false, "results diverged"),
        }
    }

    /// A pending turn rejects every submit
    #[test]
    fn awaiting_rejects_submit(
        session_id in "[a-f0-9]{8}",
        progression in arb_action(),
        ctx in arb_context(),
        text in "[a-z ]{0,30}",
        action in arb_action(),
        annotate in any::<bool>(),
    ) {
        let state = TurnState::AwaitingReply { session_id, progression };
        let result = transition(&state, &ctx, Event::Submit { text, action, annotate });
        prop_assert_eq!(result.unwrap_err(), TransitionError::TurnInFlight);
    }

    /// Accepted submits append exactly one user message, then request a reply
    #[test]
    fn accepted_submit_shape(ctx in arb_context(), event in arb_event()) {
        if !matches!(event, Event::Submit { .. }) {
            return Ok(());
        }
        if let Ok(result) = transition(&TurnState::Idle, &ctx, event) {
            let TurnState::AwaitingReply { session_id, .. } = &result.new_state else {
                return Err(TestCaseError::fail("submit must await a reply"));
            };
            prop_assert_eq!(Some(session_id), ctx.active_session_id.as_ref());
            prop_assert_eq!(result.effects.len(), 2);
            let is_user_message = matches!(result.effects[0], Effect::AppendUserMessage { .. });
            prop_assert!(is_user_message);
            let is_request = matches!(result.effects[1], Effect::RequestReply { .. });
            prop_assert!(is_request);
        }
    }

    /// Replies always land in the session the turn started in
    #[test]
    fn replies_target_originating_session(
        state in arb_state(),
        ctx in arb_context(),
        event in arb_event(),
    ) {
        let TurnState::AwaitingReply { session_id, .. } = &state else {
            return Ok(());
        };
        if let Ok(result) = transition(&state, &ctx, event) {
            prop_assert!(result.new_state.is_idle());
            for effect in &result.effects {
                if let Effect::AppendAssistantMessage { session_id: target, text, .. } = effect {
                    prop_assert_eq!(target, session_id);
                    prop_assert!(!text.trim().is_empty());
                }
            }
        }
    }

    /// Instructors never receive progression credit
    #[test]
    fn instructor_turns_earn_nothing(
        session in "[a-f0-9]{8}",
        text in "[a-z]{1,20}",
        action in arb_action(),
        annotate in any::<bool>(),
        reply in "[a-z ]{0,20}",
    ) {
        let ctx = TurnContext::new(UserMode::Instructor, &LANGUAGES[0], Some(session));
        let started = transition(&TurnState::Idle, &ctx, Event::Submit { text, action, annotate }).unwrap();
        let finished = transition(
            &started.new_state,
            &ctx,
            Event::ReplyReceived { text: reply, citations: vec![] },
        )
        .unwrap();
        let earned = finished
            .effects
            .iter()
            .any(|effect| matches!(effect, Effect::ApplyProgression { .. }));
        prop_assert!(!earned);
    }
}
