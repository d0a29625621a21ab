//! Property-based tests for the journey state machine
//!
//! These verify the ordering and history invariants hold across arbitrary
//! valid server output sequences.

use super::state::{Interaction, SessionState};
use super::transition::transition;
use super::{Effect, Event};
use crate::protocol::{DataType, Input, Output, PrimitiveKind};
use proptest::prelude::*;

fn arb_data_type() -> impl Strategy<Value = DataType> {
    prop_oneof![
        Just(PrimitiveKind::Long),
        Just(PrimitiveKind::String),
        Just(PrimitiveKind::Boolean),
        Just(PrimitiveKind::Double),
    ]
    .prop_map(DataType::new)
}

/// Mid-journey outputs only; Connected precedes journeys and Done seals.
fn arb_mid_journey_output() -> impl Strategy<Value = Output> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,30}".prop_map(|message| Output::KnowThat { message }),
        ("[a-z]{1,12}", arb_data_type())
            .prop_map(|(name, data_type)| Output::TellMe { name, data_type }),
    ]
}

fn started_state() -> SessionState {
    let state = transition(
        &SessionState::new(),
        Event::OutputReceived(Output::Connected {
            message: "hi".into(),
        }),
    )
    .unwrap()
    .new_state;
    let state = transition(&state, Event::StartRequested { filter: "f".into() })
        .unwrap()
        .new_state;
    transition(&state, Event::SendConfirmed(Input::start("f")))
        .unwrap()
        .new_state
}

proptest! {
    /// Folding any valid output sequence reproduces it, in order, with no
    /// duplication or loss, in the open journey's interactions.
    #[test]
    fn folds_preserve_output_order(outputs in prop::collection::vec(arb_mid_journey_output(), 0..12)) {
        let mut state = started_state();
        for output in &outputs {
            state = transition(&state, Event::OutputReceived(output.clone()))
                .unwrap()
                .new_state;
        }

        let journey = state.open_journey().unwrap();
        // First interaction is the confirmed Start; the rest mirror the
        // delivered outputs exactly.
        let received: Vec<_> = journey.interactions[1..].to_vec();
        let expected: Vec<_> = outputs.into_iter().map(Interaction::Received).collect();
        prop_assert_eq!(received, expected);
    }

    /// A Done fold always grows the journey list by exactly one and leaves
    /// a fresh open journey behind.
    #[test]
    fn done_always_opens_exactly_one_fresh_journey(outputs in prop::collection::vec(arb_mid_journey_output(), 0..8)) {
        let mut state = started_state();
        for output in outputs {
            state = transition(&state, Event::OutputReceived(output))
                .unwrap()
                .new_state;
        }

        let before = state.journeys.len();
        let state = transition(
            &state,
            Event::OutputReceived(Output::Done { message: "done".into() }),
        )
        .unwrap()
        .new_state;

        prop_assert_eq!(state.journeys.len(), before + 1);
        let fresh = state.journeys.last().unwrap();
        prop_assert!(fresh.is_open());
        prop_assert!(fresh.interactions.is_empty());
        prop_assert!(fresh.pending_prompt.is_none());
    }

    /// An answer always echoes the name and dataType of the most recently
    /// folded TellMe, regardless of what arrived in between.
    #[test]
    fn answer_echoes_latest_prompt(
        outputs in prop::collection::vec(arb_mid_journey_output(), 0..8),
        name in "[a-z]{1,12}",
        data_type in arb_data_type(),
        value in "[a-zA-Z0-9]{1,10}",
    ) {
        let mut state = started_state();
        for output in outputs {
            state = transition(&state, Event::OutputReceived(output))
                .unwrap()
                .new_state;
        }
        state = transition(
            &state,
            Event::OutputReceived(Output::TellMe {
                name: name.clone(),
                data_type,
            }),
        )
        .unwrap()
        .new_state;

        let result = transition(&state, Event::AnswerRequested { value: value.clone() }).unwrap();
        prop_assert_eq!(
            result.effects,
            vec![Effect::Enqueue(Input::continue_with(name, value, data_type))]
        );
    }
}
