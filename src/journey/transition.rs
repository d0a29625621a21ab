//! Pure state transition function
//!
//! Given the same state and event, always produces the same new state and
//! effects, with no I/O. All sequencing rules of the journey protocol live
//! here; the runtime only executes what this function decides.

use super::effect::SessionEvent;
use super::state::{Interaction, Journey, Prompt, SessionState};
use super::{Effect, Event};
use crate::protocol::{Input, Output};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors reported by the transition function. None of these mutate state:
/// the caller keeps the prior state when a transition fails.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no active connection (connect before starting or answering)")]
    NoActiveConnection,
    #[error("no pending prompt to answer")]
    NoPendingPrompt,
    #[error("unexpected output: {0}")]
    UnexpectedOutput(String),
}

pub fn transition(
    state: &SessionState,
    event: Event,
) -> Result<TransitionResult, SessionError> {
    match event {
        // ============================================================
        // External triggers
        // ============================================================
        Event::StartRequested { filter } => {
            if !state.connection.is_connected {
                return Err(SessionError::NoActiveConnection);
            }

            let mut next = state.clone();
            match next.journeys.last_mut() {
                // Reuse the journey auto-opened by the previous Done (or
                // by a start that never got its confirmation).
                Some(open) if open.is_open() && open.interactions.is_empty() => {}
                // Starting over mid-journey abandons the open journey;
                // sealing it keeps at most one journey open.
                Some(open) if open.is_open() => {
                    open.pending_prompt = None;
                    open.sealed = true;
                    next.journeys.push(Journey::default());
                }
                _ => next.journeys.push(Journey::default()),
            }

            Ok(TransitionResult::new(next).with_effect(Effect::Enqueue(Input::start(filter))))
        }

        Event::AnswerRequested { value } => {
            if !state.connection.is_connected {
                return Err(SessionError::NoActiveConnection);
            }
            let prompt = state.pending_prompt().ok_or(SessionError::NoPendingPrompt)?;

            // The answer must carry exactly the outstanding prompt's
            // name and dataType.
            let input = Input::continue_with(prompt.name.clone(), value, prompt.data_type);
            Ok(TransitionResult::new(state.clone()).with_effect(Effect::Enqueue(input)))
        }

        // ============================================================
        // Writer loop publications
        // ============================================================
        Event::SendConfirmed(input) => {
            let mut next = state.clone();
            let Some(journey) = next.open_journey_mut() else {
                return Err(SessionError::UnexpectedOutput(
                    "send confirmed with no open journey".to_string(),
                ));
            };

            match &input {
                // A confirmed Start clears any leftover prompt (there
                // should be none on a fresh journey).
                Input::Start { .. } => journey.pending_prompt = None,
                // A confirmed Continue answers the prompt it was built
                // from; a fresher TellMe folded in the meantime keeps
                // its prompt outstanding.
                Input::Continue {
                    name, data_type, ..
                } => {
                    let answers_it = journey
                        .pending_prompt
                        .as_ref()
                        .is_some_and(|p| p.name == *name && p.data_type == *data_type);
                    if answers_it {
                        journey.pending_prompt = None;
                    }
                }
            }

            let interaction = Interaction::Sent(input);
            journey.interactions.push(interaction.clone());
            Ok(TransitionResult::new(next)
                .with_effect(Effect::Publish(SessionEvent::InteractionAdded { interaction })))
        }

        // ============================================================
        // Reader loop publications
        // ============================================================
        Event::OutputReceived(Output::Connected { message }) => {
            if state.connection.is_connected {
                // Idempotent-ignore after report: existing greeting and
                // history stay untouched.
                return Err(SessionError::UnexpectedOutput(
                    "second connected output mid-session".to_string(),
                ));
            }

            let mut next = state.clone();
            next.connection.is_connected = true;
            next.connection.greeting = Some(message.clone());
            Ok(TransitionResult::new(next)
                .with_effect(Effect::Publish(SessionEvent::Connected { greeting: message })))
        }

        Event::OutputReceived(output) => {
            if state.open_journey().is_none() {
                return Err(SessionError::UnexpectedOutput(format!(
                    "{} output with no open journey",
                    output_name(&output)
                )));
            }

            let mut next = state.clone();
            let open = next.journeys.len() - 1;

            let interaction = Interaction::Received(output.clone());
            next.journeys[open].interactions.push(interaction.clone());
            let mut effects =
                vec![Effect::Publish(SessionEvent::InteractionAdded { interaction })];

            match output {
                Output::KnowThat { .. } => {
                    // Informational; the dialog continues without an answer.
                }
                Output::TellMe { name, data_type } => {
                    // Only one prompt is outstanding at a time.
                    let prompt = Prompt { name, data_type };
                    next.journeys[open].pending_prompt = Some(prompt.clone());
                    effects.push(Effect::Publish(SessionEvent::PromptPending { prompt }));
                }
                Output::Done { message } => {
                    next.journeys[open].pending_prompt = None;
                    next.journeys[open].sealed = true;
                    // Auto-open a fresh journey so the next start has
                    // somewhere to land.
                    next.journeys.push(Journey::default());
                    effects.push(Effect::Publish(SessionEvent::JourneySealed { message }));
                }
                Output::Connected { .. } => unreachable!("handled above"),
            }

            Ok(TransitionResult {
                new_state: next,
                effects,
            })
        }

        Event::FrameRejected { reason } => {
            // Recovered locally: the reader already skipped the frame,
            // state is unchanged, subscribers get the report.
            Ok(TransitionResult::new(state.clone())
                .with_effect(Effect::Publish(SessionEvent::Error { message: reason })))
        }

        Event::TransportClosed => {
            let mut next = state.clone();
            next.connection.is_connected = false;
            Ok(TransitionResult::new(next).with_effect(Effect::Publish(SessionEvent::Closed)))
        }
    }
}

fn output_name(output: &Output) -> &'static str {
    match output {
        Output::Connected { .. } => "connected",
        Output::KnowThat { .. } => "knowThat",
        Output::TellMe { .. } => "tellMe",
        Output::Done { .. } => "done",
    }
}
