//! State transitions - FSM transition logic
//!
//! Implements the registration conversation as an exhaustive table over
//! (state, event). Input that a state does not accept leaves the state
//! unchanged and reports why, so the caller can re-prompt.

use promo_core::is_valid_phone;
use thiserror::Error;

use super::events::SessionEvent;
use super::states::RegistrationState;
use crate::language::Language;

/// Error type for invalid state transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Session is in terminal state: {0:?}")]
    TerminalState(RegistrationState),
}

/// What an event did to the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    LanguageSelected(Language),
    /// Input was not a recognized language.
    LanguageRejected,
    NameAccepted,
    /// Blank name or a non-text payload.
    NameRejected,
    /// Phone accepted; the session is complete and ready to be stored.
    PhoneAccepted,
    /// Typed text failed the phone pattern, or a shared contact was empty
    /// or unusable.
    PhoneRejected,
    Cancelled,
}

/// Represents a state transition result.
#[derive(Debug, Clone)]
pub struct StateTransition {
    /// The state before the transition.
    pub from: RegistrationState,
    /// The state after the transition.
    pub to: RegistrationState,
    pub outcome: TransitionOutcome,
}

impl StateTransition {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// Shared contacts skip the phone pattern, but must carry a number and
/// stay inside one field of the participant log.
fn is_usable_contact(phone: &str) -> bool {
    !phone.is_empty() && !phone.contains(|c: char| c == ',' || c.is_control())
}

/// Per-participant registration state machine.
#[derive(Debug, Clone, Default)]
pub struct SessionMachine {
    current_state: RegistrationState,
}

impl SessionMachine {
    /// Create a new machine waiting for a language choice.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a machine with a specific initial state.
    pub fn with_state(state: RegistrationState) -> Self {
        Self {
            current_state: state,
        }
    }

    pub fn state(&self) -> &RegistrationState {
        &self.current_state
    }

    pub fn is_terminal(&self) -> bool {
        self.current_state.is_terminal()
    }

    /// Handle an event and transition to a new state.
    pub fn handle_event(
        &mut self,
        event: SessionEvent,
    ) -> Result<StateTransition, TransitionError> {
        let from = self.current_state.clone();
        let (to, outcome) = Self::compute_next_state(&from, event)?;

        tracing::debug!(
            from = from.label(),
            to = to.label(),
            outcome = ?outcome,
            "FSM: registration transition"
        );

        self.current_state = to.clone();
        Ok(StateTransition { from, to, outcome })
    }

    fn compute_next_state(
        state: &RegistrationState,
        event: SessionEvent,
    ) -> Result<(RegistrationState, TransitionOutcome), TransitionError> {
        use RegistrationState::*;
        use SessionEvent::*;

        let next = match (state, event) {
            (Complete { .. } | Cancelled, _) => {
                return Err(TransitionError::TerminalState(state.clone()));
            }

            (_, Cancel) => (Cancelled, TransitionOutcome::Cancelled),

            // ========== Language ==========
            (AwaitingLanguage, Text { text }) => match Language::recognize(&text) {
                Some(language) => (
                    AwaitingName { language },
                    TransitionOutcome::LanguageSelected(language),
                ),
                None => (AwaitingLanguage, TransitionOutcome::LanguageRejected),
            },
            (AwaitingLanguage, Contact { .. }) => {
                (AwaitingLanguage, TransitionOutcome::LanguageRejected)
            }

            // ========== Name ==========
            (AwaitingName { language }, Text { text }) => {
                let name = text.trim();
                if name.is_empty() {
                    (state.clone(), TransitionOutcome::NameRejected)
                } else {
                    (
                        AwaitingPhone {
                            language: *language,
                            name: name.to_string(),
                        },
                        TransitionOutcome::NameAccepted,
                    )
                }
            }
            (AwaitingName { .. }, Contact { .. }) => {
                (state.clone(), TransitionOutcome::NameRejected)
            }

            // ========== Phone ==========
            (AwaitingPhone { language, name }, Contact { phone_number }) => {
                let phone = phone_number.trim();
                if is_usable_contact(phone) {
                    (
                        Complete {
                            language: *language,
                            name: name.clone(),
                            phone: phone.to_string(),
                        },
                        TransitionOutcome::PhoneAccepted,
                    )
                } else {
                    (state.clone(), TransitionOutcome::PhoneRejected)
                }
            }
            (AwaitingPhone { language, name }, Text { text }) => {
                let phone = text.trim();
                if is_valid_phone(phone) {
                    (
                        Complete {
                            language: *language,
                            name: name.clone(),
                            phone: phone.to_string(),
                        },
                        TransitionOutcome::PhoneAccepted,
                    )
                } else {
                    (state.clone(), TransitionOutcome::PhoneRejected)
                }
            }
        };
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_phone_step() -> SessionMachine {
        SessionMachine::with_state(RegistrationState::AwaitingPhone {
            language: Language::Uz,
            name: "Ali Valiyev".to_string(),
        })
    }

    #[test]
    fn test_language_selection() {
        let mut machine = SessionMachine::new();
        let transition = machine.handle_event(SessionEvent::text("🇷🇺 Русский")).unwrap();

        assert_eq!(transition.outcome, TransitionOutcome::LanguageSelected(Language::Ru));
        assert_eq!(
            machine.state(),
            &RegistrationState::AwaitingName {
                language: Language::Ru
            }
        );
    }

    #[test]
    fn test_unrecognized_language_stays_put() {
        let mut machine = SessionMachine::new();
        let transition = machine.handle_event(SessionEvent::text("English")).unwrap();

        assert_eq!(transition.outcome, TransitionOutcome::LanguageRejected);
        assert!(!transition.changed());
        assert_eq!(machine.state(), &RegistrationState::AwaitingLanguage);
    }

    #[test]
    fn test_name_is_trimmed() {
        let mut machine = SessionMachine::with_state(RegistrationState::AwaitingName {
            language: Language::Uz,
        });
        machine.handle_event(SessionEvent::text("  Ali Valiyev ")).unwrap();

        assert_eq!(
            machine.state(),
            &RegistrationState::AwaitingPhone {
                language: Language::Uz,
                name: "Ali Valiyev".to_string()
            }
        );
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let mut machine = SessionMachine::with_state(RegistrationState::AwaitingName {
            language: Language::Uz,
        });
        let transition = machine.handle_event(SessionEvent::text("   ")).unwrap();

        assert_eq!(transition.outcome, TransitionOutcome::NameRejected);
        assert!(!transition.changed());
    }

    #[test]
    fn test_contact_completes_without_pattern_check() {
        let mut machine = at_phone_step();
        let transition = machine
            .handle_event(SessionEvent::contact("998 90 123 45 67"))
            .unwrap();

        assert_eq!(transition.outcome, TransitionOutcome::PhoneAccepted);
        assert!(machine.is_terminal());
    }

    #[test]
    fn test_contact_is_trimmed() {
        let mut machine = at_phone_step();
        machine.handle_event(SessionEvent::contact(" +998901234567 ")).unwrap();

        assert!(matches!(
            machine.state(),
            RegistrationState::Complete { phone, .. } if phone == "+998901234567"
        ));
    }

    #[test]
    fn test_unusable_contacts_stay_put() {
        for phone in [
            "",
            "   ",
            "998901234567\n666,Forged,+1234567,USMONFORGED00,2020-01-01 00:00",
            "998,901234567",
            "99890\r1234567",
            "99890\t1234567",
        ] {
            let mut machine = at_phone_step();
            let transition = machine.handle_event(SessionEvent::contact(phone)).unwrap();

            assert_eq!(transition.outcome, TransitionOutcome::PhoneRejected, "{phone:?}");
            assert!(!transition.changed());
            assert!(!machine.is_terminal());
        }
    }

    #[test]
    fn test_invalid_typed_phone_stays_put() {
        let mut machine = at_phone_step();
        let transition = machine.handle_event(SessionEvent::text("my number")).unwrap();

        assert_eq!(transition.outcome, TransitionOutcome::PhoneRejected);
        assert_eq!(machine.state(), &at_phone_step().state().clone());
    }

    #[test]
    fn test_cancel_from_every_open_state() {
        for state in [
            RegistrationState::AwaitingLanguage,
            RegistrationState::AwaitingName {
                language: Language::Ru,
            },
            at_phone_step().state().clone(),
        ] {
            let mut machine = SessionMachine::with_state(state);
            let transition = machine.handle_event(SessionEvent::Cancel).unwrap();
            assert_eq!(transition.outcome, TransitionOutcome::Cancelled);
            assert_eq!(machine.state(), &RegistrationState::Cancelled);
        }
    }

    #[test]
    fn test_terminal_state_rejects_events() {
        let mut machine = SessionMachine::with_state(RegistrationState::Cancelled);
        let result = machine.handle_event(SessionEvent::text("uz"));

        assert_eq!(
            result.unwrap_err(),
            TransitionError::TerminalState(RegistrationState::Cancelled)
        );
    }
}
