//! Registration manager - owns every in-flight registration conversation

use crate::error::{Result, SessionError};
use crate::messages;
use chrono::Utc;
use chrono_tz::Tz;
use promo_core::{CodeGenerator, ParticipantRecord, ParticipantStore, Reply, UserId};
use registration_state::{
    RegistrationState, SessionEvent, SessionMachine, StateTransition, TransitionOutcome,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Tashkent;
pub const DEFAULT_OPERATOR_CONTACT: &str = "@lazizln";

type SessionHandle = Arc<Mutex<SessionMachine>>;

/// Registration Manager - one conversation per user, finished into the store
///
/// Each user's session sits behind its own mutex, which is held for the
/// whole handling of an event (store append included). Events from the
/// same user are therefore applied one at a time, in the order they take
/// the lock, while different users proceed independently.
pub struct RegistrationManager {
    store: Arc<dyn ParticipantStore>,
    codes: CodeGenerator,
    timezone: Tz,
    operator_contact: String,
    /// Active conversations (user_id -> session)
    sessions: Arc<RwLock<HashMap<UserId, SessionHandle>>>,
}

impl RegistrationManager {
    pub fn new(store: Arc<dyn ParticipantStore>) -> Self {
        Self {
            store,
            codes: CodeGenerator::default(),
            timezone: DEFAULT_TIMEZONE,
            operator_contact: DEFAULT_OPERATOR_CONTACT.to_string(),
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn with_code_generator(mut self, codes: CodeGenerator) -> Self {
        self.codes = codes;
        self
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn with_operator_contact(mut self, contact: impl Into<String>) -> Self {
        self.operator_contact = contact.into();
        self
    }

    /// Begin a fresh registration, replacing any conversation in progress.
    pub async fn start(&self, user_id: &UserId) -> Vec<Reply> {
        let replaced = {
            let mut sessions = self.sessions.write().await;
            sessions
                .insert(user_id.clone(), Arc::new(Mutex::new(SessionMachine::new())))
                .is_some()
        };
        tracing::info!(user_id = %user_id, replaced, "Registration started");

        vec![messages::welcome(), messages::choose_language()]
    }

    /// Feed one event into the user's conversation and return the replies.
    ///
    /// Users without a conversation get no reply.
    pub async fn handle_event(&self, user_id: &UserId, event: SessionEvent) -> Vec<Reply> {
        let Some(session) = self.session(user_id).await else {
            tracing::debug!(user_id = %user_id, "Ignoring event without active session");
            return Vec::new();
        };

        let mut machine = session.lock().await;
        let transition = match Self::advance(&mut machine, event) {
            Ok(transition) => transition,
            Err(e) => {
                // A newer /start or a finished flow got there first.
                tracing::debug!(user_id = %user_id, error = %e, "Ignoring event for finished session");
                return Vec::new();
            }
        };

        let replies = self.replies_for(user_id, &transition).await;

        if machine.is_terminal() {
            self.discard(user_id, &session).await;
        }
        replies
    }

    pub async fn cancel(&self, user_id: &UserId) -> Vec<Reply> {
        self.handle_event(user_id, SessionEvent::Cancel).await
    }

    /// Current state of the user's conversation, if one is active.
    pub async fn state_of(&self, user_id: &UserId) -> Option<RegistrationState> {
        let session = self.session(user_id).await?;
        let machine = session.lock().await;
        Some(machine.state().clone())
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn session(&self, user_id: &UserId) -> Option<SessionHandle> {
        self.sessions.read().await.get(user_id).cloned()
    }

    fn advance(machine: &mut SessionMachine, event: SessionEvent) -> Result<StateTransition> {
        Ok(machine.handle_event(event)?)
    }

    async fn replies_for(&self, user_id: &UserId, transition: &StateTransition) -> Vec<Reply> {
        let language = transition.to.language();

        match (&transition.outcome, language) {
            (TransitionOutcome::LanguageSelected(lang), _) => vec![messages::ask_name(*lang)],
            (TransitionOutcome::LanguageRejected, _) => vec![messages::choose_language()],
            (TransitionOutcome::NameRejected, Some(lang)) => vec![messages::ask_name(lang)],
            (TransitionOutcome::NameAccepted, Some(lang)) => match &transition.to {
                RegistrationState::AwaitingPhone { name, .. } => {
                    vec![messages::ask_phone(lang, name)]
                }
                _ => Vec::new(),
            },
            (TransitionOutcome::PhoneRejected, Some(lang)) => {
                tracing::debug!(user_id = %user_id, "Phone number rejected");
                vec![messages::invalid_phone(lang)]
            }
            (TransitionOutcome::PhoneAccepted, _) => {
                match self.complete(user_id, &transition.to).await {
                    Ok(reply) => vec![reply],
                    Err(e) => {
                        tracing::error!(user_id = %user_id, error = %e, "Failed to save registration");
                        vec![messages::registration_failed(&self.operator_contact)]
                    }
                }
            }
            (TransitionOutcome::Cancelled, _) => {
                tracing::info!(user_id = %user_id, "Registration cancelled");
                vec![messages::cancelled()]
            }
            (outcome, None) => {
                tracing::warn!(user_id = %user_id, outcome = ?outcome, "Outcome without language");
                Vec::new()
            }
        }
    }

    /// Generate a code and append the finished record.
    async fn complete(&self, user_id: &UserId, state: &RegistrationState) -> Result<Reply> {
        let RegistrationState::Complete {
            language,
            name,
            phone,
        } = state
        else {
            return Err(SessionError::NotFound(user_id.clone()));
        };

        let record = ParticipantRecord::new(
            user_id,
            name,
            phone,
            self.codes.generate(),
            Utc::now().with_timezone(&self.timezone),
        );
        self.store.append(&record).await?;

        tracing::info!(user_id = %user_id, code = %record.code, "Participant registered");
        Ok(messages::registered(*language, name, &record.code))
    }

    /// Drop a finished session unless a newer one already replaced it.
    async fn discard(&self, user_id: &UserId, session: &SessionHandle) {
        let mut sessions = self.sessions.write().await;
        if sessions
            .get(user_id)
            .is_some_and(|current| Arc::ptr_eq(current, session))
        {
            sessions.remove(user_id);
        }
    }
}
