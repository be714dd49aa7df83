//! Routes inbound chat events to the registration flow or to operator commands

use promo_admin::{replies, AdminService, RemoveTarget};
use promo_core::{Reply, UserId};
use registration_state::SessionEvent;
use serde::{Deserialize, Serialize};
use session_manager::RegistrationManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Text,
    Contact,
    Command,
}

/// One update from the chat transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundEvent {
    pub user_id: UserId,
    pub kind: EventKind,
    /// Message text, shared phone number, or command line.
    #[serde(default)]
    pub payload: String,
}

impl InboundEvent {
    pub fn text(user_id: impl Into<UserId>, text: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            kind: EventKind::Text,
            payload: text.into(),
        }
    }

    pub fn contact(user_id: impl Into<UserId>, phone_number: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            kind: EventKind::Contact,
            payload: phone_number.into(),
        }
    }

    pub fn command(user_id: impl Into<UserId>, command: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            kind: EventKind::Command,
            payload: command.into(),
        }
    }
}

/// Replies for the user who sent the event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundResponse {
    pub user_id: UserId,
    pub replies: Vec<Reply>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Cancel,
    Count,
    List,
    Remove(Option<RemoveTarget>),
    Winner,
}

impl Command {
    /// Parse `/name[@bot] [args]`; the leading slash is optional.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let line = line.strip_prefix('/').unwrap_or(line);
        let (head, args) = match line.split_once(char::is_whitespace) {
            Some((head, args)) => (head, args.trim()),
            None => (line, ""),
        };
        let name = head.split('@').next().unwrap_or(head).to_ascii_lowercase();

        match name.as_str() {
            "start" => Some(Self::Start),
            "cancel" => Some(Self::Cancel),
            "count" => Some(Self::Count),
            "list" => Some(Self::List),
            "remove" => Some(Self::Remove(
                args.split_whitespace().next().and_then(RemoveTarget::parse),
            )),
            "winner" => Some(Self::Winner),
            _ => None,
        }
    }
}

pub struct Dispatcher {
    registrations: RegistrationManager,
    admin: AdminService,
}

impl Dispatcher {
    pub fn new(registrations: RegistrationManager, admin: AdminService) -> Self {
        Self {
            registrations,
            admin,
        }
    }

    pub fn registrations(&self) -> &RegistrationManager {
        &self.registrations
    }

    pub async fn dispatch(&self, event: InboundEvent) -> OutboundResponse {
        let user_id = event.user_id;
        let replies = match event.kind {
            EventKind::Text => {
                self.registrations
                    .handle_event(&user_id, SessionEvent::text(event.payload))
                    .await
            }
            EventKind::Contact => {
                self.registrations
                    .handle_event(&user_id, SessionEvent::contact(event.payload))
                    .await
            }
            EventKind::Command => match Command::parse(&event.payload) {
                Some(command) => self.run_command(&user_id, command).await,
                None => {
                    tracing::debug!(user_id = %user_id, payload = %event.payload, "Unknown command");
                    Vec::new()
                }
            },
        };

        OutboundResponse { user_id, replies }
    }

    async fn run_command(&self, caller: &UserId, command: Command) -> Vec<Reply> {
        tracing::debug!(user_id = %caller, command = ?command, "Running command");

        let result = match command {
            Command::Start => return self.registrations.start(caller).await,
            Command::Cancel => return self.registrations.cancel(caller).await,
            Command::Count => self.admin.count().await.map(|o| replies::count(&o)),
            Command::List => self.admin.list(caller).await.map(replies::list),
            Command::Remove(target) => self
                .admin
                .remove(caller, target)
                .await
                .map(|o| replies::remove(&o)),
            Command::Winner => self.admin.winner(caller).await.map(|o| replies::winner(&o)),
        };

        result.unwrap_or_else(|e| {
            tracing::error!(user_id = %caller, error = %e, "Command failed");
            replies::error(&e, self.admin.gate().operator() == caller)
        })
    }
}
