//! Whole-bot conversations through the dispatcher

use promo_core::{FileParticipantStore, ParticipantStore, Reply, UserId};
use promo_server::{AppState, InboundEvent, Settings};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::{tempdir, TempDir};

const OPERATOR: i64 = 6434717615;

fn settings(data_file: PathBuf) -> Settings {
    Settings {
        host: "127.0.0.1".to_string(),
        port: 0,
        operator_id: UserId::from(OPERATOR),
        operator_contact: "@lazizln".to_string(),
        data_file,
        code_prefix: "USMON".to_string(),
        timezone: chrono_tz::Asia::Tashkent,
    }
}

fn setup() -> (AppState, Arc<FileParticipantStore>, TempDir) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("registrations.csv");
    let store = Arc::new(FileParticipantStore::new(&path));
    let state = AppState::with_store(&settings(path), store.clone());
    (state, store, dir)
}

async fn send(state: &AppState, event: InboundEvent) -> Vec<Reply> {
    state.dispatcher.dispatch(event).await.replies
}

#[tokio::test]
async fn test_register_count_remove_cycle() {
    let (state, store, _dir) = setup();
    let user = 1001i64;

    let greeting = send(&state, InboundEvent::command(user, "/start")).await;
    assert_eq!(greeting.len(), 2);
    send(&state, InboundEvent::text(user, "🇺🇿 O'zbekcha")).await;
    send(&state, InboundEvent::text(user, "Ali Valiyev")).await;
    let done = send(&state, InboundEvent::contact(user, "+998901234567")).await;

    let records = store.all().await.unwrap();
    assert_eq!(records.len(), 1);
    let code = records[0].code.clone();
    assert!(code.starts_with("USMON"));
    assert_eq!(code.len(), 13);
    assert!(done[0].body().contains(&code));

    let count = send(&state, InboundEvent::command(user, "/count")).await;
    assert!(count[0].body().ends_with(": 1"));

    let removed = send(
        &state,
        InboundEvent::command(OPERATOR, format!("/remove {}", code.to_lowercase())),
    )
    .await;
    assert!(removed[0].body().contains(&code));

    let count = send(&state, InboundEvent::command(user, "/count")).await;
    assert!(count[0].body().contains("hech kim"));
}

#[tokio::test]
async fn test_operator_commands_denied_for_participants() {
    let (state, store, _dir) = setup();
    let user = 1001i64;

    send(&state, InboundEvent::command(user, "/start")).await;
    send(&state, InboundEvent::text(user, "🇷🇺 Русский")).await;
    send(&state, InboundEvent::text(user, "Olga")).await;
    send(&state, InboundEvent::text(user, "+79001234567")).await;

    for command in ["/list", "/remove all", "/winner"] {
        let replies = send(&state, InboundEvent::command(user, command)).await;
        assert_eq!(replies, vec![Reply::text(promo_admin::replies::PERMISSION_DENIED)]);
    }
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_operator_list_and_winner() {
    let (state, _store, _dir) = setup();
    let user = 1001i64;

    send(&state, InboundEvent::command(user, "/start")).await;
    send(&state, InboundEvent::text(user, "uz")).await;
    send(&state, InboundEvent::text(user, "Ali Valiyev")).await;
    send(&state, InboundEvent::text(user, "+998901234567")).await;

    let listing = send(&state, InboundEvent::command(OPERATOR, "/list")).await;
    assert_eq!(listing.len(), 2);
    assert!(matches!(&listing[0], Reply::Document { content, .. } if content.contains("Ali Valiyev")));

    let winner = send(&state, InboundEvent::command(OPERATOR, "/winner")).await;
    assert!(winner[0].body().contains("Ali Valiyev"));
}

#[tokio::test]
async fn test_unknown_commands_and_idle_text_are_ignored() {
    let (state, _store, _dir) = setup();

    assert!(send(&state, InboundEvent::command(7i64, "/help")).await.is_empty());
    assert!(send(&state, InboundEvent::text(7i64, "hello")).await.is_empty());
}

#[tokio::test]
async fn test_cancel_ends_conversation() {
    let (state, store, _dir) = setup();
    let user = 1001i64;

    send(&state, InboundEvent::command(user, "/start")).await;
    send(&state, InboundEvent::text(user, "uz")).await;
    let cancelled = send(&state, InboundEvent::command(user, "/cancel")).await;
    assert_eq!(cancelled.len(), 1);

    assert!(send(&state, InboundEvent::text(user, "Ali")).await.is_empty());
    assert_eq!(store.count().await.unwrap(), 0);
    assert_eq!(state.dispatcher.registrations().active_sessions().await, 0);
}
