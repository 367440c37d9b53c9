#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::app::{App, InputMode, PendingAction};
use super::commands::handle_command;
use crate::models::Entry;
use crate::store::SqliteStore;

fn app_with_entry(id: Option<i64>) -> App {
    let mut app = App::new("u1".into());
    let mut entry = Entry::new(
        "u1".into(),
        dec!(50),
        dec!(20),
        "Poker".into(),
        String::new(),
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
    );
    entry.id = id;
    app.entries.push(entry);
    app
}

#[test]
fn test_delete_entry_command_arms_confirmation() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let mut app = app_with_entry(Some(7));

    handle_command("delete-entry", &mut app, &mut store).unwrap();

    assert_eq!(app.input_mode, InputMode::Confirm);
    assert!(app.confirm_message.contains("Poker"));
    match app.pending_action {
        Some(PendingAction::DeleteEntry { id, ref game_type }) => {
            assert_eq!(id, 7);
            assert_eq!(game_type.as_str(), "Poker");
        }
        ref other => panic!("unexpected pending action: {other:?}"),
    }
}

#[test]
fn test_delete_entry_command_without_selection_is_noop() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let mut app = App::new("u1".into());

    handle_command("delete-entry", &mut app, &mut store).unwrap();

    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.pending_action.is_none());
    assert_eq!(app.status_message, "No entry selected");
}

#[test]
fn test_delete_entry_command_unsaved_entry_is_noop() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let mut app = app_with_entry(None);

    handle_command("delete-entry", &mut app, &mut store).unwrap();

    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.pending_action.is_none());
}

#[test]
fn test_unknown_command_suggests_closest() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let mut app = App::new("u1".into());

    handle_command("limt", &mut app, &mut store).unwrap();

    assert!(app.status_message.contains("Did you mean :limit?"));
}
