#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn make_entry(user_id: &str, day: u32, spent: &str) -> Entry {
    Entry::new(
        user_id.into(),
        spent.parse().unwrap(),
        dec!(0),
        "Blackjack".into(),
        String::new(),
        date(2024, 3, day),
    )
}

// ── Entries ───────────────────────────────────────────────────

#[test]
fn test_entry_create_assigns_id() {
    let store = SqliteStore::open_in_memory().unwrap();
    let stored = store.create(&make_entry("u1", 10, "50")).unwrap();
    assert!(stored.id.is_some());
    assert_eq!(stored.money_spent_in, dec!(50));
}

#[test]
fn test_entry_roundtrip() {
    let store = SqliteStore::open_in_memory().unwrap();
    let mut entry = make_entry("u1", 10, "42.50");
    entry.money_pulled_out = dec!(17.25);
    entry.notes = "late night".into();
    store.create(&entry).unwrap();

    let all = store.list_all("u1").unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].money_spent_in, dec!(42.50));
    assert_eq!(all[0].money_pulled_out, dec!(17.25));
    assert_eq!(all[0].game_type, "Blackjack");
    assert_eq!(all[0].notes, "late night");
    assert_eq!(all[0].entry_date, date(2024, 3, 10));
}

#[test]
fn test_entries_scoped_to_user() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.create(&make_entry("u1", 5, "10")).unwrap();
    store.create(&make_entry("u2", 5, "999")).unwrap();

    let mine = store.list_all("u1").unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].money_spent_in, dec!(10));
}

#[test]
fn test_list_since_boundary_inclusive() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.create(&make_entry("u1", 1, "1")).unwrap();
    store.create(&make_entry("u1", 15, "2")).unwrap();
    let mut old = make_entry("u1", 1, "3");
    old.entry_date = date(2024, 2, 28);
    store.create(&old).unwrap();

    let recent = store.list_since("u1", date(2024, 3, 1)).unwrap();
    assert_eq!(recent.len(), 2);
    assert!(recent.iter().all(|e| e.entry_date >= date(2024, 3, 1)));
}

#[test]
fn test_entry_update_in_place() {
    let store = SqliteStore::open_in_memory().unwrap();
    let stored = store.create(&make_entry("u1", 10, "50")).unwrap();
    let id = stored.id.unwrap();

    let mut edited = stored.clone();
    edited.money_spent_in = dec!(75);
    edited.game_type = "Slots".into();
    store.update(id, "u1", &edited).unwrap();

    let all = store.list_all("u1").unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, Some(id));
    assert_eq!(all[0].money_spent_in, dec!(75));
    assert_eq!(all[0].game_type, "Slots");
}

#[test]
fn test_entry_update_wrong_user_is_noop() {
    let store = SqliteStore::open_in_memory().unwrap();
    let stored = store.create(&make_entry("u1", 10, "50")).unwrap();

    let mut edited = stored.clone();
    edited.money_spent_in = dec!(9999);
    store.update(stored.id.unwrap(), "u2", &edited).unwrap();

    let all = store.list_all("u1").unwrap();
    assert_eq!(all[0].money_spent_in, dec!(50));
}

#[test]
fn test_entry_delete() {
    let store = SqliteStore::open_in_memory().unwrap();
    let stored = store.create(&make_entry("u1", 10, "50")).unwrap();
    store.delete(stored.id.unwrap(), "u1").unwrap();
    assert!(store.list_all("u1").unwrap().is_empty());
}

// ── Budgets ───────────────────────────────────────────────────

#[test]
fn test_budget_absent_is_none() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert!(store.get("u1").unwrap().is_none());
}

#[test]
fn test_budget_upsert_roundtrip() {
    let store = SqliteStore::open_in_memory().unwrap();
    let cfg = BudgetConfig::new("u1".into(), dec!(500));
    store.upsert(&cfg).unwrap();

    let loaded = store.get("u1").unwrap().unwrap();
    assert_eq!(loaded.monthly_limit, dec!(500));
    assert_eq!(loaded.alert_threshold, dec!(80));
}

#[test]
fn test_budget_upsert_replaces_single_row() {
    let store = SqliteStore::open_in_memory().unwrap();
    store
        .upsert(&BudgetConfig::new("u1".into(), dec!(500)))
        .unwrap();
    store
        .upsert(&BudgetConfig::new("u1".into(), dec!(750)))
        .unwrap();

    let loaded = store.get("u1").unwrap().unwrap();
    assert_eq!(loaded.monthly_limit, dec!(750));
}

#[test]
fn test_budget_scoped_to_user() {
    let store = SqliteStore::open_in_memory().unwrap();
    store
        .upsert(&BudgetConfig::new("u1".into(), dec!(500)))
        .unwrap();
    assert!(store.get("u2").unwrap().is_none());
}
