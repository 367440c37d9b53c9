#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::cell::{Cell, RefCell};

use super::flow::{BudgetSetupFlow, FlowError, FlowState};
use crate::models::{BudgetConfig, Entry};
use crate::store::{BudgetStore, EntryStore, StoreError};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    date(2024, 3, 17)
}

// ── Fake collaborators ────────────────────────────────────────

#[derive(Default)]
struct FakeBudgetStore {
    config: RefCell<Option<BudgetConfig>>,
    fail_get: Cell<bool>,
    fail_upsert: Cell<bool>,
    upserts: Cell<usize>,
}

impl BudgetStore for FakeBudgetStore {
    fn get(&self, _user_id: &str) -> Result<Option<BudgetConfig>, StoreError> {
        if self.fail_get.get() {
            return Err(StoreError::Unavailable("connection refused".into()));
        }
        Ok(self.config.borrow().clone())
    }

    fn upsert(&self, config: &BudgetConfig) -> Result<(), StoreError> {
        if self.fail_upsert.get() {
            return Err(StoreError::Write("constraint violation".into()));
        }
        self.upserts.set(self.upserts.get() + 1);
        *self.config.borrow_mut() = Some(config.clone());
        Ok(())
    }
}

#[derive(Default)]
struct FakeEntryStore {
    entries: Vec<Entry>,
    fail: Cell<bool>,
}

impl FakeEntryStore {
    fn with_spend(amounts: &[Decimal]) -> Self {
        let entries = amounts
            .iter()
            .map(|&spent| {
                Entry::new(
                    "u1".into(),
                    spent,
                    Decimal::ZERO,
                    "Roulette".into(),
                    String::new(),
                    date(2024, 3, 10),
                )
            })
            .collect();
        Self {
            entries,
            fail: Cell::new(false),
        }
    }
}

impl EntryStore for FakeEntryStore {
    fn list_since(&self, _user_id: &str, since: NaiveDate) -> Result<Vec<Entry>, StoreError> {
        if self.fail.get() {
            return Err(StoreError::Query("timeout".into()));
        }
        Ok(self
            .entries
            .iter()
            .filter(|e| e.entry_date >= since)
            .cloned()
            .collect())
    }

    fn list_all(&self, _user_id: &str) -> Result<Vec<Entry>, StoreError> {
        Ok(self.entries.clone())
    }

    fn create(&self, entry: &Entry) -> Result<Entry, StoreError> {
        Ok(entry.clone())
    }

    fn update(&self, _id: i64, _user_id: &str, _entry: &Entry) -> Result<(), StoreError> {
        Ok(())
    }

    fn delete(&self, _id: i64, _user_id: &str) -> Result<(), StoreError> {
        Ok(())
    }
}

// ── load ──────────────────────────────────────────────────────

#[test]
fn test_load_without_config_needs_setup() {
    let budgets = FakeBudgetStore::default();
    let entries = FakeEntryStore::default();
    let mut flow = BudgetSetupFlow::new();

    assert_eq!(flow.state(), FlowState::Loading);
    flow.load(&budgets, &entries, "u1", today()).unwrap();
    assert_eq!(flow.state(), FlowState::NeedsSetup);
    assert!(flow.status().is_none());
    assert!(flow.error().is_none());
}

#[test]
fn test_load_with_config_goes_active() {
    let budgets = FakeBudgetStore::default();
    *budgets.config.borrow_mut() = Some(BudgetConfig::new("u1".into(), dec!(500)));
    let entries = FakeEntryStore::with_spend(&[dec!(200), dec!(150)]);
    let mut flow = BudgetSetupFlow::new();

    flow.load(&budgets, &entries, "u1", today()).unwrap();
    assert_eq!(flow.state(), FlowState::Active);
    let status = flow.status().unwrap();
    assert_eq!(status.month_spent, dec!(350));
    assert_eq!(status.percent_used, dec!(70));
}

#[test]
fn test_load_fetch_failure_is_surfaced_not_needs_setup() {
    // A failed fetch must never be mistaken for "no config".
    let budgets = FakeBudgetStore::default();
    budgets.fail_get.set(true);
    let entries = FakeEntryStore::default();
    let mut flow = BudgetSetupFlow::new();

    let err = flow.load(&budgets, &entries, "u1", today()).unwrap_err();
    assert!(matches!(err, FlowError::Storage(_)));
    assert_eq!(flow.state(), FlowState::Loading);
    assert!(flow.error().unwrap().contains("connection refused"));
}

#[test]
fn test_load_entry_fetch_failure_keeps_state() {
    let budgets = FakeBudgetStore::default();
    *budgets.config.borrow_mut() = Some(BudgetConfig::new("u1".into(), dec!(500)));
    let entries = FakeEntryStore::default();
    entries.fail.set(true);
    let mut flow = BudgetSetupFlow::new();

    let err = flow.load(&budgets, &entries, "u1", today()).unwrap_err();
    assert!(matches!(err, FlowError::Storage(_)));
    assert_eq!(flow.state(), FlowState::Loading);
    assert!(flow.status().is_none());
}

// ── save ──────────────────────────────────────────────────────

#[test]
fn test_save_non_numeric_rejected_before_storage() {
    // Scenario D: "abc" never reaches the store.
    let budgets = FakeBudgetStore::default();
    let entries = FakeEntryStore::default();
    let mut flow = BudgetSetupFlow::new();
    flow.load(&budgets, &entries, "u1", today()).unwrap();

    let err = flow
        .save(&budgets, &entries, "u1", "abc", today())
        .unwrap_err();
    assert!(matches!(err, FlowError::Validation(_)));
    assert_eq!(budgets.upserts.get(), 0);
    assert_eq!(flow.state(), FlowState::NeedsSetup);
}

#[test]
fn test_save_empty_and_non_positive_rejected() {
    let budgets = FakeBudgetStore::default();
    let entries = FakeEntryStore::default();
    let mut flow = BudgetSetupFlow::new();

    for input in ["", "   ", "0", "-25"] {
        let err = flow
            .save(&budgets, &entries, "u1", input, today())
            .unwrap_err();
        assert!(matches!(err, FlowError::Validation(_)), "input: {input:?}");
    }
    assert_eq!(budgets.upserts.get(), 0);
}

#[test]
fn test_save_roundtrip_to_active() {
    let budgets = FakeBudgetStore::default();
    let entries = FakeEntryStore::with_spend(&[dec!(100)]);
    let mut flow = BudgetSetupFlow::new();
    flow.load(&budgets, &entries, "u1", today()).unwrap();
    assert_eq!(flow.state(), FlowState::NeedsSetup);

    flow.save(&budgets, &entries, "u1", "500", today()).unwrap();
    assert_eq!(flow.state(), FlowState::Active);
    // Read-after-write: the reload observes the just-written config.
    assert_eq!(flow.config().unwrap().monthly_limit, dec!(500));
    assert_eq!(flow.status().unwrap().month_spent, dec!(100));
    assert_eq!(budgets.upserts.get(), 1);
}

#[test]
fn test_save_resets_alert_threshold_to_default() {
    let budgets = FakeBudgetStore::default();
    *budgets.config.borrow_mut() = Some(BudgetConfig {
        user_id: "u1".into(),
        monthly_limit: dec!(500),
        alert_threshold: dec!(95),
    });
    let entries = FakeEntryStore::default();
    let mut flow = BudgetSetupFlow::new();
    flow.load(&budgets, &entries, "u1", today()).unwrap();

    // Full-replace upsert: the custom threshold does not survive a save.
    flow.save(&budgets, &entries, "u1", "600", today()).unwrap();
    assert_eq!(flow.config().unwrap().alert_threshold, dec!(80));
}

#[test]
fn test_save_storage_failure_keeps_editing() {
    let budgets = FakeBudgetStore::default();
    *budgets.config.borrow_mut() = Some(BudgetConfig::new("u1".into(), dec!(500)));
    let entries = FakeEntryStore::default();
    let mut flow = BudgetSetupFlow::new();
    flow.load(&budgets, &entries, "u1", today()).unwrap();
    flow.begin_edit();

    budgets.fail_upsert.set(true);
    let err = flow
        .save(&budgets, &entries, "u1", "750", today())
        .unwrap_err();
    assert!(matches!(err, FlowError::Storage(_)));
    assert_eq!(flow.state(), FlowState::Editing);
    assert!(flow.error().is_some());
}

#[test]
fn test_save_clears_previous_error() {
    let budgets = FakeBudgetStore::default();
    let entries = FakeEntryStore::default();
    let mut flow = BudgetSetupFlow::new();
    flow.load(&budgets, &entries, "u1", today()).unwrap();

    flow.save(&budgets, &entries, "u1", "abc", today())
        .unwrap_err();
    assert!(flow.error().is_some());
    flow.save(&budgets, &entries, "u1", "500", today()).unwrap();
    assert!(flow.error().is_none());
}

#[test]
fn test_save_validation_failure_sets_error_snapshot() {
    // A rejected limit must still land in the error snapshot the UI reads.
    let budgets = FakeBudgetStore::default();
    let entries = FakeEntryStore::default();
    let mut flow = BudgetSetupFlow::new();
    flow.load(&budgets, &entries, "u1", today()).unwrap();

    let err = flow
        .save(&budgets, &entries, "u1", "abc", today())
        .unwrap_err();
    assert!(matches!(err, FlowError::Validation(_)));
    assert_eq!(flow.error(), Some("'abc' is not a number"));
    assert_eq!(budgets.upserts.get(), 0);
}

// ── edit transitions ──────────────────────────────────────────

#[test]
fn test_edit_only_from_active() {
    let mut flow = BudgetSetupFlow::new();
    flow.begin_edit();
    assert_eq!(flow.state(), FlowState::Loading);

    let budgets = FakeBudgetStore::default();
    *budgets.config.borrow_mut() = Some(BudgetConfig::new("u1".into(), dec!(500)));
    let entries = FakeEntryStore::default();
    flow.load(&budgets, &entries, "u1", today()).unwrap();

    flow.begin_edit();
    assert_eq!(flow.state(), FlowState::Editing);
    flow.cancel_edit();
    assert_eq!(flow.state(), FlowState::Active);
}

#[test]
fn test_edit_save_returns_to_active() {
    let budgets = FakeBudgetStore::default();
    *budgets.config.borrow_mut() = Some(BudgetConfig::new("u1".into(), dec!(500)));
    let entries = FakeEntryStore::default();
    let mut flow = BudgetSetupFlow::new();
    flow.load(&budgets, &entries, "u1", today()).unwrap();

    flow.begin_edit();
    flow.save(&budgets, &entries, "u1", "800", today()).unwrap();
    assert_eq!(flow.state(), FlowState::Active);
    assert_eq!(flow.config().unwrap().monthly_limit, dec!(800));
}

#[test]
fn test_flow_not_busy_between_operations() {
    let budgets = FakeBudgetStore::default();
    let entries = FakeEntryStore::default();
    let mut flow = BudgetSetupFlow::new();
    assert!(!flow.busy());
    flow.load(&budgets, &entries, "u1", today()).unwrap();
    assert!(!flow.busy());
}
