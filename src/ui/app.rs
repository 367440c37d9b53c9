use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

use crate::budget::{compute_month_returned, compute_month_spend, BudgetSetupFlow};
use crate::models::Entry;
use crate::store::{EntryStore, SqliteStore};
use crate::timer::SessionTimer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Entries,
    Session,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Entries, Self::Session]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Entries => write!(f, "Entries"),
            Self::Session => write!(f, "Session"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteEntry { id: i64, game_type: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) user_id: String,
    pub(crate) today: NaiveDate,

    // Budget widget
    pub(crate) flow: BudgetSetupFlow,

    // Entries
    pub(crate) entries: Vec<Entry>,
    pub(crate) entry_index: usize,
    pub(crate) entry_scroll: usize,

    // Session stopwatch
    pub(crate) timer: SessionTimer,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(user_id: String) -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            user_id,
            today: Local::now().date_naive(),

            flow: BudgetSetupFlow::new(),

            entries: Vec::new(),
            entry_index: 0,
            entry_scroll: 0,

            timer: SessionTimer::new(),

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Reload the budget flow. Store failures land in the status bar and in
    /// the flow's own error snapshot; the app keeps running either way.
    pub(crate) fn refresh_budget(&mut self, store: &SqliteStore) {
        if let Err(e) = self.flow.load(store, store, &self.user_id, self.today) {
            self.status_message = format!("Budget load failed: {e}");
        }
    }

    pub(crate) fn refresh_entries(&mut self, store: &SqliteStore) {
        match store.list_all(&self.user_id) {
            Ok(entries) => self.entries = entries,
            Err(e) => {
                self.status_message = format!("Could not load entries: {e}");
                return;
            }
        }
        if self.entry_index >= self.entries.len() && !self.entries.is_empty() {
            self.entry_index = self.entries.len() - 1;
        }
    }

    pub(crate) fn refresh_all(&mut self, store: &SqliteStore) {
        self.refresh_budget(store);
        self.refresh_entries(store);
    }

    /// Month-to-date totals for the dashboard cards, derived from the
    /// loaded entries (the list is unfiltered, the aggregator windows it).
    pub(crate) fn month_totals(&self) -> (Decimal, Decimal) {
        let spent = compute_month_spend(&self.entries, self.today);
        let returned = compute_month_returned(&self.entries, self.today);
        (spent, returned)
    }

    pub(crate) fn selected_entry(&self) -> Option<&Entry> {
        self.entries.get(self.entry_index)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
