use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

use super::{compute_month_spend, evaluate, month_start, BudgetError, BudgetStatus};
use crate::models::BudgetConfig;
use crate::store::{BudgetStore, EntryStore, StoreError};

#[derive(Debug, Error)]
pub(crate) enum FlowError {
    /// User input rejected before any storage call.
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Storage(#[from] StoreError),
    #[error(transparent)]
    Config(#[from] BudgetError),
}

/// Where the budget widget is in its lifecycle. The setup form is shown for
/// both `NeedsSetup` and `Editing`; the difference is only where a cancel or
/// a failed save leaves you.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FlowState {
    Loading,
    NeedsSetup,
    Active,
    Editing,
}

/// State machine for first-run budget setup and ongoing display/edit.
///
/// Stores are passed in per call so the flow can be driven against fakes.
/// There is no internal de-duplication of overlapping saves: the last write
/// wins through upsert semantics, and callers are expected to disable the
/// triggering control while `busy` reports true.
pub(crate) struct BudgetSetupFlow {
    state: FlowState,
    busy: bool,
    error: Option<String>,
    config: Option<BudgetConfig>,
    status: Option<BudgetStatus>,
}

impl BudgetSetupFlow {
    pub(crate) fn new() -> Self {
        Self {
            state: FlowState::Loading,
            busy: false,
            error: None,
            config: None,
            status: None,
        }
    }

    pub(crate) fn state(&self) -> FlowState {
        self.state
    }

    pub(crate) fn busy(&self) -> bool {
        self.busy
    }

    pub(crate) fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub(crate) fn config(&self) -> Option<&BudgetConfig> {
        self.config.as_ref()
    }

    pub(crate) fn status(&self) -> Option<&BudgetStatus> {
        self.status.as_ref()
    }

    /// Fetch the user's config and derive the month's status. No config at
    /// all transitions to `NeedsSetup`; a fetch failure is surfaced and the
    /// state is left where it was, never mistaken for "no config".
    pub(crate) fn load(
        &mut self,
        budgets: &dyn BudgetStore,
        entries: &dyn EntryStore,
        user_id: &str,
        today: NaiveDate,
    ) -> Result<(), FlowError> {
        self.busy = true;
        let result = self.reload(budgets, entries, user_id, today);
        self.busy = false;
        self.record(&result);
        result
    }

    /// Validate and persist a new monthly limit, then reload so the derived
    /// status reflects the write (read-after-write), landing in `Active`.
    ///
    /// The save path always writes the default alert threshold: the upsert
    /// is a full replace and this flow only exposes the limit.
    pub(crate) fn save(
        &mut self,
        budgets: &dyn BudgetStore,
        entries: &dyn EntryStore,
        user_id: &str,
        limit_input: &str,
        today: NaiveDate,
    ) -> Result<(), FlowError> {
        self.busy = true;
        let result = parse_limit(limit_input).and_then(|limit| {
            budgets
                .upsert(&BudgetConfig::new(user_id.to_string(), limit))
                .map_err(FlowError::from)
                .and_then(|()| self.reload(budgets, entries, user_id, today))
        });
        self.busy = false;
        self.record(&result);
        result
    }

    pub(crate) fn begin_edit(&mut self) {
        if self.state == FlowState::Active {
            self.state = FlowState::Editing;
        }
    }

    pub(crate) fn cancel_edit(&mut self) {
        if self.state == FlowState::Editing {
            self.state = FlowState::Active;
        }
    }

    fn reload(
        &mut self,
        budgets: &dyn BudgetStore,
        entries: &dyn EntryStore,
        user_id: &str,
        today: NaiveDate,
    ) -> Result<(), FlowError> {
        let Some(config) = budgets.get(user_id)? else {
            self.config = None;
            self.status = None;
            self.state = FlowState::NeedsSetup;
            return Ok(());
        };

        let rows = entries.list_since(user_id, month_start(today))?;
        let month_spent = compute_month_spend(&rows, today);
        let status = evaluate(&config, month_spent)?;

        self.config = Some(config);
        self.status = Some(status);
        self.state = FlowState::Active;
        Ok(())
    }

    fn record(&mut self, result: &Result<(), FlowError>) {
        match result {
            Ok(()) => self.error = None,
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}

fn parse_limit(input: &str) -> Result<Decimal, FlowError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(FlowError::Validation("monthly limit is required".into()));
    }
    let limit = Decimal::from_str(trimmed)
        .map_err(|_| FlowError::Validation(format!("'{trimmed}' is not a number")))?;
    if limit <= Decimal::ZERO {
        return Err(FlowError::Validation(
            "monthly limit must be positive".into(),
        ));
    }
    Ok(limit)
}
