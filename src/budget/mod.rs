mod flow;

pub(crate) use flow::{BudgetSetupFlow, FlowState};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{BudgetConfig, Entry};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum BudgetError {
    /// The configured monthly limit is zero or negative. This is a data
    /// error, not user input: the setup flow validates limits before they
    /// ever reach storage.
    #[error("invalid budget configuration: monthly limit must be positive, got {limit}")]
    InvalidConfiguration { limit: Decimal },
}

/// Threshold states in escalation order, so `Ord` matches severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum BudgetState {
    OnTrack,
    NearLimit,
    OverBudget,
}

impl BudgetState {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::OnTrack => "On Track",
            Self::NearLimit => "Approaching Limit",
            Self::OverBudget => "Over Budget",
        }
    }
}

/// Derived monthly budget position. Never persisted; recomputed from the
/// config and the aggregated spend after every mutating action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BudgetStatus {
    pub(crate) month_spent: Decimal,
    pub(crate) percent_used: Decimal,
    /// Limit minus spend. Deliberately not clamped: negative when over.
    pub(crate) remaining: Decimal,
    pub(crate) state: BudgetState,
}

impl BudgetStatus {
    /// How far past the limit the month is. Only meaningful when the state
    /// is `OverBudget`.
    pub(crate) fn overage(&self) -> Decimal {
        -self.remaining
    }
}

/// First day of the reference date's calendar month.
pub(crate) fn month_start(reference: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(reference.year(), reference.month(), 1).unwrap_or(reference)
}

/// Sum of `money_spent_in` over entries dated within the reference month.
/// Correct whether or not the caller already filtered by date.
pub(crate) fn compute_month_spend(entries: &[Entry], reference: NaiveDate) -> Decimal {
    let boundary = month_start(reference);
    entries
        .iter()
        .filter(|e| e.entry_date >= boundary)
        .map(|e| e.money_spent_in)
        .sum()
}

/// Same window over `money_pulled_out`, for the dashboard summary.
pub(crate) fn compute_month_returned(entries: &[Entry], reference: NaiveDate) -> Decimal {
    let boundary = month_start(reference);
    entries
        .iter()
        .filter(|e| e.entry_date >= boundary)
        .map(|e| e.money_pulled_out)
        .sum()
}

/// Combine a budget config with an aggregated spend figure.
///
/// States partition `[0, inf)` of percent-used with boundaries at the alert
/// threshold and 100. A threshold above 100 makes `NearLimit` unreachable,
/// which is accepted.
pub(crate) fn evaluate(
    config: &BudgetConfig,
    month_spent: Decimal,
) -> Result<BudgetStatus, BudgetError> {
    if config.monthly_limit <= Decimal::ZERO {
        return Err(BudgetError::InvalidConfiguration {
            limit: config.monthly_limit,
        });
    }

    let percent_used = month_spent / config.monthly_limit * Decimal::ONE_HUNDRED;
    let state = if percent_used >= Decimal::ONE_HUNDRED {
        BudgetState::OverBudget
    } else if percent_used >= config.alert_threshold {
        BudgetState::NearLimit
    } else {
        BudgetState::OnTrack
    };

    Ok(BudgetStatus {
        month_spent,
        percent_used,
        remaining: config.monthly_limit - month_spent,
        state,
    })
}

#[cfg(test)]
mod flow_tests;
