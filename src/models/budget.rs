use rust_decimal::Decimal;

/// Percent of the monthly limit at which the near-limit warning kicks in.
pub const DEFAULT_ALERT_THRESHOLD: u32 = 80;

/// Per-user budget configuration. At most one row exists per user; saves go
/// through a full-replace upsert keyed by `user_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetConfig {
    pub user_id: String,
    pub monthly_limit: Decimal,
    /// Percentage (0-100) of the limit at which to warn.
    pub alert_threshold: Decimal,
}

impl BudgetConfig {
    /// Build a config with the default alert threshold. The setup flow only
    /// exposes the limit, so every save resets the threshold to the default.
    pub fn new(user_id: String, monthly_limit: Decimal) -> Self {
        Self {
            user_id,
            monthly_limit,
            alert_threshold: Decimal::from(DEFAULT_ALERT_THRESHOLD),
        }
    }
}
