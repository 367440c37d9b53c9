use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// One recorded gambling session: money put in, money taken back out,
/// what was played, and when.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: Option<i64>,
    pub user_id: String,
    pub money_spent_in: Decimal,
    pub money_pulled_out: Decimal,
    pub game_type: String,
    pub notes: String,
    pub entry_date: NaiveDate,
    pub created_at: String,
}

impl Entry {
    pub fn new(
        user_id: String,
        money_spent_in: Decimal,
        money_pulled_out: Decimal,
        game_type: String,
        notes: String,
        entry_date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            user_id,
            // Amounts are never negative; clamp rather than reject.
            money_spent_in: money_spent_in.max(Decimal::ZERO),
            money_pulled_out: money_pulled_out.max(Decimal::ZERO),
            game_type,
            notes,
            entry_date,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Net result of the session: what came back out minus what went in.
    pub fn net(&self) -> Decimal {
        self.money_pulled_out - self.money_spent_in
    }

    pub fn is_win(&self) -> bool {
        self.net() > Decimal::ZERO
    }

    pub fn is_loss(&self) -> bool {
        self.net() < Decimal::ZERO
    }
}

/// Coerce raw amount input to a usable value: absent or non-numeric text
/// becomes zero, negatives are clamped to zero. Never fails.
pub fn coerce_amount(input: &str) -> Decimal {
    Decimal::from_str(input.trim()).map_or(Decimal::ZERO, |d| d.max(Decimal::ZERO))
}
