mod budget;
mod entry;

pub use budget::{BudgetConfig, DEFAULT_ALERT_THRESHOLD};
pub use entry::{coerce_amount, Entry};
