pub(crate) const CURRENT_VERSION: i32 = 1;

pub(crate) const SCHEMA_V1: &str = "
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    money_spent_in TEXT NOT NULL,
    money_pulled_out TEXT NOT NULL,
    game_type TEXT NOT NULL,
    notes TEXT NOT NULL DEFAULT '',
    entry_date TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_entries_user_date ON entries(user_id, entry_date);

CREATE TABLE IF NOT EXISTS budgets (
    user_id TEXT PRIMARY KEY,
    monthly_limit TEXT NOT NULL,
    alert_threshold TEXT NOT NULL
);
";

/// (from_version, migration sql) pairs applied in order on open.
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];
