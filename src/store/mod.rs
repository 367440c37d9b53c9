mod schema;
mod sqlite;

pub(crate) use sqlite::SqliteStore;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{BudgetConfig, Entry};

/// Typed failure surface for the storage collaborators. The core never sees
/// a backend-specific error type.
#[derive(Debug, Clone, Error)]
pub(crate) enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("query failed: {0}")]
    Query(String),
    #[error("write failed: {0}")]
    Write(String),
}

/// CRUD over dated session entries, scoped to an owning user.
pub(crate) trait EntryStore {
    /// Entries with `entry_date >= since`, newest first.
    fn list_since(&self, user_id: &str, since: NaiveDate) -> Result<Vec<Entry>, StoreError>;

    /// All of the user's entries, newest first.
    fn list_all(&self, user_id: &str) -> Result<Vec<Entry>, StoreError>;

    /// Insert a new entry; returns it with the storage-assigned id.
    fn create(&self, entry: &Entry) -> Result<Entry, StoreError>;

    /// Replace the stored fields of an existing entry. The user id scopes
    /// the write; a mismatched owner touches nothing.
    fn update(&self, id: i64, user_id: &str, entry: &Entry) -> Result<(), StoreError>;

    fn delete(&self, id: i64, user_id: &str) -> Result<(), StoreError>;
}

/// Single budget configuration row per user, replaced wholesale on save.
pub(crate) trait BudgetStore {
    fn get(&self, user_id: &str) -> Result<Option<BudgetConfig>, StoreError>;

    /// Create-or-replace keyed by `user_id`. Omitted fields do not survive:
    /// the caller supplies the complete row every time.
    fn upsert(&self, config: &BudgetConfig) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests;
