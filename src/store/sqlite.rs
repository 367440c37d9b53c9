use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use super::schema;
use super::{BudgetStore, EntryStore, StoreError};
use crate::models::{BudgetConfig, Entry};

const DATE_FMT: &str = "%Y-%m-%d";

/// Local SQLite store implementing both collaborator traits. Amounts are
/// stored as TEXT so Decimal round-trips without float drift.
pub(crate) struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .map_err(|e| StoreError::Unavailable(format!("{}: {e}", path.display())))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut store = Self { conn };
        store.migrate().context("Database migration failed")?;
        Ok(store)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    fn query_entries(&self, sql: &str, user_id: &str, since: Option<String>) -> Result<Vec<Entry>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let map_row = |row: &rusqlite::Row<'_>| {
            let spent: String = row.get(2)?;
            let pulled: String = row.get(3)?;
            let date: String = row.get(6)?;
            Ok(Entry {
                id: Some(row.get(0)?),
                user_id: row.get(1)?,
                money_spent_in: Decimal::from_str(&spent).unwrap_or_default(),
                money_pulled_out: Decimal::from_str(&pulled).unwrap_or_default(),
                game_type: row.get(4)?,
                notes: row.get(5)?,
                entry_date: NaiveDate::parse_from_str(&date, DATE_FMT).unwrap_or_default(),
                created_at: row.get(7)?,
            })
        };

        let rows = match since {
            Some(boundary) => stmt
                .query_map(params![user_id, boundary], map_row)
                .map_err(|e| StoreError::Query(e.to_string()))?
                .collect::<std::result::Result<Vec<_>, _>>(),
            None => stmt
                .query_map(params![user_id], map_row)
                .map_err(|e| StoreError::Query(e.to_string()))?
                .collect::<std::result::Result<Vec<_>, _>>(),
        };
        rows.map_err(|e| StoreError::Query(e.to_string()))
    }
}

const SELECT_ENTRY: &str = "SELECT id, user_id, money_spent_in, money_pulled_out, game_type, notes, entry_date, created_at
     FROM entries";

impl EntryStore for SqliteStore {
    fn list_since(&self, user_id: &str, since: NaiveDate) -> Result<Vec<Entry>, StoreError> {
        let sql = format!(
            "{SELECT_ENTRY} WHERE user_id = ?1 AND entry_date >= ?2 ORDER BY entry_date DESC, id DESC"
        );
        self.query_entries(&sql, user_id, Some(since.format(DATE_FMT).to_string()))
    }

    fn list_all(&self, user_id: &str) -> Result<Vec<Entry>, StoreError> {
        let sql = format!("{SELECT_ENTRY} WHERE user_id = ?1 ORDER BY entry_date DESC, id DESC");
        self.query_entries(&sql, user_id, None)
    }

    fn create(&self, entry: &Entry) -> Result<Entry, StoreError> {
        self.conn
            .execute(
                "INSERT INTO entries (user_id, money_spent_in, money_pulled_out, game_type, notes, entry_date, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    entry.user_id,
                    entry.money_spent_in.to_string(),
                    entry.money_pulled_out.to_string(),
                    entry.game_type,
                    entry.notes,
                    entry.entry_date.format(DATE_FMT).to_string(),
                    entry.created_at,
                ],
            )
            .map_err(|e| StoreError::Write(e.to_string()))?;

        let mut stored = entry.clone();
        stored.id = Some(self.conn.last_insert_rowid());
        Ok(stored)
    }

    fn update(&self, id: i64, user_id: &str, entry: &Entry) -> Result<(), StoreError> {
        self.conn
            .execute(
                "UPDATE entries
                 SET money_spent_in = ?1, money_pulled_out = ?2, game_type = ?3, notes = ?4, entry_date = ?5
                 WHERE id = ?6 AND user_id = ?7",
                params![
                    entry.money_spent_in.to_string(),
                    entry.money_pulled_out.to_string(),
                    entry.game_type,
                    entry.notes,
                    entry.entry_date.format(DATE_FMT).to_string(),
                    id,
                    user_id,
                ],
            )
            .map_err(|e| StoreError::Write(e.to_string()))?;
        Ok(())
    }

    fn delete(&self, id: i64, user_id: &str) -> Result<(), StoreError> {
        self.conn
            .execute(
                "DELETE FROM entries WHERE id = ?1 AND user_id = ?2",
                params![id, user_id],
            )
            .map_err(|e| StoreError::Write(e.to_string()))?;
        Ok(())
    }
}

impl BudgetStore for SqliteStore {
    fn get(&self, user_id: &str) -> Result<Option<BudgetConfig>, StoreError> {
        let result = self.conn.query_row(
            "SELECT user_id, monthly_limit, alert_threshold FROM budgets WHERE user_id = ?1",
            params![user_id],
            |row| {
                let limit: String = row.get(1)?;
                let threshold: String = row.get(2)?;
                Ok(BudgetConfig {
                    user_id: row.get(0)?,
                    monthly_limit: Decimal::from_str(&limit).unwrap_or_default(),
                    alert_threshold: Decimal::from_str(&threshold).unwrap_or_default(),
                })
            },
        );
        match result {
            Ok(cfg) => Ok(Some(cfg)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StoreError::Query(e.to_string())),
        }
    }

    fn upsert(&self, config: &BudgetConfig) -> Result<(), StoreError> {
        self.conn
            .execute(
                "INSERT INTO budgets (user_id, monthly_limit, alert_threshold)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(user_id) DO UPDATE SET monthly_limit = ?2, alert_threshold = ?3",
                params![
                    config.user_id,
                    config.monthly_limit.to_string(),
                    config.alert_threshold.to_string(),
                ],
            )
            .map_err(|e| StoreError::Write(e.to_string()))?;
        Ok(())
    }
}
