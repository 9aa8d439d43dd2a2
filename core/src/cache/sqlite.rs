//! `SQLite`-backed response cache.
//!
//! Uses a single `Mutex<Connection>`. The table layout is
//! `responses(key, json, expire)` with `expire` stored as `YYYY-MM-DD`, so
//! databases written by earlier clients open unchanged.

use std::path::Path;

use chrono::{Days, Local, NaiveDate};
use parking_lot::{Mutex, MutexGuard};
use rusqlite::{Connection, OptionalExtension};
use serde_json::Value;
use tracing::{info, trace};

use super::CacheStore;
use crate::error::CacheError;

/// File name used when the caller has no preference.
pub const DEFAULT_DB_NAME: &str = "metron_cache.db";

const EXPIRE_FMT: &str = "%Y-%m-%d";

/// Latest stamp that still formats as four-digit `YYYY-MM-DD`. Later dates
/// gain a sign and would sort before today in the string comparison.
const LAST_STAMP_DATE: (i32, u32, u32) = (9999, 12, 31);

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS responses (key, json, expire)";

/// Persistent response cache with optional day-based expiration.
///
/// With `expire_days = Some(n)` a row stored today is removed by the sweep
/// that runs when a cache is opened more than `n` days later. With `None`
/// rows never expire.
pub struct SqliteCache {
    conn: Mutex<Connection>,
    expire_days: Option<u32>,
    today: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl SqliteCache {
    /// Open or create a cache database at `path` and sweep expired rows.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Sqlite`] if the database can't be opened or
    /// initialized.
    pub fn open(path: impl AsRef<Path>, expire_days: Option<u32>) -> Result<Self, CacheError> {
        Self::open_with_clock(path, expire_days, local_today)
    }

    /// Like [`SqliteCache::open`], with `today` supplying the current date
    /// for expiration stamps and the sweep.
    pub fn open_with_clock(
        path: impl AsRef<Path>,
        expire_days: Option<u32>,
        today: fn() -> NaiveDate,
    ) -> Result<Self, CacheError> {
        let conn = Connection::open(path)?;
        Self::init(conn, expire_days, today)
    }

    /// Create an in-memory cache (for tests and one-shot programs).
    pub fn in_memory(expire_days: Option<u32>) -> Result<Self, CacheError> {
        Self::init(Connection::open_in_memory()?, expire_days, local_today)
    }

    fn init(
        conn: Connection,
        expire_days: Option<u32>,
        today: fn() -> NaiveDate,
    ) -> Result<Self, CacheError> {
        conn.execute(CREATE_TABLE, [])?;
        let cache = Self {
            conn: Mutex::new(conn),
            expire_days,
            today,
        };
        cache.cleanup()?;
        Ok(cache)
    }

    fn lock_conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock()
    }

    /// Delete rows whose expiration date is before today. Does nothing when
    /// no expiration policy is configured. Returns the number of rows
    /// removed.
    pub fn cleanup(&self) -> Result<usize, CacheError> {
        if self.expire_days.is_none() {
            return Ok(0);
        }
        let today = (self.today)().format(EXPIRE_FMT).to_string();
        let removed = self
            .lock_conn()
            .execute("DELETE FROM responses WHERE expire < ?1", [&today])?;
        if removed > 0 {
            info!(removed, "expired cache entries removed");
        }
        Ok(removed)
    }

    /// Number of stored rows.
    pub fn len(&self) -> Result<usize, CacheError> {
        let count: i64 = self
            .lock_conn()
            .query_row("SELECT COUNT(*) FROM responses", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    pub fn is_empty(&self) -> Result<bool, CacheError> {
        Ok(self.len()? == 0)
    }

    /// Expiration stamp for a row written now.
    fn expire_stamp(&self) -> String {
        let today = (self.today)();
        let (year, month, day) = LAST_STAMP_DATE;
        let last = NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MAX);
        let date = match self.expire_days {
            Some(days) => today
                .checked_add_days(Days::new(u64::from(days)))
                .unwrap_or(last),
            None => today,
        };
        date.min(last).format(EXPIRE_FMT).to_string()
    }
}

impl CacheStore for SqliteCache {
    fn get(&self, key: &str) -> Result<Option<Value>, CacheError> {
        // Databases from older clients may hold duplicate keys; the newest
        // row wins.
        let raw: Option<String> = self
            .lock_conn()
            .query_row(
                "SELECT json FROM responses WHERE key = ?1 ORDER BY rowid DESC LIMIT 1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        raw.map(|text| serde_json::from_str(&text))
            .transpose()
            .map_err(CacheError::from)
    }

    fn store(&self, key: &str, value: &Value) -> Result<(), CacheError> {
        let json = serde_json::to_string(value)?;
        let expire = self.expire_stamp();
        let mut conn = self.lock_conn();
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM responses WHERE key = ?1", [key])?;
        tx.execute(
            "INSERT INTO responses (key, json, expire) VALUES (?1, ?2, ?3)",
            rusqlite::params![key, json, expire],
        )?;
        tx.commit()?;
        trace!(key, expire = %expire, "cached response");
        Ok(())
    }
}
