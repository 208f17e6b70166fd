//! Main store implementation.

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use time::OffsetDateTime;
use tracing::{debug, info};

use geolog_types::LocationRecord;

use crate::error::{Error, Result};
use crate::models::StoredLocation;
use crate::schema;

/// SQLite-based append-only store for location records.
///
/// One `Store` owns one connection. Every operation is a single statement
/// and therefore atomic on its own; there is no update or delete.
pub struct Store {
    conn: Connection,
    path: Option<PathBuf>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").field("path", &self.path).finish()
    }
}

impl Store {
    /// Open or create a database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| Error::CreateDirectory {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        info!("Opening database at {}", path.display());
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;

        let store = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        store.initialize()?;
        Ok(store)
    }

    /// Open the default database location.
    pub fn open_default() -> Result<Self> {
        Self::open(crate::default_db_path())
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
            path: None,
        };
        store.initialize()?;
        Ok(store)
    }

    /// Path of the database file, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Create the schema if absent. Idempotent.
    pub fn initialize(&self) -> Result<()> {
        schema::initialize(&self.conn)
    }

    /// Append one location and return it with its assigned id.
    ///
    /// Engine rejections (disk full, corruption, NaN in a `NOT NULL` column)
    /// are returned as [`Error::Database`]; nothing is retried.
    pub fn append(&self, latitude: f64, longitude: f64) -> Result<LocationRecord> {
        self.conn.execute(
            "INSERT INTO locations (latitude, longitude) VALUES (?1, ?2)",
            rusqlite::params![latitude, longitude],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("Inserted location {} ({}, {})", id, latitude, longitude);

        Ok(LocationRecord {
            id,
            latitude,
            longitude,
        })
    }

    /// List every record, newest first.
    ///
    /// No pagination: the expected volume is small.
    pub fn list_all(&self) -> Result<Vec<LocationRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, latitude, longitude FROM locations ORDER BY id DESC")?;

        let records = stmt
            .query_map([], |row| {
                Ok(LocationRecord {
                    id: row.get(0)?,
                    latitude: row.get(1)?,
                    longitude: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!("Loaded {} locations", records.len());
        Ok(records)
    }

    /// List every record with its insertion time, newest first.
    pub fn list_stored(&self) -> Result<Vec<StoredLocation>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, latitude, longitude, CAST(strftime('%s', created_at) AS INTEGER)
             FROM locations ORDER BY id DESC",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, f64>(1)?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, Option<i64>>(3)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, latitude, longitude, created_at)| {
                let created_at = created_at
                    .ok_or_else(|| Error::InvalidTimestamp(format!("missing for row {}", id)))
                    .and_then(|ts| {
                        OffsetDateTime::from_unix_timestamp(ts)
                            .map_err(|e| Error::InvalidTimestamp(e.to_string()))
                    })?;
                Ok(StoredLocation {
                    id,
                    latitude,
                    longitude,
                    created_at,
                })
            })
            .collect()
    }

    /// Count stored records.
    pub fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM locations", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }
}
