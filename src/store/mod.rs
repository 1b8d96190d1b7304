//! Persistencia SQLite de docentes, periodos y suplencias.

pub mod db;
pub mod schedule;
pub mod substitutions;

use rusqlite::Connection;
use std::sync::{Mutex, MutexGuard};

use crate::config::{AppConfig, DatabaseLocation};
use crate::error::Result;

/// Owner-scoped schedule storage behind one SQLite connection.
pub struct ScheduleStore {
    conn: Mutex<Connection>,
}

impl std::fmt::Debug for ScheduleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ScheduleStore(..)")
    }
}

impl ScheduleStore {
    pub fn open(config: &AppConfig) -> Result<Self> {
        Self::open_location(&config.database)
    }

    pub fn open_location(location: &DatabaseLocation) -> Result<Self> {
        let conn = db::open_connection(location)?;
        Ok(ScheduleStore { conn: Mutex::new(conn) })
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::open_location(&DatabaseLocation::Memory)
    }

    /// A panic while holding the lock leaves any open transaction to roll back
    /// on drop, so the connection is still usable.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
