use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::Connection;
use std::fs;
use tracing::debug;

use crate::config::DatabaseLocation;
use crate::error::Result;
use crate::models::Day;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS teachers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        owner_id INTEGER NOT NULL,
        name TEXT NOT NULL,
        subject TEXT NOT NULL,
        total_periods INTEGER NOT NULL DEFAULT 0
    );
    CREATE INDEX IF NOT EXISTS idx_teachers_owner ON teachers(owner_id);

    CREATE TABLE IF NOT EXISTS slots (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        teacher_id INTEGER NOT NULL REFERENCES teachers(id) ON DELETE CASCADE,
        day TEXT NOT NULL,
        period INTEGER NOT NULL,
        has_lesson INTEGER NOT NULL DEFAULT 0,
        UNIQUE (teacher_id, day, period)
    );
    CREATE INDEX IF NOT EXISTS idx_slots_day_period ON slots(day, period);

    CREATE TABLE IF NOT EXISTS substitutions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        owner_id INTEGER NOT NULL,
        original_teacher_id INTEGER REFERENCES teachers(id) ON DELETE SET NULL,
        original_name TEXT NOT NULL,
        covering_teacher_id INTEGER REFERENCES teachers(id) ON DELETE SET NULL,
        covering_name TEXT NOT NULL,
        day TEXT NOT NULL,
        period INTEGER NOT NULL,
        created_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_substitutions_owner ON substitutions(owner_id);
";

/// Opens the database and makes sure the schema exists.
pub fn open_connection(location: &DatabaseLocation) -> Result<Connection> {
    let conn = match location {
        DatabaseLocation::Memory => Connection::open_in_memory()?,
        DatabaseLocation::File(path) => {
            if let Some(dir) = path.parent() {
                if !dir.as_os_str().is_empty() && !dir.exists() {
                    fs::create_dir_all(dir)?;
                }
            }
            Connection::open(path)?
        }
    };
    init_schema(&conn)?;
    debug!(?location, "timetable database ready");
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

impl ToSql for Day {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.key()))
    }
}

impl FromSql for Day {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        Day::from_key(s).ok_or_else(|| FromSqlError::Other(format!("unknown day '{}'", s).into()))
    }
}
