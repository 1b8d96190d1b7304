use std::env;
use std::path::PathBuf;

use crate::error::{Result, TimetableError};
use crate::excel::DEFAULT_SCAN_ROWS;

/// Default SQLite file when neither `TIMETABLE_DB_URL` nor `TIMETABLE_DB_PATH` is set.
pub const DEFAULT_DB_PATH: &str = "data/timetable.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    File(PathBuf),
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database: DatabaseLocation,
    /// Rows per sheet scanned for the teacher header.
    pub scan_rows: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database: DatabaseLocation::File(PathBuf::from(DEFAULT_DB_PATH)),
            scan_rows: DEFAULT_SCAN_ROWS,
        }
    }
}

// load .env if present
fn load_dotenv() {
    let _ = dotenv::dotenv();
}

impl AppConfig {
    /// Reads `.env` and the process environment.
    pub fn from_env() -> Result<Self> {
        load_dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    ///
    /// - `TIMETABLE_DB_URL`: `sqlite://path`, `file://path` or `:memory:`
    /// - `TIMETABLE_DB_PATH`: plain path, used when no URL is set
    /// - `TIMETABLE_SCAN_ROWS`: positive integer
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = AppConfig::default();

        if let Some(url) = lookup("TIMETABLE_DB_URL").filter(|s| !s.trim().is_empty()) {
            cfg.database = parse_db_url(url.trim())?;
        } else if let Some(p) = lookup("TIMETABLE_DB_PATH").filter(|s| !s.trim().is_empty()) {
            cfg.database = DatabaseLocation::File(PathBuf::from(p.trim()));
        }

        if let Some(raw) = lookup("TIMETABLE_SCAN_ROWS") {
            cfg.scan_rows = match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(TimetableError::Config(format!(
                        "TIMETABLE_SCAN_ROWS must be a positive integer, got '{}'",
                        raw
                    )));
                }
            };
        }

        Ok(cfg)
    }
}

fn parse_db_url(url: &str) -> Result<DatabaseLocation> {
    if url == ":memory:" || url == "sqlite://:memory:" {
        Ok(DatabaseLocation::Memory)
    } else if let Some(path) = url.strip_prefix("sqlite://") {
        Ok(DatabaseLocation::File(PathBuf::from(path)))
    } else if let Some(path) = url.strip_prefix("file://") {
        Ok(DatabaseLocation::File(PathBuf::from(path)))
    } else {
        Err(TimetableError::Config(format!("TIMETABLE_DB_URL uses unsupported scheme: {}", url)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.scan_rows, 20);
    }

    #[test]
    fn test_url_wins_over_path() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("TIMETABLE_DB_URL", "sqlite:///tmp/t.db"),
            ("TIMETABLE_DB_PATH", "ignored.db"),
        ]))
        .unwrap();
        assert_eq!(cfg.database, DatabaseLocation::File(PathBuf::from("/tmp/t.db")));

        let cfg = AppConfig::from_lookup(lookup(&[("TIMETABLE_DB_URL", ":memory:")])).unwrap();
        assert_eq!(cfg.database, DatabaseLocation::Memory);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(AppConfig::from_lookup(lookup(&[("TIMETABLE_DB_URL", "postgres://x")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("TIMETABLE_SCAN_ROWS", "0")])).is_err());
        let cfg = AppConfig::from_lookup(lookup(&[("TIMETABLE_SCAN_ROWS", " 30 ")])).unwrap();
        assert_eq!(cfg.scan_rows, 30);
    }
}
