//! Tipos de error de la lectura de horarios, la persistencia y el ranking.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, TimetableError>;

#[derive(Error, Debug)]
pub enum TimetableError {
    /// No sheet contains the teacher-name marker within the scanned header window.
    #[error("could not find a row containing '{marker}' in the first {scanned_rows} rows of any sheet")]
    SheetNotFound { marker: String, scanned_rows: usize },

    /// Reconstructed header labels do not line up with the data columns.
    /// The header resolver recovers from this by reading the header row verbatim.
    #[error("header has {labels} labels but the data region has {columns} columns")]
    HeaderDimensionMismatch { labels: usize, columns: usize },

    /// A header row was found but no column carries the teacher-name marker.
    #[error("found header row but could not identify '{marker}' column. Columns found: {columns:?}")]
    MissingTeacherColumn { marker: String, columns: Vec<String> },

    /// Row extraction or the commit of the new schedule failed; the previous
    /// schedule of the owner is left untouched.
    #[error("failed to parse timetable: {source}")]
    ParseFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("storage error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("teacher {0} does not exist for this owner")]
    UnknownTeacher(String),

    #[error("substitution {0} does not exist for this owner")]
    UnknownSubstitution(i64),

    #[error("period {0} is outside 1..=7")]
    InvalidPeriod(i64),

    #[error("'{0}' is not a known day")]
    InvalidDay(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl TimetableError {
    /// Wraps any failure raised while materializing or committing a schedule.
    pub fn parse_failed<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        TimetableError::ParseFailed { source: err.into() }
    }
}
