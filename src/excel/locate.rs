use tracing::debug;

use crate::error::{Result, TimetableError};
use crate::excel::io::SheetSource;

/// Rows scanned per sheet when looking for the header row.
pub const DEFAULT_SCAN_ROWS: usize = 20;

/// Sheet that holds the timetable and the rows read from it.
#[derive(Debug, Clone)]
pub struct LocatedSheet {
    pub name: String,
    pub header_row: usize,
    pub rows: Vec<Vec<String>>,
}

/// First row among the leading `scan_rows` that has a cell containing `marker`.
pub fn marker_row(rows: &[Vec<String>], marker: &str, scan_rows: usize) -> Option<usize> {
    rows.iter()
        .take(scan_rows)
        .position(|row| row.iter().any(|c| c.trim().contains(marker)))
}

/// Finds the first sheet (in workbook order) whose first `scan_rows` rows
/// contain a cell with `marker`. Returns on the first hit.
pub fn locate_sheet<W: SheetSource + ?Sized>(
    workbook: &mut W,
    marker: &str,
    scan_rows: usize,
) -> Result<LocatedSheet> {
    for name in workbook.sheet_names() {
        let rows = workbook.read_rows(&name)?;
        match marker_row(&rows, marker, scan_rows) {
            Some(header_row) => {
                debug!(sheet = %name, header_row, "found teacher header row");
                return Ok(LocatedSheet { name, header_row, rows });
            }
            None => debug!(sheet = %name, "no teacher header in scanned rows"),
        }
    }

    Err(TimetableError::SheetNotFound {
        marker: marker.to_string(),
        scanned_rows: scan_rows,
    })
}
