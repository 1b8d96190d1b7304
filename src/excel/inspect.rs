// Diagnóstico de libros: qué hoja tiene el marcador y cómo se lee su encabezado

use serde::Serialize;

use crate::error::Result;
use crate::excel::columns::CanonicalColumn;
use crate::excel::header::HeaderLayout;
use crate::excel::io::SheetSource;
use crate::excel::locate::marker_row;
use crate::excel::parse_timetable;
use crate::lexicon::TEACHER_MARKER;

/// Marker scan of one sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetScan {
    pub name: String,
    pub has_marker: bool,
    pub header_row: Option<usize>,
    /// Trimmed cells of the header row, empty when the marker is absent.
    pub header: Vec<String>,
    /// Trimmed cells of the row right below the header row.
    pub row_below: Vec<String>,
}

/// How the parser would read the workbook, without committing anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsePreview {
    pub sheet: String,
    pub header_row: usize,
    pub layout: HeaderLayout,
    pub columns: Vec<CanonicalColumn>,
    pub teachers: usize,
    pub slots: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inspection {
    pub sheets: Vec<SheetScan>,
    pub preview: Option<ParsePreview>,
    /// Parse failure message when `preview` is `None`.
    pub error: Option<String>,
}

fn trimmed(row: Option<&Vec<String>>) -> Vec<String> {
    row.map(|r| r.iter().map(|c| c.trim().to_string()).collect()).unwrap_or_default()
}

/// Scans every sheet for the teacher marker, then runs the parser.
///
/// Parse errors are reported inside the inspection. Only read failures of the
/// workbook itself are returned as `Err`.
pub fn inspect_workbook<W: SheetSource + ?Sized>(workbook: &mut W, scan_rows: usize) -> Result<Inspection> {
    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let rows = workbook.read_rows(&name)?;
        let header_row = marker_row(&rows, TEACHER_MARKER, scan_rows);
        let (header, row_below) = match header_row {
            Some(i) => (trimmed(rows.get(i)), trimmed(rows.get(i + 1))),
            None => (Vec::new(), Vec::new()),
        };
        sheets.push(SheetScan { name, has_marker: header_row.is_some(), header_row, header, row_below });
    }

    let (preview, error) = match parse_timetable(workbook, scan_rows) {
        Ok(tt) => {
            let slots = tt.teachers.iter().map(|t| t.slots.len()).sum();
            let preview = ParsePreview {
                sheet: tt.sheet,
                header_row: tt.header_row,
                layout: tt.layout,
                columns: tt.columns,
                teachers: tt.teachers.len(),
                slots,
            };
            (Some(preview), None)
        }
        Err(e) => (None, Some(e.to_string())),
    };

    Ok(Inspection { sheets, preview, error })
}
