//! Módulo `excel`: lectura de horarios escolares desde libros de cálculo.
//!
//! Submódulos:
//! - `io`: acceso a hojas (calamine o memoria) y utilidades de celdas
//! - `locate`: búsqueda de la hoja y fila con el encabezado de docentes
//! - `header`: reconstrucción de etiquetas canónicas (tres disposiciones)
//! - `columns`: clasificación de columnas por rol
//! - `extract`: materialización de docentes y periodos
//! - `inspect`: diagnóstico de hojas y encabezados sin guardar nada

pub mod io;
pub mod locate;
pub mod header;
pub mod columns;
pub mod extract;
pub mod inspect;

pub use io::{ExcelWorkbook, MemoryWorkbook, SheetSource};
pub use locate::{locate_sheet, marker_row, LocatedSheet, DEFAULT_SCAN_ROWS};
pub use header::{resolve_header, HeaderLayout, ResolvedHeader};
pub use columns::{classify_columns, CanonicalColumn, ColumnMap, ColumnRole};
pub use extract::{extract_teachers, ParsedSlot, ParsedTeacher, Timetable, UNKNOWN_SUBJECT};
pub use inspect::{inspect_workbook, Inspection, ParsePreview, SheetScan};

use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::lexicon::TEACHER_MARKER;

/// Parses a timetable: locate sheet → resolve header → classify columns →
/// extract rows. Pure; nothing is persisted.
pub fn parse_timetable<W: SheetSource + ?Sized>(workbook: &mut W, scan_rows: usize) -> Result<Timetable> {
    let located = locate_sheet(workbook, TEACHER_MARKER, scan_rows)?;
    let header = resolve_header(&located.rows, located.header_row);
    let columns = classify_columns(&header)?;

    let data_rows = located.rows.get(header.data_start..).unwrap_or(&[]);
    let teachers = extract_teachers(&columns, data_rows);

    info!(
        sheet = %located.name,
        header_row = located.header_row,
        layout = ?header.layout,
        teachers = teachers.len(),
        "timetable parsed"
    );

    Ok(Timetable {
        sheet: located.name,
        header_row: located.header_row,
        layout: header.layout,
        columns: columns.columns,
        teachers,
    })
}

/// Opens `path` with calamine and parses it.
pub fn parse_timetable_file<P: AsRef<Path>>(path: P, scan_rows: usize) -> Result<Timetable> {
    let mut workbook = ExcelWorkbook::open(path)?;
    parse_timetable(&mut workbook, scan_rows)
}
