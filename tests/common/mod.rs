// Utilidades compartidas por los tests de integración: genera libros .xlsx
// reales con umya-spreadsheet dentro de un directorio temporal.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// One worksheet of a fixture workbook. Empty strings are left unwritten.
pub struct FixtureSheet<'a> {
    pub name: &'a str,
    pub rows: Vec<Vec<&'a str>>,
    pub merges: Vec<&'a str>,
}

impl<'a> FixtureSheet<'a> {
    pub fn new(name: &'a str, rows: Vec<Vec<&'a str>>) -> Self {
        FixtureSheet { name, rows, merges: Vec::new() }
    }

    pub fn merged(mut self, ranges: &[&'a str]) -> Self {
        self.merges.extend_from_slice(ranges);
        self
    }
}

/// Writes `sheets` to `dir/file`. The default "Sheet1" is kept as a cover
/// sheet in front of them.
pub fn write_xlsx(dir: &Path, file: &str, sheets: &[FixtureSheet<'_>]) -> PathBuf {
    let mut book = umya_spreadsheet::new_file();
    book.get_sheet_by_name_mut("Sheet1")
        .expect("default sheet")
        .get_cell_mut((1, 1))
        .set_value("ملاحظات");

    for sheet in sheets {
        let ws = book.new_sheet(sheet.name).expect("new sheet");
        for (r, row) in sheet.rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                ws.get_cell_mut(((c + 1) as u32, (r + 1) as u32)).set_value(*value);
            }
        }
        for range in &sheet.merges {
            ws.add_merge_cells(*range);
        }
    }

    let path = dir.join(file);
    umya_spreadsheet::writer::xlsx::write(&book, &path).expect("write xlsx");
    path
}

pub fn tempdir() -> TempDir {
    tempfile::tempdir().expect("tempdir")
}

/// أحمد and سارة over Sunday/Monday periods 1-2, with a blank row between
/// them. Shared by the layout tests.
pub const AHMED: [&str; 7] = ["أحمد", "رياضيات", "2", "x", "", "", "x"];
pub const BLANK: [&str; 7] = ["", "", "", "", "", "", ""];
pub const SARA: [&str; 7] = ["سارة", "", "abc", "", "x", "x", ""];

pub fn flat_sheet() -> FixtureSheet<'static> {
    FixtureSheet::new(
        "الجدول",
        vec![
            vec!["اسم المدرس", "المادة", "عدد الحصص", "الأحد 1", "الأحد 2", "الإثنين 1", "الإثنين 2"],
            AHMED.to_vec(),
            BLANK.to_vec(),
            SARA.to_vec(),
        ],
    )
}

pub fn day_above_sheet() -> FixtureSheet<'static> {
    FixtureSheet::new(
        "الجدول",
        vec![
            vec!["جدول الحصص الأسبوعي"],
            vec!["", "", "", "الأحد", "", "الاثنين", ""],
            vec!["اسم المدرس", "المادة", "عدد الحصص", "1", "2", "1", "2"],
            AHMED.to_vec(),
            BLANK.to_vec(),
            SARA.to_vec(),
        ],
    )
    .merged(&["D2:E2", "F2:G2"])
}

pub fn day_then_period_sheet() -> FixtureSheet<'static> {
    FixtureSheet::new(
        "الجدول",
        vec![
            vec!["اسم المدرس", "المادة", "عدد الحصص", "الاحد", "", "الإثنين", ""],
            vec!["", "", "", "1", "2", "1", "2"],
            AHMED.to_vec(),
            BLANK.to_vec(),
            SARA.to_vec(),
        ],
    )
    .merged(&["D1:E1", "F1:G1"])
}
