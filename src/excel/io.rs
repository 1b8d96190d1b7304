use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use crate::error::Result;

/// Converts a calamine `Data` cell to a String.
/// Integral floats lose their fractional part so `1.0` reads as `"1"`.
pub fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if (f.floor() - f).abs() < f64::EPSILON {
                format!("{}", *f as i64)
            } else {
                format!("{}", f)
            }
        }
        Data::Int(i) => format!("{}", i),
        Data::Bool(b) => format!("{}", b),
        Data::Empty => String::new(),
        Data::Error(_) => String::new(),
        Data::DateTime(s) => s.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Converts a calamine range into a grid anchored at A1.
///
/// calamine drops leading empty rows and columns; they are restored here so
/// row indices match what a user sees in the spreadsheet.
pub fn range_to_rows(range: &Range<Data>) -> Vec<Vec<String>> {
    let (row_off, col_off) = match range.start() {
        Some((r, c)) => (r as usize, c as usize),
        None => return Vec::new(),
    };

    let mut rows: Vec<Vec<String>> = vec![Vec::new(); row_off];
    for r in range.rows() {
        let mut row_vec: Vec<String> = vec![String::new(); col_off];
        row_vec.extend(r.iter().map(cell_to_string));
        rows.push(row_vec);
    }
    rows
}

/// Ordered collection of named sheets whose cells can be read as text.
pub trait SheetSource {
    fn sheet_names(&self) -> Vec<String>;

    /// All rows of `sheet`, anchored at the first spreadsheet row. Rows may be
    /// ragged; a missing cell reads as blank.
    fn read_rows(&mut self, sheet: &str) -> Result<Vec<Vec<String>>>;
}

/// Workbook opened through calamine (xlsx, xlsm, xlsb, xls, ods).
pub struct ExcelWorkbook<RS> {
    sheets: Sheets<RS>,
}

impl ExcelWorkbook<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let sheets = open_workbook_auto(path)?;
        Ok(ExcelWorkbook { sheets })
    }
}

impl ExcelWorkbook<Cursor<Vec<u8>>> {
    /// Opens an uploaded workbook held in memory.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let sheets = open_workbook_auto_from_rs(Cursor::new(bytes))?;
        Ok(ExcelWorkbook { sheets })
    }
}

impl<RS: Read + Seek> SheetSource for ExcelWorkbook<RS> {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names().to_owned()
    }

    fn read_rows(&mut self, sheet: &str) -> Result<Vec<Vec<String>>> {
        let range = self.sheets.worksheet_range(sheet)?;
        Ok(range_to_rows(&range))
    }
}

/// In-memory workbook, used by callers that already hold cell text.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    sheets: Vec<(String, Vec<Vec<String>>)>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        MemoryWorkbook { sheets: Vec::new() }
    }

    pub fn with_sheet<S, R, C>(mut self, name: S, rows: R) -> Self
    where
        S: Into<String>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|r| {
                r.into_iter()
                    .map(|c| Into::<String>::into(c).trim().to_string())
                    .collect()
            })
            .collect();
        self.sheets.push((name.into(), rows));
        self
    }
}

impl SheetSource for MemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(n, _)| n.clone()).collect()
    }

    fn read_rows(&mut self, sheet: &str) -> Result<Vec<Vec<String>>> {
        Ok(self
            .sheets
            .iter()
            .find(|(n, _)| n == sheet)
            .map(|(_, rows)| rows.clone())
            .unwrap_or_default())
    }
}

/// Cell text at `col`, blank when the row is shorter.
pub fn cell(row: &[String], col: usize) -> &str {
    row.get(col).map(|s| s.as_str()).unwrap_or("")
}

/// Propagates the last non-blank value rightward, emulating merged header cells.
/// Cells before the first non-blank value stay blank.
pub fn fill_forward(row: &[String]) -> Vec<String> {
    let mut last = String::new();
    row.iter()
        .map(|c| {
            let v = c.trim();
            if !v.is_empty() {
                last = v.to_string();
            }
            last.clone()
        })
        .collect()
}
