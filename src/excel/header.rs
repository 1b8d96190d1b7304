//! Reconstrucción de una etiqueta canónica por columna a partir de las tres
//! disposiciones de encabezado que aparecen en los horarios escolares:
//!
//! ```text
//! Flat            | اسم المدرس | المادة | الأحد 1 | الأحد 2 | ...
//!
//! Day above       |            |        | الأحد   |         | ...
//!                 | اسم المدرس | المادة | 1       | 2       | ...
//!
//! Day then period | اسم المدرس | المادة | الأحد   |         | ...
//!                 |            |        | ح1      | ح2      | ...
//! ```
//!
//! Las celdas de día combinadas llegan como un valor seguido de blancos y se
//! rellenan hacia la derecha antes de combinar etiquetas.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::error::{Result, TimetableError};
use crate::excel::io::{cell, fill_forward};
use crate::lexicon::{self, TEACHER_MARKER};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HeaderLayout {
    /// Day and period share one header row.
    Flat,
    /// Days sit on the row above the teacher header row.
    DayAbove,
    /// Days sit on the teacher header row, periods on the row below.
    DayThenPeriod,
}

/// A canonical column label. `base` is the text before duplicate
/// disambiguation and is what the classifier reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Label {
    pub text: String,
    pub base: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedHeader {
    pub layout: HeaderLayout,
    pub labels: Vec<Label>,
    /// First data row (absolute index).
    pub data_start: usize,
}

impl ResolvedHeader {
    pub fn texts(&self) -> Vec<String> {
        self.labels.iter().map(|l| l.text.clone()).collect()
    }
}

struct RawHeader {
    layout: HeaderLayout,
    labels: Vec<String>,
    data_start: usize,
}

/// `Ok(None)` means the layout does not apply to this sheet.
type LayoutMatcher = fn(&[Vec<String>], usize) -> Result<Option<RawHeader>>;

const SPLIT_LAYOUTS: [LayoutMatcher; 2] = [match_day_above, match_day_then_period];

/// Resolves the canonical header of a sheet whose teacher header row is
/// `header_row`. Split layouts are tried first; the flat reading is the
/// fallback and always succeeds.
pub fn resolve_header(rows: &[Vec<String>], header_row: usize) -> ResolvedHeader {
    let mut raw = None;
    for matcher in SPLIT_LAYOUTS {
        match matcher(rows, header_row) {
            Ok(Some(found)) => {
                raw = Some(found);
                break;
            }
            Ok(None) => continue,
            Err(e) => {
                warn!(error = %e, "split header does not fit the data, reading header row as-is");
                break;
            }
        }
    }
    let raw = raw.unwrap_or_else(|| match_flat(rows, header_row));

    debug!(layout = ?raw.layout, columns = raw.labels.len(), data_start = raw.data_start, "header resolved");
    ResolvedHeader {
        layout: raw.layout,
        labels: dedup_labels(raw.labels),
        data_start: raw.data_start,
    }
}

fn match_flat(rows: &[Vec<String>], header_row: usize) -> RawHeader {
    let labels = rows
        .get(header_row)
        .map(|r| r.iter().map(|c| c.trim().to_string()).collect())
        .unwrap_or_default();
    RawHeader { layout: HeaderLayout::Flat, labels, data_start: header_row + 1 }
}

fn match_day_above(rows: &[Vec<String>], header_row: usize) -> Result<Option<RawHeader>> {
    let header = match rows.get(header_row) {
        Some(r) => r,
        None => return Ok(None),
    };
    if header_row == 0 || lexicon::row_has_day(header) {
        return Ok(None);
    }
    let above = &rows[header_row - 1];
    if !lexicon::row_has_day(above) {
        return Ok(None);
    }

    let width = sheet_width(rows, header_row - 1);
    let days = fill_forward(&padded(above, width));
    let labels: Vec<String> = (0..width)
        .map(|i| format!("{} {}", cell(&days, i), cell(header, i).trim()).trim().to_string())
        .collect();

    Ok(Some(RawHeader { layout: HeaderLayout::DayAbove, labels, data_start: header_row + 1 }))
}

fn match_day_then_period(rows: &[Vec<String>], header_row: usize) -> Result<Option<RawHeader>> {
    let (day_row, period_row) = match (rows.get(header_row), rows.get(header_row + 1)) {
        (Some(d), Some(p)) => (d, p),
        _ => return Ok(None),
    };
    // A header whose day cells already carry periods is flat; the row below
    // is then the first data row.
    if !lexicon::row_has_day(day_row)
        || lexicon::row_has_slot_label(day_row)
        || !lexicon::row_has_period(period_row)
    {
        return Ok(None);
    }

    let width = sheet_width(rows, header_row);
    let days = fill_forward(&padded(day_row, width));
    let labels: Vec<String> = (0..width)
        .map(|i| {
            let day = cell(&days, i).trim();
            let period = cell(period_row, i).trim();
            if day.contains(TEACHER_MARKER) {
                day.to_string()
            } else if period.contains(TEACHER_MARKER) {
                period.to_string()
            } else {
                format!("{} {}", day, period).trim().to_string()
            }
        })
        .collect();

    let data_start = header_row + 2;
    check_dimensions(rows, data_start, labels.len())?;
    Ok(Some(RawHeader { layout: HeaderLayout::DayThenPeriod, labels, data_start }))
}

/// Number of physical columns from `first_row` down: the widest of the label
/// rows and the data rows. Ragged rows read as blank past their end.
fn sheet_width(rows: &[Vec<String>], first_row: usize) -> usize {
    rows.iter().skip(first_row).map(|r| r.len()).max().unwrap_or(0)
}

fn padded(row: &[String], width: usize) -> Vec<String> {
    (0..width.max(row.len())).map(|i| cell(row, i).to_string()).collect()
}

/// Labels must cover exactly the columns of the data region. Sheets without
/// data rows impose no constraint.
fn check_dimensions(rows: &[Vec<String>], data_start: usize, labels: usize) -> Result<()> {
    let columns = rows.iter().skip(data_start).map(|r| r.len()).max();
    match columns {
        Some(columns) if columns != labels => {
            Err(TimetableError::HeaderDimensionMismatch { labels, columns })
        }
        _ => Ok(()),
    }
}

/// Suffixes repeated labels with `.1`, `.2`, ... in encounter order. A suffix
/// already used by another label in the row is skipped, so every text is
/// unique.
fn dedup_labels(labels: Vec<String>) -> Vec<Label> {
    let mut used: HashSet<String> = labels.iter().cloned().collect();
    let mut seen: HashSet<String> = HashSet::new();
    let mut next: HashMap<String, usize> = HashMap::new();
    labels
        .into_iter()
        .map(|base| {
            let text = if seen.insert(base.clone()) {
                base.clone()
            } else {
                let n = next.entry(base.clone()).or_insert(0);
                loop {
                    *n += 1;
                    let candidate = format!("{}.{}", base, n);
                    if used.insert(candidate.clone()) {
                        break candidate;
                    }
                }
            };
            Label { text, base }
        })
        .collect()
}
