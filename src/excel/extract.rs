use serde::Serialize;
use tracing::debug;

use crate::excel::columns::{CanonicalColumn, ColumnMap};
use crate::excel::header::HeaderLayout;
use crate::excel::io::cell;
use crate::models::Day;

/// Subject used when the subject column is missing or blank.
pub const UNKNOWN_SUBJECT: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParsedSlot {
    pub day: Day,
    pub period: u8,
    pub has_lesson: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedTeacher {
    pub name: String,
    pub subject: String,
    pub total_periods: u32,
    pub slots: Vec<ParsedSlot>,
}

impl ParsedTeacher {
    pub fn weekly_lessons(&self) -> usize {
        self.slots.iter().filter(|s| s.has_lesson).count()
    }
}

/// Result of one parse run, before it is committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timetable {
    pub sheet: String,
    pub header_row: usize,
    pub layout: HeaderLayout,
    pub columns: Vec<CanonicalColumn>,
    pub teachers: Vec<ParsedTeacher>,
}

/// `"24"` → 24; anything that is not purely ASCII digits → 0.
pub fn parse_total_periods(text: &str) -> u32 {
    let t = text.trim();
    if !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit()) {
        t.parse().unwrap_or(0)
    } else {
        0
    }
}

/// Materializes one teacher per data row with a non-blank name cell, and one
/// slot per slot column for each of them, blank cells included.
pub fn extract_teachers(columns: &ColumnMap, data_rows: &[Vec<String>]) -> Vec<ParsedTeacher> {
    let name_col = columns.teacher().index;
    let subject_col = columns.subject().map(|c| c.index);
    let count_col = columns.period_count().map(|c| c.index);
    let slot_cols: Vec<(usize, Day, u8)> = columns
        .slots()
        .filter_map(|c| c.slot().map(|(d, p)| (c.index, d, p)))
        .collect();

    let mut teachers = Vec::new();
    for row in data_rows {
        let name = cell(row, name_col).trim();
        if name.is_empty() {
            continue;
        }

        let subject = subject_col
            .map(|i| cell(row, i).trim())
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_SUBJECT);
        let total_periods = count_col.map(|i| parse_total_periods(cell(row, i))).unwrap_or(0);

        let slots = slot_cols
            .iter()
            .map(|&(i, day, period)| ParsedSlot {
                day,
                period,
                has_lesson: !cell(row, i).trim().is_empty(),
            })
            .collect();

        teachers.push(ParsedTeacher {
            name: name.to_string(),
            subject: subject.to_string(),
            total_periods,
            slots,
        });
    }

    debug!(teachers = teachers.len(), slot_columns = slot_cols.len(), "rows extracted");
    teachers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::excel::columns::classify_columns;
    use crate::excel::header::resolve_header;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_parse_total_periods() {
        assert_eq!(parse_total_periods("18"), 18);
        assert_eq!(parse_total_periods(" 7 "), 7);
        assert_eq!(parse_total_periods("18.5"), 0);
        assert_eq!(parse_total_periods("-3"), 0);
        assert_eq!(parse_total_periods("عشرون"), 0);
        assert_eq!(parse_total_periods(""), 0);
    }

    #[test]
    fn test_blank_rows_skipped_and_every_slot_emitted() {
        let rows = grid(&[
            &["اسم المدرس", "المادة", "عدد الحصص", "الأحد 1", "الأحد 2", "فرصة"],
            &["  سارة ", "علوم", "12", "أ/1", "", "x"],
            &["   ", "رياضيات", "9", "x", "x", ""],
            &["عمر", "", "كثير", "", " ", ""],
        ]);
        let header = resolve_header(&rows, 0);
        let map = classify_columns(&header).unwrap();
        let teachers = extract_teachers(&map, &rows[header.data_start..]);

        assert_eq!(teachers.len(), 2);
        let sara = &teachers[0];
        assert_eq!(sara.name, "سارة");
        assert_eq!(sara.subject, "علوم");
        assert_eq!(sara.total_periods, 12);
        assert_eq!(
            sara.slots,
            vec![
                ParsedSlot { day: Day::Sunday, period: 1, has_lesson: true },
                ParsedSlot { day: Day::Sunday, period: 2, has_lesson: false },
            ]
        );

        let omar = &teachers[1];
        assert_eq!(omar.subject, UNKNOWN_SUBJECT);
        assert_eq!(omar.total_periods, 0);
        assert_eq!(omar.slots.len(), 2);
        assert_eq!(omar.weekly_lessons(), 0);
    }

    #[test]
    fn test_short_rows_read_as_blank() {
        let rows = grid(&[&["اسم المدرس", "الخميس 7"], &["ليلى"]]);
        let header = resolve_header(&rows, 0);
        let map = classify_columns(&header).unwrap();
        let teachers = extract_teachers(&map, &rows[1..]);
        assert_eq!(
            teachers[0].slots,
            vec![ParsedSlot { day: Day::Thursday, period: 7, has_lesson: false }]
        );
    }
}
