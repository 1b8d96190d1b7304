//! Léxico fijo para reconocer encabezados de horarios.
//!
//! Las coincidencias son por subcadena sobre el texto recortado de la celda.
//! Todos los tokens se comparan byte a byte salvo el marcador latino `break`,
//! que no distingue mayúsculas.

use crate::models::Day;

/// Header of the teacher-name column.
pub const TEACHER_MARKER: &str = "اسم المدرس";
/// Header of the subject column.
pub const SUBJECT_MARKER: &str = "المادة";
/// Header of the declared weekly period count column.
pub const PERIOD_COUNT_MARKER: &str = "عدد الحصص";
/// Break / recess column header.
pub const BREAK_MARKER: &str = "فرصة";
const BREAK_MARKER_LATIN: &str = "break";

/// Day spellings in lookup order. Some days have two accepted spellings
/// (with and without hamza).
pub const DAY_TOKENS: &[(&str, Day)] = &[
    ("الأحد", Day::Sunday),
    ("الاحد", Day::Sunday),
    ("الإثنين", Day::Monday),
    ("الاثنين", Day::Monday),
    ("الثلاثاء", Day::Tuesday),
    ("الأربعاء", Day::Wednesday),
    ("الاربعاء", Day::Wednesday),
    ("الخميس", Day::Thursday),
];

/// Lesson periods of a school day.
pub const PERIODS: std::ops::RangeInclusive<u8> = 1..=7;

/// Exact lookup of a day spelling.
pub fn day_for_token(token: &str) -> Option<Day> {
    DAY_TOKENS.iter().find(|(t, _)| *t == token).map(|(_, d)| *d)
}

/// First day (in `DAY_TOKENS` order) whose spelling occurs in `text`.
pub fn match_day(text: &str) -> Option<Day> {
    DAY_TOKENS
        .iter()
        .find(|(token, _)| text.contains(token))
        .map(|(_, d)| *d)
}

/// Lowest period digit occurring anywhere in `text`.
pub fn match_period(text: &str) -> Option<u8> {
    PERIODS.into_iter().find(|p| {
        let digit = char::from(b'0' + p);
        text.contains(digit)
    })
}

pub fn is_break(text: &str) -> bool {
    text.contains(BREAK_MARKER) || text.to_lowercase().contains(BREAK_MARKER_LATIN)
}

pub fn row_has_day(row: &[String]) -> bool {
    row.iter().any(|c| match_day(c.trim()).is_some())
}

/// True when some cell contains a period digit, e.g. `"3"`, `"ح3"` or `"الحصة 3"`.
pub fn row_has_period(row: &[String]) -> bool {
    row.iter().any(|c| match_period(c.trim()).is_some())
}

/// True when some cell already names both a day and a period (`"الأحد 1"`).
pub fn row_has_slot_label(row: &[String]) -> bool {
    row.iter().any(|c| match_day(c.trim()).is_some() && match_period(c.trim()).is_some())
}

/// Everything the lexicon recognises in one header label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LabelTags {
    pub teacher_name: bool,
    pub subject: bool,
    pub period_count: bool,
    pub is_break: bool,
    pub day: Option<Day>,
    pub period: Option<u8>,
}

/// Tokenizes a header label into tags. Scans the label once per token set.
pub fn tag(label: &str) -> LabelTags {
    let text = label.trim();
    LabelTags {
        teacher_name: text.contains(TEACHER_MARKER),
        subject: text.contains(SUBJECT_MARKER),
        period_count: text.contains(PERIOD_COUNT_MARKER),
        is_break: is_break(text),
        day: match_day(text),
        period: match_period(text),
    }
}
