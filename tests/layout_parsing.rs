mod common;

use common::{day_above_sheet, day_then_period_sheet, flat_sheet, tempdir, write_xlsx, FixtureSheet};
use timetable_sub::excel::{
    inspect_workbook, parse_timetable, parse_timetable_file, ExcelWorkbook, HeaderLayout, ParsedSlot, DEFAULT_SCAN_ROWS,
};
use timetable_sub::{Day, TimetableError};

#[test]
fn three_layouts_parse_to_the_same_teachers() {
    let dir = tempdir();
    let flat = write_xlsx(dir.path(), "flat.xlsx", &[flat_sheet()]);
    let above = write_xlsx(dir.path(), "above.xlsx", &[day_above_sheet()]);
    let split = write_xlsx(dir.path(), "split.xlsx", &[day_then_period_sheet()]);

    let flat = parse_timetable_file(&flat, DEFAULT_SCAN_ROWS).unwrap();
    let above = parse_timetable_file(&above, DEFAULT_SCAN_ROWS).unwrap();
    let split = parse_timetable_file(&split, DEFAULT_SCAN_ROWS).unwrap();

    assert_eq!(flat.layout, HeaderLayout::Flat);
    assert_eq!(above.layout, HeaderLayout::DayAbove);
    assert_eq!(split.layout, HeaderLayout::DayThenPeriod);

    assert_eq!(flat.sheet, "الجدول");
    assert_eq!(flat.teachers, above.teachers);
    assert_eq!(flat.teachers, split.teachers);
}

#[test]
fn rows_are_materialized_with_defaults() {
    let dir = tempdir();
    let path = write_xlsx(dir.path(), "flat.xlsx", &[flat_sheet()]);
    let tt = parse_timetable_file(&path, DEFAULT_SCAN_ROWS).unwrap();

    // blank row yields no teacher
    assert_eq!(tt.teachers.len(), 2);

    let ahmed = &tt.teachers[0];
    assert_eq!(ahmed.name, "أحمد");
    assert_eq!(ahmed.subject, "رياضيات");
    assert_eq!(ahmed.total_periods, 2);
    assert_eq!(
        ahmed.slots,
        vec![
            ParsedSlot { day: Day::Sunday, period: 1, has_lesson: true },
            ParsedSlot { day: Day::Sunday, period: 2, has_lesson: false },
            ParsedSlot { day: Day::Monday, period: 1, has_lesson: false },
            ParsedSlot { day: Day::Monday, period: 2, has_lesson: true },
        ]
    );

    let sara = &tt.teachers[1];
    assert_eq!(sara.subject, "Unknown");
    assert_eq!(sara.total_periods, 0);
    assert_eq!(sara.weekly_lessons(), 2);
}

#[test]
fn breaks_and_unlabelled_columns_are_ignored() {
    let dir = tempdir();
    let sheet = FixtureSheet::new(
        "s",
        vec![
            vec!["اسم المدرس", "الأحد 1", "فرصة", "Break 2", "ملاحظات", "الأحد 2"],
            vec!["ليلى", "x", "x", "x", "x", ""],
        ],
    );
    let path = write_xlsx(dir.path(), "breaks.xlsx", &[sheet]);
    let tt = parse_timetable_file(&path, DEFAULT_SCAN_ROWS).unwrap();
    assert_eq!(
        tt.teachers[0].slots,
        vec![
            ParsedSlot { day: Day::Sunday, period: 1, has_lesson: true },
            ParsedSlot { day: Day::Sunday, period: 2, has_lesson: false },
        ]
    );
}

#[test]
fn teacher_only_header_gives_teachers_without_slots() {
    let dir = tempdir();
    let sheet = FixtureSheet::new("s", vec![vec!["اسم المدرس", "المادة"], vec!["عمر", "علوم"], vec!["هدى", ""]]);
    let path = write_xlsx(dir.path(), "bare.xlsx", &[sheet]);
    let tt = parse_timetable_file(&path, DEFAULT_SCAN_ROWS).unwrap();
    assert_eq!(tt.teachers.len(), 2);
    assert!(tt.teachers.iter().all(|t| t.slots.is_empty()));
}

#[test]
fn missing_marker_is_sheet_not_found() {
    let dir = tempdir();
    let sheet = FixtureSheet::new("s", vec![vec!["الاسم", "الأحد 1"], vec!["عمر", "x"]]);
    let path = write_xlsx(dir.path(), "nomarker.xlsx", &[sheet]);
    let err = parse_timetable_file(&path, DEFAULT_SCAN_ROWS).unwrap_err();
    assert!(matches!(err, TimetableError::SheetNotFound { scanned_rows: 20, .. }));
}

#[test]
fn marker_below_scan_window_is_not_found() {
    let dir = tempdir();
    let mut rows = vec![vec!["عنوان"]; 22];
    rows.push(vec!["اسم المدرس"]);
    let path = write_xlsx(dir.path(), "deep.xlsx", &[FixtureSheet::new("s", rows)]);

    assert!(matches!(
        parse_timetable_file(&path, DEFAULT_SCAN_ROWS),
        Err(TimetableError::SheetNotFound { .. })
    ));
    let tt = parse_timetable_file(&path, 30).unwrap();
    assert_eq!(tt.header_row, 22);
}

#[test]
fn workbook_bytes_parse_like_files() {
    let dir = tempdir();
    let path = write_xlsx(dir.path(), "split.xlsx", &[day_then_period_sheet()]);
    let bytes = std::fs::read(&path).unwrap();

    let mut wb = ExcelWorkbook::from_bytes(bytes).unwrap();
    let from_bytes = parse_timetable(&mut wb, DEFAULT_SCAN_ROWS).unwrap();
    let from_file = parse_timetable_file(&path, DEFAULT_SCAN_ROWS).unwrap();
    assert_eq!(from_bytes, from_file);
}

#[test]
fn inspection_lists_sheets_and_preview_without_importing() {
    let dir = tempdir();
    let path = write_xlsx(dir.path(), "above.xlsx", &[day_above_sheet()]);
    let mut wb = ExcelWorkbook::open(&path).unwrap();
    let report = inspect_workbook(&mut wb, DEFAULT_SCAN_ROWS).unwrap();

    let names: Vec<&str> = report.sheets.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Sheet1", "الجدول"]);
    assert!(!report.sheets[0].has_marker);
    assert_eq!(report.sheets[1].header_row, Some(2));
    assert_eq!(report.sheets[1].header[0], "اسم المدرس");
    assert_eq!(report.sheets[1].row_below[0], "أحمد");

    let preview = report.preview.unwrap();
    assert_eq!(preview.layout, HeaderLayout::DayAbove);
    assert_eq!(preview.teachers, 2);
    assert_eq!(preview.slots, 8);
}
