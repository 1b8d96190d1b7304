use serde::Serialize;
use std::collections::HashSet;
use tracing::warn;

use crate::error::{Result, TimetableError};
use crate::excel::header::ResolvedHeader;
use crate::lexicon::{self, LabelTags, TEACHER_MARKER};
use crate::models::Day;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnRole {
    TeacherName,
    Subject,
    PeriodCount,
    Slot { day: Day, period: u8 },
    Ignored,
}

/// Role of one spreadsheet column for the current parse run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalColumn {
    pub index: usize,
    pub label: String,
    pub role: ColumnRole,
}

impl CanonicalColumn {
    pub fn slot(&self) -> Option<(Day, u8)> {
        match self.role {
            ColumnRole::Slot { day, period } => Some((day, period)),
            _ => None,
        }
    }
}

/// Role precedence: teacher name, subject, period count, break, day+period slot.
pub fn role_for(tags: LabelTags) -> ColumnRole {
    if tags.teacher_name {
        return ColumnRole::TeacherName;
    }
    if tags.subject {
        return ColumnRole::Subject;
    }
    if tags.period_count {
        return ColumnRole::PeriodCount;
    }
    if tags.is_break {
        return ColumnRole::Ignored;
    }
    match (tags.day, tags.period) {
        (Some(day), Some(period)) => ColumnRole::Slot { day, period },
        _ => ColumnRole::Ignored,
    }
}

/// Column roles of a resolved header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnMap {
    pub columns: Vec<CanonicalColumn>,
    teacher: usize,
}

impl ColumnMap {
    /// First teacher-name column.
    pub fn teacher(&self) -> &CanonicalColumn {
        &self.columns[self.teacher]
    }

    pub fn subject(&self) -> Option<&CanonicalColumn> {
        self.first(ColumnRole::Subject)
    }

    pub fn period_count(&self) -> Option<&CanonicalColumn> {
        self.first(ColumnRole::PeriodCount)
    }

    pub fn slots(&self) -> impl Iterator<Item = &CanonicalColumn> + '_ {
        self.columns.iter().filter(|c| c.slot().is_some())
    }

    fn first(&self, role: ColumnRole) -> Option<&CanonicalColumn> {
        self.columns.iter().find(|c| c.role == role)
    }
}

/// Assigns a role to every canonical label.
///
/// A slot column whose (day, period) was already claimed by an earlier column
/// is ignored so a row never yields two slots for the same period.
pub fn classify_columns(header: &ResolvedHeader) -> Result<ColumnMap> {
    let mut claimed: HashSet<(Day, u8)> = HashSet::new();
    let mut columns = Vec::with_capacity(header.labels.len());

    for (index, label) in header.labels.iter().enumerate() {
        let mut role = role_for(lexicon::tag(&label.base));
        if let ColumnRole::Slot { day, period } = role {
            if !claimed.insert((day, period)) {
                warn!(label = %label.text, %day, period, "duplicate day/period column ignored");
                role = ColumnRole::Ignored;
            }
        }
        columns.push(CanonicalColumn { index, label: label.text.clone(), role });
    }

    let mut teachers = columns.iter().filter(|c| c.role == ColumnRole::TeacherName);
    let teacher = match teachers.next() {
        Some(c) => c.index,
        None => {
            return Err(TimetableError::MissingTeacherColumn {
                marker: TEACHER_MARKER.to_string(),
                columns: header.texts(),
            });
        }
    };
    let extra = teachers.count();
    if extra > 0 {
        warn!(extra, "several teacher-name columns, using the first");
    }

    Ok(ColumnMap { columns, teacher })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::excel::header::{HeaderLayout, Label};

    fn header(labels: &[&str]) -> ResolvedHeader {
        ResolvedHeader {
            layout: HeaderLayout::Flat,
            labels: labels
                .iter()
                .map(|l| Label { text: l.to_string(), base: l.to_string() })
                .collect(),
            data_start: 1,
        }
    }

    #[test]
    fn test_roles_by_priority() {
        let map = classify_columns(&header(&[
            "م",
            "اسم المدرس",
            "المادة",
            "عدد الحصص",
            "الأحد 1",
            "فرصة",
            "الأحد فرصة 2",
            "الأحد 3",
            "الخميس",
        ]))
        .unwrap();
        let roles: Vec<ColumnRole> = map.columns.iter().map(|c| c.role).collect();
        assert_eq!(
            roles,
            vec![
                ColumnRole::Ignored,
                ColumnRole::TeacherName,
                ColumnRole::Subject,
                ColumnRole::PeriodCount,
                ColumnRole::Slot { day: Day::Sunday, period: 1 },
                ColumnRole::Ignored,
                ColumnRole::Ignored,
                ColumnRole::Slot { day: Day::Sunday, period: 3 },
                ColumnRole::Ignored,
            ]
        );
        assert_eq!(map.teacher().index, 1);
        assert_eq!(map.subject().map(|c| c.index), Some(2));
        assert_eq!(map.period_count().map(|c| c.index), Some(3));
        assert_eq!(map.slots().count(), 2);
    }

    #[test]
    fn test_missing_teacher_column_lists_labels() {
        let err = classify_columns(&header(&["المادة", "الأحد 1"])).unwrap_err();
        match err {
            TimetableError::MissingTeacherColumn { columns, .. } => {
                assert_eq!(columns, vec!["المادة".to_string(), "الأحد 1".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_slot_is_ignored() {
        let map = classify_columns(&header(&["اسم المدرس", "الاثنين 2", "الإثنين 2"])).unwrap();
        assert_eq!(map.columns[1].role, ColumnRole::Slot { day: Day::Monday, period: 2 });
        assert_eq!(map.columns[2].role, ColumnRole::Ignored);
    }

    #[test]
    fn test_teacher_only_header_has_no_slots() {
        let map = classify_columns(&header(&["اسم المدرس", "المادة"])).unwrap();
        assert_eq!(map.slots().count(), 0);
    }
}
