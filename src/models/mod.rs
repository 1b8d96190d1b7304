// Estructuras de datos principales

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TimetableError;

/// School days in display order. The derived `Ord` is the only ordering used
/// anywhere days are sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
}

impl Day {
    pub const ALL: [Day; 5] = [Day::Sunday, Day::Monday, Day::Tuesday, Day::Wednesday, Day::Thursday];

    /// Canonical key used for storage.
    pub fn key(self) -> &'static str {
        match self {
            Day::Sunday => "Sunday",
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
        }
    }

    /// Arabic display name (the first spelling listed in the lexicon).
    pub fn arabic(self) -> &'static str {
        match self {
            Day::Sunday => "الأحد",
            Day::Monday => "الإثنين",
            Day::Tuesday => "الثلاثاء",
            Day::Wednesday => "الأربعاء",
            Day::Thursday => "الخميس",
        }
    }

    pub fn from_key(key: &str) -> Option<Day> {
        Day::ALL.into_iter().find(|d| d.key().eq_ignore_ascii_case(key.trim()))
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Day {
    type Err = TimetableError;

    /// Accepts the canonical English key (any case) or any Arabic spelling
    /// known to the lexicon.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Day::from_key(trimmed)
            .or_else(|| crate::lexicon::day_for_token(trimmed))
            .ok_or_else(|| TimetableError::InvalidDay(trimmed.to_string()))
    }
}

/// Account that owns a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub i64);

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TeacherId(pub i64);

impl fmt::Display for TeacherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Teacher {
    pub id: TeacherId,
    pub owner: OwnerId,
    pub name: String,
    pub subject: String,
    pub total_periods: u32,
}

/// A (teacher, day, period) fact. `has_lesson` is false for free periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub teacher: TeacherId,
    pub day: Day,
    pub period: u8,
    pub has_lesson: bool,
}

/// Committed teachers and slots of one owner, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schedule {
    pub teachers: Vec<Teacher>,
    pub slots: Vec<Slot>,
}

impl Schedule {
    pub fn teacher(&self, id: TeacherId) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.id == id)
    }

    pub fn slot(&self, teacher: TeacherId, day: Day, period: u8) -> Option<&Slot> {
        self.slots
            .iter()
            .find(|s| s.teacher == teacher && s.day == day && s.period == period)
    }

    pub fn slots_of(&self, teacher: TeacherId) -> impl Iterator<Item = &Slot> + '_ {
        self.slots.iter().filter(move |s| s.teacher == teacher)
    }

    /// Distinct days that appear in at least one slot, in `Day` order.
    pub fn days(&self) -> Vec<Day> {
        let mut days: Vec<Day> = self.slots.iter().map(|s| s.day).collect();
        days.sort();
        days.dedup();
        days
    }
}

/// A teacher free at the requested slot, with the loads used for ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub teacher: Teacher,
    pub weekly_load: u32,
    pub daily_load: u32,
}

/// A covering assignment picked from a ranking. Teacher ids become `None`
/// once the referenced teacher is replaced by a newer upload; the name
/// snapshots stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Substitution {
    pub id: i64,
    pub owner: OwnerId,
    pub original_teacher: Option<TeacherId>,
    pub original_name: String,
    pub covering_teacher: Option<TeacherId>,
    pub covering_name: String,
    pub day: Day,
    pub period: u8,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
