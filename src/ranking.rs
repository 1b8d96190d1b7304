// Ranking de suplentes para una hora concreta

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Result, TimetableError};
use crate::lexicon::PERIODS;
use crate::models::{Candidate, Day, OwnerId, Schedule, TeacherId};
use crate::store::ScheduleStore;

/// Informational note attached to a ranking. Not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RankingNotice {
    /// The original teacher has no lesson at the requested slot.
    NoLessonAtSlot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ranking {
    pub notice: Option<RankingNotice>,
    pub candidates: Vec<Candidate>,
}

impl Ranking {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

fn check_period(period: u8) -> Result<()> {
    if PERIODS.contains(&period) {
        Ok(())
    } else {
        Err(TimetableError::InvalidPeriod(period.into()))
    }
}

/// Teachers free at (day, period), least loaded first.
///
/// A candidate must have a recorded slot at the target time with no lesson in
/// it; teachers without such a slot are not considered free. Ordering is by
/// weekly lesson count, then by lessons on `day`, keeping schedule order on
/// ties.
pub fn rank_candidates(schedule: &Schedule, original: TeacherId, day: Day, period: u8) -> Result<Ranking> {
    check_period(period)?;
    if schedule.teacher(original).is_none() {
        return Err(TimetableError::UnknownTeacher(original.to_string()));
    }

    let teaching = schedule
        .slot(original, day, period)
        .map(|s| s.has_lesson)
        .unwrap_or(false);
    let notice = if teaching { None } else { Some(RankingNotice::NoLessonAtSlot) };
    if notice.is_some() {
        debug!(%original, %day, period, "original teacher has no lesson at this slot");
    }

    let mut candidates: Vec<Candidate> = schedule
        .teachers
        .iter()
        .filter(|t| t.id != original)
        .filter(|t| matches!(schedule.slot(t.id, day, period), Some(s) if !s.has_lesson))
        .map(|t| {
            let (weekly_load, daily_load) = schedule
                .slots_of(t.id)
                .filter(|s| s.has_lesson)
                .fold((0u32, 0u32), |(w, d), s| (w + 1, d + u32::from(s.day == day)));
            Candidate { teacher: t.clone(), weekly_load, daily_load }
        })
        .collect();

    // sort_by_key is stable
    candidates.sort_by_key(|c| (c.weekly_load, c.daily_load));

    Ok(Ranking { notice, candidates })
}

/// Loads the owner's committed schedule and ranks substitutes for `original`.
pub fn find_substitutes(
    store: &ScheduleStore,
    owner: OwnerId,
    original: TeacherId,
    day: Day,
    period: u8,
) -> Result<Ranking> {
    check_period(period)?;
    let schedule = store.load_schedule(owner)?;
    let ranking = rank_candidates(&schedule, original, day, period)?;
    info!(%owner, %original, %day, period, candidates = ranking.candidates.len(), "ranking computed");
    Ok(ranking)
}
