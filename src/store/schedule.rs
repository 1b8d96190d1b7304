use rusqlite::{params, Connection, OptionalExtension};
use tracing::info;

use super::ScheduleStore;
use crate::error::{Result, TimetableError};
use crate::excel::Timetable;
use crate::models::{Day, OwnerId, Schedule, Slot, Teacher, TeacherId};

impl ScheduleStore {
    /// Replaces the owner's whole schedule with `timetable` in one transaction.
    ///
    /// The previous generation is deleted and the new one inserted before the
    /// commit; any failure drops the transaction and the prior schedule stays
    /// exactly as it was. Failures are reported as `ParseFailed`.
    pub fn replace_schedule(&self, owner: OwnerId, timetable: &Timetable) -> Result<Schedule> {
        let mut conn = self.conn();
        let tx = conn.transaction().map_err(TimetableError::parse_failed)?;

        let removed = tx
            .execute("DELETE FROM teachers WHERE owner_id = ?1", params![owner.0])
            .map_err(TimetableError::parse_failed)?;

        {
            let mut insert_teacher = tx
                .prepare(
                    "INSERT INTO teachers (owner_id, name, subject, total_periods)
                     VALUES (?1, ?2, ?3, ?4)",
                )
                .map_err(TimetableError::parse_failed)?;
            let mut insert_slot = tx
                .prepare(
                    "INSERT INTO slots (teacher_id, day, period, has_lesson)
                     VALUES (?1, ?2, ?3, ?4)",
                )
                .map_err(TimetableError::parse_failed)?;

            for t in &timetable.teachers {
                let teacher_id = insert_teacher
                    .insert(params![owner.0, t.name, t.subject, t.total_periods])
                    .map_err(TimetableError::parse_failed)?;
                for s in &t.slots {
                    insert_slot
                        .execute(params![teacher_id, s.day, s.period, s.has_lesson])
                        .map_err(TimetableError::parse_failed)?;
                }
            }
        }

        let schedule = load(&tx, owner).map_err(TimetableError::parse_failed)?;
        tx.commit().map_err(TimetableError::parse_failed)?;

        info!(
            %owner,
            removed,
            teachers = schedule.teachers.len(),
            slots = schedule.slots.len(),
            "schedule replaced"
        );
        Ok(schedule)
    }

    /// Committed schedule of the owner, in insertion order.
    pub fn load_schedule(&self, owner: OwnerId) -> Result<Schedule> {
        let conn = self.conn();
        Ok(load(&conn, owner)?)
    }

    /// Teachers of the owner sorted by name.
    pub fn list_teachers(&self, owner: OwnerId) -> Result<Vec<Teacher>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, owner_id, name, subject, total_periods
             FROM teachers WHERE owner_id = ?1 ORDER BY name, id",
        )?;
        let rows = stmt.query_map(params![owner.0], teacher_from_row)?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    /// First teacher of the owner with exactly this (trimmed) name.
    pub fn teacher_by_name(&self, owner: OwnerId, name: &str) -> Result<Option<Teacher>> {
        let conn = self.conn();
        let teacher = conn
            .query_row(
                "SELECT id, owner_id, name, subject, total_periods
                 FROM teachers WHERE owner_id = ?1 AND name = ?2 ORDER BY id LIMIT 1",
                params![owner.0, name.trim()],
                teacher_from_row,
            )
            .optional()?;
        Ok(teacher)
    }

    /// Days present in the owner's schedule, in week order.
    pub fn schedule_days(&self, owner: OwnerId) -> Result<Vec<Day>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT DISTINCT s.day FROM slots s
             JOIN teachers t ON t.id = s.teacher_id
             WHERE t.owner_id = ?1",
        )?;
        let rows = stmt.query_map(params![owner.0], |row| row.get::<_, Day>(0))?;
        let mut days = Vec::new();
        for r in rows {
            days.push(r?);
        }
        days.sort();
        Ok(days)
    }
}

fn teacher_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Teacher> {
    Ok(Teacher {
        id: TeacherId(row.get(0)?),
        owner: OwnerId(row.get(1)?),
        name: row.get(2)?,
        subject: row.get(3)?,
        total_periods: row.get(4)?,
    })
}

fn load(conn: &Connection, owner: OwnerId) -> rusqlite::Result<Schedule> {
    let mut stmt = conn.prepare(
        "SELECT id, owner_id, name, subject, total_periods
         FROM teachers WHERE owner_id = ?1 ORDER BY id",
    )?;
    let teachers = stmt
        .query_map(params![owner.0], teacher_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut stmt = conn.prepare(
        "SELECT s.teacher_id, s.day, s.period, s.has_lesson
         FROM slots s JOIN teachers t ON t.id = s.teacher_id
         WHERE t.owner_id = ?1 ORDER BY s.id",
    )?;
    let slots = stmt
        .query_map(params![owner.0], |row| {
            Ok(Slot {
                teacher: TeacherId(row.get(0)?),
                day: row.get(1)?,
                period: row.get(2)?,
                has_lesson: row.get(3)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(Schedule { teachers, slots })
}
