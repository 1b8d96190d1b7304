use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::{params, OptionalExtension};
use tracing::info;

use super::ScheduleStore;
use crate::error::{Result, TimetableError};
use crate::lexicon::PERIODS;
use crate::models::{Day, OwnerId, Substitution, TeacherId};

impl ScheduleStore {
    /// Records that `covering` takes over `original`'s lesson at (day, period).
    pub fn record_substitution(
        &self,
        owner: OwnerId,
        original: TeacherId,
        covering: TeacherId,
        day: Day,
        period: u8,
    ) -> Result<Substitution> {
        if !PERIODS.contains(&period) {
            return Err(TimetableError::InvalidPeriod(period.into()));
        }

        let conn = self.conn();
        let name_of = |id: TeacherId| -> Result<String> {
            conn.query_row(
                "SELECT name FROM teachers WHERE id = ?1 AND owner_id = ?2",
                params![id.0, owner.0],
                |row| row.get::<_, String>(0),
            )
            .optional()?
            .ok_or_else(|| TimetableError::UnknownTeacher(id.to_string()))
        };
        let original_name = name_of(original)?;
        let covering_name = name_of(covering)?;

        let created_at = Utc::now().trunc_subsecs(6);
        conn.execute(
            "INSERT INTO substitutions (
                owner_id, original_teacher_id, original_name,
                covering_teacher_id, covering_name, day, period, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                owner.0,
                original.0,
                original_name,
                covering.0,
                covering_name,
                day,
                period,
                created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            ],
        )?;
        let id = conn.last_insert_rowid();

        info!(%owner, id, original = %original_name, covering = %covering_name, %day, period, "substitution recorded");
        Ok(Substitution {
            id,
            owner,
            original_teacher: Some(original),
            original_name,
            covering_teacher: Some(covering),
            covering_name,
            day,
            period,
            created_at,
        })
    }

    /// Substitutions of the owner, newest first.
    pub fn list_substitutions(&self, owner: OwnerId) -> Result<Vec<Substitution>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, owner_id, original_teacher_id, original_name,
                    covering_teacher_id, covering_name, day, period, created_at
             FROM substitutions WHERE owner_id = ?1
             ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt.query_map(params![owner.0], |row| {
            let ts: String = row.get(8)?;
            let created_at = DateTime::parse_from_rfc3339(&ts)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(8, rusqlite::types::Type::Text, Box::new(e)))?;
            Ok(Substitution {
                id: row.get(0)?,
                owner: OwnerId(row.get(1)?),
                original_teacher: row.get::<_, Option<i64>>(2)?.map(TeacherId),
                original_name: row.get(3)?,
                covering_teacher: row.get::<_, Option<i64>>(4)?.map(TeacherId),
                covering_name: row.get(5)?,
                day: row.get(6)?,
                period: row.get(7)?,
                created_at,
            })
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    pub fn delete_substitution(&self, owner: OwnerId, id: i64) -> Result<()> {
        let conn = self.conn();
        let n = conn.execute(
            "DELETE FROM substitutions WHERE id = ?1 AND owner_id = ?2",
            params![id, owner.0],
        )?;
        if n == 0 {
            return Err(TimetableError::UnknownSubstitution(id));
        }
        info!(%owner, id, "substitution deleted");
        Ok(())
    }
}
