use anyhow::{anyhow, Result};
use rusqlite::{params, OptionalExtension, Row};

use crate::db::{
    connection::Database,
    helpers::{parse_datetime, parse_json_list, parse_quality, to_optional_u32, to_u32},
    models::SleepSession,
};

const SESSION_COLUMNS: &str = "id, user_id, start_time, end_time, quality, duration_minutes, \
     deep_sleep, light_sleep, rem_sleep, awake_time, heart_rate, notes, tags, created_at";

fn row_to_session(row: &Row) -> Result<SleepSession> {
    let start_time: String = row.get("start_time")?;
    let end_time: String = row.get("end_time")?;
    let created_at: String = row.get("created_at")?;
    let quality: String = row.get("quality")?;
    let duration: Option<i64> = row.get("duration_minutes")?;
    let heart_rate: String = row.get("heart_rate")?;
    let tags: String = row.get("tags")?;

    Ok(SleepSession {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        start_time: parse_datetime(&start_time, "start_time")?,
        end_time: parse_datetime(&end_time, "end_time")?,
        quality: parse_quality(&quality)?,
        duration: to_optional_u32(duration, "duration_minutes")?,
        deep_sleep: to_u32(row.get("deep_sleep")?, "deep_sleep")?,
        light_sleep: to_u32(row.get("light_sleep")?, "light_sleep")?,
        rem_sleep: to_u32(row.get("rem_sleep")?, "rem_sleep")?,
        awake_time: to_u32(row.get("awake_time")?, "awake_time")?,
        heart_rate: parse_json_list(&heart_rate, "heart_rate")?,
        notes: row.get("notes")?,
        tags: parse_json_list(&tags, "tags")?,
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}

impl Database {
    pub async fn insert_session(&self, session: &SleepSession) -> Result<()> {
        let record = session.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO sleep_sessions (id, user_id, start_time, end_time, quality, duration_minutes,
                     deep_sleep, light_sleep, rem_sleep, awake_time, heart_rate, notes, tags, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
                params![
                    record.id,
                    record.user_id,
                    record.start_time.to_rfc3339(),
                    record.end_time.to_rfc3339(),
                    record.quality.as_str(),
                    record.duration,
                    record.deep_sleep,
                    record.light_sleep,
                    record.rem_sleep,
                    record.awake_time,
                    serde_json::to_string(&record.heart_rate)?,
                    record.notes,
                    serde_json::to_string(&record.tags)?,
                    record.created_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
    }

    pub async fn get_session(&self, session_id: &str) -> Result<Option<SleepSession>> {
        let session_id = session_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SESSION_COLUMNS} FROM sleep_sessions WHERE id = ?1"
            ))?;

            let session = stmt
                .query_row(params![session_id], |row| Ok(row_to_session(row)))
                .optional()?
                .transpose()
                .map_err(|e| anyhow!("Failed to parse session: {}", e))?;

            Ok(session)
        })
        .await
    }

    /// Sessions in insertion order, optionally limited to one user.
    pub async fn list_sessions(&self, user_id: Option<i64>) -> Result<Vec<SleepSession>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SESSION_COLUMNS} FROM sleep_sessions
                 WHERE ?1 IS NULL OR user_id = ?1
                 ORDER BY rowid ASC"
            ))?;

            let mut rows = stmt.query(params![user_id])?;
            let mut sessions = Vec::new();
            while let Some(row) = rows.next()? {
                sessions.push(row_to_session(row)?);
            }
            Ok(sessions)
        })
        .await
    }
}
