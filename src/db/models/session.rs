//! Sleep session data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SleepQuality;
use crate::error::ValidationError;

/// A recorded sleep interval. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SleepSession {
    pub id: String,
    pub user_id: Option<i64>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub quality: SleepQuality,
    /// Stored duration in minutes. When absent, the duration is derived
    /// from `end_time - start_time`.
    pub duration: Option<u32>,
    pub deep_sleep: u32,
    pub light_sleep: u32,
    pub rem_sleep: u32,
    pub awake_time: u32,
    pub heart_rate: Vec<u32>,
    pub notes: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a session, as received from the UI or the timer.
///
/// Minute fields are signed so that negative values can be reported
/// instead of failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewSleepSession {
    pub user_id: Option<i64>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub quality: Option<SleepQuality>,
    pub duration: Option<i64>,
    pub deep_sleep: Option<i64>,
    pub light_sleep: Option<i64>,
    pub rem_sleep: Option<i64>,
    pub awake_time: Option<i64>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
}

fn minutes(field: &'static str, value: Option<i64>) -> Result<u32, ValidationError> {
    match value {
        None => Ok(0),
        Some(v) if v < 0 => Err(ValidationError::NegativeMinutes { field, value: v }),
        Some(v) => {
            u32::try_from(v).map_err(|_| ValidationError::MinutesOutOfRange { field, value: v })
        }
    }
}

impl NewSleepSession {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let start = self.start_time.ok_or(ValidationError::MissingField("startTime"))?;
        let end = self.end_time.ok_or(ValidationError::MissingField("endTime"))?;
        if end <= start {
            return Err(ValidationError::InvertedTimeRange);
        }
        if self.quality.is_none() {
            return Err(ValidationError::MissingField("quality"));
        }
        minutes("duration", self.duration)?;
        minutes("deepSleep", self.deep_sleep)?;
        minutes("lightSleep", self.light_sleep)?;
        minutes("remSleep", self.rem_sleep)?;
        minutes("awakeTime", self.awake_time)?;
        Ok(())
    }

    /// Validates the input and builds the stored record.
    pub fn into_session(
        self,
        id: String,
        created_at: DateTime<Utc>,
    ) -> Result<SleepSession, ValidationError> {
        self.validate()?;

        let duration = match self.duration {
            Some(_) => Some(minutes("duration", self.duration)?),
            None => None,
        };

        Ok(SleepSession {
            id,
            user_id: self.user_id,
            start_time: self.start_time.ok_or(ValidationError::MissingField("startTime"))?,
            end_time: self.end_time.ok_or(ValidationError::MissingField("endTime"))?,
            quality: self.quality.ok_or(ValidationError::MissingField("quality"))?,
            duration,
            deep_sleep: minutes("deepSleep", self.deep_sleep)?,
            light_sleep: minutes("lightSleep", self.light_sleep)?,
            rem_sleep: minutes("remSleep", self.rem_sleep)?,
            awake_time: minutes("awakeTime", self.awake_time)?,
            heart_rate: Vec::new(),
            notes: self.notes.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
            created_at,
        })
    }
}
