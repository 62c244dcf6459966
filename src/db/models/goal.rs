//! Sleep goal data models.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::SleepQuality;
use crate::error::ValidationError;

/// A user-defined sleep target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SleepGoal {
    pub id: String,
    /// Target sleep duration in hours.
    pub target_duration: f64,
    /// "HH:MM", may be later in the day than `target_wake_time`.
    pub target_bedtime: String,
    /// "HH:MM".
    pub target_wake_time: String,
    pub quality_target: SleepQuality,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Form data for creating or editing a goal. Every field except
/// `is_active` is required.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalInput {
    pub target_duration: Option<f64>,
    pub target_bedtime: Option<String>,
    pub target_wake_time: Option<String>,
    pub quality_target: Option<SleepQuality>,
    pub is_active: Option<bool>,
}

/// Checks a zero-padded 24h "HH:MM" string. Zero padding keeps
/// lexicographic order equal to clock order within a day.
pub fn validate_time_of_day(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::InvalidTimeOfDay {
        field,
        value: value.to_string(),
    };

    if value.len() != 5 || value.as_bytes()[2] != b':' {
        return Err(invalid());
    }
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| invalid())?;
    Ok(())
}

impl GoalInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let duration = self
            .target_duration
            .ok_or(ValidationError::MissingField("targetDuration"))?;
        if !(duration > 0.0) || !duration.is_finite() {
            return Err(ValidationError::NonPositiveDuration(duration));
        }

        let bedtime = self
            .target_bedtime
            .as_deref()
            .ok_or(ValidationError::MissingField("targetBedtime"))?;
        validate_time_of_day("targetBedtime", bedtime)?;

        let wake = self
            .target_wake_time
            .as_deref()
            .ok_or(ValidationError::MissingField("targetWakeTime"))?;
        validate_time_of_day("targetWakeTime", wake)?;

        if self.quality_target.is_none() {
            return Err(ValidationError::MissingField("qualityTarget"));
        }
        Ok(())
    }

    /// Builds a new, active-by-default goal.
    pub fn into_goal(self, id: String, now: DateTime<Utc>) -> Result<SleepGoal, ValidationError> {
        self.validate()?;
        Ok(SleepGoal {
            id,
            target_duration: self
                .target_duration
                .ok_or(ValidationError::MissingField("targetDuration"))?,
            target_bedtime: self
                .target_bedtime
                .ok_or(ValidationError::MissingField("targetBedtime"))?,
            target_wake_time: self
                .target_wake_time
                .ok_or(ValidationError::MissingField("targetWakeTime"))?,
            quality_target: self
                .quality_target
                .ok_or(ValidationError::MissingField("qualityTarget"))?,
            is_active: self.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces the editable fields of `goal`, keeping its id and creation
    /// time. `is_active` is left alone when not supplied.
    pub fn apply_to(self, goal: &SleepGoal, now: DateTime<Utc>) -> Result<SleepGoal, ValidationError> {
        let is_active = self.is_active.unwrap_or(goal.is_active);
        let mut updated = self.into_goal(goal.id.clone(), now)?;
        updated.is_active = is_active;
        updated.created_at = goal.created_at;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> GoalInput {
        GoalInput {
            target_duration: Some(8.0),
            target_bedtime: Some("22:30".into()),
            target_wake_time: Some("06:30".into()),
            quality_target: Some(SleepQuality::Good),
            is_active: None,
        }
    }

    #[test]
    fn new_goal_is_active_by_default() {
        let now = Utc::now();
        let goal = input().into_goal("g1".into(), now).unwrap();
        assert!(goal.is_active);
        assert_eq!(goal.created_at, now);
        assert_eq!(goal.updated_at, now);
    }

    #[test]
    fn missing_fields_are_reported() {
        let mut bad = input();
        bad.target_wake_time = None;
        assert_eq!(
            bad.validate(),
            Err(ValidationError::MissingField("targetWakeTime"))
        );

        let mut bad = input();
        bad.quality_target = None;
        assert_eq!(
            bad.validate(),
            Err(ValidationError::MissingField("qualityTarget"))
        );
    }

    #[test]
    fn rejects_non_positive_duration() {
        let mut bad = input();
        bad.target_duration = Some(0.0);
        assert_eq!(bad.validate(), Err(ValidationError::NonPositiveDuration(0.0)));
    }

    #[test]
    fn time_of_day_must_be_zero_padded() {
        assert!(validate_time_of_day("t", "07:05").is_ok());
        assert!(validate_time_of_day("t", "23:59").is_ok());
        assert!(validate_time_of_day("t", "7:05").is_err());
        assert!(validate_time_of_day("t", "24:00").is_err());
        assert!(validate_time_of_day("t", "12:60").is_err());
        assert!(validate_time_of_day("t", "1230").is_err());
    }

    #[test]
    fn apply_keeps_identity_and_activity() {
        let created = Utc::now();
        let mut goal = input().into_goal("g1".into(), created).unwrap();
        goal.is_active = false;

        let mut edit = input();
        edit.target_duration = Some(7.5);
        let later = created + chrono::Duration::minutes(5);
        let updated = edit.apply_to(&goal, later).unwrap();

        assert_eq!(updated.id, "g1");
        assert_eq!(updated.target_duration, 7.5);
        assert!(!updated.is_active);
        assert_eq!(updated.created_at, created);
        assert_eq!(updated.updated_at, later);
    }
}
