//! Sleep statistics engine.
//!
//! Pure functions over an ordered slice of sessions. Order is insertion
//! order (oldest first); nothing here sorts by date. Empty input resolves
//! to fixed defaults instead of failing, except where a session has to be
//! returned (`best_session` / `worst_session`).

pub mod goals;
pub mod range;
pub mod trend;

use chrono::{TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::db::models::{SleepQuality, SleepSession};
use crate::error::StatsError;

pub use goals::{goal_progress, DayPhase};
pub use range::TimeRange;
pub use trend::{sleep_trend, trend_points, SleepTrend, TrendPoint};

/// Points deducted from the consistency score per hour of bedtime stddev.
const CONSISTENCY_PENALTY_PER_HOUR: f64 = 5.0;

/// Per-stage minute totals across a collection.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StageTotals {
    pub deep: u64,
    pub light: u64,
    pub rem: u64,
    pub awake: u64,
}

/// Number of sessions per quality rating.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QualityDistribution {
    pub excellent: usize,
    pub good: usize,
    pub fair: usize,
    pub poor: usize,
}

impl QualityDistribution {
    pub fn count(&self, quality: SleepQuality) -> usize {
        match quality {
            SleepQuality::Excellent => self.excellent,
            SleepQuality::Good => self.good,
            SleepQuality::Fair => self.fair,
            SleepQuality::Poor => self.poor,
        }
    }
}

/// Session length in minutes.
///
/// A stored duration takes precedence over the timestamps, but the time
/// range is always checked first.
pub fn duration(session: &SleepSession) -> Result<f64, StatsError> {
    if session.end_time <= session.start_time {
        return Err(StatsError::InvalidTimeRange {
            id: session.id.clone(),
        });
    }

    if let Some(stored) = session.duration {
        return Ok(stored as f64);
    }

    let elapsed_ms = (session.end_time - session.start_time).num_milliseconds();
    Ok(elapsed_ms as f64 / 60_000.0)
}

pub fn total_duration(sessions: &[SleepSession]) -> Result<f64, StatsError> {
    sessions.iter().map(duration).sum()
}

/// Mean duration in minutes, 0 for an empty slice.
pub fn average_duration(sessions: &[SleepSession]) -> Result<f64, StatsError> {
    if sessions.is_empty() {
        return Ok(0.0);
    }
    Ok(total_duration(sessions)? / sessions.len() as f64)
}

pub fn quality_score(quality: SleepQuality) -> u8 {
    quality.score()
}

pub fn score_to_quality(score: f64) -> SleepQuality {
    SleepQuality::from_score(score)
}

/// Mean quality score bucketed back into a rating. `Good` when empty.
pub fn average_quality(sessions: &[SleepSession]) -> SleepQuality {
    if sessions.is_empty() {
        return SleepQuality::Good;
    }

    let total: u32 = sessions.iter().map(|s| u32::from(s.quality.score())).sum();
    score_to_quality(total as f64 / sessions.len() as f64)
}

/// Bedtime regularity on a 0-100 scale, using start hours in UTC.
pub fn consistency_score(sessions: &[SleepSession]) -> u8 {
    consistency_score_in(sessions, &Utc)
}

/// Bedtime regularity on a 0-100 scale.
///
/// Takes the population standard deviation of each session's start hour
/// (whole hours, in `tz`) and deducts 5 points per hour. Empty and
/// single-session input score 100.
pub fn consistency_score_in<Tz: TimeZone>(sessions: &[SleepSession], tz: &Tz) -> u8 {
    if sessions.is_empty() {
        return 100;
    }

    let hours: Vec<f64> = sessions
        .iter()
        .map(|s| s.start_time.with_timezone(tz).hour() as f64)
        .collect();
    let count = hours.len() as f64;
    let mean = hours.iter().sum::<f64>() / count;
    let variance = hours.iter().map(|h| (h - mean).powi(2)).sum::<f64>() / count;
    let std_dev = variance.sqrt();

    let score = (100.0 - std_dev * CONSISTENCY_PENALTY_PER_HOUR).max(0.0);
    score.round() as u8
}

fn extreme_session<F>(sessions: &[SleepSession], replaces: F) -> Result<&SleepSession, StatsError>
where
    F: Fn(f64, f64) -> bool,
{
    let mut iter = sessions.iter();
    let mut chosen = iter.next().ok_or(StatsError::EmptyCollection)?;
    let mut chosen_minutes = duration(chosen)?;

    for session in iter {
        let minutes = duration(session)?;
        if replaces(minutes, chosen_minutes) {
            chosen = session;
            chosen_minutes = minutes;
        }
    }

    Ok(chosen)
}

/// Longest session. Ties keep the earliest one.
pub fn best_session(sessions: &[SleepSession]) -> Result<&SleepSession, StatsError> {
    extreme_session(sessions, |candidate, current| candidate > current)
}

/// Shortest session. Ties keep the earliest one.
pub fn worst_session(sessions: &[SleepSession]) -> Result<&SleepSession, StatsError> {
    extreme_session(sessions, |candidate, current| candidate < current)
}

fn efficiency_percent(session: &SleepSession) -> Result<f64, StatsError> {
    let asleep = duration(session)?;
    let in_bed = asleep + session.awake_time as f64;
    if in_bed <= 0.0 {
        return Ok(0.0);
    }
    Ok(asleep / in_bed * 100.0)
}

/// Share of time in bed spent asleep, as a rounded percentage.
pub fn sleep_efficiency(session: &SleepSession) -> Result<u8, StatsError> {
    Ok(efficiency_percent(session)?.round() as u8)
}

/// Rounded mean of the unrounded per-session efficiencies. 0 when empty.
pub fn average_efficiency(sessions: &[SleepSession]) -> Result<u8, StatsError> {
    if sessions.is_empty() {
        return Ok(0);
    }
    let total = sessions
        .iter()
        .map(efficiency_percent)
        .sum::<Result<f64, StatsError>>()?;
    Ok((total / sessions.len() as f64).round() as u8)
}

pub fn stage_totals(sessions: &[SleepSession]) -> StageTotals {
    sessions.iter().fold(StageTotals::default(), |acc, s| StageTotals {
        deep: acc.deep + u64::from(s.deep_sleep),
        light: acc.light + u64::from(s.light_sleep),
        rem: acc.rem + u64::from(s.rem_sleep),
        awake: acc.awake + u64::from(s.awake_time),
    })
}

pub fn quality_distribution(sessions: &[SleepSession]) -> QualityDistribution {
    let mut dist = QualityDistribution::default();
    for session in sessions {
        match session.quality {
            SleepQuality::Excellent => dist.excellent += 1,
            SleepQuality::Good => dist.good += 1,
            SleepQuality::Fair => dist.fair += 1,
            SleepQuality::Poor => dist.poor += 1,
        }
    }
    dist
}

/// The last `n` sessions, most recent first.
pub fn recent_activity(sessions: &[SleepSession], n: usize) -> impl Iterator<Item = &SleepSession> {
    sessions.iter().rev().take(n)
}

/// Formats minutes as "Xh Ym", rounding to the nearest minute.
pub fn format_minutes(minutes: f64) -> String {
    let total = minutes.max(0.0).round() as u64;
    format!("{}h {}m", total / 60, total % 60)
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use crate::db::models::{SleepQuality, SleepSession};

    pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, minute, 0).unwrap()
    }

    /// Session starting at `start` lasting `minutes`, with no stored duration.
    pub fn session(id: &str, start: DateTime<Utc>, minutes: i64, quality: SleepQuality) -> SleepSession {
        SleepSession {
            id: id.to_string(),
            user_id: None,
            start_time: start,
            end_time: start + Duration::minutes(minutes),
            quality,
            duration: None,
            deep_sleep: 0,
            light_sleep: 0,
            rem_sleep: 0,
            awake_time: 0,
            heart_rate: Vec::new(),
            notes: String::new(),
            tags: Vec::new(),
            created_at: start,
        }
    }

    /// Sessions on consecutive nights at 22:00 with the given durations.
    pub fn nightly(durations: &[i64]) -> Vec<SleepSession> {
        durations
            .iter()
            .enumerate()
            .map(|(i, minutes)| {
                let start = at(22, 0) + Duration::days(i as i64);
                session(&format!("n{i}"), start, *minutes, SleepQuality::Good)
            })
            .collect()
    }
}
