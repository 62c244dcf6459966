use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{duration, efficiency_percent};
use crate::db::models::{SleepQuality, SleepSession};
use crate::error::StatsError;

/// Sessions per comparison window.
const TREND_WINDOW: usize = 7;
const IMPROVING_RATIO: f64 = 1.10;
const DECLINING_RATIO: f64 = 0.90;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SleepTrend {
    Improving,
    Declining,
    Stable,
}

/// One chart point per session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub session_id: String,
    pub date: NaiveDate,
    pub duration: f64,
    pub quality: SleepQuality,
    pub efficiency: u8,
}

/// Compares the mean duration of the last 7 sessions with the 7 before.
///
/// Windows follow slice order, not dates. The earlier window's sum is
/// always divided by 7, even when fewer sessions fall into it, so with 7
/// or fewer sessions in total the earlier mean is 0 and any positive
/// recent mean reads as improving.
pub fn sleep_trend(sessions: &[SleepSession]) -> Result<SleepTrend, StatsError> {
    if sessions.len() < 2 {
        return Ok(SleepTrend::Stable);
    }

    let len = sessions.len();
    let recent = &sessions[len.saturating_sub(TREND_WINDOW)..];
    if recent.len() < 2 {
        return Ok(SleepTrend::Stable);
    }

    let previous =
        &sessions[len.saturating_sub(2 * TREND_WINDOW)..len.saturating_sub(TREND_WINDOW)];

    let recent_total = recent.iter().map(duration).sum::<Result<f64, StatsError>>()?;
    let previous_total = previous.iter().map(duration).sum::<Result<f64, StatsError>>()?;

    let recent_avg = recent_total / recent.len() as f64;
    let previous_avg = previous_total / TREND_WINDOW as f64;

    if recent_avg > previous_avg * IMPROVING_RATIO {
        Ok(SleepTrend::Improving)
    } else if recent_avg < previous_avg * DECLINING_RATIO {
        Ok(SleepTrend::Declining)
    } else {
        Ok(SleepTrend::Stable)
    }
}

pub fn trend_points(sessions: &[SleepSession]) -> Result<Vec<TrendPoint>, StatsError> {
    sessions
        .iter()
        .map(|session| {
            Ok(TrendPoint {
                session_id: session.id.clone(),
                date: session.start_time.date_naive(),
                duration: duration(session)?,
                quality: session.quality,
                efficiency: efficiency_percent(session)?.round() as u8,
            })
        })
        .collect()
}
