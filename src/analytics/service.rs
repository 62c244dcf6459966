use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;

use crate::db::models::{SleepGoal, SleepQuality, SleepSession};
use crate::repository::{GoalRepository, SessionRepository};
use crate::stats::{self, DayPhase, QualityDistribution, SleepTrend, StageTotals, TimeRange, TrendPoint};
use crate::log_debug;

const ENABLE_LOGS: bool = false;

const DASHBOARD_RECENT: usize = 3;
const ANALYTICS_RECENT: usize = 5;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_sessions: usize,
    /// Minutes, rounded.
    pub average_duration: f64,
    pub average_quality: SleepQuality,
    /// Minutes.
    pub total_sleep_time: f64,
    /// 0 when there is nothing to score yet.
    pub consistency_score: u8,
    pub best_sleep_time: String,
    pub worst_sleep_time: String,
    pub trend: SleepTrend,
    /// Most recent first.
    pub recent_activity: Vec<SleepSession>,
    pub day_phase: DayPhase,
    pub status_message: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub range: TimeRange,
    pub session_count: usize,
    pub average_duration: f64,
    pub average_quality: SleepQuality,
    pub average_efficiency: u8,
    pub quality_distribution: QualityDistribution,
    pub stage_totals: StageTotals,
    pub trend_points: Vec<TrendPoint>,
    pub recent_sessions: Vec<SleepSession>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgressReport {
    pub goal: SleepGoal,
    pub progress: u8,
    pub achieved: bool,
}

/// Builds the dashboard, analytics and goal views from stored data.
///
/// Clock-dependent values (consistency hours, day phase, goal progress)
/// are read in local time unless a reference time is passed to the `_at`
/// variants.
#[derive(Clone)]
pub struct AnalyticsService {
    sessions: Arc<dyn SessionRepository>,
    goals: Arc<dyn GoalRepository>,
}

impl AnalyticsService {
    pub fn new(sessions: Arc<dyn SessionRepository>, goals: Arc<dyn GoalRepository>) -> Self {
        Self { sessions, goals }
    }

    pub async fn dashboard(&self, user_id: Option<i64>) -> Result<DashboardStats> {
        self.dashboard_at(user_id, &Local::now()).await
    }

    pub async fn dashboard_at<Tz: TimeZone>(
        &self,
        user_id: Option<i64>,
        now: &DateTime<Tz>,
    ) -> Result<DashboardStats> {
        let sessions = self.sessions.list_sessions(user_id).await?;
        log_debug!("Building dashboard from {} sessions", sessions.len());
        let day_phase = DayPhase::at(now);

        if sessions.is_empty() {
            return Ok(DashboardStats {
                total_sessions: 0,
                average_duration: 0.0,
                average_quality: SleepQuality::default(),
                total_sleep_time: 0.0,
                consistency_score: 0,
                best_sleep_time: stats::format_minutes(0.0),
                worst_sleep_time: stats::format_minutes(0.0),
                trend: SleepTrend::Stable,
                recent_activity: Vec::new(),
                day_phase,
                status_message: day_phase.message().to_string(),
            });
        }

        let best = stats::duration(stats::best_session(&sessions)?)?;
        let worst = stats::duration(stats::worst_session(&sessions)?)?;

        Ok(DashboardStats {
            total_sessions: sessions.len(),
            average_duration: stats::average_duration(&sessions)?.round(),
            average_quality: stats::average_quality(&sessions),
            total_sleep_time: stats::total_duration(&sessions)?,
            consistency_score: stats::consistency_score_in(&sessions, &now.timezone()),
            best_sleep_time: stats::format_minutes(best),
            worst_sleep_time: stats::format_minutes(worst),
            trend: stats::sleep_trend(&sessions)?,
            recent_activity: stats::recent_activity(&sessions, DASHBOARD_RECENT)
                .cloned()
                .collect(),
            day_phase,
            status_message: day_phase.message().to_string(),
        })
    }

    pub async fn analytics(&self, user_id: Option<i64>, range: TimeRange) -> Result<AnalyticsReport> {
        self.analytics_at(user_id, range, Utc::now()).await
    }

    pub async fn analytics_at(
        &self,
        user_id: Option<i64>,
        range: TimeRange,
        now: DateTime<Utc>,
    ) -> Result<AnalyticsReport> {
        let all = self.sessions.list_sessions(user_id).await?;
        let sessions = range.filter(&all, now);

        Ok(AnalyticsReport {
            range,
            session_count: sessions.len(),
            average_duration: stats::average_duration(&sessions)?.round(),
            average_quality: stats::average_quality(&sessions),
            average_efficiency: stats::average_efficiency(&sessions)?,
            quality_distribution: stats::quality_distribution(&sessions),
            stage_totals: stats::stage_totals(&sessions),
            trend_points: stats::trend_points(&sessions)?,
            recent_sessions: stats::recent_activity(&sessions, ANALYTICS_RECENT)
                .cloned()
                .collect(),
        })
    }

    pub async fn goal_progress(&self) -> Result<Vec<GoalProgressReport>> {
        self.goal_progress_at(&Local::now()).await
    }

    pub async fn goal_progress_at<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
    ) -> Result<Vec<GoalProgressReport>> {
        let goals = self.goals.list_goals().await?;
        Ok(goals
            .into_iter()
            .map(|goal| {
                let progress = stats::goal_progress(&goal, now);
                GoalProgressReport {
                    achieved: progress == 100,
                    progress,
                    goal,
                }
            })
            .collect())
    }
}
