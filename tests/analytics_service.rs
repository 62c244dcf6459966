use std::sync::Arc;

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use sleeptrack_lib::{
    analytics::AnalyticsService,
    db::models::{GoalInput, SleepQuality, SleepSession},
    repository::{GoalRepository, MemoryRepository},
    stats::{DayPhase, SleepTrend, TimeRange},
};

fn session(id: &str, start: DateTime<Utc>, minutes: i64, quality: SleepQuality) -> SleepSession {
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

fn two_nights() -> Vec<SleepSession> {
    let mut first = session(
        "first",
        Utc.with_ymd_and_hms(2024, 3, 1, 22, 0, 0).unwrap(),
        480,
        SleepQuality::Good,
    );
    first.awake_time = 20;
    first.deep_sleep = 100;
    let mut second = session(
        "second",
        Utc.with_ymd_and_hms(2024, 3, 2, 23, 0, 0).unwrap(),
        420,
        SleepQuality::Excellent,
    );
    second.deep_sleep = 80;
    second.rem_sleep = 90;
    vec![first, second]
}

fn service(repo: &MemoryRepository) -> AnalyticsService {
    AnalyticsService::new(Arc::new(repo.clone()), Arc::new(repo.clone()))
}

#[tokio::test]
async fn dashboard_summarises_two_nights() {
    let repo = MemoryRepository::with_sessions(two_nights());
    let now = Utc.with_ymd_and_hms(2024, 3, 3, 8, 0, 0).unwrap();

    let stats = service(&repo).dashboard_at(None, &now).await.unwrap();

    assert_eq!(stats.total_sessions, 2);
    assert_eq!(stats.average_duration, 450.0);
    assert_eq!(stats.average_quality, SleepQuality::Excellent);
    assert_eq!(stats.total_sleep_time, 900.0);
    // start hours 22 and 23: stddev 0.5
    assert_eq!(stats.consistency_score, 98);
    assert_eq!(stats.best_sleep_time, "8h 0m");
    assert_eq!(stats.worst_sleep_time, "7h 0m");
    assert_eq!(stats.trend, SleepTrend::Improving);
    let recent: Vec<&str> = stats.recent_activity.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(recent, vec!["second", "first"]);
    assert_eq!(stats.day_phase, DayPhase::Morning);
    assert_eq!(stats.status_message, "Good morning!");
}

#[tokio::test]
async fn dashboard_reads_hours_in_the_callers_zone() {
    let repo = MemoryRepository::with_sessions(two_nights());
    let plus_one = FixedOffset::east_opt(3600).unwrap();
    let now = plus_one.with_ymd_and_hms(2024, 3, 3, 23, 30, 0).unwrap();

    let stats = service(&repo).dashboard_at(None, &now).await.unwrap();

    // 23:00 and 00:00 local: stddev 11.5
    assert_eq!(stats.consistency_score, 43);
    assert_eq!(stats.day_phase, DayPhase::Sleeping);
}

#[tokio::test]
async fn empty_dashboard_uses_placeholders() {
    let repo = MemoryRepository::new();
    let now = Utc.with_ymd_and_hms(2024, 3, 3, 15, 0, 0).unwrap();

    let stats = service(&repo).dashboard_at(None, &now).await.unwrap();

    assert_eq!(stats.total_sessions, 0);
    assert_eq!(stats.average_duration, 0.0);
    assert_eq!(stats.average_quality, SleepQuality::Good);
    assert_eq!(stats.consistency_score, 0);
    assert_eq!(stats.best_sleep_time, "0h 0m");
    assert_eq!(stats.trend, SleepTrend::Stable);
    assert!(stats.recent_activity.is_empty());
    assert_eq!(stats.day_phase, DayPhase::Awake);
}

#[tokio::test]
async fn analytics_respects_time_range() {
    let repo = MemoryRepository::with_sessions(two_nights());
    let svc = service(&repo);
    let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();

    let week = svc.analytics_at(None, TimeRange::Week, now).await.unwrap();
    assert_eq!(week.session_count, 0);
    assert_eq!(week.average_efficiency, 0);
    assert_eq!(week.average_quality, SleepQuality::Good);
    assert!(week.trend_points.is_empty());

    let month = svc.analytics_at(None, TimeRange::Month, now).await.unwrap();
    assert_eq!(month.session_count, 2);
    assert_eq!(month.average_duration, 450.0);
    // 480 / 500 = 96% and 100%
    assert_eq!(month.average_efficiency, 98);
    assert_eq!(month.quality_distribution.good, 1);
    assert_eq!(month.quality_distribution.excellent, 1);
    assert_eq!(month.stage_totals.deep, 180);
    assert_eq!(month.stage_totals.rem, 90);
    assert_eq!(month.stage_totals.awake, 20);
    assert_eq!(month.trend_points[0].efficiency, 96);
    assert_eq!(month.recent_sessions[0].id, "second");
}

#[tokio::test]
async fn goal_progress_follows_clock_order() {
    let repo = MemoryRepository::new();
    let overnight = repo
        .create_goal(GoalInput {
            target_duration: Some(8.0),
            target_bedtime: Some("22:00".into()),
            target_wake_time: Some("06:00".into()),
            quality_target: Some(SleepQuality::Good),
            is_active: None,
        })
        .await
        .unwrap();
    repo.create_goal(GoalInput {
        target_duration: Some(8.0),
        target_bedtime: Some("01:00".into()),
        target_wake_time: Some("09:00".into()),
        quality_target: Some(SleepQuality::Excellent),
        is_active: None,
    })
    .await
    .unwrap();

    let late = Utc.with_ymd_and_hms(2024, 3, 3, 23, 0, 0).unwrap();
    let reports = service(&repo).goal_progress_at(&late).await.unwrap();
    assert_eq!(reports[0].goal.id, overnight.id);
    assert_eq!(reports[0].progress, 100);
    assert!(reports[0].achieved);
    assert_eq!(reports[1].progress, 100);

    let early = Utc.with_ymd_and_hms(2024, 3, 3, 5, 0, 0).unwrap();
    let reports = service(&repo).goal_progress_at(&early).await.unwrap();
    assert_eq!(reports[0].progress, 25);
    assert_eq!(reports[1].progress, 50);
    assert!(!reports[1].achieved);
}
