use chrono::{Duration, TimeZone, Utc};
use sleeptrack_lib::{
    db::{
        models::{GoalInput, NewSleepSession, NewUser, SleepQuality},
        Database,
    },
    goals::GoalStore,
    repository::{GoalRepository, SessionRepository, UserRepository},
};

#[tokio::test]
async fn sessions_and_users_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sleeptrack.sqlite3");

    let (user, session) = {
        let db = Database::new(path.clone()).unwrap();
        let user = UserRepository::create_user(
            &db,
            NewUser {
                name: "Ada".into(),
                email: "ada@example.com".into(),
            },
        )
        .await
        .unwrap();

        let start = Utc.with_ymd_and_hms(2024, 3, 1, 22, 15, 0).unwrap();
        let session = SessionRepository::create_session(
            &db,
            NewSleepSession {
                user_id: Some(user.id),
                start_time: Some(start),
                end_time: Some(start + Duration::minutes(455)),
                quality: Some(SleepQuality::Fair),
                duration: Some(455),
                awake_time: Some(25),
                notes: Some("late coffee".into()),
                tags: Some(vec!["caffeine".into()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        (user, session)
    };

    let db = Database::new(path).unwrap();
    assert_eq!(UserRepository::list_users(&db).await.unwrap(), vec![user.clone()]);
    assert_eq!(
        SessionRepository::list_sessions(&db, Some(user.id)).await.unwrap(),
        vec![session.clone()]
    );
    assert!(SessionRepository::list_sessions(&db, Some(user.id + 1))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn negative_stage_minutes_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(dir.path().join("sleeptrack.sqlite3")).unwrap();

    let start = Utc.with_ymd_and_hms(2024, 3, 1, 22, 0, 0).unwrap();
    let err = SessionRepository::create_session(
        &db,
        NewSleepSession {
            start_time: Some(start),
            end_time: Some(start + Duration::hours(7)),
            quality: Some(SleepQuality::Poor),
            rem_sleep: Some(-5),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("remSleep"), "{err}");
}

#[tokio::test]
async fn goal_edits_are_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("goals.json");
    let store = GoalStore::new(path.clone()).unwrap();

    let goal = store
        .create_goal(GoalInput {
            target_duration: Some(7.5),
            target_bedtime: Some("23:00".into()),
            target_wake_time: Some("06:30".into()),
            quality_target: Some(SleepQuality::Good),
            is_active: None,
        })
        .await
        .unwrap();

    let edited = store
        .update_goal(
            &goal.id,
            GoalInput {
                target_duration: Some(8.0),
                target_bedtime: Some("22:30".into()),
                target_wake_time: Some("06:30".into()),
                quality_target: Some(SleepQuality::Excellent),
                is_active: Some(false),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(edited.created_at, goal.created_at);
    assert!(!edited.is_active);

    let reopened = GoalStore::new(path.clone()).unwrap();
    assert_eq!(reopened.list_goals().await.unwrap(), vec![edited.clone()]);

    assert!(reopened.delete_goal(&edited.id).await.unwrap());
    assert!(GoalStore::new(path).unwrap().list_goals().await.unwrap().is_empty());
}
