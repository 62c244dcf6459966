//! Backend of the SleepTrack desktop app.
//!
//! [`stats`] holds the pure statistics over recorded sleep sessions. The
//! rest stores sessions, users and goals, runs the sleep timer, and
//! assembles dashboard and analytics reports. The Tauri shell is compiled
//! with the `desktop` feature.

pub mod analytics;
pub mod config;
pub mod db;
pub mod error;
pub mod goals;
pub mod repository;
#[cfg(feature = "desktop")]
mod session_commands;
pub mod stats;
pub mod timer;
mod utils;

#[cfg(feature = "desktop")]
pub use desktop::run;

#[cfg(feature = "desktop")]
mod desktop {
    use std::sync::Arc;

    use tauri::Manager;

    use crate::{
        analytics::{
            commands::{get_analytics, get_dashboard, get_goal_progress},
            AnalyticsService,
        },
        config::AppConfig,
        db::Database,
        goals::{
            commands::{create_goal, delete_goal, list_goals, update_goal},
            GoalStore,
        },
        session_commands::{create_sleep_session, create_user, list_sleep_sessions, list_users},
        timer::{
            commands::{cancel_tracking, get_timer_state, start_tracking, stop_tracking},
            SleepTimer,
        },
    };

    pub(crate) struct AppState {
        pub(crate) db: Database,
        pub(crate) goals: Arc<GoalStore>,
        pub(crate) timer: SleepTimer,
        pub(crate) analytics: AnalyticsService,
    }

    #[cfg_attr(mobile, tauri::mobile_entry_point)]
    pub fn run() {
        tauri::Builder::default()
            .plugin(tauri_plugin_opener::init())
            .setup(|app| {
                let result = (|| -> anyhow::Result<()> {
                    let app_data_dir = app
                        .path()
                        .app_data_dir()
                        .map_err(|err| anyhow::anyhow!(err))?;
                    let config = AppConfig::from_env(app_data_dir);

                    // Initialize logging once the config is known (reads RUST_LOG env var)
                    env_logger::Builder::from_default_env()
                        .filter_level(config.log_level())
                        .init();
                    log::info!("SleepTrack starting up...");

                    std::fs::create_dir_all(config.data_dir())?;
                    log::info!("Using data directory {}", config.data_dir().display());

                    let database = Database::new(config.database_path())?;
                    let goals = Arc::new(GoalStore::new(config.goals_path())?);

                    let timer = SleepTimer::new(
                        Arc::new(database.clone()),
                        Arc::new(app.handle().clone()),
                    );
                    let analytics = AnalyticsService::new(Arc::new(database.clone()), goals.clone());

                    app.manage(AppState {
                        db: database,
                        goals,
                        timer,
                        analytics,
                    });

                    Ok(())
                })();

                result.map_err(|err| err.into())
            })
            .invoke_handler(tauri::generate_handler![
                list_sleep_sessions,
                create_sleep_session,
                list_users,
                create_user,
                list_goals,
                create_goal,
                update_goal,
                delete_goal,
                get_dashboard,
                get_analytics,
                get_goal_progress,
                get_timer_state,
                start_tracking,
                stop_tracking,
                cancel_tracking,
            ])
            .run(tauri::generate_context!())
            .expect("error while running tauri application");
    }
}

#[cfg(feature = "desktop")]
pub(crate) use desktop::AppState;
