use tauri::State;

use crate::{
    analytics::{AnalyticsReport, DashboardStats, GoalProgressReport},
    stats::TimeRange,
    AppState,
};

#[tauri::command]
pub async fn get_dashboard(
    state: State<'_, AppState>,
    user_id: Option<i64>,
) -> Result<DashboardStats, String> {
    state
        .analytics
        .dashboard(user_id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_analytics(
    state: State<'_, AppState>,
    user_id: Option<i64>,
    range: Option<TimeRange>,
) -> Result<AnalyticsReport, String> {
    state
        .analytics
        .analytics(user_id, range.unwrap_or_default())
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_goal_progress(
    state: State<'_, AppState>,
) -> Result<Vec<GoalProgressReport>, String> {
    state
        .analytics
        .goal_progress()
        .await
        .map_err(|e| e.to_string())
}
