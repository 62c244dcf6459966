use tauri::State;

use crate::{
    db::models::{GoalInput, SleepGoal},
    repository::GoalRepository,
    AppState,
};

#[tauri::command]
pub async fn list_goals(state: State<'_, AppState>) -> Result<Vec<SleepGoal>, String> {
    state.goals.list_goals().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn create_goal(state: State<'_, AppState>, input: GoalInput) -> Result<SleepGoal, String> {
    state
        .goals
        .create_goal(input)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn update_goal(
    state: State<'_, AppState>,
    goal_id: String,
    input: GoalInput,
) -> Result<SleepGoal, String> {
    state
        .goals
        .update_goal(&goal_id, input)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("goal {goal_id} not found"))
}

#[tauri::command]
pub async fn delete_goal(state: State<'_, AppState>, goal_id: String) -> Result<bool, String> {
    state
        .goals
        .delete_goal(&goal_id)
        .await
        .map_err(|e| e.to_string())
}
