//! Tauri commands for recorded sessions and users.

use tauri::State;

use crate::{
    db::models::{NewSleepSession, NewUser, SleepSession, User},
    repository::{SessionRepository, UserRepository},
    AppState,
};

#[tauri::command]
pub async fn list_sleep_sessions(
    state: State<'_, AppState>,
    user_id: Option<i64>,
) -> Result<Vec<SleepSession>, String> {
    state
        .db
        .list_sessions(user_id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn create_sleep_session(
    state: State<'_, AppState>,
    input: NewSleepSession,
) -> Result<SleepSession, String> {
    SessionRepository::create_session(&state.db, input)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn list_users(state: State<'_, AppState>) -> Result<Vec<User>, String> {
    UserRepository::list_users(&state.db)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn create_user(state: State<'_, AppState>, input: NewUser) -> Result<User, String> {
    UserRepository::create_user(&state.db, input)
        .await
        .map_err(|e| e.to_string())
}
