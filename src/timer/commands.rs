use tauri::State;

use crate::{
    db::models::SleepSession,
    timer::{SessionDetails, SleepTimer, TimerSnapshot},
    AppState,
};

fn timer_from_state(state: &State<'_, AppState>) -> SleepTimer {
    state.timer.clone()
}

#[tauri::command]
pub async fn get_timer_state(state: State<'_, AppState>) -> Result<TimerSnapshot, String> {
    Ok(timer_from_state(&state).get_snapshot().await)
}

#[tauri::command]
pub async fn start_tracking(state: State<'_, AppState>) -> Result<TimerSnapshot, String> {
    timer_from_state(&state)
        .start_tracking()
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn stop_tracking(
    state: State<'_, AppState>,
    details: SessionDetails,
) -> Result<SleepSession, String> {
    timer_from_state(&state)
        .stop_tracking(details)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn cancel_tracking(state: State<'_, AppState>) -> Result<TimerSnapshot, String> {
    timer_from_state(&state)
        .cancel_tracking()
        .await
        .map_err(|e| e.to_string())
}
