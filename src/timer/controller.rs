use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{sync::Mutex, task::JoinHandle, time};

use super::state::{format_elapsed, TimerState, TimerStatus};
use crate::db::models::{NewSleepSession, SleepQuality, SleepSession};
use crate::repository::SessionRepository;
use crate::{log_debug, log_info};

const ENABLE_LOGS: bool = true;

pub const TIMER_CHANGED_EVENT: &str = "sleep-timer-changed";
pub const TIMER_TICK_EVENT: &str = "sleep-timer-tick";
pub const SESSION_SAVED_EVENT: &str = "sleep-session-saved";

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub state: TimerState,
    /// "HH:MM:SS"
    pub display: String,
}

impl TimerSnapshot {
    fn of(state: &TimerState) -> Self {
        Self {
            display: format_elapsed(state.elapsed_secs),
            state: state.clone(),
        }
    }
}

/// What the user fills in after waking up. `quality` is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDetails {
    pub user_id: Option<i64>,
    pub quality: Option<SleepQuality>,
    pub deep_sleep: Option<i64>,
    pub light_sleep: Option<i64>,
    pub rem_sleep: Option<i64>,
    pub awake_time: Option<i64>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl SessionDetails {
    /// Session input for a run from `start` to `end`. The stored duration
    /// is the elapsed time in whole minutes, rounded down.
    pub fn into_new_session(self, start: DateTime<Utc>, end: DateTime<Utc>) -> NewSleepSession {
        let minutes = (end - start).num_milliseconds().div_euclid(60_000);
        NewSleepSession {
            user_id: self.user_id,
            start_time: Some(start),
            end_time: Some(end),
            quality: self.quality,
            duration: Some(minutes),
            deep_sleep: self.deep_sleep,
            light_sleep: self.light_sleep,
            rem_sleep: self.rem_sleep,
            awake_time: self.awake_time,
            notes: self.notes,
            tags: self.tags,
        }
    }
}

#[derive(Debug, Clone)]
pub enum TimerEvent {
    Changed(TimerSnapshot),
    Tick(TimerSnapshot),
    SessionSaved(SleepSession),
}

impl TimerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TimerEvent::Changed(_) => TIMER_CHANGED_EVENT,
            TimerEvent::Tick(_) => TIMER_TICK_EVENT,
            TimerEvent::SessionSaved(_) => SESSION_SAVED_EVENT,
        }
    }
}

/// Receives timer notifications. The desktop app forwards them to the
/// webview; emit failures are the sink's concern.
pub trait TimerEventSink: Send + Sync {
    fn emit(&self, event: TimerEvent);
}

/// Discards every event.
pub struct NoopEvents;

impl TimerEventSink for NoopEvents {
    fn emit(&self, _event: TimerEvent) {}
}

#[cfg(feature = "desktop")]
impl TimerEventSink for tauri::AppHandle {
    fn emit(&self, event: TimerEvent) {
        use tauri::Emitter;

        let name = event.name();
        let result = match event {
            TimerEvent::Changed(snapshot) | TimerEvent::Tick(snapshot) => {
                Emitter::emit(self, name, snapshot)
            }
            TimerEvent::SessionSaved(session) => Emitter::emit(self, name, session),
        };
        if let Err(err) = result {
            crate::log_warn!("Failed to emit {name}: {err}");
        }
    }
}

/// Two-state sleep timer. Stopping a run stores a session.
#[derive(Clone)]
pub struct SleepTimer {
    state: Arc<Mutex<TimerState>>,
    sessions: Arc<dyn SessionRepository>,
    events: Arc<dyn TimerEventSink>,
    ticker: Arc<Mutex<Option<JoinHandle<()>>>>,
    tick_interval: Duration,
}

impl SleepTimer {
    pub fn new(sessions: Arc<dyn SessionRepository>, events: Arc<dyn TimerEventSink>) -> Self {
        Self {
            state: Arc::new(Mutex::new(TimerState::new())),
            sessions,
            events,
            ticker: Arc::new(Mutex::new(None)),
            tick_interval: Duration::from_secs(1),
        }
    }

    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    pub async fn get_snapshot(&self) -> TimerSnapshot {
        let mut guard = self.state.lock().await;
        guard.sync_elapsed_from_anchor();
        TimerSnapshot::of(&guard)
    }

    pub async fn start_tracking(&self) -> Result<TimerSnapshot> {
        let snapshot = {
            let mut state = self.state.lock().await;
            if state.is_tracking() {
                return Err(anyhow!("sleep tracking already active"));
            }
            state.begin(Utc::now(), Instant::now());
            TimerSnapshot::of(&state)
        };

        self.spawn_ticker().await;
        log_info!("Sleep tracking started");
        self.events.emit(TimerEvent::Changed(snapshot.clone()));
        Ok(snapshot)
    }

    /// Ends the run and stores it as a session. If the session is rejected
    /// the timer keeps tracking so the details can be corrected.
    pub async fn stop_tracking(&self, details: SessionDetails) -> Result<SleepSession> {
        let (session, snapshot) = {
            let mut state = self.state.lock().await;
            if !state.is_tracking() {
                return Err(anyhow!("no sleep tracking in progress"));
            }
            let started_at = state
                .started_at
                .ok_or_else(|| anyhow!("tracking state is missing its start time"))?;

            let input = details.into_new_session(started_at, Utc::now());
            let session = self.sessions.create_session(input).await?;

            state.reset();
            (session, TimerSnapshot::of(&state))
        };

        self.cancel_ticker().await;
        log_info!(
            "Sleep tracking stopped, saved session {} ({:?} min)",
            session.id,
            session.duration
        );

        self.events.emit(TimerEvent::Changed(snapshot));
        self.events.emit(TimerEvent::SessionSaved(session.clone()));
        Ok(session)
    }

    /// Discards the current run. A no-op when idle.
    pub async fn cancel_tracking(&self) -> Result<TimerSnapshot> {
        let snapshot = {
            let mut state = self.state.lock().await;
            if !state.is_tracking() {
                return Ok(TimerSnapshot::of(&state));
            }
            state.reset();
            TimerSnapshot::of(&state)
        };

        self.cancel_ticker().await;
        log_info!("Sleep tracking cancelled");
        self.events.emit(TimerEvent::Changed(snapshot.clone()));
        Ok(snapshot)
    }

    async fn spawn_ticker(&self) {
        let mut ticker_guard = self.ticker.lock().await;
        if let Some(handle) = ticker_guard.take() {
            handle.abort();
        }

        let state = self.state.clone();
        let events = self.events.clone();
        let tick_interval = self.tick_interval;

        let handle = tokio::spawn(async move {
            let mut interval = time::interval(tick_interval);
            // the first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;

                let snapshot = {
                    let mut guard = state.lock().await;
                    if guard.status != TimerStatus::Tracking {
                        break;
                    }
                    guard.sync_elapsed_from_anchor();
                    TimerSnapshot::of(&guard)
                };

                log_debug!("Sleep timer tick: {}", snapshot.display);
                events.emit(TimerEvent::Tick(snapshot));
            }
        });

        *ticker_guard = Some(handle);
    }

    async fn cancel_ticker(&self) {
        if let Some(handle) = self.ticker.lock().await.take() {
            handle.abort();
        }
    }
}
