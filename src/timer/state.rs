use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum TimerStatus {
    #[default]
    Idle,
    Tracking,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub status: TimerStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub elapsed_secs: u64,
    /// Monotonic start of the current run; wall-clock changes do not move it.
    #[serde(skip)]
    pub running_anchor: Option<Instant>,
}

impl TimerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_tracking(&self) -> bool {
        self.status == TimerStatus::Tracking
    }

    pub fn current_elapsed_secs(&self) -> u64 {
        match (self.status, self.running_anchor) {
            (TimerStatus::Tracking, Some(anchor)) => anchor.elapsed().as_secs(),
            _ => self.elapsed_secs,
        }
    }

    pub fn sync_elapsed_from_anchor(&mut self) {
        self.elapsed_secs = self.current_elapsed_secs();
    }

    pub fn begin(&mut self, started_at: DateTime<Utc>, now: Instant) {
        *self = Self {
            status: TimerStatus::Tracking,
            started_at: Some(started_at),
            elapsed_secs: 0,
            running_anchor: Some(now),
        };
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Formats seconds as zero-padded "HH:MM:SS". Hours are not capped at 24.
pub fn format_elapsed(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}
