#[cfg(feature = "desktop")]
pub mod commands;
pub mod controller;
pub mod state;

pub use controller::{
    NoopEvents, SessionDetails, SleepTimer, TimerEvent, TimerEventSink, TimerSnapshot,
    SESSION_SAVED_EVENT, TIMER_CHANGED_EVENT, TIMER_TICK_EVENT,
};
pub use state::{format_elapsed, TimerState, TimerStatus};
