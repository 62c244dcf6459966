//! Typed errors for the stats engine and for input validation.
//!
//! Storage and command layers keep using `anyhow`; these enums cover the
//! cases callers are expected to match on.

use thiserror::Error;

/// Errors raised by the stats engine on malformed or unusable input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StatsError {
    /// A session whose end does not strictly follow its start.
    #[error("session {id} ends at or before it starts")]
    InvalidTimeRange { id: String },

    /// The operation has no meaningful answer for an empty collection.
    #[error("operation requires at least one session")]
    EmptyCollection,
}

/// Errors raised when validating user input before it reaches storage.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("end time must be after start time")]
    InvertedTimeRange,

    #[error("{field} must not be negative (got {value})")]
    NegativeMinutes { field: &'static str, value: i64 },

    #[error("{field} is too large (got {value})")]
    MinutesOutOfRange { field: &'static str, value: i64 },

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} must be a HH:MM time of day (got '{value}')")]
    InvalidTimeOfDay { field: &'static str, value: String },

    #[error("target duration must be greater than zero (got {0})")]
    NonPositiveDuration(f64),

    #[error("unknown sleep quality '{0}'")]
    UnknownQuality(String),
}

/// Failures of the SQLite store that callers may want to tell apart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The file was written by a newer build of the app.
    #[error("database schema version {found} is newer than this build supports ({supported})")]
    NewerSchema { found: i32, supported: i32 },

    /// The file carries another application's id.
    #[error("{path} is not a SleepTrack database (application_id {found:#x})")]
    ForeignDatabase { path: String, found: i32 },

    #[error("unknown migration target version {0}")]
    UnknownMigration(i32),

    /// The worker thread that owns the connection is gone.
    #[error("database worker is no longer running")]
    WorkerGone,
}
