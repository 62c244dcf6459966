//! Logging macros gated by a per-module `ENABLE_LOGS` flag.
//!
//! A module opts in by declaring the flag next to its imports:
//!
//! ```ignore
//! const ENABLE_LOGS: bool = true;
//!
//! use crate::{log_info, log_warn};
//! log_info!("tracking started at {start}");
//! ```
//!
//! The flag is a `const`, so disabled calls compile away. Records still go
//! through the `log` facade and are filtered by `RUST_LOG` as usual.

#[doc(hidden)]
#[macro_export]
macro_rules! log_if_enabled {
    ($level:expr, $($arg:tt)*) => {
        if ENABLE_LOGS {
            log::log!($level, $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::log_if_enabled!(log::Level::Debug, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::log_if_enabled!(log::Level::Info, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::log_if_enabled!(log::Level::Warn, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::log_if_enabled!(log::Level::Error, $($arg)*)
    };
}
