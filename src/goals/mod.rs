#[cfg(feature = "desktop")]
pub mod commands;
mod store;

pub use store::GoalStore;
