pub mod goal;
pub mod quality;
pub mod session;
pub mod user;

pub use goal::{GoalInput, SleepGoal};
pub use quality::SleepQuality;
pub use session::{NewSleepSession, SleepSession};
pub use user::{NewUser, User};
