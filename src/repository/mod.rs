//! Storage seams used by the services.
//!
//! The desktop app backs these with SQLite ([`Database`]) and the JSON goal
//! file ([`crate::goals::GoalStore`]); tests use [`MemoryRepository`].

mod memory;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::db::{
    models::{GoalInput, NewSleepSession, NewUser, SleepGoal, SleepSession, User},
    Database,
};

pub use memory::MemoryRepository;

/// Source of recorded sleep sessions.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Sessions in insertion order, oldest first. `None` returns every user's.
    async fn list_sessions(&self, user_id: Option<i64>) -> Result<Vec<SleepSession>>;

    /// Validates and stores a new session, returning the stored record.
    async fn create_session(&self, input: NewSleepSession) -> Result<SleepSession>;
}

#[async_trait]
pub trait GoalRepository: Send + Sync {
    async fn list_goals(&self) -> Result<Vec<SleepGoal>>;

    async fn create_goal(&self, input: GoalInput) -> Result<SleepGoal>;

    /// `Ok(None)` when no goal has `goal_id`.
    async fn update_goal(&self, goal_id: &str, input: GoalInput) -> Result<Option<SleepGoal>>;

    /// Returns whether a goal was removed.
    async fn delete_goal(&self, goal_id: &str) -> Result<bool>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>>;

    async fn create_user(&self, input: NewUser) -> Result<User>;
}

pub(crate) fn new_session_record(input: NewSleepSession) -> Result<SleepSession> {
    Ok(input.into_session(Uuid::new_v4().to_string(), Utc::now())?)
}

#[async_trait]
impl SessionRepository for Database {
    async fn list_sessions(&self, user_id: Option<i64>) -> Result<Vec<SleepSession>> {
        Database::list_sessions(self, user_id).await
    }

    async fn create_session(&self, input: NewSleepSession) -> Result<SleepSession> {
        let session = new_session_record(input)?;
        self.insert_session(&session).await?;
        Ok(session)
    }
}

#[async_trait]
impl UserRepository for Database {
    async fn list_users(&self) -> Result<Vec<User>> {
        Database::list_users(self).await
    }

    async fn create_user(&self, input: NewUser) -> Result<User> {
        Database::create_user(self, input).await
    }
}
