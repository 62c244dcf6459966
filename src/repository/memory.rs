//! In-memory repository for tests and headless runs.

use std::sync::{Arc, RwLock};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{new_session_record, GoalRepository, SessionRepository, UserRepository};
use crate::db::models::{GoalInput, NewSleepSession, NewUser, SleepGoal, SleepSession, User};

#[derive(Default)]
struct MemoryData {
    sessions: Vec<SleepSession>,
    goals: Vec<SleepGoal>,
    users: Vec<User>,
}

/// Implements every repository trait over plain vectors. Clones share data.
#[derive(Clone, Default)]
pub struct MemoryRepository {
    data: Arc<RwLock<MemoryData>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-filled with `sessions`, kept in the given order.
    pub fn with_sessions(sessions: Vec<SleepSession>) -> Self {
        let repo = Self::new();
        if let Ok(mut data) = repo.data.write() {
            data.sessions = sessions;
        }
        repo
    }

    fn read<T>(&self, f: impl FnOnce(&MemoryData) -> T) -> Result<T> {
        let guard = self
            .data
            .read()
            .map_err(|_| anyhow!("memory repository lock poisoned"))?;
        Ok(f(&guard))
    }

    fn write<T>(&self, f: impl FnOnce(&mut MemoryData) -> Result<T>) -> Result<T> {
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow!("memory repository lock poisoned"))?;
        f(&mut guard)
    }
}

#[async_trait]
impl SessionRepository for MemoryRepository {
    async fn list_sessions(&self, user_id: Option<i64>) -> Result<Vec<SleepSession>> {
        self.read(|data| {
            data.sessions
                .iter()
                .filter(|s| user_id.is_none() || s.user_id == user_id)
                .cloned()
                .collect()
        })
    }

    async fn create_session(&self, input: NewSleepSession) -> Result<SleepSession> {
        let session = new_session_record(input)?;
        self.write(|data| {
            data.sessions.push(session.clone());
            Ok(session)
        })
    }
}

#[async_trait]
impl GoalRepository for MemoryRepository {
    async fn list_goals(&self) -> Result<Vec<SleepGoal>> {
        self.read(|data| data.goals.clone())
    }

    async fn create_goal(&self, input: GoalInput) -> Result<SleepGoal> {
        let goal = input.into_goal(Uuid::new_v4().to_string(), Utc::now())?;
        self.write(|data| {
            data.goals.push(goal.clone());
            Ok(goal)
        })
    }

    async fn update_goal(&self, goal_id: &str, input: GoalInput) -> Result<Option<SleepGoal>> {
        self.write(|data| {
            let Some(slot) = data.goals.iter_mut().find(|g| g.id == goal_id) else {
                return Ok(None);
            };
            *slot = input.apply_to(slot, Utc::now())?;
            Ok(Some(slot.clone()))
        })
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<bool> {
        self.write(|data| {
            let before = data.goals.len();
            data.goals.retain(|g| g.id != goal_id);
            Ok(data.goals.len() != before)
        })
    }
}

#[async_trait]
impl UserRepository for MemoryRepository {
    async fn list_users(&self) -> Result<Vec<User>> {
        self.read(|data| data.users.clone())
    }

    async fn create_user(&self, input: NewUser) -> Result<User> {
        input.validate()?;
        self.write(|data| {
            let user = User {
                id: data.users.last().map_or(1, |u| u.id + 1),
                name: input.name,
                email: input.email,
                created_at: Utc::now(),
            };
            data.users.push(user.clone());
            Ok(user)
        })
    }
}
