use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};
use uuid::Uuid;

use crate::db::models::{GoalInput, SleepGoal};
use crate::repository::GoalRepository;
use crate::{log_info, log_warn};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct GoalFile {
    goals: Vec<SleepGoal>,
}

/// Sleep goals kept in a small JSON file next to the database.
pub struct GoalStore {
    path: PathBuf,
    data: RwLock<GoalFile>,
}

impl GoalStore {
    /// Loads `path` if it exists. A file that fails to parse is logged and
    /// treated as empty; it is overwritten on the next change.
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read goals from {}", path.display()))?;
            match serde_json::from_str(&contents) {
                Ok(file) => file,
                Err(err) => {
                    log_warn!("Ignoring unreadable goal file {}: {err}", path.display());
                    GoalFile::default()
                }
            }
        } else {
            GoalFile::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn goals(&self) -> Result<Vec<SleepGoal>> {
        let guard = self
            .data
            .read()
            .map_err(|_| anyhow!("goal store lock poisoned"))?;
        Ok(guard.goals.clone())
    }

    /// Applies `change` to a copy of the goals and only keeps it if the
    /// file write succeeds.
    fn mutate<T>(&self, change: impl FnOnce(&mut Vec<SleepGoal>) -> Result<T>) -> Result<T> {
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow!("goal store lock poisoned"))?;
        let mut next = guard.clone();
        let result = change(&mut next.goals)?;
        self.persist(&next)?;
        *guard = next;
        Ok(result)
    }

    fn persist(&self, data: &GoalFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write goals to {}", self.path.display()))
    }
}

#[async_trait]
impl GoalRepository for GoalStore {
    async fn list_goals(&self) -> Result<Vec<SleepGoal>> {
        self.goals()
    }

    async fn create_goal(&self, input: GoalInput) -> Result<SleepGoal> {
        let goal = input.into_goal(Uuid::new_v4().to_string(), Utc::now())?;
        self.mutate(|goals| {
            goals.push(goal.clone());
            Ok(())
        })?;
        log_info!("Created sleep goal {}", goal.id);
        Ok(goal)
    }

    async fn update_goal(&self, goal_id: &str, input: GoalInput) -> Result<Option<SleepGoal>> {
        self.mutate(|goals| {
            let Some(slot) = goals.iter_mut().find(|g| g.id == goal_id) else {
                return Ok(None);
            };
            *slot = input.apply_to(slot, Utc::now())?;
            Ok(Some(slot.clone()))
        })
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<bool> {
        let removed = self.mutate(|goals| {
            let before = goals.len();
            goals.retain(|g| g.id != goal_id);
            Ok(goals.len() != before)
        })?;
        if removed {
            log_info!("Deleted sleep goal {goal_id}");
        }
        Ok(removed)
    }
}
