use std::{
    env,
    path::{Path, PathBuf},
};

pub const DATA_DIR_ENV: &str = "SLEEPTRACK_DATA_DIR";
pub const DEBUG_ENV: &str = "SLEEPTRACK_DEBUG";

const DATABASE_FILE: &str = "sleeptrack.sqlite3";
const GOALS_FILE: &str = "goals.json";

fn parse_flag(value: Option<String>) -> bool {
    value
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Where the app keeps its files and how chatty it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub debug: bool,
}

impl AppConfig {
    /// Resolves the config from the process environment, falling back to
    /// `default_data_dir` when `SLEEPTRACK_DATA_DIR` is unset or empty.
    pub fn from_env(default_data_dir: PathBuf) -> Self {
        Self::from_lookup(default_data_dir, |key| env::var(key).ok())
    }

    fn from_lookup(default_data_dir: PathBuf, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = lookup(DATA_DIR_ENV)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(default_data_dir);

        Self {
            data_dir,
            debug: parse_flag(lookup(DEBUG_ENV)),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }

    pub fn goals_path(&self) -> PathBuf {
        self.data_dir.join(GOALS_FILE)
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}
