use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Ordinal sleep quality rating, stored as lowercase text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum SleepQuality {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl SleepQuality {
    pub const ALL: [SleepQuality; 4] = [
        SleepQuality::Poor,
        SleepQuality::Fair,
        SleepQuality::Good,
        SleepQuality::Excellent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SleepQuality::Poor => "poor",
            SleepQuality::Fair => "fair",
            SleepQuality::Good => "good",
            SleepQuality::Excellent => "excellent",
        }
    }

    /// Scoring value used for averaging: poor=1 .. excellent=4.
    pub fn score(self) -> u8 {
        match self {
            SleepQuality::Poor => 1,
            SleepQuality::Fair => 2,
            SleepQuality::Good => 3,
            SleepQuality::Excellent => 4,
        }
    }

    /// Buckets a (possibly fractional) score back into a rating.
    ///
    /// Thresholds: >= 3.5 excellent, >= 2.5 good, >= 1.5 fair, otherwise poor.
    /// NaN falls through to poor.
    pub fn from_score(score: f64) -> Self {
        if score >= 3.5 {
            SleepQuality::Excellent
        } else if score >= 2.5 {
            SleepQuality::Good
        } else if score >= 1.5 {
            SleepQuality::Fair
        } else {
            SleepQuality::Poor
        }
    }

    /// Display color for the rating.
    pub fn display_color(self) -> &'static str {
        match self {
            SleepQuality::Excellent => "#10b981",
            SleepQuality::Good => "#3b82f6",
            SleepQuality::Fair => "#f59e0b",
            SleepQuality::Poor => "#ef4444",
        }
    }
}

impl Default for SleepQuality {
    fn default() -> Self {
        SleepQuality::Good
    }
}

impl fmt::Display for SleepQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SleepQuality {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "poor" => Ok(SleepQuality::Poor),
            "fair" => Ok(SleepQuality::Fair),
            "good" => Ok(SleepQuality::Good),
            "excellent" => Ok(SleepQuality::Excellent),
            other => Err(ValidationError::UnknownQuality(other.to_string())),
        }
    }
}
