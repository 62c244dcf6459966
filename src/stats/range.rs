use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::db::models::SleepSession;

/// Lookback window for the analytics view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    #[default]
    Week,
    Month,
    Year,
    All,
}

impl TimeRange {
    pub fn days(self) -> Option<i64> {
        match self {
            TimeRange::Week => Some(7),
            TimeRange::Month => Some(30),
            TimeRange::Year => Some(365),
            TimeRange::All => None,
        }
    }

    /// Sessions that started within the window ending at `now`, in their
    /// original order.
    pub fn filter(self, sessions: &[SleepSession], now: DateTime<Utc>) -> Vec<SleepSession> {
        match self.days() {
            Some(days) => {
                let cutoff = now - Duration::days(days);
                sessions
                    .iter()
                    .filter(|s| s.start_time >= cutoff)
                    .cloned()
                    .collect()
            }
            None => sessions.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::SleepQuality;
    use crate::stats::test_support::{at, session};

    #[test]
    fn filters_by_start_time() {
        let now = at(12, 0);
        let sessions = vec![
            session("old", now - Duration::days(40), 60, SleepQuality::Good),
            session("edge", now - Duration::days(7), 60, SleepQuality::Good),
            session("month", now - Duration::days(20), 60, SleepQuality::Good),
            session("new", now - Duration::hours(10), 60, SleepQuality::Good),
        ];

        let ids = |range: TimeRange| -> Vec<String> {
            range
                .filter(&sessions, now)
                .into_iter()
                .map(|s| s.id)
                .collect()
        };

        assert_eq!(ids(TimeRange::Week), vec!["edge", "new"]);
        assert_eq!(ids(TimeRange::Month), vec!["edge", "month", "new"]);
        assert_eq!(ids(TimeRange::Year).len(), 4);
        assert_eq!(ids(TimeRange::All).len(), 4);
    }

    #[test]
    fn parses_lowercase() {
        let range: TimeRange = serde_json::from_str("\"month\"").unwrap();
        assert_eq!(range, TimeRange::Month);
    }
}
