use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::db::models::SleepGoal;

/// Coarse phase of the day used for the dashboard greeting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DayPhase {
    /// 22:00 to 05:59
    Sleeping,
    /// 06:00 to 09:59
    Morning,
    Awake,
}

impl DayPhase {
    pub fn at(now: &impl Timelike) -> Self {
        match now.hour() {
            h if h >= 22 || h < 6 => DayPhase::Sleeping,
            h if h < 10 => DayPhase::Morning,
            _ => DayPhase::Awake,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            DayPhase::Sleeping => "Time to sleep",
            DayPhase::Morning => "Good morning!",
            DayPhase::Awake => "Stay active",
        }
    }
}

fn clock(now: &impl Timelike) -> String {
    format!("{:02}:{:02}", now.hour(), now.minute())
}

/// Time-of-day progress placeholder for a goal: 25, 50 or 100.
///
/// Compares zero-padded "HH:MM" strings, evaluated in this order:
/// bedtime <= now <= wake gives 50, now >= wake gives 100, anything else
/// 25. String order only matches clock order inside a single day, so a
/// goal whose wake time is past midnight never reports 50: with bedtime
/// 22:00 and wake 06:00, 23:00 gives 100 and 05:00 gives 25.
pub fn goal_progress(goal: &SleepGoal, now: &impl Timelike) -> u8 {
    let current = clock(now);
    let current = current.as_str();
    let bedtime = goal.target_bedtime.as_str();
    let wake = goal.target_wake_time.as_str();

    if bedtime <= current && current <= wake {
        50
    } else if current >= wake {
        100
    } else {
        25
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::SleepQuality;
    use chrono::{NaiveTime, TimeZone, Utc};

    fn goal(bedtime: &str, wake: &str) -> SleepGoal {
        let now = Utc::now();
        SleepGoal {
            id: "g".into(),
            target_duration: 8.0,
            target_bedtime: bedtime.into(),
            target_wake_time: wake.into(),
            quality_target: SleepQuality::Good,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn same_day_window_bands() {
        let g = goal("01:00", "09:00");
        assert_eq!(goal_progress(&g, &time(0, 30)), 25);
        assert_eq!(goal_progress(&g, &time(1, 0)), 50);
        assert_eq!(goal_progress(&g, &time(9, 0)), 50);
        assert_eq!(goal_progress(&g, &time(9, 1)), 100);
    }

    #[test]
    fn midnight_wrap_follows_string_order() {
        let g = goal("22:00", "06:00");
        // "22:00" <= "23:00" but "23:00" > "06:00"; then "23:00" >= "06:00".
        assert_eq!(goal_progress(&g, &time(23, 0)), 100);
        // "05:00" < "22:00" and "05:00" < "06:00".
        assert_eq!(goal_progress(&g, &time(5, 0)), 25);
        assert_eq!(goal_progress(&g, &time(6, 0)), 100);
        assert_eq!(goal_progress(&g, &time(12, 0)), 100);
    }

    #[test]
    fn accepts_datetimes() {
        let g = goal("22:00", "23:30");
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 22, 15, 0).unwrap();
        assert_eq!(goal_progress(&g, &now), 50);
    }

    #[test]
    fn day_phase_boundaries() {
        assert_eq!(DayPhase::at(&time(22, 0)), DayPhase::Sleeping);
        assert_eq!(DayPhase::at(&time(5, 59)), DayPhase::Sleeping);
        assert_eq!(DayPhase::at(&time(6, 0)), DayPhase::Morning);
        assert_eq!(DayPhase::at(&time(9, 59)), DayPhase::Morning);
        assert_eq!(DayPhase::at(&time(10, 0)), DayPhase::Awake);
        assert_eq!(DayPhase::at(&time(21, 59)), DayPhase::Awake);
    }
}
