use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};

use crate::db::models::SleepQuality;

pub fn to_u32(value: i64, field: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| anyhow!("{field} contains out-of-range value {value}"))
}

pub fn to_optional_u32(value: Option<i64>, field: &str) -> Result<Option<u32>> {
    value.map(|v| to_u32(v, field)).transpose()
}

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

pub fn parse_quality(value: &str) -> Result<SleepQuality> {
    value
        .parse()
        .map_err(|err| anyhow!("invalid quality column: {err}"))
}

pub fn parse_json_list<T: serde::de::DeserializeOwned>(value: &str, field: &str) -> Result<Vec<T>> {
    serde_json::from_str(value).with_context(|| format!("failed to parse {field}"))
}
