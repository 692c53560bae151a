use std::time::Duration;

use serde::Deserialize;

use crate::args::parse_duration;
use crate::error::ValidationError;

/// Everything a config file may set. CLI values given explicitly win.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub username: Option<String>,
    pub timeout: Option<DurationValue>,
    pub refresh: Option<DurationValue>,
    pub history_limit: Option<u64>,
    pub window: Option<String>,
    pub custom_hours: Option<i64>,
    pub no_color: Option<bool>,
    pub verbose: Option<bool>,
}

/// Integer seconds or a suffixed duration string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(0) => Err(ValidationError::DurationZero),
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_duration(text),
        }
    }
}
