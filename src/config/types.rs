use std::time::Duration;

use serde::Deserialize;

use crate::error::ValidationError;

/// Settings a `fleetview.toml` / `fleetview.json` may provide. Anything set
/// explicitly on the command line or through the environment wins.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    pub tick_interval: Option<DurationValue>,
    pub completion_delay: Option<DurationValue>,
    #[serde(alias = "timeout")]
    pub request_timeout: Option<DurationValue>,
    pub no_ui: Option<bool>,
    pub no_color: Option<bool>,
    pub verbose: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => super::parse_duration_value(text),
        }
    }
}
