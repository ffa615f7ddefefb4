use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

const DEFAULT_TIME_ZONE: &str = "UTC";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// IANA time zone of the facility. Decides which calendar date counts as
    /// "today" when validating assessment dates.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    /// Instrument ids offered to clinicians. Empty means all of them.
    #[serde(default)]
    pub enabled_instruments: Vec<String>,
}

fn default_time_zone() -> String {
    DEFAULT_TIME_ZONE.to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            time_zone: default_time_zone(),
            enabled_instruments: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// The facility's current civil date.
    pub fn today(&self) -> Result<jiff::civil::Date, CoreError> {
        self.date_at(jiff::Timestamp::now())
    }

    /// The facility's civil date at `instant`.
    pub fn date_at(&self, instant: jiff::Timestamp) -> Result<jiff::civil::Date, CoreError> {
        let tz = jiff::tz::TimeZone::get(&self.time_zone).map_err(|source| {
            CoreError::UnknownTimeZone {
                name: self.time_zone.clone(),
                source,
            }
        })?;
        Ok(instant.to_zoned(tz).date())
    }

    pub fn is_enabled(&self, instrument_id: &str) -> bool {
        self.enabled_instruments.is_empty()
            || self.enabled_instruments.iter().any(|id| id == instrument_id)
    }
}

pub fn load_config(path: &Path) -> Result<EngineConfig, CoreError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CoreError::ConfigIo {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&contents)
}

/// Parse a config document, running migrations before deserializing.
pub fn parse_config(contents: &str) -> Result<EngineConfig, CoreError> {
    let json: serde_json::Value = serde_json::from_str(contents)?;
    let on_disk_version = match json.get("config_version") {
        None | Some(serde_json::Value::Null) => 0,
        Some(raw) => raw
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| CoreError::InvalidConfig(format!("invalid config_version {raw}")))?,
    };

    let migrated = migrate(json, on_disk_version)?;
    let config: EngineConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> Result<serde_json::Value, CoreError> {
    if from_version > CURRENT_VERSION {
        return Err(CoreError::InvalidConfig(format!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION})"
        )));
    }

    // v0 → v1: `timezone` renamed to `time_zone`
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| CoreError::InvalidConfig("config is not a JSON object".to_string()))?;
        if let Some(tz) = obj.remove("timezone") {
            obj.entry("time_zone").or_insert(tz);
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (renamed timezone to time_zone)");
    }

    Ok(json)
}

/// Serialize with the current version stamped, regardless of what was loaded.
pub fn to_json(config: &EngineConfig) -> Result<String, CoreError> {
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    Ok(serde_json::to_string_pretty(&stamped)?)
}
