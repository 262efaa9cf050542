use serde::{Deserialize, Serialize};

use super::bookmark::UserId;

/// Top-level application settings container.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppSettings {
    pub general: GeneralSettings,
    pub display: DisplaySettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Users and storage location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralSettings {
    /// User ids registered with the store on startup, in dropdown order.
    pub users: Vec<String>,
    /// Overrides the platform data directory for the SQLite file.
    #[serde(default)]
    pub database_path: Option<String>,
}

impl GeneralSettings {
    pub fn user_ids(&self) -> Vec<UserId> {
        self.users.iter().map(|id| UserId::from(id.as_str())).collect()
    }
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            users: (1..=5).map(|n| n.to_string()).collect(),
            database_path: None,
        }
    }
}

/// How saved dates are shown in the results list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplaySettings {
    /// `chrono` strftime pattern.
    pub date_format: String,
    pub time_zone: TimeZoneMode,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            date_format: "%-m/%-d/%Y, %-I:%M:%S %p".to_string(),
            time_zone: TimeZoneMode::Local,
        }
    }
}

/// Time zone used when formatting saved dates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum TimeZoneMode {
    Local,
    Utc,
}

/// Log verbosity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    /// Default `tracing` filter directive, e.g. `info` or `shelfmark=debug`.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
