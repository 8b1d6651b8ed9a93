//! Settings persistence.
//!
//! Timer settings live in the platform config directory under the app name
//! `apnea`. Loading never fails: a missing or corrupt file falls back to
//! defaults, and loaded values are clamped into their valid ranges.

use apnea_types::TimerSettings;
use thiserror::Error;

const APP_NAME: &str = "apnea";

/// Errors during configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration")]
    Load(#[from] confy::ConfyError),

    #[error("failed to save configuration")]
    Save(#[source] confy::ConfyError),
}

/// Load settings, falling back to defaults.
pub fn load_settings() -> TimerSettings {
    let settings: TimerSettings = confy::load(APP_NAME, None).unwrap_or_default();
    settings.clamped()
}

/// Persist settings to the config directory.
pub fn save_settings(settings: &TimerSettings) -> Result<(), ConfigError> {
    confy::store(APP_NAME, None, settings.clone()).map_err(ConfigError::Save)
}
