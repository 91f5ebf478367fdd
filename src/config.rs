//! App Configuration
//!
//! Optional overrides read from `<meta name="todo-config" content='{...}'>`.

use std::str::FromStr;

use log::{Level, LevelFilter};
use serde::Deserialize;

/// Double-click window for entering edit mode
pub const DEFAULT_DOUBLE_CLICK_MS: f64 = 300.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `log` level name: off, error, warn, info, debug, trace
    pub log_level: String,
    pub double_click_ms: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            double_click_ms: DEFAULT_DOUBLE_CLICK_MS,
        }
    }
}

impl Config {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Console log level; `None` when logging is switched off.
    /// Unrecognized names fall back to info.
    pub fn level(&self) -> Option<Level> {
        match LevelFilter::from_str(self.log_level.trim()) {
            Ok(filter) => filter.to_level(),
            Err(_) => Some(Level::Info),
        }
    }
}
