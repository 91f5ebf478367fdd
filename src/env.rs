//! Update Environment
//!
//! Snapshot of the page inputs `update` reads, taken at dispatch time.

use crate::config::DEFAULT_DOUBLE_CLICK_MS;
use crate::models::ROUTE_ALL;

/// The open edit field of an item
#[derive(Debug, Clone, PartialEq)]
pub struct EditField {
    pub id: u32,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Env {
    /// Contents of the new-item input
    pub input: String,
    pub edit: Option<EditField>,
    /// Current location fragment
    pub hash: String,
    /// Milliseconds since epoch
    pub now: f64,
    pub double_click_ms: f64,
}

impl Default for Env {
    fn default() -> Self {
        Self {
            input: String::new(),
            edit: None,
            hash: ROUTE_ALL.to_string(),
            now: 0.0,
            double_click_ms: DEFAULT_DOUBLE_CLICK_MS,
        }
    }
}

impl Env {
    pub fn at(now: f64) -> Self {
        Self { now, ..Self::default() }
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = input.into();
        self
    }

    pub fn with_edit(mut self, id: u32, value: impl Into<String>) -> Self {
        self.edit = Some(EditField { id, value: value.into() });
        self
    }

    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = hash.into();
        self
    }
}
