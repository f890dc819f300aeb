//! Once-only domain warnings.
//!
//! Ingestion reports data-quality problems (unrecognized status strings,
//! non-numeric quantities, unparseable dates) through a [`WarningRegistry`]
//! owned by the caller. Each distinct key is logged at most once per
//! registry, and a registry can be reset between runs.

use dashmap::DashSet;
use tracing::warn;

#[derive(Debug)]
pub struct WarningRegistry {
    seen: DashSet<String>,
    enabled: bool,
}

impl Default for WarningRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WarningRegistry {
    pub fn new() -> Self {
        Self {
            seen: DashSet::new(),
            enabled: true,
        }
    }

    /// A registry that records keys but never logs.
    pub fn disabled() -> Self {
        Self {
            seen: DashSet::new(),
            enabled: false,
        }
    }

    pub fn from_config(config: &crate::config::AppConfig) -> Self {
        if config.warn_unrecognized {
            Self::new()
        } else {
            Self::disabled()
        }
    }

    /// Logs `message` under `key` unless that key was already reported.
    /// Returns true when this call was the first for the key.
    pub fn warn_once(&self, key: impl Into<String>, message: &str) -> bool {
        let key = key.into();
        if !self.seen.insert(key.clone()) {
            return false;
        }
        if self.enabled {
            warn!(warning_key = %key, "{}", message);
        }
        true
    }

    pub fn has_warned(&self, key: &str) -> bool {
        self.seen.contains(key)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn reset(&self) {
        self.seen.clear();
    }
}
