/*!
 * Sink Configuration
 * Initial sizing, hard limits and printf options
 */

use crate::core::errors::SinkError;
use crate::core::limits::{
    DEFAULT_INITIAL_CAPACITY, ENV_INITIAL_CAPACITY, ENV_MAX_CAPACITY, ENV_STRICT_ARITY,
    MAX_SINK_CAPACITY,
};
use crate::core::types::{SinkResult, Size};
use crate::format::FormatOptions;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

/// Configuration for a [`StringSink`](crate::StringSink)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct SinkConfig {
    /// Bytes reserved up front
    pub initial_capacity: Size,
    /// Ceiling on the store size; growth beyond it is an allocation error
    pub max_capacity: Size,
    /// printf behavior
    pub format: FormatOptions,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_capacity: MAX_SINK_CAPACITY,
            format: FormatOptions::default(),
        }
    }
}

impl SinkConfig {
    pub fn with_initial_capacity(mut self, capacity: Size) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_max_capacity(mut self, capacity: Size) -> Self {
        self.max_capacity = capacity;
        self
    }

    pub fn with_format(mut self, format: FormatOptions) -> Self {
        self.format = format;
        self
    }

    /// Defaults overridden by `STRINGSINK_*` environment variables
    ///
    /// Environment variables:
    /// - STRINGSINK_INITIAL_CAPACITY: bytes reserved up front (default: 0)
    /// - STRINGSINK_MAX_CAPACITY: size ceiling in bytes (default: isize::MAX)
    /// - STRINGSINK_STRICT_ARITY: reject surplus printf arguments (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            initial_capacity: env_or(ENV_INITIAL_CAPACITY, defaults.initial_capacity),
            max_capacity: env_or(ENV_MAX_CAPACITY, defaults.max_capacity),
            format: FormatOptions {
                strict_arity: env_or(ENV_STRICT_ARITY, defaults.format.strict_arity),
            },
        }
    }

    pub fn validate(&self) -> SinkResult<()> {
        if self.initial_capacity > self.max_capacity {
            return Err(SinkError::argument(format!(
                "initial capacity {} exceeds max capacity {}",
                self.initial_capacity, self.max_capacity
            )));
        }
        Ok(())
    }
}

fn env_or<T: FromStr + Copy>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "Ignoring unparsable sink setting");
            default
        }),
        Err(_) => default,
    }
}
