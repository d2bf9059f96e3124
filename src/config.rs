//! Conventions and tunables for the alignment session
//!
//! The marker characters are fixed by the upstream vocals export. The
//! remaining values have defaults that a UI can override via `SessionConfig`.

use serde::{Deserialize, Serialize};
use crate::errors::LyricError;

/// Trailing marker on a lyric that closes a lyric line
pub const LINE_END_MARKER: char = '+';

/// Trailing marker on a lyric that continues the current word
pub const CONTINUATION_HYPHEN: char = '-';

/// Number of history entries kept for undo/redo
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Smallest prefix window the fuzzy matcher searches, in characters
pub const DEFAULT_FUZZY_MIN_WINDOW: usize = 20;

/// Decimal places used when writing merged durations
pub const DURATION_DECIMALS: usize = 3;

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_fuzzy_min_window() -> usize {
    DEFAULT_FUZZY_MIN_WINDOW
}

/// Session tunables, deserializable from a partial JS object or JSON string
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    #[serde(default = "default_fuzzy_min_window")]
    pub fuzzy_min_window: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            fuzzy_min_window: DEFAULT_FUZZY_MIN_WINDOW,
        }
    }
}

impl SessionConfig {
    /// Parse a JSON config; omitted fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, LyricError> {
        let config: SessionConfig = serde_json::from_str(json)
            .map_err(|e| LyricError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LyricError> {
        if self.history_limit == 0 {
            return Err(LyricError::InvalidConfig(
                "historyLimit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
