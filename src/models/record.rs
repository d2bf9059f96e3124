//! Annotated syllable records
//!
//! A `Record` is one `<vocal>` element of the upstream export. Only `lyric`
//! is ever rewritten; `time`, `note` and `length` are carried through as the
//! exact strings the export contained (except `length` after a merge).

use serde::{Deserialize, Serialize};
use crate::config::{CONTINUATION_HYPHEN, LINE_END_MARKER};

/// One timed annotated syllable
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Onset in seconds, as written in the export
    pub time: String,

    /// Opaque pitch value
    pub note: String,

    /// Duration in seconds, as written in the export
    pub length: String,

    /// Syllable text with optional `-` and `+` suffixes
    pub lyric: String,

    /// Copy of `lyric` taken at import time, never modified afterwards
    pub original_lyric: String,
}

impl Record {
    pub fn new(
        time: impl Into<String>,
        note: impl Into<String>,
        length: impl Into<String>,
        lyric: impl Into<String>,
    ) -> Self {
        let lyric = lyric.into();
        Self {
            time: time.into(),
            note: note.into(),
            length: length.into(),
            original_lyric: lyric.clone(),
            lyric,
        }
    }

    /// True if this record closes a lyric line
    pub fn is_line_end(&self) -> bool {
        self.lyric.ends_with(LINE_END_MARKER)
    }

    /// `time` parsed as seconds
    pub fn start_seconds(&self) -> Option<f64> {
        self.time.trim().parse().ok()
    }

    /// `time + length` parsed as seconds
    pub fn end_seconds(&self) -> Option<f64> {
        let length: f64 = self.length.trim().parse().ok()?;
        Some(self.start_seconds()? + length)
    }
}

/// Remove every `-` and `+` from a syllable
pub fn clean_syllable(syllable: &str) -> String {
    syllable
        .chars()
        .filter(|&c| c != CONTINUATION_HYPHEN && c != LINE_END_MARKER)
        .collect()
}

/// Syllable content with the trailing markers and hyphen removed, trimmed
pub fn core_syllable(syllable: &str) -> &str {
    syllable
        .trim()
        .trim_end_matches(LINE_END_MARKER)
        .trim_end_matches(CONTINUATION_HYPHEN)
        .trim()
}

/// Result of parsing a vocals export
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ParsedVocals {
    /// Everything before the `<vocals` element, kept verbatim
    pub header: String,

    pub vocals: Vec<Record>,
}

impl ParsedVocals {
    pub fn count(&self) -> usize {
        self.vocals.len()
    }
}
