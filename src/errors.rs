//! Error types for the alignment session
//!
//! Import failures carry the parser message. Precondition failures on
//! export are explicit; merges never produce errors and degrade to no-ops.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LyricError {
    /// The vocals markup is not well-formed
    #[error("Invalid XML: {0}")]
    InvalidXml(String),

    /// Export requested before the annotated side was imported
    #[error("No vocals imported; import the annotated XML before exporting")]
    MissingRecords,

    /// Export requested before the plain text was imported
    #[error("No plain text imported; import the lyrics text before exporting")]
    MissingPlainText,

    #[error("Line {line} out of range ({lines} lines)")]
    LineOutOfRange { line: usize, lines: usize },

    /// A command payload from the dispatch channel could not be decoded
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// A merge recording cannot be exported yet
    #[error("Recording unavailable: {0}")]
    InvalidRecording(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
