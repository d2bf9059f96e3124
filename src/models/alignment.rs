//! Alignment state shared by the session and the history
//!
//! `AlignmentState` is a plain owned value: cloning it produces a fully
//! independent snapshot, so history entries never alias live state.

use serde::{Deserialize, Serialize};
use crate::models::{Record, Script};
use crate::parse::line_pattern;

/// Record indices belonging to one lyric line, in export order
pub type LineGroup = Vec<usize>;

/// Plain-text syllables for one lyric line
pub type PlainLine = Vec<String>;

/// Which row of a lyric line a merge targets
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RowType {
    /// The annotated (vocals export) syllables
    #[serde(alias = "annotated")]
    Xml,
    /// The plain-text syllables
    Plain,
}

impl RowType {
    pub fn from_str_lossy(value: &str) -> Option<RowType> {
        match value {
            "xml" | "annotated" => Some(RowType::Xml),
            "plain" => Some(RowType::Plain),
            _ => None,
        }
    }
}

/// One merge performed while recording, for scenario replay
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MergeAction {
    pub step: usize,
    pub description: String,
    pub line_index: usize,
    pub syllable_index: usize,
    pub row_type: RowType,
}

/// What the two imports produced
///
/// Carried inside every snapshot so that undoing a re-import brings back the
/// header, counters and source text that belong to the restored records.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImportContext {
    /// Text preceding `<vocals` in the annotated import
    pub header: String,
    pub original_syllable_count: usize,
    /// Plain text exactly as imported
    pub plain_text_raw: String,
    /// Plain-text lines as first aligned, the target of a line reset
    pub original_plain_text_lines: Vec<PlainLine>,
    pub script: Script,
}

/// Records, line grouping and plain-text lines at one point in time
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentState {
    pub records: Vec<Record>,
    pub line_groups: Vec<LineGroup>,
    pub plain_text_lines: Vec<PlainLine>,
    pub current_syllable_count: usize,
    pub import: ImportContext,
}

impl AlignmentState {
    /// Annotated lyrics of one line, empty for an unknown line
    pub fn line_pattern(&self, line_index: usize) -> Vec<String> {
        self.line_groups
            .get(line_index)
            .map(|group| line_pattern(&self.records, group))
            .unwrap_or_default()
    }
}
