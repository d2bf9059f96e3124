//! Alignment diagnostics
//!
//! Count mismatches between the annotated and plain-text rows are a normal,
//! displayed state while the user is still merging. They are reported here
//! as warnings for the UI and never block an operation. A plain text whose
//! own line count differs from the annotated one gets an informational mark.

use serde::{Deserialize, Serialize};
use crate::models::AlignmentState;

/// Severity level for diagnostic marks
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Warning,
    Info,
}

/// A diagnostic mark attached to one lyric line
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticMark {
    /// Line index in the alignment
    pub line: usize,
    pub severity: DiagnosticSeverity,
    /// Kind identifier (e.g., "syllable_count_mismatch")
    pub kind: String,
    /// Human-readable message
    pub message: String,
}

impl DiagnosticMark {
    pub fn new(
        line: usize,
        severity: DiagnosticSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            line,
            severity,
            kind: kind.into(),
            message: message.into(),
        }
    }
}

/// Collection of diagnostic marks for the whole alignment
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub annotated_lines: usize,
    pub plain_lines: usize,
    /// Non-empty lines of the imported plain text, before distribution
    pub source_lines: usize,
    pub marks: Vec<DiagnosticMark>,
}

impl Diagnostics {
    /// Add a mark
    pub fn add(&mut self, mark: DiagnosticMark) {
        self.marks.push(mark);
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        self.marks
            .iter()
            .any(|m| m.severity == DiagnosticSeverity::Warning)
    }

    /// Check if there are any diagnostics
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// True once both rows have the same number of lines and syllables
    pub fn is_aligned(&self) -> bool {
        !self.has_warnings() && self.annotated_lines == self.plain_lines
    }
}

/// Count lines that contain something other than whitespace
pub fn count_non_empty_lines(text: &str) -> usize {
    text.split('\n').filter(|line| !line.trim().is_empty()).count()
}

/// Report line and syllable count mismatches between the two rows
///
/// Nothing is reported until both rows have been imported.
pub fn alignment_diagnostics(state: &AlignmentState) -> Diagnostics {
    let mut diagnostics = Diagnostics {
        annotated_lines: state.line_groups.len(),
        plain_lines: state.plain_text_lines.len(),
        source_lines: count_non_empty_lines(&state.import.plain_text_raw),
        marks: Vec::new(),
    };

    if state.line_groups.is_empty() || state.plain_text_lines.is_empty() {
        return diagnostics;
    }

    if diagnostics.source_lines != diagnostics.annotated_lines {
        diagnostics.add(DiagnosticMark::new(
            0,
            DiagnosticSeverity::Info,
            "source_line_count",
            format!(
                "The plain text has {} lines, redistributed over {} XML lines",
                diagnostics.source_lines, diagnostics.annotated_lines
            ),
        ));
    }

    if diagnostics.annotated_lines != diagnostics.plain_lines {
        diagnostics.add(DiagnosticMark::new(
            diagnostics.annotated_lines.min(diagnostics.plain_lines),
            DiagnosticSeverity::Warning,
            "line_count_mismatch",
            format!(
                "XML has {} lines but the plain text has {}",
                diagnostics.annotated_lines, diagnostics.plain_lines
            ),
        ));
    }

    for (line, (group, syllables)) in state
        .line_groups
        .iter()
        .zip(state.plain_text_lines.iter())
        .enumerate()
    {
        if group.len() != syllables.len() {
            diagnostics.add(DiagnosticMark::new(
                line,
                DiagnosticSeverity::Warning,
                "syllable_count_mismatch",
                format!(
                    "Line {}: {} XML syllables, {} plain-text syllables",
                    line + 1,
                    group.len(),
                    syllables.len()
                ),
            ));
        }
    }

    diagnostics
}
