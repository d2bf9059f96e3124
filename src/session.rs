//! Alignment session
//!
//! `Session` owns the complete alignment state of one editing session and
//! applies every user action through `dispatch`. Each action is one atomic
//! transition: the new state is derived first and only then swapped in, so a
//! failed import leaves the previous state untouched.
//!
//! History: the session records its state after every successful mutation
//! (and the state before the first one), so the history cursor always points
//! at the live state and undo/redo are exact inverses.

use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::diagnostics::{alignment_diagnostics, Diagnostics};
use crate::errors::LyricError;
use crate::matching::{parse_text_with_reference, FuzzyMatcher};
use crate::models::{AlignmentState, ImportContext, MergeAction, PlainLine, RowType, Script};
use crate::parse::{group_into_lines, parse_vocals};
use crate::renderers::serialize_vocals;
use crate::structure::{
    merge_records, merge_syllables_in_line, total_syllable_count, update_line_groups_after_merge,
};
use crate::text::detect_script;
use crate::undo::History;

/// A user action, as sent over the command channel
///
/// Serialized as `{"type": "merge_syllables", "payload": {...}}`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Command {
    ImportXml(String),
    ImportPlainText(String),
    MergeSyllables {
        line_index: usize,
        syllable_index: usize,
        row_type: RowType,
    },
    ResetLine {
        line_index: usize,
    },
    /// Re-match the syllables after `syllable_index` with the fuzzy matcher
    AutoMatchLine {
        line_index: usize,
        syllable_index: usize,
    },
    Undo,
    Redo,
    SetError(String),
    DismissError,
    StartRecording(String),
    StopRecording,
    ClearRecording,
}

impl Command {
    /// Decode a command from its JSON form
    pub fn from_json(json: &str) -> Result<Command, LyricError> {
        serde_json::from_str(json).map_err(|e| LyricError::InvalidCommand(e.to_string()))
    }
}

/// Recorded merge scenario, replayable by `Session::replay`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub test_case_name: String,
    pub description: String,
    #[serde(rename = "sourceXML")]
    pub source_xml: String,
    pub plain_text: String,
    #[serde(rename = "targetXML")]
    pub target_xml: String,
    pub merge_actions: Vec<MergeAction>,
    pub expected_vocal_count: usize,
    pub language: Script,
}

/// One lyric line as shown side by side
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineView {
    pub index: usize,
    pub xml_syllables: Vec<String>,
    pub plain_syllables: Vec<String>,
    pub is_matched: bool,
}

/// Read-only snapshot of the session for the UI
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub lines: Vec<LineView>,
    pub original_syllable_count: usize,
    pub current_syllable_count: usize,
    pub alphabet: Script,
    pub error: Option<String>,
    pub can_undo: bool,
    pub can_redo: bool,
    pub is_recording: bool,
    pub recorded_actions: usize,
    pub diagnostics: Diagnostics,
}

#[derive(Clone, Debug, Default)]
struct Recording {
    active: bool,
    test_name: String,
    actions: Vec<MergeAction>,
}

/// Owner of the alignment state
#[derive(Clone, Debug)]
pub struct Session {
    config: SessionConfig,
    matcher: FuzzyMatcher,
    state: AlignmentState,
    vocals_loaded: bool,
    error: Option<String>,
    history: History,
    recording: Recording,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            matcher: FuzzyMatcher::new(config.fuzzy_min_window),
            history: History::new(config.history_limit),
            config,
            state: AlignmentState::default(),
            vocals_loaded: false,
            error: None,
            recording: Recording::default(),
        }
    }

    /// Replace the configuration; the history is cleared
    pub fn configure(&mut self, config: SessionConfig) -> Result<(), LyricError> {
        config.validate()?;
        self.matcher = FuzzyMatcher::new(config.fuzzy_min_window);
        self.history = History::new(config.history_limit);
        self.config = config;
        Ok(())
    }

    /// Apply one command
    ///
    /// Only imports can fail; the message is also kept in `error()` for
    /// display. Merges, resets and auto-matching that cannot apply leave the
    /// session unchanged.
    pub fn dispatch(&mut self, command: Command) -> Result<(), LyricError> {
        match command {
            Command::ImportXml(xml) => self.import_annotated(&xml)?,
            Command::ImportPlainText(text) => self.import_plain_text(&text),
            Command::MergeSyllables { line_index, syllable_index, row_type } => {
                self.merge_syllables(line_index, syllable_index, row_type)
            }
            Command::ResetLine { line_index } => self.reset_line(line_index),
            Command::AutoMatchLine { line_index, syllable_index } => {
                self.auto_match_line(line_index, syllable_index)
            }
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
            Command::SetError(message) => self.error = Some(message),
            Command::DismissError => self.error = None,
            Command::StartRecording(test_name) => {
                log::info!("recording started: {}", test_name);
                self.recording = Recording {
                    active: true,
                    test_name,
                    actions: Vec::new(),
                };
            }
            Command::StopRecording => self.recording.active = false,
            Command::ClearRecording => self.recording.actions.clear(),
        }
        Ok(())
    }

    /// Import the annotated vocals export
    ///
    /// Already imported plain text is re-aligned against the new lines.
    pub fn import_annotated(&mut self, xml: &str) -> Result<(), LyricError> {
        let parsed = match parse_vocals(xml) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::warn!("XML import failed: {}", e);
                self.error = Some(format!("XML Import Error: {}", e));
                return Err(e);
            }
        };

        let line_groups = group_into_lines(&parsed.vocals);
        let count = parsed.count();
        log::info!("imported {} vocals in {} lines", count, line_groups.len());

        let previous = &self.state.import;
        let plain_text_lines = if previous.plain_text_raw.is_empty() {
            Vec::new()
        } else {
            parse_text_with_reference(
                &previous.plain_text_raw,
                &parsed.vocals,
                &line_groups,
                previous.script,
            )
        };

        let import = ImportContext {
            header: parsed.header,
            original_syllable_count: count,
            plain_text_raw: previous.plain_text_raw.clone(),
            original_plain_text_lines: plain_text_lines.clone(),
            script: previous.script,
        };

        self.vocals_loaded = true;
        self.state = AlignmentState {
            records: parsed.vocals,
            line_groups,
            plain_text_lines,
            current_syllable_count: count,
            import,
        };
        self.error = None;

        if !self.state.import.plain_text_raw.is_empty() {
            self.history.record(&self.state);
        }
        Ok(())
    }

    /// Import the plain-text lyrics
    pub fn import_plain_text(&mut self, text: &str) {
        let script = detect_script(text);
        let plain_text_lines =
            parse_text_with_reference(text, &self.state.records, &self.state.line_groups, script);
        log::info!(
            "imported plain text ({:?}) into {} lines",
            script,
            plain_text_lines.len()
        );

        self.state.import.plain_text_raw = text.to_string();
        self.state.import.script = script;
        self.state.import.original_plain_text_lines = plain_text_lines.clone();
        self.state.plain_text_lines = plain_text_lines;
        self.error = None;

        if self.vocals_loaded {
            self.history.record(&self.state);
        }
    }

    /// Merge syllable `syllable_index` of a line with the next one
    pub fn merge_syllables(&mut self, line_index: usize, syllable_index: usize, row_type: RowType) {
        if !self.vocals_loaded || line_index >= self.state.line_groups.len() {
            log::debug!("merge ignored: no vocals or line {} out of range", line_index);
            return;
        }

        let next_state = match row_type {
            RowType::Xml => self.merged_annotated(line_index, syllable_index),
            RowType::Plain => self.merged_plain(line_index, syllable_index),
        };

        let Some(next_state) = next_state else {
            log::debug!("merge ignored at line {} syllable {}", line_index, syllable_index);
            return;
        };

        self.commit(next_state);

        if self.recording.active {
            let step = self.recording.actions.len() + 1;
            let row = match row_type {
                RowType::Xml => "XML",
                RowType::Plain => "plain text",
            };
            self.recording.actions.push(MergeAction {
                step,
                description: format!(
                    "Merge {} syllable {} on line {}",
                    row,
                    syllable_index + 1,
                    line_index + 1
                ),
                line_index,
                syllable_index,
                row_type,
            });
        }
    }

    fn merged_annotated(&self, line_index: usize, syllable_index: usize) -> Option<AlignmentState> {
        let group = &self.state.line_groups[line_index];
        if syllable_index + 1 >= group.len() {
            return None;
        }

        let record_index = group[syllable_index];
        let records = merge_records(&self.state.records, record_index)?;
        let line_groups =
            update_line_groups_after_merge(&self.state.line_groups, line_index, record_index);

        // boundaries changed, so the plain text is aligned again from scratch
        let import = &self.state.import;
        let plain_text_lines = if import.plain_text_raw.is_empty() {
            self.state.plain_text_lines.clone()
        } else {
            parse_text_with_reference(&import.plain_text_raw, &records, &line_groups, import.script)
        };

        Some(AlignmentState {
            current_syllable_count: records.len(),
            records,
            line_groups,
            plain_text_lines,
            import: import.clone(),
        })
    }

    fn merged_plain(&self, line_index: usize, syllable_index: usize) -> Option<AlignmentState> {
        let line = self.state.plain_text_lines.get(line_index)?;
        let merged = merge_syllables_in_line(line, syllable_index, RowType::Plain)?;

        let mut plain_text_lines = self.state.plain_text_lines.clone();
        plain_text_lines[line_index] = merged;

        Some(AlignmentState {
            current_syllable_count: total_syllable_count(&plain_text_lines),
            plain_text_lines,
            ..self.state.clone()
        })
    }

    /// Restore one plain-text line to its state at import
    pub fn reset_line(&mut self, line_index: usize) {
        if !self.vocals_loaded || line_index >= self.state.plain_text_lines.len() {
            return;
        }
        let Some(original) = self.state.import.original_plain_text_lines.get(line_index) else {
            return;
        };
        if self.state.plain_text_lines[line_index] == *original {
            return;
        }

        let mut plain_text_lines = self.state.plain_text_lines.clone();
        plain_text_lines[line_index] = original.clone();

        let next_state = AlignmentState {
            current_syllable_count: total_syllable_count(&plain_text_lines),
            plain_text_lines,
            ..self.state.clone()
        };
        log::debug!("reset line {}", line_index);
        self.commit(next_state);
    }

    /// Re-match the tail of a plain-text line after `syllable_index`
    pub fn auto_match_line(&mut self, line_index: usize, syllable_index: usize) {
        if !self.vocals_loaded {
            return;
        }
        let Some(line) = self.state.plain_text_lines.get(line_index) else {
            return;
        };

        let pattern = self.state.line_pattern(line_index);
        if pattern.is_empty() {
            return;
        }
        let matched = self.matcher.try_auto_merge_remaining_line(line, &pattern, syllable_index);
        if matched == *line {
            return;
        }

        let mut plain_text_lines = self.state.plain_text_lines.clone();
        plain_text_lines[line_index] = matched;

        let next_state = AlignmentState {
            current_syllable_count: total_syllable_count(&plain_text_lines),
            plain_text_lines,
            ..self.state.clone()
        };
        self.commit(next_state);
    }

    pub fn undo(&mut self) {
        if let Some(previous) = self.history.undo() {
            log::debug!("undo to history entry {:?}", self.history.cursor());
            self.state = previous;
        }
    }

    pub fn redo(&mut self) {
        if let Some(next) = self.history.redo() {
            log::debug!("redo to history entry {:?}", self.history.cursor());
            self.state = next;
        }
    }

    fn commit(&mut self, next_state: AlignmentState) {
        if self.history.is_empty() {
            self.history.record(&self.state);
        }
        self.state = next_state;
        self.history.record(&self.state);
    }

    /// Serialize the current alignment into vocals markup
    pub fn serialize(&self) -> Result<String, LyricError> {
        if !self.vocals_loaded {
            return Err(LyricError::MissingRecords);
        }
        serialize_vocals(
            &self.state.import.header,
            &self.state.records,
            &self.state.line_groups,
            &self.state.plain_text_lines,
        )
    }

    /// Build a test case from the recorded merges
    pub fn recorded_test_case(&self) -> Result<TestCase, LyricError> {
        let name = self.recording.test_name.trim();
        if name.is_empty() {
            return Err(LyricError::InvalidRecording("Test name is required".to_string()));
        }
        if !self.vocals_loaded {
            return Err(LyricError::InvalidRecording(
                "No XML data imported. Please import XML before exporting recording.".to_string(),
            ));
        }
        if self.state.plain_text_lines.is_empty() {
            return Err(LyricError::InvalidRecording(
                "No plain text imported. Please import plain text before exporting recording.".to_string(),
            ));
        }

        Ok(TestCase {
            test_case_name: name.to_string(),
            description: format!("Test case for {}", name),
            source_xml: "source.xml".to_string(),
            plain_text: "plain_text.txt".to_string(),
            target_xml: "target.xml".to_string(),
            merge_actions: self.recording.actions.clone(),
            expected_vocal_count: self.state.records.len(),
            language: self.state.import.script,
        })
    }

    /// Run a recorded scenario from scratch: import both sides, then merge
    pub fn replay(source_xml: &str, plain_text: &str, actions: &[MergeAction]) -> Result<Session, LyricError> {
        let mut session = Session::default();
        session.import_annotated(source_xml)?;
        session.import_plain_text(plain_text);
        for action in actions {
            session.merge_syllables(action.line_index, action.syllable_index, action.row_type);
        }
        Ok(session)
    }

    pub fn view(&self) -> SessionView {
        let line_count = self.state.line_groups.len().max(self.state.plain_text_lines.len());
        let lines = (0..line_count)
            .map(|index| {
                let xml_syllables = self.state.line_pattern(index);
                let plain_syllables = self.state.plain_text_lines.get(index).cloned().unwrap_or_default();
                LineView {
                    index,
                    is_matched: !xml_syllables.is_empty() && xml_syllables.len() == plain_syllables.len(),
                    xml_syllables,
                    plain_syllables,
                }
            })
            .collect();

        SessionView {
            lines,
            original_syllable_count: self.state.import.original_syllable_count,
            current_syllable_count: self.state.current_syllable_count,
            alphabet: self.state.import.script,
            error: self.error.clone(),
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
            is_recording: self.recording.active,
            recorded_actions: self.recording.actions.len(),
            diagnostics: self.diagnostics(),
        }
    }

    /// Syllables of one line on one row
    pub fn line_syllables(&self, line_index: usize, row_type: RowType) -> Result<Vec<String>, LyricError> {
        let lines = match row_type {
            RowType::Xml => self.state.line_groups.len(),
            RowType::Plain => self.state.plain_text_lines.len(),
        };
        if line_index >= lines {
            return Err(LyricError::LineOutOfRange { line: line_index, lines });
        }

        Ok(match row_type {
            RowType::Xml => self.state.line_pattern(line_index),
            RowType::Plain => self.state.plain_text_lines[line_index].clone(),
        })
    }

    pub fn diagnostics(&self) -> Diagnostics {
        alignment_diagnostics(&self.state)
    }

    pub fn state(&self) -> &AlignmentState {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn header(&self) -> &str {
        &self.state.import.header
    }

    pub fn has_vocals(&self) -> bool {
        self.vocals_loaded
    }

    pub fn script(&self) -> Script {
        self.state.import.script
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn original_syllable_count(&self) -> usize {
        self.state.import.original_syllable_count
    }

    pub fn current_syllable_count(&self) -> usize {
        self.state.current_syllable_count
    }

    pub fn original_plain_text_lines(&self) -> &[PlainLine] {
        &self.state.import.original_plain_text_lines
    }

    pub fn recorded_actions(&self) -> &[MergeAction] {
        &self.recording.actions
    }
}
