//! Session API
//!
//! The WASM module owns a single alignment session. Every function here locks
//! it, applies one operation and returns the serialized view of the new state,
//! the same value `getState` produces.

use lazy_static::lazy_static;
use std::sync::{Mutex, MutexGuard};
use wasm_bindgen::prelude::*;

use super::helpers::{deserialize, lyric_error, serialize, validation_error};
use crate::config::SessionConfig;
use crate::models::RowType;
use crate::session::{Command, Session};
use crate::{wasm_info, wasm_log, wasm_warn};

// WASM-owned session storage (canonical source of truth)
lazy_static! {
    static ref SESSION: Mutex<Session> = Mutex::new(Session::default());
}

fn lock_session() -> Result<MutexGuard<'static, Session>, JsValue> {
    SESSION
        .lock()
        .map_err(|e| validation_error(format!("Session lock poisoned: {}", e)))
}

fn row_type(side: &str) -> Result<RowType, JsValue> {
    RowType::from_str_lossy(side).ok_or_else(|| {
        validation_error(format!("Unknown row type '{}' (expected 'xml' or 'plain')", side))
    })
}

fn session_view(session: &Session) -> Result<JsValue, JsValue> {
    serialize(&session.view(), "State serialization error")
}

/// Import the annotated vocals export
///
/// On failure the error is also kept in the session for `getState`.
#[wasm_bindgen(js_name = importAnnotated)]
pub fn import_annotated(xml: &str) -> Result<JsValue, JsValue> {
    wasm_info!("importAnnotated called: {} bytes", xml.len());
    let mut session = lock_session()?;
    session.import_annotated(xml).map_err(lyric_error)?;
    wasm_log!(
        "  {} vocals, {} lines",
        session.state().records.len(),
        session.state().line_groups.len()
    );
    session_view(&session)
}

/// Import the plain-text lyrics
#[wasm_bindgen(js_name = importPlainText)]
pub fn import_plain_text(text: &str) -> Result<JsValue, JsValue> {
    wasm_info!("importPlainText called: {} bytes", text.len());
    let mut session = lock_session()?;
    session.import_plain_text(text);
    wasm_log!("  alphabet: {:?}", session.script());
    session_view(&session)
}

/// Merge syllable `syllable_index` of line `line_index` with the next one
///
/// `side` is `"xml"` or `"plain"`. Out-of-range indices leave the session
/// unchanged.
#[wasm_bindgen(js_name = mergeSyllable)]
pub fn merge_syllables(
    line_index: usize,
    syllable_index: usize,
    side: &str,
) -> Result<JsValue, JsValue> {
    wasm_info!(
        "mergeSyllable called: line={}, syllable={}, side={}",
        line_index,
        syllable_index,
        side
    );
    let row = row_type(side)?;
    let mut session = lock_session()?;
    let before = session.current_syllable_count();
    session.merge_syllables(line_index, syllable_index, row);
    if session.current_syllable_count() == before {
        wasm_warn!("  merge had no effect");
    }
    session_view(&session)
}

#[wasm_bindgen(js_name = resetLine)]
pub fn reset_line(line_index: usize) -> Result<JsValue, JsValue> {
    wasm_info!("resetLine called: line={}", line_index);
    let mut session = lock_session()?;
    session.reset_line(line_index);
    session_view(&session)
}

/// Re-match the tail of a plain-text line with the fuzzy matcher
#[wasm_bindgen(js_name = autoMatchLine)]
pub fn auto_match_line(line_index: usize, syllable_index: usize) -> Result<JsValue, JsValue> {
    wasm_info!("autoMatchLine called: line={}, from={}", line_index, syllable_index);
    let mut session = lock_session()?;
    session.auto_match_line(line_index, syllable_index);
    session_view(&session)
}

#[wasm_bindgen]
pub fn undo() -> Result<JsValue, JsValue> {
    let mut session = lock_session()?;
    session.undo();
    session_view(&session)
}

#[wasm_bindgen]
pub fn redo() -> Result<JsValue, JsValue> {
    let mut session = lock_session()?;
    session.redo();
    session_view(&session)
}

#[wasm_bindgen(js_name = dismissError)]
pub fn dismiss_error() -> Result<(), JsValue> {
    lock_session()?.dispatch(Command::DismissError).map_err(lyric_error)
}

/// Apply a serialized command: `{ type: "merge_syllables", payload: {...} }`
#[wasm_bindgen(js_name = dispatchCommand)]
pub fn dispatch_command(command_js: JsValue) -> Result<JsValue, JsValue> {
    let command: Command = deserialize(command_js, "Invalid command")?;
    wasm_log!("dispatchCommand: {:?}", command);
    let mut session = lock_session()?;
    session.dispatch(command).map_err(lyric_error)?;
    session_view(&session)
}

/// Serialize the current alignment as vocals markup
#[wasm_bindgen(js_name = serialize)]
pub fn export_vocals() -> Result<String, JsValue> {
    wasm_info!("serialize called");
    lock_session()?.serialize().map_err(lyric_error)
}

/// Get the session view (lines, counters, error, history flags)
#[wasm_bindgen(js_name = getState)]
pub fn get_state() -> Result<JsValue, JsValue> {
    session_view(&*lock_session()?)
}

#[wasm_bindgen(js_name = getDiagnostics)]
pub fn get_diagnostics() -> Result<JsValue, JsValue> {
    let session = lock_session()?;
    serialize(&session.diagnostics(), "Diagnostics serialization error")
}

/// Get the syllables of one line on one side
#[wasm_bindgen(js_name = getLineSyllables)]
pub fn get_line_syllables(line_index: usize, side: &str) -> Result<js_sys::Array, JsValue> {
    let row = row_type(side)?;
    let syllables = lock_session()?.line_syllables(line_index, row).map_err(lyric_error)?;
    Ok(syllables.iter().map(|s| JsValue::from_str(s)).collect())
}

/// Replace the session configuration (clears the history)
#[wasm_bindgen]
pub fn configure(config_js: JsValue) -> Result<(), JsValue> {
    let config: SessionConfig = deserialize(config_js, "Invalid config")?;
    wasm_info!("configure called: {:?}", config);
    lock_session()?.configure(config).map_err(lyric_error)
}

#[wasm_bindgen(js_name = configureFromJson)]
pub fn configure_from_json(json: &str) -> Result<(), JsValue> {
    let config = SessionConfig::from_json(json).map_err(lyric_error)?;
    lock_session()?.configure(config).map_err(lyric_error)
}

#[wasm_bindgen(js_name = startRecording)]
pub fn start_recording(test_name: &str) -> Result<(), JsValue> {
    lock_session()?
        .dispatch(Command::StartRecording(test_name.to_string()))
        .map_err(lyric_error)
}

#[wasm_bindgen(js_name = stopRecording)]
pub fn stop_recording() -> Result<(), JsValue> {
    lock_session()?.dispatch(Command::StopRecording).map_err(lyric_error)
}

#[wasm_bindgen(js_name = clearRecording)]
pub fn clear_recording() -> Result<(), JsValue> {
    lock_session()?.dispatch(Command::ClearRecording).map_err(lyric_error)
}

/// Export the recorded merges as a test-case JSON document
#[wasm_bindgen(js_name = recordedTestCase)]
pub fn recorded_test_case() -> Result<String, JsValue> {
    let session = lock_session()?;
    let case = session.recorded_test_case().map_err(lyric_error)?;
    serde_json::to_string_pretty(&case)
        .map_err(|e| validation_error(format!("Test case serialization error: {}", e)))
}

/// Start over with an empty session, keeping the configuration
#[wasm_bindgen(js_name = resetSession)]
pub fn reset_session() -> Result<(), JsValue> {
    let mut session = lock_session()?;
    let config = session.config().clone();
    *session = Session::new(config);
    wasm_info!("session reset");
    Ok(())
}
