//! LyricSmith WASM Module
//!
//! Aligns the syllables of an annotated vocals export with hand-corrected
//! plain-text lyrics and writes the result back as vocals markup.

pub mod api;
pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod matching;
pub mod models;
pub mod parse;
pub mod renderers;
pub mod session;
pub mod structure;
pub mod text;
pub mod undo;

// Re-export commonly used types
pub use config::SessionConfig;
pub use errors::LyricError;
pub use models::*;
pub use session::{Command, Session, SessionView, TestCase};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if console_log::init_with_level(log::Level::Debug).is_err() {
        log::warn!("logger already initialized");
    }

    log::info!("LyricSmith WASM module initialized");
}
