//! LyricSmith WASM API
//!
//! JavaScript-facing API for the alignment session.
//!
//! # Module Structure
//!
//! - `helpers`: console logging, serialization and validation shared by the API
//! - `core`: the session-owning functions (imports, merges, history, export)

pub mod helpers;
pub mod core;

pub use self::core::*;
