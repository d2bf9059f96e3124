//! Models module for the lyric alignment session
//!
//! This module contains the data structures shared by the parser,
//! the alignment engine, the merge operator and the serializer.

pub mod record;
pub mod script;
pub mod alignment;

// Re-export commonly used types
pub use record::*;
pub use script::Script;
pub use alignment::*;
