//! Text utilities for lyric alignment
//!
//! - `script`: script family detection and Latin/non-Latin run segmentation
//! - `normalize`: comparison keys that ignore case, diacritics and punctuation
//! - `split`: character and syllable splitters used as matching fallbacks

pub mod script;
pub mod normalize;
pub mod split;

pub use script::{detect_script, is_primarily_latin, segment_by_script, ScriptRun};
pub use normalize::normalize_for_comparison;
pub use split::{split_into_characters, split_text_by_syllables, parse_text_into_syllables};
