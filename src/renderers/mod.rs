//! Output renderers
//!
//! - `vocals`: the edited alignment back to the vocals export format

pub mod vocals;

pub use vocals::{escape_lyric, render_lyric, serialize_vocals};
