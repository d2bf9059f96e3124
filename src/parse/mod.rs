//! Parsing of the annotated vocals export
//!
//! - `vocals`: markup → ordered records plus the verbatim header
//! - `lines`: records → lyric lines using the line-end marker convention

pub mod vocals;
pub mod lines;

pub use vocals::{extract_header, parse_vocals};
pub use lines::{group_into_lines, line_pattern};
