//! Structural edits on the alignment
//!
//! - `merge`: collapsing adjacent syllables on either row

pub mod merge;

pub use merge::{merge_records, merge_syllables_in_line, total_syllable_count, update_line_groups_after_merge};
