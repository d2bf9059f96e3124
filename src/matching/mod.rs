//! Alignment engine
//!
//! Matches a plain-text lyric line against the annotated syllable pattern of
//! the same line. Strategies, in order of preference:
//!
//! 1. `exact`: whole-line match modulo case, diacritics and whitespace
//! 2. `segmented`: the same match per Latin run, character split otherwise
//! 3. `fuzzy`: incremental shortest-prefix matcher used after manual edits
//! 4. character split (`text::split`) when nothing else applies
//!
//! `reference` cuts a whole plain-text document into per-line slices before
//! handing each one to `segmented`.

pub mod exact;
pub mod segmented;
pub mod fuzzy;
pub mod reference;

pub use exact::match_whole_line;
pub use segmented::divide_line_by_pattern;
pub use fuzzy::FuzzyMatcher;
pub use reference::parse_text_with_reference;
