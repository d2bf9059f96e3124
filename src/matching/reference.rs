//! Distribution of a plain-text document over the annotated lines
//!
//! Line breaks in the plain text are not trusted: the whole text is treated
//! as one stream and each annotated line takes as many non-whitespace
//! characters as its pattern spells.

use crate::models::{clean_syllable, LineGroup, PlainLine, Record, Script};
use crate::parse::line_pattern;
use crate::text::parse_text_into_syllables;
use super::segmented::divide_line_by_pattern;

/// Split `plain_text` into syllable lines aligned with `line_groups`
///
/// Without an annotated side the text is split into its own non-empty lines
/// and syllabified with the splitter for `fallback_script`.
pub fn parse_text_with_reference(
    plain_text: &str,
    records: &[Record],
    line_groups: &[LineGroup],
    fallback_script: Script,
) -> Vec<PlainLine> {
    if records.is_empty() || line_groups.is_empty() {
        return parse_text_into_syllables(plain_text, fallback_script);
    }

    let stream = plain_text
        .split('\n')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let mut rest = stream.trim();

    if rest.is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::with_capacity(line_groups.len());

    for group in line_groups {
        let pattern = line_pattern(records, group);
        let expected_length: usize = pattern.iter().map(|s| clean_syllable(s).chars().count()).sum();

        let mut extracted = 0;
        let mut consumed = 0;
        for (offset, ch) in rest.char_indices() {
            if extracted >= expected_length {
                break;
            }
            consumed = offset + ch.len_utf8();
            if !ch.is_whitespace() {
                extracted += 1;
            }
        }

        let mut text_for_line = rest[..consumed].trim();
        if text_for_line.is_empty() && !rest.is_empty() {
            text_for_line = rest;
            consumed = rest.len();
        }

        lines.push(divide_line_by_pattern(text_for_line, &pattern));
        rest = rest[consumed..].trim();
    }

    lines
}
