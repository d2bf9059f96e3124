//! Vocals export serializer
//!
//! Rebuilds the vocals markup from the original records and the final
//! plain-text syllables. Only `lyric` values change; `time`, `note` and
//! `length` are written back exactly as stored, and the header text that
//! preceded `<vocals` is emitted verbatim.
//!
//! ## Lyric rules (per record)
//!
//! - Unchanged content (ignoring markers, hyphen and surrounding spaces) keeps
//!   the original lyric, with the line-end marker moved to where the line ends.
//! - Changed content is trimmed and loses a leading `-`. A continuation hyphen
//!   is added unless the syllable is empty, ends the line, or borders a space
//!   (its own trailing whitespace or the next syllable's leading whitespace).
//!   Otherwise a hyphen carried by the syllable itself, or by the record
//!   lyric (after annotated-side merges), is kept.
//! - The last syllable of each line gets the line-end marker.

use std::borrow::Cow;

use crate::config::{CONTINUATION_HYPHEN, LINE_END_MARKER};
use crate::errors::LyricError;
use crate::models::{core_syllable, LineGroup, PlainLine, Record};

/// Escape `& " ' < >` for use inside an attribute value
pub fn escape_lyric(text: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(text)
}

/// Compute the unescaped lyric for one record
///
/// `replacement` is the aligned plain-text syllable (if any), `next` the
/// following plain-text syllable on the same line.
pub fn render_lyric(record: &Record, replacement: Option<&str>, next: Option<&str>, is_last: bool) -> String {
    let original = record.lyric.as_str();

    let replacement = match replacement {
        Some(text) if core_syllable(text) != core_syllable(original) => text,
        _ => {
            let mut content = original.trim_end_matches(LINE_END_MARKER).to_string();
            if is_last {
                content.push(LINE_END_MARKER);
            }
            return content;
        }
    };

    let trimmed = replacement.trim();
    let trimmed = trimmed.strip_prefix(CONTINUATION_HYPHEN).unwrap_or(trimmed);
    let explicit_hyphen = trimmed.trim_end_matches(LINE_END_MARKER).ends_with(CONTINUATION_HYPHEN);
    let text = trimmed
        .trim_end_matches(LINE_END_MARKER)
        .trim_end_matches(CONTINUATION_HYPHEN)
        .trim_end();

    let space_boundary = replacement.ends_with(char::is_whitespace)
        || next.is_some_and(|n| n.starts_with(char::is_whitespace));
    let original_hyphen = original.trim_end_matches(LINE_END_MARKER).ends_with(CONTINUATION_HYPHEN);

    let mut lyric = text.to_string();
    if !text.is_empty() && !is_last && !space_boundary && (explicit_hyphen || original_hyphen) {
        lyric.push(CONTINUATION_HYPHEN);
    }
    if is_last {
        lyric.push(LINE_END_MARKER);
    }
    lyric
}

/// Serialize the alignment into vocals markup
///
/// # Errors
/// `MissingRecords` without records, `MissingPlainText` without plain-text
/// lines.
pub fn serialize_vocals(
    header: &str,
    records: &[Record],
    line_groups: &[LineGroup],
    plain_text_lines: &[PlainLine],
) -> Result<String, LyricError> {
    if records.is_empty() {
        return Err(LyricError::MissingRecords);
    }
    if plain_text_lines.is_empty() {
        return Err(LyricError::MissingPlainText);
    }

    let mut output = String::from(header);
    output.push_str(&format!("<vocals count=\"{}\">\n", records.len()));

    for (line_index, group) in line_groups.iter().enumerate() {
        let syllables: &[String] = plain_text_lines.get(line_index).map(|l| l.as_slice()).unwrap_or(&[]);
        if syllables.len() != group.len() {
            log::warn!(
                "serialize_vocals: line {} has {} records but {} plain syllables",
                line_index,
                group.len(),
                syllables.len()
            );
        }

        for (position, &record_index) in group.iter().enumerate() {
            let Some(record) = records.get(record_index) else {
                log::warn!("serialize_vocals: line {} refers to missing record {}", line_index, record_index);
                continue;
            };

            let lyric = render_lyric(
                record,
                syllables.get(position).map(String::as_str),
                syllables.get(position + 1).map(String::as_str),
                position + 1 == group.len(),
            );

            output.push_str(&format!(
                "  <vocal time=\"{}\" note=\"{}\" length=\"{}\" lyric=\"{}\"/>\n",
                record.time,
                record.note,
                record.length,
                escape_lyric(&lyric)
            ));
        }
    }

    output.push_str("</vocals>\n");
    Ok(output)
}
