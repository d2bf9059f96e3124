//! Merge operator primitives
//!
//! Every function here derives a new value and leaves its input untouched,
//! so a caller can keep the previous state for history.

use crate::config::{CONTINUATION_HYPHEN, DURATION_DECIMALS};
use crate::models::{LineGroup, PlainLine, Record, RowType};

/// Merge the record at `first_index` with the one after it
///
/// The first record keeps its onset, note and original lyric. Its lyric loses
/// a trailing continuation hyphen and gets the second lyric appended; its
/// length becomes `second.time + second.length - first.time`. Returns `None`
/// if there is no following record.
pub fn merge_records(records: &[Record], first_index: usize) -> Option<Vec<Record>> {
    if first_index + 1 >= records.len() {
        return None;
    }

    let first = &records[first_index];
    let second = &records[first_index + 1];

    let lyric = format!(
        "{}{}",
        first.lyric.strip_suffix(CONTINUATION_HYPHEN).unwrap_or(&first.lyric),
        second.lyric
    );

    let length = match (first.start_seconds(), second.end_seconds()) {
        (Some(start), Some(end)) => format!("{:.*}", DURATION_DECIMALS, end - start),
        _ => {
            log::warn!(
                "merge_records: unparsable timing at record {} \
                 (time='{}', next time='{}' length='{}'), keeping length",
                first_index,
                first.time,
                second.time,
                second.length
            );
            first.length.clone()
        }
    };

    let mut merged = Vec::with_capacity(records.len() - 1);
    merged.extend_from_slice(&records[..first_index]);
    merged.push(Record {
        lyric,
        length,
        ..first.clone()
    });
    merged.extend_from_slice(&records[first_index + 2..]);
    Some(merged)
}

/// Drop the record after `merged_index` from its line and shift every later
/// index in every line down by one
pub fn update_line_groups_after_merge(
    line_groups: &[LineGroup],
    line_index: usize,
    merged_index: usize,
) -> Vec<LineGroup> {
    let mut groups = line_groups.to_vec();

    let Some(target) = groups.get_mut(line_index) else {
        return groups;
    };
    let Some(position) = target.iter().position(|&i| i == merged_index) else {
        return groups;
    };
    if position + 1 < target.len() {
        target.remove(position + 1);
    }

    for group in groups.iter_mut() {
        for index in group.iter_mut() {
            if *index > merged_index {
                *index -= 1;
            }
        }
    }

    groups
}

/// Merge syllable `index` of a line with the next one
///
/// On the annotated row the first syllable's continuation hyphen is dropped;
/// plain-text syllables are concatenated verbatim. Returns `None` when
/// `index` is the last syllable.
pub fn merge_syllables_in_line(syllables: &[String], index: usize, row: RowType) -> Option<PlainLine> {
    if index + 1 >= syllables.len() {
        return None;
    }

    let current = &syllables[index];
    let next = &syllables[index + 1];

    let combined = match row {
        RowType::Xml => format!(
            "{}{}",
            current.strip_suffix(CONTINUATION_HYPHEN).unwrap_or(current),
            next
        ),
        RowType::Plain => format!("{}{}", current, next),
    };

    let mut merged = syllables.to_vec();
    merged[index] = combined;
    merged.remove(index + 1);
    Some(merged)
}

/// Total number of plain-text syllables across all lines
pub fn total_syllable_count(lines: &[PlainLine]) -> usize {
    lines.iter().map(|line| line.len()).sum()
}
