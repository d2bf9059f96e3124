//! Grouping of records into lyric lines

use crate::models::{LineGroup, Record};

/// Partition records into lines
///
/// A line ends at each record whose lyric ends with the line-end marker. A
/// trailing run without a marker still forms a final line.
pub fn group_into_lines(records: &[Record]) -> Vec<LineGroup> {
    let mut lines = Vec::new();
    let mut current = Vec::new();

    for (index, record) in records.iter().enumerate() {
        current.push(index);
        if record.is_line_end() {
            lines.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Lyrics of the records in one line group
pub fn line_pattern(records: &[Record], group: &[usize]) -> Vec<String> {
    group
        .iter()
        .filter_map(|&i| records.get(i))
        .map(|r| r.lyric.clone())
        .collect()
}
