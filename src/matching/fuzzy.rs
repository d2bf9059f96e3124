//! Fuzzy incremental matcher
//!
//! Walks the plain text left to right and, for each pattern syllable, looks
//! for the shortest prefix of the remaining text with the same normalized
//! key. Used to re-align the tail of a line after manual merges, where the
//! whole-line match no longer applies.

use crate::config::{CONTINUATION_HYPHEN, DEFAULT_FUZZY_MIN_WINDOW};
use crate::models::clean_syllable;
use crate::text::{is_primarily_latin, normalize_for_comparison, segment_by_script, split_into_characters};

/// Pattern syllables spelling a literal hyphen carry it doubled ("well--")
const LITERAL_HYPHEN: &str = "--";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuzzyMatcher {
    /// Lower bound of the prefix search window
    min_window: usize,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_FUZZY_MIN_WINDOW)
    }
}

impl FuzzyMatcher {
    pub fn new(min_window: usize) -> Self {
        Self { min_window }
    }

    /// Match a plain-text line against `pattern`, run by run
    ///
    /// Latin runs go through the incremental matcher; non-Latin runs are split
    /// into characters and consume one pattern syllable per character.
    pub fn auto_match_syllables(&self, line: &str, pattern: &[String]) -> Vec<String> {
        if line.trim().is_empty() || pattern.is_empty() {
            return split_into_characters(line);
        }

        let mut result = Vec::new();
        let mut pattern_index = 0;

        for run in segment_by_script(line) {
            if run.is_latin && pattern_index < pattern.len() {
                let (syllables, consumed) = self.match_latin_run(&run.text, pattern, pattern_index);
                result.extend(syllables);
                pattern_index += consumed;
            } else {
                let chars = split_into_characters(&run.text);
                pattern_index += chars.len();
                result.extend(chars);
            }
        }

        result
    }

    /// Returns the syllables produced for the run and the number of pattern
    /// syllables it consumed
    fn match_latin_run(&self, text: &str, pattern: &[String], start: usize) -> (Vec<String>, usize) {
        let chars: Vec<char> = text.trim().chars().collect();
        let mut result = Vec::new();
        let mut position = 0;
        let mut pattern_index = start;

        while position < chars.len() && pattern_index < pattern.len() {
            let element = &pattern[pattern_index];

            let Some(length) = self.find_shortest_match(&chars, position, element) else {
                // the run stops matching here; the rest is split below
                break;
            };

            let mut matched: String = chars[position..position + length].iter().collect();
            position += length;

            if element.contains(LITERAL_HYPHEN)
                && position < chars.len()
                && chars[position] == CONTINUATION_HYPHEN
            {
                matched.push(CONTINUATION_HYPHEN);
                position += 1;
            }

            let space_after = position < chars.len() && chars[position] == ' ';
            while position < chars.len() && chars[position] == ' ' {
                position += 1;
            }
            if space_after {
                matched.push(' ');
            }

            result.push(matched);
            pattern_index += 1;
        }

        if position < chars.len() {
            let remaining: String = chars[position..].iter().collect();
            result.extend(split_into_characters(&remaining));
        }

        (result, pattern_index - start)
    }

    /// Shortest prefix length at `start` whose normalized key equals the
    /// element's, searching up to `max(2 × element length, min_window)`
    fn find_shortest_match(&self, chars: &[char], start: usize, element: &str) -> Option<usize> {
        let clean = clean_syllable(element);
        if clean.trim().is_empty() {
            return None;
        }

        let target = normalize_for_comparison(&clean);
        let element_length = clean.chars().count();
        let max_length = (element_length * 2)
            .max(self.min_window)
            .min(chars.len() - start);

        (1..=max_length).find(|&length| {
            let candidate: String = chars[start..start + length].iter().collect();
            normalize_for_comparison(&candidate) == target
        })
    }

    /// Re-match the syllables after `merged_index` once a manual merge has
    /// been made
    ///
    /// The tail is re-matched only if its text is primarily Latin, and the
    /// result is kept only if it has fewer syllables than before.
    pub fn try_auto_merge_remaining_line(
        &self,
        syllables: &[String],
        pattern: &[String],
        merged_index: usize,
    ) -> Vec<String> {
        let check_from = merged_index + 1;
        if check_from >= syllables.len() {
            return syllables.to_vec();
        }

        let remaining = &syllables[check_from..];
        let remaining_text: String = remaining.concat();

        if !is_primarily_latin(&remaining_text) {
            return syllables.to_vec();
        }

        let Some(remaining_pattern) = pattern.get(check_from..).filter(|p| !p.is_empty()) else {
            return syllables.to_vec();
        };

        let auto_merged = self.auto_match_syllables(&remaining_text, remaining_pattern);
        if auto_merged.len() >= remaining.len() {
            return syllables.to_vec();
        }

        log::debug!(
            "try_auto_merge_remaining_line: {} -> {} syllables after index {}",
            remaining.len(),
            auto_merged.len(),
            merged_index
        );

        let mut merged = syllables[..check_from].to_vec();
        merged.extend(auto_merged);
        merged
    }
}
