//! Per-line division with script-segmented fallback

use crate::models::clean_syllable;
use crate::text::{is_primarily_latin, segment_by_script, split_into_characters};
use super::exact::match_whole_line;

/// Divide one plain-text line into syllables aligned to `pattern`
///
/// Lines that are not primarily Latin, or have no pattern, are split into
/// characters. Otherwise the whole line is matched exactly; failing that, each
/// Latin run is matched against the pattern syllables it covers and every
/// non-Latin run is split into characters.
pub fn divide_line_by_pattern(line: &str, pattern: &[String]) -> Vec<String> {
    if pattern.is_empty() || !is_primarily_latin(line) {
        return split_into_characters(line);
    }

    if let Some(matched) = match_whole_line(line, pattern) {
        return matched;
    }

    log::debug!("divide_line_by_pattern: whole-line match failed, segmenting '{}'", line);

    let mut result = Vec::new();
    let mut pattern_index = 0;

    for run in segment_by_script(line) {
        if run.is_latin && pattern_index < pattern.len() {
            let run_length = run.text.chars().filter(|c| !c.is_whitespace()).count();
            let mut consumed = 0;
            let mut run_pattern = Vec::new();

            while pattern_index < pattern.len() && consumed < run_length {
                let syllable = &pattern[pattern_index];
                consumed += clean_syllable(syllable).chars().count();
                run_pattern.push(syllable.clone());
                pattern_index += 1;
            }

            match match_whole_line(&run.text, &run_pattern) {
                Some(matched) => result.extend(matched),
                None => result.extend(split_into_characters(&run.text)),
            }
        } else {
            result.extend(split_into_characters(&run.text));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_line() {
        let result = divide_line_by_pattern("Hello world", &pattern(&["Hel-", "lo", "wor-", "ld+"]));
        assert_eq!(result, pattern(&["Hel-", "lo", "wor-", "ld"]));
    }

    #[test]
    fn test_non_latin_line_split_into_characters() {
        let result = divide_line_by_pattern("你好 世界", &pattern(&["ni-", "hao+"]));
        assert_eq!(result, pattern(&["你", "好 ", "世", "界"]));
    }

    #[test]
    fn test_no_pattern_split_into_characters() {
        assert_eq!(divide_line_by_pattern("ab", &[]), pattern(&["a", "b"]));
    }

    #[test]
    fn test_mixed_runs() {
        // whole line fails because of the CJK character; Latin runs still align
        let result = divide_line_by_pattern(
            "Hello world 好",
            &pattern(&["Hel-", "lo", "wor-", "ld", "hao+"]),
        );
        assert_eq!(result, pattern(&["Hel-", "lo", "wor-", "ld", "好"]));
    }

    #[test]
    fn test_failed_run_falls_back_to_characters() {
        let result = divide_line_by_pattern("Hi there", &pattern(&["Yo+"]));
        assert_eq!(result, pattern(&["H", "i ", "t", "h", "e", "r", "e"]));
    }
}
