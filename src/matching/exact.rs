//! Whole-line exact matching

use crate::config::CONTINUATION_HYPHEN;
use crate::models::clean_syllable;
use crate::text::normalize_for_comparison;

/// Slice a plain-text line by the lengths of the pattern syllables
///
/// Whitespace is removed from the plain text and markers from the pattern;
/// if both normalize to the same key, the plain text is cut into consecutive
/// pieces of each pattern syllable's cleaned length. Pieces whose pattern
/// syllable carried a continuation hyphen get one appended.
///
/// Returns `None` when the keys differ or the plain text runs out before the
/// pattern does. Characters left over after the last slice stay on the last
/// syllable.
///
/// # Example
/// `"Hello world"` against `["Hel-", "lo", "wor-", "ld+"]` gives
/// `["Hel-", "lo", "wor-", "ld"]`.
pub fn match_whole_line(plain: &str, pattern: &[String]) -> Option<Vec<String>> {
    if pattern.is_empty() {
        return None;
    }

    let plain_chars: Vec<char> = plain.chars().filter(|c| !c.is_whitespace()).collect();
    let plain_no_spaces: String = plain_chars.iter().collect();
    let expected: String = pattern.iter().map(|s| clean_syllable(s)).collect();

    let normalized_plain = normalize_for_comparison(&plain_no_spaces);
    let normalized_expected = normalize_for_comparison(&expected);

    if normalized_plain != normalized_expected {
        log::debug!(
            "match_whole_line: keys differ ('{}' vs '{}')",
            normalized_plain,
            normalized_expected
        );
        return None;
    }

    let mut result = Vec::with_capacity(pattern.len());
    let mut position = 0;

    for syllable in pattern {
        let has_hyphen = syllable.ends_with(CONTINUATION_HYPHEN);
        let length = clean_syllable(syllable).chars().count();

        if position + length > plain_chars.len() {
            log::debug!("match_whole_line: length mismatch at position {}", position);
            return None;
        }

        let mut piece: String = plain_chars[position..position + length].iter().collect();
        if has_hyphen {
            piece.push(CONTINUATION_HYPHEN);
        }

        result.push(piece);
        position += length;
    }

    if position < plain_chars.len() {
        let leftover: String = plain_chars[position..].iter().collect();
        if let Some(last) = result.last_mut() {
            if last.ends_with(CONTINUATION_HYPHEN) {
                last.pop();
                last.push_str(&leftover);
                last.push(CONTINUATION_HYPHEN);
            } else {
                last.push_str(&leftover);
            }
        }
    }

    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_hello_world() {
        let result = match_whole_line("Hello world", &pattern(&["Hel-", "lo", "wor-", "ld+"]));
        assert_eq!(result, Some(pattern(&["Hel-", "lo", "wor-", "ld"])));
    }

    #[test]
    fn test_plain_spelling_wins() {
        let result = match_whole_line("Café au lait", &pattern(&["ca-", "fe", "au", "lait+"]));
        assert_eq!(result, Some(pattern(&["Ca-", "fé", "au", "lait"])));
    }

    #[test]
    fn test_mismatch_returns_none() {
        assert_eq!(match_whole_line("Goodbye", &pattern(&["Hel-", "lo+"])), None);
        assert_eq!(match_whole_line("Hello", &[]), None);
    }

    #[test]
    fn test_short_plain_text_aborts() {
        // normalizes equal but the plain text has fewer characters
        assert_eq!(match_whole_line("Hello", &pattern(&["He-", "l,", "lo+"])), None);
    }

    #[test]
    fn test_leftover_kept_on_last_syllable() {
        let result = match_whole_line("Hello!", &pattern(&["Hel-", "lo+"]));
        assert_eq!(result, Some(pattern(&["Hel-", "lo!"])));
    }
}
