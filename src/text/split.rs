//! Fallback splitters
//!
//! Used when no annotated pattern is available or when pattern matching gave
//! up. The Latin splitter is a crude "break before every vowel" heuristic;
//! real alignment relies on the pattern matchers.

use crate::models::Script;

/// Opening punctuation glued to the character that follows it
const LEADING_PUNCTUATION: &[char] = &['(', '\u{201C}', '\u{2018}'];

/// Closing punctuation glued to the character before it
const TRAILING_PUNCTUATION: &[char] = &[',', '.', '!', '?', '\'', ')', '-', '\u{2019}', '\u{201D}'];

const LATIN_VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'A', 'E', 'I', 'O', 'U'];

/// Split text into single-character syllables
///
/// Whitespace is skipped, except that one space directly after a unit is
/// kept on it to mark a word boundary. Closing punctuation is attached to the
/// preceding character and opening brackets/quotes to the following one.
///
/// # Examples
/// - "你好 世界" -> ["你", "好 ", "世", "界"]
/// - "(你)" -> ["(你", ")"]
pub fn split_into_characters(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut units = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];

        if ch.is_whitespace() {
            i += 1;
            continue;
        }

        if LEADING_PUNCTUATION.contains(&ch) {
            let mut combined = String::from(ch);
            i += 1;
            while i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }
            if i < chars.len() {
                combined.push(chars[i]);
                i += 1;
            }
            if i < chars.len() && chars[i] == ' ' {
                combined.push(' ');
                i += 1;
            }
            units.push(combined);
            continue;
        }

        let mut unit = String::from(ch);
        i += 1;

        while i < chars.len() && TRAILING_PUNCTUATION.contains(&chars[i]) {
            unit.push(chars[i]);
            i += 1;
        }

        if i < chars.len() && chars[i] == ' ' {
            unit.push(' ');
            i += 1;
        }

        units.push(unit);
    }

    units
}

/// Split Latin text before every vowel, word by word
fn split_latin_into_syllables(text: &str) -> Vec<String> {
    let mut syllables = Vec::new();

    for word in text.split_whitespace() {
        let mut part = String::new();
        for ch in word.chars() {
            if LATIN_VOWELS.contains(&ch) && !part.is_empty() {
                syllables.push(std::mem::take(&mut part));
            }
            part.push(ch);
        }
        if !part.is_empty() {
            syllables.push(part);
        }
    }

    if syllables.is_empty() {
        vec![text.to_string()]
    } else {
        syllables
    }
}

/// Split one line using the splitter for its script
pub fn split_text_by_syllables(text: &str, script: Script) -> Vec<String> {
    if script.is_latin() {
        split_latin_into_syllables(text)
    } else {
        split_into_characters(text)
    }
}

/// Split free text into non-empty lines of syllables
pub fn parse_text_into_syllables(text: &str, script: Script) -> Vec<Vec<String>> {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| split_text_by_syllables(line, script))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_characters_with_spaces() {
        assert_eq!(split_into_characters("你好 世界"), vec!["你", "好 ", "世", "界"]);
    }

    #[test]
    fn test_split_characters_punctuation() {
        assert_eq!(split_into_characters("Да, нет!"), vec!["Д", "а, ", "н", "е", "т!"]);
        assert_eq!(split_into_characters("(你)好"), vec!["(你", ")", "好"]);
        assert_eq!(split_into_characters("\u{201C} 你"), vec!["\u{201C}你"]);
    }

    #[test]
    fn test_split_characters_skips_runs_of_whitespace() {
        assert_eq!(split_into_characters("  a   b  "), vec!["a ", "b "]);
        assert!(split_into_characters("").is_empty());
    }

    #[test]
    fn test_latin_vowel_splitter() {
        assert_eq!(split_text_by_syllables("hello world", Script::Latin), vec!["h", "ell", "o", "w", "orld"]);
        assert_eq!(split_text_by_syllables("   ", Script::Latin), vec!["   "]);
    }

    #[test]
    fn test_parse_text_skips_blank_lines() {
        let lines = parse_text_into_syllables("你好\n\n  \n世界", Script::Cjk);
        assert_eq!(lines, vec![vec!["你", "好"], vec!["世", "界"]]);
    }
}
