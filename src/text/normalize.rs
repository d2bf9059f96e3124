//! Comparison keys for cross-alphabet equality
//!
//! Normalized text is only ever compared, never displayed.

use unicode_normalization::UnicodeNormalization;
use super::script::{is_arabic, is_cjk, is_cyrillic};

/// Combining Diacritical Marks block
fn is_combining_diacritic(ch: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&ch)
}

fn is_comparable(ch: char) -> bool {
    ch.is_ascii_lowercase()
        || ch.is_ascii_digit()
        || is_cyrillic(ch)
        || is_cjk(ch)
        || is_arabic(ch)
}

/// Decompose, drop diacritics, lowercase and keep only letters/digits of the
/// supported scripts
pub fn normalize_for_comparison(text: &str) -> String {
    let stripped: String = text.nfd().filter(|&c| !is_combining_diacritic(c)).collect();
    stripped
        .to_lowercase()
        .chars()
        .filter(|&c| is_comparable(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_and_whitespace() {
        assert_eq!(normalize_for_comparison("Hello World"), "helloworld");
    }

    #[test]
    fn test_diacritics_removed() {
        assert_eq!(normalize_for_comparison("Café Déjà"), "cafedeja");
        assert_eq!(normalize_for_comparison("Ёлка"), "елка");
    }

    #[test]
    fn test_punctuation_removed() {
        assert_eq!(normalize_for_comparison("don't, stop!"), "dontstop");
        assert_eq!(normalize_for_comparison("wor-ld+"), "world");
    }

    #[test]
    fn test_scripts_kept() {
        assert_eq!(normalize_for_comparison("你好。"), "你好");
        assert_eq!(normalize_for_comparison("ПРИВЕТ"), "привет");
        assert_eq!(normalize_for_comparison("سلام"), "سلام");
        assert_eq!(normalize_for_comparison("abc123"), "abc123");
    }
}
