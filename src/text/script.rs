//! Alphabet classification
//!
//! Script ranges are checked in a fixed priority order (Cyrillic, CJK,
//! Arabic); anything else counts as Latin.

use serde::{Deserialize, Serialize};
use crate::models::Script;

const CYRILLIC_RANGES: &[(char, char)] = &[('\u{0400}', '\u{04FF}')];

const CJK_RANGES: &[(char, char)] = &[
    ('\u{4E00}', '\u{9FFF}'), // CJK unified ideographs
    ('\u{3040}', '\u{309F}'), // Hiragana
    ('\u{30A0}', '\u{30FF}'), // Katakana
];

const ARABIC_RANGES: &[(char, char)] = &[('\u{0600}', '\u{06FF}')];

/// Latin letters including Latin-1 and Latin Extended-A/B
const LATIN_LETTER_RANGES: &[(char, char)] = &[
    ('a', 'z'),
    ('A', 'Z'),
    ('\u{00C0}', '\u{00FF}'),
    ('\u{0100}', '\u{017F}'),
    ('\u{0180}', '\u{024F}'),
];

/// Punctuation that attaches to whichever run it trails
const RUN_PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '\'', '"', '(', ')', '[', ']', '{', '}', '-',
    '\u{2019}', '\u{201D}', '\u{2026}',
];

fn in_ranges(ch: char, ranges: &[(char, char)]) -> bool {
    ranges.iter().any(|&(lo, hi)| ch >= lo && ch <= hi)
}

pub(crate) fn is_cyrillic(ch: char) -> bool {
    in_ranges(ch, CYRILLIC_RANGES)
}

pub(crate) fn is_cjk(ch: char) -> bool {
    in_ranges(ch, CJK_RANGES)
}

pub(crate) fn is_arabic(ch: char) -> bool {
    in_ranges(ch, ARABIC_RANGES)
}

fn is_latin_letter(ch: char) -> bool {
    in_ranges(ch, LATIN_LETTER_RANGES)
}

fn is_run_punctuation(ch: char) -> bool {
    RUN_PUNCTUATION.contains(&ch)
}

/// Detect the script family of a text
///
/// The first family found anywhere in the text wins, so text mixing Latin
/// and Cyrillic is classified as Cyrillic.
pub fn detect_script(text: &str) -> Script {
    if text.chars().any(is_cyrillic) {
        Script::Cyrillic
    } else if text.chars().any(is_cjk) {
        Script::Cjk
    } else if text.chars().any(is_arabic) {
        Script::Arabic
    } else {
        Script::Latin
    }
}

/// True if ASCII letters make up at least half of the non-whitespace characters
pub fn is_primarily_latin(text: &str) -> bool {
    let total = text.chars().filter(|c| !c.is_whitespace()).count();
    if total == 0 {
        return false;
    }
    let latin = text.chars().filter(|c| c.is_ascii_alphabetic()).count();
    latin * 2 >= total
}

/// A maximal run of Latin or non-Latin text
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScriptRun {
    pub text: String,
    pub is_latin: bool,
}

/// Split text into alternating Latin and non-Latin runs
///
/// Punctuation and whitespace never start a run: they stay with the run they
/// follow ("Беги, run" keeps the comma with "Беги"). Punctuation at the very
/// start joins the first lettered run. Whitespace-only runs are dropped.
pub fn segment_by_script(text: &str) -> Vec<ScriptRun> {
    let mut runs = Vec::new();
    let mut current = String::new();
    let mut current_is_latin = true;
    let mut has_letter = false;

    for ch in text.chars() {
        if is_run_punctuation(ch) || ch.is_whitespace() {
            current.push(ch);
            continue;
        }

        let ch_is_latin = is_latin_letter(ch);

        if !has_letter {
            current_is_latin = ch_is_latin;
            has_letter = true;
            current.push(ch);
        } else if ch_is_latin == current_is_latin {
            current.push(ch);
        } else {
            if !current.trim().is_empty() {
                runs.push(ScriptRun {
                    text: std::mem::take(&mut current),
                    is_latin: current_is_latin,
                });
            }
            current.push(ch);
            current_is_latin = ch_is_latin;
        }
    }

    if !current.trim().is_empty() {
        runs.push(ScriptRun {
            text: current,
            is_latin: current_is_latin,
        });
    }

    runs
}
