//! Vocals export parser
//!
//! Reads every `<vocal>` element of a vocals export with roxmltree. The
//! attribute strings are kept exactly as written so they can be re-emitted
//! unchanged on export.

use crate::errors::LyricError;
use crate::models::{ParsedVocals, Record};

const VOCALS_TAG_OPEN: &str = "<vocals";

/// Text preceding the `<vocals` element, or empty if there is none
pub fn extract_header(xml: &str) -> &str {
    match xml.find(VOCALS_TAG_OPEN) {
        Some(start) => &xml[..start],
        None => "",
    }
}

/// Parse a vocals export into records
///
/// Missing attributes become empty strings. Fails only when the markup is
/// not well-formed.
pub fn parse_vocals(xml: &str) -> Result<ParsedVocals, LyricError> {
    let mut options = roxmltree::ParsingOptions::default();
    options.allow_dtd = true;

    let document = roxmltree::Document::parse_with_options(xml, options)
        .map_err(|e| LyricError::InvalidXml(e.to_string()))?;

    let vocals: Vec<Record> = document
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == "vocal")
        .map(|node| {
            let attr = |name: &str| node.attribute(name).unwrap_or("").to_string();
            Record::new(attr("time"), attr("note"), attr("length"), attr("lyric"))
        })
        .collect();

    log::debug!("parse_vocals: {} vocal records", vocals.len());

    Ok(ParsedVocals {
        header: extract_header(xml).to_string(),
        vocals,
    })
}
