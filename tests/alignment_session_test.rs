// Session-level alignment: imports, merges, history and export

use lyricsmith_wasm::models::{RowType, Script};
use lyricsmith_wasm::session::{Command, Session};
use lyricsmith_wasm::LyricError;

const SONG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<vocals count="7">
  <vocal time="1.000" note="60" length="0.250" lyric="Hel-"/>
  <vocal time="1.250" note="62" length="0.500" lyric="lo"/>
  <vocal time="2.000" note="64" length="0.300" lyric="wor-"/>
  <vocal time="2.400" note="65" length="0.600" lyric="ld+"/>
  <vocal time="4.000" note="67" length="0.500" lyric="I"/>
  <vocal time="4.500" note="69" length="0.500" lyric="love"/>
  <vocal time="5.000" note="71" length="1.000" lyric="you+"/>
</vocals>
"#;

const LYRICS: &str = "Hello world\nI love you";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Session with both sides imported
fn loaded_session() -> Session {
    let mut session = Session::default();
    session.import_annotated(SONG).unwrap();
    session.import_plain_text(LYRICS);
    session
}

/// One line of `count` "la" syllables
fn la_song(count: usize) -> String {
    let mut xml = String::from("<vocals>\n");
    for i in 0..count {
        let lyric = if i + 1 == count { "la+" } else { "la-" };
        xml.push_str(&format!(
            "  <vocal time=\"{:.3}\" note=\"60\" length=\"0.500\" lyric=\"{}\"/>\n",
            i as f64 * 0.5,
            lyric
        ));
    }
    xml.push_str("</vocals>\n");
    xml
}

#[test]
fn test_import_aligns_both_sides() {
    let session = loaded_session();
    let state = session.state();

    assert_eq!(state.line_groups, vec![vec![0, 1, 2, 3], vec![4, 5, 6]]);
    assert_eq!(
        state.plain_text_lines,
        vec![strings(&["Hel-", "lo", "wor-", "ld"]), strings(&["I", "love", "you"])]
    );
    assert_eq!(session.original_syllable_count(), 7);
    assert_eq!(session.current_syllable_count(), 7);
    assert_eq!(session.script(), Script::Latin);
    assert!(session.diagnostics().is_aligned());
}

#[test]
fn test_unchanged_alignment_round_trips() {
    let session = loaded_session();
    assert_eq!(session.serialize().unwrap(), SONG);
}

#[test]
fn test_annotated_merge_combines_records() {
    let mut session = loaded_session();
    session.merge_syllables(0, 0, RowType::Xml);

    let state = session.state();
    assert_eq!(state.records.len(), 6);
    assert_eq!(state.records[0].lyric, "Hello");
    assert_eq!(state.records[0].time, "1.000");
    assert_eq!(state.records[0].length, "0.750");
    assert_eq!(state.line_groups, vec![vec![0, 1, 2], vec![3, 4, 5]]);
    assert_eq!(state.plain_text_lines[0], strings(&["Hello", "wor-", "ld"]));
    assert_eq!(session.current_syllable_count(), 6);

    let xml = session.serialize().unwrap();
    assert!(xml.contains("<vocals count=\"6\">"));
    assert!(xml.contains(r#"<vocal time="1.000" note="60" length="0.750" lyric="Hello"/>"#));
    assert!(xml.contains(r#"<vocal time="2.000" note="64" length="0.300" lyric="wor-"/>"#));
}

#[test]
fn test_annotated_merge_shifts_later_lines() {
    let mut session = loaded_session();
    session.merge_syllables(0, 2, RowType::Xml);

    let state = session.state();
    assert_eq!(state.records[2].lyric, "world+");
    assert_eq!(state.records[2].length, "1.000");
    assert_eq!(state.line_groups, vec![vec![0, 1, 2], vec![3, 4, 5]]);
    assert_eq!(state.records[3].lyric, "I");
}

#[test]
fn test_merge_reduces_count_by_one() {
    let mut session = loaded_session();

    session.merge_syllables(1, 0, RowType::Plain);
    assert_eq!(session.current_syllable_count(), 6);
    assert_eq!(session.state().plain_text_lines[1], strings(&["Ilove", "you"]));
    // the annotated side is untouched by plain merges
    assert_eq!(session.state().records.len(), 7);

    session.merge_syllables(0, 1, RowType::Xml);
    assert_eq!(session.current_syllable_count(), 6);
    assert_eq!(session.state().records.len(), 6);
}

#[test]
fn test_invalid_merges_are_noops() {
    let mut session = loaded_session();
    let before = session.state().clone();
    let history_len = session.history().len();

    session.merge_syllables(9, 0, RowType::Xml);
    session.merge_syllables(0, 3, RowType::Xml);
    session.merge_syllables(1, 2, RowType::Plain);
    session.merge_syllables(5, 0, RowType::Plain);

    assert_eq!(session.state(), &before);
    assert_eq!(session.history().len(), history_len);
}

#[test]
fn test_undo_redo_are_inverses() {
    let mut session = loaded_session();
    let imported = session.state().clone();

    session.merge_syllables(0, 0, RowType::Xml);
    let merged = session.state().clone();
    session.merge_syllables(1, 1, RowType::Plain);
    let merged_twice = session.state().clone();

    session.undo();
    assert_eq!(session.state(), &merged);
    session.undo();
    assert_eq!(session.state(), &imported);

    // nothing further back
    session.undo();
    assert_eq!(session.state(), &imported);

    session.redo();
    assert_eq!(session.state(), &merged);
    session.redo();
    assert_eq!(session.state(), &merged_twice);
    session.redo();
    assert_eq!(session.state(), &merged_twice);
}

#[test]
fn test_new_merge_discards_redo() {
    let mut session = loaded_session();
    session.merge_syllables(0, 0, RowType::Xml);
    session.undo();
    assert!(session.history().can_redo());

    session.merge_syllables(1, 0, RowType::Plain);
    assert!(!session.history().can_redo());
    assert_eq!(session.state().records.len(), 7);
}

#[test]
fn test_history_is_capped() {
    let mut session = Session::default();
    session.import_annotated(&la_song(61)).unwrap();

    for _ in 0..60 {
        session.merge_syllables(0, 0, RowType::Xml);
    }
    assert_eq!(session.state().records.len(), 1);
    assert_eq!(session.history().len(), 50);

    for _ in 0..49 {
        session.undo();
    }
    assert_eq!(session.state().records.len(), 50);
    assert!(!session.history().can_undo());

    session.undo();
    assert_eq!(session.state().records.len(), 50);
}

#[test]
fn test_reset_line_restores_import() {
    let mut session = loaded_session();
    session.merge_syllables(1, 0, RowType::Plain);
    session.merge_syllables(1, 0, RowType::Plain);
    assert_eq!(session.state().plain_text_lines[1], strings(&["Iloveyou"]));

    session.reset_line(1);
    assert_eq!(session.state().plain_text_lines[1], strings(&["I", "love", "you"]));
    assert_eq!(session.current_syllable_count(), 7);

    session.undo();
    assert_eq!(session.state().plain_text_lines[1], strings(&["Iloveyou"]));
}

#[test]
fn test_auto_match_line_after_manual_merges() {
    let mut session = Session::default();
    session.import_annotated(&SONG.replace(
        r#"  <vocal time="4.000" note="67" length="0.500" lyric="I"/>
  <vocal time="4.500" note="69" length="0.500" lyric="love"/>
  <vocal time="5.000" note="71" length="1.000" lyric="you+"/>
"#,
        "",
    ))
    .unwrap();
    session.import_plain_text("Hello there");
    assert_eq!(
        session.state().plain_text_lines[0],
        strings(&["H", "e", "l", "l", "o ", "t", "h", "e", "r", "e"])
    );

    session.merge_syllables(0, 0, RowType::Plain);
    session.merge_syllables(0, 0, RowType::Plain);
    session.auto_match_line(0, 0);

    assert_eq!(
        session.state().plain_text_lines[0],
        strings(&["Hel", "lo ", "t", "h", "e", "r", "e"])
    );
    assert_eq!(session.current_syllable_count(), 7);

    session.undo();
    assert_eq!(session.state().plain_text_lines[0].len(), 8);
}

#[test]
fn test_failed_import_leaves_state() {
    let mut session = loaded_session();
    let before = session.state().clone();

    let err = session.import_annotated("<vocals><vocal lyric=\"a\"></vocals>").unwrap_err();
    assert!(matches!(err, LyricError::InvalidXml(_)));
    assert_eq!(session.state(), &before);
    assert!(session.error().unwrap().starts_with("XML Import Error: "));
    assert!(session.view().error.is_some());

    session.dispatch(Command::DismissError).unwrap();
    assert_eq!(session.error(), None);
}

#[test]
fn test_serialize_requires_both_sides() {
    let mut session = Session::default();
    assert_eq!(session.serialize(), Err(LyricError::MissingRecords));

    session.import_annotated(SONG).unwrap();
    assert_eq!(session.serialize(), Err(LyricError::MissingPlainText));
}

#[test]
fn test_cjk_lyrics_split_by_character() {
    let xml = r#"<vocals count="3">
  <vocal time="0.000" note="60" length="0.500" lyric="我"/>
  <vocal time="0.500" note="62" length="0.500" lyric="爱"/>
  <vocal time="1.000" note="64" length="0.500" lyric="你+"/>
</vocals>
"#;
    let mut session = Session::default();
    session.import_annotated(xml).unwrap();
    session.import_plain_text("我爱你");

    assert_eq!(session.script(), Script::Cjk);
    assert_eq!(session.state().plain_text_lines, vec![strings(&["我", "爱", "你"])]);
    assert_eq!(session.serialize().unwrap(), xml);
}

#[test]
fn test_plain_text_before_annotated() {
    let mut session = Session::default();
    session.import_plain_text(LYRICS);
    assert_eq!(session.state().plain_text_lines.len(), 2);
    assert!(session.history().is_empty());

    session.import_annotated(SONG).unwrap();
    assert_eq!(
        session.state().plain_text_lines,
        vec![strings(&["Hel-", "lo", "wor-", "ld"]), strings(&["I", "love", "you"])]
    );
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_commands_from_json() {
    let mut session = Session::default();
    let import = serde_json::json!({ "type": "import_xml", "payload": SONG }).to_string();
    session.dispatch(Command::from_json(&import).unwrap()).unwrap();
    session.dispatch(Command::ImportPlainText(LYRICS.to_string())).unwrap();

    let merge = r#"{"type":"merge_syllables","payload":{"lineIndex":1,"syllableIndex":1,"rowType":"plain"}}"#;
    session.dispatch(Command::from_json(merge).unwrap()).unwrap();
    assert_eq!(session.state().plain_text_lines[1], strings(&["I", "loveyou"]));

    session.dispatch(Command::from_json(r#"{"type":"undo"}"#).unwrap()).unwrap();
    assert_eq!(session.state().plain_text_lines[1], strings(&["I", "love", "you"]));
}

#[test]
fn test_view_reports_lines() {
    let mut session = loaded_session();
    session.merge_syllables(1, 0, RowType::Plain);
    let view = session.view();

    assert_eq!(view.lines.len(), 2);
    assert!(view.lines[0].is_matched);
    assert!(!view.lines[1].is_matched);
    assert_eq!(view.lines[1].xml_syllables, strings(&["I", "love", "you+"]));
    assert_eq!(view.current_syllable_count, 6);
    assert!(view.can_undo);
    assert!(!view.can_redo);
    assert!(!view.diagnostics.is_aligned());
}

/// Two-record song preceded by a comment naming it
fn hello_song(name: &str) -> String {
    format!(
        concat!(
            "<!-- song {} -->\n",
            "<vocals count=\"2\">\n",
            "  <vocal time=\"1.000\" note=\"60\" length=\"0.250\" lyric=\"Hel-\"/>\n",
            "  <vocal time=\"1.250\" note=\"62\" length=\"0.500\" lyric=\"lo+\"/>\n",
            "</vocals>\n",
        ),
        name
    )
}

#[test]
fn test_undo_annotated_reimport_restores_header_and_counts() {
    let song_a = hello_song("A");
    let mut session = Session::default();
    session.import_annotated(&song_a).unwrap();
    session.import_plain_text("Hello");
    assert_eq!(session.serialize().unwrap(), song_a);

    session.import_annotated(&la_song(3).replace("<vocals>", "<!-- song B -->\n<vocals>")).unwrap();
    assert_eq!(session.original_syllable_count(), 3);
    assert!(session.serialize().unwrap().starts_with("<!-- song B -->"));

    session.undo();
    assert_eq!(session.header(), "<!-- song A -->\n");
    assert_eq!(session.original_syllable_count(), 2);
    assert_eq!(session.current_syllable_count(), 2);
    assert_eq!(session.serialize().unwrap(), song_a);

    session.redo();
    assert_eq!(session.original_syllable_count(), 3);
    assert!(session.serialize().unwrap().starts_with("<!-- song B -->"));
}

#[test]
fn test_undo_plain_reimport_restores_source_text() {
    let mut session = loaded_session();
    session.import_plain_text("Goodbye moon\nWe love you");
    assert_ne!(session.state().plain_text_lines[0], strings(&["Hel-", "lo", "wor-", "ld"]));

    session.undo();
    assert_eq!(session.state().import.plain_text_raw, LYRICS);

    // the annotated merge re-aligns the restored text, not the undone import
    session.merge_syllables(0, 0, RowType::Xml);
    assert_eq!(session.state().plain_text_lines[0], strings(&["Hello", "wor-", "ld"]));
    assert_eq!(session.state().plain_text_lines[1], strings(&["I", "love", "you"]));
}

#[test]
fn test_case_and_diacritic_changes_keep_markers() {
    let mut session = Session::default();
    session.import_annotated(SONG).unwrap();
    session.import_plain_text("HELLO  w\u{f6}rld\ni LOVE you");

    assert_eq!(
        session.state().plain_text_lines,
        vec![strings(&["HEL-", "LO", "w\u{f6}r-", "ld"]), strings(&["i", "LOVE", "you"])]
    );

    let xml = session.serialize().unwrap();
    let lyrics: Vec<&str> = xml
        .lines()
        .filter_map(|line| line.split("lyric=\"").nth(1))
        .map(|rest| rest.trim_end_matches("\"/>"))
        .collect();
    assert_eq!(lyrics, vec!["HEL-", "LO", "w\u{f6}r-", "ld+", "i", "LOVE", "you+"]);
    assert!(xml.contains(r#"<vocal time="2.000" note="64" length="0.300" lyric="wör-"/>"#));
}
