//! NEW-format writer
//!
//! Serializes records back into `===name===` sections so that parsing the
//! output yields the same records. Used to convert legacy logs.

use crate::formats::MARKER;
use crate::types::UserTalentRecord;

/// Render one record as a section: `===name===\n[time] {json}\n`
///
/// The bracket part is written only when `captured_at` is set.
pub fn write_section(record: &UserTalentRecord) -> serde_json::Result<String> {
    let snapshot = escape_markup(&serde_json::to_string(&record.snapshot)?);

    let body = match &record.captured_at {
        Some(time) => format!("[{}] {}", time, snapshot),
        None => snapshot,
    };

    Ok(format!("{}{}{}\n{}\n", MARKER, record.user_name, MARKER, body))
}

/// Escape characters the section layout reads as markup
///
/// A snapshot has no arrays, so every `[`, `]` and `=` sits inside a JSON
/// string, where a `\uXXXX` escape decodes to the same text.
fn escape_markup(json: &str) -> String {
    json.replace('[', "\\u005b")
        .replace(']', "\\u005d")
        .replace('=', "\\u003d")
}

/// Render all records as one NEW-format log
pub fn write_new_format(records: &[UserTalentRecord]) -> serde_json::Result<String> {
    let mut out = String::new();
    for record in records {
        out.push_str(&write_section(record)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TalentSnapshot;
    use crate::LogParser;

    #[test]
    fn test_write_section() {
        let snapshot = TalentSnapshot {
            team_skill: Some(2),
            ..Default::default()
        };

        let with_time = UserTalentRecord::new("Alice", Some("10:00".into()), snapshot.clone());
        assert_eq!(write_section(&with_time).unwrap(), "===Alice===\n[10:00] {\"team_skill\":2}\n");

        let without_time = UserTalentRecord::new("Bob", None, snapshot);
        assert_eq!(write_section(&without_time).unwrap(), "===Bob===\n{\"team_skill\":2}\n");
    }

    #[test]
    fn test_written_log_reparses() {
        let source = "===Alice===\n[2024-01-01 10:00] {\"talent_levels\":{\"1\":5,\"4\":9},\"skill_tree\":\"X\",\"team_skill\":2}\n\
                      ===Bob===\n{\"skill_tree\":\"Y\"}\n";
        let parser = LogParser::new();
        let records = parser.parse_str(source);
        assert_eq!(records.len(), 2);

        let written = write_new_format(&records).unwrap();
        assert_eq!(parser.parse_str(&written), records);
    }

    #[test]
    fn test_legacy_converts_to_new_format() {
        let parser = LogParser::new();
        let legacy = parser.parse_str("stats for ===Carol=== {\"team_skill\":4}");
        let written = write_new_format(&legacy).unwrap();

        assert!(written.starts_with("===Carol===\n"));
        assert_eq!(parser.parse_str(&written), legacy);
    }

    #[test]
    fn test_escape_markup() {
        assert_eq!(escape_markup(r#"{"skill_tree":"[a]=b"}"#), r#"{"skill_tree":"\u005ba\u005d\u003db"}"#);
    }

    #[test]
    fn test_bracketed_skill_tree_round_trips() {
        let parser = LogParser::new();
        let legacy = parser.parse_str("dump {\"skill_tree\":\"[fire]\",\"team_skill\":1}");
        assert_eq!(legacy[0].captured_at, None);

        let written = write_new_format(&legacy).unwrap();
        let reparsed = parser.parse_str(&written);
        assert_eq!(reparsed, legacy);
        assert_eq!(reparsed[0].snapshot.skill_tree.as_deref(), Some("[fire]"));
    }

    #[test]
    fn test_marker_in_skill_tree_round_trips() {
        let parser = LogParser::new();
        let legacy = parser.parse_str("dump {\"skill_tree\":\"a===b\",\"team_skill\":1}");

        let written = write_new_format(&legacy).unwrap();
        assert_eq!(written.matches("===").count(), 2);
        assert_eq!(parser.parse_str(&written), legacy);
    }

    #[test]
    fn test_captured_at_with_escaped_snapshot() {
        let record = UserTalentRecord::new(
            "Alice",
            Some("10:00".into()),
            TalentSnapshot {
                skill_tree: Some("[x]".into()),
                ..Default::default()
            },
        );
        let written = write_new_format(std::slice::from_ref(&record)).unwrap();
        assert_eq!(LogParser::new().parse_str(&written), vec![record]);
    }

    #[test]
    fn test_empty_record_list() {
        assert_eq!(write_new_format(&[]).unwrap(), "");
    }
}
