//! Single-user log parser
//!
//! Older logs hold one JSON talent object somewhere in the text and no section
//! layout. Every snapshot field is optional here and gets a default when it is
//! missing or has the wrong shape.

use crate::config::ParserConfig;
use crate::extract;
use crate::types::{ParseError, Result, TalentSnapshot, UserTalentRecord};
use serde_json::Value;

/// Parser for undelimited single-user logs
pub struct LegacyFormatParser;

impl LegacyFormatParser {
    /// Parse the log into at most one record
    pub fn parse(text: &str, config: &ParserConfig) -> Vec<UserTalentRecord> {
        match Self::parse_record(text, config) {
            Ok(record) => {
                log::trace!("Parsed legacy record for user '{}'", record.user_name);
                vec![record]
            }
            Err(e @ ParseError::MalformedPayload(_)) => {
                log::warn!("Failed to parse legacy log: {}", e);
                Vec::new()
            }
            Err(e) => {
                log::debug!("No legacy record: {}", e);
                Vec::new()
            }
        }
    }

    /// Extract the single record, filling defaults
    ///
    /// The user name comes from the first `===name===` anywhere in the text,
    /// otherwise from `config.fallback_user_name`. No timestamp is read.
    pub fn parse_record(text: &str, config: &ParserConfig) -> Result<UserTalentRecord> {
        let fragment = extract::capture_object(text, config.brace_capture).ok_or_else(|| {
            ParseError::StructuralMismatch("no JSON object in legacy log".to_string())
        })?;

        let value: Value = serde_json::from_str(fragment)?;
        let snapshot = TalentSnapshot::from_json(&value).with_defaults();

        let user_name = extract::marker_name(text)
            .map(str::to_string)
            .unwrap_or_else(|| config.fallback_user_name.clone());

        Ok(UserTalentRecord::new(user_name, None, snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_FALLBACK_USER_NAME;
    use std::collections::BTreeMap;

    #[test]
    fn test_parse_with_name_marker() {
        let text = "loaded\n===Alice===\n{\"talent_levels\":{\"1\":5},\"skill_tree\":\"X\",\"team_skill\":2}";
        let records = LegacyFormatParser::parse(text, &ParserConfig::default());

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.user_name, "Alice");
        assert_eq!(record.captured_at, None);
        assert!(record.present_fields.is_empty());
        assert_eq!(record.snapshot.talent_levels, Some(BTreeMap::from([("1".to_string(), 5)])));
        assert_eq!(record.snapshot.skill_tree.as_deref(), Some("X"));
        assert_eq!(record.snapshot.team_skill, Some(2));
    }

    #[test]
    fn test_fallback_name() {
        let records = LegacyFormatParser::parse("{\"team_skill\":1}", &ParserConfig::default());
        assert_eq!(records[0].user_name, DEFAULT_FALLBACK_USER_NAME);

        let config = ParserConfig::new().with_fallback_user_name("me");
        let records = LegacyFormatParser::parse("{\"team_skill\":1}", &config);
        assert_eq!(records[0].user_name, "me");
    }

    #[test]
    fn test_defaults_for_missing_and_mistyped_fields() {
        let records = LegacyFormatParser::parse(
            "{\"talent_levels\":{\"1\":3,\"2\":\"high\"},\"skill_tree\":42}",
            &ParserConfig::default(),
        );

        let snapshot = &records[0].snapshot;
        assert_eq!(snapshot.talent_levels, Some(BTreeMap::from([("1".to_string(), 3)])));
        assert_eq!(snapshot.skill_tree.as_deref(), Some(""));
        assert_eq!(snapshot.team_skill, Some(0));
    }

    #[test]
    fn test_empty_object() {
        let records = LegacyFormatParser::parse("result: {}", &ParserConfig::default());
        assert_eq!(records[0].snapshot.talent_levels, Some(BTreeMap::new()));
    }

    #[test]
    fn test_timestamp_is_ignored() {
        let records = LegacyFormatParser::parse("[2024-01-01] {\"team_skill\":1}", &ParserConfig::default());
        assert_eq!(records[0].captured_at, None);
    }

    #[test]
    fn test_malformed_or_missing_object() {
        let config = ParserConfig::default();
        assert!(LegacyFormatParser::parse("{talent_levels: {}}", &config).is_empty());
        assert!(LegacyFormatParser::parse("nothing to see", &config).is_empty());

        assert!(matches!(
            LegacyFormatParser::parse_record("{\"a\":1,}", &config),
            Err(ParseError::MalformedPayload(_))
        ));
        assert!(matches!(
            LegacyFormatParser::parse_record("plain", &config),
            Err(ParseError::StructuralMismatch(_))
        ));
    }
}
