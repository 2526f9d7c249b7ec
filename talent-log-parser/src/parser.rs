//! Main parser API
//!
//! This module provides the primary interface for the parser library.
//! The LogParser struct is the entry point: it detects the log format and
//! dispatches to the matching strategy.

use crate::config::ParserConfig;
use crate::formats::LogFormat;
use crate::types::{ParseError, Result, UserTalentRecord};

/// The main parser struct - entry point for all parsing operations
///
/// Holds only configuration, so one instance can be shared across threads
/// and reused for any number of logs.
#[derive(Debug, Clone, Default)]
pub struct LogParser {
    config: ParserConfig,
}

impl LogParser {
    /// Create a parser with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with a custom configuration
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Get the active configuration
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a log into user talent records
    ///
    /// Never fails: missing or blank input gives an empty vector, and any
    /// section that cannot be parsed is logged and left out.
    ///
    /// # Example
    /// ```
    /// use talent_log_parser::LogParser;
    ///
    /// let parser = LogParser::new();
    /// let records = parser.parse(Some("===Alice===\n[10:00] {\"team_skill\":2}"));
    ///
    /// assert_eq!(records.len(), 1);
    /// assert_eq!(records[0].user_name, "Alice");
    /// assert_eq!(records[0].captured_at.as_deref(), Some("10:00"));
    /// ```
    pub fn parse(&self, text: Option<&str>) -> Vec<UserTalentRecord> {
        let text = match require_input(text) {
            Ok(text) => text,
            Err(e) => {
                log::debug!("Nothing to parse: {}", e);
                return Vec::new();
            }
        };

        let format = LogFormat::detect(text);
        log::debug!("Detected {} log format ({} bytes)", format, text.len());

        let records = format.parse(text, &self.config);
        log::debug!("Parsed {} record(s)", records.len());
        records
    }

    /// Parse log text that is known to be present
    pub fn parse_str(&self, text: &str) -> Vec<UserTalentRecord> {
        self.parse(Some(text))
    }
}

/// Reject absent or blank input
fn require_input(text: Option<&str>) -> Result<&str> {
    match text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(ParseError::EmptyInput),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_FALLBACK_USER_NAME;

    #[test]
    fn test_empty_input() {
        let parser = LogParser::new();
        assert!(parser.parse(None).is_empty());
        assert!(parser.parse(Some("")).is_empty());
        assert!(parser.parse_str("  \n\t ").is_empty());
    }

    #[test]
    fn test_require_input() {
        assert!(matches!(require_input(None), Err(ParseError::EmptyInput)));
        assert!(matches!(require_input(Some(" ")), Err(ParseError::EmptyInput)));
        assert_eq!(require_input(Some("x")).unwrap(), "x");
    }

    #[test]
    fn test_dispatch_new_format() {
        let parser = LogParser::new();
        let records = parser.parse_str("===Alice===\n{\"skill_tree\":\"X\"}");

        // NEW path keeps missing fields absent
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].snapshot.team_skill, None);
    }

    #[test]
    fn test_dispatch_legacy_format() {
        let parser = LogParser::new();
        let records = parser.parse_str("dump: {\"skill_tree\":\"X\"}");

        // LEGACY path fills defaults
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].user_name, DEFAULT_FALLBACK_USER_NAME);
        assert_eq!(records[0].snapshot.team_skill, Some(0));
    }

    #[test]
    fn test_custom_config() {
        let config = ParserConfig::new().with_fallback_user_name("solo");
        let parser = LogParser::with_config(config);

        assert_eq!(parser.config().fallback_user_name, "solo");
        assert_eq!(parser.parse_str("{}")[0].user_name, "solo");
    }

    #[test]
    fn test_parser_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LogParser>();
    }
}
