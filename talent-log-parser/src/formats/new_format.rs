//! Multi-user log parser
//!
//! Layout: `===name===payload===name===payload...`. Each payload carries one
//! JSON talent object and optionally a `[timestamp]`.
//!
//! Splitting on the marker gives alternating segments; odd indices are names
//! and the segment after each is its payload. A pair that cannot be parsed is
//! logged and skipped, the scan continues with the next pair.

use super::MARKER;
use crate::config::ParserConfig;
use crate::extract;
use crate::types::{ParseError, Result, TalentSnapshot, UserTalentRecord};
use serde_json::Value;

/// Parser for `===name===`-delimited logs
pub struct NewFormatParser;

impl NewFormatParser {
    /// Parse every user section, in encounter order
    pub fn parse(text: &str, config: &ParserConfig) -> Vec<UserTalentRecord> {
        let segments: Vec<&str> = text.split(MARKER).collect();
        let mut records = Vec::new();

        for i in (1..segments.len()).step_by(2) {
            let name = segments[i].trim();
            let payload = segments.get(i + 1).copied().unwrap_or_default();

            if name.is_empty() || payload.is_empty() {
                log::debug!("Skipping section {}: missing name or payload", i / 2);
                continue;
            }

            match Self::parse_section(name, payload, config) {
                Ok(record) => {
                    log::trace!("Parsed section for user '{}'", record.user_name);
                    records.push(record);
                }
                Err(e @ ParseError::MalformedPayload(_)) => {
                    log::warn!("Failed to parse talent data for user '{}': {}", name, e);
                }
                Err(e) => {
                    log::debug!("Skipping user '{}': {}", name, e);
                }
            }
        }

        log::debug!("NEW format: {} record(s) from {} segment(s)", records.len(), segments.len());
        records
    }

    /// Parse one name/payload pair
    ///
    /// The snapshot is not default-filled: fields missing from the JSON, or of
    /// the wrong type, stay `None`. Only invalid JSON fails the pair.
    pub fn parse_section(name: &str, payload: &str, config: &ParserConfig) -> Result<UserTalentRecord> {
        let fragment = extract::capture_object(payload, config.brace_capture).ok_or_else(|| {
            ParseError::StructuralMismatch("no JSON object in section payload".to_string())
        })?;

        let value: Value = serde_json::from_str(fragment)?;
        let snapshot = TalentSnapshot::from_json(&value);

        let captured_at = extract::captured_timestamp(payload).map(str::to_string);

        Ok(UserTalentRecord::new(name, captured_at, snapshot))
    }
}
