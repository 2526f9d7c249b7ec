//! Log format strategies (NEW, LEGACY)
//!
//! This module contains the two parsers for the historical log layouts and the
//! rule that picks between them. Each parser is a pure function from text to
//! records.

use crate::config::ParserConfig;
use crate::types::UserTalentRecord;
use std::fmt;

pub mod legacy;
pub mod new_format;

// Re-export parser types
pub use legacy::LegacyFormatParser;
pub use new_format::NewFormatParser;

/// Section delimiter of the multi-user format
pub const MARKER: &str = "===";

/// The log layouts the parser understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-user, `===name===payload` sections
    New,
    /// Single user, no section markers up front
    Legacy,
}

impl LogFormat {
    /// Detect the format of a log: NEW if the trimmed text starts with the marker
    pub fn detect(text: &str) -> Self {
        if text.trim().starts_with(MARKER) {
            LogFormat::New
        } else {
            LogFormat::Legacy
        }
    }

    /// Run the strategy for this format
    pub fn parse(self, text: &str, config: &ParserConfig) -> Vec<UserTalentRecord> {
        match self {
            LogFormat::New => NewFormatParser::parse(text, config),
            LogFormat::Legacy => LegacyFormatParser::parse(text, config),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::New => write!(f, "NEW"),
            LogFormat::Legacy => write!(f, "LEGACY"),
        }
    }
}

/// Detect the format of a log
pub fn detect_format(text: &str) -> LogFormat {
    LogFormat::detect(text)
}
