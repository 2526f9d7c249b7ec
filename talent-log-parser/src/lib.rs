//! Talent Log Parser Library
//!
//! A stateless, reusable library that turns talent logs written by the game
//! tool into per-user talent records.
//!
//! # Architecture
//!
//! This library is intentionally minimal and focused on parsing:
//! - Detects the log format (multi-user `===name===` sections or legacy single-user)
//! - Extracts the embedded JSON talent object and optional `[timestamp]`
//! - Degrades failures to "record omitted" and logs them
//!
//! The library does NOT:
//! - Read files or stdin
//! - Render tables or choose columns
//! - Validate talent values beyond their JSON types
//!
//! All of that is in the application layer (talent-log-cli).
//!
//! # Example Usage
//!
//! ```
//! use talent_log_parser::{LogParser, ParserConfig, BraceCapture, ELEMENT_ATTRIBUTES};
//!
//! let log = "===Alice===\n[2024-01-01 10:00] {\"talent_levels\":{\"1\":5},\"skill_tree\":\"X\",\"team_skill\":2}\n\
//!            ===Bob===\n{\"talent_levels\":{\"3\":4},\"skill_tree\":\"Y\",\"team_skill\":1}\n";
//!
//! let parser = LogParser::with_config(ParserConfig::new().with_brace_capture(BraceCapture::Greedy));
//!
//! for record in parser.parse(Some(log)) {
//!     let levels: Vec<String> = ELEMENT_ATTRIBUTES
//!         .iter()
//!         .map(|attr| record.snapshot.level(attr.id).map(|l| l.to_string()).unwrap_or_default())
//!         .collect();
//!     println!("{}: {:?}", record.user_name, levels);
//! }
//! ```

// Public modules
pub mod config;
pub mod extract;
pub mod formats;
pub mod parser;
pub mod types;
pub mod writer;

// Re-export main types for convenience
pub use config::{BraceCapture, ParserConfig, DEFAULT_FALLBACK_USER_NAME};
pub use formats::{detect_format, LogFormat};
pub use parser::LogParser;
pub use types::{
    ElementAttribute, ParseError, RecordField, Result, TalentSnapshot, UserTalentRecord,
    ELEMENT_ATTRIBUTES,
};
pub use writer::write_new_format;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse a log with the default configuration
///
/// Shorthand for `LogParser::new().parse(text)`.
pub fn parse(text: Option<&str>) -> Vec<UserTalentRecord> {
    LogParser::new().parse(text)
}
