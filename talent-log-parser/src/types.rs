//! Core types for the talent log parser library
//!
//! This module defines all the fundamental types that the parser emits when processing
//! log text. The parser is stateless and only outputs records - it does not
//! track changes between logs or render anything.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while extracting a single record
///
/// None of these escape [`crate::LogParser::parse`]; they are logged and the
/// affected unit is dropped from the output.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Structural mismatch: {0}")]
    StructuralMismatch(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("Empty input")]
    EmptyInput,
}

/// An elemental attribute the display layer probes into `talent_levels`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementAttribute {
    /// Key used in the `talent_levels` mapping
    pub id: &'static str,
    /// Human label shown as the column header
    pub label: &'static str,
}

/// The five elemental attributes, in column order
pub const ELEMENT_ATTRIBUTES: &[ElementAttribute] = &[
    ElementAttribute { id: "1", label: "火" },
    ElementAttribute { id: "2", label: "水" },
    ElementAttribute { id: "3", label: "风" },
    ElementAttribute { id: "4", label: "光" },
    ElementAttribute { id: "5", label: "暗" },
];

/// Talent data embedded in a log as a JSON object
///
/// Fields are optional because the multi-user format keeps the object verbatim:
/// a field missing from the log stays `None`. The legacy format always fills
/// all three.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalentSnapshot {
    /// Attribute id → talent level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub talent_levels: Option<BTreeMap<String, i64>>,
    /// Free-form skill tree label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_tree: Option<String>,
    /// Team skill level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_skill: Option<i64>,
}

impl TalentSnapshot {
    /// Take whatever fields of a JSON object have the expected shape
    ///
    /// A missing or off-type field stays `None`; inside `talent_levels`, entries
    /// that are not integers (`5.0`, `null`, strings) are dropped.
    pub fn from_json(value: &Value) -> Self {
        let talent_levels = value.get("talent_levels").and_then(Value::as_object).map(|levels| {
            levels
                .iter()
                .filter_map(|(id, level)| level.as_i64().map(|l| (id.clone(), l)))
                .collect()
        });

        Self {
            talent_levels,
            skill_tree: value.get("skill_tree").and_then(Value::as_str).map(str::to_string),
            team_skill: value.get("team_skill").and_then(Value::as_i64),
        }
    }

    /// Fill absent fields with an empty mapping, an empty string and zero
    pub fn with_defaults(self) -> Self {
        Self {
            talent_levels: Some(self.talent_levels.unwrap_or_default()),
            skill_tree: Some(self.skill_tree.unwrap_or_default()),
            team_skill: Some(self.team_skill.unwrap_or_default()),
        }
    }

    /// Look up the level for one attribute id
    ///
    /// Returns `None` when the id has no value, which the display layer shows
    /// as an empty cell.
    pub fn level(&self, attribute_id: &str) -> Option<i64> {
        self.talent_levels
            .as_ref()
            .and_then(|levels| levels.get(attribute_id))
            .copied()
    }
}

/// Optional record fields the consumer may show as extra columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordField {
    /// The bracketed capture time from the log section
    #[serde(rename = "capturedAt")]
    CapturedAt,
}

impl RecordField {
    /// Field name as it appears in serialized records
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordField::CapturedAt => "capturedAt",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One user's talent row - the primary output of the parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTalentRecord {
    /// User name taken from the `===name===` marker (or the fallback label)
    pub user_name: String,
    /// Raw bracketed timestamp text, not validated
    #[serde(rename = "capturedAt", default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<String>,
    /// Optional fields populated on this record
    #[serde(rename = "presentFields", default)]
    pub present_fields: Vec<RecordField>,
    /// Parsed talent data
    pub snapshot: TalentSnapshot,
}

impl UserTalentRecord {
    /// Create a record; `present_fields` is derived from what is set
    pub fn new(
        user_name: impl Into<String>,
        captured_at: Option<String>,
        snapshot: TalentSnapshot,
    ) -> Self {
        let present_fields = if captured_at.is_some() {
            vec![RecordField::CapturedAt]
        } else {
            Vec::new()
        };

        Self {
            user_name: user_name.into(),
            captured_at,
            present_fields,
            snapshot,
        }
    }

    /// Check whether an optional field is populated
    pub fn has_field(&self, field: RecordField) -> bool {
        self.present_fields.contains(&field)
    }
}
