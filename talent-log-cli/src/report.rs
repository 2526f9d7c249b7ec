//! Report generation
//!
//! Renders parsed records as a text table, JSON, or NEW-format log text.

use crate::config::{AttributeConfig, OutputFormat};
use anyhow::{Context, Result};
use talent_log_parser::{write_new_format, RecordField, UserTalentRecord};

const USER_HEADER: &str = "User";
const CAPTURED_AT_HEADER: &str = "Captured At";
const SKILL_TREE_HEADER: &str = "Skill Tree";
const TEAM_SKILL_HEADER: &str = "Team Skill";

/// Render records in the requested format
pub fn render(records: &[UserTalentRecord], attributes: &[AttributeConfig], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Txt => Ok(render_table(records, attributes)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(records).context("Failed to serialize records as JSON")
        }
        OutputFormat::Log => write_new_format(records).context("Failed to write NEW-format log"),
    }
}

/// Render an ASCII table, one row per record
///
/// The capture time column appears only when the first record carries one.
/// Attributes without a value leave an empty cell.
pub fn render_table(records: &[UserTalentRecord], attributes: &[AttributeConfig]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let show_captured_at = records[0].has_field(RecordField::CapturedAt);

    let mut header = vec![USER_HEADER.to_string()];
    if show_captured_at {
        header.push(CAPTURED_AT_HEADER.to_string());
    }
    header.extend(attributes.iter().map(|attr| attr.label.clone()));
    header.push(SKILL_TREE_HEADER.to_string());
    header.push(TEAM_SKILL_HEADER.to_string());

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            let snapshot = &record.snapshot;
            let mut row = vec![record.user_name.clone()];
            if show_captured_at {
                row.push(record.captured_at.clone().unwrap_or_default());
            }
            row.extend(
                attributes
                    .iter()
                    .map(|attr| snapshot.level(&attr.id).map(|l| l.to_string()).unwrap_or_default()),
            );
            row.push(snapshot.skill_tree.clone().unwrap_or_default());
            row.push(snapshot.team_skill.map(|s| s.to_string()).unwrap_or_default());
            row
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            std::iter::once(&header)
                .chain(rows.iter())
                .map(|row| display_width(&row[col]))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let separator = format_separator(&widths);
    let mut out = String::new();
    out.push_str(&separator);
    out.push_str(&format_row(&header, &widths));
    out.push_str(&separator);
    for row in &rows {
        out.push_str(&format_row(row, &widths));
    }
    out.push_str(&separator);
    out
}

fn format_separator(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line.push('\n');
    line
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (cell, width) in cells.iter().zip(widths) {
        let padding = width - display_width(cell);
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(padding + 1));
        line.push('|');
    }
    line.push('\n');
    line
}

/// Terminal columns taken by `text`; CJK characters count as two
fn display_width(text: &str) -> usize {
    text.chars()
        .map(|c| if is_wide(c) { 2 } else { 1 })
        .sum()
}

fn is_wide(c: char) -> bool {
    matches!(c as u32,
        0x1100..=0x115F
        | 0x2E80..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6)
}
