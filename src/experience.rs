// src/experience.rs
use serde::Serialize;
use serde_json::Value;

use crate::dates::{format_date_range, is_present_str, DateStyle};
use crate::fields::{alias, entry_list, entry_str};

// ===== View Model =====

/// One position at one organization, ready for a theme to render.
///
/// Serializes with camelCase keys to match what theme templates index.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub company: Option<String>,
    pub title: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub summary: Option<String>,
    pub highlights: Vec<String>,
    pub location: Option<String>,
    pub url: Option<String>,
    pub is_current: bool,
}

impl Position {
    /// Display period for the position, e.g. `Mar 2019 - Present`.
    pub fn period(&self, style: DateStyle) -> String {
        format_date_range(self.start_date.as_deref(), self.end_date.as_deref(), style)
    }
}

// ===== Flattening =====

/// Flatten experience entries into one record per position held.
///
/// Grouped entries (a company with a `positions` array) contribute one
/// record per position; flat entries contribute themselves. Every entry
/// contributes at least one record, and document order is preserved.
pub fn flatten_experience(entries: &[Value]) -> Vec<Position> {
    let mut flattened = Vec::new();
    for entry in entries {
        match entry.get("positions").and_then(Value::as_array) {
            Some(positions) if !positions.is_empty() => {
                for position in positions {
                    flattened.push(position_from(position, entry));
                }
            }
            _ => flattened.push(position_from(entry, entry)),
        }
    }
    flattened
}

/// Build one record from a position and the entry it belongs to.
///
/// Organization-level attributes come from the parent; everything else
/// prefers the position and falls back to the parent. For flat entries the
/// two are the same value.
fn position_from(position: &Value, parent: &Value) -> Position {
    let end_date =
        entry_str(position, alias::END_DATE).or_else(|| entry_str(parent, alias::END_DATE));
    let is_current = match end_date.as_deref() {
        Some(end) => is_present_str(end),
        None => true,
    };

    Position {
        company: entry_str(parent, alias::COMPANY),
        title: entry_str(position, alias::TITLE).or_else(|| entry_str(parent, alias::TITLE)),
        start_date: entry_str(position, alias::START_DATE)
            .or_else(|| entry_str(parent, alias::START_DATE)),
        end_date,
        summary: entry_str(position, alias::SUMMARY).or_else(|| entry_str(parent, alias::SUMMARY)),
        highlights: entry_list(position, alias::HIGHLIGHTS)
            .or_else(|| entry_list(parent, alias::HIGHLIGHTS))
            .unwrap_or_default(),
        location: entry_str(parent, alias::LOCATION),
        url: entry_str(parent, alias::URL),
        is_current,
    }
}
