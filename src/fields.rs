// src/fields.rs
use serde_json::Value;

/// Accepted key spellings per logical attribute, in resolution order.
///
/// Source documents are user-authored and name the same attribute several
/// ways; every lookup in the crate resolves through these lists instead of
/// ad hoc fallback chains.
pub mod alias {
    pub const COMPANY: &[&str] = &["company", "organization", "employer"];
    pub const TITLE: &[&str] = &["title", "position", "role"];
    pub const START_DATE: &[&str] = &["start_date", "startDate", "from"];
    pub const END_DATE: &[&str] = &["end_date", "endDate", "to"];
    pub const SUMMARY: &[&str] = &["summary", "description"];
    pub const HIGHLIGHTS: &[&str] = &["highlights", "achievements", "bullets"];
    pub const LOCATION: &[&str] = &["location"];
    pub const URL: &[&str] = &["url", "website", "link"];
}

/// Coerce a scalar to display text. Strings are trimmed and numbers
/// rendered; anything else, and empty text, is absent.
pub fn coerce_str(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => opt_str(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Resolve a text attribute on an entry through an alias list.
///
/// Aliases are tried in order; a key whose value is missing, empty, or not
/// coercible to text loses its turn rather than ending the lookup.
pub fn entry_str(entry: &Value, aliases: &[&str]) -> Option<String> {
    let object = entry.as_object()?;
    for key in aliases {
        if let Some(text) = object.get(*key).and_then(coerce_str) {
            return Some(text);
        }
    }
    None
}

/// Resolve a string-list attribute on an entry through an alias list.
///
/// The first alias holding an array wins, even an empty one; members that
/// are not text are skipped. `None` means no alias key holds an array,
/// which callers use to fall back to a parent entry.
pub fn entry_list(entry: &Value, aliases: &[&str]) -> Option<Vec<String>> {
    let object = entry.as_object()?;
    for key in aliases {
        if let Some(items) = object.get(*key).and_then(Value::as_array) {
            return Some(items.iter().filter_map(coerce_str).collect());
        }
    }
    None
}

/// `Some(trimmed)` when non-empty, `None` otherwise.
fn opt_str(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
