// src/config.rs
//! View configuration: date style, limits, and archived visibility, with
//! per-section overrides.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use crate::dates::DateStyle;
use crate::sections::ViewOptions;

/// Root of a `view.toml`.
///
/// ```toml
/// date_style = "month-year"
/// limit = 10
///
/// [sections.projects]
/// limit = 4
///
/// [sections.experience]
/// include_archived = true
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub date_style: Option<DateStyle>,
    pub limit: Option<usize>,
    pub include_archived: bool,
    pub sections: HashMap<String, SectionConfig>,
}

/// Overrides for a single section. Unset fields inherit the globals.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    pub limit: Option<usize>,
    pub include_archived: Option<bool>,
}

impl ViewConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read view config: {}", path.display()))?;
        let config: ViewConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse view config: {}", path.display()))?;
        debug!(
            path = %path.display(),
            sections = config.sections.len(),
            "loaded view config"
        );
        Ok(config)
    }

    /// Effective options for one section.
    pub fn options_for(&self, section: &str) -> ViewOptions {
        let overrides = self.sections.get(section);
        ViewOptions {
            limit: overrides.and_then(|s| s.limit).or(self.limit),
            include_archived: overrides
                .and_then(|s| s.include_archived)
                .unwrap_or(self.include_archived),
        }
    }
}
