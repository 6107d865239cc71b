// src/document.rs
//! The raw CV document and its lenient accessors.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::fields::coerce_str;

/// Extensions [`CvDocument::load`] knows how to parse.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// A CV document as its author wrote it.
///
/// Any key may be missing or hold an unexpected shape, so the tree stays
/// untyped and the accessors absorb the mess. Only the parse boundaries
/// below can fail.
#[derive(Debug, Clone, Default)]
pub struct CvDocument {
    root: Value,
}

/// Contact card extracted from the document head.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub avatar: Option<String>,
}

impl CvDocument {
    /// Wrap an already-parsed tree. Never fails, whatever the shape.
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let root = serde_json::from_str(content).context("Failed to parse CV document as JSON")?;
        Ok(Self { root })
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let root = serde_yaml::from_str(content).context("Failed to parse CV document as YAML")?;
        Ok(Self { root })
    }

    /// Load a document from disk, dispatching on the file extension.
    pub fn load(path: &Path) -> Result<Self> {
        let ext = file_extension(path)
            .ok_or_else(|| anyhow::anyhow!("File has no extension: {}", path.display()))?;
        if !DOCUMENT_EXTENSIONS.contains(&ext.as_str()) {
            anyhow::bail!(
                "Unsupported file extension: {}. Allowed: {:?}",
                ext,
                DOCUMENT_EXTENSIONS
            );
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        let doc = match ext.as_str() {
            "json" => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
        .with_context(|| format!("Failed to load CV document: {}", path.display()))?;

        debug!(
            path = %path.display(),
            sections = doc.section_keys().len(),
            "loaded CV document"
        );
        Ok(doc)
    }

    /// The underlying tree.
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Contact fields, read from the document root with `profile` and
    /// `basics` sub-objects as fallbacks.
    pub fn profile(&self) -> Profile {
        Profile {
            name: self.profile_field("name"),
            email: self.profile_field("email"),
            phone: self.profile_field("phone"),
            location: self.profile_field("location"),
            website: self.profile_field("website"),
            avatar: self.profile_field("avatar"),
        }
    }

    fn profile_field(&self, key: &str) -> Option<String> {
        if let Some(text) = self.root.get(key).and_then(coerce_str) {
            return Some(text);
        }
        for scope in ["profile", "basics"] {
            if let Some(text) = self
                .root
                .get(scope)
                .and_then(|sub| sub.get(key))
                .and_then(coerce_str)
            {
                return Some(text);
            }
        }
        None
    }

    /// Raw social records in document order, under `social` or `socials`.
    pub fn socials(&self) -> &[Value] {
        for key in ["social", "socials"] {
            if let Some(records) = self.root.get(key).and_then(Value::as_array) {
                return records;
            }
        }
        &[]
    }

    /// The entries of one section, empty unless `sections.<key>` holds an
    /// array.
    pub fn section(&self, key: &str) -> &[Value] {
        self.root
            .get("sections")
            .and_then(|sections| sections.get(key))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every key under `sections`, in the map's sorted key order.
    pub fn section_keys(&self) -> Vec<&str> {
        self.root
            .get("sections")
            .and_then(Value::as_object)
            .map(|sections| sections.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// Get file extension in lowercase
fn file_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}
