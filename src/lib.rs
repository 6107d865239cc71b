use anyhow::Result;
use std::path::Path;

pub mod config;
pub mod dates;
pub mod document;
pub mod experience;
pub mod fields;
pub mod sections;
pub mod social;

pub use config::{SectionConfig, ViewConfig};
pub use dates::{
    format_date, format_date_range, format_date_str, is_present, is_present_str, DateStyle,
};
pub use document::{CvDocument, Profile, DOCUMENT_EXTENSIONS};
pub use experience::{flatten_experience, Position};
pub use sections::{
    build_section_view, is_archived, SectionView, ViewOptions, FLATTENED_SECTIONS,
};
pub use social::{pick_social_url, resolve_socials, SocialLink, NETWORK_ALIASES};

/// Convenience function for loading a document and viewing one section
pub fn load_section_view(
    path: &Path,
    section: &str,
    options: &ViewOptions,
) -> Result<SectionView> {
    let doc = CvDocument::load(path)?;
    Ok(build_section_view(&doc, section, options))
}
