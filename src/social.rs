// src/social.rs
//! Social profile records and the alias-aware URL picker.

use serde::Serialize;
use serde_json::Value;

use crate::fields::coerce_str;

/// Logical networks and the profile names that resolve to them. Rendering
/// order for resolved links follows this table.
pub const NETWORK_ALIASES: &[(&str, &[&str])] = &[
    ("github", &["github"]),
    ("gitlab", &["gitlab"]),
    ("linkedin", &["linkedin"]),
    ("twitter", &["twitter", "x"]),
    ("mastodon", &["mastodon"]),
    ("bluesky", &["bluesky", "bsky"]),
    ("stackoverflow", &["stackoverflow", "stack-overflow"]),
    ("instagram", &["instagram"]),
    ("youtube", &["youtube"]),
];

/// A resolved link under its canonical network name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialLink {
    pub network: String,
    pub url: String,
}

/// Pick the URL of the first record whose network matches one of the
/// aliases, case-insensitively.
///
/// The first matching record decides the outcome: if it carries no usable
/// URL the result is `None` even when a later record would match. Records
/// without a network name, or that are not objects at all, never match.
pub fn pick_social_url(socials: &[Value], aliases: &[&str]) -> Option<String> {
    if aliases.is_empty() {
        return None;
    }
    let record = socials.iter().find(|record| {
        record
            .get("network")
            .and_then(Value::as_str)
            .map(|network| {
                let network = network.to_lowercase();
                aliases.iter().any(|alias| alias.to_lowercase() == network)
            })
            .unwrap_or(false)
    })?;
    record.get("url").and_then(coerce_str)
}

/// Resolve every known network against the document's social records, one
/// link per network in registry order.
pub fn resolve_socials(socials: &[Value]) -> Vec<SocialLink> {
    NETWORK_ALIASES
        .iter()
        .filter_map(|(network, aliases)| {
            pick_social_url(socials, aliases).map(|url| SocialLink {
                network: (*network).to_string(),
                url,
            })
        })
        .collect()
}
