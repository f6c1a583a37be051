use serde::{Deserialize, Serialize};

/// Normalized page metadata produced by one resolution attempt.
///
/// Unresolved fields hold the empty string rather than being omitted, so
/// consumers never need to distinguish "absent" from "empty". `domain` is
/// always derived from `url`; `favicon` is always an absolute URL.
///
/// The record is immutable: a new resolution replaces it wholesale, and
/// override merging produces a fresh copy (see [`LinkMetadata::with_overrides`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkMetadata {
    pub title: String,
    pub description: String,
    pub image: String,
    pub url: String,
    pub domain: String,
    pub favicon: String,
}

/// Caller-supplied display overrides layered on top of fetched metadata.
///
/// An absent or empty override falls through to the base value; the base
/// record itself is never mutated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetadataOverrides {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl LinkMetadata {
    /// Returns a copy of the record with non-empty overrides applied.
    pub fn with_overrides(&self, overrides: &MetadataOverrides) -> LinkMetadata {
        fn pick(base: &str, over: Option<&String>) -> String {
            match over {
                Some(s) if !s.is_empty() => s.clone(),
                _ => base.to_string(),
            }
        }

        LinkMetadata {
            title: pick(&self.title, overrides.title.as_ref()),
            description: pick(&self.description, overrides.description.as_ref()),
            image: pick(&self.image, overrides.image.as_ref()),
            url: self.url.clone(),
            domain: self.domain.clone(),
            favicon: self.favicon.clone(),
        }
    }
}

/// Platform mockup selector. Each variant maps to a pure rendering function
/// in the `preview` module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewVariant {
    Card,
    Twitter,
    WhatsApp,
    Google,
}
