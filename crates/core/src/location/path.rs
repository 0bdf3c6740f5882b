//! Canonical path parsing.
//!
//! Canonical slugs follow the shape:
//! - Country: `/foster-agency/{country}`
//! - Region:  `/foster-agency/{country}/{region}`
//! - City:    `/foster-agency/{country}/{region}/{city}`

use crate::slug::{normalize_canonical_slug, CANONICAL_ROOT};

use super::model::LocationType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalPath {
    segments: Vec<String>,
}

impl CanonicalPath {
    /// Parse a canonical slug. The root prefix is added when missing.
    ///
    /// Returns `None` for the bare root, for paths deeper than a city and
    /// for paths with empty segments.
    pub fn parse(input: &str) -> Option<Self> {
        let normalized = normalize_canonical_slug(input);
        let rest = normalized.strip_prefix(CANONICAL_ROOT)?.strip_prefix('/')?;
        if rest.is_empty() {
            return None;
        }

        let segments: Vec<String> = rest.split('/').map(str::to_string).collect();
        if segments.len() > LocationType::City.depth() || segments.iter().any(|s| s.is_empty()) {
            return None;
        }
        Some(Self { segments })
    }

    /// Location level implied by the number of segments.
    pub fn location_type(&self) -> LocationType {
        // parse() guarantees 1..=3 segments
        LocationType::from_depth(self.segments.len()).unwrap_or(LocationType::City)
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Last segment, i.e. the node's own slug.
    pub fn leaf(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// Full path including the root.
    pub fn to_canonical_slug(&self) -> String {
        crate::slug::canonical_path(&self.segments)
    }

    /// Path of the parent node, if any.
    pub fn parent(&self) -> Option<CanonicalPath> {
        if self.segments.len() <= 1 {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_city_path() {
        let path = CanonicalPath::parse("/foster-agency/england/greater-london/london").unwrap();
        assert_eq!(path.location_type(), LocationType::City);
        assert_eq!(path.leaf(), "london");
        assert_eq!(
            path.to_canonical_slug(),
            "/foster-agency/england/greater-london/london"
        );
        let parent = path.parent().unwrap();
        assert_eq!(parent.location_type(), LocationType::Region);
        assert_eq!(parent.to_canonical_slug(), "/foster-agency/england/greater-london");
    }

    #[test]
    fn parse_adds_missing_root() {
        let path = CanonicalPath::parse("england").unwrap();
        assert_eq!(path.location_type(), LocationType::Country);
        assert_eq!(path.to_canonical_slug(), "/foster-agency/england");
        assert!(path.parent().is_none());
    }

    #[test]
    fn parse_rejects_malformed_paths() {
        assert!(CanonicalPath::parse("/foster-agency").is_none());
        assert!(CanonicalPath::parse("/foster-agency/").is_none());
        assert!(CanonicalPath::parse("/foster-agency/a//b").is_none());
        assert!(CanonicalPath::parse("/foster-agency/a/b/c/d").is_none());
    }
}
