use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Level of a node in the location hierarchy.
///
/// "county" is accepted wherever a type is parsed and means `Region`; it is a
/// display label used by the page templates, not a fourth level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    Country,
    #[serde(alias = "county")]
    Region,
    City,
}

impl LocationType {
    /// Every level, parents first.
    pub const ALL: [LocationType; 3] = [LocationType::Country, LocationType::Region, LocationType::City];

    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Country => "country",
            LocationType::Region => "region",
            LocationType::City => "city",
        }
    }

    /// Table holding rows of this level.
    pub fn table(&self) -> &'static str {
        match self {
            LocationType::Country => "countries",
            LocationType::Region => "regions",
            LocationType::City => "cities",
        }
    }

    /// Column referencing the parent row, if this level has a parent.
    pub fn parent_column(&self) -> Option<&'static str> {
        match self {
            LocationType::Country => None,
            LocationType::Region => Some("country_id"),
            LocationType::City => Some("region_id"),
        }
    }

    pub fn parent(&self) -> Option<LocationType> {
        match self {
            LocationType::Country => None,
            LocationType::Region => Some(LocationType::Country),
            LocationType::City => Some(LocationType::Region),
        }
    }

    pub fn child(&self) -> Option<LocationType> {
        match self {
            LocationType::Country => Some(LocationType::Region),
            LocationType::Region => Some(LocationType::City),
            LocationType::City => None,
        }
    }

    /// Number of canonical slug segments a node of this level has.
    pub fn depth(&self) -> usize {
        match self {
            LocationType::Country => 1,
            LocationType::Region => 2,
            LocationType::City => 3,
        }
    }

    pub fn from_depth(depth: usize) -> Option<LocationType> {
        match depth {
            1 => Some(LocationType::Country),
            2 => Some(LocationType::Region),
            3 => Some(LocationType::City),
            _ => None,
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid location type: {0}")]
pub struct ParseLocationTypeError(pub String);

impl FromStr for LocationType {
    type Err = ParseLocationTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "country" => Ok(LocationType::Country),
            "region" | "county" => Ok(LocationType::Region),
            "city" => Ok(LocationType::City),
            other => Err(ParseLocationTypeError(other.to_string())),
        }
    }
}

/// One row of a location table.
///
/// `slug` may be empty, in which case the slugified `name` stands in for it.
/// `canonical_slug` is `None` when the column is absent or was never
/// backfilled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LocationRecord {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<String>,
    pub canonical_slug: Option<String>,
}

impl LocationRecord {
    /// Path segment contributed by this node.
    pub fn segment(&self) -> String {
        if self.slug.trim().is_empty() {
            crate::slug::slugify(&self.name)
        } else {
            self.slug.clone()
        }
    }

    /// Stored canonical slug, ignoring blanks.
    pub fn stored_canonical_slug(&self) -> Option<&str> {
        self.canonical_slug
            .as_deref()
            .filter(|slug| !slug.trim().is_empty())
    }
}

/// A node of the admin location tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub canonical_slug: String,
    #[serde(rename = "type")]
    pub location_type: LocationType,
    pub editable: bool,
    /// Whether saved content exists; only filled when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_content: Option<bool>,
    pub children: Vec<TreeNode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn county_is_a_region() {
        assert_eq!("county".parse::<LocationType>().unwrap(), LocationType::Region);
        assert_eq!(" Region ".parse::<LocationType>().unwrap(), LocationType::Region);
        let parsed: LocationType = serde_json::from_str("\"county\"").unwrap();
        assert_eq!(parsed, LocationType::Region);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"region\"");
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = "borough".parse::<LocationType>().unwrap_err();
        assert_eq!(err.to_string(), "invalid location type: borough");
    }

    #[test]
    fn hierarchy_walks() {
        assert_eq!(LocationType::City.parent(), Some(LocationType::Region));
        assert_eq!(LocationType::Region.parent(), Some(LocationType::Country));
        assert_eq!(LocationType::Country.parent(), None);
        assert_eq!(LocationType::Country.child(), Some(LocationType::Region));
        assert_eq!(LocationType::from_depth(3), Some(LocationType::City));
        assert_eq!(LocationType::from_depth(4), None);
    }

    #[test]
    fn segment_falls_back_to_name() {
        let record = LocationRecord {
            id: "c1".into(),
            name: "Redcar and Cleveland".into(),
            slug: "  ".into(),
            parent_id: None,
            canonical_slug: Some(String::new()),
        };
        assert_eq!(record.segment(), "redcar-and-cleveland");
        assert_eq!(record.stored_canonical_slug(), None);
    }
}
