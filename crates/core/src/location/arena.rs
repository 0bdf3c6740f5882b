use std::collections::HashMap;

use super::model::{LocationRecord, LocationType};
use crate::slug::canonical_path;

/// Address of a node in the arena: ids are only unique per level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
    pub location_type: LocationType,
    pub id: String,
}

impl NodeKey {
    pub fn new(location_type: LocationType, id: impl Into<String>) -> Self {
        Self {
            location_type,
            id: id.into(),
        }
    }
}

/// Flat index of the whole hierarchy.
///
/// Nodes live in one table keyed by `(type, id)`; parent links are ids and
/// always point one level up, so a walk towards the root ends after at most
/// three steps. Child lists keep insertion order.
#[derive(Debug, Default, Clone)]
pub struct LocationArena {
    nodes: HashMap<NodeKey, LocationRecord>,
    children: HashMap<NodeKey, Vec<NodeKey>>,
}

impl LocationArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an arena from the three bulk-loaded levels.
    pub fn from_levels(
        countries: &[LocationRecord],
        regions: &[LocationRecord],
        cities: &[LocationRecord],
    ) -> Self {
        let mut arena = Self::new();
        for (location_type, records) in [
            (LocationType::Country, countries),
            (LocationType::Region, regions),
            (LocationType::City, cities),
        ] {
            for record in records {
                arena.insert(location_type, record.clone());
            }
        }
        arena
    }

    pub fn insert(&mut self, location_type: LocationType, record: LocationRecord) {
        let key = NodeKey::new(location_type, record.id.clone());
        if let Some(parent) = parent_key(location_type, &record) {
            self.children.entry(parent).or_default().push(key.clone());
        }
        self.nodes.insert(key, record);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, location_type: LocationType, id: &str) -> Option<&LocationRecord> {
        self.nodes.get(&NodeKey::new(location_type, id))
    }

    /// Path segments from the root down to the node.
    ///
    /// A missing ancestor truncates the path at the first orphan. Returns
    /// `None` when the node itself is unknown.
    pub fn segments_of(&self, location_type: LocationType, id: &str) -> Option<Vec<String>> {
        let mut record = self.get(location_type, id)?;
        let mut current_type = location_type;
        let mut segments = vec![record.segment()];

        while let Some(parent) = parent_key(current_type, record) {
            match self.nodes.get(&parent) {
                Some(parent_record) => {
                    segments.push(parent_record.segment());
                    record = parent_record;
                    current_type = parent.location_type;
                }
                None => break,
            }
        }

        segments.reverse();
        Some(segments)
    }

    /// Canonical slug recomputed from the parent chain.
    pub fn canonical_slug_of(&self, location_type: LocationType, id: &str) -> Option<String> {
        self.segments_of(location_type, id).map(canonical_path)
    }

    /// Whether every ancestor of the node is present.
    pub fn is_rooted(&self, location_type: LocationType, id: &str) -> bool {
        self.segments_of(location_type, id)
            .is_some_and(|segments| segments.len() == location_type.depth())
    }

    pub fn children_of(&self, key: &NodeKey) -> &[NodeKey] {
        self.children.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// The node followed by all of its descendants, parents before children.
    pub fn subtree(&self, location_type: LocationType, id: &str) -> Vec<NodeKey> {
        let root = NodeKey::new(location_type, id);
        if !self.nodes.contains_key(&root) {
            return Vec::new();
        }

        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(key) = stack.pop() {
            stack.extend(self.children_of(&key).iter().rev().cloned());
            out.push(key);
        }
        out
    }
}

fn parent_key(location_type: LocationType, record: &LocationRecord) -> Option<NodeKey> {
    let parent_type = location_type.parent()?;
    let parent_id = record.parent_id.as_deref()?;
    Some(NodeKey::new(parent_type, parent_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str, slug: &str, parent: Option<&str>) -> LocationRecord {
        LocationRecord {
            id: id.to_string(),
            name: name.to_string(),
            slug: slug.to_string(),
            parent_id: parent.map(str::to_string),
            canonical_slug: None,
        }
    }

    fn sample() -> LocationArena {
        LocationArena::from_levels(
            &[record("1", "England", "", None)],
            &[
                record("1", "Greater London", "greater-london", Some("1")),
                record("2", "Kent", "kent", Some("1")),
            ],
            &[
                record("1", "London", "london", Some("1")),
                record("2", "Canterbury", "canterbury", Some("2")),
                record("3", "Nowhere", "nowhere", Some("99")),
            ],
        )
    }

    #[test]
    fn ids_are_scoped_per_level() {
        let arena = sample();
        assert_eq!(arena.len(), 6);
        assert_eq!(arena.get(LocationType::Country, "1").unwrap().name, "England");
        assert_eq!(arena.get(LocationType::City, "1").unwrap().name, "London");
    }

    #[test]
    fn canonical_slug_walks_parents() {
        let arena = sample();
        assert_eq!(
            arena.canonical_slug_of(LocationType::City, "1").as_deref(),
            Some("/foster-agency/england/greater-london/london")
        );
        assert_eq!(
            arena.canonical_slug_of(LocationType::Region, "2").as_deref(),
            Some("/foster-agency/england/kent")
        );
        assert!(arena.canonical_slug_of(LocationType::City, "42").is_none());
    }

    #[test]
    fn orphans_are_truncated() {
        let arena = sample();
        assert_eq!(
            arena.canonical_slug_of(LocationType::City, "3").as_deref(),
            Some("/foster-agency/nowhere")
        );
        assert!(!arena.is_rooted(LocationType::City, "3"));
        assert!(arena.is_rooted(LocationType::City, "2"));
    }

    #[test]
    fn subtree_is_preorder() {
        let arena = sample();
        let keys: Vec<(LocationType, String)> = arena
            .subtree(LocationType::Country, "1")
            .into_iter()
            .map(|k| (k.location_type, k.id))
            .collect();
        assert_eq!(
            keys,
            vec![
                (LocationType::Country, "1".to_string()),
                (LocationType::Region, "1".to_string()),
                (LocationType::City, "1".to_string()),
                (LocationType::Region, "2".to_string()),
                (LocationType::City, "2".to_string()),
            ]
        );
        assert!(arena.subtree(LocationType::Region, "missing").is_empty());
    }
}
