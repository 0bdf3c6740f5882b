use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::canonical::{BackfillSummary, SlugUpdate};
use crate::location::model::LocationType;

/// Events emitted after canonical slugs are rewritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DirectoryEvent {
    CanonicalSlugUpdated(SlugUpdatedEvent),
    SubtreeRecomputed(SubtreeRecomputedEvent),
    BackfillCompleted(BackfillCompletedEvent),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlugUpdatedEvent {
    #[serde(flatten)]
    pub update: SlugUpdate,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtreeRecomputedEvent {
    pub location_type: LocationType,
    pub location_id: String,
    pub rewritten: usize,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackfillCompletedEvent {
    #[serde(flatten)]
    pub summary: BackfillSummary,
    pub timestamp: DateTime<Utc>,
}

impl DirectoryEvent {
    /// The wire `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            DirectoryEvent::CanonicalSlugUpdated(_) => "canonicalSlugUpdated",
            DirectoryEvent::SubtreeRecomputed(_) => "subtreeRecomputed",
            DirectoryEvent::BackfillCompleted(_) => "backfillCompleted",
        }
    }

    pub fn slug_updated(update: SlugUpdate) -> Self {
        DirectoryEvent::CanonicalSlugUpdated(SlugUpdatedEvent {
            update,
            timestamp: Utc::now(),
        })
    }

    pub fn subtree_recomputed(location_type: LocationType, location_id: &str, rewritten: usize) -> Self {
        DirectoryEvent::SubtreeRecomputed(SubtreeRecomputedEvent {
            location_type,
            location_id: location_id.to_string(),
            rewritten,
            timestamp: Utc::now(),
        })
    }

    pub fn backfill_completed(summary: BackfillSummary) -> Self {
        DirectoryEvent::BackfillCompleted(BackfillCompletedEvent {
            summary,
            timestamp: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_update_wire_shape() {
        let event = DirectoryEvent::slug_updated(SlugUpdate {
            location_type: LocationType::City,
            location_id: "c1".into(),
            canonical_slug: "/foster-agency/england/somerset/bath".into(),
        });
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "canonicalSlugUpdated");
        assert_eq!(value["type"], event.kind());
        assert_eq!(value["locationType"], "city");
        assert_eq!(value["canonicalSlug"], "/foster-agency/england/somerset/bath");
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn backfill_summary_is_flattened() {
        let event = DirectoryEvent::backfill_completed(BackfillSummary { updated: 3, failed: 1 });
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "backfillCompleted");
        assert_eq!(value["updated"], 3);
        assert_eq!(value["failed"], 1);
    }
}
