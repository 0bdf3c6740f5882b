use serde_json::Value;
use tracing::{debug, warn};

use super::model::LocationContent;
use crate::slug::normalize_canonical_slug;
use crate::store::{DirectoryStore, StoreError};

/// Content payload stored for a canonical slug, or `None` when there is none
/// yet. Store errors are logged, never returned.
pub async fn get_location_content_by_canonical_slug<S>(store: &S, canonical_slug: &str) -> Option<Value>
where
    S: DirectoryStore + ?Sized,
{
    find_content_by_canonical_slug(store, canonical_slug)
        .await
        .and_then(|row| row.payload())
}

/// Content payload of the location with a given legacy slug.
///
/// Single join query; no further fallback.
pub async fn get_location_content_by_slug<S>(store: &S, slug: &str) -> Option<Value>
where
    S: DirectoryStore + ?Sized,
{
    match store.content_by_legacy_slug(slug).await {
        Ok(row) => row.and_then(|row| row.payload()),
        Err(err) => {
            warn!(slug, error = %err, "Legacy content lookup failed");
            None
        }
    }
}

/// The content row for a canonical slug.
///
/// Tries, in order: the content table's own `canonical_slug`; a join on the
/// owning location's canonical slug; and, only when that join cannot be
/// expressed against the schema, a location lookup followed by a lookup by
/// location id. The first row found wins.
pub async fn find_content_by_canonical_slug<S>(store: &S, canonical_slug: &str) -> Option<LocationContent>
where
    S: DirectoryStore + ?Sized,
{
    let canonical_slug = normalize_canonical_slug(canonical_slug);

    match store.content_by_canonical_slug(&canonical_slug).await {
        Ok(Some(row)) => return Some(row),
        Ok(None) => {}
        Err(err) => debug!(%canonical_slug, error = %err, "Direct content lookup failed"),
    }

    match store.content_by_location_canonical_slug(&canonical_slug).await {
        Ok(row) => row,
        Err(StoreError::RelationshipNotEmbeddable(detail)) => {
            debug!(%canonical_slug, %detail, "Content join unavailable; looking up location first");
            content_via_location(store, &canonical_slug).await
        }
        Err(err) => {
            warn!(%canonical_slug, error = %err, "Content lookup failed");
            None
        }
    }
}

async fn content_via_location<S>(store: &S, canonical_slug: &str) -> Option<LocationContent>
where
    S: DirectoryStore + ?Sized,
{
    let location = match store.find_location_by_canonical_slug(canonical_slug).await {
        Ok(Some((_, location))) => location,
        Ok(None) => return None,
        Err(err) => {
            warn!(canonical_slug, error = %err, "Location lookup for content failed");
            return None;
        }
    };

    match store.content_by_location_id(&location.id).await {
        Ok(row) => row,
        Err(err) => {
            warn!(canonical_slug, location_id = %location.id, error = %err, "Content lookup by location failed");
            None
        }
    }
}
