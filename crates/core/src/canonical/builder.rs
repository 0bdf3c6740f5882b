use tracing::{debug, warn};

use super::CanonicalSlugError;
use crate::location::model::LocationType;
use crate::slug::canonical_path;
use crate::store::{LocationStore, StoreError};

/// Result of walking the parent chain: the segments found (root first) and
/// the error that cut the walk short, if any.
struct Walk {
    segments: Vec<String>,
    error: Option<StoreError>,
}

async fn walk_parents<S>(store: &S, location_id: &str, location_type: LocationType) -> Walk
where
    S: LocationStore + ?Sized,
{
    let mut segments = Vec::new();
    let mut cursor = Some((location_type, location_id.to_string()));

    while let Some((current_type, current_id)) = cursor.take() {
        let record = match store.fetch_location(current_type, &current_id).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!(%current_type, %current_id, "Parent chain ends at missing node");
                break;
            }
            Err(error) => {
                segments.reverse();
                return Walk {
                    segments,
                    error: Some(error),
                };
            }
        };

        segments.push(record.segment());
        cursor = current_type
            .parent()
            .zip(record.parent_id.filter(|id| !id.is_empty()));
    }

    segments.reverse();
    Walk {
        segments,
        error: None,
    }
}

/// Canonical slug of a node, degrading instead of failing.
///
/// A failed or empty fetch stops the walk and the segments collected so far
/// are used. When nothing at all could be read, the raw id stands in as the
/// only segment.
pub async fn build_canonical_slug<S>(
    store: &S,
    location_id: &str,
    location_type: LocationType,
) -> String
where
    S: LocationStore + ?Sized,
{
    let walk = walk_parents(store, location_id, location_type).await;
    if let Some(error) = &walk.error {
        warn!(
            %location_type,
            location_id,
            error = %error,
            "Canonical slug walk cut short; using partial path"
        );
    }

    if walk.segments.is_empty() {
        return canonical_path([location_id]);
    }
    canonical_path(&walk.segments)
}

/// Canonical slug of a node, failing loudly.
///
/// Store errors anywhere on the chain are returned, and a node that does not
/// exist is [`CanonicalSlugError::NotFound`]. A dangling parent reference
/// still yields the partial path, as the lenient builder does.
pub async fn try_build_canonical_slug<S>(
    store: &S,
    location_id: &str,
    location_type: LocationType,
) -> Result<String, CanonicalSlugError>
where
    S: LocationStore + ?Sized,
{
    let walk = walk_parents(store, location_id, location_type).await;
    if let Some(error) = walk.error {
        return Err(error.into());
    }
    if walk.segments.is_empty() {
        return Err(CanonicalSlugError::NotFound {
            location_type,
            id: location_id.to_string(),
        });
    }
    Ok(canonical_path(&walk.segments))
}
