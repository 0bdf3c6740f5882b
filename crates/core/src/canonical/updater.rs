use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::{try_build_canonical_slug, CanonicalSlugError, SlugUpdate};
use crate::location::arena::LocationArena;
use crate::location::model::{LocationRecord, LocationType};
use crate::store::{LocationStore, StoreError};

/// Recompute a node's canonical slug and persist it.
///
/// Store errors are returned rather than masked, so a bad record is reported
/// instead of being written with a truncated path.
pub async fn update_canonical_slug<S>(
    store: &S,
    location_id: &str,
    location_type: LocationType,
) -> Result<String, CanonicalSlugError>
where
    S: LocationStore + ?Sized,
{
    let canonical_slug = try_build_canonical_slug(store, location_id, location_type).await?;
    store
        .write_canonical_slug(location_type, location_id, &canonical_slug)
        .await?;
    Ok(canonical_slug)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackfillFailure {
    pub location_type: LocationType,
    pub location_id: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackfillReport {
    pub updated: Vec<SlugUpdate>,
    pub failures: Vec<BackfillFailure>,
}

/// Counts of a finished backfill run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackfillSummary {
    pub updated: usize,
    pub failed: usize,
}

impl BackfillReport {
    pub fn summary(&self) -> BackfillSummary {
        BackfillSummary {
            updated: self.updated.len(),
            failed: self.failures.len(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Rewrite the canonical slug of every node of the given levels.
///
/// Levels are processed in the order given (parents first is the usual
/// choice). A failing record is logged, recorded in the report and skipped;
/// only a level that cannot be listed at all aborts the run. Safe to re-run.
pub async fn backfill_canonical_slugs<S>(
    store: &S,
    levels: &[LocationType],
) -> Result<BackfillReport, StoreError>
where
    S: LocationStore + ?Sized,
{
    let mut report = BackfillReport::default();

    for &location_type in levels {
        info!(%location_type, "Backfilling canonical slugs");
        let ids = store.list_location_ids(location_type).await.map_err(|err| {
            error!(%location_type, error = %err, "Cannot list locations; aborting backfill");
            err
        })?;

        for id in ids {
            match update_canonical_slug(store, &id, location_type).await {
                Ok(canonical_slug) => {
                    info!(%location_type, location_id = %id, %canonical_slug, "Updated canonical slug");
                    report.updated.push(SlugUpdate {
                        location_type,
                        location_id: id,
                        canonical_slug,
                    });
                }
                Err(err) => {
                    error!(%location_type, location_id = %id, error = %err, "Failed to update canonical slug");
                    report.failures.push(BackfillFailure {
                        location_type,
                        location_id: id,
                        error: err.to_string(),
                    });
                }
            }
        }
    }

    let summary = report.summary();
    info!(
        updated = summary.updated,
        failed = summary.failed,
        "Canonical slug backfill completed"
    );
    Ok(report)
}

async fn load_arena<S>(store: &S, with_canonical: bool) -> Result<(LocationArena, [Vec<LocationRecord>; 3]), StoreError>
where
    S: LocationStore + ?Sized,
{
    let countries = store.list_locations(LocationType::Country, with_canonical).await?;
    let regions = store.list_locations(LocationType::Region, with_canonical).await?;
    let cities = store.list_locations(LocationType::City, with_canonical).await?;
    let arena = LocationArena::from_levels(&countries, &regions, &cities);
    Ok((arena, [countries, regions, cities]))
}

/// Recompute and persist the canonical slug of a node and all of its
/// descendants. Call after changing a node's slug or name.
///
/// The hierarchy is loaded with one query per level; writes happen parents
/// first and stop at the first failure (re-running is safe).
pub async fn recompute_subtree<S>(
    store: &S,
    location_type: LocationType,
    location_id: &str,
) -> Result<Vec<SlugUpdate>, CanonicalSlugError>
where
    S: LocationStore + ?Sized,
{
    let (arena, _) = load_arena(store, false).await?;
    if arena.get(location_type, location_id).is_none() {
        return Err(CanonicalSlugError::NotFound {
            location_type,
            id: location_id.to_string(),
        });
    }

    let mut updates = Vec::new();
    for key in arena.subtree(location_type, location_id) {
        let Some(canonical_slug) = arena.canonical_slug_of(key.location_type, &key.id) else {
            continue;
        };
        if !arena.is_rooted(key.location_type, &key.id) {
            warn!(
                location_type = %key.location_type,
                location_id = %key.id,
                %canonical_slug,
                "Ancestor chain incomplete; writing partial canonical slug"
            );
        }
        store
            .write_canonical_slug(key.location_type, &key.id, &canonical_slug)
            .await?;
        updates.push(SlugUpdate {
            location_type: key.location_type,
            location_id: key.id,
            canonical_slug,
        });
    }

    info!(
        %location_type,
        location_id,
        rewritten = updates.len(),
        "Recomputed canonical slugs for subtree"
    );
    Ok(updates)
}

/// A node whose stored canonical slug does not match its parent chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlugDrift {
    pub location_type: LocationType,
    pub location_id: String,
    pub name: String,
    pub stored: Option<String>,
    pub expected: String,
}

/// Read-only consistency check of every stored canonical slug.
pub async fn verify_canonical_slugs<S>(store: &S) -> Result<Vec<SlugDrift>, StoreError>
where
    S: LocationStore + ?Sized,
{
    let (arena, levels) = load_arena(store, true).await?;
    let mut drift = Vec::new();

    for (location_type, records) in LocationType::ALL.into_iter().zip(levels) {
        for record in records {
            let Some(expected) = arena.canonical_slug_of(location_type, &record.id) else {
                continue;
            };
            let stored = record.stored_canonical_slug().map(str::to_string);
            if stored.as_deref() != Some(expected.as_str()) {
                drift.push(SlugDrift {
                    location_type,
                    location_id: record.id,
                    name: record.name,
                    stored,
                    expected,
                });
            }
        }
    }

    info!(drifted = drift.len(), checked = arena.len(), "Verified canonical slugs");
    Ok(drift)
}
