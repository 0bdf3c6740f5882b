//! Canonical slug derivation and maintenance.
//!
//! A canonical slug is the full public path of a location, built from the
//! slugs of its ancestors. It is stored denormalized on every location row,
//! so it has to be rewritten whenever an ancestor's slug or name changes.

pub mod builder;
pub mod updater;

use serde::{Deserialize, Serialize};

use crate::location::model::LocationType;
use crate::store::StoreError;

pub use builder::{build_canonical_slug, try_build_canonical_slug};
pub use updater::{
    backfill_canonical_slugs, recompute_subtree, update_canonical_slug, verify_canonical_slugs,
    BackfillFailure, BackfillReport, BackfillSummary, SlugDrift,
};

#[derive(Debug, thiserror::Error)]
pub enum CanonicalSlugError {
    #[error("{location_type} {id} not found")]
    NotFound {
        location_type: LocationType,
        id: String,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A canonical slug written to one location row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlugUpdate {
    pub location_type: LocationType,
    pub location_id: String,
    pub canonical_slug: String,
}
