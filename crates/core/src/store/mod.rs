//! Data access seams for locations and their content.
//!
//! The canonical-slug builder, the tree builder and the content lookup are
//! written against these traits so they can run on Postgres in production
//! and on [`memory::MemoryStore`] in tests.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::content::model::LocationContent;
use crate::location::model::{LocationRecord, LocationType};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A column the query expected is not part of the deployed schema.
    #[error("column does not exist: {0}")]
    ColumnMissing(String),

    /// The content table cannot be joined to its owning location.
    #[error("relationship not embeddable: {0}")]
    RelationshipNotEmbeddable(String),

    #[error("{table} row {id} not found")]
    RowNotFound { table: &'static str, id: String },

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Expected schema differences that callers answer by switching strategy.
    pub fn is_schema_drift(&self) -> bool {
        matches!(
            self,
            StoreError::ColumnMissing(_) | StoreError::RelationshipNotEmbeddable(_)
        )
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Access to the `countries`, `regions` and `cities` tables.
#[async_trait]
pub trait LocationStore: Send + Sync {
    /// Cheap connectivity check.
    async fn ping(&self) -> StoreResult<()>;

    /// Succeeds when the location tables carry a `canonical_slug` column and
    /// fails with [`StoreError::ColumnMissing`] when they do not.
    async fn probe_canonical_slug_column(&self) -> StoreResult<()>;

    /// Fetch one node with its parent reference.
    async fn fetch_location(
        &self,
        location_type: LocationType,
        id: &str,
    ) -> StoreResult<Option<LocationRecord>>;

    /// Every node of one level ordered by name. With `with_canonical` false
    /// the canonical slug column is not read and comes back as `None`.
    async fn list_locations(
        &self,
        location_type: LocationType,
        with_canonical: bool,
    ) -> StoreResult<Vec<LocationRecord>>;

    /// Ids of every node of one level.
    async fn list_location_ids(&self, location_type: LocationType) -> StoreResult<Vec<String>>;

    /// Find the node whose stored canonical slug matches, searching cities,
    /// then regions, then countries.
    async fn find_location_by_canonical_slug(
        &self,
        canonical_slug: &str,
    ) -> StoreResult<Option<(LocationType, LocationRecord)>>;

    async fn write_canonical_slug(
        &self,
        location_type: LocationType,
        id: &str,
        canonical_slug: &str,
    ) -> StoreResult<()>;
}

/// Access to the `location_content` table.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Match on the content table's own `canonical_slug` column.
    async fn content_by_canonical_slug(
        &self,
        canonical_slug: &str,
    ) -> StoreResult<Option<LocationContent>>;

    /// Join content to its owning location and match on the location's
    /// canonical slug.
    async fn content_by_location_canonical_slug(
        &self,
        canonical_slug: &str,
    ) -> StoreResult<Option<LocationContent>>;

    async fn content_by_location_id(&self, location_id: &str) -> StoreResult<Option<LocationContent>>;

    /// Join content to its owning location and match on the legacy slug.
    async fn content_by_legacy_slug(&self, slug: &str) -> StoreResult<Option<LocationContent>>;

    /// Location ids that have a content record.
    async fn content_location_ids(&self) -> StoreResult<Vec<String>>;
}

/// Everything the directory needs from its backing store.
pub trait DirectoryStore: LocationStore + ContentStore {}

impl<T: LocationStore + ContentStore + ?Sized> DirectoryStore for T {}
