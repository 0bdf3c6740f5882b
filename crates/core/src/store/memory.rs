use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use uuid::Uuid;

use super::{ContentStore, LocationStore, StoreError, StoreResult};
use crate::content::model::LocationContent;
use crate::location::model::{LocationRecord, LocationType};

/// In-process store with the same semantics as the Postgres one.
///
/// Schema capabilities can be switched off to reproduce older deployments
/// (no `canonical_slug` column on locations or on content, no location
/// join), and individual reads or writes can be made to fail.
#[derive(Debug)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    faults: RwLock<Faults>,
    canonical_slug_column: bool,
    content_canonical_slug_column: bool,
    location_join: bool,
}

#[derive(Debug, Default)]
struct Tables {
    locations: HashMap<LocationType, BTreeMap<String, LocationRecord>>,
    content: HashMap<String, LocationContent>,
    slug_writes: usize,
}

#[derive(Debug, Default)]
struct Faults {
    fetch: HashSet<(LocationType, String)>,
    list: HashSet<LocationType>,
    write: HashSet<String>,
    content_reads: bool,
    probe: bool,
    canonical_listing: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            faults: RwLock::new(Faults::default()),
            canonical_slug_column: true,
            content_canonical_slug_column: true,
            location_join: true,
        }
    }

    /// Behave like a schema that predates the `canonical_slug` column.
    pub fn without_canonical_slug_column(mut self) -> Self {
        self.canonical_slug_column = false;
        self
    }

    /// Behave like a `location_content` table without its own
    /// `canonical_slug` column: matching on it fails and every other content
    /// read returns the slug as `None`.
    pub fn without_content_canonical_slug_column(mut self) -> Self {
        self.content_canonical_slug_column = false;
        self
    }

    /// Behave like a schema where content cannot be joined to locations.
    pub fn without_location_join(mut self) -> Self {
        self.location_join = false;
        self
    }

    /// Insert a node with a fresh id and return the id.
    pub fn insert_location(
        &self,
        location_type: LocationType,
        name: &str,
        slug: &str,
        parent_id: Option<&str>,
    ) -> String {
        let id = Uuid::new_v4().to_string();
        self.insert_record(
            location_type,
            LocationRecord {
                id: id.clone(),
                name: name.to_string(),
                slug: slug.to_string(),
                parent_id: parent_id.map(str::to_string),
                canonical_slug: None,
            },
        );
        id
    }

    /// Insert or replace a node as given.
    pub fn insert_record(&self, location_type: LocationType, record: LocationRecord) {
        self.tables_mut()
            .locations
            .entry(location_type)
            .or_default()
            .insert(record.id.clone(), record);
    }

    /// Insert or replace the content record of a location.
    pub fn put_content(&self, content: LocationContent) {
        self.tables_mut()
            .content
            .insert(content.location_id.clone(), content);
    }

    /// Stored canonical slug of a node.
    pub fn canonical_slug(&self, location_type: LocationType, id: &str) -> Option<String> {
        self.tables()
            .locations
            .get(&location_type)
            .and_then(|rows| rows.get(id))
            .and_then(|row| row.canonical_slug.clone())
    }

    /// Number of canonical slug writes performed so far.
    pub fn slug_write_count(&self) -> usize {
        self.tables().slug_writes
    }

    pub fn fail_fetch(&self, location_type: LocationType, id: &str) {
        self.faults_mut().fetch.insert((location_type, id.to_string()));
    }

    pub fn fail_listing(&self, location_type: LocationType) {
        self.faults_mut().list.insert(location_type);
    }

    pub fn fail_write(&self, id: &str) {
        self.faults_mut().write.insert(id.to_string());
    }

    pub fn fail_content_reads(&self) {
        self.faults_mut().content_reads = true;
    }

    /// Make the canonical slug column probe fail with a non-schema error.
    pub fn fail_probe(&self) {
        self.faults_mut().probe = true;
    }

    /// Fail listings that read stored canonical slugs; plain listings still work.
    pub fn fail_canonical_listing(&self) {
        self.faults_mut().canonical_listing = true;
    }

    fn tables(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn tables_mut(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn faults(&self) -> RwLockReadGuard<'_, Faults> {
        self.faults.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn faults_mut(&self) -> RwLockWriteGuard<'_, Faults> {
        self.faults.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn require_canonical_column(&self, location_type: LocationType) -> StoreResult<()> {
        if self.canonical_slug_column {
            Ok(())
        } else {
            Err(StoreError::ColumnMissing(format!(
                "{}.canonical_slug",
                location_type.table()
            )))
        }
    }

    fn require_location_join(&self) -> StoreResult<()> {
        if self.location_join {
            Ok(())
        } else {
            Err(StoreError::RelationshipNotEmbeddable(
                "location_content -> locations".to_string(),
            ))
        }
    }

    fn check_content_reads(&self) -> StoreResult<()> {
        if self.faults().content_reads {
            Err(StoreError::Unavailable("location_content".to_string()))
        } else {
            Ok(())
        }
    }

    /// Search cities, regions, countries for the first row matching.
    fn find_location<F>(&self, predicate: F) -> Option<(LocationType, LocationRecord)>
    where
        F: Fn(&LocationRecord) -> bool,
    {
        let tables = self.tables();
        [LocationType::City, LocationType::Region, LocationType::Country]
            .into_iter()
            .find_map(|location_type| {
                tables
                    .locations
                    .get(&location_type)?
                    .values()
                    .find(|row| predicate(row))
                    .map(|row| (location_type, row.clone()))
            })
    }

    fn content_for(&self, location_id: &str) -> Option<LocationContent> {
        self.tables()
            .content
            .get(location_id)
            .cloned()
            .map(|row| self.as_read(row))
    }

    fn as_read(&self, mut row: LocationContent) -> LocationContent {
        if !self.content_canonical_slug_column {
            row.canonical_slug = None;
        }
        row
    }
}

#[async_trait]
impl LocationStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn probe_canonical_slug_column(&self) -> StoreResult<()> {
        if self.faults().probe {
            return Err(StoreError::Unavailable("information_schema".to_string()));
        }
        self.require_canonical_column(LocationType::Country)
    }

    async fn fetch_location(
        &self,
        location_type: LocationType,
        id: &str,
    ) -> StoreResult<Option<LocationRecord>> {
        if self.faults().fetch.contains(&(location_type, id.to_string())) {
            return Err(StoreError::Unavailable(format!(
                "{} {id}",
                location_type.table()
            )));
        }
        let tables = self.tables();
        Ok(tables
            .locations
            .get(&location_type)
            .and_then(|rows| rows.get(id))
            .map(|row| LocationRecord {
                canonical_slug: None,
                ..row.clone()
            }))
    }

    async fn list_locations(
        &self,
        location_type: LocationType,
        with_canonical: bool,
    ) -> StoreResult<Vec<LocationRecord>> {
        if self.faults().list.contains(&location_type) {
            return Err(StoreError::Unavailable(location_type.table().to_string()));
        }
        if with_canonical {
            self.require_canonical_column(location_type)?;
            if self.faults().canonical_listing {
                return Err(StoreError::Unavailable(format!(
                    "{}.canonical_slug",
                    location_type.table()
                )));
            }
        }

        let tables = self.tables();
        let mut rows: Vec<LocationRecord> = tables
            .locations
            .get(&location_type)
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default();
        if !with_canonical {
            for row in &mut rows {
                row.canonical_slug = None;
            }
        }
        rows.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(rows)
    }

    async fn list_location_ids(&self, location_type: LocationType) -> StoreResult<Vec<String>> {
        let rows = self.list_locations(location_type, false).await?;
        Ok(rows.into_iter().map(|row| row.id).collect())
    }

    async fn find_location_by_canonical_slug(
        &self,
        canonical_slug: &str,
    ) -> StoreResult<Option<(LocationType, LocationRecord)>> {
        self.require_canonical_column(LocationType::City)?;
        Ok(self.find_location(|row| row.canonical_slug.as_deref() == Some(canonical_slug)))
    }

    async fn write_canonical_slug(
        &self,
        location_type: LocationType,
        id: &str,
        canonical_slug: &str,
    ) -> StoreResult<()> {
        self.require_canonical_column(location_type)?;
        if self.faults().write.contains(id) {
            return Err(StoreError::Unavailable(format!(
                "write {} {id}",
                location_type.table()
            )));
        }

        let mut tables = self.tables_mut();
        let row = tables
            .locations
            .get_mut(&location_type)
            .and_then(|rows| rows.get_mut(id))
            .ok_or_else(|| StoreError::RowNotFound {
                table: location_type.table(),
                id: id.to_string(),
            })?;
        row.canonical_slug = Some(canonical_slug.to_string());
        tables.slug_writes += 1;
        Ok(())
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn content_by_canonical_slug(
        &self,
        canonical_slug: &str,
    ) -> StoreResult<Option<LocationContent>> {
        self.check_content_reads()?;
        if !self.content_canonical_slug_column {
            return Err(StoreError::ColumnMissing(
                "location_content.canonical_slug".to_string(),
            ));
        }
        Ok(self
            .tables()
            .content
            .values()
            .find(|row| row.canonical_slug.as_deref() == Some(canonical_slug))
            .cloned())
    }

    async fn content_by_location_canonical_slug(
        &self,
        canonical_slug: &str,
    ) -> StoreResult<Option<LocationContent>> {
        self.check_content_reads()?;
        self.require_location_join()?;
        self.require_canonical_column(LocationType::City)?;
        Ok(self
            .find_location(|row| row.canonical_slug.as_deref() == Some(canonical_slug))
            .and_then(|(_, row)| self.content_for(&row.id)))
    }

    async fn content_by_location_id(&self, location_id: &str) -> StoreResult<Option<LocationContent>> {
        self.check_content_reads()?;
        Ok(self.content_for(location_id))
    }

    async fn content_by_legacy_slug(&self, slug: &str) -> StoreResult<Option<LocationContent>> {
        self.check_content_reads()?;
        self.require_location_join()?;
        Ok(self
            .find_location(|row| row.slug == slug)
            .and_then(|(_, row)| self.content_for(&row.id)))
    }

    async fn content_location_ids(&self) -> StoreResult<Vec<String>> {
        self.check_content_reads()?;
        Ok(self.tables().content.keys().cloned().collect())
    }
}
