use std::collections::{HashMap, HashSet};

use tracing::{info, warn};

use super::arena::LocationArena;
use super::model::{LocationRecord, LocationType, TreeNode};
use crate::slug::canonical_path;
use crate::store::{DirectoryStore, LocationStore, StoreError};

/// Build the country → region → city forest shown in the admin UI.
///
/// Each level is loaded with a single query. When the location tables carry
/// no `canonical_slug` column (or reading it fails) the levels are loaded
/// without it and canonical slugs are derived in memory from the hierarchy.
/// Regions without a known country and cities without a known region are
/// logged and left out. Every node is editable.
///
/// With `include_content`, nodes also report whether saved content exists.
pub async fn get_location_tree<S>(store: &S, include_content: bool) -> Result<Vec<TreeNode>, StoreError>
where
    S: DirectoryStore + ?Sized,
{
    let [countries, regions, cities] = load_levels(store).await?;
    let arena = LocationArena::from_levels(&countries, &regions, &cities);

    let content_ids = if include_content {
        match store.content_location_ids().await {
            Ok(ids) => Some(ids.into_iter().collect::<HashSet<_>>()),
            Err(err) => {
                warn!(error = %err, "Cannot read content ids; leaving content flags unset");
                None
            }
        }
    } else {
        None
    };

    let build = |location_type: LocationType, record: &LocationRecord| TreeNode {
        id: record.id.clone(),
        name: record.name.clone(),
        slug: record.slug.clone(),
        canonical_slug: record
            .stored_canonical_slug()
            .map(str::to_string)
            .or_else(|| arena.canonical_slug_of(location_type, &record.id))
            .unwrap_or_else(|| canonical_path([record.segment()])),
        location_type,
        editable: true,
        has_content: content_ids.as_ref().map(|ids| ids.contains(&record.id)),
        children: Vec::new(),
    };

    let mut tree: Vec<TreeNode> = countries
        .iter()
        .map(|country| build(LocationType::Country, country))
        .collect();
    let country_index: HashMap<&str, usize> = countries
        .iter()
        .enumerate()
        .map(|(i, country)| (country.id.as_str(), i))
        .collect();

    let mut region_index: HashMap<&str, (usize, usize)> = HashMap::new();
    for region in &regions {
        let parent = region
            .parent_id
            .as_deref()
            .and_then(|id| country_index.get(id).copied());
        match parent {
            Some(ci) => {
                let siblings = &mut tree[ci].children;
                region_index.insert(region.id.as_str(), (ci, siblings.len()));
                siblings.push(build(LocationType::Region, region));
            }
            None => warn!(
                region = %region.name,
                id = %region.id,
                country_id = ?region.parent_id,
                "Orphaned region found"
            ),
        }
    }

    let mut orphaned_cities = 0usize;
    for city in &cities {
        let parent = city
            .parent_id
            .as_deref()
            .and_then(|id| region_index.get(id).copied());
        match parent {
            Some((ci, ri)) => tree[ci].children[ri]
                .children
                .push(build(LocationType::City, city)),
            None => {
                orphaned_cities += 1;
                warn!(
                    city = %city.name,
                    id = %city.id,
                    region_id = ?city.parent_id,
                    "Orphaned city found"
                );
            }
        }
    }

    info!(
        countries = tree.len(),
        regions = region_index.len(),
        cities = cities.len() - orphaned_cities,
        "Built location tree"
    );
    Ok(tree)
}

/// Load all three levels, with stored canonical slugs when the schema has them.
async fn load_levels<S>(store: &S) -> Result<[Vec<LocationRecord>; 3], StoreError>
where
    S: LocationStore + ?Sized,
{
    if canonical_slug_column_present(store).await {
        match load_each_level(store, true).await {
            Ok(levels) => return Ok(levels),
            Err(err) => warn!(
                error = %err,
                "Loading canonical slugs failed; deriving them from the hierarchy"
            ),
        }
    } else {
        warn!("canonical_slug column not found; deriving canonical slugs from the hierarchy");
    }
    load_each_level(store, false).await
}

async fn load_each_level<S>(store: &S, with_canonical: bool) -> Result<[Vec<LocationRecord>; 3], StoreError>
where
    S: LocationStore + ?Sized,
{
    Ok([
        store.list_locations(LocationType::Country, with_canonical).await?,
        store.list_locations(LocationType::Region, with_canonical).await?,
        store.list_locations(LocationType::City, with_canonical).await?,
    ])
}

/// Only a definite "column does not exist" answer counts as absent; any other
/// probe failure assumes the column is there.
async fn canonical_slug_column_present<S>(store: &S) -> bool
where
    S: LocationStore + ?Sized,
{
    match store.probe_canonical_slug_column().await {
        Ok(()) => true,
        Err(StoreError::ColumnMissing(column)) => {
            info!(%column, "canonical_slug column absent");
            false
        }
        Err(err) => {
            warn!(error = %err, "canonical_slug probe failed; assuming the column exists");
            true
        }
    }
}
