use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::defaults::{default_content, ContentSeed};
use super::lookup::find_content_by_canonical_slug;
use super::normalize::{normalize_location, NormalizedContent};
use crate::location::model::LocationType;
use crate::location::path::CanonicalPath;
use crate::slug::title_from_slug;
use crate::store::DirectoryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    Saved,
    Default,
}

/// Everything a page renderer needs for one location URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPage {
    pub canonical_slug: String,
    pub location_type: LocationType,
    pub location_id: Option<String>,
    pub source: ContentSource,
    pub content: Value,
    pub normalized: NormalizedContent,
}

/// Resolve the content of a location page.
///
/// Saved content wins. Otherwise default content is generated, named after
/// the location stored under that canonical slug or, failing that, after the
/// last path segment. Only paths that cannot be a location page (more than
/// three segments, empty segments, the bare root) yield `None`.
pub async fn resolve_page<S>(store: &S, path: &str) -> Option<ResolvedPage>
where
    S: DirectoryStore + ?Sized,
{
    let path = CanonicalPath::parse(path)?;
    let canonical_slug = path.to_canonical_slug();

    let saved = find_content_by_canonical_slug(store, &canonical_slug)
        .await
        .and_then(|row| Some((row.payload()?, row.location_id)));

    let (content, location_id, location_type, source) = match saved {
        Some((content, location_id)) => {
            (content, Some(location_id), path.location_type(), ContentSource::Saved)
        }
        None => {
            let (seed, location_id) = seed_for(store, &path, &canonical_slug).await;
            let location_type = seed.location_type.unwrap_or_else(|| path.location_type());
            (default_content(&seed), location_id, location_type, ContentSource::Default)
        }
    };

    let normalized = normalize_location(&json!({
        "id": location_id,
        "slug": canonical_slug,
        "content_json": content,
    }));
    debug!(%canonical_slug, ?source, "Resolved page");

    Some(ResolvedPage {
        canonical_slug,
        location_type,
        location_id,
        source,
        content,
        normalized,
    })
}

async fn seed_for<S>(store: &S, path: &CanonicalPath, canonical_slug: &str) -> (ContentSeed, Option<String>)
where
    S: DirectoryStore + ?Sized,
{
    let stored = match store.find_location_by_canonical_slug(canonical_slug).await {
        Ok(found) => found,
        Err(err) => {
            warn!(canonical_slug, error = %err, "Location lookup failed; naming page after its URL");
            None
        }
    };

    match stored {
        Some((location_type, record)) => {
            let seed = ContentSeed::new(record.name.clone(), location_type)
                .with_slug(record.segment())
                .with_canonical_slug(canonical_slug);
            (seed, Some(record.id))
        }
        None => {
            let seed = ContentSeed::new(title_from_slug(path.leaf()), path.location_type())
                .with_slug(path.leaf())
                .with_canonical_slug(canonical_slug);
            (seed, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::model::LocationContent;
    use crate::content::section::SectionKind;
    use crate::store::memory::MemoryStore;
    use crate::store::LocationStore;

    #[tokio::test]
    async fn saved_content_wins() {
        let store = MemoryStore::new();
        store.put_content(LocationContent {
            location_id: "loc-1".into(),
            template_type: Some("city".into()),
            canonical_slug: Some("/foster-agency/england/somerset/bath".into()),
            content_json: Some(json!({"title": "Fostering in Bath", "hero": {"heading": "Bath"}})),
            updated_at: None,
        });

        let page = resolve_page(&store, "england/somerset/bath").await.unwrap();
        assert_eq!(page.source, ContentSource::Saved);
        assert_eq!(page.location_id.as_deref(), Some("loc-1"));
        assert_eq!(page.normalized.title, "Fostering in Bath");
        assert_eq!(page.normalized.sections.len(), 1);
        assert_eq!(page.normalized.sections[0].kind, SectionKind::Hero);
    }

    #[tokio::test]
    async fn defaults_named_after_stored_location() {
        let store = MemoryStore::new();
        let country = store.insert_location(LocationType::Country, "England", "england", None);
        let region = store.insert_location(
            LocationType::Region,
            "North Yorkshire",
            "north-yorkshire",
            Some(&country),
        );
        store
            .write_canonical_slug(LocationType::Region, &region, "/foster-agency/england/north-yorkshire")
            .await
            .unwrap();

        let page = resolve_page(&store, "/foster-agency/england/north-yorkshire")
            .await
            .unwrap();
        assert_eq!(page.source, ContentSource::Default);
        assert_eq!(page.location_type, LocationType::Region);
        assert_eq!(page.location_id, Some(region));
        assert_eq!(page.content["title"], "Foster Agencies in North Yorkshire");
        assert_eq!(page.content["slug"], "/foster-agency/england/north-yorkshire");
        assert_eq!(page.normalized.title, "Foster Agencies in North Yorkshire");
        assert!(page
            .normalized
            .sections
            .iter()
            .any(|s| s.kind == SectionKind::PopularCities));
    }

    #[tokio::test]
    async fn defaults_named_after_url_when_location_unknown() {
        let store = MemoryStore::new().without_canonical_slug_column();
        store.fail_content_reads();

        let page = resolve_page(&store, "/foster-agency/england/redcar-and-cleveland/redcar")
            .await
            .unwrap();
        assert_eq!(page.source, ContentSource::Default);
        assert_eq!(page.location_type, LocationType::City);
        assert_eq!(page.location_id, None);
        assert_eq!(page.content["title"], "Foster Agencies in Redcar");

        let region = resolve_page(&store, "england/redcar-and-cleveland").await.unwrap();
        assert_eq!(region.content["title"], "Foster Agencies in Redcar and Cleveland");
    }

    #[tokio::test]
    async fn malformed_paths() {
        let store = MemoryStore::new();
        assert!(resolve_page(&store, "/foster-agency/").await.is_none());
        assert!(resolve_page(&store, "/foster-agency/a/b/c/d").await.is_none());
        assert!(resolve_page(&store, "/foster-agency/a//c").await.is_none());
    }
}
