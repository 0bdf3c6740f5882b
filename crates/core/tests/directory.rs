use foster_directory_core::canonical::{backfill_canonical_slugs, update_canonical_slug, verify_canonical_slugs};
use foster_directory_core::content::{
    default_content, get_location_content_by_canonical_slug, normalize_location, resolve_page,
    template_for, ContentSeed, ContentSource, LocationContent,
};
use foster_directory_core::store::memory::MemoryStore;
use foster_directory_core::{
    build_canonical_slug, get_location_tree, recompute_subtree, slugify, LocationRecord,
    LocationType,
};
use serde_json::json;

struct London {
    england: String,
    greater_london: String,
    london: String,
}

fn seed_london(store: &MemoryStore) -> London {
    let england = store.insert_location(LocationType::Country, "England", "", None);
    let greater_london = store.insert_location(
        LocationType::Region,
        "Greater London",
        "greater-london",
        Some(&england),
    );
    let london = store.insert_location(LocationType::City, "London", "london", Some(&greater_london));
    London {
        england,
        greater_london,
        london,
    }
}

#[test]
fn slugify_is_total_and_idempotent() {
    let samples = [
        "",
        "   ",
        "!!!",
        "Redcar and Cleveland",
        "  Bath & North-East Somerset  ",
        "St. Helens",
        "Ynys Môn",
        "Brighton___and--Hove",
        "東京",
        "emoji 🙂 town",
    ];
    for sample in samples {
        let once = slugify(sample);
        assert_eq!(slugify(&once), once, "{sample:?}");
        assert!(!once.starts_with('-') && !once.ends_with('-'));
    }
}

#[tokio::test]
async fn backfill_derives_slug_from_country_name() {
    let store = MemoryStore::new();
    let ids = seed_london(&store);

    let report = backfill_canonical_slugs(&store, &LocationType::ALL).await.unwrap();
    assert!(report.is_clean());
    assert_eq!(
        store.canonical_slug(LocationType::City, &ids.london).as_deref(),
        Some("/foster-agency/england/greater-london/london")
    );
    assert!(verify_canonical_slugs(&store).await.unwrap().is_empty());
}

#[tokio::test]
async fn builder_survives_city_fetch_failure() {
    let store = MemoryStore::new();
    let ids = seed_london(&store);
    store.fail_fetch(LocationType::City, &ids.london);

    let slug = build_canonical_slug(&store, &ids.london, LocationType::City).await;
    assert!(slug.starts_with("/foster-agency/"));
}

#[tokio::test]
async fn renaming_a_region_cascades_to_its_cities() {
    let store = MemoryStore::new();
    let ids = seed_london(&store);
    backfill_canonical_slugs(&store, &LocationType::ALL).await.unwrap();

    store.insert_record(
        LocationType::Region,
        LocationRecord {
            id: ids.greater_london.clone(),
            name: "London Boroughs".into(),
            slug: "london-boroughs".into(),
            parent_id: Some(ids.england.clone()),
            canonical_slug: Some("/foster-agency/england/greater-london".into()),
        },
    );
    assert_eq!(verify_canonical_slugs(&store).await.unwrap().len(), 2);

    recompute_subtree(&store, LocationType::Region, &ids.greater_london)
        .await
        .unwrap();
    assert_eq!(
        store.canonical_slug(LocationType::City, &ids.london).as_deref(),
        Some("/foster-agency/england/london-boroughs/london")
    );
    assert!(verify_canonical_slugs(&store).await.unwrap().is_empty());
}

#[tokio::test]
async fn tree_never_contains_orphans() {
    let store = MemoryStore::new();
    let ids = seed_london(&store);
    store.insert_location(LocationType::City, "Nowhere", "nowhere", Some("gone"));
    store.insert_location(LocationType::Region, "Lost Shire", "lost-shire", None);

    let tree = get_location_tree(&store, false).await.unwrap();
    for country in &tree {
        for region in &country.children {
            assert_eq!(region.location_type, LocationType::Region);
            for city in &region.children {
                assert_ne!(city.name, "Nowhere");
            }
        }
    }
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].children.len(), 1);
    assert_eq!(tree[0].children[0].children[0].id, ids.london);
}

#[tokio::test]
async fn lookup_without_content_is_none_and_page_uses_defaults() {
    let store = MemoryStore::new();
    let ids = seed_london(&store);
    backfill_canonical_slugs(&store, &LocationType::ALL).await.unwrap();

    let slug = "/foster-agency/england/greater-london/london";
    assert_eq!(get_location_content_by_canonical_slug(&store, slug).await, None);

    let page = resolve_page(&store, slug).await.unwrap();
    assert_eq!(page.source, ContentSource::Default);
    assert_eq!(page.location_id.as_deref(), Some(ids.london.as_str()));
    assert_eq!(page.normalized.title, "Foster Agencies in London");

    store.put_content(LocationContent {
        location_id: ids.london.clone(),
        template_type: Some("city".into()),
        canonical_slug: Some(slug.into()),
        content_json: Some(json!({"sections": [{"type": "hero", "key": "hero", "data": {}}]})),
        updated_at: None,
    });
    let page = resolve_page(&store, slug).await.unwrap();
    assert_eq!(page.source, ContentSource::Saved);
    assert_eq!(page.normalized.sections.len(), 1);
}

#[test]
fn explicit_sections_pass_through_normalization() {
    let sections = json!([{"type": "about", "key": "about", "data": {"body": "Hello"}}, {"anything": 1}]);
    let normalized = normalize_location(&json!({"sections": sections, "content_json": {"hero": {}}}));
    assert_eq!(serde_json::to_value(&normalized.sections).unwrap(), sections);
}

#[test]
fn flat_content_json_sections() {
    let normalized = normalize_location(&json!({
        "content_json": {"hero": {"heading": "H"}, "about": {"body": "B"}, "title": "X"}
    }));
    let mut keys: Vec<&str> = normalized.sections.iter().map(|s| s.key.as_str()).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["about", "hero"]);
}

#[test]
fn default_city_content_for_bath() {
    let content = default_content(&ContentSeed::new("Bath", LocationType::City));
    for key in ["hero", "about", "types", "topAgencies", "whyFoster", "allowances", "resources", "faqs"] {
        assert!(!content[key].is_null(), "{key}");
    }
    for key in template_for(LocationType::City).section_keys() {
        assert!(content.get(key).is_some(), "{key}");
    }
}

#[tokio::test]
async fn single_update_returns_written_slug() {
    let store = MemoryStore::new();
    let ids = seed_london(&store);

    let written = update_canonical_slug(&store, &ids.greater_london, LocationType::Region)
        .await
        .unwrap();
    assert_eq!(written, "/foster-agency/england/greater-london");
    assert_eq!(
        store.canonical_slug(LocationType::Region, &ids.greater_london),
        Some(written)
    );
}
