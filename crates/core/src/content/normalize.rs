use serde::Serialize;
use serde_json::{Map, Value};

use super::model::decode_content_json;
use super::section::Section;

/// Page content in the one shape renderers consume.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedContent {
    pub id: Option<String>,
    pub slug: Option<String>,
    pub title: String,
    pub meta_title: String,
    pub meta_description: String,
    pub sections: Vec<Section>,
}

/// Read any historical content shape.
///
/// Sections come from the first of `sections`, `content.sections`,
/// `pageSections` that is an array; failing that from `content_json`, either
/// its own `sections` array or one section per object-valued key. The title
/// falls back through `title`, `h1`, `meta.title` on the record, then on its
/// decoded `content_json`, then `"Untitled"`. Never fails.
pub fn normalize_location(raw: &Value) -> NormalizedContent {
    let raw = match raw {
        Value::String(_) => decode_content_json(raw).unwrap_or(Value::Null),
        other => other.clone(),
    };
    let content_json = raw.get("content_json").and_then(decode_content_json);
    let sources: Vec<&Value> = std::iter::once(&raw).chain(content_json.as_ref()).collect();

    let title = first_text(&sources, &[&["title"], &["h1"], &["meta", "title"]])
        .unwrap_or_else(|| "Untitled".to_string());
    let meta_title = first_text(
        &sources,
        &[&["metaTitle"], &["meta_title"], &["meta", "title"]],
    )
    .unwrap_or_default();
    let meta_description = first_text(
        &sources,
        &[&["metaDescription"], &["meta_description"], &["meta", "description"]],
    )
    .unwrap_or_default();

    NormalizedContent {
        id: first_text(&[&raw], &[&["id"], &["_id"]]),
        slug: first_text(&sources, &[&["slug"]]),
        title,
        meta_title,
        meta_description,
        sections: infer_sections(&raw, content_json.as_ref()),
    }
}

fn infer_sections(raw: &Value, content_json: Option<&Value>) -> Vec<Section> {
    let explicit = [
        raw.get("sections"),
        raw.get("content").and_then(|c| c.get("sections")),
        raw.get("pageSections"),
    ];
    if let Some(items) = explicit.into_iter().flatten().find_map(Value::as_array) {
        return from_array(items);
    }

    match content_json {
        Some(Value::Object(map)) => match map.get("sections").and_then(Value::as_array) {
            Some(items) => from_array(items),
            None => from_flat_keys(map),
        },
        _ => Vec::new(),
    }
}

fn from_array(items: &[Value]) -> Vec<Section> {
    items.iter().cloned().map(Section::from_stored).collect()
}

fn from_flat_keys(map: &Map<String, Value>) -> Vec<Section> {
    map.iter()
        .filter(|(_, value)| value.is_object())
        .map(|(key, value)| Section::new(key, value.clone()))
        .collect()
}

/// First non-empty string (or number) found at any of `paths`, trying every
/// path on one source before moving to the next.
fn first_text(sources: &[&Value], paths: &[&[&str]]) -> Option<String> {
    sources.iter().find_map(|source| {
        paths.iter().find_map(|path| {
            let value = path.iter().try_fold(*source, |node, key| node.get(key))?;
            match value {
                Value::String(text) if !text.is_empty() => Some(text.clone()),
                Value::Number(number) => Some(number.to_string()),
                _ => None,
            }
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::section::SectionKind;
    use serde_json::json;

    #[test]
    fn explicit_sections_are_kept_unchanged() {
        let sections = json!([
            {"type": "hero", "key": "hero", "data": {"heading": "Bath"}},
            {"type": "testimonial", "key": "t1", "data": {"quote": "Lovely"}, "order": 3}
        ]);
        let normalized = normalize_location(&json!({"title": "Bath", "sections": sections}));
        assert_eq!(serde_json::to_value(&normalized.sections).unwrap(), sections);
        assert_eq!(normalized.sections[1].kind, SectionKind::Unknown("testimonial".into()));
    }

    #[test]
    fn nested_and_page_sections() {
        let nested = normalize_location(&json!({"content": {"sections": [{"type": "faqs"}]}}));
        assert_eq!(nested.sections.len(), 1);
        assert_eq!(nested.sections[0].kind, SectionKind::Faqs);

        let page = normalize_location(&json!({"pageSections": [{"type": "cta"}], "sections": "nope"}));
        assert_eq!(page.sections[0].kind, SectionKind::Cta);
    }

    #[test]
    fn flat_content_json_keys_become_sections() {
        let normalized = normalize_location(&json!({
            "content_json": {
                "hero": {"heading": "Foster Agencies in Bath"},
                "about": {"body": "..."},
                "title": "X",
                "tags": ["a", "b"]
            }
        }));

        assert_eq!(normalized.sections.len(), 2);
        let hero = normalized
            .sections
            .iter()
            .find(|s| s.kind == SectionKind::Hero)
            .unwrap();
        assert_eq!(
            serde_json::to_value(hero).unwrap(),
            json!({"type": "hero", "key": "hero", "data": {"heading": "Foster Agencies in Bath"}})
        );
        assert!(normalized.sections.iter().any(|s| s.key == "about"));
        assert_eq!(normalized.title, "X");
    }

    #[test]
    fn content_json_sections_array_and_string_payloads() {
        let payload = json!({"sections": [{"type": "about", "key": "about"}]}).to_string();
        let normalized = normalize_location(&json!({"content_json": payload}));
        assert_eq!(normalized.sections.len(), 1);
        assert_eq!(normalized.sections[0].kind, SectionKind::About);
    }

    #[test]
    fn title_fallback_chain() {
        assert_eq!(normalize_location(&json!({"title": "T", "h1": "H"})).title, "T");
        assert_eq!(normalize_location(&json!({"title": "", "h1": "H"})).title, "H");
        assert_eq!(
            normalize_location(&json!({"meta": {"title": "M", "description": "D"}})).title,
            "M"
        );
        assert_eq!(normalize_location(&json!({})).title, "Untitled");
        assert_eq!(normalize_location(&Value::Null).title, "Untitled");
        assert_eq!(normalize_location(&json!([1, 2])).title, "Untitled");
    }

    #[test]
    fn meta_fields_and_ids() {
        let normalized = normalize_location(&json!({
            "id": 42,
            "content_json": {
                "slug": "/foster-agency/england",
                "meta_title": "Foster Agencies in England | UK Foster Care Directory",
                "meta_description": "Find accredited foster agencies in England."
            }
        }));
        assert_eq!(normalized.id.as_deref(), Some("42"));
        assert_eq!(normalized.slug.as_deref(), Some("/foster-agency/england"));
        assert_eq!(
            normalized.meta_title,
            "Foster Agencies in England | UK Foster Care Directory"
        );
        assert_eq!(normalized.meta_description, "Find accredited foster agencies in England.");
        assert!(normalized.sections.is_empty());
    }

    #[test]
    fn serializes_camel_case() {
        let value = serde_json::to_value(normalize_location(&json!({"metaTitle": "M"}))).unwrap();
        assert_eq!(value["metaTitle"], "M");
        assert_eq!(value["metaDescription"], "");
        assert_eq!(value["sections"], json!([]));
    }
}
