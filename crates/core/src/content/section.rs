use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};

/// Section kinds the page templates know how to render.
///
/// Anything else is carried as `Unknown` with its original key so that
/// content written by newer editors survives a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Hero,
    About,
    Overview,
    AgencyFinder,
    PopularLocations,
    PopularCities,
    TopAgencies,
    FosterSystem,
    WhyFoster,
    Benefits,
    Support,
    Training,
    Types,
    Allowances,
    Resources,
    Faqs,
    Regulated,
    Cta,
    FindAgencies,
    Unknown(String),
}

impl SectionKind {
    pub fn from_key(key: &str) -> Self {
        match key {
            "hero" => SectionKind::Hero,
            "about" => SectionKind::About,
            "overview" => SectionKind::Overview,
            "agencyFinder" => SectionKind::AgencyFinder,
            "popularLocations" => SectionKind::PopularLocations,
            "popularCities" => SectionKind::PopularCities,
            "topAgencies" => SectionKind::TopAgencies,
            "fosterSystem" => SectionKind::FosterSystem,
            "whyFoster" => SectionKind::WhyFoster,
            "benefits" => SectionKind::Benefits,
            "support" => SectionKind::Support,
            "training" => SectionKind::Training,
            "types" => SectionKind::Types,
            "allowances" => SectionKind::Allowances,
            "resources" => SectionKind::Resources,
            "faqs" => SectionKind::Faqs,
            "regulated" => SectionKind::Regulated,
            "cta" => SectionKind::Cta,
            "findAgencies" => SectionKind::FindAgencies,
            other => SectionKind::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SectionKind::Hero => "hero",
            SectionKind::About => "about",
            SectionKind::Overview => "overview",
            SectionKind::AgencyFinder => "agencyFinder",
            SectionKind::PopularLocations => "popularLocations",
            SectionKind::PopularCities => "popularCities",
            SectionKind::TopAgencies => "topAgencies",
            SectionKind::FosterSystem => "fosterSystem",
            SectionKind::WhyFoster => "whyFoster",
            SectionKind::Benefits => "benefits",
            SectionKind::Support => "support",
            SectionKind::Training => "training",
            SectionKind::Types => "types",
            SectionKind::Allowances => "allowances",
            SectionKind::Resources => "resources",
            SectionKind::Faqs => "faqs",
            SectionKind::Regulated => "regulated",
            SectionKind::Cta => "cta",
            SectionKind::FindAgencies => "findAgencies",
            SectionKind::Unknown(key) => key,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, SectionKind::Unknown(_))
    }
}

impl Serialize for SectionKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SectionKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Ok(SectionKind::from_key(&key))
    }
}

/// One renderable block of a page: `{type, key, data}`.
///
/// Sections read from a stored array keep the stored item and serialize back
/// to it unchanged; `kind`, `key` and `data` are views onto it.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    pub key: String,
    pub data: Value,
    stored: Option<Value>,
}

impl Section {
    /// A section built from a flat `content_json` key.
    pub fn new(key: &str, data: Value) -> Self {
        Self {
            kind: SectionKind::from_key(key),
            key: key.to_string(),
            data,
            stored: None,
        }
    }

    /// Interpret one item of a stored sections array.
    ///
    /// `type` (or `_type`) names the kind, `key` (or `_key`) defaults to the
    /// type, and `data` defaults to the whole item.
    pub fn from_stored(item: Value) -> Self {
        let field = |names: [&str; 2]| {
            names
                .iter()
                .find_map(|name| item.get(*name).and_then(Value::as_str))
                .map(str::to_string)
        };
        let type_name = field(["type", "_type"]).unwrap_or_default();
        let key = field(["key", "_key"]).unwrap_or_else(|| type_name.clone());
        let data = item.get("data").cloned().unwrap_or_else(|| item.clone());

        Self {
            kind: SectionKind::from_key(&type_name),
            key,
            data,
            stored: Some(item),
        }
    }

    pub fn to_value(&self) -> Value {
        match &self.stored {
            Some(item) => item.clone(),
            None => json!({
                "type": self.kind.as_str(),
                "key": self.key,
                "data": self.data,
            }),
        }
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.stored {
            Some(item) => item.serialize(serializer),
            None => self.to_value().serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Section {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Section::from_stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_and_unknown_kinds() {
        assert_eq!(SectionKind::from_key("topAgencies"), SectionKind::TopAgencies);
        assert!(SectionKind::from_key("faqs").is_known());
        let custom = SectionKind::from_key("mapEmbed");
        assert_eq!(custom, SectionKind::Unknown("mapEmbed".into()));
        assert_eq!(custom.as_str(), "mapEmbed");
        assert!(!custom.is_known());
    }

    #[test]
    fn flat_section_serializes_as_triple() {
        let section = Section::new("hero", json!({"heading": "Foster Agencies in Bath"}));
        assert_eq!(
            serde_json::to_value(&section).unwrap(),
            json!({"type": "hero", "key": "hero", "data": {"heading": "Foster Agencies in Bath"}})
        );
    }

    #[test]
    fn stored_items_round_trip_unchanged() {
        let items = json!([
            {"type": "hero", "key": "hero-1", "data": {"heading": "Hi"}, "hidden": false},
            {"_type": "faqs", "items": []},
            "free text",
            {"key": null}
        ]);
        let sections: Vec<Section> = serde_json::from_value(items.clone()).unwrap();
        assert_eq!(sections[0].kind, SectionKind::Hero);
        assert_eq!(sections[0].key, "hero-1");
        assert_eq!(sections[0].data, json!({"heading": "Hi"}));
        assert_eq!(sections[1].kind, SectionKind::Faqs);
        assert_eq!(sections[1].key, "faqs");
        assert_eq!(sections[1].data, json!({"_type": "faqs", "items": []}));
        assert_eq!(sections[2].kind, SectionKind::Unknown(String::new()));
        assert_eq!(serde_json::to_value(&sections).unwrap(), items);
    }
}
