use serde::Deserialize;
use serde_json::{json, Value};

use crate::location::model::LocationType;
use crate::slug::canonical_path;

/// What default content needs to know about a location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContentSeed {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    /// Unrecognised types read as `None` and get city-shaped content.
    #[serde(default, rename = "type", deserialize_with = "lenient_type")]
    pub location_type: Option<LocationType>,
    #[serde(default)]
    pub canonical_slug: Option<String>,
}

fn lenient_type<'de, D>(deserializer: D) -> Result<Option<LocationType>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|text| text.parse().ok()))
}

impl ContentSeed {
    pub fn new(name: impl Into<String>, location_type: LocationType) -> Self {
        Self {
            name: Some(name.into()),
            location_type: Some(location_type),
            ..Self::default()
        }
    }

    /// Read a loosely shaped location object; anything missing stays unset.
    pub fn from_value(value: &Value) -> Self {
        ContentSeed::deserialize(value).unwrap_or_default()
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_canonical_slug(mut self, canonical_slug: impl Into<String>) -> Self {
        self.canonical_slug = Some(canonical_slug.into());
        self
    }

    fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or("Location")
    }

    fn page_slug(&self) -> String {
        match self.canonical_slug.as_deref().filter(|slug| !slug.is_empty()) {
            Some(canonical_slug) => canonical_slug.to_string(),
            None => canonical_path([self.slug.as_deref().unwrap_or_default()]),
        }
    }
}

/// Placeholder page content for a location nobody has edited yet.
///
/// The section keys match [`super::schema::template_for`] for the seed's
/// level; every text interpolates the location name.
pub fn default_content(seed: &ContentSeed) -> Value {
    let name = seed.display_name();
    let mut content = match seed.location_type {
        Some(LocationType::Country) => country_sections(name),
        Some(LocationType::Region) => region_sections(name),
        Some(LocationType::City) | None => city_sections(name),
    };

    if let Value::Object(map) = &mut content {
        map.insert("slug".into(), Value::String(seed.page_slug()));
        map.insert("title".into(), json!(format!("Foster Agencies in {name}")));
        map.insert(
            "meta_title".into(),
            json!(format!("Foster Agencies in {name} | UK Foster Care Directory")),
        );
        map.insert(
            "meta_description".into(),
            json!(format!(
                "Find accredited foster agencies in {name}. Expert support and guidance for prospective foster carers."
            )),
        );
    }
    content
}

/// `info@bathfamilycare.co.uk` and `https://bathfamilycare.co.uk`.
fn agency_contacts(name: &str) -> (String, String) {
    let domain: String = name
        .to_lowercase()
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect();
    (
        format!("info@{domain}familycare.co.uk"),
        format!("https://{domain}familycare.co.uk"),
    )
}

const WHO_CAN_FOSTER: &str = "you must be over 21, have a spare room, pass background checks, and complete training. You can be single, married, in a relationship, working, or retired. [Regulator] sets the standards for approval.";

fn country_sections(name: &str) -> Value {
    let (email, website) = agency_contacts(name);
    json!({
        "hero": {
            "heading": format!("Foster Agencies in {name}"),
            "subheading": format!("Find accredited foster agencies in {name}"),
            "cta_primary": { "text": "Get Foster Agency Support", "link": "/contact" },
            "cta_secondary": { "text": "Explore Regions", "link": "#regions" }
        },
        "overview": {
            "title": format!("About Fostering in {name}"),
            "body": format!("Welcome to our directory of foster agencies in {name}. We've compiled a list of accredited and trusted agencies to help you start your fostering journey. Fostering in {name} offers a rewarding opportunity to make a positive impact on a child's life while being part of a supportive community.")
        },
        "agencyFinder": {
            "title": "Foster Agency Finder by Region",
            "intro": format!("Discover the best foster agencies across {name} by region. Our comprehensive directory helps you find the perfect match for your fostering journey."),
            "ctaText": "Find Agencies by Region"
        },
        "popularLocations": {
            "title": format!("Featured Popular Locations in {name}"),
            "description": format!("Discover top cities and towns in {name} with high demand for foster carers"),
            "locations": [
                { "name": "London", "link": "#", "demand": "High", "agencies": "200+" },
                { "name": "Manchester", "link": "#", "demand": "High", "agencies": "75+" },
                { "name": "Birmingham", "link": "#", "demand": "High", "agencies": "65+" }
            ]
        },
        "topAgencies": {
            "title": format!("Top Foster Agencies in {name}"),
            "description": format!("Connect with trusted fostering services across {name}"),
            "items": [{
                "name": format!("{name} Family Care"),
                "summary": format!("Dedicated fostering service providing compassionate care for children in {name}."),
                "link": "#",
                "featured": true,
                "type": "National",
                "rating": 4.8,
                "reviewCount": 42,
                "phone": "+44 123 456 7890",
                "email": email,
                "website": website
            }]
        },
        "fosterSystem": {
            "title": format!("What is the Foster Care System Like in {name}?"),
            "sections": [
                {
                    "title": "Allowances & Support",
                    "items": [
                        { "title": "Weekly fostering allowances to cover child care costs" },
                        { "title": "24/7 support helpline for emergency assistance" },
                        { "title": "Regular supervision and mentoring" },
                        { "title": "Access to training and professional development" }
                    ]
                },
                {
                    "title": "Matching Process",
                    "items": [
                        { "title": "Initial enquiry and information session" },
                        { "title": "Formal application and documentation" },
                        { "title": "Home study and assessment" },
                        { "title": "Approval panel review" }
                    ]
                }
            ]
        },
        "whyFoster": {
            "title": format!("Why Choose to Foster in {name}?"),
            "description": "Make a meaningful difference in the lives of children in your community",
            "points": [
                {
                    "text": "Help Children Locally",
                    "description": "Provide stable, loving homes for children in your own community who need care and support."
                },
                {
                    "text": "Professional Support",
                    "description": "Access comprehensive training, 24/7 support, and ongoing guidance from experienced professionals."
                },
                {
                    "text": "Make a Lasting Impact",
                    "description": "Contribute to positive outcomes for vulnerable children and strengthen your local community."
                }
            ]
        },
        "faqs": {
            "title": format!("FAQs About Fostering in {name}"),
            "description": format!("Common questions about becoming a foster carer in {name}"),
            "items": [
                {
                    "question": format!("Do you get paid to foster in {name}?"),
                    "answer": format!("Yes, foster carers in {name} receive a fostering allowance to cover the costs of caring for a child. The amount varies depending on the agency and the child's needs, typically ranging from £400-£600 per week per child.")
                },
                {
                    "question": format!("Who can foster in {name}?"),
                    "answer": format!("To foster in {name}, {WHO_CAN_FOSTER}")
                }
            ]
        },
        "regulated": {
            "regulator": "[Regulator]",
            "description": "All agencies meet strict regulatory standards"
        },
        "findAgencies": {
            "title": "Find Agencies Near You",
            "description": format!("Connect with local fostering services in {name}")
        }
    })
}

fn region_sections(name: &str) -> Value {
    let (email, website) = agency_contacts(name);
    json!({
        "hero": {
            "heading": format!("Foster Agencies in {name}"),
            "subheading": format!("Find accredited foster agencies in {name}"),
            "cta_primary": { "text": "Get Foster Agency Support", "link": "/contact" },
            "cta_secondary": { "text": "Explore Cities", "link": "#cities" }
        },
        "about": {
            "title": format!("About Fostering in {name}"),
            "body": format!("Welcome to our directory of foster agencies in {name}. We've compiled a list of accredited and trusted agencies to help you start your fostering journey.")
        },
        "benefits": {
            "title": format!("Benefits and Support for Foster Carers in {name}"),
            "description": format!("Comprehensive support system for foster carers in {name}"),
            "items": [
                {
                    "title": "Financial Support",
                    "description": "Receive competitive fostering allowances to cover the costs of caring for a child."
                },
                {
                    "title": "Additional Payments",
                    "description": "Additional payments for special circumstances."
                }
            ]
        },
        "support": {
            "title": "Professional Support",
            "items": [
                {
                    "title": "24/7 support helpline for emergency assistance",
                    "description": "Access to 24/7 support helpline for emergency assistance."
                },
                {
                    "title": "Regular supervision and mentoring",
                    "description": "Regular supervision and mentoring from experienced professionals."
                }
            ]
        },
        "training": {
            "title": "Training and Development",
            "programs": [
                { "name": "Pre-approval Training", "description": "Initial preparation courses before approval" },
                { "name": "Induction Program", "description": "Post-approval training for new carers" }
            ]
        },
        "popularCities": {
            "title": format!("Popular Cities in {name}"),
            "description": format!("Explore fostering opportunities in key cities across {name}"),
            "cities": [
                {
                    "name": format!("Central {name}"),
                    "link": "#",
                    "population": "Varies",
                    "reason": format!("The heart of {name} with excellent fostering opportunities and strong community support.")
                },
                {
                    "name": format!("Northern {name}"),
                    "link": "#",
                    "population": "Varies",
                    "reason": "Growing area with increasing demand for foster carers to support local children."
                }
            ]
        },
        "topAgencies": {
            "title": format!("Top Foster Agencies in {name}"),
            "description": format!("Discover the leading foster agencies in {name} with excellent ratings and comprehensive support"),
            "items": [{
                "name": format!("{name} Family Care"),
                "summary": format!("Dedicated fostering service providing compassionate care for children in {name}."),
                "link": "#",
                "featured": true,
                "type": "Local Authority",
                "rating": 4.8,
                "reviewCount": 42,
                "phone": "+44 123 456 7890",
                "email": email,
                "website": website
            }]
        },
        "faqs": {
            "title": format!("Frequently Asked Questions About Fostering in {name}"),
            "description": format!("Get answers to common questions about becoming a foster carer in {name}"),
            "items": [
                {
                    "question": format!("How many foster families are needed in {name}?"),
                    "answer": format!("{name} has a continuous need for foster families to provide care for children and young people. The exact number varies based on local demand, but there is always a need for dedicated carers who can provide stable, loving homes.")
                },
                {
                    "question": format!("Who can foster a child in {name}?"),
                    "answer": format!("To foster in {name}, {WHO_CAN_FOSTER}")
                }
            ]
        },
        "cta": {
            "title": "Ready to Start Your Fostering Journey?",
            "description": format!("Take the first step towards making a difference in a child's life in {name}"),
            "cta_primary": { "text": "Talk to a Foster Advisor", "link": "/contact" },
            "cta_secondary": { "text": "Download Information Pack", "link": "#" }
        }
    })
}

fn city_sections(name: &str) -> Value {
    let (email, website) = agency_contacts(name);
    json!({
        "hero": {
            "heading": format!("Foster Agencies in {name}"),
            "subheading": format!("Find accredited foster agencies in {name}"),
            "cta_primary": { "text": "Talk to a Foster Advisor", "link": "/contact" },
            "cta_secondary": { "text": "View Agencies", "link": "#agencies" }
        },
        "about": {
            "title": format!("About Fostering in {name}"),
            "body": format!("Welcome to our directory of foster agencies in {name}. We've compiled a list of accredited and trusted agencies to help you start your fostering journey. Fostering in {name} offers a rewarding opportunity to make a positive impact on a child's life while being part of a supportive community.")
        },
        "types": {
            "title": format!("Types of Fostering Available in {name}"),
            "description": "Various fostering opportunities are available to suit different circumstances and preferences",
            "items": [
                {
                    "name": "Short-term Fostering",
                    "description": "Providing temporary care for children while plans are made for their future. This could last from a few days to several months."
                },
                {
                    "name": "Long-term Fostering",
                    "description": "Providing stable, long-term care for children who cannot return to their birth families. This often lasts until the child reaches adulthood."
                },
                {
                    "name": "Specialist Fostering",
                    "description": "Caring for children with specific needs, including disabilities, behavioral challenges, or those requiring therapeutic support."
                }
            ]
        },
        "topAgencies": {
            "title": format!("Top Foster Agencies in {name}"),
            "description": "Connect with trusted fostering services in your local area",
            "items": [{
                "name": format!("{name} Family Care"),
                "description": format!("Dedicated fostering service providing compassionate care for children in {name}."),
                "link": "#",
                "featured": true,
                "type": "Local Authority",
                "rating": 4.8,
                "reviewCount": 42,
                "phone": "+44 123 456 7890",
                "email": email,
                "website": website
            }]
        },
        "whyFoster": {
            "title": format!("Why Foster in {name}?"),
            "description": "Make a meaningful difference in the lives of children in your community",
            "points": [
                {
                    "text": "Community Support",
                    "description": format!("Access local support networks and resources specific to {name}")
                },
                {
                    "text": "Professional Training",
                    "description": "Receive specialized training from [Regulator] approved programs"
                },
                {
                    "text": "Lasting Impact",
                    "description": format!("Contribute to positive outcomes for vulnerable children in {name}")
                }
            ]
        },
        "allowances": {
            "title": format!("Foster Allowances & Support in {name}"),
            "description": format!("Comprehensive support system for foster carers in {name}"),
            "items": [
                {
                    "title": "Weekly fostering allowances to cover child care costs",
                    "description": "Receive weekly fostering allowances to cover the costs of caring for a child."
                },
                {
                    "title": "Additional payments for special circumstances",
                    "description": "Additional payments for special circumstances."
                }
            ]
        },
        "resources": {
            "title": format!("Local Support & Resources in {name}"),
            "description": format!("Access community resources and support networks in {name}"),
            "items": [{
                "title": "[Region] [Local Authority]",
                "link": "#",
                "description": format!("The local authority provides additional resources and support for foster carers in {name}.")
            }]
        },
        "faqs": {
            "title": format!("FAQs About Fostering in {name}"),
            "description": format!("Common questions about becoming a foster carer in {name}"),
            "items": [
                {
                    "question": format!("How do I find foster agencies in {name}?"),
                    "answer": format!("There are several ways to find foster agencies in {name}. You can browse our directory above, contact your local authority ([Regulator]) for recommendations, or search online for local fostering services. Most agencies offer initial consultations to discuss your interest in fostering.")
                },
                {
                    "question": format!("Who can foster a child in {name}?"),
                    "answer": format!("To foster in {name}, {WHO_CAN_FOSTER}")
                }
            ]
        },
        "regulated": {
            "regulator": "[Regulator]",
            "description": "All agencies meet strict regulatory standards"
        },
        "cta": {
            "title": format!("Ready to Start Fostering in {name}?"),
            "description": format!("Speak with a foster care advisor today to learn more about opportunities in {name}"),
            "cta_primary": { "text": "Talk to a Foster Advisor", "link": "/contact" },
            "cta_secondary": { "text": format!("View Agencies in {name}"), "link": "#agencies" }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::schema::template_for;

    #[test]
    fn covers_every_template_section() {
        for location_type in LocationType::ALL {
            let content = default_content(&ContentSeed::new("Bath", location_type));
            for key in template_for(location_type).section_keys() {
                assert!(
                    content.get(key).is_some_and(Value::is_object),
                    "{location_type} default content lacks {key}"
                );
            }
        }
    }

    #[test]
    fn city_page_for_bath() {
        let content = default_content(&ContentSeed::new("Bath", LocationType::City).with_slug("bath"));
        assert_eq!(content["slug"], "/foster-agency/bath");
        assert_eq!(content["title"], "Foster Agencies in Bath");
        assert_eq!(content["meta_title"], "Foster Agencies in Bath | UK Foster Care Directory");
        assert_eq!(content["hero"]["heading"], "Foster Agencies in Bath");
        assert_eq!(content["topAgencies"]["items"][0]["email"], "info@bathfamilycare.co.uk");
        assert_eq!(content["cta"]["cta_secondary"]["text"], "View Agencies in Bath");
    }

    #[test]
    fn canonical_slug_wins_and_name_defaults() {
        let seed = ContentSeed::default().with_canonical_slug("/foster-agency/england/somerset");
        let content = default_content(&seed);
        assert_eq!(content["slug"], "/foster-agency/england/somerset");
        assert_eq!(content["title"], "Foster Agencies in Location");
        // no type means city-shaped content
        assert!(content.get("allowances").is_some());
    }

    #[test]
    fn seeds_from_loose_objects() {
        let county = ContentSeed::from_value(&serde_json::json!({
            "name": "North Yorkshire",
            "slug": "north-yorkshire",
            "type": "county"
        }));
        assert_eq!(county.location_type, Some(LocationType::Region));
        let content = default_content(&county);
        assert!(content.get("popularCities").is_some());
        assert_eq!(
            content["topAgencies"]["items"][0]["website"],
            "https://northyorkshirefamilycare.co.uk"
        );

        let unknown = ContentSeed::from_value(&serde_json::json!({"name": "Bath", "type": "borough"}));
        assert_eq!(unknown.location_type, None);
        assert!(default_content(&unknown).get("types").is_some());

        assert_eq!(ContentSeed::from_value(&serde_json::json!(7)), ContentSeed::default());
    }
}
