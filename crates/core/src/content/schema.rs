//! Editor-facing section templates, one per location level.
//!
//! The keys of each template are the keys [`super::defaults::default_content`]
//! fills in, and the keys the page renderers look for.

use serde::Serialize;

use crate::location::model::LocationType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Textarea,
    Boolean,
    Number,
    Object,
    Array,
}

/// One editable field. `fields` holds the members of an object, or the
/// fields of each item of an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldTemplate {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub label: &'static str,
    pub placeholder: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u8>,
    #[serde(skip_serializing_if = "no_fields")]
    pub fields: &'static [FieldTemplate],
}

fn no_fields(fields: &&'static [FieldTemplate]) -> bool {
    fields.is_empty()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionTemplate {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldTemplate],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocationTemplate {
    pub template: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub sections: &'static [SectionTemplate],
}

impl LocationTemplate {
    pub fn section_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sections.iter().map(|section| section.key)
    }

    pub fn section(&self, key: &str) -> Option<&'static SectionTemplate> {
        self.sections.iter().find(|section| section.key == key)
    }
}

pub fn template_for(location_type: LocationType) -> &'static LocationTemplate {
    match location_type {
        LocationType::Country => &COUNTRY,
        LocationType::Region => &REGION,
        LocationType::City => &CITY,
    }
}

const fn leaf(name: &'static str, kind: FieldKind, label: &'static str, placeholder: &'static str) -> FieldTemplate {
    FieldTemplate {
        name,
        kind,
        label,
        placeholder,
        rows: None,
        fields: &[],
    }
}

const fn text(name: &'static str, label: &'static str, placeholder: &'static str) -> FieldTemplate {
    leaf(name, FieldKind::Text, label, placeholder)
}

const fn textarea(name: &'static str, label: &'static str, placeholder: &'static str) -> FieldTemplate {
    leaf(name, FieldKind::Textarea, label, placeholder)
}

const fn body(placeholder: &'static str) -> FieldTemplate {
    FieldTemplate {
        rows: Some(6),
        ..leaf("body", FieldKind::Textarea, "Body Content", placeholder)
    }
}

const TITLE: &str = "Title";
const DESCRIPTION: &str = "Description";

static COUNTRY: LocationTemplate = LocationTemplate {
    template: "country",
    label: "Country Template (e.g. England)",
    description: "Template for country-level pages showing regions and fostering overview",
    sections: &[
        SectionTemplate {
            key: "hero",
            label: "Hero Section",
            description: "Main hero section with call-to-action buttons. Include heading, subheading, and CTAs.",
            fields: &[
                text("heading", "Heading", "Foster Agencies in [Country]"),
                textarea("subheading", "Subheading", "Find accredited foster agencies in [Country]"),
                FieldTemplate {
                    fields: &[
                        text("text", "Button Text", "Get Foster Agency Support"),
                        text("link", "Button Link", "/contact"),
                    ],
                    ..leaf("cta_primary", FieldKind::Object, "Primary CTA", "")
                },
                FieldTemplate {
                    fields: &[
                        text("text", "Button Text", "Explore Regions"),
                        text("link", "Button Link", "#regions"),
                    ],
                    ..leaf("cta_secondary", FieldKind::Object, "Secondary CTA", "")
                },
            ],
        },
        SectionTemplate {
            key: "overview",
            label: "Overview of Fostering",
            description: "Introduction to fostering in this country with general information. Include statistics, legal framework, and national support systems.",
            fields: &[
                text("title", TITLE, "About Fostering in [Country]"),
                body("Welcome to our directory of foster agencies in [Country]. We've compiled a list of accredited and trusted agencies to help you start your fostering journey..."),
            ],
        },
        SectionTemplate {
            key: "agencyFinder",
            label: "Foster Agency Finder by Region",
            description: "Section to help users find agencies by region. Include an introduction and call-to-action.",
            fields: &[
                text("title", TITLE, "Foster Agency Finder by Region"),
                textarea("intro", "Introduction", "Discover the best foster agencies across [Country] by region."),
                text("ctaText", "Call to Action Text", "Find Agencies by Region"),
            ],
        },
        SectionTemplate {
            key: "popularLocations",
            label: "Featured Popular Locations",
            description: "Showcase popular regions or cities within the country. Include links to these locations.",
            fields: &[
                text("title", TITLE, "Featured Popular Locations in [Country]"),
                textarea("description", DESCRIPTION, "Discover top cities and towns in [Country] with high demand for foster carers"),
                FieldTemplate {
                    fields: &[
                        text("name", "Location Name", "London"),
                        text("link", "Link", "/foster-agency/england/london"),
                        text("demand", "Demand", "High"),
                        text("agencies", "Number of Agencies", "200+"),
                    ],
                    ..leaf("locations", FieldKind::Array, "Locations", "")
                },
            ],
        },
        SectionTemplate {
            key: "topAgencies",
            label: "Top Agencies in Country",
            description: "Featured foster agencies in this country. Include agency names, summaries, and links.",
            fields: &[
                text("title", TITLE, "Top Foster Agencies in [Country]"),
                textarea("description", DESCRIPTION, "Connect with trusted fostering services across [Country]"),
                FieldTemplate {
                    fields: &[
                        text("name", "Agency Name", "[Country] Family Care"),
                        textarea("summary", "Summary", "Leading local foster agency with over 10 years of experience providing quality care and support."),
                        text("link", "Link", "#"),
                        leaf("featured", FieldKind::Boolean, "Featured", "true"),
                        text("type", "Type", "National"),
                        leaf("rating", FieldKind::Number, "Rating", "4.8"),
                        leaf("reviewCount", FieldKind::Number, "Review Count", "42"),
                        text("phone", "Phone", "+44 123 456 7890"),
                        text("email", "Email", "info@agency.com"),
                        text("website", "Website", "https://agency.com"),
                    ],
                    ..leaf("items", FieldKind::Array, "Agencies", "")
                },
            ],
        },
        SectionTemplate {
            key: "fosterSystem",
            label: "Foster Care System",
            description: "Information about the country's foster care system and regulations. Include key aspects of the system.",
            fields: &[
                text("title", TITLE, "What is the Foster Care System Like in [Country]?"),
                FieldTemplate {
                    fields: &[
                        text("title", "Section Title", "Allowances & Support"),
                        FieldTemplate {
                            fields: &[text(
                                "title",
                                "Item Title",
                                "Weekly fostering allowances to cover child care costs",
                            )],
                            ..leaf("items", FieldKind::Array, "Items", "")
                        },
                    ],
                    ..leaf("sections", FieldKind::Array, "System Sections", "")
                },
            ],
        },
        SectionTemplate {
            key: "whyFoster",
            label: "Why Choose to Foster",
            description: "Reasons why people should consider fostering in this country. Include compelling reasons and benefits.",
            fields: &[
                text("title", TITLE, "Why Choose to Foster in [Country]?"),
                textarea("description", DESCRIPTION, "Make a meaningful difference in the lives of children in your community"),
                FieldTemplate {
                    fields: &[
                        text("text", "Reason", "Help Children Locally"),
                        textarea("description", DESCRIPTION, "Provide stable, loving homes for children in your own community who need care and support."),
                    ],
                    ..leaf("points", FieldKind::Array, "Reasons", "")
                },
            ],
        },
        SectionTemplate {
            key: "faqs",
            label: "Frequently Asked Questions",
            description: "Common questions and answers about fostering in this country. Include practical information.",
            fields: &[
                text("title", TITLE, "FAQs About Fostering in [Country]"),
                textarea("description", DESCRIPTION, "Common questions about becoming a foster carer in [Country]"),
                FieldTemplate {
                    fields: &[
                        text("question", "Question", "How do I become a foster carer?"),
                        textarea("answer", "Answer", "Becoming a foster carer involves several steps including an application, assessments, training, and approval process..."),
                    ],
                    ..leaf("items", FieldKind::Array, "FAQ Items", "")
                },
            ],
        },
        SectionTemplate {
            key: "regulated",
            label: "Regulated & Trusted by UK Authorities",
            description: "Information about regulation and trust by UK authorities.",
            fields: &[
                text("regulator", "Regulator", "Ofsted"),
                textarea("description", DESCRIPTION, "All agencies meet strict regulatory standards"),
            ],
        },
        SectionTemplate {
            key: "findAgencies",
            label: "Find Agencies Near You",
            description: "Section to help users find agencies near them.",
            fields: &[
                text("title", TITLE, "Find Agencies Near You"),
                textarea("description", DESCRIPTION, "Connect with local fostering services in [Country]"),
            ],
        },
    ],
};

static REGION: LocationTemplate = LocationTemplate {
    template: "region",
    label: "County/Region Template (e.g. Bath and North East Somerset)",
    description: "Template for county/region-level pages showing cities and local information",
    sections: &[
        SectionTemplate {
            key: "hero",
            label: "Hero Section",
            description: "Main hero section with call-to-action buttons. Include heading, subheading, and CTAs.",
            fields: &[
                text("heading", "Heading", "Foster Agencies in [Region], [Country]"),
                textarea("subheading", "Subheading", "Find accredited foster agencies in [Region], [Country]"),
                FieldTemplate {
                    fields: &[
                        text("text", "Button Text", "Get Foster Agency Support"),
                        text("link", "Button Link", "/contact"),
                    ],
                    ..leaf("cta_primary", FieldKind::Object, "Primary CTA", "")
                },
                FieldTemplate {
                    fields: &[
                        text("text", "Button Text", "Explore Cities"),
                        text("link", "Button Link", "#cities"),
                    ],
                    ..leaf("cta_secondary", FieldKind::Object, "Secondary CTA", "")
                },
            ],
        },
        SectionTemplate {
            key: "about",
            label: "About Fostering",
            description: "Introduction to fostering in this region with local information. Include regional statistics and key organizations.",
            fields: &[
                text("title", TITLE, "About Fostering in [Region]"),
                body("Welcome to our directory of foster agencies in [Region]. We've compiled a list of accredited and trusted agencies to help you start your fostering journey..."),
            ],
        },
        SectionTemplate {
            key: "benefits",
            label: "Benefits and Support for Foster Carers",
            description: "Local benefits and support services available to foster carers. Include financial and practical support.",
            fields: &[
                text("title", TITLE, "Benefits and Support for Foster Carers in [Region]"),
                textarea("description", DESCRIPTION, "Comprehensive support system for foster carers in [Region]"),
                FieldTemplate {
                    fields: &[
                        text("title", "Benefit Title", "Financial Support"),
                        textarea("description", DESCRIPTION, "Receive competitive fostering allowances to cover the costs of caring for a child."),
                    ],
                    ..leaf("items", FieldKind::Array, "Benefits", "")
                },
            ],
        },
        SectionTemplate {
            key: "support",
            label: "Professional Support",
            description: "Professional support services available to foster carers in this region.",
            fields: &[
                text("title", TITLE, "Professional Support"),
                FieldTemplate {
                    fields: &[
                        text("title", "Support Title", "24/7 support helpline for emergency assistance"),
                        textarea("description", DESCRIPTION, "Access to 24/7 support helpline for emergency assistance."),
                    ],
                    ..leaf("items", FieldKind::Array, "Support Items", "")
                },
            ],
        },
        SectionTemplate {
            key: "training",
            label: "Training and Development",
            description: "Local training programs and development opportunities. Include information about initial and ongoing training.",
            fields: &[
                text("title", TITLE, "Training and Development"),
                FieldTemplate {
                    fields: &[
                        text("name", "Program Name", "Pre-approval Training"),
                        textarea("description", DESCRIPTION, "Initial preparation courses before approval"),
                    ],
                    ..leaf("programs", FieldKind::Array, "Programs", "")
                },
            ],
        },
        SectionTemplate {
            key: "popularCities",
            label: "Popular Cities in Region",
            description: "Featured cities within this region. Include links to city pages.",
            fields: &[
                text("title", TITLE, "Popular Cities in [Region]"),
                textarea("description", DESCRIPTION, "Explore fostering opportunities in key cities across [Region]"),
                FieldTemplate {
                    fields: &[
                        text("name", "City Name", "Central [Region]"),
                        text("link", "Link", "#"),
                        text("population", "Population", "Varies"),
                        textarea("reason", "Reason", "The heart of [Region] with excellent fostering opportunities and strong community support."),
                    ],
                    ..leaf("cities", FieldKind::Array, "Cities", "")
                },
            ],
        },
        SectionTemplate {
            key: "topAgencies",
            label: "Featured Agencies",
            description: "Featured foster agencies in this region. Include agency names, summaries, and links.",
            fields: &[
                text("title", TITLE, "Top Foster Agencies in [Region]"),
                textarea("description", DESCRIPTION, "Discover the leading foster agencies in [Region] with excellent ratings and comprehensive support"),
                FieldTemplate {
                    fields: &[
                        text("name", "Agency Name", "[Region] Family Care"),
                        textarea("summary", "Summary", "Leading local foster agency with over 10 years of experience providing quality care and support."),
                        text("link", "Link", "#"),
                        leaf("featured", FieldKind::Boolean, "Featured", "true"),
                        text("type", "Type", "Local Authority"),
                        leaf("rating", FieldKind::Number, "Rating", "4.8"),
                        leaf("reviewCount", FieldKind::Number, "Review Count", "42"),
                        text("phone", "Phone", "+44 123 456 7890"),
                        text("email", "Email", "info@agency.com"),
                        text("website", "Website", "https://agency.com"),
                    ],
                    ..leaf("items", FieldKind::Array, "Agencies", "")
                },
            ],
        },
        SectionTemplate {
            key: "faqs",
            label: "FAQs",
            description: "Common questions and answers about fostering in this region. Include regional-specific information.",
            fields: &[
                text("title", TITLE, "Frequently Asked Questions About Fostering in [Region]"),
                textarea("description", DESCRIPTION, "Get answers to common questions about becoming a foster carer in [Region]"),
                FieldTemplate {
                    fields: &[
                        text("question", "Question", "How many foster families are needed in [Region]?"),
                        textarea("answer", "Answer", "[Region] has a continuous need for foster families to provide care for children and young people..."),
                    ],
                    ..leaf("items", FieldKind::Array, "FAQ Items", "")
                },
            ],
        },
        SectionTemplate {
            key: "cta",
            label: "CTA Section",
            description: "Call-to-action section to encourage users to take the next step.",
            fields: &[
                text("title", TITLE, "Ready to Start Your Fostering Journey?"),
                textarea("description", DESCRIPTION, "Take the first step towards making a difference in a child's life in [Region]"),
                FieldTemplate {
                    fields: &[
                        text("text", "Button Text", "Talk to a Foster Advisor"),
                        text("link", "Button Link", "/contact"),
                    ],
                    ..leaf("cta_primary", FieldKind::Object, "Primary CTA", "")
                },
                FieldTemplate {
                    fields: &[
                        text("text", "Button Text", "Download Information Pack"),
                        text("link", "Button Link", "#"),
                    ],
                    ..leaf("cta_secondary", FieldKind::Object, "Secondary CTA", "")
                },
            ],
        },
    ],
};

static CITY: LocationTemplate = LocationTemplate {
    template: "city",
    label: "City Template (e.g. Bath)",
    description: "Template for city-level pages with detailed local information",
    sections: &[
        SectionTemplate {
            key: "hero",
            label: "Hero Section",
            description: "Main hero section with call-to-action buttons. Include heading, subheading, and CTAs.",
            fields: &[
                text("heading", "Heading", "Foster Agencies in [City]"),
                textarea("subheading", "Subheading", "Find accredited foster agencies in [City], [Region]"),
                FieldTemplate {
                    fields: &[
                        text("text", "Button Text", "Talk to a Foster Advisor"),
                        text("link", "Button Link", "/contact"),
                    ],
                    ..leaf("cta_primary", FieldKind::Object, "Primary CTA", "")
                },
                FieldTemplate {
                    fields: &[
                        text("text", "Button Text", "View Agencies"),
                        text("link", "Button Link", "#agencies"),
                    ],
                    ..leaf("cta_secondary", FieldKind::Object, "Secondary CTA", "")
                },
            ],
        },
        SectionTemplate {
            key: "about",
            label: "City Overview Content",
            description: "Introduction to fostering in this city with local information. Include city-specific details.",
            fields: &[
                text("title", TITLE, "About Fostering in [City]"),
                body("Welcome to our directory of foster agencies in [City]. We've compiled a list of accredited and trusted agencies to help you start your fostering journey..."),
            ],
        },
        SectionTemplate {
            key: "types",
            label: "Types of Fostering in City",
            description: "Different types of fostering available in this city. Include descriptions of each type.",
            fields: &[
                text("title", TITLE, "Types of Fostering Available in [City]"),
                textarea("description", DESCRIPTION, "Various fostering opportunities are available to suit different circumstances and preferences"),
                FieldTemplate {
                    fields: &[
                        text("name", "Type Name", "Short-term Fostering"),
                        textarea("description", DESCRIPTION, "Providing temporary care for children while plans are made for their future."),
                    ],
                    ..leaf("items", FieldKind::Array, "Fostering Types", "")
                },
            ],
        },
        SectionTemplate {
            key: "topAgencies",
            label: "Top Agencies in City",
            description: "Featured foster agencies in this city. Include agency names, summaries, and links.",
            fields: &[
                text("title", TITLE, "Top Foster Agencies in [City]"),
                textarea("description", DESCRIPTION, "Connect with trusted fostering services in your local area"),
                FieldTemplate {
                    fields: &[
                        text("name", "Agency Name", "[City] Family Care"),
                        textarea("description", DESCRIPTION, "Leading local foster agency with over 10 years of experience providing quality care and support."),
                        text("link", "Link", "#"),
                        leaf("featured", FieldKind::Boolean, "Featured", "true"),
                        text("type", "Type", "Local Authority"),
                        leaf("rating", FieldKind::Number, "Rating", "4.8"),
                        leaf("reviewCount", FieldKind::Number, "Review Count", "42"),
                        text("phone", "Phone", "+44 123 456 7890"),
                        text("email", "Email", "info@agency.com"),
                        text("website", "Website", "https://agency.com"),
                    ],
                    ..leaf("items", FieldKind::Array, "Agencies", "")
                },
            ],
        },
        SectionTemplate {
            key: "whyFoster",
            label: "Why Foster in City",
            description: "Reasons why people should consider fostering in this city. Include compelling local reasons.",
            fields: &[
                text("title", TITLE, "Why Foster in [City]?"),
                textarea("description", DESCRIPTION, "Make a meaningful difference in the lives of children in your community"),
                FieldTemplate {
                    fields: &[
                        text("text", "Reason", "Community Support"),
                        textarea("description", DESCRIPTION, "Access local support networks and resources specific to [City]"),
                    ],
                    ..leaf("points", FieldKind::Array, "Reasons", "")
                },
            ],
        },
        SectionTemplate {
            key: "allowances",
            label: "Foster Allowances & Support in City",
            description: "Financial allowances and support services available in this city. Include local support details.",
            fields: &[
                text("title", TITLE, "Foster Allowances & Support in [City]"),
                textarea("description", DESCRIPTION, "Comprehensive support system for foster carers in [City]"),
                FieldTemplate {
                    fields: &[
                        text("title", TITLE, "Weekly fostering allowances to cover child care costs"),
                        textarea("description", DESCRIPTION, "Receive weekly fostering allowances to cover the costs of caring for a child."),
                    ],
                    ..leaf("items", FieldKind::Array, "Support Items", "")
                },
            ],
        },
        SectionTemplate {
            key: "resources",
            label: "Local Support & Resources",
            description: "Local resources and organizations that support foster carers. Include links and descriptions.",
            fields: &[
                text("title", TITLE, "Local Support & Resources in [City]"),
                textarea("description", DESCRIPTION, "Access community resources and support networks in [City]"),
                FieldTemplate {
                    fields: &[
                        text("title", TITLE, "[Region] [Local Authority]"),
                        text("link", "Link", "#"),
                        textarea("description", DESCRIPTION, "The local authority provides additional resources and support for foster carers in [City]."),
                    ],
                    ..leaf("items", FieldKind::Array, "Resources", "")
                },
            ],
        },
        SectionTemplate {
            key: "faqs",
            label: "FAQs",
            description: "Common questions and answers about fostering in this city. Include city-specific information.",
            fields: &[
                text("title", TITLE, "FAQs About Fostering in [City]"),
                textarea("description", DESCRIPTION, "Common questions about becoming a foster carer in [City]"),
                FieldTemplate {
                    fields: &[
                        text("question", "Question", "How do I find foster agencies in [City]?"),
                        textarea("answer", "Answer", "There are several ways to find foster agencies in [City]..."),
                    ],
                    ..leaf("items", FieldKind::Array, "FAQ Items", "")
                },
            ],
        },
        SectionTemplate {
            key: "regulated",
            label: "Trust Assurance / Regulation Bar",
            description: "Information about regulation and trust by UK authorities.",
            fields: &[
                text("regulator", "Regulator", "Ofsted"),
                textarea("description", DESCRIPTION, "All agencies meet strict regulatory standards"),
            ],
        },
        SectionTemplate {
            key: "cta",
            label: "Final CTA Section",
            description: "Final call-to-action section to encourage users to take the next step.",
            fields: &[
                text("title", TITLE, "Ready to Start Fostering in [City]?"),
                textarea("description", DESCRIPTION, "Speak with a foster care advisor today to learn more about opportunities in [City]"),
                FieldTemplate {
                    fields: &[
                        text("text", "Button Text", "Talk to a Foster Advisor"),
                        text("link", "Button Link", "/contact"),
                    ],
                    ..leaf("cta_primary", FieldKind::Object, "Primary CTA", "")
                },
                FieldTemplate {
                    fields: &[
                        text("text", "Button Text", "View Agencies in [City]"),
                        text("link", "Button Link", "#agencies"),
                    ],
                    ..leaf("cta_secondary", FieldKind::Object, "Secondary CTA", "")
                },
            ],
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::section::SectionKind;

    #[test]
    fn section_keys_per_level() {
        let keys = |t: LocationType| template_for(t).section_keys().collect::<Vec<_>>();
        assert_eq!(
            keys(LocationType::Country),
            vec![
                "hero", "overview", "agencyFinder", "popularLocations", "topAgencies",
                "fosterSystem", "whyFoster", "faqs", "regulated", "findAgencies"
            ]
        );
        assert_eq!(
            keys(LocationType::Region),
            vec![
                "hero", "about", "benefits", "support", "training", "popularCities",
                "topAgencies", "faqs", "cta"
            ]
        );
        assert_eq!(
            keys(LocationType::City),
            vec![
                "hero", "about", "types", "topAgencies", "whyFoster", "allowances",
                "resources", "faqs", "regulated", "cta"
            ]
        );
    }

    #[test]
    fn every_template_key_is_a_known_section() {
        for location_type in LocationType::ALL {
            for key in template_for(location_type).section_keys() {
                assert!(SectionKind::from_key(key).is_known(), "{key}");
            }
        }
    }

    #[test]
    fn serializes_nested_fields() {
        let hero = template_for(LocationType::City).section("hero").unwrap();
        let value = serde_json::to_value(hero).unwrap();
        assert_eq!(value["fields"][0]["type"], "text");
        assert!(value["fields"][0].get("fields").is_none());
        assert_eq!(value["fields"][2]["type"], "object");
        assert_eq!(value["fields"][2]["fields"][1]["name"], "link");

        let about = template_for(LocationType::Country).section("overview").unwrap();
        assert_eq!(about.fields[1].rows, Some(6));
        assert!(template_for(LocationType::Country).section("about").is_none());
    }
}
