//! Location page content: lookup, normalization, templates and defaults.

pub mod defaults;
pub mod lookup;
pub mod model;
pub mod normalize;
pub mod page;
pub mod schema;
pub mod section;

pub use defaults::{default_content, ContentSeed};
pub use lookup::{
    find_content_by_canonical_slug, get_location_content_by_canonical_slug,
    get_location_content_by_slug,
};
pub use model::{decode_content_json, LocationContent};
pub use normalize::{normalize_location, NormalizedContent};
pub use page::{resolve_page, ContentSource, ResolvedPage};
pub use schema::{template_for, FieldKind, FieldTemplate, LocationTemplate, SectionTemplate};
pub use section::{Section, SectionKind};
