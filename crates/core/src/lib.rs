//! Location hierarchy and content layer for the foster agency directory.
//!
//! Locations form a three-level hierarchy (country, region, city). Each node
//! is addressed publicly by a canonical slug such as
//! `/foster-agency/england/greater-london/london`, and owns at most one
//! content record holding its editable marketing copy.

pub mod canonical;
pub mod content;
pub mod events;
pub mod location;
pub mod slug;
pub mod store;

pub use location::model::{LocationRecord, LocationType, TreeNode};
pub use location::tree::get_location_tree;
pub use store::{ContentStore, DirectoryStore, LocationStore, StoreError};
pub use canonical::{
    backfill_canonical_slugs, build_canonical_slug, recompute_subtree, update_canonical_slug,
    CanonicalSlugError, SlugUpdate,
};
pub use content::{
    default_content, get_location_content_by_canonical_slug, get_location_content_by_slug,
    normalize_location, resolve_page,
};
pub use events::{DirectoryEvent, EventBus};
pub use slug::slugify;
