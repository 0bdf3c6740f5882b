pub mod arena;
pub mod model;
pub mod path;
pub mod tree;
