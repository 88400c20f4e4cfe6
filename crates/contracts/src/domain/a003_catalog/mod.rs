pub mod fixtures;
pub mod gallery;
pub mod search;
pub mod store;

pub use fixtures::fixture_catalog;
pub use gallery::{EmptyContext, GalleryState, ProductCard, ViewSelection};
pub use search::{filter, normalize_query, Searchable};
pub use store::{CatalogEntry, CatalogStore, Shelf};
