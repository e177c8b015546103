//! Item catalog index
//!
//! Built once from a raw item source, read many times by the selector.

pub mod civilian;
pub mod index;
pub mod source;
pub mod store;

pub use civilian::{CivilianPools, CivilianRank};
pub use index::{CatalogIndex, IndexStats, Partition};
pub use source::{CatalogSource, StaticCatalogSource, TomlCatalogSource};
pub use store::{BuildStatus, ItemCatalog};
