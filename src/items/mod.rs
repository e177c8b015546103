//! Item catalog records and templates

pub mod item;
pub mod loader;
pub mod template;

pub use item::{
    ArmorMaterial, ArmorStats, BannerStats, BannerTheme, HorseStats, Item, ItemCategory, WeaponStats,
    WeaponTrait,
};
pub use loader::{load_catalog_file, parse_catalog_toml, CatalogFile};
pub use template::EquipmentTemplate;
