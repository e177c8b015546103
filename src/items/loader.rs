//! Load item catalogs from TOML files
//!
//! A catalog file holds `[[item]]` and `[[template]]` tables:
//!
//! ```toml
//! [[item]]
//! id = "sturgian_fighting_axe"
//! name = "Sturgian Fighting Axe"
//! category = "one_handed_axe"
//! tier = 3
//! culture = "sturgia"
//! weapon = { swing_damage = 82 }
//!
//! [[template]]
//! id = "sturgian_noble_civilian"
//! civilian = true
//! noble = true
//! items = ["fur_coat", "leather_boots"]
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{LoadoutError, Result};
use crate::items::item::Item;
use crate::items::template::EquipmentTemplate;

/// Parsed contents of a catalog file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default, rename = "item")]
    pub items: Vec<Item>,
    #[serde(default, rename = "template")]
    pub templates: Vec<EquipmentTemplate>,
}

/// Parse catalog TOML text
pub fn parse_catalog_toml(content: &str) -> Result<CatalogFile> {
    let mut file: CatalogFile = toml::from_str(content)?;
    file.items = file.items.into_iter().map(Item::indexed).collect();
    Ok(file)
}

/// Load a catalog file from disk
pub fn load_catalog_file(path: &Path) -> Result<CatalogFile> {
    let content = fs::read_to_string(path)
        .map_err(|e| LoadoutError::CatalogLoad(format!("Failed to read {}: {}", path.display(), e)))?;
    parse_catalog_toml(&content)
}
