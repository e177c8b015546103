//! Raw item and template sources

use std::path::PathBuf;

use crate::core::error::Result;
use crate::items::{load_catalog_file, CatalogFile, EquipmentTemplate, Item};

/// Supplier of raw catalog content
///
/// `load` is called exactly once per index build, so items and templates
/// always come from the same read.
pub trait CatalogSource: Send + Sync {
    fn load(&self) -> Result<CatalogFile>;
}

/// In-memory catalog content
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogSource {
    pub items: Vec<Item>,
    pub templates: Vec<EquipmentTemplate>,
}

impl StaticCatalogSource {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items,
            templates: Vec::new(),
        }
    }

    pub fn with_templates(mut self, templates: Vec<EquipmentTemplate>) -> Self {
        self.templates = templates;
        self
    }
}

impl CatalogSource for StaticCatalogSource {
    fn load(&self) -> Result<CatalogFile> {
        Ok(CatalogFile {
            items: self.items.clone(),
            templates: self.templates.clone(),
        })
    }
}

/// Catalog content read from a TOML file on every build
#[derive(Debug, Clone)]
pub struct TomlCatalogSource {
    path: PathBuf,
}

impl TomlCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for TomlCatalogSource {
    fn load(&self) -> Result<CatalogFile> {
        load_catalog_file(&self.path)
    }
}
