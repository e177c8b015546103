//! Owning catalog with lazy, single-writer index builds
//!
//! Readers receive an `Arc` snapshot of the index. Builds happen under a
//! mutex with double-checked initialization; a rebuild constructs the new
//! index completely before swapping it in, so no reader ever sees a
//! partially populated index.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::catalog::index::{CatalogIndex, IndexStats};
use crate::catalog::source::CatalogSource;
use crate::core::config::{CivilianConfig, EquipConfig};
use crate::items::CatalogFile;
use crate::rules::ItemRules;

/// Outcome of an index build. Never fatal: failed builds leave an empty,
/// usable index behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStatus {
    Built(IndexStats),
    AlreadyInitialized,
    /// The source delivered no items
    EmptySource,
    /// The source could not be read
    SourceUnavailable(String),
}

impl BuildStatus {
    pub fn is_usable(&self) -> bool {
        matches!(self, BuildStatus::Built(_) | BuildStatus::AlreadyInitialized)
    }
}

pub struct ItemCatalog {
    source: Box<dyn CatalogSource>,
    rules: ItemRules,
    civilian: CivilianConfig,
    snapshot: RwLock<Option<Arc<CatalogIndex>>>,
    build_lock: Mutex<()>,
}

impl ItemCatalog {
    pub fn new(source: impl CatalogSource + 'static, config: &EquipConfig) -> Self {
        Self {
            source: Box::new(source),
            rules: ItemRules::new(config),
            civilian: config.civilian.clone(),
            snapshot: RwLock::new(None),
            build_lock: Mutex::new(()),
        }
    }

    pub fn rules(&self) -> &ItemRules {
        &self.rules
    }

    fn current(&self) -> Option<Arc<CatalogIndex>> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn install(&self, index: CatalogIndex) {
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(index));
    }

    pub fn is_initialized(&self) -> bool {
        self.current().is_some()
    }

    /// Build the index if it has not been built yet. A second call is a no-op.
    pub fn initialize(&self) -> BuildStatus {
        if self.is_initialized() {
            return BuildStatus::AlreadyInitialized;
        }
        let _guard = self.build_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if self.is_initialized() {
            return BuildStatus::AlreadyInitialized;
        }
        let (index, status) = self.build_index();
        self.install(index);
        status
    }

    /// Current index, building it on first use
    pub fn index(&self) -> Arc<CatalogIndex> {
        if let Some(index) = self.current() {
            return index;
        }
        self.initialize();
        self.current().unwrap_or_else(|| Arc::new(CatalogIndex::empty()))
    }

    /// Drop the index. The next read rebuilds it.
    pub fn clear(&self) {
        let _guard = self.build_lock.lock().unwrap_or_else(PoisonError::into_inner);
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = None;
        tracing::debug!("Catalog index cleared");
    }

    /// Build a fresh index from the source and swap it in
    pub fn reinitialize(&self) -> BuildStatus {
        let _guard = self.build_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let (index, status) = self.build_index();
        self.install(index);
        status
    }

    fn build_index(&self) -> (CatalogIndex, BuildStatus) {
        let CatalogFile { items, templates } = match self.source.load() {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!("Catalog source unavailable: {}", e);
                return (CatalogIndex::empty(), BuildStatus::SourceUnavailable(e.to_string()));
            }
        };
        if items.is_empty() {
            tracing::warn!("Catalog source returned no items");
            return (CatalogIndex::empty(), BuildStatus::EmptySource);
        }

        let index = CatalogIndex::build(items, &templates, &self.rules, &self.civilian);
        let stats = index.stats().clone();
        tracing::info!(
            "Catalog built: {} items indexed, {} crowns, {} rejected, {} civilian templates",
            stats.indexed,
            stats.crowns,
            stats.rejected_total(),
            stats.civilian_templates
        );
        (index, BuildStatus::Built(stats))
    }
}
