//! Equipment templates
//!
//! Templates are named outfits defined by content (distinct from the battle
//! item catalog). Only civilian templates feed the civilian pools.

use serde::{Deserialize, Serialize};

use crate::core::types::{CultureId, ItemId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentTemplate {
    pub id: String,
    #[serde(default)]
    pub culture: Option<CultureId>,
    #[serde(default)]
    pub civilian: bool,
    #[serde(default)]
    pub noble: bool,
    #[serde(default)]
    pub female: bool,
    /// Items worn by this outfit; the slot follows from each item's category
    #[serde(default)]
    pub items: Vec<ItemId>,
}

impl EquipmentTemplate {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            culture: None,
            civilian: false,
            noble: false,
            female: false,
            items: Vec::new(),
        }
    }

    pub fn civilian(mut self) -> Self {
        self.civilian = true;
        self
    }

    pub fn noble(mut self) -> Self {
        self.noble = true;
        self
    }

    pub fn female(mut self) -> Self {
        self.female = true;
        self
    }

    pub fn with_culture(mut self, culture: impl Into<String>) -> Self {
        self.culture = Some(CultureId::new(culture));
        self
    }

    pub fn with_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items.extend(items.into_iter().map(ItemId::new));
        self
    }
}
