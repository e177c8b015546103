//! Item rules: validity, gender, crowns, cloth, appearance, mount compatibility
//!
//! `ItemRules` is an immutable view of the configured keyword lists. Every
//! check it offers is a pure function of the item and its arguments.

pub mod mount;
pub mod validation;

use ahash::{AHashMap, AHashSet};

use crate::core::config::{AppearanceThresholds, EquipConfig};
use crate::core::types::{Gender, ItemId};

pub use mount::{is_braceable_polearm, is_couchable_polearm, is_weapon_usable_on_mount};
pub use validation::{
    has_functional_stats, passes_appearance, tier_range_for_level, AppearanceContext, Rejection, TierBand,
};

/// Configured classification rules
#[derive(Debug, Clone)]
pub struct ItemRules {
    blacklisted_names: Vec<String>,
    blacklisted_keywords: Vec<String>,
    placeholder_prefixes: Vec<String>,
    denylisted_ids: AHashSet<ItemId>,
    female_keywords: Vec<String>,
    gender_exceptions: AHashMap<ItemId, Gender>,
    crown_keywords: Vec<String>,
    crown_ids: AHashSet<ItemId>,
    crown_exception: ItemId,
    crown_exception_gender: Gender,
    pack_keywords: Vec<String>,
    cloth_level_threshold: u32,
    appearance: AppearanceThresholds,
}

fn lowercase_all(values: &[String]) -> Vec<String> {
    values.iter().map(|v| v.to_lowercase()).collect()
}

impl ItemRules {
    pub fn new(config: &EquipConfig) -> Self {
        Self {
            blacklisted_names: lowercase_all(&config.validation.blacklisted_names),
            blacklisted_keywords: lowercase_all(&config.validation.blacklisted_keywords),
            placeholder_prefixes: lowercase_all(&config.validation.placeholder_prefixes),
            denylisted_ids: config.validation.denylisted_ids.iter().cloned().collect(),
            female_keywords: lowercase_all(&config.gender.female_keywords),
            gender_exceptions: config
                .gender
                .exceptions
                .iter()
                .map(|e| (e.item.clone(), e.gender))
                .collect(),
            crown_keywords: lowercase_all(&config.crowns.keywords),
            crown_ids: config.crowns.explicit_ids.iter().cloned().collect(),
            crown_exception: config.crowns.exception_item.clone(),
            crown_exception_gender: config.crowns.exception_gender,
            pack_keywords: lowercase_all(&config.mounts.pack_keywords),
            cloth_level_threshold: config.assembly.cloth_level_threshold,
            appearance: config.appearance,
        }
    }

    pub fn appearance_threshold(&self, context: AppearanceContext) -> f32 {
        context.threshold(&self.appearance)
    }
}

impl Default for ItemRules {
    fn default() -> Self {
        Self::new(&EquipConfig::default())
    }
}
