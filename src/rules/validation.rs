//! Item classification predicates
//!
//! Stateless checks applied at catalog build time and during slot filling:
//! validity, gender suitability, tier bands, cloth exclusion, crowns and
//! appearance thresholds.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::core::config::AppearanceThresholds;
use crate::core::types::{Gender, Tier};
use crate::items::{ArmorMaterial, Item, ItemCategory};
use crate::rules::ItemRules;

/// Why an item was refused entry into the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Rejection {
    /// No stats that make it functional for its category
    NoFunctionalStats,
    BlacklistedName,
    BlacklistedKeyword,
    PlaceholderId,
    DenylistedId,
}

/// Does the item carry non-zero stats appropriate to its category?
pub fn has_functional_stats(item: &Item) -> bool {
    let category = item.category;
    if category.is_weapon_slot_item() {
        let Some(weapon) = &item.weapon else {
            return false;
        };
        return if category.is_ammo() {
            weapon.stack_size > 0
        } else if category.is_shield() {
            weapon.hit_points > 0
        } else if category.is_ranged() || category.is_throwing() {
            weapon.missile_damage > 0
        } else {
            weapon.swing_damage > 0 || weapon.thrust_damage > 0
        };
    }

    match category {
        ItemCategory::Horse => item.horse.as_ref().is_some_and(|h| h.speed > 0),
        ItemCategory::Banner => item.banner.is_some(),
        // Armor pieces and harnesses
        _ => item.armor.as_ref().is_some_and(|a| a.total() > 0),
    }
}

impl ItemRules {
    /// Reason the item fails validity, or None if it may enter the catalog
    pub fn rejection(&self, item: &Item) -> Option<Rejection> {
        if self.denylisted_ids.contains(&item.id) {
            return Some(Rejection::DenylistedId);
        }
        let id = item.id.as_str().to_lowercase();
        if self.placeholder_prefixes.iter().any(|p| id.starts_with(p.as_str())) {
            return Some(Rejection::PlaceholderId);
        }
        let name = item.name.to_lowercase();
        if self.blacklisted_names.iter().any(|n| *n == name) {
            return Some(Rejection::BlacklistedName);
        }
        if self.blacklisted_keywords.iter().any(|k| item.mentions(k)) {
            return Some(Rejection::BlacklistedKeyword);
        }
        if !has_functional_stats(item) {
            return Some(Rejection::NoFunctionalStats);
        }
        None
    }

    pub fn is_valid(&self, item: &Item) -> bool {
        self.rejection(item).is_none()
    }

    /// Gender suitability. The exception list wins, then explicit item data,
    /// then female-marking keywords (which only restrict male loadouts).
    pub fn is_gender_suitable(&self, item: &Item, gender: Gender) -> bool {
        if let Some(restricted) = self.gender_exceptions.get(&item.id) {
            return *restricted == gender;
        }
        if let Some(restricted) = item.gender {
            return restricted == gender;
        }
        match gender {
            Gender::Female => true,
            Gender::Male => !self.female_keywords.iter().any(|k| item.mentions(k)),
        }
    }

    pub fn is_crown(&self, item: &Item) -> bool {
        item.category == ItemCategory::HeadArmor
            && (self.crown_ids.contains(&item.id) || self.crown_keywords.iter().any(|k| item.mentions(k)))
    }

    /// Crown meant for the battlefield ("battle crown", "crowned helmet")
    pub fn is_battle_crown(&self, item: &Item) -> bool {
        self.is_crown(item) && (item.mentions("battle") || item.mentions("helmet"))
    }

    /// Crown meant for court: neither battle gear nor any kind of helm
    pub fn is_civilian_crown(&self, item: &Item) -> bool {
        self.is_crown(item) && !item.mentions("battle") && !item.mentions("helm")
    }

    pub fn is_crown_exception(&self, item: &Item) -> bool {
        item.id == self.crown_exception
    }

    /// May this crown appear in a battle set for a character of this gender?
    pub fn crown_allowed_in_battle(&self, item: &Item, gender: Gender) -> bool {
        if self.is_crown_exception(item) {
            return gender == self.crown_exception_gender;
        }
        self.is_battle_crown(item) && self.is_gender_suitable(item, gender)
    }

    /// May this crown appear in a civilian set for a character of this gender?
    pub fn crown_allowed_in_civilian(&self, item: &Item, gender: Gender) -> bool {
        if self.is_crown_exception(item) {
            return gender == self.crown_exception_gender;
        }
        self.is_civilian_crown(item) && self.is_gender_suitable(item, gender)
    }

    /// Cloth armor is allowed for low-level characters and always for capes
    pub fn cloth_permitted(&self, item: &Item, level: u32) -> bool {
        if item.armor_material() != Some(ArmorMaterial::Cloth) {
            return true;
        }
        item.category == ItemCategory::Cape || level < self.cloth_level_threshold
    }
}

/// Which appearance threshold applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppearanceContext {
    Civilian,
    RoyalCivilian,
    Battle,
}

impl AppearanceContext {
    pub fn threshold(self, thresholds: &AppearanceThresholds) -> f32 {
        match self {
            AppearanceContext::Civilian => thresholds.civilian,
            AppearanceContext::RoyalCivilian => thresholds.royal_civilian,
            AppearanceContext::Battle => thresholds.battle,
        }
    }
}

/// Thresholds are exclusive lower bounds
pub fn passes_appearance(item: &Item, threshold: f32) -> bool {
    item.appearance > threshold
}

/// Level bands mapping character level to an item tier range
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum TierBand {
    Basic,
    Standard,
    Veteran,
    Elite,
    Legendary,
}

/// (band, highest level in band, min tier, max tier)
const TIER_TABLE: [(TierBand, u32, Tier, Tier); 5] = [
    (TierBand::Basic, 5, 1, 2),
    (TierBand::Standard, 10, 2, 3),
    (TierBand::Veteran, 15, 3, 4),
    (TierBand::Elite, 20, 4, 5),
    (TierBand::Legendary, u32::MAX, 5, 6),
];

impl TierBand {
    pub fn for_level(level: u32) -> Self {
        TIER_TABLE
            .iter()
            .find(|(_, max_level, _, _)| level <= *max_level)
            .map(|(band, _, _, _)| *band)
            .unwrap_or(TierBand::Legendary)
    }

    /// Inclusive tier range for this band
    pub fn tier_range(self) -> (Tier, Tier) {
        TIER_TABLE
            .iter()
            .find(|(band, _, _, _)| *band == self)
            .map(|(_, _, min, max)| (*min, *max))
            .unwrap_or((5, 6))
    }
}

/// Inclusive tier range for a character level
pub fn tier_range_for_level(level: u32) -> (Tier, Tier) {
    TierBand::for_level(level).tier_range()
}
