//! Finished equipment sets

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::core::types::ItemId;
use crate::items::{ArmorMaterial, Item, ItemCategory};

/// Named equipment slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EquipmentSlot {
    Weapon0,
    Weapon1,
    Weapon2,
    Weapon3,
    Banner,
    Head,
    Cape,
    Body,
    Gloves,
    Legs,
    Horse,
    Harness,
}

const SLOT_COUNT: usize = 12;

impl EquipmentSlot {
    pub const WEAPONS: [EquipmentSlot; 4] = [
        EquipmentSlot::Weapon0,
        EquipmentSlot::Weapon1,
        EquipmentSlot::Weapon2,
        EquipmentSlot::Weapon3,
    ];

    pub const ARMOR: [EquipmentSlot; 5] = [
        EquipmentSlot::Head,
        EquipmentSlot::Cape,
        EquipmentSlot::Body,
        EquipmentSlot::Gloves,
        EquipmentSlot::Legs,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn is_weapon(self) -> bool {
        Self::WEAPONS.contains(&self)
    }

    /// Armor slot holding items of this category
    pub fn for_armor(category: ItemCategory) -> Option<Self> {
        match category {
            ItemCategory::HeadArmor => Some(EquipmentSlot::Head),
            ItemCategory::Cape => Some(EquipmentSlot::Cape),
            ItemCategory::BodyArmor => Some(EquipmentSlot::Body),
            ItemCategory::HandArmor => Some(EquipmentSlot::Gloves),
            ItemCategory::LegArmor => Some(EquipmentSlot::Legs),
            _ => None,
        }
    }

    /// Item category an armor slot takes
    pub fn armor_category(self) -> Option<ItemCategory> {
        match self {
            EquipmentSlot::Head => Some(ItemCategory::HeadArmor),
            EquipmentSlot::Cape => Some(ItemCategory::Cape),
            EquipmentSlot::Body => Some(ItemCategory::BodyArmor),
            EquipmentSlot::Gloves => Some(ItemCategory::HandArmor),
            EquipmentSlot::Legs => Some(ItemCategory::LegArmor),
            _ => None,
        }
    }
}

/// A guaranteed pairing that even the whole catalog could not satisfy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotDiagnostic {
    /// Polearm equipped without any sidearm to back it
    MissingSidearm { polearm: ItemId },
    /// Horse equipped without a combat harness
    MissingHarness { horse: ItemId },
    /// Ranged weapon removed because no ammunition exists for it
    MissingAmmo { weapon: ItemId, ammo: ItemCategory },
}

impl fmt::Display for SlotDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotDiagnostic::MissingSidearm { polearm } => {
                write!(f, "no sidearm anywhere in the catalog to pair with {}", polearm)
            }
            SlotDiagnostic::MissingHarness { horse } => {
                write!(f, "no combat harness anywhere in the catalog for {}", horse)
            }
            SlotDiagnostic::MissingAmmo { weapon, ammo } => {
                write!(f, "{} dropped, no {} available", weapon, ammo)
            }
        }
    }
}

/// Per-character output. Each slot is empty or holds one shared item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquipmentSet {
    slots: [Option<Arc<Item>>; SLOT_COUNT],
    civilian: bool,
    diagnostics: Vec<SlotDiagnostic>,
}

impl EquipmentSet {
    pub fn battle() -> Self {
        Self::default()
    }

    pub fn civilian() -> Self {
        Self {
            civilian: true,
            ..Self::default()
        }
    }

    pub fn is_civilian(&self) -> bool {
        self.civilian
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&Arc<Item>> {
        self.slots[slot.index()].as_ref()
    }

    pub fn set(&mut self, slot: EquipmentSlot, item: Arc<Item>) {
        self.slots[slot.index()] = Some(item);
    }

    /// Empty the slot, returning what it held
    pub fn take(&mut self, slot: EquipmentSlot) -> Option<Arc<Item>> {
        self.slots[slot.index()].take()
    }

    pub fn is_empty(&self, slot: EquipmentSlot) -> bool {
        self.slots[slot.index()].is_none()
    }

    /// Filled slots in slot order
    pub fn iter(&self) -> impl Iterator<Item = (EquipmentSlot, &Arc<Item>)> + '_ {
        EquipmentSlot::iter().filter_map(move |slot| self.get(slot).map(|item| (slot, item)))
    }

    /// Filled weapon slots in slot order
    pub fn weapons(&self) -> impl Iterator<Item = (EquipmentSlot, &Arc<Item>)> + '_ {
        EquipmentSlot::WEAPONS
            .into_iter()
            .filter_map(move |slot| self.get(slot).map(|item| (slot, item)))
    }

    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn has_weapon(&self, predicate: impl Fn(ItemCategory) -> bool) -> bool {
        self.weapons().any(|(_, item)| predicate(item.category))
    }

    pub fn has_horse(&self) -> bool {
        self.get(EquipmentSlot::Horse).is_some()
    }

    /// First melee weapon in slot order
    pub fn primary_melee(&self) -> Option<&Arc<Item>> {
        self.weapons()
            .map(|(_, item)| item)
            .find(|item| item.category.is_melee())
    }

    /// Body armor is plate at or above the given tier
    pub fn has_plate_body(&self, min_tier: u8) -> bool {
        self.get(EquipmentSlot::Body)
            .is_some_and(|body| body.armor_material() == Some(ArmorMaterial::Plate) && body.tier >= min_tier)
    }

    pub fn diagnostics(&self) -> &[SlotDiagnostic] {
        &self.diagnostics
    }

    pub(crate) fn push_diagnostic(&mut self, diagnostic: SlotDiagnostic) {
        tracing::warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    /// Slot name to item id, for reports
    pub fn summary(&self) -> Vec<(EquipmentSlot, ItemId)> {
        self.iter().map(|(slot, item)| (slot, item.id.clone())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{ArmorStats, WeaponStats};

    fn item(id: &str, category: ItemCategory) -> Arc<Item> {
        Arc::new(Item::new(id, id, category, 3).with_weapon(WeaponStats::melee(10, 10)))
    }

    #[test]
    fn test_slot_round_trip() {
        let mut set = EquipmentSet::battle();
        assert_eq!(set.filled(), 0);
        set.set(EquipmentSlot::Weapon2, item("spear", ItemCategory::TwoHandedPolearm));
        assert!(set.is_empty(EquipmentSlot::Weapon0));
        assert_eq!(set.get(EquipmentSlot::Weapon2).map(|i| i.id.as_str()), Some("spear"));
        assert_eq!(set.take(EquipmentSlot::Weapon2).map(|i| i.id.clone()), Some(ItemId::new("spear")));
        assert_eq!(set.filled(), 0);
    }

    #[test]
    fn test_primary_melee_skips_ranged() {
        let mut set = EquipmentSet::battle();
        set.set(EquipmentSlot::Weapon0, item("bow", ItemCategory::Bow));
        set.set(EquipmentSlot::Weapon1, item("arrows", ItemCategory::Arrows));
        set.set(EquipmentSlot::Weapon2, item("mace", ItemCategory::OneHandedMace));
        assert_eq!(set.primary_melee().map(|i| i.id.as_str()), Some("mace"));
        assert!(set.has_weapon(ItemCategory::is_ranged));
        assert!(!set.has_weapon(ItemCategory::is_shield));
    }

    #[test]
    fn test_armor_slot_mapping() {
        for slot in EquipmentSlot::ARMOR {
            let category = slot.armor_category().unwrap();
            assert_eq!(EquipmentSlot::for_armor(category), Some(slot));
            assert!(!slot.is_weapon());
        }
        assert!(EquipmentSlot::WEAPONS.iter().all(|slot| slot.is_weapon()));
        assert_eq!(EquipmentSlot::for_armor(ItemCategory::Horse), None);
    }

    #[test]
    fn test_plate_body() {
        let mut set = EquipmentSet::battle();
        let plate = Item::new("plate", "Plate", ItemCategory::BodyArmor, 6)
            .with_armor(ArmorStats::new(ArmorMaterial::Plate).body(50));
        set.set(EquipmentSlot::Body, Arc::new(plate));
        assert!(set.has_plate_body(5));
        assert!(!set.has_plate_body(7));
    }

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = SlotDiagnostic::MissingAmmo {
            weapon: ItemId::new("longbow"),
            ammo: ItemCategory::Arrows,
        };
        assert_eq!(diagnostic.to_string(), "longbow dropped, no arrows available");
    }
}
