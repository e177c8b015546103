//! Formation classification
//!
//! A finished battle set and the wearer's skills decide which combat role
//! the character falls into. Classification looks only at what was actually
//! equipped: a high bow skill means nothing without a bow in a weapon slot.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::assembly::EquipmentSet;
use crate::character::{CharacterProfile, Skill};
use crate::core::types::Tier;
use crate::rules::is_couchable_polearm;

/// Body armor at or above this tier, made of plate, marks a heavy unit
pub const HEAVY_PLATE_TIER: Tier = 5;

/// Coarse combat role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FormationCategory {
    Infantry,
    HeavyInfantry,
    Ranged,
    Cavalry,
    HeavyCavalry,
    HorseArcher,
    Skirmisher,
    General,
}

impl FormationCategory {
    pub fn is_mounted(self) -> bool {
        matches!(
            self,
            FormationCategory::Cavalry | FormationCategory::HeavyCavalry | FormationCategory::HorseArcher
        )
    }
}

/// Highest skill backed by an equipped weapon. Ties keep the earlier skill
/// in weapon-skill order, so melee wins over ranged on equal values.
pub fn best_equipped_skill(set: &EquipmentSet, profile: &CharacterProfile) -> Option<Skill> {
    let mut best: Option<(Skill, u32)> = None;
    for skill in Skill::WEAPON_SKILLS {
        let equipped = set
            .weapons()
            .any(|(_, item)| Skill::for_category(item.category) == Some(skill));
        if !equipped {
            continue;
        }
        let value = profile.skills.get(skill);
        if best.map_or(true, |(_, top)| value > top) {
            best = Some((skill, value));
        }
    }
    best.map(|(skill, _)| skill)
}

pub fn formation_category(set: &EquipmentSet, profile: &CharacterProfile) -> FormationCategory {
    let mounted = set.has_horse();
    let heavy = set.has_plate_body(HEAVY_PLATE_TIER);
    let ranged_skill = best_equipped_skill(set, profile).is_some_and(Skill::is_ranged);
    let throwing_slots = set.weapons().filter(|(_, item)| item.category.is_throwing()).count();

    if throwing_slots >= 2 && !heavy && !mounted {
        return FormationCategory::Skirmisher;
    }
    if mounted {
        if ranged_skill {
            return FormationCategory::HorseArcher;
        }
        let couched = set.weapons().any(|(_, item)| is_couchable_polearm(item));
        return if couched && heavy {
            FormationCategory::HeavyCavalry
        } else {
            FormationCategory::Cavalry
        };
    }
    if ranged_skill {
        return FormationCategory::Ranged;
    }
    if set.primary_melee().is_some() {
        return if heavy {
            FormationCategory::HeavyInfantry
        } else {
            FormationCategory::Infantry
        };
    }
    FormationCategory::General
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::EquipmentSlot;
    use crate::core::types::Gender;
    use crate::items::{ArmorMaterial, ArmorStats, HorseStats, Item, ItemCategory, WeaponStats, WeaponTrait};
    use std::sync::Arc;

    fn weapon(id: &str, category: ItemCategory) -> Arc<Item> {
        Arc::new(Item::new(id, id, category, 4).with_weapon(WeaponStats::melee(50, 50)))
    }

    fn body(material: ArmorMaterial, tier: Tier) -> Arc<Item> {
        Arc::new(Item::new("cuirass", "Cuirass", ItemCategory::BodyArmor, tier).with_armor(ArmorStats::new(material).body(40)))
    }

    fn horse() -> Arc<Item> {
        Arc::new(Item::new("destrier", "Destrier", ItemCategory::Horse, 5).with_horse(HorseStats {
            speed: 40,
            maneuver: 35,
            charge: 60,
        }))
    }

    fn lance() -> Arc<Item> {
        Arc::new(
            Item::new("lance", "Lance", ItemCategory::OneHandedPolearm, 5)
                .with_weapon(WeaponStats::melee(0, 90).with_trait(WeaponTrait::CanCouch)),
        )
    }

    fn profile() -> CharacterProfile {
        CharacterProfile::new("Soldier", 20, "vlandia", Gender::Male)
    }

    #[test]
    fn test_heavy_cavalry() {
        let mut set = EquipmentSet::battle();
        set.set(EquipmentSlot::Weapon0, lance());
        set.set(EquipmentSlot::Weapon1, weapon("sword", ItemCategory::OneHandedSword));
        set.set(EquipmentSlot::Body, body(ArmorMaterial::Plate, 6));
        set.set(EquipmentSlot::Horse, horse());
        assert_eq!(formation_category(&set, &profile()), FormationCategory::HeavyCavalry);

        set.set(EquipmentSlot::Body, body(ArmorMaterial::Chainmail, 6));
        assert_eq!(formation_category(&set, &profile()), FormationCategory::Cavalry);
    }

    #[test]
    fn test_skill_without_weapon_is_ignored() {
        let archer_at_heart = profile().with_skill(Skill::Bow, 200).with_skill(Skill::OneHanded, 10);
        let mut set = EquipmentSet::battle();
        set.set(EquipmentSlot::Weapon0, weapon("sword", ItemCategory::OneHandedSword));
        assert_eq!(best_equipped_skill(&set, &archer_at_heart), Some(Skill::OneHanded));
        assert_eq!(formation_category(&set, &archer_at_heart), FormationCategory::Infantry);
    }

    #[test]
    fn test_ranged_and_horse_archer() {
        let archer = profile().with_skill(Skill::Bow, 120).with_skill(Skill::OneHanded, 40);
        let mut set = EquipmentSet::battle();
        set.set(EquipmentSlot::Weapon0, weapon("bow", ItemCategory::Bow));
        set.set(EquipmentSlot::Weapon1, weapon("arrows", ItemCategory::Arrows));
        set.set(EquipmentSlot::Weapon2, weapon("sword", ItemCategory::OneHandedSword));
        assert_eq!(formation_category(&set, &archer), FormationCategory::Ranged);

        set.set(EquipmentSlot::Horse, horse());
        let category = formation_category(&set, &archer);
        assert_eq!(category, FormationCategory::HorseArcher);
        assert!(category.is_mounted());
    }

    #[test]
    fn test_equal_skills_favor_melee() {
        let even = profile().with_skill(Skill::Bow, 80).with_skill(Skill::OneHanded, 80);
        let mut set = EquipmentSet::battle();
        set.set(EquipmentSlot::Weapon0, weapon("sword", ItemCategory::OneHandedSword));
        set.set(EquipmentSlot::Weapon1, weapon("bow", ItemCategory::Bow));
        set.set(EquipmentSlot::Weapon2, weapon("arrows", ItemCategory::Arrows));
        assert_eq!(formation_category(&set, &even), FormationCategory::Infantry);
    }

    #[test]
    fn test_skirmisher_needs_light_armor_on_foot() {
        let mut set = EquipmentSet::battle();
        set.set(EquipmentSlot::Weapon0, weapon("spear", ItemCategory::OneHandedPolearm));
        set.set(EquipmentSlot::Weapon1, weapon("sword", ItemCategory::OneHandedSword));
        let javelins = weapon("javelins", ItemCategory::Javelin);
        set.set(EquipmentSlot::Weapon2, Arc::clone(&javelins));
        set.set(EquipmentSlot::Weapon3, javelins);
        assert_eq!(formation_category(&set, &profile()), FormationCategory::Skirmisher);

        set.set(EquipmentSlot::Body, body(ArmorMaterial::Plate, 5));
        assert_eq!(formation_category(&set, &profile()), FormationCategory::HeavyInfantry);
    }

    #[test]
    fn test_empty_set_is_general() {
        assert_eq!(formation_category(&EquipmentSet::battle(), &profile()), FormationCategory::General);
    }
}
