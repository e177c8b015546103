//! Consistency checks over a finished equipment set
//!
//! The assembler upholds these by construction; the checker exists so tests
//! and hosts can verify sets they did not build themselves.

use serde::Serialize;
use thiserror::Error;

use crate::assembly::equipment_set::{EquipmentSet, EquipmentSlot};
use crate::character::CharacterProfile;
use crate::core::types::ItemId;
use crate::items::ItemCategory;
use crate::rules::ItemRules;

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InvariantViolation {
    #[error("{item} cannot be the primary weapon")]
    ForbiddenInPrimarySlot { item: ItemId },

    #[error("polearm {polearm} has no one-handed sidearm")]
    UnpairedPolearm { polearm: ItemId },

    #[error("{weapon} has no {ammo}")]
    MissingAmmo { weapon: ItemId, ammo: ItemCategory },

    #[error("{ammo} carried without a weapon to shoot it")]
    OrphanedAmmo { ammo: ItemId },

    #[error("throwing slots hold different items: {first} and {second}")]
    MismatchedThrowing { first: ItemId, second: ItemId },

    #[error("shield {shield} carried with two-handed {weapon}")]
    ShieldWithTwoHanded { shield: ItemId, weapon: ItemId },

    #[error("horse {horse} has no combat harness")]
    HorseWithoutHarness { horse: ItemId },

    #[error("{harness} is pack animal gear")]
    PackHarness { harness: ItemId },

    #[error("{crown} is not permitted here")]
    CrownNotPermitted { crown: ItemId },
}

impl EquipmentSet {
    /// Every breach of the slot-composition rules, in slot order
    pub fn invariant_violations(&self, rules: &ItemRules) -> Vec<InvariantViolation> {
        let mut violations = Vec::new();

        if let Some(primary) = self.get(EquipmentSlot::Weapon0) {
            let category = primary.category;
            if category.is_throwing() || category.is_shield() || category.is_ammo() {
                violations.push(InvariantViolation::ForbiddenInPrimarySlot {
                    item: primary.id.clone(),
                });
            }
        }

        let has_sidearm = self.has_weapon(ItemCategory::is_sidearm);
        for (_, item) in self.weapons().filter(|(_, item)| item.category.is_polearm()) {
            if !has_sidearm {
                violations.push(InvariantViolation::UnpairedPolearm { polearm: item.id.clone() });
            }
        }

        for (_, item) in self.weapons() {
            if let Some(ammo) = item.category.ammo_for() {
                if !self.has_weapon(|category| category == ammo) {
                    violations.push(InvariantViolation::MissingAmmo {
                        weapon: item.id.clone(),
                        ammo,
                    });
                }
            }
        }
        for (_, item) in self.weapons().filter(|(_, item)| item.category.is_ammo()) {
            let fed = self.has_weapon(|category| category.ammo_for() == Some(item.category));
            if !fed {
                violations.push(InvariantViolation::OrphanedAmmo { ammo: item.id.clone() });
            }
        }

        let throwing: Vec<_> = self
            .weapons()
            .filter(|(_, item)| item.category.is_throwing())
            .map(|(_, item)| item)
            .collect();
        if let [first, second, ..] = throwing.as_slice() {
            if first.id != second.id {
                violations.push(InvariantViolation::MismatchedThrowing {
                    first: first.id.clone(),
                    second: second.id.clone(),
                });
            }
        }

        if let Some((_, shield)) = self.weapons().find(|(_, item)| item.category.is_shield()) {
            if let Some(primary) = self.primary_melee() {
                if primary.category.is_two_handed_melee() {
                    violations.push(InvariantViolation::ShieldWithTwoHanded {
                        shield: shield.id.clone(),
                        weapon: primary.id.clone(),
                    });
                }
            }
        }

        match (self.get(EquipmentSlot::Horse), self.get(EquipmentSlot::Harness)) {
            (Some(horse), None) => violations.push(InvariantViolation::HorseWithoutHarness {
                horse: horse.id.clone(),
            }),
            (_, Some(harness)) if !rules.is_combat_harness(harness) => {
                violations.push(InvariantViolation::PackHarness {
                    harness: harness.id.clone(),
                })
            }
            _ => {}
        }

        violations
    }

    /// A crown on the head slot must suit the wearer and the kind of set
    pub fn crown_violation(&self, profile: &CharacterProfile, rules: &ItemRules) -> Option<InvariantViolation> {
        let head = self.get(EquipmentSlot::Head)?;
        if !rules.is_crown(head) {
            return None;
        }
        let allowed = profile.is_ruling_faction_member()
            && if self.is_civilian() {
                rules.crown_allowed_in_civilian(head, profile.gender)
            } else {
                rules.crown_allowed_in_battle(head, profile.gender)
            };
        if allowed {
            None
        } else {
            Some(InvariantViolation::CrownNotPermitted { crown: head.id.clone() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::EquipConfig;
    use crate::core::types::Gender;
    use crate::items::{ArmorMaterial, ArmorStats, HorseStats, Item, WeaponStats};
    use std::sync::Arc;

    fn rules() -> ItemRules {
        ItemRules::new(&EquipConfig::default())
    }

    fn weapon(id: &str, category: ItemCategory) -> Arc<Item> {
        Arc::new(Item::new(id, id, category, 3).with_weapon(WeaponStats::melee(40, 40)))
    }

    fn head(id: &str) -> Arc<Item> {
        Arc::new(Item::new(id, id, ItemCategory::HeadArmor, 5).with_armor(ArmorStats::new(ArmorMaterial::Plate).head(30)))
    }

    #[test]
    fn test_well_formed_set_is_clean() {
        let mut set = EquipmentSet::battle();
        set.set(EquipmentSlot::Weapon0, weapon("spear", ItemCategory::OneHandedPolearm));
        set.set(EquipmentSlot::Weapon1, weapon("shield", ItemCategory::Shield));
        set.set(EquipmentSlot::Weapon2, weapon("javelin", ItemCategory::Javelin));
        set.set(EquipmentSlot::Weapon3, weapon("sword", ItemCategory::OneHandedSword));
        assert!(set.invariant_violations(&rules()).is_empty());
    }

    #[test]
    fn test_primary_slot_restrictions() {
        for category in [ItemCategory::Javelin, ItemCategory::Shield, ItemCategory::Arrows] {
            let mut set = EquipmentSet::battle();
            set.set(EquipmentSlot::Weapon0, weapon("odd", category));
            assert!(set
                .invariant_violations(&rules())
                .contains(&InvariantViolation::ForbiddenInPrimarySlot { item: ItemId::new("odd") }));
        }
    }

    #[test]
    fn test_unpaired_polearm() {
        let mut set = EquipmentSet::battle();
        set.set(EquipmentSlot::Weapon0, weapon("pike", ItemCategory::TwoHandedPolearm));
        assert_eq!(
            set.invariant_violations(&rules()),
            vec![InvariantViolation::UnpairedPolearm { polearm: ItemId::new("pike") }]
        );
    }

    #[test]
    fn test_ammo_pairing_both_ways() {
        let mut set = EquipmentSet::battle();
        set.set(EquipmentSlot::Weapon0, weapon("crossbow", ItemCategory::Crossbow));
        set.set(EquipmentSlot::Weapon1, weapon("arrows", ItemCategory::Arrows));
        let violations = set.invariant_violations(&rules());
        assert!(violations.contains(&InvariantViolation::MissingAmmo {
            weapon: ItemId::new("crossbow"),
            ammo: ItemCategory::Bolts,
        }));
        assert!(violations.contains(&InvariantViolation::OrphanedAmmo { ammo: ItemId::new("arrows") }));
    }

    #[test]
    fn test_mismatched_throwing() {
        let mut set = EquipmentSet::battle();
        set.set(EquipmentSlot::Weapon0, weapon("sword", ItemCategory::OneHandedSword));
        set.set(EquipmentSlot::Weapon2, weapon("javelin", ItemCategory::Javelin));
        set.set(EquipmentSlot::Weapon3, weapon("axe", ItemCategory::ThrowingAxe));
        assert!(matches!(
            set.invariant_violations(&rules()).as_slice(),
            [InvariantViolation::MismatchedThrowing { .. }]
        ));
    }

    #[test]
    fn test_shield_with_two_handed_primary() {
        let mut set = EquipmentSet::battle();
        set.set(EquipmentSlot::Weapon0, weapon("greatsword", ItemCategory::TwoHandedSword));
        set.set(EquipmentSlot::Weapon1, weapon("shield", ItemCategory::Shield));
        assert!(matches!(
            set.invariant_violations(&rules()).as_slice(),
            [InvariantViolation::ShieldWithTwoHanded { .. }]
        ));
    }

    #[test]
    fn test_horse_needs_combat_harness() {
        let horse = Arc::new(Item::new("courser", "Courser", ItemCategory::Horse, 4).with_horse(HorseStats {
            speed: 50,
            maneuver: 50,
            charge: 20,
        }));
        let mut set = EquipmentSet::battle();
        set.set(EquipmentSlot::Horse, Arc::clone(&horse));
        assert!(matches!(
            set.invariant_violations(&rules()).as_slice(),
            [InvariantViolation::HorseWithoutHarness { .. }]
        ));

        let saddle = Item::new("pack_saddle", "Pack Saddle", ItemCategory::HorseHarness, 1)
            .with_armor(ArmorStats::new(ArmorMaterial::Leather).body(3));
        set.set(EquipmentSlot::Harness, Arc::new(saddle));
        assert!(matches!(
            set.invariant_violations(&rules()).as_slice(),
            [InvariantViolation::PackHarness { .. }]
        ));
    }

    #[test]
    fn test_crown_rules() {
        let rules = rules();
        let king = CharacterProfile::new("King", 25, "vlandia", Gender::Male).ruling();
        let knight = CharacterProfile::new("Knight", 25, "vlandia", Gender::Male);

        let mut battle = EquipmentSet::battle();
        battle.set(EquipmentSlot::Head, head("vlandian_battle_crown"));
        assert_eq!(battle.crown_violation(&king, &rules), None);
        assert!(battle.crown_violation(&knight, &rules).is_some());

        battle.set(EquipmentSlot::Head, head("vlandian_court_crown"));
        assert!(battle.crown_violation(&king, &rules).is_some());

        let mut court = EquipmentSet::civilian();
        court.set(EquipmentSlot::Head, head("vlandian_court_crown"));
        assert_eq!(court.crown_violation(&king, &rules), None);

        battle.set(EquipmentSlot::Head, head("vlandian_helm"));
        assert_eq!(battle.crown_violation(&knight, &rules), None);
    }
}
