//! Weapon loadout planning
//!
//! Turns a mask of allowed weapon categories into one of five legal slot
//! layouts. The planner never looks at the catalog; whether the planned
//! items exist is the slot filler's problem.

use crate::character::{CharacterProfile, Skill};
use crate::items::ItemCategory;
use crate::loadout::mask::WeaponMask;

const TWO_HANDED_PRIORITY: [ItemCategory; 3] = [
    ItemCategory::TwoHandedSword,
    ItemCategory::TwoHandedAxe,
    ItemCategory::TwoHandedMace,
];

const POLEARM_PRIORITY: [ItemCategory; 2] = [ItemCategory::TwoHandedPolearm, ItemCategory::OneHandedPolearm];

const RANGED_PRIORITY: [ItemCategory; 2] = [ItemCategory::Bow, ItemCategory::Crossbow];

const THROWING_PRIORITY: [ItemCategory; 3] = [
    ItemCategory::Javelin,
    ItemCategory::ThrowingAxe,
    ItemCategory::ThrowingKnife,
];

/// Melee category used when the mask names none
pub const DEFAULT_MELEE: ItemCategory = ItemCategory::OneHandedSword;

/// Legal weapon-slot layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadoutShape {
    /// Ranged weapon and ammo, then a polearm backed by a sidearm
    RangedWithPolearm { ranged: ItemCategory, polearm: ItemCategory },
    /// Ranged weapon and ammo, a melee sidearm, then more ammo or a shield
    Ranged {
        ranged: ItemCategory,
        melee: ItemCategory,
        shield: bool,
    },
    /// Polearm first, throwing weapons and a sidearm behind it
    ThrowingWithPolearm {
        throwing: ItemCategory,
        polearm: ItemCategory,
        shield: bool,
    },
    /// Melee weapon first, throwing weapons in the back slots
    Throwing {
        throwing: ItemCategory,
        melee: ItemCategory,
        shield: bool,
    },
    /// Melee only
    Melee { melee: ItemCategory, shield: bool },
}

/// Transient per-request plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponLoadoutPlan {
    pub shape: LoadoutShape,
    /// Preferred sidearm category for polearm backups
    pub sidearm: ItemCategory,
}

impl WeaponLoadoutPlan {
    pub fn primary_melee(&self) -> ItemCategory {
        match self.shape {
            LoadoutShape::RangedWithPolearm { polearm, .. } | LoadoutShape::ThrowingWithPolearm { polearm, .. } => {
                polearm
            }
            LoadoutShape::Ranged { melee, .. }
            | LoadoutShape::Throwing { melee, .. }
            | LoadoutShape::Melee { melee, .. } => melee,
        }
    }

    pub fn ranged(&self) -> Option<ItemCategory> {
        match self.shape {
            LoadoutShape::RangedWithPolearm { ranged, .. } | LoadoutShape::Ranged { ranged, .. } => Some(ranged),
            _ => None,
        }
    }

    pub fn throwing(&self) -> Option<ItemCategory> {
        match self.shape {
            LoadoutShape::ThrowingWithPolearm { throwing, .. } | LoadoutShape::Throwing { throwing, .. } => {
                Some(throwing)
            }
            _ => None,
        }
    }

    pub fn includes_shield(&self) -> bool {
        match self.shape {
            LoadoutShape::RangedWithPolearm { .. } => false,
            LoadoutShape::Ranged { shield, .. }
            | LoadoutShape::ThrowingWithPolearm { shield, .. }
            | LoadoutShape::Throwing { shield, .. }
            | LoadoutShape::Melee { shield, .. } => shield,
        }
    }

    pub fn is_two_handed(&self) -> bool {
        self.primary_melee().is_two_handed_melee()
    }

    pub fn ranged_is_primary(&self) -> bool {
        self.ranged().is_some()
    }

    /// 2 for a bow, 1 for a crossbow, 0 without ranged
    pub fn ammo_slots(&self) -> u8 {
        match self.ranged() {
            Some(ItemCategory::Bow) => 2,
            Some(_) => 1,
            None => 0,
        }
    }

    pub fn throwing_slots(&self) -> u8 {
        if self.throwing().is_some() {
            2
        } else {
            0
        }
    }
}

/// Build a plan from the mask. `ranged_over_throwing` decides which of the
/// two survives when the mask asks for both.
pub fn plan_loadout(mask: WeaponMask, ranged_over_throwing: bool) -> WeaponLoadoutPlan {
    let melee = mask
        .first_of(&TWO_HANDED_PRIORITY)
        .or_else(|| mask.first_of(&POLEARM_PRIORITY))
        .or_else(|| mask.first_of(&ItemCategory::SIDEARMS))
        .unwrap_or(DEFAULT_MELEE);

    let mut ranged = mask.first_of(&RANGED_PRIORITY);
    let mut throwing = mask.first_of(&THROWING_PRIORITY);
    if ranged.is_some() && throwing.is_some() {
        if ranged_over_throwing {
            throwing = None;
        } else {
            ranged = None;
        }
    }

    // A bow's second quiver takes the slot a shield would use
    let shield = mask.contains(WeaponMask::SHIELD)
        && !melee.is_two_handed_melee()
        && ranged != Some(ItemCategory::Bow);

    let sidearm = mask.first_of(&ItemCategory::SIDEARMS).unwrap_or(DEFAULT_MELEE);

    let shape = match (ranged, throwing) {
        (Some(ranged), _) if melee.is_polearm() => LoadoutShape::RangedWithPolearm { ranged, polearm: melee },
        (Some(ranged), _) => LoadoutShape::Ranged { ranged, melee, shield },
        (None, Some(throwing)) if melee.is_polearm() => LoadoutShape::ThrowingWithPolearm {
            throwing,
            polearm: melee,
            shield,
        },
        (None, Some(throwing)) => LoadoutShape::Throwing { throwing, melee, shield },
        (None, None) => LoadoutShape::Melee { melee, shield },
    };

    WeaponLoadoutPlan { shape, sidearm }
}

/// Ranged wins over throwing unless the throwing skill is strictly higher
pub fn ranged_takes_priority(mask: WeaponMask, profile: &CharacterProfile) -> bool {
    let ranged_skill = match mask.first_of(&RANGED_PRIORITY) {
        Some(ItemCategory::Crossbow) => profile.skills.get(Skill::Crossbow),
        Some(_) => profile.skills.get(Skill::Bow),
        None => return false,
    };
    ranged_skill >= profile.skills.get(Skill::Throwing)
}

/// Plan for a character, deriving the ranged/throwing tie-break from skills
pub fn plan_for_profile(mask: WeaponMask, profile: &CharacterProfile) -> WeaponLoadoutPlan {
    plan_loadout(mask, ranged_takes_priority(mask, profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Gender;

    #[test]
    fn test_empty_mask_defaults_to_sword() {
        let plan = plan_loadout(WeaponMask::empty(), true);
        assert_eq!(plan.shape, LoadoutShape::Melee { melee: ItemCategory::OneHandedSword, shield: false });
        assert_eq!(plan.sidearm, ItemCategory::OneHandedSword);
    }

    #[test]
    fn test_melee_priority() {
        let mask = WeaponMask::ONE_HANDED_AXE | WeaponMask::TWO_HANDED_POLEARM | WeaponMask::TWO_HANDED_MACE;
        assert_eq!(plan_loadout(mask, true).primary_melee(), ItemCategory::TwoHandedMace);

        let mask = WeaponMask::ONE_HANDED_AXE | WeaponMask::ONE_HANDED_POLEARM;
        assert_eq!(plan_loadout(mask, true).primary_melee(), ItemCategory::OneHandedPolearm);

        let mask = WeaponMask::DAGGER | WeaponMask::ONE_HANDED_MACE;
        assert_eq!(plan_loadout(mask, true).primary_melee(), ItemCategory::OneHandedMace);
    }

    #[test]
    fn test_shield_never_with_two_handed() {
        let plan = plan_loadout(WeaponMask::TWO_HANDED_AXE | WeaponMask::SHIELD, true);
        assert!(plan.is_two_handed());
        assert!(!plan.includes_shield());

        let plan = plan_loadout(WeaponMask::TWO_HANDED_POLEARM | WeaponMask::SHIELD, true);
        assert!(!plan.includes_shield());

        let plan = plan_loadout(WeaponMask::ONE_HANDED_POLEARM | WeaponMask::SHIELD, true);
        assert!(plan.includes_shield());
    }

    #[test]
    fn test_bow_excludes_shield_crossbow_keeps_it() {
        let plan = plan_loadout(WeaponMask::BOW | WeaponMask::SHIELD, true);
        assert!(!plan.includes_shield());
        assert_eq!(plan.ammo_slots(), 2);

        let plan = plan_loadout(WeaponMask::CROSSBOW | WeaponMask::SHIELD, true);
        assert!(plan.includes_shield());
        assert_eq!(plan.ammo_slots(), 1);
    }

    #[test]
    fn test_bow_beats_crossbow() {
        let plan = plan_loadout(WeaponMask::BOW | WeaponMask::CROSSBOW, true);
        assert_eq!(plan.ranged(), Some(ItemCategory::Bow));
    }

    #[test]
    fn test_ranged_throwing_tie_break() {
        let mask = WeaponMask::BOW | WeaponMask::JAVELIN;
        let plan = plan_loadout(mask, true);
        assert_eq!(plan.ranged(), Some(ItemCategory::Bow));
        assert_eq!(plan.throwing(), None);

        let plan = plan_loadout(mask, false);
        assert_eq!(plan.ranged(), None);
        assert_eq!(plan.throwing(), Some(ItemCategory::Javelin));
        assert_eq!(plan.throwing_slots(), 2);
    }

    #[test]
    fn test_polearm_shapes() {
        let plan = plan_loadout(WeaponMask::TWO_HANDED_POLEARM | WeaponMask::CROSSBOW, true);
        assert_eq!(
            plan.shape,
            LoadoutShape::RangedWithPolearm { ranged: ItemCategory::Crossbow, polearm: ItemCategory::TwoHandedPolearm }
        );
        assert!(plan.ranged_is_primary());

        let plan = plan_loadout(WeaponMask::ONE_HANDED_POLEARM | WeaponMask::JAVELIN | WeaponMask::SHIELD, true);
        assert_eq!(
            plan.shape,
            LoadoutShape::ThrowingWithPolearm {
                throwing: ItemCategory::Javelin,
                polearm: ItemCategory::OneHandedPolearm,
                shield: true
            }
        );
    }

    #[test]
    fn test_sidearm_preference_from_mask() {
        let plan = plan_loadout(WeaponMask::TWO_HANDED_POLEARM | WeaponMask::ONE_HANDED_MACE, true);
        assert_eq!(plan.primary_melee(), ItemCategory::TwoHandedPolearm);
        assert_eq!(plan.sidearm, ItemCategory::OneHandedMace);
    }

    #[test]
    fn test_skill_tie_break() {
        let mask = WeaponMask::CROSSBOW | WeaponMask::THROWING_AXE;
        let even = CharacterProfile::new("Even", 10, "vlandia", Gender::Male)
            .with_skill(Skill::Crossbow, 100)
            .with_skill(Skill::Throwing, 100);
        assert!(ranged_takes_priority(mask, &even));

        let thrower = even.clone().with_skill(Skill::Throwing, 101);
        assert!(!ranged_takes_priority(mask, &thrower));
        assert_eq!(plan_for_profile(mask, &thrower).throwing(), Some(ItemCategory::ThrowingAxe));

        // Bow skill is irrelevant for a crossbow request
        let archer = CharacterProfile::new("Archer", 10, "vlandia", Gender::Male)
            .with_skill(Skill::Bow, 200)
            .with_skill(Skill::Throwing, 50);
        assert!(!ranged_takes_priority(mask, &archer));
    }
}
