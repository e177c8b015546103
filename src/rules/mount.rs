//! Mount and polearm compatibility

use crate::items::{Item, ItemCategory, WeaponTrait};
use crate::rules::ItemRules;

/// Can this weapon be used from horseback?
///
/// Weapons that cannot be reloaded or wielded mounted are refused. Two-handed
/// weapons are refused unless they are polearms and `allow_polearms` is set.
pub fn is_weapon_usable_on_mount(item: &Item, allow_polearms: bool) -> bool {
    if item.has_weapon_trait(WeaponTrait::CantReloadOnHorseback)
        || item.has_weapon_trait(WeaponTrait::CantUseOnHorseback)
    {
        return false;
    }
    let two_handed = item.has_weapon_trait(WeaponTrait::TwoHanded) || item.category.is_two_handed_melee();
    if two_handed {
        return item.category.is_polearm() && allow_polearms;
    }
    true
}

/// Polearm suited to a mounted charge
pub fn is_couchable_polearm(item: &Item) -> bool {
    item.category.is_polearm() && item.has_weapon_trait(WeaponTrait::CanCouch)
}

/// Polearm suited to bracing against cavalry on foot
pub fn is_braceable_polearm(item: &Item) -> bool {
    item.category.is_polearm() && item.has_weapon_trait(WeaponTrait::CanBrace)
}

impl ItemRules {
    pub fn is_pack_animal_gear(&self, item: &Item) -> bool {
        self.pack_keywords.iter().any(|k| item.mentions(k))
    }

    /// Harness fit for battle, not for a pack animal or mule
    pub fn is_combat_harness(&self, item: &Item) -> bool {
        item.category == ItemCategory::HorseHarness && !self.is_pack_animal_gear(item)
    }

    /// Horse fit for battle
    pub fn is_combat_mount(&self, item: &Item) -> bool {
        item.category == ItemCategory::Horse && !self.is_pack_animal_gear(item)
    }
}
