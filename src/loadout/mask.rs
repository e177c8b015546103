//! Allowed weapon categories as a bitmask

use bitflags::bitflags;
use std::str::FromStr;

use crate::core::error::{LoadoutError, Result};
use crate::items::ItemCategory;

bitflags! {
    /// Weapon categories a character may be given
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WeaponMask: u32 {
        const ONE_HANDED_SWORD = 1 << 0;
        const ONE_HANDED_AXE = 1 << 1;
        const ONE_HANDED_MACE = 1 << 2;
        const DAGGER = 1 << 3;
        const ONE_HANDED_POLEARM = 1 << 4;
        const TWO_HANDED_SWORD = 1 << 5;
        const TWO_HANDED_AXE = 1 << 6;
        const TWO_HANDED_MACE = 1 << 7;
        const TWO_HANDED_POLEARM = 1 << 8;
        const BOW = 1 << 9;
        const CROSSBOW = 1 << 10;
        const JAVELIN = 1 << 11;
        const THROWING_AXE = 1 << 12;
        const THROWING_KNIFE = 1 << 13;
        const SHIELD = 1 << 14;

        const ONE_HANDED = Self::ONE_HANDED_SWORD.bits()
            | Self::ONE_HANDED_AXE.bits()
            | Self::ONE_HANDED_MACE.bits()
            | Self::DAGGER.bits();
        const TWO_HANDED = Self::TWO_HANDED_SWORD.bits()
            | Self::TWO_HANDED_AXE.bits()
            | Self::TWO_HANDED_MACE.bits();
        const POLEARM = Self::ONE_HANDED_POLEARM.bits() | Self::TWO_HANDED_POLEARM.bits();
        const RANGED = Self::BOW.bits() | Self::CROSSBOW.bits();
        const THROWING = Self::JAVELIN.bits() | Self::THROWING_AXE.bits() | Self::THROWING_KNIFE.bits();
    }
}

impl WeaponMask {
    /// Flag for a weapon category, None for non-weapon categories and ammo
    pub fn from_category(category: ItemCategory) -> Option<Self> {
        let flag = match category {
            ItemCategory::OneHandedSword => Self::ONE_HANDED_SWORD,
            ItemCategory::OneHandedAxe => Self::ONE_HANDED_AXE,
            ItemCategory::OneHandedMace => Self::ONE_HANDED_MACE,
            ItemCategory::Dagger => Self::DAGGER,
            ItemCategory::OneHandedPolearm => Self::ONE_HANDED_POLEARM,
            ItemCategory::TwoHandedSword => Self::TWO_HANDED_SWORD,
            ItemCategory::TwoHandedAxe => Self::TWO_HANDED_AXE,
            ItemCategory::TwoHandedMace => Self::TWO_HANDED_MACE,
            ItemCategory::TwoHandedPolearm => Self::TWO_HANDED_POLEARM,
            ItemCategory::Bow => Self::BOW,
            ItemCategory::Crossbow => Self::CROSSBOW,
            ItemCategory::Javelin => Self::JAVELIN,
            ItemCategory::ThrowingAxe => Self::THROWING_AXE,
            ItemCategory::ThrowingKnife => Self::THROWING_KNIFE,
            ItemCategory::Shield => Self::SHIELD,
            _ => return None,
        };
        Some(flag)
    }

    pub fn allows(self, category: ItemCategory) -> bool {
        Self::from_category(category).is_some_and(|flag| self.contains(flag))
    }

    /// First category of `order` present in the mask
    pub fn first_of(self, order: &[ItemCategory]) -> Option<ItemCategory> {
        order.iter().copied().find(|c| self.allows(*c))
    }
}

impl FromStr for WeaponMask {
    type Err = LoadoutError;

    /// Comma-separated category names: `"two_handed_sword,shield"`
    fn from_str(s: &str) -> Result<Self> {
        let mut mask = WeaponMask::empty();
        for token in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let category = ItemCategory::from_str(token)
                .map_err(|_| LoadoutError::InvalidConfig(format!("unknown weapon category '{}'", token)))?;
            let flag = WeaponMask::from_category(category)
                .ok_or_else(|| LoadoutError::InvalidConfig(format!("'{}' is not a weapon category", token)))?;
            mask |= flag;
        }
        Ok(mask)
    }
}
