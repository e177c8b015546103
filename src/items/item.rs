//! Catalog item records
//!
//! An item is an immutable record: category, tier, optional culture,
//! appearance rating and the stats relevant to its category. The engine
//! never mutates items once loaded; indexes share them through `Arc`.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::core::types::{CultureId, Gender, ItemId, Tier};

/// What an item is, at the granularity the assembler cares about
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ItemCategory {
    // One-handed melee
    OneHandedSword,
    OneHandedAxe,
    OneHandedMace,
    Dagger,
    OneHandedPolearm,

    // Two-handed melee
    TwoHandedSword,
    TwoHandedAxe,
    TwoHandedMace,
    TwoHandedPolearm,

    // Ranged and ammunition
    Bow,
    Crossbow,
    Arrows,
    Bolts,

    // Thrown
    Javelin,
    ThrowingAxe,
    ThrowingKnife,

    Shield,

    // Armor slots
    HeadArmor,
    Cape,
    BodyArmor,
    HandArmor,
    LegArmor,

    // Mount
    Horse,
    HorseHarness,

    Banner,
}

impl ItemCategory {
    /// One-handed melee weapons that can back up a polearm
    pub const SIDEARMS: [ItemCategory; 4] = [
        ItemCategory::OneHandedSword,
        ItemCategory::OneHandedAxe,
        ItemCategory::OneHandedMace,
        ItemCategory::Dagger,
    ];

    pub const POLEARMS: [ItemCategory; 2] =
        [ItemCategory::TwoHandedPolearm, ItemCategory::OneHandedPolearm];

    pub const THROWING: [ItemCategory; 3] = [
        ItemCategory::Javelin,
        ItemCategory::ThrowingAxe,
        ItemCategory::ThrowingKnife,
    ];

    pub fn is_sidearm(self) -> bool {
        Self::SIDEARMS.contains(&self)
    }

    pub fn is_polearm(self) -> bool {
        Self::POLEARMS.contains(&self)
    }

    /// Melee weapons that occupy both hands (polearms included)
    pub fn is_two_handed_melee(self) -> bool {
        matches!(
            self,
            ItemCategory::TwoHandedSword
                | ItemCategory::TwoHandedAxe
                | ItemCategory::TwoHandedMace
                | ItemCategory::TwoHandedPolearm
        )
    }

    pub fn is_melee(self) -> bool {
        self.is_sidearm() || self.is_polearm() || self.is_two_handed_melee()
    }

    pub fn is_ranged(self) -> bool {
        matches!(self, ItemCategory::Bow | ItemCategory::Crossbow)
    }

    pub fn is_throwing(self) -> bool {
        Self::THROWING.contains(&self)
    }

    pub fn is_ammo(self) -> bool {
        matches!(self, ItemCategory::Arrows | ItemCategory::Bolts)
    }

    pub fn is_shield(self) -> bool {
        self == ItemCategory::Shield
    }

    /// Anything that goes in weapon slots 0-3
    pub fn is_weapon_slot_item(self) -> bool {
        self.is_melee() || self.is_ranged() || self.is_throwing() || self.is_ammo() || self.is_shield()
    }

    pub fn is_armor(self) -> bool {
        matches!(
            self,
            ItemCategory::HeadArmor
                | ItemCategory::Cape
                | ItemCategory::BodyArmor
                | ItemCategory::HandArmor
                | ItemCategory::LegArmor
        )
    }

    /// Ammunition a ranged weapon consumes
    pub fn ammo_for(self) -> Option<ItemCategory> {
        match self {
            ItemCategory::Bow => Some(ItemCategory::Arrows),
            ItemCategory::Crossbow => Some(ItemCategory::Bolts),
            _ => None,
        }
    }
}

/// Weapon traits read from source data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponTrait {
    /// Requires both hands
    TwoHanded,
    /// Cannot be reloaded while mounted (most crossbows)
    CantReloadOnHorseback,
    /// Cannot be wielded while mounted at all (longbows)
    CantUseOnHorseback,
    /// Lance-style polearm usable in a mounted charge
    CanCouch,
    /// Pike-style polearm that can be braced against cavalry
    CanBrace,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponStats {
    pub swing_damage: u32,
    pub thrust_damage: u32,
    pub missile_damage: u32,
    /// Ammunition and throwing stack size
    pub stack_size: u32,
    /// Shield durability
    pub hit_points: u32,
    pub traits: Vec<WeaponTrait>,
}

impl WeaponStats {
    pub fn melee(swing_damage: u32, thrust_damage: u32) -> Self {
        Self {
            swing_damage,
            thrust_damage,
            ..Default::default()
        }
    }

    pub fn ranged(missile_damage: u32) -> Self {
        Self {
            missile_damage,
            ..Default::default()
        }
    }

    pub fn thrown(missile_damage: u32, stack_size: u32) -> Self {
        Self {
            missile_damage,
            stack_size,
            ..Default::default()
        }
    }

    pub fn ammo(stack_size: u32) -> Self {
        Self {
            stack_size,
            ..Default::default()
        }
    }

    pub fn shield(hit_points: u32) -> Self {
        Self {
            hit_points,
            ..Default::default()
        }
    }

    pub fn with_trait(mut self, weapon_trait: WeaponTrait) -> Self {
        if !self.traits.contains(&weapon_trait) {
            self.traits.push(weapon_trait);
        }
        self
    }

    pub fn has_trait(&self, weapon_trait: WeaponTrait) -> bool {
        self.traits.contains(&weapon_trait)
    }
}

/// Armor material, lightest to heaviest
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ArmorMaterial {
    #[default]
    Cloth,
    Leather,
    Chainmail,
    Plate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmorStats {
    pub head: u32,
    pub body: u32,
    pub arm: u32,
    pub leg: u32,
    pub material: ArmorMaterial,
}

impl ArmorStats {
    pub fn new(material: ArmorMaterial) -> Self {
        Self {
            material,
            ..Default::default()
        }
    }

    pub fn head(mut self, value: u32) -> Self {
        self.head = value;
        self
    }

    pub fn body(mut self, value: u32) -> Self {
        self.body = value;
        self
    }

    pub fn arm(mut self, value: u32) -> Self {
        self.arm = value;
        self
    }

    pub fn leg(mut self, value: u32) -> Self {
        self.leg = value;
        self
    }

    pub fn total(&self) -> u32 {
        self.head + self.body + self.arm + self.leg
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HorseStats {
    pub speed: u32,
    pub maneuver: u32,
    pub charge: u32,
}

/// Battlefield role a banner is themed around
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BannerTheme {
    #[default]
    Generic,
    Infantry,
    ShieldWall,
    Ranged,
    Cavalry,
    HorseArcher,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerStats {
    pub theme: BannerTheme,
}

/// Immutable catalog record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub category: ItemCategory,
    pub tier: Tier,
    /// None = culture-neutral
    #[serde(default)]
    pub culture: Option<CultureId>,
    /// Visual quality score
    #[serde(default)]
    pub appearance: f32,
    /// Explicit gender restriction from source data
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub weapon: Option<WeaponStats>,
    #[serde(default)]
    pub armor: Option<ArmorStats>,
    #[serde(default)]
    pub horse: Option<HorseStats>,
    #[serde(default)]
    pub banner: Option<BannerStats>,
    /// Lowercased name and identifier for keyword checks
    #[serde(skip)]
    search_text: String,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: ItemCategory, tier: Tier) -> Self {
        Self {
            id: ItemId::new(id),
            name: name.into(),
            category,
            tier,
            culture: None,
            appearance: 0.0,
            gender: None,
            weapon: None,
            armor: None,
            horse: None,
            banner: None,
            search_text: String::new(),
        }
        .indexed()
    }

    /// Refresh the cached search text after loading or renaming
    pub fn indexed(mut self) -> Self {
        self.search_text = format!("{}\n{}", self.name, self.id).to_lowercase();
        self
    }

    pub fn with_culture(mut self, culture: impl Into<String>) -> Self {
        self.culture = Some(CultureId::new(culture));
        self
    }

    pub fn with_appearance(mut self, appearance: f32) -> Self {
        self.appearance = appearance;
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_weapon(mut self, weapon: WeaponStats) -> Self {
        self.weapon = Some(weapon);
        self
    }

    pub fn with_armor(mut self, armor: ArmorStats) -> Self {
        self.armor = Some(armor);
        self
    }

    pub fn with_horse(mut self, horse: HorseStats) -> Self {
        self.horse = Some(horse);
        self
    }

    pub fn with_banner(mut self, theme: BannerTheme) -> Self {
        self.banner = Some(BannerStats { theme });
        self
    }

    /// Substring match of a lowercase keyword against name and identifier,
    /// ignoring the item's case
    pub fn mentions(&self, keyword: &str) -> bool {
        if self.search_text.is_empty() {
            return self.name.to_lowercase().contains(keyword) || self.id.as_str().to_lowercase().contains(keyword);
        }
        self.search_text.contains(keyword)
    }

    pub fn has_weapon_trait(&self, weapon_trait: WeaponTrait) -> bool {
        self.weapon.as_ref().is_some_and(|w| w.has_trait(weapon_trait))
    }

    pub fn armor_material(&self) -> Option<ArmorMaterial> {
        self.armor.as_ref().map(|a| a.material)
    }

    pub fn banner_theme(&self) -> Option<BannerTheme> {
        self.banner.as_ref().map(|b| b.theme)
    }
}
