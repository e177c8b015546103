//! Combat skills

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::items::ItemCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Skill {
    OneHanded,
    TwoHanded,
    Polearm,
    Bow,
    Crossbow,
    Throwing,
    Riding,
    Athletics,
}

impl Skill {
    /// Weapon skills in tie-break order: melee first
    pub const WEAPON_SKILLS: [Skill; 6] = [
        Skill::OneHanded,
        Skill::TwoHanded,
        Skill::Polearm,
        Skill::Bow,
        Skill::Crossbow,
        Skill::Throwing,
    ];

    /// Skill governing a weapon category
    pub fn for_category(category: ItemCategory) -> Option<Skill> {
        match category {
            c if c.is_polearm() => Some(Skill::Polearm),
            c if c.is_sidearm() => Some(Skill::OneHanded),
            c if c.is_two_handed_melee() => Some(Skill::TwoHanded),
            ItemCategory::Bow => Some(Skill::Bow),
            ItemCategory::Crossbow => Some(Skill::Crossbow),
            c if c.is_throwing() => Some(Skill::Throwing),
            _ => None,
        }
    }

    /// Bow and crossbow. Thrown weapons are handled as skirmishing.
    pub fn is_ranged(self) -> bool {
        matches!(self, Skill::Bow | Skill::Crossbow)
    }
}

/// Skill values, missing skills read as zero
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(AHashMap<Skill, u32>);

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, skill: Skill) -> u32 {
        self.0.get(&skill).copied().unwrap_or(0)
    }

    pub fn set(&mut self, skill: Skill, value: u32) {
        self.0.insert(skill, value);
    }
}
