//! Loadout Forge - procedural equipment assembly for simulated characters

pub mod assembly;
pub mod catalog;
pub mod character;
pub mod core;
pub mod formation;
pub mod items;
pub mod loadout;
pub mod rules;
pub mod selection;

pub use assembly::{EquipRequest, EquipmentAssembler, EquipmentSet, EquipmentSlot};
pub use catalog::ItemCatalog;
pub use character::CharacterProfile;
pub use core::config::EquipConfig;
pub use core::error::{LoadoutError, Result};
pub use formation::{formation_category, FormationCategory};
pub use loadout::WeaponMask;
