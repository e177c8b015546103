//! Weapon loadout planner

pub mod mask;
pub mod plan;

pub use mask::WeaponMask;
pub use plan::{
    plan_for_profile, plan_loadout, ranged_takes_priority, LoadoutShape, WeaponLoadoutPlan, DEFAULT_MELEE,
};
