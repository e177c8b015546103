pub mod config;
pub mod error;
pub mod types;

pub use config::EquipConfig;
pub use error::{LoadoutError, Result};
pub use types::{CharacterHandle, CultureId, Gender, ItemId, Tier};
