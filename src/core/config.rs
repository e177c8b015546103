//! Equipment assembly configuration with documented constants
//!
//! All keyword lists, thresholds and probabilities used by the rules and the
//! assembler are collected here. The defaults match the shipped content;
//! a TOML file may override any section.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{LoadoutError, Result};
use crate::core::types::{CultureId, Gender, ItemId};

/// Top-level configuration for the catalog and the assembler
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipConfig {
    pub validation: ValidationConfig,
    pub gender: GenderConfig,
    pub crowns: CrownConfig,
    pub appearance: AppearanceThresholds,
    pub civilian: CivilianConfig,
    pub mounts: MountConfig,
    pub assembly: AssemblyConfig,
}

/// Denylists applied when the catalog is built
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Item names rejected on exact (case-insensitive) match
    pub blacklisted_names: Vec<String>,

    /// Substrings that reject an item when found in its name or identifier
    pub blacklisted_keywords: Vec<String>,

    /// Identifier prefixes used by placeholder/dev content
    pub placeholder_prefixes: Vec<String>,

    /// Specific identifiers that are never handed out
    pub denylisted_ids: Vec<ItemId>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            blacklisted_names: vec!["Practice Sword".into(), "Wooden Stick".into()],
            blacklisted_keywords: vec![
                "dummy".into(),
                "tournament".into(),
                "training".into(),
                "_test".into(),
            ],
            placeholder_prefixes: vec!["placeholder".into(), "__".into(), "dev_".into()],
            denylisted_ids: vec![ItemId::new("ballista_projectile"), ItemId::new("boulder")],
        }
    }
}

/// Per-item gender override
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderException {
    pub item: ItemId,
    /// Gender the item is restricted to
    pub gender: Gender,
}

/// Keyword rules for gender suitability
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenderConfig {
    /// Keywords marking an item as women's wear. Such items are kept out of
    /// male loadouts; female loadouts accept everything.
    pub female_keywords: Vec<String>,

    /// Explicit overrides, checked before keywords
    pub exceptions: Vec<GenderException>,
}

impl Default for GenderConfig {
    fn default() -> Self {
        Self {
            female_keywords: vec![
                "female".into(),
                "woman".into(),
                "women".into(),
                "lady".into(),
                "dress".into(),
                "gown".into(),
            ],
            exceptions: vec![GenderException {
                item: ItemId::new("ladys_riding_boots"),
                gender: Gender::Female,
            }],
        }
    }
}

/// Crown classification
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrownConfig {
    /// Keywords identifying a crown
    pub keywords: Vec<String>,

    /// Crowns whose names lack any keyword
    pub explicit_ids: Vec<ItemId>,

    /// The one crown usable in both battle and civilian sets
    pub exception_item: ItemId,

    /// Gender the exception crown is restricted to
    pub exception_gender: Gender,

    /// Chance that a ruling-faction character tries the crown pool before
    /// the regular head pool
    pub crown_chance: f64,
}

impl Default for CrownConfig {
    fn default() -> Self {
        Self {
            keywords: vec!["crown".into()],
            explicit_ids: vec![ItemId::new("imperial_diadem"), ItemId::new("khans_circlet")],
            exception_item: ItemId::new("imperial_diadem"),
            exception_gender: Gender::Female,
            crown_chance: 0.5,
        }
    }
}

/// Appearance thresholds. Each is an exclusive lower bound: an item's
/// appearance rating must be strictly greater to pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceThresholds {
    pub civilian: f32,
    pub royal_civilian: f32,
    pub battle: f32,
}

impl Default for AppearanceThresholds {
    fn default() -> Self {
        Self {
            civilian: 1.0,
            royal_civilian: 2.0,
            battle: 0.5,
        }
    }
}

/// Maps a template identifier prefix to a culture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CulturePrefix {
    pub prefix: String,
    pub culture: CultureId,
}

/// Civilian template processing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CivilianConfig {
    /// Template prefixes that are commoner wear even when tagged noble
    pub commoner_prefixes: Vec<String>,

    /// Culture inferred for templates that carry none
    pub culture_prefixes: Vec<CulturePrefix>,
}

impl Default for CivilianConfig {
    fn default() -> Self {
        let prefix = |prefix: &str, culture: &str| CulturePrefix {
            prefix: prefix.into(),
            culture: CultureId::new(culture),
        };
        Self {
            commoner_prefixes: vec![
                "villager_".into(),
                "townsman_".into(),
                "peasant_".into(),
                "tavern_".into(),
            ],
            culture_prefixes: vec![
                prefix("empire_", "empire"),
                prefix("imperial_", "empire"),
                prefix("sturgian_", "sturgia"),
                prefix("vlandian_", "vlandia"),
                prefix("battanian_", "battania"),
                prefix("khuzait_", "khuzait"),
                prefix("aserai_", "aserai"),
            ],
        }
    }
}

/// Mount classification
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MountConfig {
    /// Keywords marking pack animals and their harnesses
    pub pack_keywords: Vec<String>,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            pack_keywords: vec!["pack".into(), "mule".into(), "donkey".into()],
        }
    }
}

/// Assembler thresholds and probabilities
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyConfig {
    /// Characters below this level may wear cloth armor in every slot
    pub cloth_level_threshold: u32,

    /// Chance that a male character's cape slot is left empty
    pub cape_skip_chance_male: f64,

    /// Chance that a female character's cape slot is left empty
    pub cape_skip_chance_female: f64,

    /// Minimum level at which a banner may be granted
    pub banner_min_level: u32,

    /// Riding skill at which a character prefers to fight mounted
    pub mounted_riding_threshold: u32,

    /// Offset added to the tier ordinal when drawing tier-weighted candidates
    ///
    /// Keeps tier 0 items drawable (weight 1) while favoring higher tiers.
    pub tier_weight_offset: u32,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            cloth_level_threshold: 10,
            cape_skip_chance_male: 0.2,
            cape_skip_chance_female: 0.4,
            banner_min_level: 15,
            mounted_riding_threshold: 75,
            tier_weight_offset: 1,
        }
    }
}

impl EquipConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML. Missing sections keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate().map_err(LoadoutError::InvalidConfig)?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        let probabilities = [
            ("crowns.crown_chance", self.crowns.crown_chance),
            ("assembly.cape_skip_chance_male", self.assembly.cape_skip_chance_male),
            ("assembly.cape_skip_chance_female", self.assembly.cape_skip_chance_female),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} ({}) must be within 0.0..=1.0", name, value));
            }
        }

        // Male characters skip the cape less often than female characters
        if self.assembly.cape_skip_chance_male > self.assembly.cape_skip_chance_female {
            return Err(format!(
                "cape_skip_chance_male ({}) should be <= cape_skip_chance_female ({})",
                self.assembly.cape_skip_chance_male, self.assembly.cape_skip_chance_female
            ));
        }

        if self.appearance.civilian > self.appearance.royal_civilian {
            return Err(format!(
                "appearance.civilian ({}) should be <= appearance.royal_civilian ({})",
                self.appearance.civilian, self.appearance.royal_civilian
            ));
        }

        if self.crowns.keywords.is_empty() && self.crowns.explicit_ids.is_empty() {
            return Err("crowns need at least one keyword or explicit id".into());
        }

        Ok(())
    }
}
