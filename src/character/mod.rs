//! Character profiles and the collaborators that supply and receive them
//!
//! The assembler only reads profiles. Looking characters up and committing
//! finished equipment belong to the host game, behind the traits below.

pub mod skills;

use serde::{Deserialize, Serialize};

use crate::core::error::{LoadoutError, Result};
use crate::core::types::{CharacterHandle, CultureId, Gender};

pub use skills::{Skill, SkillSet};

/// Read-only input to the assembler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterProfile {
    pub name: String,
    pub level: u32,
    pub culture: CultureId,
    pub gender: Gender,
    #[serde(default)]
    pub skills: SkillSet,
    /// Member of the clan currently ruling its kingdom
    #[serde(default)]
    pub ruling_faction: bool,
    /// Selects the noble civilian wardrobe
    #[serde(default)]
    pub noble: bool,
}

impl CharacterProfile {
    pub fn new(name: impl Into<String>, level: u32, culture: impl Into<String>, gender: Gender) -> Self {
        Self {
            name: name.into(),
            level,
            culture: CultureId::new(culture),
            gender,
            skills: SkillSet::default(),
            ruling_faction: false,
            noble: false,
        }
    }

    pub fn with_skill(mut self, skill: Skill, value: u32) -> Self {
        self.skills.set(skill, value);
        self
    }

    pub fn ruling(mut self) -> Self {
        self.ruling_faction = true;
        self.noble = true;
        self
    }

    pub fn noble(mut self) -> Self {
        self.noble = true;
        self
    }

    /// Riding skill at or above the threshold means the character fights mounted
    pub fn prefers_mounted(&self, riding_threshold: u32) -> bool {
        self.skills.get(Skill::Riding) >= riding_threshold
    }

    pub fn is_ruling_faction_member(&self) -> bool {
        self.ruling_faction
    }

    pub fn validate(&self) -> Result<()> {
        if self.culture.as_str().trim().is_empty() {
            return Err(LoadoutError::InvalidProfile(format!("{} has no culture", self.name)));
        }
        Ok(())
    }
}

/// Resolves opaque handles to profiles
pub trait CharacterLookup {
    fn profile(&self, handle: CharacterHandle) -> Option<CharacterProfile>;
}

/// Commits a finished equipment set to a character
pub trait EquipmentApplier {
    fn apply(&mut self, handle: CharacterHandle, equipment: crate::assembly::EquipmentSet) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mounted_preference_threshold() {
        let rider = CharacterProfile::new("Rider", 10, "khuzait", Gender::Male).with_skill(Skill::Riding, 80);
        assert!(rider.prefers_mounted(75));
        assert!(rider.prefers_mounted(80));
        assert!(!rider.prefers_mounted(81));
    }

    #[test]
    fn test_ruling_implies_noble() {
        let ruler = CharacterProfile::new("Queen", 25, "empire", Gender::Female).ruling();
        assert!(ruler.is_ruling_faction_member());
        assert!(ruler.noble);
    }

    #[test]
    fn test_profile_requires_culture() {
        let profile = CharacterProfile::new("Nobody", 1, "  ", Gender::Male);
        assert!(matches!(profile.validate(), Err(LoadoutError::InvalidProfile(_))));
        assert!(CharacterProfile::new("Somebody", 1, "aserai", Gender::Male).validate().is_ok());
    }
}
