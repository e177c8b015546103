//! Slot filler and equipment assembler
//!
//! One call fills every slot of a fresh [`EquipmentSet`] for one character.
//! Each slot samples its own tier window expansion, so two slots filled in
//! the same call may draw from different effective tiers. Cross-slot pairs
//! (polearm and sidearm, ranged weapon and ammunition, horse and harness)
//! are enforced here rather than in the selector.

pub mod armor;
pub mod banner;
pub mod civilian;
pub mod equipment_set;
pub mod invariants;
pub mod mount;
pub mod weapons;

use rand::Rng;
use std::sync::Arc;

use crate::catalog::{CatalogIndex, ItemCatalog};
use crate::character::{CharacterLookup, CharacterProfile, EquipmentApplier};
use crate::core::config::{AssemblyConfig, EquipConfig};
use crate::core::error::{LoadoutError, Result};
use crate::core::types::CharacterHandle;
use crate::items::Item;
use crate::loadout::{plan_for_profile, WeaponMask};
use crate::rules::ItemRules;
use crate::selection::{CandidateSource, CultureScope, ExpansionTable, SlotQuery, TierWindow, TieredSelector};

pub use banner::{BannerContext, ThemeRestriction};
pub use equipment_set::{EquipmentSet, EquipmentSlot, SlotDiagnostic};
pub use invariants::InvariantViolation;

/// What to build for one character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquipRequest {
    pub mask: WeaponMask,
    pub mounted: bool,
    pub include_banner: bool,
    pub civilian: bool,
}

impl EquipRequest {
    /// Unmounted battle set without a banner
    pub fn battle(mask: WeaponMask) -> Self {
        Self {
            mask,
            mounted: false,
            include_banner: false,
            civilian: false,
        }
    }

    pub fn civilian() -> Self {
        Self {
            mask: WeaponMask::empty(),
            mounted: false,
            include_banner: false,
            civilian: true,
        }
    }

    pub fn mounted(mut self, mounted: bool) -> Self {
        self.mounted = mounted;
        self
    }

    pub fn with_banner(mut self) -> Self {
        self.include_banner = true;
        self
    }

    /// Battle request whose mounted flag follows the character's riding skill
    pub fn for_profile(mask: WeaponMask, profile: &CharacterProfile, config: &EquipConfig) -> Self {
        Self::battle(mask).mounted(profile.prefers_mounted(config.assembly.mounted_riding_threshold))
    }
}

/// Builds equipment sets from an injected catalog
pub struct EquipmentAssembler<'a> {
    catalog: &'a ItemCatalog,
    settings: AssemblyConfig,
    crown_chance: f64,
    expansion: ExpansionTable,
}

impl<'a> EquipmentAssembler<'a> {
    pub fn new(catalog: &'a ItemCatalog, config: &EquipConfig) -> Self {
        Self {
            catalog,
            settings: config.assembly.clone(),
            crown_chance: config.crowns.crown_chance,
            expansion: ExpansionTable::default(),
        }
    }

    /// Replace the window expansion distribution (tests pin it with `ExpansionTable::fixed`)
    pub fn with_expansion(mut self, expansion: ExpansionTable) -> Self {
        self.expansion = expansion;
        self
    }

    pub fn catalog(&self) -> &ItemCatalog {
        self.catalog
    }

    /// Fill every slot for one character
    pub fn build_equipment_set<R: Rng + ?Sized>(
        &self,
        profile: &CharacterProfile,
        request: &EquipRequest,
        rng: &mut R,
    ) -> Result<EquipmentSet> {
        profile.validate()?;
        let index = self.catalog.index();
        if index.is_empty() {
            tracing::debug!("Empty catalog, {} gets an empty set", profile.name);
        }

        let mut filler = Filler {
            index: index.as_ref(),
            rules: self.catalog.rules(),
            profile,
            request,
            settings: &self.settings,
            crown_chance: self.crown_chance,
            expansion: &self.expansion,
            rng,
            set: if request.civilian {
                EquipmentSet::civilian()
            } else {
                EquipmentSet::battle()
            },
        };

        if request.civilian {
            filler.fill_civilian();
        } else {
            let plan = plan_for_profile(request.mask, profile);
            tracing::debug!("{}: {:?}", profile.name, plan.shape);
            filler.fill_weapons(&plan);
            filler.fill_armor();
            if request.mounted {
                filler.fill_mount();
            }
            if request.include_banner {
                filler.fill_banner();
            }
        }

        let set = filler.set;
        tracing::debug!("{}: {} slots filled", profile.name, set.filled());
        Ok(set)
    }

    /// Look a character up, build its set and hand it to the applier
    pub fn equip_character<R: Rng + ?Sized>(
        &self,
        handle: CharacterHandle,
        lookup: &dyn CharacterLookup,
        applier: &mut dyn EquipmentApplier,
        request: &EquipRequest,
        rng: &mut R,
    ) -> Result<()> {
        let profile = lookup.profile(handle).ok_or(LoadoutError::CharacterNotFound(handle))?;
        let set = self.build_equipment_set(&profile, request, rng)?;
        applier.apply(handle, set)
    }
}

/// Working state for one build
pub(crate) struct Filler<'a, R: Rng + ?Sized> {
    pub index: &'a CatalogIndex,
    pub rules: &'a ItemRules,
    pub profile: &'a CharacterProfile,
    pub request: &'a EquipRequest,
    pub settings: &'a AssemblyConfig,
    pub crown_chance: f64,
    pub expansion: &'a ExpansionTable,
    pub rng: &'a mut R,
    pub set: EquipmentSet,
}

impl<R: Rng + ?Sized> Filler<'_, R> {
    /// Freshly expanded window for one slot
    pub fn window(&mut self) -> TierWindow {
        let (floor, ceiling) = self.index.tier_bounds();
        TierWindow::for_level(self.profile.level)
            .expand(self.expansion.sample(self.rng))
            .clamp(floor, ceiling)
    }

    pub fn native(&self) -> CultureScope {
        CultureScope::Native(self.profile.culture.clone())
    }

    /// Bernoulli roll that tolerates out-of-range probabilities
    pub fn roll(&mut self, chance: f64) -> bool {
        self.rng.gen::<f64>() < chance
    }

    pub fn select(&mut self, query: &SlotQuery<'_>) -> Option<Arc<Item>> {
        let index = self.index;
        self.select_from(index, query)
    }

    pub fn select_from<S: CandidateSource + ?Sized>(&mut self, source: &S, query: &SlotQuery<'_>) -> Option<Arc<Item>> {
        TieredSelector::new(source, self.rules)
            .with_tier_weight_offset(self.settings.tier_weight_offset)
            .select(query, self.rng)
    }
}
