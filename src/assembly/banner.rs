//! Banner slot
//!
//! The banner theme follows the character's dominant weapon skill and what
//! the finished weapon and mount slots actually hold. A theme whose context
//! requirement is not met is never chosen; the generic theme always is.

use rand::Rng;
use std::sync::Arc;

use crate::assembly::equipment_set::{EquipmentSet, EquipmentSlot};
use crate::assembly::Filler;
use crate::character::{CharacterProfile, Skill};
use crate::items::{BannerTheme, Item, ItemCategory};
use crate::selection::SlotQuery;

/// Equipment facts a banner theme may depend on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BannerContext {
    pub mounted: bool,
    pub ranged: bool,
    pub shield: bool,
}

impl BannerContext {
    pub fn of(set: &EquipmentSet) -> Self {
        Self {
            mounted: set.has_horse(),
            ranged: set.has_weapon(ItemCategory::is_ranged),
            shield: set.has_weapon(ItemCategory::is_shield),
        }
    }

    pub fn permits(&self, theme: BannerTheme) -> bool {
        ThemeRestriction::of(theme).is_met(self)
    }
}

/// What a theme demands of the bearer's equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeRestriction {
    None,
    Mounted,
    MountedRanged,
    Ranged,
    Shield,
}

impl ThemeRestriction {
    pub fn of(theme: BannerTheme) -> Self {
        match theme {
            BannerTheme::Generic | BannerTheme::Infantry => ThemeRestriction::None,
            BannerTheme::Cavalry => ThemeRestriction::Mounted,
            BannerTheme::HorseArcher => ThemeRestriction::MountedRanged,
            BannerTheme::Ranged => ThemeRestriction::Ranged,
            BannerTheme::ShieldWall => ThemeRestriction::Shield,
        }
    }

    pub fn is_met(self, context: &BannerContext) -> bool {
        match self {
            ThemeRestriction::None => true,
            ThemeRestriction::Mounted => context.mounted,
            ThemeRestriction::MountedRanged => context.mounted && context.ranged,
            ThemeRestriction::Ranged => context.ranged,
            ThemeRestriction::Shield => context.shield,
        }
    }
}

/// Highest weapon skill; earlier skills win ties
pub fn dominant_skill(profile: &CharacterProfile) -> Skill {
    let mut best = Skill::WEAPON_SKILLS[0];
    for skill in Skill::WEAPON_SKILLS {
        if profile.skills.get(skill) > profile.skills.get(best) {
            best = skill;
        }
    }
    best
}

/// Themes to try, best match first, ending with the generic theme
pub fn theme_preferences(dominant: Skill, context: &BannerContext) -> Vec<BannerTheme> {
    let mut themes = Vec::new();
    if dominant.is_ranged() {
        themes.push(BannerTheme::HorseArcher);
        themes.push(BannerTheme::Ranged);
    }
    themes.push(BannerTheme::Cavalry);
    if matches!(dominant, Skill::OneHanded | Skill::Polearm) {
        themes.push(BannerTheme::ShieldWall);
    }
    themes.push(BannerTheme::Infantry);
    themes.retain(|theme| context.permits(*theme));
    themes.push(BannerTheme::Generic);
    themes
}

impl<R: Rng + ?Sized> Filler<'_, R> {
    /// Called after weapons and mount so the context reflects the final set
    pub fn fill_banner(&mut self) {
        if self.profile.level < self.settings.banner_min_level {
            return;
        }
        let context = BannerContext::of(&self.set);
        let dominant = dominant_skill(self.profile);
        for theme in theme_preferences(dominant, &context) {
            if let Some(banner) = self.find_banner(theme) {
                tracing::debug!("{} carries a {} banner", self.profile.name, theme);
                self.set.set(EquipmentSlot::Banner, banner);
                return;
            }
        }
    }

    fn find_banner(&mut self, theme: BannerTheme) -> Option<Arc<Item>> {
        let themed = move |item: &Item| item.banner_theme() == Some(theme);
        let window = self.window();
        let query = SlotQuery::new(ItemCategory::Banner, self.native(), window).filter(&themed);
        self.select(&query)
    }
}
