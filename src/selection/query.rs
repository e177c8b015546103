//! Slot queries: what to look for and which filters apply

use crate::catalog::Partition;
use crate::core::types::{CultureId, Gender};
use crate::items::{Item, ItemCategory};
use crate::rules::{is_weapon_usable_on_mount, passes_appearance, ItemRules};
use crate::selection::source::CandidateSource;
use crate::selection::tier_window::TierWindow;

/// Which culture partitions a query may draw from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CultureScope {
    /// The character's culture plus the neutral partition
    Native(CultureId),
    /// Every partition in the source
    Everywhere,
}

impl CultureScope {
    pub fn partitions<S: CandidateSource + ?Sized>(&self, source: &S) -> Vec<Partition> {
        match self {
            CultureScope::Native(culture) => vec![Partition::Culture(culture.clone()), Partition::Neutral],
            CultureScope::Everywhere => source.partitions(),
        }
    }
}

/// Filter dropped in the last fallback stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Relaxation {
    #[default]
    None,
    Cloth,
    Mount,
    /// The extra predicate becomes a preference
    Filter,
}

/// How one candidate is drawn from a non-empty list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionBias {
    #[default]
    Uniform,
    /// Weight = tier + configured offset
    TierWeighted,
    /// Weight = appearance rating
    AppearanceWeighted,
}

/// One slot lookup
#[derive(Clone)]
pub struct SlotQuery<'a> {
    pub categories: Vec<ItemCategory>,
    pub scope: CultureScope,
    pub window: TierWindow,
    /// Exclusive lower bound on appearance, dropped first when nothing matches
    pub appearance_floor: Option<f32>,
    pub gender: Option<Gender>,
    /// Character level for the cloth exclusion
    pub cloth_level: Option<u32>,
    /// Mount compatibility; the flag allows two-handed polearms
    pub mount: Option<bool>,
    pub predicate: Option<&'a dyn Fn(&Item) -> bool>,
    pub relaxation: Relaxation,
    pub bias: SelectionBias,
}

/// Which optional filters are active for one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Strictness {
    pub appearance: bool,
    pub relaxed: bool,
}

impl<'a> SlotQuery<'a> {
    pub fn new(category: ItemCategory, scope: CultureScope, window: TierWindow) -> Self {
        Self {
            categories: vec![category],
            scope,
            window,
            appearance_floor: None,
            gender: None,
            cloth_level: None,
            mount: None,
            predicate: None,
            relaxation: Relaxation::None,
            bias: SelectionBias::Uniform,
        }
    }

    /// Search several categories at once
    pub fn any_of(categories: &[ItemCategory], scope: CultureScope, window: TierWindow) -> Self {
        let mut query = Self::new(ItemCategory::OneHandedSword, scope, window);
        query.categories = categories.to_vec();
        query
    }

    pub fn appearance(mut self, floor: f32) -> Self {
        self.appearance_floor = Some(floor);
        self
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn cloth(mut self, level: u32) -> Self {
        self.cloth_level = Some(level);
        self
    }

    pub fn mounted(mut self, allow_polearms: bool) -> Self {
        self.mount = Some(allow_polearms);
        self
    }

    pub fn filter(mut self, predicate: &'a dyn Fn(&Item) -> bool) -> Self {
        self.predicate = Some(predicate);
        self
    }

    pub fn relax(mut self, relaxation: Relaxation) -> Self {
        self.relaxation = relaxation;
        self
    }

    pub fn bias(mut self, bias: SelectionBias) -> Self {
        self.bias = bias;
        self
    }

    pub fn scope(mut self, scope: CultureScope) -> Self {
        self.scope = scope;
        self
    }

    pub(crate) fn accepts(&self, item: &Item, rules: &ItemRules, strictness: Strictness) -> bool {
        if let Some(gender) = self.gender {
            if !rules.is_gender_suitable(item, gender) {
                return false;
            }
        }
        if let Some(level) = self.cloth_level {
            let relaxed = strictness.relaxed && self.relaxation == Relaxation::Cloth;
            if !relaxed && !rules.cloth_permitted(item, level) {
                return false;
            }
        }
        if let Some(allow_polearms) = self.mount {
            let relaxed = strictness.relaxed && self.relaxation == Relaxation::Mount;
            if !relaxed && !is_weapon_usable_on_mount(item, allow_polearms) {
                return false;
            }
        }
        if let Some(predicate) = self.predicate {
            let relaxed = strictness.relaxed && self.relaxation == Relaxation::Filter;
            if !relaxed && !predicate(item) {
                return false;
            }
        }
        match self.appearance_floor {
            Some(floor) if strictness.appearance => passes_appearance(item, floor),
            _ => true,
        }
    }
}

impl std::fmt::Debug for SlotQuery<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotQuery")
            .field("categories", &self.categories)
            .field("scope", &self.scope)
            .field("window", &self.window)
            .field("appearance_floor", &self.appearance_floor)
            .field("gender", &self.gender)
            .field("cloth_level", &self.cloth_level)
            .field("mount", &self.mount)
            .field("predicate", &self.predicate.is_some())
            .field("relaxation", &self.relaxation)
            .field("bias", &self.bias)
            .finish()
    }
}
