//! Horse and harness slots

use rand::Rng;
use std::sync::Arc;

use crate::assembly::equipment_set::{EquipmentSlot, SlotDiagnostic};
use crate::assembly::Filler;
use crate::items::{Item, ItemCategory};
use crate::rules::AppearanceContext;
use crate::selection::{CultureScope, Relaxation, SelectionBias, SlotQuery};

impl<R: Rng + ?Sized> Filler<'_, R> {
    /// Horse first; a harness only once a horse is in place
    pub fn fill_mount(&mut self) {
        let Some(horse) = self.find_horse() else {
            tracing::debug!("No horse for {}", self.profile.name);
            return;
        };
        self.set.set(EquipmentSlot::Horse, Arc::clone(&horse));

        match self.find_harness() {
            Some(harness) => self.set.set(EquipmentSlot::Harness, harness),
            None => self
                .set
                .push_diagnostic(SlotDiagnostic::MissingHarness { horse: horse.id.clone() }),
        }
    }

    /// Combat mounts over every tier; a pack animal only when none exist
    fn find_horse(&mut self) -> Option<Arc<Item>> {
        let rules = self.rules;
        let combat = move |item: &Item| rules.is_combat_mount(item);
        let window = self.window();
        let query = SlotQuery::new(ItemCategory::Horse, self.native(), window)
            .appearance(self.rules.appearance_threshold(AppearanceContext::Battle))
            .filter(&combat)
            .relax(Relaxation::Filter)
            .bias(SelectionBias::TierWeighted);
        let found = self.select(&query);
        if let Some(horse) = &found {
            if !rules.is_combat_mount(horse) {
                tracing::debug!("{} rides pack animal {}", self.profile.name, horse.id);
            }
        }
        found
    }

    /// Native and neutral harnesses over every tier, then any culture's
    fn find_harness(&mut self) -> Option<Arc<Item>> {
        let rules = self.rules;
        let combat = move |item: &Item| rules.is_combat_harness(item);
        let window = self.window();
        let query = SlotQuery::new(ItemCategory::HorseHarness, self.native(), window)
            .appearance(self.rules.appearance_threshold(AppearanceContext::Battle))
            .filter(&combat);
        if let Some(harness) = self.select(&query) {
            return Some(harness);
        }
        let found = self.select(&query.scope(CultureScope::Everywhere));
        if found.is_some() {
            tracing::debug!("Harness for {} taken from a foreign culture", self.profile.name);
        }
        found
    }
}
