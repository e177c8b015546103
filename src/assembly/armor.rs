//! Armor slots and the crown path

use rand::Rng;
use std::sync::Arc;

use crate::assembly::equipment_set::EquipmentSlot;
use crate::assembly::Filler;
use crate::core::types::Gender;
use crate::items::{Item, ItemCategory};
use crate::rules::AppearanceContext;
use crate::selection::{CrownView, Relaxation, SelectionBias, SlotQuery};

impl<R: Rng + ?Sized> Filler<'_, R> {
    pub fn fill_armor(&mut self) {
        for slot in EquipmentSlot::ARMOR {
            let Some(category) = slot.armor_category() else {
                continue;
            };
            let item = match slot {
                EquipmentSlot::Head => self.find_battle_head(),
                EquipmentSlot::Cape if self.skips_cape() => {
                    tracing::trace!("{} goes without a cape", self.profile.name);
                    None
                }
                _ => self.find_armor(category),
            };
            if let Some(item) = item {
                self.set.set(slot, item);
            }
        }
    }

    /// Rolled before any tier sampling for the slot
    pub fn skips_cape(&mut self) -> bool {
        let chance = match self.profile.gender {
            Gender::Male => self.settings.cape_skip_chance_male,
            Gender::Female => self.settings.cape_skip_chance_female,
        };
        self.roll(chance)
    }

    fn armor_query<'q>(&mut self, category: ItemCategory) -> SlotQuery<'q> {
        let window = self.window();
        let bias = match category {
            ItemCategory::BodyArmor | ItemCategory::HeadArmor => SelectionBias::TierWeighted,
            _ => SelectionBias::Uniform,
        };
        SlotQuery::new(category, self.native(), window)
            .appearance(self.rules.appearance_threshold(AppearanceContext::Battle))
            .gender(self.profile.gender)
            .cloth(self.profile.level)
            .relax(Relaxation::Cloth)
            .bias(bias)
    }

    fn find_armor(&mut self, category: ItemCategory) -> Option<Arc<Item>> {
        let query = self.armor_query(category);
        self.select(&query)
    }

    /// Ruling characters may roll for a battle crown; everyone else draws
    /// from the regular head pool, which holds no crowns.
    fn find_battle_head(&mut self) -> Option<Arc<Item>> {
        if self.profile.is_ruling_faction_member() && self.roll(self.crown_chance) {
            let rules = self.rules;
            let gender = self.profile.gender;
            let wearable = move |item: &Item| rules.crown_allowed_in_battle(item, gender);
            let view = CrownView { index: self.index, gender };
            let window = self.window();
            let query = SlotQuery::new(ItemCategory::HeadArmor, self.native(), window)
                .filter(&wearable)
                .bias(SelectionBias::TierWeighted);
            if let Some(crown) = self.select_from(&view, &query) {
                tracing::debug!("{} wears {}", self.profile.name, crown.id);
                return Some(crown);
            }
        }
        self.find_armor(ItemCategory::HeadArmor)
    }
}
