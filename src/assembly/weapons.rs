//! Weapon slot layouts
//!
//! Layout decisions follow what was actually placed, not only what was
//! planned: a polearm that could not be found does not demand a sidearm, and
//! a ranged weapon without ammunition is not placed at all.

use rand::Rng;
use std::sync::Arc;

use crate::assembly::equipment_set::{EquipmentSlot, SlotDiagnostic};
use crate::assembly::Filler;
use crate::items::{Item, ItemCategory};
use crate::loadout::{LoadoutShape, WeaponLoadoutPlan};
use crate::rules::is_couchable_polearm;
use crate::selection::{CultureScope, Relaxation, SlotQuery};

impl<R: Rng + ?Sized> Filler<'_, R> {
    pub fn fill_weapons(&mut self, plan: &WeaponLoadoutPlan) {
        match plan.shape {
            LoadoutShape::RangedWithPolearm { ranged, polearm } => {
                self.place_ranged(ranged);
                match self.find_polearm(&[polearm]) {
                    Some(polearm) => {
                        self.set.set(EquipmentSlot::Weapon2, Arc::clone(&polearm));
                        self.pair_sidearm(EquipmentSlot::Weapon3, &polearm, plan.sidearm);
                    }
                    None => {
                        if let Some(sidearm) = self.find_sidearm(plan.sidearm) {
                            self.set.set(EquipmentSlot::Weapon2, sidearm);
                        }
                    }
                }
            }
            LoadoutShape::Ranged { ranged, melee, shield } => {
                let placed = self.place_ranged(ranged);
                if let Some(melee) = self.find_primary(melee) {
                    self.set.set(EquipmentSlot::Weapon2, melee);
                }
                if placed && ranged == ItemCategory::Bow {
                    // Second quiver
                    if let Some(ammo) = self.find_ammo(ItemCategory::Arrows) {
                        self.set.set(EquipmentSlot::Weapon3, ammo);
                    }
                } else if shield && !self.primary_is_two_handed() {
                    if let Some(shield) = self.find_shield() {
                        self.set.set(EquipmentSlot::Weapon3, shield);
                    }
                }
            }
            LoadoutShape::ThrowingWithPolearm {
                throwing,
                polearm,
                shield,
            } => match self.find_polearm(&[polearm]) {
                Some(polearm) => self.fill_throwing_with_polearm(plan, throwing, polearm, shield),
                None => {
                    let primary = self.find_primary(plan.sidearm);
                    self.fill_throwing(primary, throwing, shield);
                }
            },
            LoadoutShape::Throwing {
                throwing,
                melee,
                shield,
            } => {
                let primary = self.find_primary(melee);
                self.fill_throwing(primary, throwing, shield);
            }
            LoadoutShape::Melee { melee, shield } => self.fill_melee(plan, melee, shield),
        }
    }

    fn fill_throwing_with_polearm(
        &mut self,
        plan: &WeaponLoadoutPlan,
        throwing: ItemCategory,
        polearm: Arc<Item>,
        shield: bool,
    ) {
        self.set.set(EquipmentSlot::Weapon0, Arc::clone(&polearm));

        if shield && !polearm.category.is_two_handed_melee() {
            if let Some(shield) = self.find_shield() {
                self.set.set(EquipmentSlot::Weapon1, shield);
                if let Some(thrown) = self.find_throwing(throwing) {
                    self.set.set(EquipmentSlot::Weapon2, thrown);
                }
                self.pair_sidearm(EquipmentSlot::Weapon3, &polearm, plan.sidearm);
                return;
            }
        }

        self.pair_sidearm(EquipmentSlot::Weapon1, &polearm, plan.sidearm);
        self.place_throwing_pair(throwing);
    }

    fn fill_throwing(&mut self, primary: Option<Arc<Item>>, throwing: ItemCategory, shield: bool) {
        if let Some(primary) = primary {
            self.set.set(EquipmentSlot::Weapon0, primary);
        }
        if shield && !self.primary_is_two_handed() {
            if let Some(shield) = self.find_shield() {
                self.set.set(EquipmentSlot::Weapon1, shield);
            }
        }
        self.place_throwing_pair(throwing);
    }

    fn fill_melee(&mut self, plan: &WeaponLoadoutPlan, melee: ItemCategory, shield: bool) {
        let primary = self.find_primary(melee);
        if let Some(primary) = &primary {
            self.set.set(EquipmentSlot::Weapon0, Arc::clone(primary));
        }

        let mut next = EquipmentSlot::Weapon1;
        let one_handed = primary.as_ref().is_some_and(|p| !p.category.is_two_handed_melee());
        if shield && one_handed {
            if let Some(shield) = self.find_shield() {
                self.set.set(EquipmentSlot::Weapon1, shield);
                next = EquipmentSlot::Weapon2;
            }
        }

        match primary {
            Some(polearm) if polearm.category.is_polearm() => {
                self.pair_sidearm(next, &polearm, plan.sidearm);
            }
            _ => {
                let Some(secondary) = self.find_polearm(&ItemCategory::POLEARMS) else {
                    return;
                };
                self.set.set(EquipmentSlot::Weapon2, Arc::clone(&secondary));
                if !self.pair_sidearm(EquipmentSlot::Weapon3, &secondary, plan.sidearm) {
                    // An optional polearm is not worth an unpaired set
                    self.set.take(EquipmentSlot::Weapon2);
                }
            }
        }
    }

    /// Ranged weapon in slot 0 and its ammunition in slot 1, or nothing
    fn place_ranged(&mut self, ranged: ItemCategory) -> bool {
        let Some(weapon) = self.find_weapon(&[ranged], false) else {
            tracing::debug!("No {} for {}", ranged, self.profile.name);
            return false;
        };
        let Some(ammo_category) = ranged.ammo_for() else {
            return false;
        };
        match self.find_ammo(ammo_category) {
            Some(ammo) => {
                self.set.set(EquipmentSlot::Weapon0, weapon);
                self.set.set(EquipmentSlot::Weapon1, ammo);
                true
            }
            None => {
                self.set.push_diagnostic(SlotDiagnostic::MissingAmmo {
                    weapon: weapon.id.clone(),
                    ammo: ammo_category,
                });
                false
            }
        }
    }

    /// One throwing item shared by slots 2 and 3
    fn place_throwing_pair(&mut self, throwing: ItemCategory) {
        if let Some(thrown) = self.find_throwing(throwing) {
            self.set.set(EquipmentSlot::Weapon2, Arc::clone(&thrown));
            self.set.set(EquipmentSlot::Weapon3, thrown);
        }
    }

    /// Sidearm for a polearm. Records a diagnostic when the catalog has none.
    fn pair_sidearm(&mut self, slot: EquipmentSlot, polearm: &Arc<Item>, preferred: ItemCategory) -> bool {
        match self.find_sidearm(preferred) {
            Some(sidearm) => {
                self.set.set(slot, sidearm);
                true
            }
            None => {
                self.set.push_diagnostic(SlotDiagnostic::MissingSidearm {
                    polearm: polearm.id.clone(),
                });
                false
            }
        }
    }

    fn primary_is_two_handed(&self) -> bool {
        self.set
            .primary_melee()
            .is_some_and(|item| item.category.is_two_handed_melee())
    }

    /// Weapon query with the mount filter when riding
    fn weapon_query<'q>(&mut self, categories: &[ItemCategory], allow_polearms: bool) -> SlotQuery<'q> {
        let window = self.window();
        let query = SlotQuery::any_of(categories, self.native(), window);
        if self.request.mounted {
            query.mounted(allow_polearms)
        } else {
            query
        }
    }

    fn find_weapon(&mut self, categories: &[ItemCategory], allow_polearms: bool) -> Option<Arc<Item>> {
        let query = self.weapon_query(categories, allow_polearms);
        self.select(&query)
    }

    /// Planned melee category, or any sidearm when none exists
    fn find_primary(&mut self, category: ItemCategory) -> Option<Arc<Item>> {
        let found = if category.is_polearm() {
            self.find_polearm(&[category])
        } else {
            self.find_weapon(&[category], false)
        };
        found.or_else(|| {
            tracing::debug!("No {} for {}, falling back to a sidearm", category, self.profile.name);
            self.find_weapon(&ItemCategory::SIDEARMS, false)
        })
    }

    /// Mounted characters prefer lances
    fn find_polearm(&mut self, categories: &[ItemCategory]) -> Option<Arc<Item>> {
        if self.request.mounted {
            let couchable = |item: &Item| is_couchable_polearm(item);
            let query = self.weapon_query(categories, true).filter(&couchable);
            if let Some(lance) = self.select(&query) {
                return Some(lance);
            }
        }
        self.find_weapon(categories, true)
    }

    /// Exhaustive sidearm search.
    ///
    /// Preferred category over every tier, then every sidearm category with
    /// the mount filter relaxed last, then every culture.
    fn find_sidearm(&mut self, preferred: ItemCategory) -> Option<Arc<Item>> {
        let query = self.weapon_query(&[preferred], false);
        if let Some(sidearm) = self.select(&query) {
            return Some(sidearm);
        }

        let query = self
            .weapon_query(&ItemCategory::SIDEARMS, false)
            .relax(Relaxation::Mount);
        if let Some(sidearm) = self.select(&query) {
            return Some(sidearm);
        }

        let query = query.scope(CultureScope::Everywhere);
        let found = self.select(&query);
        if found.is_some() {
            tracing::debug!("Sidearm for {} taken from a foreign culture", self.profile.name);
        }
        found
    }

    fn find_shield(&mut self) -> Option<Arc<Item>> {
        self.find_weapon(&[ItemCategory::Shield], false)
    }

    fn find_throwing(&mut self, category: ItemCategory) -> Option<Arc<Item>> {
        self.find_weapon(&[category], false)
    }

    /// Native ammunition first, any culture's otherwise
    fn find_ammo(&mut self, category: ItemCategory) -> Option<Arc<Item>> {
        let window = self.window();
        let query = SlotQuery::new(category, self.native(), window);
        self.select(&query)
            .or_else(|| self.select(&query.clone().scope(CultureScope::Everywhere)))
    }
}
