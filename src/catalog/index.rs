//! Immutable catalog index
//!
//! Items are bucketed under a single composite key
//! `(partition, tier, category)`. A culture-specific item lands only in its
//! culture's partition; culture-neutral items land only in the neutral
//! partition. Crowns are diverted into their own per-gender pool and never
//! appear in the regular head-armor buckets.

use ahash::AHashMap;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::catalog::civilian::CivilianPools;
use crate::core::config::CivilianConfig;
use crate::core::types::{CultureId, Gender, ItemId, Tier, NATIVE_MAX_TIER, NATIVE_MIN_TIER};
use crate::items::{EquipmentTemplate, Item, ItemCategory};
use crate::rules::{ItemRules, Rejection};

/// Culture partition of the index
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Partition {
    Neutral,
    Culture(CultureId),
}

impl Partition {
    pub fn of(item: &Item) -> Self {
        match &item.culture {
            Some(culture) => Partition::Culture(culture.clone()),
            None => Partition::Neutral,
        }
    }
}

type BucketKey = (Partition, Tier, ItemCategory);

/// Counters gathered while building
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub indexed: usize,
    pub crowns: usize,
    pub duplicates: usize,
    pub rejected: AHashMap<Rejection, usize>,
    pub civilian_templates: usize,
}

impl IndexStats {
    pub fn rejected_total(&self) -> usize {
        self.rejected.values().sum()
    }
}

#[derive(Debug, Clone)]
pub struct CatalogIndex {
    buckets: AHashMap<BucketKey, Vec<Arc<Item>>>,
    crowns: AHashMap<(Partition, Gender), Vec<Arc<Item>>>,
    by_id: AHashMap<ItemId, Arc<Item>>,
    civilian: CivilianPools,
    cultures: Vec<CultureId>,
    tier_floor: Tier,
    tier_ceiling: Tier,
    stats: IndexStats,
}

impl CatalogIndex {
    /// Index with no items. Every lookup comes back empty.
    pub fn empty() -> Self {
        Self {
            buckets: AHashMap::new(),
            crowns: AHashMap::new(),
            by_id: AHashMap::new(),
            civilian: CivilianPools::default(),
            cultures: Vec::new(),
            tier_floor: NATIVE_MIN_TIER,
            tier_ceiling: NATIVE_MAX_TIER,
            stats: IndexStats::default(),
        }
    }

    /// One pass over the raw items, then the civilian templates
    pub fn build(
        items: Vec<Item>,
        templates: &[EquipmentTemplate],
        rules: &ItemRules,
        civilian: &CivilianConfig,
    ) -> Self {
        let mut index = Self::empty();
        let mut cultures = BTreeSet::new();
        let mut tiers: Option<(Tier, Tier)> = None;

        for item in items {
            if let Some(reason) = rules.rejection(&item) {
                tracing::trace!("Rejected {} ({})", item.id, reason);
                *index.stats.rejected.entry(reason).or_insert(0) += 1;
                continue;
            }
            if index.by_id.contains_key(&item.id) {
                tracing::debug!("Duplicate item id {} ignored", item.id);
                index.stats.duplicates += 1;
                continue;
            }

            let item = Arc::new(item);
            let partition = Partition::of(&item);
            if let Some(culture) = &item.culture {
                cultures.insert(culture.clone());
            }
            tiers = Some(match tiers {
                Some((lo, hi)) => (lo.min(item.tier), hi.max(item.tier)),
                None => (item.tier, item.tier),
            });
            index.by_id.insert(item.id.clone(), Arc::clone(&item));

            if rules.is_crown(&item) {
                index.insert_crown(partition, &item, rules);
                continue;
            }

            index
                .buckets
                .entry((partition, item.tier, item.category))
                .or_default()
                .push(Arc::clone(&item));
            index.stats.indexed += 1;
        }

        index.cultures = cultures.into_iter().collect();
        if let Some((floor, ceiling)) = tiers {
            index.tier_floor = floor;
            index.tier_ceiling = ceiling;
        }
        index.civilian = CivilianPools::build(templates, &index.by_id, rules, civilian);
        index.stats.civilian_templates = index.civilian.template_count();
        index
    }

    fn insert_crown(&mut self, partition: Partition, item: &Arc<Item>, rules: &ItemRules) {
        for gender in [Gender::Male, Gender::Female] {
            let eligible = if rules.is_crown_exception(item) {
                rules.crown_allowed_in_battle(item, gender)
            } else {
                rules.is_gender_suitable(item, gender)
            };
            if eligible {
                self.crowns
                    .entry((partition.clone(), gender))
                    .or_default()
                    .push(Arc::clone(item));
            }
        }
        self.stats.crowns += 1;
    }

    pub fn bucket(&self, partition: &Partition, tier: Tier, category: ItemCategory) -> &[Arc<Item>] {
        // Partition clone is needed to form the composite key
        self.buckets
            .get(&(partition.clone(), tier, category))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Crowns of one partition wearable by the given gender
    pub fn crowns(&self, partition: &Partition, gender: Gender) -> &[Arc<Item>] {
        self.crowns
            .get(&(partition.clone(), gender))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn get(&self, id: &ItemId) -> Option<&Arc<Item>> {
        self.by_id.get(id)
    }

    /// Number of valid items, crowns included
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Lowest and highest tier present
    pub fn tier_bounds(&self) -> (Tier, Tier) {
        (self.tier_floor, self.tier_ceiling)
    }

    /// Known cultures, sorted
    pub fn cultures(&self) -> &[CultureId] {
        &self.cultures
    }

    /// Neutral first, then every culture in sorted order
    pub fn partitions(&self) -> Vec<Partition> {
        std::iter::once(Partition::Neutral)
            .chain(self.cultures.iter().cloned().map(Partition::Culture))
            .collect()
    }

    /// Items of a category in a partition, all tiers
    pub fn count(&self, partition: &Partition, category: ItemCategory) -> usize {
        (self.tier_floor..=self.tier_ceiling)
            .map(|tier| self.bucket(partition, tier, category).len())
            .sum()
    }

    /// Items of a category across every partition and tier
    pub fn count_all(&self, category: ItemCategory) -> usize {
        self.partitions().iter().map(|p| self.count(p, category)).sum()
    }

    pub fn civilian(&self) -> &CivilianPools {
        &self.civilian
    }

    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::EquipConfig;
    use crate::items::{ArmorMaterial, ArmorStats, WeaponStats};

    fn build(items: Vec<Item>) -> CatalogIndex {
        let config = EquipConfig::default();
        CatalogIndex::build(items, &[], &ItemRules::new(&config), &config.civilian)
    }

    fn axe(id: &str, tier: Tier) -> Item {
        Item::new(id, "Axe", ItemCategory::OneHandedAxe, tier).with_weapon(WeaponStats::melee(70, 0))
    }

    fn helm(id: &str, name: &str) -> Item {
        Item::new(id, name, ItemCategory::HeadArmor, 5).with_armor(ArmorStats::new(ArmorMaterial::Plate).head(45))
    }

    #[test]
    fn test_culture_and_neutral_partitions_are_disjoint() {
        let index = build(vec![axe("sturgian_axe", 3).with_culture("sturgia"), axe("plain_axe", 3)]);
        let sturgia = Partition::Culture(CultureId::new("sturgia"));

        let native = index.bucket(&sturgia, 3, ItemCategory::OneHandedAxe);
        assert_eq!(native.len(), 1);
        assert_eq!(native[0].id.as_str(), "sturgian_axe");

        let neutral = index.bucket(&Partition::Neutral, 3, ItemCategory::OneHandedAxe);
        assert_eq!(neutral.len(), 1);
        assert_eq!(neutral[0].id.as_str(), "plain_axe");
    }

    #[test]
    fn test_invalid_items_skipped() {
        let index = build(vec![axe("good_axe", 2), axe("dummy_axe", 2), axe("boulder", 2)]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.stats().rejected_total(), 2);
        assert_eq!(index.stats().rejected.get(&Rejection::DenylistedId), Some(&1));
    }

    #[test]
    fn test_duplicates_ignored() {
        let index = build(vec![axe("axe", 2), axe("axe", 3)]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.stats().duplicates, 1);
        assert_eq!(index.get(&ItemId::new("axe")).map(|i| i.tier), Some(2));
    }

    #[test]
    fn test_crowns_diverted_from_head_pool() {
        let index = build(vec![
            helm("sturgian_battle_crown", "Battle Crown").with_culture("sturgia"),
            helm("sturgian_helmet", "Spangenhelm").with_culture("sturgia"),
        ]);
        let sturgia = Partition::Culture(CultureId::new("sturgia"));

        let head = index.bucket(&sturgia, 5, ItemCategory::HeadArmor);
        assert_eq!(head.len(), 1);
        assert_eq!(head[0].id.as_str(), "sturgian_helmet");

        assert_eq!(index.crowns(&sturgia, Gender::Male).len(), 1);
        assert_eq!(index.crowns(&sturgia, Gender::Female).len(), 1);
        assert_eq!(index.stats().crowns, 1);
    }

    #[test]
    fn test_exception_crown_single_gender() {
        let index = build(vec![helm("imperial_diadem", "Diadem").with_culture("empire")]);
        let empire = Partition::Culture(CultureId::new("empire"));
        assert!(index.crowns(&empire, Gender::Male).is_empty());
        assert_eq!(index.crowns(&empire, Gender::Female).len(), 1);
    }

    #[test]
    fn test_tier_bounds_follow_content() {
        let index = build(vec![axe("a", 2), axe("b", 9)]);
        assert_eq!(index.tier_bounds(), (2, 9));
        assert_eq!(CatalogIndex::empty().tier_bounds(), (NATIVE_MIN_TIER, NATIVE_MAX_TIER));
    }

    #[test]
    fn test_partitions_and_counts() {
        let index = build(vec![
            axe("v_axe", 1).with_culture("vlandia"),
            axe("a_axe", 2).with_culture("aserai"),
            axe("n_axe", 2),
            axe("n_axe2", 4),
        ]);
        let partitions = index.partitions();
        assert_eq!(partitions[0], Partition::Neutral);
        assert_eq!(partitions[1], Partition::Culture(CultureId::new("aserai")));
        assert_eq!(partitions[2], Partition::Culture(CultureId::new("vlandia")));
        assert_eq!(index.count(&Partition::Neutral, ItemCategory::OneHandedAxe), 2);
        assert_eq!(index.count_all(ItemCategory::OneHandedAxe), 4);
        assert_eq!(index.count_all(ItemCategory::Bow), 0);
    }
}
