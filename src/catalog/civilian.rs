//! Civilian item pools built from equipment templates
//!
//! Each civilian template contributes its armor pieces to a pool keyed by
//! partition, rank (noble or commoner), gender and category. Templates with
//! a commoner prefix never feed the noble pool. Templates without a culture
//! are mapped through the configured identifier prefixes.

use ahash::AHashMap;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::sync::Arc;

use crate::catalog::index::Partition;
use crate::core::config::CivilianConfig;
use crate::core::types::{CultureId, Gender, ItemId};
use crate::items::{EquipmentTemplate, Item, ItemCategory};
use crate::rules::ItemRules;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CivilianRank {
    Noble,
    Commoner,
}

type PoolKey = (Partition, CivilianRank, Gender, ItemCategory);

#[derive(Debug, Clone, Default)]
pub struct CivilianPools {
    pools: AHashMap<PoolKey, Vec<Arc<Item>>>,
    templates: usize,
    unresolved: usize,
}

/// Culture named by the template, or inferred from its identifier prefix
pub fn template_culture(template: &EquipmentTemplate, config: &CivilianConfig) -> Option<CultureId> {
    if template.culture.is_some() {
        return template.culture.clone();
    }
    let id = template.id.to_lowercase();
    config
        .culture_prefixes
        .iter()
        .find(|p| id.starts_with(&p.prefix.to_lowercase()))
        .map(|p| p.culture.clone())
}

/// Rank a civilian template belongs to
pub fn template_rank(template: &EquipmentTemplate, config: &CivilianConfig) -> CivilianRank {
    let id = template.id.to_lowercase();
    let commoner = config
        .commoner_prefixes
        .iter()
        .any(|p| id.starts_with(&p.to_lowercase()));
    if template.noble && !commoner {
        CivilianRank::Noble
    } else {
        CivilianRank::Commoner
    }
}

impl CivilianPools {
    pub fn build(
        templates: &[EquipmentTemplate],
        items: &AHashMap<ItemId, Arc<Item>>,
        rules: &ItemRules,
        config: &CivilianConfig,
    ) -> Self {
        let mut pools = Self::default();

        for template in templates.iter().filter(|t| t.civilian) {
            let partition = match template_culture(template, config) {
                Some(culture) => Partition::Culture(culture),
                None => Partition::Neutral,
            };
            let rank = template_rank(template, config);
            let gender = if template.female { Gender::Female } else { Gender::Male };

            for id in &template.items {
                let Some(item) = items.get(id) else {
                    pools.unresolved += 1;
                    continue;
                };
                // Crowns are served from the crown pool
                if !item.category.is_armor() || rules.is_crown(item) {
                    continue;
                }
                let pool = pools
                    .pools
                    .entry((partition.clone(), rank, gender, item.category))
                    .or_default();
                if !pool.iter().any(|existing| existing.id == item.id) {
                    pool.push(Arc::clone(item));
                }
            }
            pools.templates += 1;
        }

        for pool in pools.pools.values_mut() {
            pool.sort_by_key(|item| (Reverse(OrderedFloat(item.appearance)), item.id.clone()));
        }

        if pools.unresolved > 0 {
            tracing::debug!("{} civilian template entries reference unknown items", pools.unresolved);
        }
        pools
    }

    /// Items of a pool, best-looking first
    pub fn pool(&self, partition: &Partition, rank: CivilianRank, gender: Gender, category: ItemCategory) -> &[Arc<Item>] {
        self.pools
            .get(&(partition.clone(), rank, gender, category))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Civilian templates that contributed to the pools
    pub fn template_count(&self) -> usize {
        self.templates
    }

    pub fn unresolved_entries(&self) -> usize {
        self.unresolved
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}
