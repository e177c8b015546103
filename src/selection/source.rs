//! Candidate sources the selector can search
//!
//! The selector only needs three things from a pool of items: its tier
//! bounds, the partitions it holds, and the items at one
//! `(partition, tier, category)` coordinate.

use std::sync::Arc;

use crate::catalog::{CatalogIndex, CivilianRank, Partition};
use crate::core::types::{Gender, Tier};
use crate::items::{Item, ItemCategory};

pub trait CandidateSource {
    /// Lowest and highest tier worth searching
    fn tier_bounds(&self) -> (Tier, Tier);

    /// Every partition, neutral first
    fn partitions(&self) -> Vec<Partition>;

    /// Append the items stored at one coordinate
    fn collect(&self, partition: &Partition, tier: Tier, category: ItemCategory, out: &mut Vec<Arc<Item>>);
}

impl CandidateSource for CatalogIndex {
    fn tier_bounds(&self) -> (Tier, Tier) {
        CatalogIndex::tier_bounds(self)
    }

    fn partitions(&self) -> Vec<Partition> {
        CatalogIndex::partitions(self)
    }

    fn collect(&self, partition: &Partition, tier: Tier, category: ItemCategory, out: &mut Vec<Arc<Item>>) {
        out.extend(self.bucket(partition, tier, category).iter().cloned());
    }
}

/// Crown pool of one gender
#[derive(Debug, Clone, Copy)]
pub struct CrownView<'a> {
    pub index: &'a CatalogIndex,
    pub gender: Gender,
}

impl CandidateSource for CrownView<'_> {
    fn tier_bounds(&self) -> (Tier, Tier) {
        self.index.tier_bounds()
    }

    fn partitions(&self) -> Vec<Partition> {
        self.index.partitions()
    }

    fn collect(&self, partition: &Partition, tier: Tier, category: ItemCategory, out: &mut Vec<Arc<Item>>) {
        if category != ItemCategory::HeadArmor {
            return;
        }
        out.extend(
            self.index
                .crowns(partition, self.gender)
                .iter()
                .filter(|item| item.tier == tier)
                .cloned(),
        );
    }
}

/// Civilian template pool of one rank and gender
#[derive(Debug, Clone, Copy)]
pub struct CivilianView<'a> {
    pub index: &'a CatalogIndex,
    pub rank: CivilianRank,
    pub gender: Gender,
}

impl CandidateSource for CivilianView<'_> {
    fn tier_bounds(&self) -> (Tier, Tier) {
        self.index.tier_bounds()
    }

    fn partitions(&self) -> Vec<Partition> {
        self.index.partitions()
    }

    fn collect(&self, partition: &Partition, tier: Tier, category: ItemCategory, out: &mut Vec<Arc<Item>>) {
        out.extend(
            self.index
                .civilian()
                .pool(partition, self.rank, self.gender, category)
                .iter()
                .filter(|item| item.tier == tier)
                .cloned(),
        );
    }
}
