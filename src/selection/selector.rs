//! Tiered fallback selection
//!
//! Search order for a query:
//!
//! 1. the sampled window, every filter active
//! 2. the same window without the appearance floor
//! 3. single tiers outward: one below, one above, then the remaining lower
//!    tiers descending and the remaining upper tiers ascending, each tried
//!    with and then without the appearance floor
//! 4. if the query names a relaxation, the full tier range with that filter
//!    dropped
//!
//! The first non-empty stage produces the candidate list.

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;

use crate::catalog::Partition;
use crate::core::types::Tier;
use crate::items::Item;
use crate::rules::ItemRules;
use crate::selection::query::{Relaxation, SelectionBias, SlotQuery, Strictness};
use crate::selection::source::CandidateSource;

pub struct TieredSelector<'a, S: CandidateSource + ?Sized> {
    source: &'a S,
    rules: &'a ItemRules,
    tier_weight_offset: u32,
}

impl<'a, S: CandidateSource + ?Sized> TieredSelector<'a, S> {
    pub fn new(source: &'a S, rules: &'a ItemRules) -> Self {
        Self {
            source,
            rules,
            tier_weight_offset: 1,
        }
    }

    pub fn with_tier_weight_offset(mut self, offset: u32) -> Self {
        self.tier_weight_offset = offset;
        self
    }

    /// Draw one item, or None once every stage is exhausted
    pub fn select<R: Rng + ?Sized>(&self, query: &SlotQuery<'_>, rng: &mut R) -> Option<Arc<Item>> {
        let candidates = self.candidates(query);
        self.pick(&candidates, query.bias, rng)
    }

    /// Candidate list of the first non-empty stage
    pub fn candidates(&self, query: &SlotQuery<'_>) -> Vec<Arc<Item>> {
        let (floor, ceiling) = self.source.tier_bounds();
        let window = query.window.clamp(floor, ceiling);
        let partitions = query.scope.partitions(self.source);

        let strict = Strictness { appearance: true, relaxed: false };
        let loose = Strictness { appearance: false, relaxed: false };

        for strictness in [strict, loose] {
            let found = self.gather(query, &partitions, window.tiers(), strictness);
            if !found.is_empty() {
                return found;
            }
        }

        for tier in window.fallback_tiers(floor, ceiling) {
            for strictness in [strict, loose] {
                let found = self.gather(query, &partitions, tier..=tier, strictness);
                if !found.is_empty() {
                    tracing::trace!("Fallback to tier {} for {:?}", tier, query.categories);
                    return found;
                }
            }
        }

        if query.relaxation != Relaxation::None {
            for appearance in [true, false] {
                let strictness = Strictness { appearance, relaxed: true };
                let found = self.gather(query, &partitions, floor..=ceiling, strictness);
                if !found.is_empty() {
                    tracing::debug!("Relaxed {:?} filter for {:?}", query.relaxation, query.categories);
                    return found;
                }
            }
        }

        Vec::new()
    }

    fn gather(
        &self,
        query: &SlotQuery<'_>,
        partitions: &[Partition],
        tiers: impl Iterator<Item = Tier>,
        strictness: Strictness,
    ) -> Vec<Arc<Item>> {
        let mut raw = Vec::new();
        for tier in tiers {
            for partition in partitions {
                for category in &query.categories {
                    self.source.collect(partition, tier, *category, &mut raw);
                }
            }
        }
        raw.retain(|item| query.accepts(item, self.rules, strictness));
        raw
    }

    fn pick<R: Rng + ?Sized>(&self, candidates: &[Arc<Item>], bias: SelectionBias, rng: &mut R) -> Option<Arc<Item>> {
        // All-zero or empty weights fall back to a uniform draw
        let weighted = match bias {
            SelectionBias::Uniform => None,
            SelectionBias::TierWeighted => {
                WeightedIndex::new(candidates.iter().map(|item| item.tier as u32 + self.tier_weight_offset))
                    .ok()
                    .map(|dist| dist.sample(rng))
            }
            SelectionBias::AppearanceWeighted => WeightedIndex::new(candidates.iter().map(|item| item.appearance.max(0.0)))
                .ok()
                .map(|dist| dist.sample(rng)),
        };
        match weighted {
            Some(i) => candidates.get(i).cloned(),
            None => candidates.choose(rng).cloned(),
        }
    }
}
