//! Tier windows and their random expansion

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use std::ops::RangeInclusive;

use crate::core::error::{LoadoutError, Result};
use crate::core::types::Tier;
use crate::rules::tier_range_for_level;

/// Inclusive tier bounds for one slot lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TierWindow {
    pub min: Tier,
    pub max: Tier,
}

impl TierWindow {
    pub fn new(min: Tier, max: Tier) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Window from the level band table
    pub fn for_level(level: u32) -> Self {
        let (min, max) = tier_range_for_level(level);
        Self::new(min, max)
    }

    /// Widen both bounds by `by` tiers
    pub fn expand(self, by: u8) -> Self {
        Self {
            min: self.min.saturating_sub(by),
            max: self.max.saturating_add(by),
        }
    }

    /// Pull both bounds inside `floor..=ceiling`
    pub fn clamp(self, floor: Tier, ceiling: Tier) -> Self {
        let (floor, ceiling) = if floor <= ceiling { (floor, ceiling) } else { (ceiling, floor) };
        Self::new(self.min.clamp(floor, ceiling), self.max.clamp(floor, ceiling))
    }

    pub fn contains(&self, tier: Tier) -> bool {
        (self.min..=self.max).contains(&tier)
    }

    pub fn tiers(&self) -> RangeInclusive<Tier> {
        self.min..=self.max
    }

    /// Single tiers to try once the window itself comes up empty.
    ///
    /// One below, one above, then the rest of the lower tiers descending and
    /// the rest of the upper tiers ascending. Tiers outside
    /// `floor..=ceiling` are never produced.
    pub fn fallback_tiers(&self, floor: Tier, ceiling: Tier) -> Vec<Tier> {
        let mut below = (floor..self.min.max(floor)).rev();
        let mut above = (self.max.saturating_add(1).max(floor)..=ceiling).filter(|t| *t > self.max);

        let mut tiers = Vec::new();
        tiers.extend(below.next());
        tiers.extend(above.next());
        tiers.extend(below);
        tiers.extend(above);
        tiers
    }
}

/// Discrete distribution over window expansion amounts
#[derive(Debug, Clone, PartialEq)]
pub struct ExpansionTable {
    entries: Vec<(u8, f64)>,
}

impl ExpansionTable {
    /// `(expansion, weight)` pairs. Weights need not sum to one.
    pub fn new(entries: Vec<(u8, f64)>) -> Result<Self> {
        WeightedIndex::new(entries.iter().map(|(_, w)| *w))
            .map_err(|e| LoadoutError::InvalidConfig(format!("tier expansion table: {}", e)))?;
        Ok(Self { entries })
    }

    /// Always expand by the same amount
    pub fn fixed(by: u8) -> Self {
        Self { entries: vec![(by, 1.0)] }
    }

    pub fn entries(&self) -> &[(u8, f64)] {
        &self.entries
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        match WeightedIndex::new(self.entries.iter().map(|(_, w)| *w)) {
            Ok(dist) => self.entries[dist.sample(rng)].0,
            Err(_) => 0,
        }
    }
}

impl Default for ExpansionTable {
    /// No change 70%, one tier 20%, two tiers 10%
    fn default() -> Self {
        Self {
            entries: vec![(0, 0.7), (1, 0.2), (2, 0.1)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_window_for_level() {
        assert_eq!(TierWindow::for_level(12), TierWindow::new(3, 4));
        assert_eq!(TierWindow::for_level(22), TierWindow::new(5, 6));
        assert_eq!(TierWindow::for_level(1), TierWindow::new(1, 2));
    }

    #[test]
    fn test_expand_and_clamp() {
        let window = TierWindow::new(1, 2).expand(2);
        assert_eq!(window, TierWindow::new(0, 4));
        assert_eq!(TierWindow::new(5, 6).expand(2).clamp(0, 6), TierWindow::new(3, 6));
        // Window entirely above the catalog collapses onto the ceiling
        assert_eq!(TierWindow::new(5, 6).clamp(0, 3), TierWindow::new(3, 3));
    }

    #[test]
    fn test_fallback_order() {
        let window = TierWindow::new(3, 4);
        assert_eq!(window.fallback_tiers(0, 6), vec![2, 5, 1, 0, 6]);
        assert_eq!(TierWindow::new(0, 1).fallback_tiers(0, 6), vec![2, 3, 4, 5, 6]);
        assert_eq!(TierWindow::new(5, 6).fallback_tiers(0, 6), vec![4, 3, 2, 1, 0]);
        assert!(TierWindow::new(0, 6).fallback_tiers(0, 6).is_empty());
    }

    #[test]
    fn test_fallback_respects_floor() {
        assert_eq!(TierWindow::new(3, 3).fallback_tiers(2, 4), vec![2, 4]);
    }

    #[test]
    fn test_expansion_distribution() {
        let table = ExpansionTable::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut counts = [0u32; 3];
        for _ in 0..10_000 {
            counts[table.sample(&mut rng) as usize] += 1;
        }
        assert!((6_500..7_500).contains(&counts[0]), "{:?}", counts);
        assert!((1_500..2_500).contains(&counts[1]), "{:?}", counts);
        assert!((600..1_400).contains(&counts[2]), "{:?}", counts);
    }

    #[test]
    fn test_fixed_and_invalid_tables() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(ExpansionTable::fixed(1).sample(&mut rng), 1);
        assert!(ExpansionTable::new(vec![]).is_err());
        assert!(ExpansionTable::new(vec![(0, 0.0)]).is_err());
        assert!(ExpansionTable::new(vec![(0, 3.0), (1, 1.0)]).is_ok());
    }
}
