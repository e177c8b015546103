//! Tiered fallback selector

pub mod query;
pub mod selector;
pub mod source;
pub mod tier_window;

pub use query::{CultureScope, Relaxation, SelectionBias, SlotQuery};
pub use selector::TieredSelector;
pub use source::{CandidateSource, CivilianView, CrownView};
pub use tier_window::{ExpansionTable, TierWindow};
