//! Anomaly selection
//!
//! Each valid pass rolls a uniform integer in `ROLL_RANGE`. The anomaly pool
//! is used when the roll is strictly greater than the configured chance;
//! otherwise the default section is kept.
//!
//! Note the direction: `anomaly_chance_percent` is effectively the chance of
//! staying on the default section. At 0 every pass is an anomaly, at 100 none
//! is. This is the established behavior and is kept as is; see
//! [`is_anomaly_roll`].

use crate::error::SelectError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

/// Inclusive range of the percentage roll
pub const ROLL_RANGE: RangeInclusive<u8> = 1..=100;

/// Whether a roll picks the anomaly pool: `roll > chance`, not `roll <= chance`
pub const fn is_anomaly_roll(roll: u8, chance_percent: u8) -> bool {
    roll > chance_percent
}

/// Outcome of a selection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionChoice {
    /// The canonical section
    Default,
    /// Anomaly with a 1-based pool index
    Anomaly(usize),
}

impl SectionChoice {
    /// Check if an anomaly was chosen
    pub fn is_anomaly(&self) -> bool {
        matches!(self, SectionChoice::Anomaly(_))
    }
}

/// Picks between the default section and the anomaly pool
#[derive(Clone, Debug)]
pub struct AnomalySelector<R = StdRng> {
    rng: R,
}

impl AnomalySelector<StdRng> {
    /// Deterministic selector for reproducible sessions
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Selector seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl<R: Rng> AnomalySelector<R> {
    /// Wrap an existing random source
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Roll for the next section.
    ///
    /// An empty pool fails before any roll is made, whatever the chance.
    pub fn select(&mut self, chance_percent: u8, pool_size: usize) -> Result<SectionChoice, SelectError> {
        if pool_size == 0 {
            return Err(SelectError::NoAnomaliesAvailable);
        }
        if chance_percent > *ROLL_RANGE.end() {
            return Err(SelectError::ChanceOutOfRange(chance_percent));
        }

        let roll = self.rng.gen_range(ROLL_RANGE);
        if is_anomaly_roll(roll, chance_percent) {
            Ok(SectionChoice::Anomaly(self.rng.gen_range(1..=pool_size)))
        } else {
            Ok(SectionChoice::Default)
        }
    }
}
