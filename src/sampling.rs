//! Random draws shared by every generator stage.
//!
//! All randomness flows from a single [`StdRng`] seeded once per run, so the
//! order in which stages call into these helpers is part of the output
//! contract.

use anyhow::{Result, anyhow};
use chrono::{Duration, NaiveDate};
use rand::{
    Rng, SeedableRng,
    distributions::{Distribution, WeightedIndex},
    rngs::StdRng,
    seq::index,
};

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Uniform draw over every calendar day in `start ..= end`.
pub fn uniform_date<R: Rng + ?Sized>(rng: &mut R, start: NaiveDate, end: NaiveDate) -> NaiveDate {
    let span = (end - start).num_days().max(0);
    start + Duration::days(rng.gen_range(0..=span))
}

/// `amount` distinct positions out of `0..len`, in draw order.
pub fn pick_subset<R: Rng + ?Sized>(rng: &mut R, len: usize, amount: usize) -> Vec<usize> {
    index::sample(rng, len, amount.min(len)).into_vec()
}

/// Uniform position in a non-empty slice.
pub fn pick_index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> usize {
    rng.gen_range(0..len)
}

/// Fixed categorical distribution over copyable values.
#[derive(Debug, Clone)]
pub struct WeightedChoice<T> {
    items: Vec<T>,
    index: WeightedIndex<f64>,
}

impl<T: Copy> WeightedChoice<T> {
    pub fn new(weighted: &[(T, f64)]) -> Result<Self> {
        let index = WeightedIndex::new(weighted.iter().map(|(_, weight)| *weight))
            .map_err(|err| anyhow!("Invalid category weights: {err}"))?;
        Ok(Self {
            items: weighted.iter().map(|(item, _)| *item).collect(),
            index,
        })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.items[self.index.sample(rng)]
    }
}
