//! Region outcome sampling.
//!
//! The engines only see the [`OutcomeSampler`] seam, so the independent
//! per-region model can be swapped for a correlated one without touching
//! scoring or aggregation.

use crate::election::{RegionTable, Side, Universe};
use rand::Rng;

/// Fills a universe with outcomes for the requested region indices.
pub trait OutcomeSampler: Sync {
    fn sample<R: Rng + ?Sized>(
        &self,
        table: &RegionTable<'_>,
        regions: &[usize],
        rng: &mut R,
        universe: &mut Universe,
    );
}

/// Blue wins when a uniform draw in [0, 1) falls below `p_inc / 100`.
pub fn draw_outcome<R: Rng + ?Sized>(p_inc: f64, rng: &mut R) -> Side {
    Side::from_incumbent_won(rng.gen::<f64>() < p_inc / 100.0)
}

/// Every region drawn on its own published probability.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndependentSampler;

impl OutcomeSampler for IndependentSampler {
    fn sample<R: Rng + ?Sized>(
        &self,
        table: &RegionTable<'_>,
        regions: &[usize],
        rng: &mut R,
        universe: &mut Universe,
    ) {
        for &index in regions {
            if let Some(region) = table.get(index) {
                universe.set(index, draw_outcome(region.p_inc, rng));
            }
        }
    }
}

/// One national swing per universe, drawn uniformly from
/// `[-max_swing, max_swing]` points and added to every region's incumbent
/// probability before its independent draw.
#[derive(Debug, Clone, Copy)]
pub struct NationalSwingSampler {
    pub max_swing: f64,
}

impl OutcomeSampler for NationalSwingSampler {
    fn sample<R: Rng + ?Sized>(
        &self,
        table: &RegionTable<'_>,
        regions: &[usize],
        rng: &mut R,
        universe: &mut Universe,
    ) {
        let swing = if self.max_swing > 0.0 && self.max_swing.is_finite() {
            rng.gen_range(-self.max_swing..=self.max_swing)
        } else {
            0.0
        };
        for &index in regions {
            if let Some(region) = table.get(index) {
                let p_inc = (region.p_inc + swing).clamp(0.0, 100.0);
                universe.set(index, draw_outcome(p_inc, rng));
            }
        }
    }
}
