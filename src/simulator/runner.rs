//! Batched iteration runner.
//!
//! Iterations are cut into fixed-size batches and batch `k` draws from
//! `ChaCha8Rng::seed_from_u64(seed + k)`. Partial tallies are combined with
//! [`Merge`], whose implementations are plain sums, so a seeded run gives the
//! same answer sequentially or across the rayon pool. `cargo test --features
//! parallel` checks the two folds against each other.

use super::config::SimConfig;
use crate::core::constants::BATCH_SIZE;
use crate::core::SimError;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

/// Commutative, associative combination of two partial tallies.
pub(crate) trait Merge {
    fn merge(&mut self, other: Self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Batch {
    pub index: u64,
    pub iterations: u32,
}

pub(crate) fn plan_batches(iterations: u32) -> Vec<Batch> {
    let mut batches = Vec::with_capacity((iterations / BATCH_SIZE + 1) as usize);
    let mut remaining = iterations;
    let mut index = 0;
    while remaining > 0 {
        let size = remaining.min(BATCH_SIZE);
        batches.push(Batch {
            index,
            iterations: size,
        });
        remaining -= size;
        index += 1;
    }
    batches
}

fn combine<A: Merge>(mut left: A, right: A) -> A {
    left.merge(right);
    left
}

/// Run `work` over every batch and fold the partial tallies.
///
/// Returns the merged tally and the base seed actually used.
pub(crate) fn run_batches<A, F>(config: &SimConfig, work: F) -> Result<(A, u64), SimError>
where
    A: Merge + Send,
    F: Fn(&mut ChaCha8Rng, u32) -> A + Sync,
{
    config.validate()?;
    let seed = config.seed.unwrap_or_else(rand::random);
    let batches = plan_batches(config.iterations);
    debug!(
        iterations = config.iterations,
        batches = batches.len(),
        seed,
        "simulation started"
    );

    let run = |batch: &Batch| {
        trace!(batch = batch.index, iterations = batch.iterations, "running batch");
        let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(batch.index));
        work(&mut rng, batch.iterations)
    };

    #[cfg(feature = "parallel")]
    let merged = if config.parallel {
        use rayon::prelude::*;
        batches.par_iter().map(run).reduce_with(combine)
    } else {
        batches.iter().map(run).reduce(combine)
    };
    #[cfg(not(feature = "parallel"))]
    let merged = batches.iter().map(run).reduce(combine);

    let tally = merged.ok_or(SimError::ZeroIterations)?;
    debug!(iterations = config.iterations, seed, "simulation finished");
    Ok((tally, seed))
}
