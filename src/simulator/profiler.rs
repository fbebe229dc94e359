//! Single-player risk profiling.
//!
//! Only the player's own states are sampled. Every universe is scored the
//! same way as in population runs, so a wrong pick costs the full stake.

use super::config::SimConfig;
use super::runner::{run_batches, Merge};
use super::sampler::{IndependentSampler, OutcomeSampler};
use crate::core::constants::{
    AGGRESSIVE_WIN_FREQUENCY, BALANCED_WIN_FREQUENCY, CONSERVATIVE_WIN_FREQUENCY,
};
use crate::core::SimError;
use crate::election::{score, Outcomes, Portfolio, Region, RegionTable, Side, Ticket, Universe};
use rand::Rng;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Risk band derived from how often the portfolio finishes in profit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskRating {
    Conservative,
    Balanced,
    Aggressive,
    #[serde(rename = "Highly Speculative")]
    HighlySpeculative,
}

impl RiskRating {
    /// Bands are exclusive lower bounds: above 40% is Conservative, above 25%
    /// Balanced, above 15% Aggressive.
    pub fn from_win_frequency(win_frequency: f64) -> Self {
        if win_frequency > CONSERVATIVE_WIN_FREQUENCY {
            RiskRating::Conservative
        } else if win_frequency > BALANCED_WIN_FREQUENCY {
            RiskRating::Balanced
        } else if win_frequency > AGGRESSIVE_WIN_FREQUENCY {
            RiskRating::Aggressive
        } else {
            RiskRating::HighlySpeculative
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskRating::Conservative => "Conservative",
            RiskRating::Balanced => "Balanced",
            RiskRating::Aggressive => "Aggressive",
            RiskRating::HighlySpeculative => "Highly Speculative",
        }
    }
}

impl fmt::Display for RiskRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMetrics {
    /// Root-mean-square of net winnings (spread around zero, not the mean)
    pub volatility: f64,
    /// Percent of universes with a strictly positive net
    pub win_frequency: f64,
    /// Mean correct picks across the profitable universes (0 if none)
    pub avg_winning_picks: f64,
    pub risk_rating: RiskRating,
}

/// A full outcome assignment over the player's states and how often it came up.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WinningScenario {
    pub win_amount: i64,
    pub frequency: u64,
    pub picks: Outcomes,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskProfile {
    pub player: String,
    pub iterations: u32,
    pub seed: u64,
    /// Most frequent scenarios first
    pub winning_scenarios: Vec<WinningScenario>,
    pub risk_metrics: RiskMetrics,
    pub excluded_picks: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScenarioCount {
    frequency: u64,
    net: i64,
}

type Signature = Vec<Option<Side>>;

#[derive(Debug, Default)]
struct ProfileTally {
    sum_squared: u128,
    winning_rounds: u64,
    winning_picks: u64,
    scenarios: HashMap<Signature, ScenarioCount>,
}

impl Merge for ProfileTally {
    fn merge(&mut self, other: Self) {
        self.sum_squared += other.sum_squared;
        self.winning_rounds += other.winning_rounds;
        self.winning_picks += other.winning_picks;
        for (signature, count) in other.scenarios {
            self.scenarios
                .entry(signature)
                .and_modify(|c| c.frequency += count.frequency)
                .or_insert(count);
        }
    }
}

fn run_batch<S: OutcomeSampler, R: Rng>(
    ticket: &Ticket,
    table: &RegionTable<'_>,
    sampler: &S,
    rng: &mut R,
    iterations: u32,
) -> ProfileTally {
    let regions: Vec<usize> = ticket.regions().collect();
    let mut universe = Universe::undetermined(table.len());
    let mut tally = ProfileTally::default();

    for _ in 0..iterations {
        sampler.sample(table, &regions, rng, &mut universe);
        let card = score(ticket, &universe);

        if card.net > 0 {
            tally.winning_rounds += 1;
            tally.winning_picks += card.won as u64;
        }
        let magnitude = card.net.unsigned_abs() as u128;
        tally.sum_squared += magnitude * magnitude;

        let signature: Signature = regions.iter().map(|&r| universe.get(r)).collect();
        tally
            .scenarios
            .entry(signature)
            .or_insert(ScenarioCount {
                frequency: 0,
                net: card.net,
            })
            .frequency += 1;
    }
    tally
}

/// Profile one portfolio with the independent per-state model.
pub fn profile_player(
    portfolio: &Portfolio,
    regions: &[Region],
    config: &SimConfig,
) -> Result<RiskProfile, SimError> {
    profile_player_with(portfolio, regions, config, &IndependentSampler)
}

pub fn profile_player_with<S: OutcomeSampler>(
    portfolio: &Portfolio,
    regions: &[Region],
    config: &SimConfig,
    sampler: &S,
) -> Result<RiskProfile, SimError> {
    portfolio.validate()?;
    let table = RegionTable::new(regions);
    let ticket = Ticket::compile(portfolio, &table);

    let (tally, seed) = run_batches(config, |rng, iterations| {
        run_batch(&ticket, &table, sampler, rng, iterations)
    })?;

    let n = config.iterations as f64;
    let win_frequency = tally.winning_rounds as f64 * 100.0 / n;
    let avg_winning_picks = if tally.winning_rounds == 0 {
        0.0
    } else {
        tally.winning_picks as f64 / tally.winning_rounds as f64
    };
    let risk_metrics = RiskMetrics {
        volatility: (tally.sum_squared as f64 / n).sqrt(),
        win_frequency,
        avg_winning_picks,
        risk_rating: RiskRating::from_win_frequency(win_frequency),
    };

    let mut grouped: Vec<(Signature, ScenarioCount)> = tally.scenarios.into_iter().collect();
    grouped.sort_by(|(sig_a, a), (sig_b, b)| {
        b.frequency
            .cmp(&a.frequency)
            .then(b.net.cmp(&a.net))
            .then_with(|| sig_a.cmp(sig_b))
    });
    grouped.truncate(config.top_scenarios);

    let winning_scenarios = grouped
        .into_iter()
        .map(|(signature, count)| WinningScenario {
            win_amount: count.net,
            frequency: count.frequency,
            picks: ticket
                .wagers
                .iter()
                .zip(signature)
                .filter_map(|(wager, outcome)| {
                    let region = table.get(wager.region)?;
                    Some((region.name.clone(), outcome?))
                })
                .collect(),
        })
        .collect();

    Ok(RiskProfile {
        player: ticket.player.clone(),
        iterations: config.iterations,
        seed,
        winning_scenarios,
        risk_metrics,
        excluded_picks: ticket.excluded,
    })
}
