//! Population runs: win odds for every player and the states that decide them.
//!
//! Each iteration samples a full map, scores every ticket and credits the
//! leader. Then, per state, the leader is recomputed with that state forced
//! the other way (everything else held fixed). When the two leaders differ,
//! the state was decisive: the blue-side leader is "helped if blue" and
//! "hurt if red", and the red-side leader the reverse.

use super::config::SimConfig;
use super::runner::{run_batches, Merge};
use super::sampler::{IndependentSampler, OutcomeSampler};
use crate::core::SimError;
use crate::election::{leader, score, Portfolio, Region, RegionTable, Side, Ticket, Universe, Wager};
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalStates {
    /// States that need to go blue for this player to win
    pub needs_blue: Vec<String>,
    /// States that need to go red for this player to win
    pub needs_red: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerOdds {
    pub display_name: String,
    pub wins: u64,
    /// Percent of universes this player won outright
    pub win_probability: f64,
    pub critical_states: CriticalStates,
    pub excluded_picks: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutcomeImpact {
    pub helps: Vec<String>,
    pub hurts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionImpact {
    pub state: String,
    pub blue_outcome: OutcomeImpact,
    pub red_outcome: OutcomeImpact,
    /// Share of universes in which this state decided the winner
    pub importance: f64,
}

impl RegionImpact {
    pub fn outcome(&self, side: Side) -> &OutcomeImpact {
        match side {
            Side::Blue => &self.blue_outcome,
            Side::Red => &self.red_outcome,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulationReport {
    pub iterations: u32,
    pub seed: u64,
    /// Descending by win probability; ties keep input order
    pub players: Vec<PlayerOdds>,
    /// Descending by importance; ties keep input order
    pub region_impacts: Vec<RegionImpact>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Influence {
    blue_helps: Vec<u64>,
    blue_hurts: Vec<u64>,
    red_helps: Vec<u64>,
    red_hurts: Vec<u64>,
    decisive: u64,
}

impl Influence {
    fn new(players: usize) -> Self {
        Self {
            blue_helps: vec![0; players],
            blue_hurts: vec![0; players],
            red_helps: vec![0; players],
            red_hurts: vec![0; players],
            decisive: 0,
        }
    }

    fn record(&mut self, blue_winner: usize, red_winner: usize) {
        self.decisive += 1;
        self.blue_helps[blue_winner] += 1;
        self.red_hurts[blue_winner] += 1;
        self.red_helps[red_winner] += 1;
        self.blue_hurts[red_winner] += 1;
    }
}

fn add_counts(into: &mut [u64], from: &[u64]) {
    for (a, b) in into.iter_mut().zip(from) {
        *a += b;
    }
}

impl Merge for Influence {
    fn merge(&mut self, other: Self) {
        add_counts(&mut self.blue_helps, &other.blue_helps);
        add_counts(&mut self.blue_hurts, &other.blue_hurts);
        add_counts(&mut self.red_helps, &other.red_helps);
        add_counts(&mut self.red_hurts, &other.red_hurts);
        self.decisive += other.decisive;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PopulationTally {
    wins: Vec<u64>,
    influence: Vec<Influence>,
}

impl PopulationTally {
    fn new(players: usize, regions: usize) -> Self {
        Self {
            wins: vec![0; players],
            influence: vec![Influence::new(players); regions],
        }
    }
}

impl Merge for PopulationTally {
    fn merge(&mut self, other: Self) {
        add_counts(&mut self.wins, &other.wins);
        for (mine, theirs) in self.influence.iter_mut().zip(other.influence) {
            mine.merge(theirs);
        }
    }
}

/// Per-region list of (player, wager) for every ticket that picked it.
fn backers(tickets: &[Ticket], regions: usize) -> Vec<Vec<(usize, Wager)>> {
    let mut backers = vec![Vec::new(); regions];
    for (player, ticket) in tickets.iter().enumerate() {
        for wager in &ticket.wagers {
            backers[wager.region].push((player, *wager));
        }
    }
    backers
}

struct PopulationRun<'a, S> {
    table: &'a RegionTable<'a>,
    tickets: &'a [Ticket],
    backers: &'a [Vec<(usize, Wager)>],
    sampler: &'a S,
}

impl<S: OutcomeSampler> PopulationRun<'_, S> {
    fn run_batch<R: Rng>(&self, rng: &mut R, iterations: u32) -> PopulationTally {
        let regions = self.table.len();
        let all: Vec<usize> = (0..regions).collect();
        let mut tally = PopulationTally::new(self.tickets.len(), regions);
        let mut universe = Universe::undetermined(regions);
        let mut nets = vec![0i64; self.tickets.len()];
        let mut flipped = nets.clone();

        for _ in 0..iterations {
            self.sampler.sample(self.table, &all, rng, &mut universe);
            for (net, ticket) in nets.iter_mut().zip(self.tickets) {
                *net = score(ticket, &universe).net;
            }
            let Some(winner) = leader(&nets) else {
                continue;
            };
            tally.wins[winner] += 1;

            for (region, backing) in self.backers.iter().enumerate() {
                let Some(actual) = universe.get(region) else {
                    continue;
                };
                if backing.is_empty() {
                    continue;
                }
                flipped.copy_from_slice(&nets);
                for (player, wager) in backing {
                    flipped[*player] +=
                        wager.settle(Some(actual.flip())) - wager.settle(Some(actual));
                }
                let Some(rival) = leader(&flipped) else {
                    continue;
                };
                if rival == winner {
                    continue;
                }
                let (blue_winner, red_winner) = match actual {
                    Side::Blue => (winner, rival),
                    Side::Red => (rival, winner),
                };
                tally.influence[region].record(blue_winner, red_winner);
            }
        }
        tally
    }
}

/// Names whose count exceeds `cutoff`, most frequent first.
fn names_over(counts: &[u64], cutoff: f64, tickets: &[Ticket]) -> Vec<String> {
    let mut listed: Vec<(usize, u64)> = counts
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, count)| count as f64 > cutoff)
        .collect();
    listed.sort_by(|a, b| b.1.cmp(&a.1));
    listed
        .into_iter()
        .map(|(player, _)| tickets[player].player.clone())
        .collect()
}

/// States, in impact order, whose `side` outcome lists the player as helped.
fn states_helping(impacts: &[RegionImpact], player: &str, side: Side) -> Vec<String> {
    impacts
        .iter()
        .filter(|impact| impact.outcome(side).helps.iter().any(|name| name == player))
        .map(|impact| impact.state.clone())
        .collect()
}

/// Estimate every player's chance of the best net winnings with the
/// independent per-state model.
pub fn simulate_population(
    portfolios: &[Portfolio],
    regions: &[Region],
    config: &SimConfig,
) -> Result<PopulationReport, SimError> {
    simulate_population_with(portfolios, regions, config, &IndependentSampler)
}

pub fn simulate_population_with<S: OutcomeSampler>(
    portfolios: &[Portfolio],
    regions: &[Region],
    config: &SimConfig,
    sampler: &S,
) -> Result<PopulationReport, SimError> {
    config.validate()?;
    if portfolios.is_empty() {
        return Err(SimError::NoPlayers);
    }
    for portfolio in portfolios {
        portfolio.validate()?;
    }

    let table = RegionTable::new(regions);
    let tickets: Vec<Ticket> = portfolios
        .iter()
        .map(|p| Ticket::compile(p, &table))
        .collect();
    let backers = backers(&tickets, table.len());
    let run = PopulationRun {
        table: &table,
        tickets: &tickets,
        backers: &backers,
        sampler,
    };

    let (tally, seed) = run_batches(config, |rng, iterations| run.run_batch(rng, iterations))?;

    let n = config.iterations as f64;
    let cutoff = config.impact_threshold * n;
    let mut region_impacts: Vec<RegionImpact> = regions
        .iter()
        .zip(&tally.influence)
        .map(|(region, influence)| RegionImpact {
            state: region.name.clone(),
            blue_outcome: OutcomeImpact {
                helps: names_over(&influence.blue_helps, cutoff, &tickets),
                hurts: names_over(&influence.blue_hurts, cutoff, &tickets),
            },
            red_outcome: OutcomeImpact {
                helps: names_over(&influence.red_helps, cutoff, &tickets),
                hurts: names_over(&influence.red_hurts, cutoff, &tickets),
            },
            importance: influence.decisive as f64 / n,
        })
        .collect();
    region_impacts.sort_by(|a, b| b.importance.total_cmp(&a.importance));

    let mut players: Vec<PlayerOdds> = tickets
        .iter()
        .zip(&tally.wins)
        .map(|(ticket, &wins)| PlayerOdds {
            display_name: ticket.player.clone(),
            wins,
            win_probability: wins as f64 * 100.0 / n,
            critical_states: CriticalStates {
                needs_blue: states_helping(&region_impacts, &ticket.player, Side::Blue),
                needs_red: states_helping(&region_impacts, &ticket.player, Side::Red),
            },
            excluded_picks: ticket.excluded.clone(),
        })
        .collect();
    players.sort_by(|a, b| b.win_probability.total_cmp(&a.win_probability));

    Ok(PopulationReport {
        iterations: config.iterations,
        seed,
        players,
        region_impacts,
    })
}
