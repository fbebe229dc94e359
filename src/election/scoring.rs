//! Portfolio scoring against a single universe of outcomes.
//!
//! Portfolios are compiled once per run into [`Ticket`]s: region names are
//! resolved to table indices and each pick's winning profit is priced up
//! front, so the per-iteration work is a handful of integer additions.

use super::payout::profit;
use super::types::{Outcomes, Portfolio, Region, RegionTable, Side};
use crate::core::constants::STAKE;
use serde::Serialize;
use tracing::warn;

/// One outcome slot per region; `None` is an undetermined race.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Universe {
    outcomes: Vec<Option<Side>>,
}

impl Universe {
    pub fn undetermined(regions: usize) -> Self {
        Self {
            outcomes: vec![None; regions],
        }
    }

    /// Resolve a named assignment against the table. Unknown names are ignored.
    pub fn from_outcomes(table: &RegionTable<'_>, outcomes: &Outcomes) -> Self {
        let mut universe = Self::undetermined(table.len());
        for (name, side) in outcomes {
            if let Some(index) = table.position(name) {
                universe.set(index, *side);
            }
        }
        universe
    }

    pub fn get(&self, region: usize) -> Option<Side> {
        self.outcomes.get(region).copied().flatten()
    }

    pub fn set(&mut self, region: usize, side: Side) {
        if let Some(slot) = self.outcomes.get_mut(region) {
            *slot = Some(side);
        }
    }

    /// Number of regions with a decided outcome.
    pub fn determined(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_some()).count()
    }

    pub fn to_outcomes(&self, table: &RegionTable<'_>) -> Outcomes {
        self.outcomes
            .iter()
            .enumerate()
            .filter_map(|(i, outcome)| {
                let side = (*outcome)?;
                table.get(i).map(|r| (r.name.clone(), side))
            })
            .collect()
    }
}

/// A single priced pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wager {
    pub region: usize,
    pub side: Side,
    /// Net profit if the pick comes in.
    pub profit: i64,
}

impl Wager {
    /// Net result of this pick for the given outcome.
    pub fn settle(&self, outcome: Option<Side>) -> i64 {
        match outcome {
            Some(side) if side == self.side => self.profit,
            Some(_) => -STAKE,
            None => 0,
        }
    }
}

/// A portfolio resolved against a region table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub player: String,
    pub wagers: Vec<Wager>,
    /// Picks left out of scoring: unknown region or unpriceable probability.
    pub excluded: Vec<String>,
}

impl Ticket {
    pub fn compile(portfolio: &Portfolio, table: &RegionTable<'_>) -> Self {
        let mut wagers = Vec::with_capacity(portfolio.selections.len());
        let mut excluded = Vec::new();

        for (name, &side) in &portfolio.selections {
            let priced = table.position(name).map(|index| {
                let probability = table.regions()[index].probability(side);
                profit(probability).map(|profit| Wager {
                    region: index,
                    side,
                    profit,
                })
            });

            match priced {
                Some(Ok(wager)) => wagers.push(wager),
                Some(Err(err)) => {
                    warn!(player = %portfolio.display_name, region = %name, %err, "pick excluded");
                    excluded.push(name.clone());
                }
                None => {
                    warn!(player = %portfolio.display_name, region = %name, "pick on unknown region excluded");
                    excluded.push(name.clone());
                }
            }
        }

        Self {
            player: portfolio.display_name.clone(),
            wagers,
            excluded,
        }
    }

    pub fn regions(&self) -> impl Iterator<Item = usize> + '_ {
        self.wagers.iter().map(|w| w.region)
    }
}

/// Result of scoring one ticket in one universe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scorecard {
    pub net: i64,
    pub won: u32,
    pub lost: u32,
    pub undetermined: u32,
}

/// Score a ticket: profit per correct pick, minus the stake per wrong pick,
/// nothing for undetermined regions.
pub fn score(ticket: &Ticket, universe: &Universe) -> Scorecard {
    let mut card = Scorecard::default();
    for wager in &ticket.wagers {
        let outcome = universe.get(wager.region);
        match outcome {
            Some(side) if side == wager.side => card.won += 1,
            Some(_) => card.lost += 1,
            None => card.undetermined += 1,
        }
        card.net = card.net.saturating_add(wager.settle(outcome));
    }
    card
}

/// Net winnings of a portfolio against a named (possibly partial) assignment.
pub fn score_portfolio(portfolio: &Portfolio, regions: &[Region], outcomes: &Outcomes) -> i64 {
    let table = RegionTable::new(regions);
    let ticket = Ticket::compile(portfolio, &table);
    score(&ticket, &Universe::from_outcomes(&table, outcomes)).net
}

/// Index of the winner: the first entry strictly greater than all before it.
pub fn leader(nets: &[i64]) -> Option<usize> {
    let mut best: Option<(usize, i64)> = None;
    for (i, &net) in nets.iter().enumerate() {
        match best {
            Some((_, top)) if net <= top => {}
            _ => best = Some((i, net)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::election::payout::payout;

    fn regions() -> Vec<Region> {
        vec![
            Region::new("Alpha", 70.0, 30.0),
            Region::new("Beta", 30.0, 70.0),
            Region::new("Gamma", 50.0, 50.0),
        ]
    }

    #[test]
    fn test_two_region_exact_net() {
        let regions = regions();
        let portfolio = Portfolio::new("ada")
            .pick("Alpha", Side::Blue)
            .pick("Beta", Side::Red);
        let outcomes = Outcomes::from([
            ("Alpha".to_string(), Side::Blue),
            ("Beta".to_string(), Side::Blue),
        ]);

        let net = score_portfolio(&portfolio, &regions, &outcomes);
        assert_eq!(net, payout(70.0).unwrap() - 100 + (-100));
    }

    #[test]
    fn test_undetermined_region_contributes_zero() {
        let regions = regions();
        let table = RegionTable::new(&regions);
        let ticket = Ticket::compile(
            &Portfolio::new("ada")
                .pick("Alpha", Side::Blue)
                .pick("Gamma", Side::Red),
            &table,
        );
        let mut universe = Universe::undetermined(table.len());
        universe.set(0, Side::Blue);

        let card = score(&ticket, &universe);
        assert_eq!(card.net, 43);
        assert_eq!((card.won, card.lost, card.undetermined), (1, 0, 1));
    }

    #[test]
    fn test_compile_excludes_unknown_and_zero_probability() {
        let regions = vec![Region::new("Alpha", 100.0, 0.0)];
        let table = RegionTable::new(&regions);
        let ticket = Ticket::compile(
            &Portfolio::new("ada")
                .pick("Alpha", Side::Red)
                .pick("Nowhere", Side::Blue),
            &table,
        );

        assert!(ticket.wagers.is_empty());
        assert_eq!(ticket.excluded, vec!["Alpha".to_string(), "Nowhere".to_string()]);

        let mut universe = Universe::undetermined(1);
        universe.set(0, Side::Blue);
        assert_eq!(score(&ticket, &universe).net, 0);
    }

    #[test]
    fn test_vanishing_probability_is_excluded_not_priced() {
        let regions = vec![
            Region::new("Alpha", 100.0, 1e-20),
            Region::new("Beta", 100.0, 1e-20),
        ];
        let portfolio = Portfolio::new("ada")
            .pick("Alpha", Side::Red)
            .pick("Beta", Side::Red);
        let table = RegionTable::new(&regions);
        let ticket = Ticket::compile(&portfolio, &table);
        assert!(ticket.wagers.is_empty());
        assert_eq!(ticket.excluded.len(), 2);

        let outcomes = Outcomes::from([
            ("Alpha".to_string(), Side::Red),
            ("Beta".to_string(), Side::Red),
        ]);
        assert_eq!(score_portfolio(&portfolio, &regions, &outcomes), 0);
    }

    #[test]
    fn test_universe_round_trips_names() {
        let regions = regions();
        let table = RegionTable::new(&regions);
        let outcomes = Outcomes::from([
            ("Beta".to_string(), Side::Red),
            ("Unknown".to_string(), Side::Blue),
        ]);
        let universe = Universe::from_outcomes(&table, &outcomes);

        assert_eq!(universe.determined(), 1);
        assert_eq!(universe.get(1), Some(Side::Red));
        assert_eq!(
            universe.to_outcomes(&table),
            Outcomes::from([("Beta".to_string(), Side::Red)])
        );
    }

    #[test]
    fn test_leader_first_strict_maximum() {
        assert_eq!(leader(&[]), None);
        assert_eq!(leader(&[-100]), Some(0));
        assert_eq!(leader(&[25, 50, 50, 10]), Some(1));
        assert_eq!(leader(&[-100, -100]), Some(0));
    }
}
