//! Deterministic what-if exploration.
//!
//! No sampling here: every player is scored against one fixed, possibly
//! partial assignment, using the same scorer and winner rule as the Monte
//! Carlo runs.

use crate::core::constants::{MAX_NATIONAL_SHIFT, TOSSUP_PROBABILITY};
use crate::core::SimError;
use crate::election::{leader, score, Outcomes, Portfolio, Region, RegionTable, Side, Ticket, Universe};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerWinnings {
    pub display_name: String,
    pub winnings: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Exploration {
    /// Strictly greatest winnings, first in input order on ties
    pub winner: Option<String>,
    /// One entry per player, in input order
    pub winnings: Vec<PlayerWinnings>,
    /// Number of known states the assignment decides
    pub determined: usize,
}

/// Score every portfolio against a fixed assignment.
pub fn explore(portfolios: &[Portfolio], regions: &[Region], outcomes: &Outcomes) -> Exploration {
    let table = RegionTable::new(regions);
    let universe = Universe::from_outcomes(&table, outcomes);

    let winnings: Vec<PlayerWinnings> = portfolios
        .iter()
        .map(|portfolio| PlayerWinnings {
            display_name: portfolio.display_name.clone(),
            winnings: score(&Ticket::compile(portfolio, &table), &universe).net,
        })
        .collect();
    let nets: Vec<i64> = winnings.iter().map(|w| w.winnings).collect();
    let winner = leader(&nets).map(|i| winnings[i].display_name.clone());

    Exploration {
        winner,
        winnings,
        determined: universe.determined(),
    }
}

/// Move every state's incumbent probability by `shift` points, clamped to
/// [0, 100], with the challenger taking the remainder.
pub fn shift_regions(regions: &[Region], shift: f64) -> Result<Vec<Region>, SimError> {
    if !shift.is_finite() || shift.abs() > MAX_NATIONAL_SHIFT {
        return Err(SimError::ShiftOutOfRange {
            shift,
            limit: MAX_NATIONAL_SHIFT,
        });
    }
    Ok(regions
        .iter()
        .map(|region| {
            let p_inc = (region.p_inc + shift).clamp(0.0, 100.0);
            Region {
                p_inc,
                p_chal: 100.0 - p_inc,
                ..region.clone()
            }
        })
        .collect())
}

/// Assign each state to blue when its shifted incumbent probability exceeds 50.
pub fn uniform_shift(regions: &[Region], shift: f64) -> Result<Outcomes, SimError> {
    let mut outcomes = Outcomes::new();
    for region in shift_regions(regions, shift)? {
        let side = Side::from_incumbent_won(region.p_inc > TOSSUP_PROBABILITY);
        outcomes.entry(region.name).or_insert(side);
    }
    Ok(outcomes)
}

/// Every state goes to its published favourite.
pub fn most_likely(regions: &[Region]) -> Outcomes {
    let mut outcomes = Outcomes::new();
    for region in regions {
        outcomes
            .entry(region.name.clone())
            .or_insert_with(|| region.favourite());
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions() -> Vec<Region> {
        vec![
            Region::new("Maine", 62.0, 38.0),
            Region::new("Nevada", 49.0, 51.0),
            Region::new("Texas", 12.0, 88.0),
        ]
    }

    #[test]
    fn test_shift_normalises_probabilities() {
        let shifted = shift_regions(&[Region::new("Skewed", 95.0, 20.0)], 10.0).unwrap();
        assert_eq!(shifted[0].p_inc, 100.0);
        assert_eq!(shifted[0].p_chal, 0.0);

        let shifted = shift_regions(&[Region::new("Skewed", 5.0, 80.0)], -10.0).unwrap();
        assert_eq!(shifted[0].p_inc, 0.0);
        assert_eq!(shifted[0].p_chal, 100.0);
    }

    #[test]
    fn test_shift_bounds() {
        assert!(shift_regions(&regions(), 20.0).is_ok());
        assert!(shift_regions(&regions(), -20.0).is_ok());
        assert!(matches!(
            uniform_shift(&regions(), 20.5),
            Err(SimError::ShiftOutOfRange { .. })
        ));
        assert!(uniform_shift(&regions(), f64::NAN).is_err());
    }

    #[test]
    fn test_shift_flips_close_states_first() {
        let outcomes = uniform_shift(&regions(), 2.0).unwrap();
        assert_eq!(outcomes["Maine"], Side::Blue);
        assert_eq!(outcomes["Nevada"], Side::Blue);
        assert_eq!(outcomes["Texas"], Side::Red);

        let outcomes = uniform_shift(&regions(), -20.0).unwrap();
        assert!(outcomes.values().all(|&side| side == Side::Red));
    }

    #[test]
    fn test_exact_fifty_stays_red() {
        let outcomes = uniform_shift(&[Region::new("Even", 49.0, 51.0)], 1.0).unwrap();
        assert_eq!(outcomes["Even"], Side::Red);
    }

    #[test]
    fn test_partial_assignment_counts_known_states() {
        let portfolios = vec![Portfolio::new("ada").pick("Maine", Side::Blue)];
        let outcomes = Outcomes::from([
            ("Maine".to_string(), Side::Blue),
            ("Atlantis".to_string(), Side::Red),
        ]);
        let result = explore(&portfolios, &regions(), &outcomes);
        assert_eq!(result.determined, 1);
        assert_eq!(result.winnings[0].winnings, 61);
    }

    #[test]
    fn test_no_players_no_winner() {
        let result = explore(&[], &regions(), &most_likely(&regions()));
        assert!(result.winner.is_none());
        assert!(result.winnings.is_empty());
    }
}
