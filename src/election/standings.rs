//! Leaderboard ordering by potential or realized winnings.

use super::payout::{potential_winnings, realized_return};
use super::types::{Outcomes, Portfolio, Region, RegionTable};
use crate::core::constants::STAKE;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    pub display_name: String,
    pub num_picks: usize,
    /// Profit if every pick comes in.
    pub potential_winnings: i64,
    /// Gross payout of correct picks, once results exist.
    pub realized_return: Option<i64>,
    /// Realized return (potential winnings before results) minus total stake.
    pub net: i64,
}

/// Rank players: by realized return when results are in, otherwise by
/// potential winnings. Equal players keep input order.
pub fn standings(
    portfolios: &[Portfolio],
    regions: &[Region],
    results: Option<&Outcomes>,
) -> Vec<Standing> {
    let table = RegionTable::new(regions);
    let mut rows: Vec<Standing> = portfolios
        .iter()
        .map(|portfolio| {
            let num_picks = portfolio.num_picks();
            let potential = potential_winnings(portfolio, &table);
            let realized = results.map(|r| realized_return(portfolio, &table, r));
            Standing {
                display_name: portfolio.display_name.clone(),
                num_picks,
                potential_winnings: potential,
                realized_return: realized,
                net: realized.unwrap_or(potential) - num_picks as i64 * STAKE,
            }
        })
        .collect();

    match results {
        Some(_) => rows.sort_by_key(|row| std::cmp::Reverse(row.realized_return.unwrap_or(0))),
        None => rows.sort_by_key(|row| std::cmp::Reverse(row.potential_winnings)),
    }
    rows
}
