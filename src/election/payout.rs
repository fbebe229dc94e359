//! Fair-odds payouts on a fixed stake.

use super::types::{Outcomes, Portfolio, RegionTable};
use crate::core::constants::{MAX_PAYOUT, STAKE};
use crate::core::SimError;

/// Total return (stake + profit) on a 100-unit stake at `probability` percent.
///
/// Fair odds with no house margin: `round(100 / (p / 100))`. Probabilities
/// outside `(0, 100]`, or so small that the price passes [`MAX_PAYOUT`],
/// are rejected.
pub fn payout(probability: f64) -> Result<i64, SimError> {
    if !(probability > 0.0 && probability <= 100.0) {
        return Err(SimError::InvalidProbability { value: probability });
    }
    let price = (STAKE as f64 / (probability / 100.0)).round();
    if !(price <= MAX_PAYOUT as f64) {
        return Err(SimError::InvalidProbability { value: probability });
    }
    Ok(price as i64)
}

/// Net profit of a winning pick at `probability` percent.
pub fn profit(probability: f64) -> Result<i64, SimError> {
    Ok(payout(probability)? - STAKE)
}

/// Profit if every pick in the portfolio comes in. Unpriceable picks count zero.
pub fn potential_winnings(portfolio: &Portfolio, table: &RegionTable<'_>) -> i64 {
    portfolio
        .selections
        .iter()
        .filter_map(|(name, side)| table.find(name).map(|r| r.probability(*side)))
        .filter_map(|p| profit(p).ok())
        .fold(0, i64::saturating_add)
}

/// Gross return against official results: full payout for each correct pick,
/// nothing for wrong or undecided ones.
pub fn realized_return(portfolio: &Portfolio, table: &RegionTable<'_>, results: &Outcomes) -> i64 {
    portfolio
        .selections
        .iter()
        .filter(|(name, side)| results.get(name.as_str()) == Some(side))
        .filter_map(|(name, side)| table.find(name).map(|r| r.probability(*side)))
        .filter_map(|p| payout(p).ok())
        .fold(0, i64::saturating_add)
}
