//! Election data, payouts and portfolio scoring.

pub mod payout;
pub mod scoring;
pub mod standings;
pub mod types;

pub use payout::{payout, potential_winnings, profit, realized_return};
pub use scoring::{leader, score, score_portfolio, Scorecard, Ticket, Universe, Wager};
pub use standings::{standings, Standing};
pub use types::{ElectionInput, Outcomes, Portfolio, Region, RegionTable, Selection, Side};
