//! Pick'em - Monte Carlo engine for an election prediction game.
//!
//! Players pick sides in contested states against published win
//! probabilities, staking 100 per pick at fair odds. This crate prices the
//! picks, simulates outcomes to estimate who finishes on top, finds the
//! states that decide it, profiles a single player's risk and replays
//! fixed what-if scenarios.

pub mod core;
pub mod election;
pub mod simulator;
pub mod utils;

pub use crate::core::SimError;
pub use crate::election::{ElectionInput, Outcomes, Portfolio, Region, Selection, Side};
