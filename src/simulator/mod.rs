//! Monte Carlo outcome simulation.
//!
//! - Population runs: each player's chance of finishing on top, and which
//!   states decide it
//! - Single-player risk profiles: return distribution, volatility, most
//!   common scenarios
//! - Deterministic what-if exploration against fixed or shifted outcomes
//!
//! Every run owns its accumulators and seeds its own generators, so runs
//! can execute side by side and repeat exactly under a fixed seed.

mod config;
mod explorer;
mod population;
mod profiler;
mod report;
mod runner;
mod sampler;

pub use config::SimConfig;
pub use explorer::{explore, most_likely, shift_regions, uniform_shift, Exploration, PlayerWinnings};
pub use population::{
    simulate_population, simulate_population_with, CriticalStates, OutcomeImpact, PlayerOdds,
    PopulationReport, RegionImpact,
};
pub use profiler::{
    profile_player, profile_player_with, RiskMetrics, RiskProfile, RiskRating, WinningScenario,
};
pub use report::standings_text;
pub use sampler::{draw_outcome, IndependentSampler, NationalSwingSampler, OutcomeSampler};
