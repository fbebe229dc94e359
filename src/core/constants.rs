// Wagering
pub const STAKE: i64 = 100;
pub const MAX_PICKS: usize = 10;
// Largest total return a single pick may price at (a 1e-8 percent longshot)
pub const MAX_PAYOUT: i64 = 1_000_000_000_000;

// Monte Carlo runs
pub const DEFAULT_ITERATIONS: u32 = 10_000;
pub const BATCH_SIZE: u32 = 1_000;
pub const TOP_SCENARIO_COUNT: usize = 3;

// A player is listed as helped/hurt by a state once their count exceeds this share of iterations
pub const IMPACT_SHARE_THRESHOLD: f64 = 0.10;

// Scenario explorer national shift, in probability points
pub const MAX_NATIONAL_SHIFT: f64 = 20.0;
pub const TOSSUP_PROBABILITY: f64 = 50.0;

// Risk rating bands (win frequency, percent, exclusive lower bounds)
pub const CONSERVATIVE_WIN_FREQUENCY: f64 = 40.0;
pub const BALANCED_WIN_FREQUENCY: f64 = 25.0;
pub const AGGRESSIVE_WIN_FREQUENCY: f64 = 15.0;
