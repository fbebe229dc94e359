//! Risk profiler tests
//!
//! Covers:
//! - Risk rating bands under scripted sampling
//! - Win frequency against pick safety
//! - Scenario grouping
//! - Sampling restricted to the player's own states

use pickem::election::{RegionTable, Universe};
use pickem::simulator::{
    profile_player, profile_player_with, OutcomeSampler, RiskRating, SimConfig,
};
use pickem::{Portfolio, Region, Side, SimError};
use rand::Rng;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Hands out exactly `blue_draws` blue outcomes, then red forever.
struct ScriptedSampler {
    blue_draws: usize,
    calls: AtomicUsize,
}

impl ScriptedSampler {
    fn new(blue_draws: usize) -> Self {
        Self {
            blue_draws,
            calls: AtomicUsize::new(0),
        }
    }
}

impl OutcomeSampler for ScriptedSampler {
    fn sample<R: Rng + ?Sized>(
        &self,
        _table: &RegionTable<'_>,
        regions: &[usize],
        _rng: &mut R,
        universe: &mut Universe,
    ) {
        for &index in regions {
            let call = self.calls.fetch_add(1, Ordering::Relaxed);
            let side = if call < self.blue_draws {
                Side::Blue
            } else {
                Side::Red
            };
            universe.set(index, side);
        }
    }
}

/// Records every region index it is asked to sample.
#[derive(Default)]
struct RecordingSampler {
    seen: Mutex<BTreeSet<usize>>,
}

impl OutcomeSampler for RecordingSampler {
    fn sample<R: Rng + ?Sized>(
        &self,
        _table: &RegionTable<'_>,
        regions: &[usize],
        _rng: &mut R,
        universe: &mut Universe,
    ) {
        let mut seen = self.seen.lock().unwrap();
        for &index in regions {
            seen.insert(index);
            universe.set(index, Side::Blue);
        }
    }
}

fn tossup() -> Vec<Region> {
    vec![Region::new("Nevada", 50.0, 50.0)]
}

// ============================================================================
// Risk Rating Tests
// ============================================================================

#[test]
fn test_rating_boundaries_with_scripted_outcomes() {
    let portfolio = Portfolio::new("ada").pick("Nevada", Side::Blue);
    let config = SimConfig::seeded(1).with_iterations(100);

    for (wins, expected) in [
        (41, RiskRating::Conservative),
        (26, RiskRating::Balanced),
        (16, RiskRating::Aggressive),
        (10, RiskRating::HighlySpeculative),
    ] {
        let sampler = ScriptedSampler::new(wins);
        let profile = profile_player_with(&portfolio, &tossup(), &config, &sampler).unwrap();

        assert_eq!(profile.risk_metrics.win_frequency, wins as f64);
        assert_eq!(profile.risk_metrics.risk_rating, expected, "{wins}% wins");
        assert_eq!(profile.risk_metrics.avg_winning_picks, 1.0);
    }
}

#[test]
fn test_no_winning_rounds_gives_zero_average() {
    let portfolio = Portfolio::new("ada").pick("Nevada", Side::Blue);
    let config = SimConfig::seeded(1).with_iterations(250);
    let profile =
        profile_player_with(&portfolio, &tossup(), &config, &ScriptedSampler::new(0)).unwrap();

    assert_eq!(profile.risk_metrics.win_frequency, 0.0);
    assert_eq!(profile.risk_metrics.avg_winning_picks, 0.0);
    assert_eq!(profile.risk_metrics.risk_rating, RiskRating::HighlySpeculative);
    assert_eq!(profile.risk_metrics.volatility, 100.0);
    assert_eq!(profile.winning_scenarios.len(), 1);
    assert_eq!(profile.winning_scenarios[0].frequency, 250);
    assert_eq!(profile.winning_scenarios[0].win_amount, -100);
}

// ============================================================================
// Statistical Behaviour
// ============================================================================

#[test]
fn test_safer_pick_wins_at_least_as_often() {
    let mut previous = -1.0;
    for p in [10.0, 25.0, 40.0, 55.0, 70.0, 85.0, 95.0] {
        let regions = vec![Region::new("Ohio", p, 100.0 - p)];
        let portfolio = Portfolio::new("ada").pick("Ohio", Side::Blue);
        let config = SimConfig::seeded(99).with_iterations(20_000);
        let freq = profile_player(&portfolio, &regions, &config)
            .unwrap()
            .risk_metrics
            .win_frequency;

        assert!(freq >= previous, "p={p}: {freq} < {previous}");
        assert!((freq - p).abs() < 2.0, "p={p}: observed {freq}");
        previous = freq;
    }
}

#[test]
fn test_favourite_volatility() {
    // 80% favourite: +25 or -100, so RMS is close to sqrt(0.8*625 + 0.2*10000) = 50.
    let regions = vec![Region::new("Ohio", 80.0, 20.0)];
    let portfolio = Portfolio::new("ada").pick("Ohio", Side::Blue);
    let config = SimConfig::seeded(4).with_iterations(20_000);
    let profile = profile_player(&portfolio, &regions, &config).unwrap();

    let vol = profile.risk_metrics.volatility;
    assert!((vol - 50.0).abs() < 3.0, "volatility {vol}");
    assert_eq!(profile.risk_metrics.risk_rating, RiskRating::Conservative);
}

// ============================================================================
// Scenario Tests
// ============================================================================

#[test]
fn test_top_scenarios_are_grouped_and_ordered() {
    let regions = vec![
        Region::new("Arizona", 30.0, 70.0),
        Region::new("Georgia", 45.0, 55.0),
        Region::new("Michigan", 60.0, 40.0),
        Region::new("Texas", 10.0, 90.0),
    ];
    let portfolio = Portfolio::new("ada")
        .pick("Arizona", Side::Red)
        .pick("Georgia", Side::Blue)
        .pick("Michigan", Side::Blue);
    let config = SimConfig::seeded(8).with_iterations(10_000);
    let profile = profile_player(&portfolio, &regions, &config).unwrap();

    let scenarios = &profile.winning_scenarios;
    assert_eq!(scenarios.len(), 3);
    for pair in scenarios.windows(2) {
        assert!(pair[0].frequency >= pair[1].frequency);
    }
    for scenario in scenarios {
        assert_eq!(scenario.picks.len(), 3);
        assert!(!scenario.picks.contains_key("Texas"));
    }
    // Most common: Arizona red, Michigan blue, Georgia red (0.7 * 0.6 * 0.55).
    let top = &scenarios[0].picks;
    assert_eq!(top["Arizona"], Side::Red);
    assert_eq!(top["Michigan"], Side::Blue);
    assert_eq!(top["Georgia"], Side::Red);
    assert_eq!(scenarios[0].win_amount, 43 + 67 - 100);
}

#[test]
fn test_only_portfolio_states_are_sampled() {
    let regions = vec![
        Region::new("Arizona", 30.0, 70.0),
        Region::new("Georgia", 45.0, 55.0),
        Region::new("Michigan", 60.0, 40.0),
    ];
    let portfolio = Portfolio::new("ada")
        .pick("Georgia", Side::Blue)
        .pick("Atlantis", Side::Red);
    let sampler = RecordingSampler::default();
    let config = SimConfig::seeded(2).with_iterations(50);
    let profile = profile_player_with(&portfolio, &regions, &config, &sampler).unwrap();

    let seen = sampler.seen.lock().unwrap();
    assert_eq!(*seen, BTreeSet::from([1]));
    assert_eq!(profile.excluded_picks, vec!["Atlantis".to_string()]);
    assert_eq!(profile.risk_metrics.win_frequency, 100.0);
}

#[test]
fn test_seeded_profiles_repeat() {
    let regions = vec![
        Region::new("Arizona", 30.0, 70.0),
        Region::new("Georgia", 45.0, 55.0),
    ];
    let portfolio = Portfolio::new("ada")
        .pick("Arizona", Side::Blue)
        .pick("Georgia", Side::Red);
    let config = SimConfig::seeded(31).with_iterations(4_321);

    let first = profile_player(&portfolio, &regions, &config).unwrap();
    let second = profile_player(&portfolio, &regions, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_oversized_portfolio_rejected() {
    let regions: Vec<Region> = (0..11)
        .map(|i| Region::new(format!("State {i}"), 50.0, 50.0))
        .collect();
    let portfolio = regions
        .iter()
        .fold(Portfolio::new("greedy"), |p, r| p.pick(r.name.clone(), Side::Blue));

    let result = profile_player(&portfolio, &regions, &SimConfig::quick());
    assert!(matches!(
        result,
        Err(SimError::TooManyPicks { picks: 11, max: 10, .. })
    ));
}

#[test]
fn test_parallel_and_sequential_profiles_agree() {
    let regions = vec![
        Region::new("Arizona", 30.0, 70.0),
        Region::new("Georgia", 45.0, 55.0),
        Region::new("Nevada", 50.0, 50.0),
    ];
    let portfolio = Portfolio::new("ada")
        .pick("Arizona", Side::Blue)
        .pick("Georgia", Side::Red)
        .pick("Nevada", Side::Blue);
    let config = SimConfig::seeded(42).with_iterations(7_500);

    let fanned = profile_player(&portfolio, &regions, &config).unwrap();
    let folded = profile_player(&portfolio, &regions, &config.clone().sequential()).unwrap();
    assert_eq!(fanned, folded);
    assert_eq!(fanned.to_json(), folded.to_json());
}
