//! Pick'em simulator CLI.
//!
//! Reads regions and player portfolios from a JSON file and prints win
//! odds, a risk profile, a what-if scenario or the standings.
//!
//! Usage:
//!   cargo run --bin simulate -- --input picks.json <COMMAND> [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate -- -i picks.json population -n 20000
//!   cargo run --bin simulate -- -i picks.json profile --player ada --seed 42
//!   cargo run --bin simulate -- -i picks.json explore --shift=-3
//!   cargo run --bin simulate -- -i picks.json explore -o Georgia=red -o Arizona=blue

use clap::{Args, Parser, Subcommand};
use pickem::core::constants::DEFAULT_ITERATIONS;
use pickem::election::standings;
use pickem::simulator::{
    explore, most_likely, profile_player, profile_player_with, simulate_population,
    simulate_population_with, standings_text, uniform_shift, NationalSwingSampler, SimConfig,
};
use pickem::utils::persistence::{load_input, load_json, save_json, timestamped_filename};
use pickem::{Outcomes, Side, SimError};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "simulate", version, about = "Election pick'em outcome simulator")]
struct Cli {
    /// JSON file with `regions` and `portfolios`
    #[arg(short, long)]
    input: PathBuf,

    /// Also save the report as JSON to a timestamped file
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Warnings and errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Number of simulated universes
    #[arg(short = 'n', long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: u32,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Correlate states through a uniform national swing of at most ±SWING points
    #[arg(long)]
    swing: Option<f64>,
}

impl RunArgs {
    fn config(&self) -> SimConfig {
        SimConfig {
            iterations: self.iterations,
            seed: self.seed,
            ..Default::default()
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Every player's chance of finishing on top, and the states that decide it
    Population(RunArgs),

    /// One player's risk rating, volatility and most common scenarios
    Profile {
        #[arg(short, long)]
        player: String,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Score everyone against fixed outcomes
    Explore {
        /// STATE=red|blue, repeatable; applied on top of --shift/--most-likely
        #[arg(short = 'o', long = "outcome", value_parser = parse_outcome)]
        outcomes: Vec<(String, Side)>,

        /// Uniform national shift in points toward blue (negative for red)
        #[arg(long, allow_negative_numbers = true)]
        shift: Option<f64>,

        /// Start from every state's favourite
        #[arg(long, conflicts_with = "shift")]
        most_likely: bool,
    },

    /// Leaderboard by potential winnings, or by returns once results exist
    Standings {
        /// JSON map of official results, e.g. {"Georgia": "red"}
        #[arg(long)]
        results: Option<PathBuf>,
    },
}

fn parse_outcome(value: &str) -> Result<(String, Side), String> {
    let (state, side) = value
        .rsplit_once('=')
        .ok_or_else(|| format!("expected STATE=red|blue, got '{value}'"))?;
    let side = match side.trim().to_ascii_lowercase().as_str() {
        "red" => Side::Red,
        "blue" => Side::Blue,
        other => return Err(format!("unknown side '{other}'")),
    };
    Ok((state.trim().to_string(), side))
}

fn init_tracing(verbose: bool, quiet: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else if quiet {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn emit<T: Serialize>(text: String, report: &T, json: bool, prefix: &str) -> Result<(), SimError> {
    println!("{}", text);
    if json {
        let filename = timestamped_filename(prefix);
        save_json(&PathBuf::from(&filename), report)?;
        info!(file = %filename, "JSON report saved");
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), SimError> {
    let input = load_input(&cli.input)?;
    info!(
        regions = input.regions.len(),
        players = input.portfolios.len(),
        "input loaded"
    );

    match cli.command {
        Command::Population(run) => {
            let config = run.config();
            let report = match run.swing {
                Some(max_swing) => simulate_population_with(
                    &input.portfolios,
                    &input.regions,
                    &config,
                    &NationalSwingSampler { max_swing },
                )?,
                None => simulate_population(&input.portfolios, &input.regions, &config)?,
            };
            emit(report.to_text(), &report, cli.json, "population")
        }
        Command::Profile { player, run } => {
            let portfolio = input
                .portfolios
                .iter()
                .find(|p| p.display_name == player)
                .ok_or(SimError::UnknownPlayer(player))?;
            let config = run.config();
            let profile = match run.swing {
                Some(max_swing) => profile_player_with(
                    portfolio,
                    &input.regions,
                    &config,
                    &NationalSwingSampler { max_swing },
                )?,
                None => profile_player(portfolio, &input.regions, &config)?,
            };
            emit(profile.to_text(), &profile, cli.json, "profile")
        }
        Command::Explore {
            outcomes,
            shift,
            most_likely: favourites,
        } => {
            let mut assignment = match shift {
                Some(shift) => uniform_shift(&input.regions, shift)?,
                None if favourites => most_likely(&input.regions),
                None => Outcomes::new(),
            };
            assignment.extend(outcomes);
            let result = explore(&input.portfolios, &input.regions, &assignment);
            emit(result.to_text(), &result, cli.json, "scenario")
        }
        Command::Standings { results } => {
            let results: Option<Outcomes> = results.as_deref().map(load_json::<Outcomes>).transpose()?;
            let rows = standings(&input.portfolios, &input.regions, results.as_ref());
            emit(standings_text(&rows), &rows, cli.json, "standings")
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "simulation failed");
            ExitCode::FAILURE
        }
    }
}
