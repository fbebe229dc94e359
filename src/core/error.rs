//! Error type shared by the engine, the explorer and the CLI helpers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: iteration count must be at least 1")]
    ZeroIterations,

    #[error("invalid configuration: no players to simulate")]
    NoPlayers,

    #[error("win probability {value} is outside (0, 100]")]
    InvalidProbability { value: f64 },

    #[error("national shift {shift} exceeds the allowed range of ±{limit} points")]
    ShiftOutOfRange { shift: f64, limit: f64 },

    #[error("{player} has {picks} picks, the maximum is {max}")]
    TooManyPicks {
        player: String,
        picks: usize,
        max: usize,
    },

    #[error("player not found: {0}")]
    UnknownPlayer(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
