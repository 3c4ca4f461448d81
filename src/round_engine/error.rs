//! Error types.
//!
//! `GameError` is the configuration-error variant of a calculation: callers
//! render its `Display` text inline ("Nassau requires exactly 2 players").
//! Missing scores are never an error; calculators skip those holes.

use thiserror::Error;
use crate::round_engine::models::GameKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("{game} requires {expected} players")]
    WrongPlayerCount {
        game: GameKind,
        /// Human-readable range, e.g. "exactly 2" or "2 to 16".
        expected: String,
        actual: usize,
    },

    #[error("bet amount must be a non-negative number (got {amount})")]
    InvalidBet { amount: f64 },

    #[error("bet amount {amount} exceeds the limit of {limit}")]
    BetAboveLimit { amount: f64, limit: f64 },

    #[error("player {0} appears more than once")]
    DuplicatePlayer(String),

    #[error("unknown player {0}")]
    UnknownPlayer(String),

    #[error("invalid points table: {0}")]
    InvalidPointsTable(String),

    #[error("invalid press {press_id}: {reason}")]
    InvalidPress { press_id: String, reason: String },

    #[error("hole {hole} has scores but no wolf decision")]
    MissingWolfDecision { hole: u8 },

    #[error("invalid wolf decision on hole {hole}: {reason}")]
    InvalidWolfDecision { hole: u8, reason: String },

    #[error("invalid wolf rotation: {0}")]
    InvalidRotation(String),

    #[error("invalid teams: {0}")]
    InvalidTeams(String),
}

/// Failures of the settlement consolidator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettlementError {
    #[error("debt from {from} to {to} has invalid amount {amount}")]
    InvalidAmount { from: String, to: String, amount: f64 },

    #[error("player {0} cannot owe themselves")]
    SelfPayment(String),

    #[error("balances do not sum to zero (residual {residual_cents} cents)")]
    Unbalanced { residual_cents: i64 },
}

/// Failures of [`calculate_json`](crate::round_engine::calculator::calculate_json).
#[derive(Debug, Error)]
pub enum CalculateJsonError {
    #[error("could not parse game request: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Game(#[from] GameError),
}

/// Failures loading an [`EngineConfig`](crate::round_engine::config::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not parse engine config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid engine config: {0}")]
    Invalid(String),
}
