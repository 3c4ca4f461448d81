//! # golf_side_games
//!
//! A stateless scoring engine for golf side games.
//!
//! Given a field of players, their hole-by-hole scores and a game
//! configuration, the engine computes standings and who owes whom. Ten games
//! are supported: Nassau, Skins, Match Play, Wolf, Nines, Stableford, Snake,
//! Stroke Play, Best Ball and Vegas.
//!
//! ## How it works
//!
//! 1. Build a [`GameRequest`] with players, the course holes and a
//!    [`GameConfig`] (the JSON form is tagged by `"game"`).
//! 2. Call [`calculate`]: the engine allocates handicap strokes, walks the
//!    holes in order and applies the game's rules. Holes without scores are
//!    skipped, never counted as zero.
//! 3. The returned [`GameOutcome`] carries the game-specific detail, per-player
//!    [`Standing`]s and raw debts. Feed one or more outcomes to
//!    [`settle_round`] to get the minimal list of payments.
//!
//! ## Key features
//!
//! - **Exact money**: amounts are accumulated in cents, so every game's
//!   standings sum to zero.
//! - **Presses**: manual and automatic presses for Nassau and Match Play,
//!   including presses on presses.
//! - **Deterministic simulation**: [`simulate_round`] with `rng_seed: Some(u64)`
//!   reproduces the same round every time.
//!
//! ## Quick start
//!
//! ```rust
//! use golf_side_games::{
//!     calculate, settle_round, GameConfig, GameRequest, Hole, Player,
//!     round_engine::models::SkinsConfig,
//! };
//!
//! let holes: Vec<Hole> = (1..=18)
//!     .map(|n| Hole { hole_number: n, par: 4, handicap_rank: n })
//!     .collect();
//! let players = vec![
//!     Player::new("ann", Some(4.0)).with_score(1, Some(4), Some(2)),
//!     Player::new("bob", Some(10.0)).with_score(1, Some(4), Some(2)),
//! ];
//!
//! let outcome = calculate(&GameRequest {
//!     players,
//!     holes,
//!     config: GameConfig::Skins(SkinsConfig { bet_amount: 5.0 }),
//! })
//! .expect("valid request");
//!
//! // bob gets a stroke on hole 1 and wins the skin.
//! let round = settle_round(&[outcome]).expect("balanced");
//! for p in &round.payments {
//!     println!("{} pays {} {:.2}", p.from_user_id, p.to_user_id, p.amount);
//! }
//! ```

pub mod round_engine;
pub mod summary_adapter;

// Convenience re-exports so callers can use `golf_side_games::calculate`
// directly without reaching into `round_engine::`.
pub use round_engine::{
    calculate, calculate_json, calculate_with, consolidate, settle_round, simulate_round,
    EngineConfig, GameConfig, GameError, GameKind, GameOutcome, GameRequest, Hole, Player,
    PlayerScore, Press, RoundSettlement, Segment, SettlementEdge, SettlementError, Standing,
    WolfDecision,
};

#[cfg(test)]
mod tests;
