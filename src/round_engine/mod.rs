//! Core round engine: net scoring, game calculators, presses and settlement.
//!
//! ## Module overview
//!
//! | Module       | Purpose |
//! |--------------|---------|
//! | `models`     | Shared types: players, holes, per-game configs and results |
//! | `config`     | Engine-wide limits and default tables (`EngineConfig`) |
//! | `error`      | `GameError`, `SettlementError`, `ConfigError` |
//! | `handicap`   | Stroke allocation, net scores, Stableford points |
//! | `helpers`    | Cents arithmetic, head-to-head tallies, the per-game ledger |
//! | `press`      | Press forest and auto-press for Nassau and Match Play |
//! | `games`      | One calculator per game |
//! | `calculator` | Single entry point `calculate()`, dispatches on the game tag |
//! | `settlement` | Consolidates raw debts into minimal payments |
//! | `simulator`  | Seeded random rounds |

pub mod calculator;
pub mod config;
pub mod error;
pub mod games;
pub mod handicap;
pub mod helpers;
pub mod models;
pub mod press;
pub mod settlement;
pub mod simulator;

pub use calculator::{calculate, calculate_json, calculate_with};
pub use config::EngineConfig;
pub use error::{CalculateJsonError, ConfigError, GameError, SettlementError};
pub use models::{
    GameConfig, GameKind, GameOutcome, GameRequest, Hole, Player, PlayerId, PlayerScore, Press,
    Segment, SettlementEdge, Standing, WolfDecision,
};
pub use settlement::{consolidate, settle_round, RoundSettlement, SettlementBook};
pub use simulator::{simulate_round, SimulatedRound, SimulationRequest};
