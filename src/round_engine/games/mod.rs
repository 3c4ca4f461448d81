//! One calculator per game. Each takes the field, the course and its own
//! config and returns that game's result with standings and raw debts.

pub mod best_ball;
pub mod match_play;
pub mod nassau;
pub mod nines;
pub mod skins;
pub mod snake;
pub mod stableford;
pub mod stroke_play;
pub mod vegas;
pub mod wolf;
