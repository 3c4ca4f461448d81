//! Engine-wide limits and default tables.
//!
//! Per-game options live on [`GameConfig`](crate::round_engine::models::GameConfig);
//! this struct holds what a club or deployment sets once.

use serde::{Deserialize, Serialize};
use crate::round_engine::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Ceiling on any single game's `bet_amount`.
    pub max_bet_amount: f64,
    /// Holes down before a press may be opened (and auto-press fires).
    pub press_threshold: u32,
    /// Deepest "press the press" chain the auto-press will open.
    pub max_press_depth: u32,
    pub nines_points_three: Vec<f64>,
    pub nines_points_four: Vec<f64>,
    /// Stake multiplier applied to a blind lone wolf.
    pub wolf_blind_multiplier: f64,
    pub max_players: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_bet_amount: 1_000.0,
            press_threshold: 2,
            max_press_depth: 4,
            nines_points_three: vec![5.0, 3.0, 1.0],
            nines_points_four: vec![5.0, 3.0, 1.0, 0.0],
            wolf_blind_multiplier: 2.0,
            max_players: 16,
        }
    }
}

impl EngineConfig {
    /// Parse from JSON; missing fields fall back to [`Default`].
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_bet_amount.is_finite() || self.max_bet_amount < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "maxBetAmount must be a non-negative number (got {})",
                self.max_bet_amount
            )));
        }
        if self.press_threshold == 0 {
            return Err(ConfigError::Invalid("pressThreshold must be at least 1".into()));
        }
        if !self.wolf_blind_multiplier.is_finite() || self.wolf_blind_multiplier < 1.0 {
            return Err(ConfigError::Invalid("wolfBlindMultiplier must be at least 1".into()));
        }
        if self.max_players == 0 {
            return Err(ConfigError::Invalid("maxPlayers must be at least 1".into()));
        }
        check_points_table(&self.nines_points_three, 3).map_err(ConfigError::Invalid)?;
        check_points_table(&self.nines_points_four, 4).map_err(ConfigError::Invalid)?;
        Ok(())
    }

    /// Default Nines table for a field of `players`.
    pub fn nines_table(&self, players: usize) -> Option<&[f64]> {
        match players {
            3 => Some(&self.nines_points_three),
            4 => Some(&self.nines_points_four),
            _ => None,
        }
    }
}

/// A Nines table needs one non-negative, non-increasing entry per player summing to 9.
pub fn check_points_table(table: &[f64], players: usize) -> Result<(), String> {
    if table.len() != players {
        return Err(format!("{} entries for {} players", table.len(), players));
    }
    if table.iter().any(|p| !p.is_finite() || *p < 0.0) {
        return Err("entries must be non-negative numbers".into());
    }
    if table.windows(2).any(|w| w[1] > w[0]) {
        return Err("entries must not increase with rank".into());
    }
    let total: f64 = table.iter().sum();
    if (total - 9.0).abs() > 1e-9 {
        return Err(format!("entries sum to {total}, not 9"));
    }
    Ok(())
}
