use std::collections::HashSet;

use crate::round_engine::{
    config::EngineConfig,
    error::{CalculateJsonError, GameError},
    games,
    models::{GameConfig, GameOutcome, GameRequest, Player},
};

fn check_request(request: &GameRequest, engine: &EngineConfig) -> Result<(), GameError> {
    let amount = request.config.bet_amount();
    if !amount.is_finite() || amount < 0.0 {
        return Err(GameError::InvalidBet { amount });
    }
    if amount > engine.max_bet_amount {
        return Err(GameError::BetAboveLimit { amount, limit: engine.max_bet_amount });
    }
    check_unique(&request.players)
}

fn check_unique(players: &[Player]) -> Result<(), GameError> {
    let mut seen = HashSet::new();
    match players.iter().find(|p| !seen.insert(p.id.as_str())) {
        Some(dup) => Err(GameError::DuplicatePlayer(dup.id.clone())),
        None => Ok(()),
    }
}

/// Score one game with the default engine limits.
pub fn calculate(request: &GameRequest) -> Result<GameOutcome, GameError> {
    calculate_with(request, &EngineConfig::default())
}

/// Core dispatch: validates the shared fields, then routes to the game.
pub fn calculate_with(request: &GameRequest, engine: &EngineConfig) -> Result<GameOutcome, GameError> {
    let kind = request.config.kind();
    let (players, holes) = (request.players.as_slice(), request.holes.as_slice());

    let outcome = check_request(request, engine).and_then(|()| match &request.config {
        GameConfig::Nassau(c) =>
            games::nassau::calculate(players, holes, c, engine).map(GameOutcome::Nassau),

        GameConfig::Skins(c) =>
            games::skins::calculate(players, holes, c, engine).map(GameOutcome::Skins),

        GameConfig::MatchPlay(c) =>
            games::match_play::calculate(players, holes, c, engine).map(GameOutcome::MatchPlay),

        GameConfig::Wolf(c) =>
            games::wolf::calculate(players, holes, c, engine).map(GameOutcome::Wolf),

        GameConfig::Nines(c) =>
            games::nines::calculate(players, holes, c, engine).map(GameOutcome::Nines),

        GameConfig::Stableford(c) =>
            games::stableford::calculate(players, holes, c, engine).map(GameOutcome::Stableford),

        GameConfig::Snake(c) =>
            games::snake::calculate(players, holes, c, engine).map(GameOutcome::Snake),

        GameConfig::StrokePlay(c) =>
            games::stroke_play::calculate(players, holes, c, engine).map(GameOutcome::StrokePlay),

        GameConfig::BestBall(c) =>
            games::best_ball::calculate(players, holes, c, engine).map(GameOutcome::BestBall),

        GameConfig::Vegas(c) =>
            games::vegas::calculate(players, holes, c, engine).map(GameOutcome::Vegas),
    });

    match &outcome {
        Ok(o) => log::info!(
            "{kind}: scored {} players, {} debts",
            o.standings().len(),
            o.settlements().len()
        ),
        Err(e) => log::warn!("{kind}: rejected: {e}"),
    }
    outcome
}

/// Parse a JSON request and score it.
pub fn calculate_json(json: &str, engine: &EngineConfig) -> Result<GameOutcome, CalculateJsonError> {
    let request: GameRequest = serde_json::from_str(json)?;
    Ok(calculate_with(&request, engine)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round_engine::models::{GameKind, Hole, SkinsConfig};

    fn skins(bet: f64, players: Vec<Player>) -> GameRequest {
        GameRequest {
            players,
            holes: vec![Hole { hole_number: 1, par: 4, handicap_rank: 1 }],
            config: GameConfig::Skins(SkinsConfig { bet_amount: bet }),
        }
    }

    fn two() -> Vec<Player> {
        vec![
            Player::new("a", None).with_score(1, Some(3), Some(2)),
            Player::new("b", None).with_score(1, Some(4), Some(2)),
        ]
    }

    #[test]
    fn dispatches_on_the_game_tag() {
        let outcome = calculate(&skins(5.0, two())).unwrap();
        assert_eq!(outcome.kind(), GameKind::Skins);
        assert_eq!(outcome.standings()[0].money, 5.0);
    }

    #[test]
    fn negative_and_nan_bets_are_rejected() {
        assert!(matches!(calculate(&skins(-1.0, two())), Err(GameError::InvalidBet { .. })));
        assert!(matches!(calculate(&skins(f64::NAN, two())), Err(GameError::InvalidBet { .. })));
    }

    #[test]
    fn bet_above_limit_is_rejected() {
        let engine = EngineConfig { max_bet_amount: 50.0, ..EngineConfig::default() };
        let err = calculate_with(&skins(60.0, two()), &engine).unwrap_err();
        assert_eq!(err, GameError::BetAboveLimit { amount: 60.0, limit: 50.0 });
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let players = vec![Player::new("a", None), Player::new("a", None)];
        assert_eq!(calculate(&skins(5.0, players)), Err(GameError::DuplicatePlayer("a".into())));
    }

    #[test]
    fn parses_camel_case_requests() {
        let json = r#"{
            "players": [
                {"id": "a", "courseHandicap": null, "scores": {"1": {"holeNumber": 1, "strokes": 5, "putts": 3}}},
                {"id": "b", "courseHandicap": 4.4}
            ],
            "config": {"game": "snake", "betAmount": 2.0}
        }"#;
        let outcome = calculate_json(json, &EngineConfig::default()).unwrap();
        match outcome {
            GameOutcome::Snake(r) => assert_eq!(r.holder_id.as_deref(), Some("a")),
            other => panic!("expected snake, got {:?}", other.kind()),
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = calculate_json("{\"players\": ", &EngineConfig::default()).unwrap_err();
        assert!(matches!(err, CalculateJsonError::Parse(_)));
    }
}
