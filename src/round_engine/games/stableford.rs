use crate::round_engine::{
    config::EngineConfig,
    error::GameError,
    handicap::{Allowance, NetScorer},
    helpers::{balanced_cents, require_players, sorted_holes, Ledger},
    models::{GameKind, Hole, HolePoints, Player, PlayerPoints, StablefordConfig, StablefordResult},
};

/// Points from net score against par, per player over the holes they have
/// scored. Money is the distance from the field average times the bet,
/// counted only over holes the whole field has scored, so a solo round
/// still reports points but never moves money.
pub fn calculate(
    players: &[Player],
    holes: &[Hole],
    config: &StablefordConfig,
    engine: &EngineConfig,
) -> Result<StablefordResult, GameError> {
    if players.is_empty() {
        return Ok(StablefordResult { holes: Vec::new(), standings: Vec::new(), settlements: Vec::new() });
    }
    require_players(GameKind::Stableford, players, 1, engine.max_players)?;

    let allowance = if config.full_handicap { Allowance::Full } else { Allowance::OffTheLow };
    let scorer = NetScorer::new(players, allowance);
    let mut ledger = Ledger::new(players);
    let mut settled = vec![0.0; players.len()];

    let scored: Vec<HolePoints> = sorted_holes(holes)
        .iter()
        .filter_map(|hole| {
            let points: Vec<PlayerPoints> = players
                .iter()
                .enumerate()
                .filter_map(|(i, p)| {
                    let eval = scorer.evaluate(p, hole)?;
                    let pts = f64::from(eval.stableford);
                    ledger.add_points(i, pts);
                    Some(PlayerPoints { player_id: p.id.clone(), points: pts })
                })
                .collect();
            if points.len() == players.len() {
                for (total, pp) in settled.iter_mut().zip(&points) {
                    *total += pp.points;
                }
            }
            if points.is_empty() {
                None
            } else {
                Some(HolePoints { hole_number: hole.hole_number, points })
            }
        })
        .collect();

    let average = settled.iter().sum::<f64>() / players.len() as f64;
    let amounts: Vec<f64> = settled.iter().map(|t| (t - average) * config.bet_amount).collect();
    ledger.set_balances(balanced_cents(&amounts));

    let (standings, settlements) = ledger.finish();
    Ok(StablefordResult { holes: scored, standings, settlements })
}
