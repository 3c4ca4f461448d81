use crate::round_engine::{
    config::EngineConfig,
    error::GameError,
    handicap::{Allowance, NetScorer},
    helpers::{fully_scored, require_players, sorted_holes, split_cents, to_cents, Ledger},
    models::{GameKind, Hole, Player, StrokePlayConfig, StrokePlayResult, StrokeTotal},
};

/// Lowest net total over the holes everyone has finished. Each player
/// outside the winners pays the bet, split evenly across tied winners.
/// Standing points carry the net total.
pub fn calculate(
    players: &[Player],
    holes: &[Hole],
    config: &StrokePlayConfig,
    engine: &EngineConfig,
) -> Result<StrokePlayResult, GameError> {
    if players.is_empty() {
        return Ok(StrokePlayResult {
            totals: Vec::new(),
            winner_ids: Vec::new(),
            standings: Vec::new(),
            settlements: Vec::new(),
        });
    }
    require_players(GameKind::StrokePlay, players, 1, engine.max_players)?;

    let allowance = if config.full_handicap { Allowance::Full } else { Allowance::OffTheLow };
    let scorer = NetScorer::new(players, allowance);
    let counted: Vec<Hole> = sorted_holes(holes)
        .into_iter()
        .filter(|h| fully_scored(players, h.hole_number))
        .collect();

    let totals: Vec<StrokeTotal> = players
        .iter()
        .map(|p| {
            let (gross, net) = counted
                .iter()
                .filter_map(|h| scorer.evaluate(p, h))
                .fold((0, 0), |(g, n), e| (g + e.gross, n + e.net));
            StrokeTotal { player_id: p.id.clone(), gross, net, holes_counted: counted.len() as u32 }
        })
        .collect();

    let mut ledger = Ledger::new(players);
    for (i, t) in totals.iter().enumerate() {
        ledger.add_points(i, f64::from(t.net));
    }

    let mut winner_ids = Vec::new();
    if !counted.is_empty() {
        let best = totals.iter().map(|t| t.net).min().unwrap_or_default();
        let winners: Vec<usize> = (0..players.len()).filter(|&i| totals[i].net == best).collect();
        if winners.len() < players.len() {
            let shares = split_cents(to_cents(config.bet_amount), winners.len());
            for loser in (0..players.len()).filter(|i| !winners.contains(i)) {
                for (&w, &share) in winners.iter().zip(&shares) {
                    ledger.pay(loser, w, share);
                }
            }
        }
        winner_ids = winners.iter().map(|&i| players[i].id.clone()).collect();
        log::debug!("stroke play: low net {} over {} holes", best, counted.len());
    }

    let (standings, settlements) = ledger.finish();
    Ok(StrokePlayResult { totals, winner_ids, standings, settlements })
}
