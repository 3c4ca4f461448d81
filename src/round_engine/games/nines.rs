use crate::round_engine::{
    config::{check_points_table, EngineConfig},
    error::GameError,
    handicap::{Allowance, NetScorer},
    helpers::{balanced_cents, fully_scored, require_players, sorted_holes, Ledger},
    models::{GameKind, Hole, HolePoints, Player, PlayerPoints, NinesConfig, NinesResult},
};

/// Split the table by rank. Players tied on a net score share the points of
/// every rank they jointly occupy.
pub fn split_points(nets: &[i32], table: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..nets.len()).collect();
    order.sort_by_key(|&i| nets[i]);

    let mut points = vec![0.0; nets.len()];
    let mut rank = 0;
    while rank < order.len() {
        let net = nets[order[rank]];
        let tied = order[rank..].iter().take_while(|&&i| nets[i] == net).count();
        let share = table[rank..rank + tied].iter().sum::<f64>() / tied as f64;
        for &i in &order[rank..rank + tied] {
            points[i] = share;
        }
        rank += tied;
    }
    points
}

/// Nine points per fully scored hole, split by net rank. Money is each
/// player's distance from the field average times the bet.
pub fn calculate(
    players: &[Player],
    holes: &[Hole],
    config: &NinesConfig,
    engine: &EngineConfig,
) -> Result<NinesResult, GameError> {
    if players.is_empty() {
        return Ok(NinesResult { points_table: Vec::new(), holes: Vec::new(), standings: Vec::new(), settlements: Vec::new() });
    }
    require_players(GameKind::Nines, players, 3, 4)?;

    let table: Vec<f64> = match &config.points_table {
        Some(t) => t.clone(),
        None => engine.nines_table(players.len()).map(<[f64]>::to_vec).unwrap_or_default(),
    };
    check_points_table(&table, players.len()).map_err(GameError::InvalidPointsTable)?;

    let scorer = NetScorer::new(players, Allowance::OffTheLow);
    let mut ledger = Ledger::new(players);
    let mut scored = Vec::new();

    for hole in sorted_holes(holes).iter().filter(|h| fully_scored(players, h.hole_number)) {
        let nets: Vec<i32> = players.iter().filter_map(|p| scorer.net(p, hole)).collect();
        let split = split_points(&nets, &table);
        debug_assert!((split.iter().sum::<f64>() - 9.0).abs() < 1e-9);
        for (i, p) in split.iter().enumerate() {
            ledger.add_points(i, *p);
        }
        scored.push(HolePoints {
            hole_number: hole.hole_number,
            points: players
                .iter()
                .zip(&split)
                .map(|(p, pts)| PlayerPoints { player_id: p.id.clone(), points: *pts })
                .collect(),
        });
    }

    let totals: Vec<f64> = (0..players.len()).map(|i| ledger.points(i)).collect();
    let average = totals.iter().sum::<f64>() / players.len() as f64;
    let amounts: Vec<f64> = totals.iter().map(|t| (t - average) * config.bet_amount).collect();
    ledger.set_balances(balanced_cents(&amounts));
    log::debug!("nines: {} holes scored, average {:.2} points", scored.len(), average);

    let (standings, settlements) = ledger.finish();
    Ok(NinesResult { points_table: table, holes: scored, standings, settlements })
}
