use std::collections::BTreeSet;

use crate::round_engine::{
    config::EngineConfig,
    error::GameError,
    helpers::{require_players, to_cents, Ledger},
    models::{GameKind, Hole, Player, SnakeConfig, SnakeEntry, SnakeEvent, SnakeResult},
};

const THREE_PUTT: u32 = 3;

/// Every hole number any player has a putt count for, plus the course holes.
fn hole_numbers(players: &[Player], holes: &[Hole]) -> BTreeSet<u8> {
    players
        .iter()
        .flat_map(|p| p.scores.values().filter(|s| s.putts.is_some()).map(|s| s.hole_number))
        .chain(holes.iter().map(|h| h.hole_number))
        .collect()
}

/// The snake passes to whoever three-putts, hole by hole. Within one hole the
/// most putts takes it; equal counts go to the later player in field order.
/// The final holder pays the bet to each other player.
pub fn calculate(
    players: &[Player],
    holes: &[Hole],
    config: &SnakeConfig,
    engine: &EngineConfig,
) -> Result<SnakeResult, GameError> {
    if players.is_empty() {
        return Ok(SnakeResult {
            holder_id: None,
            history: Vec::new(),
            entries: Vec::new(),
            standings: Vec::new(),
            settlements: Vec::new(),
        });
    }
    require_players(GameKind::Snake, players, 2, engine.max_players)?;

    let mut three_putts = vec![0u32; players.len()];
    let mut history = Vec::new();
    let holder = hole_numbers(players, holes).into_iter().fold(None, |holder, hole| {
        let mut taker: Option<(usize, u32)> = None;
        for (i, p) in players.iter().enumerate() {
            let Some(putts) = p.putts_on(hole).filter(|&n| n >= THREE_PUTT) else {
                continue;
            };
            three_putts[i] += 1;
            if taker.map_or(true, |(_, most)| putts >= most) {
                taker = Some((i, putts));
            }
        }
        match taker {
            Some((i, putts)) => {
                history.push(SnakeEvent { hole_number: hole, player_id: players[i].id.clone(), putts });
                Some(i)
            }
            None => holder,
        }
    });

    let mut ledger = Ledger::new(players);
    if let Some(h) = holder {
        let bet = to_cents(config.bet_amount);
        for other in (0..players.len()).filter(|&i| i != h) {
            ledger.pay(h, other, bet);
        }
        log::debug!("snake: {} holds after {} passes", players[h].id, history.len());
    }

    let entries = players
        .iter()
        .zip(&three_putts)
        .enumerate()
        .map(|(i, (p, n))| SnakeEntry { player_id: p.id.clone(), holds_snake: holder == Some(i), three_putts: *n })
        .collect();
    let (mut standings, settlements) = ledger.finish();
    for s in &mut standings {
        s.points = s.money;
    }
    Ok(SnakeResult {
        holder_id: holder.map(|h| players[h].id.clone()),
        history,
        entries,
        standings,
        settlements,
    })
}
