use crate::round_engine::{
    config::EngineConfig,
    error::GameError,
    handicap::{Allowance, NetScorer},
    helpers::{from_cents, require_players, sorted_holes, to_cents, Ledger},
    models::{GameKind, Hole, Player, SkinHole, SkinsConfig, SkinsResult},
};

/// Fold state threaded through the holes.
#[derive(Debug, Clone, Copy, Default)]
struct Pot {
    carryover: i64,
    won: i64,
    compared: u32,
}

/// Sole low net takes the skin (its bet plus any carryover); a tie for low
/// carries the bet forward. Holes missing any participant's score are
/// skipped entirely. Each opponent pays the skin value to its winner.
pub fn calculate(
    players: &[Player],
    holes: &[Hole],
    config: &SkinsConfig,
    engine: &EngineConfig,
) -> Result<SkinsResult, GameError> {
    if !players.is_empty() {
        require_players(GameKind::Skins, players, 2, engine.max_players)?;
    }

    let scorer = NetScorer::new(players, Allowance::OffTheLow);
    let bet = to_cents(config.bet_amount);
    let mut ledger = Ledger::new(players);
    let mut skins = Vec::new();

    let pot = if players.is_empty() {
        Pot::default()
    } else {
        sorted_holes(holes).iter().fold(Pot::default(), |pot, hole| {
            let nets: Option<Vec<i32>> = players.iter().map(|p| scorer.net(p, hole)).collect();
            let Some(nets) = nets else {
                return pot;
            };
            let low = nets.iter().copied().min().unwrap_or_default();
            let mut lows = nets.iter().enumerate().filter(|(_, n)| **n == low).map(|(i, _)| i);
            let value = bet + pot.carryover;
            let compared = pot.compared + 1;

            match (lows.next(), lows.next()) {
                (Some(winner), None) => {
                    for loser in (0..players.len()).filter(|&i| i != winner) {
                        ledger.pay(loser, winner, value);
                    }
                    ledger.add_points(winner, 1.0);
                    skins.push(SkinHole {
                        hole_number: hole.hole_number,
                        winner_id: Some(players[winner].id.clone()),
                        value: from_cents(value),
                        carryover_after: 0.0,
                    });
                    Pot { carryover: 0, won: pot.won + value, compared }
                }
                _ => {
                    log::debug!("skins: hole {} tied, carryover now {}", hole.hole_number, from_cents(value));
                    skins.push(SkinHole {
                        hole_number: hole.hole_number,
                        winner_id: None,
                        value: from_cents(value),
                        carryover_after: from_cents(value),
                    });
                    Pot { carryover: value, won: pot.won, compared }
                }
            }
        })
    };

    debug_assert_eq!(pot.won + pot.carryover, bet * i64::from(pot.compared));
    let (standings, settlements) = ledger.finish();
    Ok(SkinsResult {
        holes: skins,
        total_pot: from_cents(pot.won),
        carryover: from_cents(pot.carryover),
        holes_compared: pot.compared,
        standings,
        settlements,
    })
}
