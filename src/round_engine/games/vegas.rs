use crate::round_engine::{
    config::EngineConfig,
    error::GameError,
    handicap::{Allowance, NetScorer},
    helpers::{fully_scored, require_players, resolve_teams, sorted_holes, to_cents, Ledger},
    models::{GameKind, Hole, Player, VegasConfig, VegasHole, VegasResult},
};

/// Highest score a single digit group can carry.
const MAX_SCORE: u32 = 99;

fn concat(first: u32, second: u32) -> u32 {
    let mut shift = 10;
    while second >= shift {
        shift *= 10;
    }
    first * shift + second
}

/// A pair's number: low score first, unless one score reached 10, which
/// then leads. `flipped` forces the high score first. Scores above 99 are
/// read as 99.
pub fn team_number(a: u32, b: u32, flipped: bool) -> u32 {
    let (a, b) = (a.min(MAX_SCORE), b.min(MAX_SCORE));
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    if flipped || high >= 10 {
        concat(high, low)
    } else {
        concat(low, high)
    }
}

/// Two pairs form two-digit numbers each hole; the lower number wins the
/// difference. Each player pays or collects the running difference times
/// the bet against the opponent in the same position.
pub fn calculate(
    players: &[Player],
    holes: &[Hole],
    config: &VegasConfig,
    _engine: &EngineConfig,
) -> Result<VegasResult, GameError> {
    if players.is_empty() {
        return Ok(VegasResult { holes: Vec::new(), team_one_points: 0, standings: Vec::new(), settlements: Vec::new() });
    }
    require_players(GameKind::Vegas, players, 4, 4)?;
    let (one, two) = resolve_teams(players, &config.team_one, &config.team_two)?;
    let scorer = NetScorer::new(players, Allowance::OffTheLow);

    let played: Vec<VegasHole> = sorted_holes(holes)
        .iter()
        .filter(|h| fully_scored(players, h.hole_number))
        .filter_map(|hole| {
            let nets = |team: [usize; 2]| -> Option<[i32; 2]> {
                Some([scorer.net(&players[team[0]], hole)?, scorer.net(&players[team[1]], hole)?])
            };
            let (n1, n2) = (nets(one)?, nets(two)?);
            let birdie = |n: [i32; 2]| config.flip_on_birdie && n.iter().any(|&s| s < i32::from(hole.par));
            let digits = |n: [i32; 2]| (n[0].max(0) as u32, n[1].max(0) as u32);
            let (a1, b1) = digits(n1);
            let (a2, b2) = digits(n2);
            let team_one_number = team_number(a1, b1, birdie(n2));
            let team_two_number = team_number(a2, b2, birdie(n1));
            Some(VegasHole {
                hole_number: hole.hole_number,
                team_one_number,
                team_two_number,
                swing: i64::from(team_two_number) - i64::from(team_one_number),
            })
        })
        .collect();

    let team_one_points: i64 = played.iter().map(|h| h.swing).sum();
    let mut ledger = Ledger::new(players);
    let stake = to_cents(config.bet_amount) * team_one_points;
    for (&winner, &loser) in one.iter().zip(two.iter()) {
        ledger.pay(loser, winner, stake);
    }
    for &i in &one {
        ledger.add_points(i, team_one_points as f64);
    }
    for &i in &two {
        ledger.add_points(i, -team_one_points as f64);
    }
    log::debug!("vegas: team one {:+} points over {} holes", team_one_points, played.len());

    let (standings, settlements) = ledger.finish();
    Ok(VegasResult { holes: played, team_one_points, standings, settlements })
}
