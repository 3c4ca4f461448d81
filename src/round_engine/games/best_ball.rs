use crate::round_engine::{
    config::EngineConfig,
    error::GameError,
    handicap::{Allowance, NetScorer},
    helpers::{duels, match_progress, require_players, resolve_teams, result_text, sorted_holes, status_text, to_cents, Ledger},
    models::{BestBallConfig, BestBallResult, GameKind, Hole, MatchState, Player},
};

/// Best net of a pair; `None` until at least one of them has scored.
fn team_net(scorer: &NetScorer, players: &[Player], team: [usize; 2], hole: &Hole) -> Option<i32> {
    team.iter().filter_map(|&i| scorer.net(&players[i], hole)).min()
}

/// Four-ball match between two fixed pairs with match-play close-out.
/// Once decided, each loser pays the bet to the winner in the same position.
pub fn calculate(
    players: &[Player],
    holes: &[Hole],
    config: &BestBallConfig,
    _engine: &EngineConfig,
) -> Result<BestBallResult, GameError> {
    if players.is_empty() {
        return Ok(BestBallResult {
            state: MatchState::InProgress,
            status: status_text(0),
            result: None,
            lead: 0,
            holes_played: 0,
            closed_on_hole: None,
            standings: Vec::new(),
            settlements: Vec::new(),
        });
    }
    require_players(GameKind::BestBall, players, 4, 4)?;
    let (one, two) = resolve_teams(players, &config.team_one, &config.team_two)?;

    let scorer = NetScorer::new(players, Allowance::OffTheLow);
    let course = sorted_holes(holes);
    let ds = duels(&course, |h| {
        Some((team_net(&scorer, players, one, h)?, team_net(&scorer, players, two, h)?))
    });
    let window: Vec<u8> = course.iter().map(|h| h.hole_number).collect();
    let progress = match_progress(&ds, &window);

    let mut ledger = Ledger::new(players);
    if progress.is_decided() {
        let stake = to_cents(config.bet_amount) * i64::from(progress.lead.signum());
        for (&winner, &loser) in one.iter().zip(two.iter()) {
            ledger.pay(loser, winner, stake);
        }
    }
    log::debug!("best ball: {} after {} holes", status_text(progress.lead), progress.holes_played);

    let (standings, settlements) = ledger.finish();
    Ok(BestBallResult {
        state: progress.state,
        status: status_text(progress.lead),
        result: result_text(&progress),
        lead: progress.lead,
        holes_played: progress.holes_played,
        closed_on_hole: progress.closed_on_hole,
        standings,
        settlements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course() -> Vec<Hole> {
        (1..=18).map(|n| Hole { hole_number: n, par: 4, handicap_rank: n }).collect()
    }

    fn four(strokes: [&[u32]; 4]) -> Vec<Player> {
        ["a", "b", "c", "d"]
            .iter()
            .zip(strokes)
            .map(|(id, s)| {
                let mut p = Player::new(*id, None);
                for (i, st) in s.iter().enumerate() {
                    p.record(i as u8 + 1, Some(*st), None);
                }
                p
            })
            .collect()
    }

    fn cfg() -> BestBallConfig {
        BestBallConfig {
            bet_amount: 10.0,
            team_one: vec!["a".into(), "b".into()],
            team_two: vec!["c".into(), "d".into()],
        }
    }

    #[test]
    fn better_ball_counts_for_the_team() {
        // b's 3 beats c/d's best 4 on hole 1; a's 6 is ignored.
        let players = four([&[6], &[3], &[4], &[5]]);
        let r = calculate(&players, &course(), &cfg(), &EngineConfig::default()).unwrap();
        assert_eq!(r.status, "1 UP");
        assert_eq!(r.state, MatchState::InProgress);
        assert!(r.settlements.is_empty());
    }

    #[test]
    fn decided_match_pays_each_pairing() {
        let players = four([&[3; 18], &[5; 18], &[4; 18], &[4; 18]]);
        let r = calculate(&players, &course(), &cfg(), &EngineConfig::default()).unwrap();
        assert_eq!(r.result.as_deref(), Some("10&8"));
        let money: Vec<f64> = r.standings.iter().map(|s| s.money).collect();
        assert_eq!(money, vec![10.0, 10.0, -10.0, -10.0]);
        assert_eq!(r.settlements.len(), 2);
    }

    #[test]
    fn team_two_can_win() {
        let mut c = [4u32; 18];
        c[17] = 3;
        let players = four([&[4; 18], &[4; 18], &c, &[4; 18]]);
        let r = calculate(&players, &course(), &cfg(), &EngineConfig::default()).unwrap();
        assert_eq!(r.result.as_deref(), Some("1 UP"));
        assert_eq!(r.status, "1 DOWN");
        assert_eq!(r.standings[2].money, 10.0);
        assert_eq!(r.standings[0].money, -10.0);
    }

    #[test]
    fn team_gap_mid_round_still_decides_after_eighteen() {
        let mut a = [4u32; 18];
        a[17] = 3;
        let mut players = four([&a, &[4; 18], &[4; 18], &[4; 18]]);
        players[2].record(7, None, None);
        players[3].record(7, None, None);
        let r = calculate(&players, &course(), &cfg(), &EngineConfig::default()).unwrap();
        assert_eq!(r.holes_played, 17);
        assert_eq!(r.state, MatchState::Won);
        assert_eq!(r.result.as_deref(), Some("1 UP"));
        assert_eq!(r.standings[1].money, 10.0);
        assert_eq!(r.standings[3].money, -10.0);
    }

    #[test]
    fn overlapping_teams_are_rejected() {
        let players = four([&[4], &[4], &[4], &[4]]);
        let mut config = cfg();
        config.team_two = vec!["a".into(), "d".into()];
        assert!(matches!(
            calculate(&players, &course(), &config, &EngineConfig::default()),
            Err(GameError::InvalidTeams(_))
        ));
    }
}
