use crate::round_engine::{
    config::EngineConfig,
    error::GameError,
    handicap::{Allowance, NetScorer},
    helpers::{
        duels, match_progress, require_players, result_text, sorted_holes, status_text, tally,
        to_cents, Ledger,
    },
    models::{GameKind, Hole, MatchPlayConfig, MatchPlayResult, MatchState, Player, Segment},
    press::{check_press_list, PressArena, PressSettings},
};
use super::nassau::{NEED_PLAYERS, NO_SCORES};

fn pending(players: &[Player], reason: &str) -> MatchPlayResult {
    let (standings, settlements) = Ledger::new(players).finish();
    MatchPlayResult {
        state: MatchState::InProgress,
        status: reason.to_string(),
        result: None,
        tally: None,
        closed_on_hole: None,
        presses: Vec::new(),
        standings,
        settlements,
    }
}

/// One running 18-hole match between two players. The match, and every
/// press riding on it, pays only once it is decided.
pub fn calculate(
    players: &[Player],
    holes: &[Hole],
    config: &MatchPlayConfig,
    engine: &EngineConfig,
) -> Result<MatchPlayResult, GameError> {
    if players.len() < 2 {
        return Ok(pending(players, NEED_PLAYERS));
    }
    require_players(GameKind::MatchPlay, players, 2, 2)?;
    check_press_list(&config.presses, &[Segment::Match])?;

    let (a, b) = (&players[0], &players[1]);
    if a.holes_scored() == 0 || b.holes_scored() == 0 {
        return Ok(pending(players, NO_SCORES));
    }

    let scorer = NetScorer::new(players, Allowance::OffTheLow);
    let (window_start, window_end) = Segment::Match.window();
    let in_window: Vec<Hole> = sorted_holes(holes)
        .into_iter()
        .filter(|h| h.hole_number >= window_start && h.hole_number <= window_end)
        .collect();
    let all = duels(&in_window, |h| Some((scorer.net(a, h)?, scorer.net(b, h)?)));
    let window: Vec<u8> = in_window.iter().map(|h| h.hole_number).collect();
    let progress = match_progress(&all, &window);
    // Holes after a close-out do not count.
    let counted = &all[..progress.holes_played as usize];

    let settings = PressSettings {
        auto: config.is_auto_press,
        threshold: engine.press_threshold,
        max_depth: engine.max_press_depth,
    };
    let end_hole = progress.closed_on_hole.unwrap_or(window_end);
    let arena = PressArena::build(Segment::Match, end_hole, counted, &config.presses, &settings, (&a.id, &b.id))?;

    let t = tally(counted, window_start, window_end, &a.id, &b.id);
    let decided = progress.is_decided();
    let mut ledger = Ledger::new(players);
    if decided {
        ledger.settle_tally(&t, 0, 1, to_cents(config.bet_amount));
    }
    let presses = arena.score(config.bet_amount, decided);
    for press in &presses {
        ledger.settle_tally(&press.tally, 0, 1, to_cents(press.money));
    }

    let result = result_text(&progress);
    log::debug!(
        "match play {} v {}: {} after {} holes ({:?})",
        a.id, b.id, status_text(progress.lead), progress.holes_played, progress.state
    );
    let (standings, settlements) = ledger.finish();
    Ok(MatchPlayResult {
        state: progress.state,
        status: status_text(progress.lead),
        result,
        tally: Some(t),
        closed_on_hole: progress.closed_on_hole,
        presses,
        standings,
        settlements,
    })
}
