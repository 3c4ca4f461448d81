use crate::round_engine::{
    config::EngineConfig,
    error::GameError,
    handicap::{Allowance, NetScorer},
    helpers::{duels, require_players, tally, to_cents, Ledger},
    models::{
        GameKind, Hole, NassauConfig, NassauResult, Player, Segment, SegmentOutcome,
        SegmentResult,
    },
    press::{check_press_list, PressArena, PressSettings},
};

pub const NEED_PLAYERS: &str = "Need 2 players";
pub const NO_SCORES: &str = "No scores yet";

const SEGMENTS: [Segment; 3] = [Segment::Front, Segment::Back, Segment::Overall];

fn pending(segment: Segment, reason: &str) -> SegmentResult {
    SegmentResult { segment, outcome: SegmentOutcome::Pending { reason: reason.to_string() } }
}

fn all_pending(players: &[Player], reason: &str) -> NassauResult {
    let (standings, settlements) = Ledger::new(players).finish();
    NassauResult {
        front: pending(Segment::Front, reason),
        back: pending(Segment::Back, reason),
        overall: pending(Segment::Overall, reason),
        presses: Vec::new(),
        standings,
        settlements,
    }
}

/// Front, back and overall matches between exactly two players, each bet
/// independently, with presses stacking on top of their segment.
///
/// Segments pay the current leader; call again as scores come in.
pub fn calculate(
    players: &[Player],
    holes: &[Hole],
    config: &NassauConfig,
    engine: &EngineConfig,
) -> Result<NassauResult, GameError> {
    if players.len() < 2 {
        return Ok(all_pending(players, NEED_PLAYERS));
    }
    require_players(GameKind::Nassau, players, 2, 2)?;
    check_press_list(&config.presses, &SEGMENTS)?;

    let (a, b) = (&players[0], &players[1]);
    if a.holes_scored() == 0 || b.holes_scored() == 0 {
        return Ok(all_pending(players, NO_SCORES));
    }

    let scorer = NetScorer::new(players, Allowance::OffTheLow);
    let ds = duels(holes, |h| Some((scorer.net(a, h)?, scorer.net(b, h)?)));
    let settings = PressSettings {
        auto: config.is_auto_press,
        threshold: engine.press_threshold,
        max_depth: engine.max_press_depth,
    };
    let stake = to_cents(config.bet_amount);

    let mut ledger = Ledger::new(players);
    let mut presses = Vec::new();

    let mut score_segment = |segment: Segment| -> Result<SegmentResult, GameError> {
        let (start, end) = segment.window();
        let arena = PressArena::build(segment, end, &ds, &config.presses, &settings, (&a.id, &b.id))?;
        let t = tally(&ds, start, end, &a.id, &b.id);
        if t.holes_played == 0 {
            return Ok(pending(segment, NO_SCORES));
        }

        ledger.settle_tally(&t, 0, 1, stake);
        let money = if t.winner_id.is_some() { config.bet_amount } else { 0.0 };
        log::debug!("nassau {segment}: lead {} over {} holes", t.lead, t.holes_played);

        for press in arena.score(config.bet_amount, true) {
            ledger.settle_tally(&press.tally, 0, 1, to_cents(press.money));
            presses.push(press);
        }
        Ok(SegmentResult { segment, outcome: SegmentOutcome::Scored { tally: t, money } })
    };

    let front = score_segment(Segment::Front)?;
    let back = score_segment(Segment::Back)?;
    let overall = score_segment(Segment::Overall)?;

    let (standings, settlements) = ledger.finish();
    Ok(NassauResult { front, back, overall, presses, standings, settlements })
}
