use std::collections::{HashMap, HashSet};

use crate::round_engine::{
    config::EngineConfig,
    error::GameError,
    handicap::{Allowance, NetScorer},
    helpers::{from_cents, fully_scored, player_index, require_players, sorted_holes, to_cents, Ledger},
    models::{GameKind, Hole, Player, PlayerId, WolfConfig, WolfDecision, WolfHole, WolfOutcome, WolfResult},
};

/// Wolf for the hole at `hole_index` (0-based position in play order).
pub fn wolf_for_hole(rotation: &[PlayerId], hole_index: usize) -> Option<&PlayerId> {
    if rotation.is_empty() {
        return None;
    }
    rotation.get(hole_index % rotation.len())
}

fn resolve_rotation(players: &[Player], config: &WolfConfig) -> Result<Vec<PlayerId>, GameError> {
    let rotation: Vec<PlayerId> = match &config.rotation {
        Some(r) => r.clone(),
        None => players.iter().map(|p| p.id.clone()).collect(),
    };
    if rotation.len() != players.len() {
        return Err(GameError::InvalidRotation(format!(
            "{} entries for {} players",
            rotation.len(),
            players.len()
        )));
    }
    let mut seen = HashSet::new();
    for id in &rotation {
        if player_index(players, id).is_none() {
            return Err(GameError::UnknownPlayer(id.clone()));
        }
        if !seen.insert(id.as_str()) {
            return Err(GameError::InvalidRotation(format!("{id} is listed twice")));
        }
    }
    Ok(rotation)
}

/// Checks one decision against the field and returns `(wolf, partner)` indices.
fn check_decision(
    players: &[Player],
    d: &WolfDecision,
    expected_wolf: Option<&PlayerId>,
) -> Result<(usize, Option<usize>), GameError> {
    let invalid = |reason: String| GameError::InvalidWolfDecision { hole: d.hole_number, reason };
    let wolf = player_index(players, &d.wolf_user_id).ok_or_else(|| GameError::UnknownPlayer(d.wolf_user_id.clone()))?;
    if let Some(expected) = expected_wolf {
        if expected != &d.wolf_user_id {
            return Err(invalid(format!("{} is not the wolf (rotation says {expected})", d.wolf_user_id)));
        }
    }
    match (&d.partner_user_id, d.is_lone_wolf) {
        (None, true) => Ok((wolf, None)),
        (Some(partner_id), false) => {
            if d.is_blind {
                return Err(invalid("only a lone wolf can go blind".into()));
            }
            let partner =
                player_index(players, partner_id).ok_or_else(|| GameError::UnknownPlayer(partner_id.clone()))?;
            if partner == wolf {
                return Err(invalid("the wolf cannot pick themselves".into()));
            }
            Ok((wolf, Some(partner)))
        }
        (Some(_), true) => Err(invalid("a lone wolf has no partner".into())),
        (None, false) => Err(invalid("a partnered wolf needs a partner".into())),
    }
}

/// Four players, a rotating wolf who either picks a partner before tee-off
/// or goes alone against the other three.
///
/// Lone wolf: each of the three pays (or is paid) the stake, so the wolf
/// swings three stakes. Partnered: each side member pairs with one opponent
/// for one bet. Holes not scored by all four are skipped; a fully scored
/// hole without a decision is a validation error.
pub fn calculate(
    players: &[Player],
    holes: &[Hole],
    config: &WolfConfig,
    engine: &EngineConfig,
) -> Result<WolfResult, GameError> {
    if players.is_empty() {
        return Ok(WolfResult { holes: Vec::new(), standings: Vec::new(), settlements: Vec::new() });
    }
    require_players(GameKind::Wolf, players, 4, 4)?;
    let rotation = resolve_rotation(players, config)?;

    let course = sorted_holes(holes);
    let order: HashMap<u8, usize> = course.iter().enumerate().map(|(i, h)| (h.hole_number, i)).collect();

    let mut decisions: HashMap<u8, (&WolfDecision, usize, Option<usize>)> = HashMap::new();
    for d in &config.decisions {
        let expected = order.get(&d.hole_number).and_then(|&i| wolf_for_hole(&rotation, i));
        let (wolf, partner) = check_decision(players, d, expected)?;
        if decisions.insert(d.hole_number, (d, wolf, partner)).is_some() {
            return Err(GameError::InvalidWolfDecision {
                hole: d.hole_number,
                reason: "more than one decision".into(),
            });
        }
    }

    let scorer = NetScorer::new(players, Allowance::OffTheLow);
    let bet = to_cents(config.bet_amount);
    let mut ledger = Ledger::new(players);
    let mut played = Vec::new();

    for hole in &course {
        if !fully_scored(players, hole.hole_number) {
            continue;
        }
        let &(decision, wolf, partner) = decisions
            .get(&hole.hole_number)
            .ok_or(GameError::MissingWolfDecision { hole: hole.hole_number })?;

        let nets: Vec<i32> = players.iter().filter_map(|p| scorer.net(p, hole)).collect();
        let on_wolf_side = |i: usize| i == wolf || Some(i) == partner;
        let pack: Vec<usize> = (0..players.len()).filter(|&i| !on_wolf_side(i)).collect();
        let best_wolf = (0..players.len()).filter(|&i| on_wolf_side(i)).map(|i| nets[i]).min();
        let best_pack = pack.iter().map(|&i| nets[i]).min();

        let outcome = match (best_wolf, best_pack) {
            (Some(w), Some(p)) if w < p => WolfOutcome::WolfSide,
            (Some(w), Some(p)) if w > p => WolfOutcome::Pack,
            _ => WolfOutcome::Push,
        };
        let sign = match outcome {
            WolfOutcome::WolfSide => 1,
            WolfOutcome::Pack => -1,
            WolfOutcome::Push => 0,
        };

        let wolf_delta = match partner {
            None => {
                let multiplier = if decision.is_blind { engine.wolf_blind_multiplier } else { 1.0 };
                let stake = to_cents(config.bet_amount * multiplier);
                for &opp in &pack {
                    ledger.pay(opp, wolf, sign * stake);
                }
                sign * stake * pack.len() as i64
            }
            Some(partner) => {
                for (&member, &opp) in [wolf, partner].iter().zip(pack.iter()) {
                    ledger.pay(opp, member, sign * bet);
                }
                sign * bet
            }
        };

        log::debug!(
            "wolf: hole {} wolf {} {} -> {:?}",
            hole.hole_number,
            decision.wolf_user_id,
            if partner.is_some() { "partnered" } else { "alone" },
            outcome
        );
        played.push(WolfHole {
            hole_number: hole.hole_number,
            wolf_id: decision.wolf_user_id.clone(),
            partner_id: decision.partner_user_id.clone(),
            is_lone_wolf: decision.is_lone_wolf,
            is_blind: decision.is_blind,
            outcome,
            wolf_delta: from_cents(wolf_delta),
        });
    }

    let (mut standings, settlements) = ledger.finish();
    for s in &mut standings {
        s.points = s.money;
    }
    Ok(WolfResult { holes: played, standings, settlements })
}
