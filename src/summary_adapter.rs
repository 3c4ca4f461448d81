use serde_json::{json, Value};

use crate::round_engine::models::{GameOutcome, SegmentResult, SettlementEdge, Standing};

/// Format money for the scorecard: "+12.50", "-3.00", "0.00".
fn signed_money(amount: f64) -> String {
    if amount > 0.0 {
        format!("+{:.2}", amount)
    } else if amount < 0.0 {
        format!("{:.2}", amount)
    } else {
        "0.00".to_string()
    }
}

fn segment_line(seg: &SegmentResult) -> String {
    match (seg.status(), seg.tally()) {
        (Some(reason), _) => format!("{}: {}", seg.segment, reason),
        (None, Some(t)) => match &t.winner_id {
            Some(id) => format!("{}: {} {} UP", seg.segment, id, t.margin),
            None => format!("{}: AS", seg.segment),
        },
        (None, None) => format!("{}: -", seg.segment),
    }
}

/// One-line description of where the game stands.
fn headline(outcome: &GameOutcome) -> String {
    match outcome {
        GameOutcome::Nassau(r) => [&r.front, &r.back, &r.overall]
            .iter()
            .map(|s| segment_line(s))
            .collect::<Vec<_>>()
            .join(" | "),
        GameOutcome::Skins(r) => format!(
            "{} skins won, {:.2} carried over",
            r.holes.iter().filter(|h| h.winner_id.is_some()).count(),
            r.carryover
        ),
        GameOutcome::MatchPlay(r) => r.result.clone().unwrap_or_else(|| r.status.clone()),
        GameOutcome::Wolf(r) => format!("{} holes played", r.holes.len()),
        GameOutcome::Nines(r) => format!("{} holes scored", r.holes.len()),
        GameOutcome::Stableford(r) => leader(&r.standings)
            .map(|s| format!("{} leads with {} points", s.player_id, s.points))
            .unwrap_or_else(|| "No scores yet".to_string()),
        GameOutcome::Snake(r) => match &r.holder_id {
            Some(id) => format!("{} holds the snake", id),
            None => "Nobody holds the snake".to_string(),
        },
        GameOutcome::StrokePlay(r) => {
            if r.winner_ids.is_empty() {
                "No scores yet".to_string()
            } else {
                format!("Low net: {}", r.winner_ids.join(", "))
            }
        }
        GameOutcome::BestBall(r) => r.result.clone().unwrap_or_else(|| r.status.clone()),
        GameOutcome::Vegas(r) => format!("Team one {:+} points", r.team_one_points),
    }
}

fn leader(standings: &[Standing]) -> Option<&Standing> {
    standings
        .iter()
        .fold(None, |best: Option<&Standing>, s| match best {
            Some(b) if b.points >= s.points => Some(b),
            _ => Some(s),
        })
}

fn standing_rows(standings: &[Standing]) -> Value {
    Value::Array(
        standings
            .iter()
            .map(|s| {
                json!({
                    "playerId": s.player_id,
                    "points":   s.points,
                    "money":    s.money,
                    "display":  signed_money(s.money)
                })
            })
            .collect(),
    )
}

fn payment_rows(edges: &[SettlementEdge]) -> Value {
    Value::Array(
        edges
            .iter()
            .map(|e| {
                json!({
                    "from":   e.from_user_id,
                    "to":     e.to_user_id,
                    "amount": e.amount,
                    "display": format!("{} pays {} {:.2}", e.from_user_id, e.to_user_id, e.amount)
                })
            })
            .collect(),
    )
}

/// Map a game outcome to the compact summary the scorecard client renders.
///
/// `settlements` is the consolidated payment list when the caller has one;
/// otherwise the game's raw debts are shown.
pub fn to_summary_json(outcome: &GameOutcome, settlements: Option<&[SettlementEdge]>) -> Value {
    let payments = settlements.unwrap_or_else(|| outcome.settlements());
    json!({
        "game":      outcome.kind().to_string(),
        "headline":  headline(outcome),
        "standings": standing_rows(outcome.standings()),
        "payments":  payment_rows(payments),
        "detail":    serde_json::to_value(outcome).unwrap_or(Value::Null)
    })
}
