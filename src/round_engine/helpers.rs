//! Shared builders used by every game calculator.
//!
//! Each calculator does the same bookkeeping: check the field size, walk the
//! holes in order, compare two sides hole by hole, and turn money movements
//! into standings plus raw settlement edges. These helpers centralise that
//! work so game files carry only the rules of their game.
//!
//! ## Money
//!
//! All money is accumulated in integer cents and converted back to `f64`
//! only when a result is built, so per-game standings sum to exactly zero.

use crate::round_engine::{
    error::GameError,
    models::*,
    settlement::match_balances,
};

// ---------------------------------------------------------------------------
// Cents
// ---------------------------------------------------------------------------

pub fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

pub fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Round each amount to cents, then move the rounding residual onto the
/// largest-magnitude entry so the result sums to exactly zero.
///
/// Input amounts are expected to sum to (approximately) zero.
pub fn balanced_cents(amounts: &[f64]) -> Vec<i64> {
    let mut cents: Vec<i64> = amounts.iter().map(|a| to_cents(*a)).collect();
    let residual: i64 = cents.iter().sum();
    if residual != 0 {
        let pivot = cents
            .iter()
            .enumerate()
            .max_by_key(|(_, c)| c.abs())
            .map(|(i, _)| i);
        if let Some(i) = pivot {
            cents[i] -= residual;
        }
    }
    cents
}

/// Split `total` cents into `parts` shares differing by at most one cent.
pub fn split_cents(total: i64, parts: usize) -> Vec<i64> {
    if parts == 0 {
        return Vec::new();
    }
    let n = parts as i64;
    let base = total.div_euclid(n);
    let extra = total.rem_euclid(n) as usize;
    (0..parts).map(|i| if i < extra { base + 1 } else { base }).collect()
}

// ---------------------------------------------------------------------------
// Field and course
// ---------------------------------------------------------------------------

pub fn require_players(
    game: GameKind,
    players: &[Player],
    min: usize,
    max: usize,
) -> Result<(), GameError> {
    let n = players.len();
    if n < min || n > max {
        let expected = if min == max {
            format!("exactly {min}")
        } else {
            format!("{min} to {max}")
        };
        return Err(GameError::WrongPlayerCount { game, expected, actual: n });
    }
    Ok(())
}

/// Holes in play order, one entry per hole number.
pub fn sorted_holes(holes: &[Hole]) -> Vec<Hole> {
    let mut sorted = holes.to_vec();
    sorted.sort_by_key(|h| h.hole_number);
    sorted.dedup_by_key(|h| h.hole_number);
    sorted
}

pub fn player_index(players: &[Player], id: &str) -> Option<usize> {
    players.iter().position(|p| p.id == id)
}

pub fn fully_scored(players: &[Player], hole_number: u8) -> bool {
    players.iter().all(|p| p.strokes_on(hole_number).is_some())
}

/// Two fixed pairs covering a four-player field, as player indices.
/// Position `i` of one team is paired with position `i` of the other.
pub fn resolve_teams(
    players: &[Player],
    team_one: &[PlayerId],
    team_two: &[PlayerId],
) -> Result<([usize; 2], [usize; 2]), GameError> {
    let lookup = |team: &[PlayerId], name: &str| -> Result<[usize; 2], GameError> {
        match team {
            [x, y] => {
                let x = player_index(players, x).ok_or_else(|| GameError::UnknownPlayer(x.clone()))?;
                let y = player_index(players, y).ok_or_else(|| GameError::UnknownPlayer(y.clone()))?;
                Ok([x, y])
            }
            _ => Err(GameError::InvalidTeams(format!("{name} must list exactly 2 players"))),
        }
    };
    let one = lookup(team_one, "team one")?;
    let two = lookup(team_two, "team two")?;
    let mut all = [one[0], one[1], two[0], two[1]];
    all.sort_unstable();
    if all.windows(2).any(|w| w[0] == w[1]) {
        return Err(GameError::InvalidTeams("each player must be on exactly one team".into()));
    }
    Ok((one, two))
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// Per-game money and points accumulator.
#[derive(Debug, Clone)]
pub struct Ledger {
    ids: Vec<PlayerId>,
    points: Vec<f64>,
    cents: Vec<i64>,
    edges: Vec<SettlementEdge>,
}

impl Ledger {
    pub fn new(players: &[Player]) -> Self {
        let n = players.len();
        Ledger {
            ids: players.iter().map(|p| p.id.clone()).collect(),
            points: vec![0.0; n],
            cents: vec![0; n],
            edges: Vec::new(),
        }
    }

    /// Move money between two players and record the raw debt.
    /// A negative amount reverses the direction; zero records nothing.
    pub fn pay(&mut self, from: usize, to: usize, cents: i64) {
        if cents == 0 || from == to {
            return;
        }
        let (from, to, cents) = if cents < 0 { (to, from, -cents) } else { (from, to, cents) };
        self.cents[from] -= cents;
        self.cents[to] += cents;
        self.edges.push(SettlementEdge {
            from_user_id: self.ids[from].clone(),
            to_user_id: self.ids[to].clone(),
            amount: from_cents(cents),
        });
    }

    /// Loser of a head-to-head tally pays the winner; all square pays nothing.
    pub fn settle_tally(&mut self, tally: &MatchTally, first: usize, second: usize, cents: i64) {
        match tally.lead.signum() {
            1 => self.pay(second, first, cents),
            -1 => self.pay(first, second, cents),
            _ => {}
        }
    }

    pub fn add_points(&mut self, idx: usize, points: f64) {
        self.points[idx] += points;
    }

    pub fn points(&self, idx: usize) -> f64 {
        self.points[idx]
    }

    /// Replace money with externally computed zero-sum balances (average-based
    /// games) and derive the debts by matching creditors against debtors.
    pub fn set_balances(&mut self, cents: Vec<i64>) {
        debug_assert_eq!(cents.iter().sum::<i64>(), 0);
        let balances: Vec<(PlayerId, i64)> =
            self.ids.iter().cloned().zip(cents.iter().copied()).collect();
        self.edges = match_balances(&balances);
        self.cents = cents;
    }

    pub fn finish(self) -> (Vec<Standing>, Vec<SettlementEdge>) {
        let standings = self
            .ids
            .into_iter()
            .zip(self.points)
            .zip(self.cents)
            .map(|((player_id, points), cents)| Standing {
                player_id,
                points,
                money: from_cents(cents),
            })
            .collect();
        (standings, self.edges)
    }
}

// ---------------------------------------------------------------------------
// Head-to-head comparison
// ---------------------------------------------------------------------------

/// One compared hole between two sides: +1 first side won, -1 second side
/// won, 0 halved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duel {
    pub hole_number: u8,
    pub swing: i32,
}

/// Compare two sides on every hole where both have a net score. Lower wins.
pub fn duels<F>(holes: &[Hole], mut side_nets: F) -> Vec<Duel>
where
    F: FnMut(&Hole) -> Option<(i32, i32)>,
{
    sorted_holes(holes)
        .iter()
        .filter_map(|h| {
            let (a, b) = side_nets(h)?;
            Some(Duel { hole_number: h.hole_number, swing: (b - a).signum() })
        })
        .collect()
}

/// Tally the duels inside `[start, end]`.
pub fn tally(duels: &[Duel], start: u8, end: u8, first: &str, second: &str) -> MatchTally {
    let (lead, holes_played) = duels
        .iter()
        .filter(|d| d.hole_number >= start && d.hole_number <= end)
        .fold((0i32, 0u32), |(lead, n), d| (lead + d.swing, n + 1));
    let winner_id = match lead.signum() {
        1 => Some(first.to_string()),
        -1 => Some(second.to_string()),
        _ => None,
    };
    MatchTally { winner_id, margin: lead.unsigned_abs(), lead, holes_played }
}

/// Running match with standard close-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchProgress {
    pub lead: i32,
    pub holes_played: u32,
    pub remaining: u32,
    pub closed_on_hole: Option<u8>,
    pub state: MatchState,
}

impl MatchProgress {
    pub fn is_decided(&self) -> bool {
        self.state != MatchState::InProgress
    }
}

/// Play duels in order until the lead exceeds the holes left to play.
/// `window` lists the match's hole numbers in playing order; holes left are
/// counted by position, so a hole skipped for a missing score is behind the
/// players once a later hole has been compared. The match is over after the
/// last window hole has been compared.
pub fn match_progress(duels: &[Duel], window: &[u8]) -> MatchProgress {
    let left_after = |hole: u8| window.iter().filter(|&&n| n > hole).count() as u32;
    let mut lead = 0i32;
    let mut holes_played = 0u32;
    let mut last_hole = None;
    let mut closed_on_hole = None;
    for d in duels {
        lead += d.swing;
        holes_played += 1;
        last_hole = Some(d.hole_number);
        if lead.unsigned_abs() > left_after(d.hole_number) {
            closed_on_hole = Some(d.hole_number);
            break;
        }
    }
    let remaining = last_hole.map_or(window.len() as u32, left_after);
    let state = if closed_on_hole.is_some() {
        MatchState::Won
    } else if holes_played > 0 && remaining == 0 {
        MatchState::Halved
    } else {
        MatchState::InProgress
    };
    MatchProgress { lead, holes_played, remaining, closed_on_hole, state }
}

/// "2 UP", "1 DOWN" or "AS" from the first side's perspective.
pub fn status_text(lead: i32) -> String {
    match lead.signum() {
        1 => format!("{} UP", lead),
        -1 => format!("{} DOWN", -lead),
        _ => "AS".to_string(),
    }
}

/// "3&2" for an early close-out, "1 UP" on the last hole, "HALVED".
pub fn result_text(progress: &MatchProgress) -> Option<String> {
    match progress.state {
        MatchState::InProgress => None,
        MatchState::Halved => Some("HALVED".to_string()),
        MatchState::Won if progress.remaining == 0 => {
            Some(format!("{} UP", progress.lead.unsigned_abs()))
        }
        MatchState::Won => Some(format!("{}&{}", progress.lead.unsigned_abs(), progress.remaining)),
    }
}
