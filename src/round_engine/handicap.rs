use crate::round_engine::models::{Hole, Player};

/// How handicap strokes are allocated within one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allowance {
    /// Everyone plays off the lowest handicap in the field (low man gets 0).
    OffTheLow,
    /// Each player receives their full course handicap.
    Full,
}

/// Course handicap used for allocation. Missing handicaps play as scratch;
/// fractional values round half away from zero.
pub fn course_handicap(raw: Option<f64>) -> i32 {
    match raw {
        Some(h) if h.is_finite() => h.round() as i32,
        _ => 0,
    }
}

/// Strokes a player receives on a hole: 0, 1 or 2.
///
/// One stroke on every hole whose rank is within the differential to the
/// field's low handicap; a second stroke on the hardest `diff - 18` holes.
pub fn strokes_given(player_handicap: i32, min_handicap: i32, hole_handicap_rank: u8) -> u8 {
    let diff = (player_handicap - min_handicap).max(0);
    let rank = i32::from(hole_handicap_rank.max(1));
    let mut strokes = 0;
    if rank <= diff {
        strokes += 1;
    }
    if diff > 18 && rank <= diff - 18 {
        strokes += 1;
    }
    strokes
}

/// Stableford points for a net score: net double bogey or worse = 0 up to
/// albatross or better = 5.
pub fn stableford_points(net: i32, par: u8) -> u8 {
    match net - i32::from(par) {
        d if d >= 2 => 0,
        1  => 1,
        0  => 2,
        -1 => 3,
        -2 => 4,
        _  => 5,
    }
}

/// Evaluated score for one player on one hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetHole {
    pub hole_number: u8,
    pub gross: i32,
    pub strokes_given: u8,
    pub net: i32,
    pub stableford: u8,
}

/// Net score evaluator bound to one game's field.
#[derive(Debug, Clone, Copy)]
pub struct NetScorer {
    base_handicap: i32,
}

impl NetScorer {
    pub fn new(players: &[Player], allowance: Allowance) -> Self {
        let base_handicap = match allowance {
            Allowance::Full => 0,
            Allowance::OffTheLow => players
                .iter()
                .map(|p| course_handicap(p.course_handicap))
                .min()
                .unwrap_or(0),
        };
        NetScorer { base_handicap }
    }

    pub fn strokes(&self, player: &Player, hole: &Hole) -> u8 {
        strokes_given(course_handicap(player.course_handicap), self.base_handicap, hole.handicap_rank)
    }

    /// `None` when the player has not scored the hole.
    pub fn net(&self, player: &Player, hole: &Hole) -> Option<i32> {
        self.evaluate(player, hole).map(|h| h.net)
    }

    pub fn evaluate(&self, player: &Player, hole: &Hole) -> Option<NetHole> {
        let gross = i32::try_from(player.strokes_on(hole.hole_number)?).unwrap_or(i32::MAX);
        let strokes_given = self.strokes(player, hole);
        let net = gross.saturating_sub(i32::from(strokes_given));
        Some(NetHole {
            hole_number: hole.hole_number,
            gross,
            strokes_given,
            net,
            stableford: stableford_points(net, hole.par),
        })
    }
}
