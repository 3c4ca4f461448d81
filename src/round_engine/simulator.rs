//! Deterministic random rounds for demos and property tests.
//!
//! A seed always produces the same course, handicaps, scores and wolf
//! decisions, so a failing property can be replayed from its seed alone.

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::round_engine::{
    helpers::sorted_holes,
    models::{Hole, Player, WolfDecision},
};

/// Pars for a standard par-72 layout.
const PARS: [u8; 18] = [4, 4, 3, 5, 4, 4, 3, 4, 5, 4, 4, 3, 5, 4, 4, 3, 4, 5];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationRequest {
    pub players: usize,
    /// Holes at the start of the round that have been played (0..=18).
    pub holes_played: u8,
    /// Chance a player's score is missing on a played hole.
    pub gap_rate: f64,
    pub max_handicap: u8,
    pub rng_seed: Option<u64>,
}

impl Default for SimulationRequest {
    fn default() -> Self {
        SimulationRequest { players: 4, holes_played: 18, gap_rate: 0.0, max_handicap: 24, rng_seed: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedRound {
    pub holes: Vec<Hole>,
    pub players: Vec<Player>,
}

/// Eighteen holes with standard pars and a shuffled difficulty ranking.
pub fn random_course<R: Rng>(rng: &mut R) -> Vec<Hole> {
    let mut ranks: Vec<u8> = (1..=18).collect();
    // Fisher-Yates shuffle
    for i in (1..ranks.len()).rev() {
        let j = rng.gen_range(0..=i);
        ranks.swap(i, j);
    }
    PARS.iter()
        .zip(ranks)
        .enumerate()
        .map(|(i, (&par, handicap_rank))| Hole { hole_number: i as u8 + 1, par, handicap_rank })
        .collect()
}

/// Gross score around par: mostly par or bogey, occasionally a birdie or a blow-up.
fn random_strokes<R: Rng>(rng: &mut R, par: u8) -> u32 {
    let roll: f64 = rng.gen();
    let delta: i32 = match roll {
        r if r < 0.05 => -1,
        r if r < 0.40 => 0,
        r if r < 0.75 => 1,
        r if r < 0.93 => 2,
        _ => 3,
    };
    (i32::from(par) + delta).max(1) as u32
}

fn random_putts<R: Rng>(rng: &mut R) -> u32 {
    match rng.gen_range(0..20) {
        0 => 1,
        1..=15 => 2,
        16..=18 => 3,
        _ => 4,
    }
}

pub fn simulate_round(request: &SimulationRequest) -> SimulatedRound {
    let mut rng: StdRng = match request.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };
    let holes = random_course(&mut rng);
    let gap_rate = if request.gap_rate.is_finite() { request.gap_rate.clamp(0.0, 1.0) } else { 0.0 };

    let players = (0..request.players)
        .map(|i| {
            let handicap = f64::from(rng.gen_range(0..=request.max_handicap));
            let mut player = Player::new(format!("p{}", i + 1), Some(handicap));
            for hole in holes.iter().take(usize::from(request.holes_played.min(18))) {
                if rng.gen_bool(gap_rate) {
                    continue;
                }
                let strokes = random_strokes(&mut rng, hole.par);
                let putts = random_putts(&mut rng).min(strokes);
                player.record(hole.hole_number, Some(strokes), Some(putts));
            }
            player
        })
        .collect();

    SimulatedRound { holes, players }
}

/// Legal wolf decisions for every hole, following the supplied player order.
pub fn random_wolf_decisions<R: Rng>(rng: &mut R, players: &[Player], holes: &[Hole]) -> Vec<WolfDecision> {
    if players.is_empty() {
        return Vec::new();
    }
    sorted_holes(holes)
        .iter()
        .enumerate()
        .map(|(i, hole)| {
            let wolf = i % players.len();
            let lone = players.len() < 2 || rng.gen_bool(0.3);
            let partner = if lone {
                None
            } else {
                let offset = rng.gen_range(1..players.len());
                Some(players[(wolf + offset) % players.len()].id.clone())
            };
            WolfDecision {
                hole_number: hole.hole_number,
                wolf_user_id: players[wolf].id.clone(),
                partner_user_id: partner,
                is_lone_wolf: lone,
                is_blind: lone && rng.gen_bool(0.2),
            }
        })
        .collect()
}
