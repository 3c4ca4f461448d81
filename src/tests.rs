//! Crate-level tests for `golf_side_games`.
//!
//! Included from `lib.rs` under `#[cfg(test)]`.
//!
//! # Coverage
//!
//! | Group | What is tested |
//! |-------|----------------|
//! | Scenarios | Identical scores halve every Nassau segment; an 18-hole Skins sweep pays 90 |
//! | Nassau | Margins are non-negative with a winner and zero on a tie |
//! | Skins | Pot plus carryover equals bet times holes compared; skin value tracks carryover |
//! | Wolf | Zero-sum points; lone wolf swings exactly three bets |
//! | Nines | Nine points per fully scored hole; money within a cent of zero |
//! | Snake | At most one holder, who pays every other player the bet |
//! | Zero-sum | Every game's money sums to zero on random rounds |
//! | Gaps | Missing scores mid-round never keep a finished match open or move Stableford money |
//! | Settlement | Consolidation preserves balances, never repeats a pair, pays positive amounts |
//! | Round | Several games settle together; JSON round-trip of the request tag |

use std::collections::{HashMap, HashSet};

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::round_engine::{
    calculate,
    helpers::{fully_scored, to_cents},
    models::*,
    settle_round,
    settlement::consolidate,
    simulator::{random_wolf_decisions, simulate_round, SimulationRequest},
};

// ── helpers ──────────────────────────────────────────────────────────────────

/// Seeds that span different RNG states.
const SEEDS: [u64; 8] = [1, 7, 42, 99, 999, 2024, 31_337, 0xDEAD_BEEF];

fn round(players: usize, seed: u64) -> (Vec<Player>, Vec<Hole>) {
    let r = simulate_round(&SimulationRequest {
        players,
        holes_played: 18,
        gap_rate: 0.1,
        max_handicap: 24,
        rng_seed: Some(seed),
    });
    (r.players, r.holes)
}

fn request(players: Vec<Player>, holes: Vec<Hole>, config: GameConfig) -> GameRequest {
    GameRequest { players, holes, config }
}

fn money_cents(outcome: &GameOutcome) -> i64 {
    outcome.standings().iter().map(|s| to_cents(s.money)).sum()
}

fn flat_course() -> Vec<Hole> {
    (1..=18).map(|n| Hole { hole_number: n, par: 4, handicap_rank: n }).collect()
}

// ── concrete scenarios ───────────────────────────────────────────────────────

#[test]
fn identical_net_scores_halve_every_nassau_segment() {
    let mut a = Player::new("a", Some(12.0));
    let mut b = Player::new("b", Some(12.0));
    for h in 1..=18 {
        a.record(h, Some(5), Some(2));
        b.record(h, Some(5), Some(2));
    }
    let config = GameConfig::Nassau(NassauConfig { bet_amount: 10.0, is_auto_press: true, presses: vec![] });
    let GameOutcome::Nassau(r) = calculate(&request(vec![a, b], flat_course(), config)).unwrap() else {
        panic!("expected nassau");
    };
    for seg in [&r.front, &r.back, &r.overall] {
        let t = seg.tally().expect("scored");
        assert_eq!(t.winner_id, None, "{} should be all square", seg.segment);
        assert_eq!(t.margin, 0);
    }
    assert!(r.presses.is_empty());
    assert!(r.settlements.is_empty());
}

#[test]
fn lower_score_on_every_hole_sweeps_skins() {
    let mut a = Player::new("a", None);
    let mut b = Player::new("b", None);
    for h in 1..=18 {
        a.record(h, Some(4), None);
        b.record(h, Some(5), None);
    }
    let config = GameConfig::Skins(SkinsConfig { bet_amount: 5.0 });
    let GameOutcome::Skins(r) = calculate(&request(vec![a, b], flat_course(), config)).unwrap() else {
        panic!("expected skins");
    };
    assert_eq!(r.total_pot, 90.0);
    assert_eq!(r.carryover, 0.0);
    assert!(r.holes.iter().all(|h| h.winner_id.as_deref() == Some("a")));
    assert_eq!(r.holes.len(), 18);
}

// ── per-game properties over seeded rounds ──────────────────────────────────

#[test]
fn nassau_margins_are_consistent_with_winner() {
    for seed in SEEDS {
        let (players, holes) = round(2, seed);
        let config = GameConfig::Nassau(NassauConfig { bet_amount: 5.0, is_auto_press: seed % 2 == 0, presses: vec![] });
        let GameOutcome::Nassau(r) = calculate(&request(players, holes, config)).unwrap() else {
            panic!("expected nassau");
        };
        for seg in [&r.front, &r.back, &r.overall] {
            if let Some(t) = seg.tally() {
                match &t.winner_id {
                    Some(_) => assert!(t.margin > 0, "seed {seed}: winner with zero margin"),
                    None => assert_eq!(t.margin, 0, "seed {seed}: tie with margin"),
                }
                assert_eq!(t.margin, t.lead.unsigned_abs());
            }
        }
    }
}

#[test]
fn skins_pot_accounts_for_every_compared_hole() {
    for seed in SEEDS {
        let (players, holes) = round(4, seed);
        let full = holes.iter().filter(|h| fully_scored(&players, h.hole_number)).count();
        let config = GameConfig::Skins(SkinsConfig { bet_amount: 2.5 });
        let GameOutcome::Skins(r) = calculate(&request(players, holes, config)).unwrap() else {
            panic!("expected skins");
        };
        assert_eq!(r.holes_compared as usize, full, "seed {seed}");
        assert_eq!(to_cents(r.total_pot + r.carryover), to_cents(2.5 * full as f64), "seed {seed}");
        let mut prior = 0.0;
        for h in &r.holes {
            assert_eq!(to_cents(h.value), to_cents(2.5 + prior), "seed {seed} hole {}", h.hole_number);
            prior = h.carryover_after;
        }
    }
}

#[test]
fn wolf_points_are_zero_sum_and_lone_wolf_swings_three_bets() {
    for seed in SEEDS {
        let (players, holes) = round(4, seed);
        let mut rng = StdRng::seed_from_u64(seed);
        let decisions = random_wolf_decisions(&mut rng, &players, &holes);
        let bet = 3.0;
        let config = GameConfig::Wolf(WolfConfig { bet_amount: bet, rotation: None, decisions });
        let outcome = calculate(&request(players, holes, config)).unwrap();
        let points: i64 = outcome.standings().iter().map(|s| to_cents(s.points)).sum();
        assert_eq!(points, 0, "seed {seed}");
        let GameOutcome::Wolf(r) = outcome else { panic!("expected wolf") };
        for h in r.holes.iter().filter(|h| h.is_lone_wolf && !h.is_blind) {
            match h.outcome {
                WolfOutcome::Push => assert_eq!(h.wolf_delta, 0.0),
                _ => assert_eq!(h.wolf_delta.abs(), bet * 3.0, "seed {seed} hole {}", h.hole_number),
            }
        }
    }
}

#[test]
fn nines_hands_out_nine_points_per_hole() {
    for seed in SEEDS {
        for n in [3usize, 4] {
            let (players, holes) = round(n, seed);
            let config = GameConfig::Nines(NinesConfig { bet_amount: 1.0, points_table: None });
            let GameOutcome::Nines(r) = calculate(&request(players, holes, config)).unwrap() else {
                panic!("expected nines");
            };
            for h in &r.holes {
                let total: f64 = h.points.iter().map(|p| p.points).sum();
                assert!((total - 9.0).abs() < 1e-9, "seed {seed} hole {} split {total}", h.hole_number);
            }
            let money: f64 = r.standings.iter().map(|s| s.money).sum();
            assert!(money.abs() < 0.01, "seed {seed}: money sums to {money}");
        }
    }
}

#[test]
fn snake_has_at_most_one_holder() {
    for seed in SEEDS {
        let n = 2 + (seed % 5) as usize;
        let (players, holes) = round(n, seed);
        let bet = 2.0;
        let GameOutcome::Snake(r) = calculate(&request(players, holes, GameConfig::Snake(SnakeConfig { bet_amount: bet }))).unwrap() else {
            panic!("expected snake");
        };
        let holders: Vec<&SnakeEntry> = r.entries.iter().filter(|e| e.holds_snake).collect();
        assert!(holders.len() <= 1, "seed {seed}");
        match r.holder_id {
            Some(ref id) => {
                for s in &r.standings {
                    if &s.player_id == id {
                        assert_eq!(s.money, -bet * (n as f64 - 1.0));
                    } else {
                        assert_eq!(s.money, bet);
                    }
                }
            }
            None => assert!(r.settlements.is_empty()),
        }
    }
}

#[test]
fn every_game_is_zero_sum_in_cents() {
    for seed in SEEDS {
        let (two, holes) = round(2, seed);
        let (four, _) = round(4, seed);
        let mut rng = StdRng::seed_from_u64(seed ^ 0xA5A5);
        let ids: Vec<PlayerId> = four.iter().map(|p| p.id.clone()).collect();
        let teams = (vec![ids[0].clone(), ids[2].clone()], vec![ids[1].clone(), ids[3].clone()]);
        let games = vec![
            (two.clone(), GameConfig::Nassau(NassauConfig { bet_amount: 5.0, is_auto_press: true, presses: vec![] })),
            (two.clone(), GameConfig::MatchPlay(MatchPlayConfig { bet_amount: 10.0, is_auto_press: true, presses: vec![] })),
            (four.clone(), GameConfig::Skins(SkinsConfig { bet_amount: 1.0 })),
            (four.clone(), GameConfig::Wolf(WolfConfig {
                bet_amount: 1.0,
                rotation: None,
                decisions: random_wolf_decisions(&mut rng, &four, &holes),
            })),
            (four.clone(), GameConfig::Nines(NinesConfig { bet_amount: 0.5, points_table: None })),
            (four.clone(), GameConfig::Stableford(StablefordConfig { bet_amount: 1.0, full_handicap: rng.gen() })),
            (four.clone(), GameConfig::Snake(SnakeConfig { bet_amount: 1.0 })),
            (four.clone(), GameConfig::StrokePlay(StrokePlayConfig { bet_amount: 10.0, full_handicap: false })),
            (four.clone(), GameConfig::BestBall(BestBallConfig {
                bet_amount: 5.0,
                team_one: teams.0.clone(),
                team_two: teams.1.clone(),
            })),
            (four.clone(), GameConfig::Vegas(VegasConfig {
                bet_amount: 0.25,
                team_one: teams.0.clone(),
                team_two: teams.1.clone(),
                flip_on_birdie: true,
            })),
        ];
        for (players, config) in games {
            let kind = config.kind();
            let outcome = calculate(&request(players, holes.clone(), config))
                .unwrap_or_else(|e| panic!("seed {seed} {kind}: {e}"));
            assert_eq!(money_cents(&outcome), 0, "seed {seed} {kind}");
        }
    }
}

// ── rounds with missing scores ───────────────────────────────────────────────

/// Make sure everyone has a score on the last hole, keeping earlier gaps.
fn finish_last_hole(players: &mut [Player]) {
    for p in players.iter_mut() {
        if p.strokes_on(18).is_none() {
            p.record(18, Some(4), Some(2));
        }
    }
}

fn gaps_before_last_hole(players: &[Player]) -> usize {
    players
        .iter()
        .map(|p| (1..18).filter(|&h| p.strokes_on(h).is_none()).count())
        .sum()
}

#[test]
fn gapped_matches_are_decided_once_the_last_hole_is_in() {
    let mut gaps = 0;
    for seed in SEEDS {
        let (mut two, holes) = round(2, seed);
        let (mut four, _) = round(4, seed);
        finish_last_hole(&mut two);
        finish_last_hole(&mut four);
        gaps += gaps_before_last_hole(&two) + gaps_before_last_hole(&four);

        let config = GameConfig::MatchPlay(MatchPlayConfig { bet_amount: 10.0, is_auto_press: false, presses: vec![] });
        let GameOutcome::MatchPlay(m) = calculate(&request(two, holes.clone(), config)).unwrap() else {
            panic!("expected match play");
        };
        assert_ne!(m.state, MatchState::InProgress, "seed {seed}: {}", m.status);
        assert!(m.result.is_some(), "seed {seed}");
        assert_eq!(m.settlements.is_empty(), m.state == MatchState::Halved, "seed {seed}");

        let ids: Vec<PlayerId> = four.iter().map(|p| p.id.clone()).collect();
        let config = GameConfig::BestBall(BestBallConfig {
            bet_amount: 5.0,
            team_one: vec![ids[0].clone(), ids[1].clone()],
            team_two: vec![ids[2].clone(), ids[3].clone()],
        });
        let GameOutcome::BestBall(b) = calculate(&request(four, holes, config)).unwrap() else {
            panic!("expected best ball");
        };
        assert_ne!(b.state, MatchState::InProgress, "seed {seed}: {}", b.status);
    }
    assert!(gaps > 0, "simulated rounds should contain missing scores");
}

#[test]
fn stableford_money_ignores_holes_not_yet_scored_by_everyone() {
    for seed in SEEDS {
        let (players, holes) = round(4, seed);
        let mut complete = players.clone();
        for h in holes.iter().filter(|h| !fully_scored(&players, h.hole_number)) {
            for p in complete.iter_mut() {
                p.record(h.hole_number, None, None);
            }
        }
        let config = StablefordConfig { bet_amount: 1.0, full_handicap: seed % 2 == 0 };
        let gapped = calculate(&request(players, holes.clone(), GameConfig::Stableford(config.clone()))).unwrap();
        let trimmed = calculate(&request(complete, holes, GameConfig::Stableford(config))).unwrap();
        let money = |o: &GameOutcome| o.standings().iter().map(|s| s.money).collect::<Vec<_>>();
        assert_eq!(money(&gapped), money(&trimmed), "seed {seed}");
    }
}

// ── settlement ───────────────────────────────────────────────────────────────

fn random_debts(rng: &mut StdRng, players: usize, count: usize) -> Vec<SettlementEdge> {
    (0..count)
        .map(|_| {
            let from = rng.gen_range(0..players);
            let to = (from + rng.gen_range(1..players)) % players;
            SettlementEdge {
                from_user_id: format!("p{from}"),
                to_user_id: format!("p{to}"),
                amount: f64::from(rng.gen_range(1..5_000u32)) / 100.0,
            }
        })
        .collect()
}

fn net_cents(edges: &[SettlementEdge]) -> HashMap<String, i64> {
    let mut net = HashMap::new();
    for e in edges {
        *net.entry(e.from_user_id.clone()).or_insert(0) -= to_cents(e.amount);
        *net.entry(e.to_user_id.clone()).or_insert(0) += to_cents(e.amount);
    }
    net.retain(|_, c| *c != 0);
    net
}

#[test]
fn consolidation_preserves_every_balance() {
    for seed in SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let players = rng.gen_range(2..9);
        let count = rng.gen_range(0..40);
        let debts = random_debts(&mut rng, players, count);
        let out = consolidate(&debts).unwrap();

        assert_eq!(net_cents(&debts), net_cents(&out), "seed {seed}");
        assert!(out.iter().all(|e| e.amount > 0.0), "seed {seed}");
        assert!(out.len() < players.max(2), "seed {seed}: {} payments for {players} players", out.len());

        let mut pairs = HashSet::new();
        for e in &out {
            let (x, y) = if e.from_user_id < e.to_user_id {
                (e.from_user_id.clone(), e.to_user_id.clone())
            } else {
                (e.to_user_id.clone(), e.from_user_id.clone())
            };
            assert!(pairs.insert((x, y)), "seed {seed}: repeated pair");
        }
    }
}

#[test]
fn consolidation_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(5);
    let debts = random_debts(&mut rng, 6, 25);
    assert_eq!(consolidate(&debts).unwrap(), consolidate(&debts).unwrap());
}

// ── whole round ──────────────────────────────────────────────────────────────

#[test]
fn several_games_settle_into_one_payment_list() {
    let (players, holes) = round(4, 77);
    let skins = calculate(&request(players.clone(), holes.clone(), GameConfig::Skins(SkinsConfig { bet_amount: 2.0 }))).unwrap();
    let snake = calculate(&request(players.clone(), holes.clone(), GameConfig::Snake(SnakeConfig { bet_amount: 5.0 }))).unwrap();
    let nines = calculate(&request(players.clone(), holes, GameConfig::Nines(NinesConfig { bet_amount: 1.0, points_table: None }))).unwrap();

    let mut raw = Vec::new();
    for o in [&skins, &snake, &nines] {
        raw.extend_from_slice(o.settlements());
    }
    let settled = settle_round(&[skins, snake, nines]).unwrap();
    assert_eq!(net_cents(&settled.payments), net_cents(&raw));
    assert!(settled.payments.len() < players.len());
    let total: i64 = settled.balances.iter().map(|b| to_cents(b.net)).sum();
    assert_eq!(total, 0);
}

#[test]
fn game_request_json_round_trips() {
    let (players, holes) = round(2, 3);
    let original = request(
        players,
        holes,
        GameConfig::MatchPlay(MatchPlayConfig { bet_amount: 20.0, is_auto_press: true, presses: vec![] }),
    );
    let json = serde_json::to_string(&original).unwrap();
    assert!(json.contains("\"game\":\"matchPlay\""));
    assert!(json.contains("\"betAmount\":20.0"));
    let parsed: GameRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(calculate(&parsed).unwrap(), calculate(&original).unwrap());
}
