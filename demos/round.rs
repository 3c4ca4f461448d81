//! One simulated foursome playing every side game, then settling up.
//!
//! Run with: `RUST_LOG=debug cargo run --example round`
//!
//! 1. **Simulate**: a seeded round with handicaps and a few missing scores.
//! 2. **Score**: each game is calculated independently from the same card.
//! 3. **Settle**: every game's debts are merged into one payment list.

use golf_side_games::{
    calculate, settle_round, GameConfig, GameOutcome, GameRequest, Hole, Player,
    round_engine::{
        models::{
            BestBallConfig, MatchPlayConfig, NassauConfig, NinesConfig, SkinsConfig, SnakeConfig, StablefordConfig,
            StrokePlayConfig, VegasConfig, WolfConfig,
        },
        simulator::{random_wolf_decisions, SimulationRequest},
    },
    simulate_round,
    summary_adapter::to_summary_json,
};
use rand::{rngs::StdRng, SeedableRng};

const SEED: u64 = 2024;

fn print_card(players: &[Player], holes: &[Hole]) {
    print!("{:<6}", "hole");
    for h in holes {
        print!("{:>3}", h.hole_number);
    }
    println!();
    print!("{:<6}", "par");
    for h in holes {
        print!("{:>3}", h.par);
    }
    println!();
    for p in players {
        print!("{:<6}", p.id);
        for h in holes {
            match p.strokes_on(h.hole_number) {
                Some(s) => print!("{:>3}", s),
                None => print!("{:>3}", "-"),
            }
        }
        println!("   (hcp {})", p.course_handicap.unwrap_or(0.0));
    }
    println!();
}

fn main() {
    env_logger::init();

    let round = simulate_round(&SimulationRequest {
        players: 4,
        holes_played: 18,
        gap_rate: 0.05,
        max_handicap: 18,
        rng_seed: Some(SEED),
    });
    let (players, holes) = (round.players, round.holes);
    print_card(&players, &holes);

    let ids: Vec<String> = players.iter().map(|p| p.id.clone()).collect();
    let mut rng = StdRng::seed_from_u64(SEED);
    let pair = players[..2].to_vec();

    let games: Vec<(Vec<Player>, GameConfig)> = vec![
        (pair, GameConfig::Nassau(NassauConfig { bet_amount: 5.0, is_auto_press: true, presses: vec![] })),
        (players[2..].to_vec(), GameConfig::MatchPlay(MatchPlayConfig {
            bet_amount: 10.0,
            is_auto_press: true,
            presses: vec![],
        })),
        (players.clone(), GameConfig::Skins(SkinsConfig { bet_amount: 1.0 })),
        (players.clone(), GameConfig::Wolf(WolfConfig {
            bet_amount: 1.0,
            rotation: None,
            decisions: random_wolf_decisions(&mut rng, &players, &holes),
        })),
        (players[..3].to_vec(), GameConfig::Nines(NinesConfig { bet_amount: 0.5, points_table: None })),
        (players.clone(), GameConfig::Stableford(StablefordConfig { bet_amount: 1.0, full_handicap: false })),
        (players.clone(), GameConfig::Snake(SnakeConfig { bet_amount: 2.0 })),
        (players.clone(), GameConfig::StrokePlay(StrokePlayConfig { bet_amount: 5.0, full_handicap: false })),
        (players.clone(), GameConfig::BestBall(BestBallConfig {
            bet_amount: 5.0,
            team_one: vec![ids[0].clone(), ids[3].clone()],
            team_two: vec![ids[1].clone(), ids[2].clone()],
        })),
        (players.clone(), GameConfig::Vegas(VegasConfig {
            bet_amount: 0.1,
            team_one: vec![ids[0].clone(), ids[3].clone()],
            team_two: vec![ids[1].clone(), ids[2].clone()],
            flip_on_birdie: true,
        })),
    ];

    let mut outcomes: Vec<GameOutcome> = Vec::new();
    for (field, config) in games {
        let kind = config.kind();
        match calculate(&GameRequest { players: field, holes: holes.clone(), config }) {
            Ok(outcome) => {
                let summary = to_summary_json(&outcome, None);
                println!("━━ {} ━━  {}", kind, summary["headline"].as_str().unwrap_or(""));
                for s in outcome.standings() {
                    println!("  {:<6} points {:>6.1}  money {:>+8.2}", s.player_id, s.points, s.money);
                }
                outcomes.push(outcome);
            }
            Err(e) => println!("━━ {} ━━  {}", kind, e),
        }
    }

    println!();
    match settle_round(&outcomes) {
        Ok(settled) => {
            println!("Settle up ({} payments):", settled.payments.len());
            for p in &settled.payments {
                println!("  {} pays {} {:.2}", p.from_user_id, p.to_user_id, p.amount);
            }
        }
        Err(e) => eprintln!("settlement failed: {e}"),
    }
}
