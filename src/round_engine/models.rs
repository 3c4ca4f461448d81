use std::collections::BTreeMap;
use std::fmt;
use serde::{Deserialize, Serialize};

pub type PlayerId = String;

// ---------------------------------------------------------------------------
// Course and score records
// ---------------------------------------------------------------------------

/// One hole of the course as played in this round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hole {
    /// 1..=18.
    pub hole_number: u8,
    pub par: u8,
    /// Difficulty rank 1..=18, 1 = hardest. Unique per round.
    pub handicap_rank: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerScore {
    pub hole_number: u8,
    /// `None` = hole not played yet.
    pub strokes: Option<u32>,
    pub putts: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    /// `None` is allocated as scratch (0).
    pub course_handicap: Option<f64>,
    #[serde(default)]
    pub scores: BTreeMap<u8, PlayerScore>,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, course_handicap: Option<f64>) -> Self {
        Player { id: id.into(), course_handicap, scores: BTreeMap::new() }
    }

    /// Builder-style helper used by fixtures and the simulator.
    pub fn with_score(mut self, hole_number: u8, strokes: Option<u32>, putts: Option<u32>) -> Self {
        self.record(hole_number, strokes, putts);
        self
    }

    pub fn record(&mut self, hole_number: u8, strokes: Option<u32>, putts: Option<u32>) {
        self.scores.insert(hole_number, PlayerScore { hole_number, strokes, putts });
    }

    pub fn strokes_on(&self, hole_number: u8) -> Option<u32> {
        self.scores.get(&hole_number).and_then(|s| s.strokes)
    }

    pub fn putts_on(&self, hole_number: u8) -> Option<u32> {
        self.scores.get(&hole_number).and_then(|s| s.putts)
    }

    pub fn holes_scored(&self) -> usize {
        self.scores.values().filter(|s| s.strokes.is_some()).count()
    }
}

// ---------------------------------------------------------------------------
// Wolf and press records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WolfDecision {
    pub hole_number: u8,
    pub wolf_user_id: PlayerId,
    /// `None` iff `is_lone_wolf`.
    pub partner_user_id: Option<PlayerId>,
    pub is_lone_wolf: bool,
    #[serde(default)]
    pub is_blind: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Segment {
    Front,
    Back,
    Overall,
    Match,
}

impl Segment {
    /// Inclusive hole-number window the segment is bet over.
    pub fn window(self) -> (u8, u8) {
        match self {
            Segment::Front => (1, 9),
            Segment::Back => (10, 18),
            Segment::Overall | Segment::Match => (1, 18),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Front   => write!(f, "Front 9"),
            Segment::Back    => write!(f, "Back 9"),
            Segment::Overall => write!(f, "Overall"),
            Segment::Match   => write!(f, "Match"),
        }
    }
}

/// A sub-bet opened mid-match. Root presses have no parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Press {
    pub id: String,
    pub parent_press_id: Option<String>,
    pub segment: Segment,
    pub start_hole: u8,
    #[serde(default = "one")]
    pub bet_multiplier: f64,
}

fn one() -> f64 {
    1.0
}

/// Directed debt: `from_user_id` owes `to_user_id` the amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementEdge {
    pub from_user_id: PlayerId,
    pub to_user_id: PlayerId,
    pub amount: f64,
}

/// Signed per-player position in one game. Both columns sum to zero across
/// the field for every game except Stableford/Stroke Play points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    pub player_id: PlayerId,
    pub points: f64,
    pub money: f64,
}

// ---------------------------------------------------------------------------
// Game configuration (tagged union)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameKind {
    Nassau,
    Skins,
    MatchPlay,
    Wolf,
    Nines,
    Stableford,
    Snake,
    StrokePlay,
    BestBall,
    Vegas,
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameKind::Nassau     => "Nassau",
            GameKind::Skins      => "Skins",
            GameKind::MatchPlay  => "Match Play",
            GameKind::Wolf       => "Wolf",
            GameKind::Nines      => "Nines",
            GameKind::Stableford => "Stableford",
            GameKind::Snake      => "Snake",
            GameKind::StrokePlay => "Stroke Play",
            GameKind::BestBall   => "Best Ball",
            GameKind::Vegas      => "Vegas",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NassauConfig {
    pub bet_amount: f64,
    #[serde(default)]
    pub is_auto_press: bool,
    #[serde(default)]
    pub presses: Vec<Press>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinsConfig {
    pub bet_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPlayConfig {
    pub bet_amount: f64,
    #[serde(default)]
    pub is_auto_press: bool,
    #[serde(default)]
    pub presses: Vec<Press>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WolfConfig {
    pub bet_amount: f64,
    /// Tee order; defaults to the order players were supplied in.
    #[serde(default)]
    pub rotation: Option<Vec<PlayerId>>,
    #[serde(default)]
    pub decisions: Vec<WolfDecision>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NinesConfig {
    pub bet_amount: f64,
    /// Points for 1st, 2nd, ...; must have one entry per player and sum to 9.
    #[serde(default)]
    pub points_table: Option<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StablefordConfig {
    pub bet_amount: f64,
    /// Allocate each player's full course handicap instead of playing off the low man.
    #[serde(default)]
    pub full_handicap: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnakeConfig {
    pub bet_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokePlayConfig {
    pub bet_amount: f64,
    #[serde(default)]
    pub full_handicap: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestBallConfig {
    pub bet_amount: f64,
    pub team_one: Vec<PlayerId>,
    pub team_two: Vec<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VegasConfig {
    pub bet_amount: f64,
    pub team_one: Vec<PlayerId>,
    pub team_two: Vec<PlayerId>,
    #[serde(default = "yes")]
    pub flip_on_birdie: bool,
}

fn yes() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "camelCase")]
pub enum GameConfig {
    Nassau(NassauConfig),
    Skins(SkinsConfig),
    MatchPlay(MatchPlayConfig),
    Wolf(WolfConfig),
    Nines(NinesConfig),
    Stableford(StablefordConfig),
    Snake(SnakeConfig),
    StrokePlay(StrokePlayConfig),
    BestBall(BestBallConfig),
    Vegas(VegasConfig),
}

impl GameConfig {
    pub fn kind(&self) -> GameKind {
        match self {
            GameConfig::Nassau(_)     => GameKind::Nassau,
            GameConfig::Skins(_)      => GameKind::Skins,
            GameConfig::MatchPlay(_)  => GameKind::MatchPlay,
            GameConfig::Wolf(_)       => GameKind::Wolf,
            GameConfig::Nines(_)      => GameKind::Nines,
            GameConfig::Stableford(_) => GameKind::Stableford,
            GameConfig::Snake(_)      => GameKind::Snake,
            GameConfig::StrokePlay(_) => GameKind::StrokePlay,
            GameConfig::BestBall(_)   => GameKind::BestBall,
            GameConfig::Vegas(_)      => GameKind::Vegas,
        }
    }

    pub fn bet_amount(&self) -> f64 {
        match self {
            GameConfig::Nassau(c)     => c.bet_amount,
            GameConfig::Skins(c)      => c.bet_amount,
            GameConfig::MatchPlay(c)  => c.bet_amount,
            GameConfig::Wolf(c)       => c.bet_amount,
            GameConfig::Nines(c)      => c.bet_amount,
            GameConfig::Stableford(c) => c.bet_amount,
            GameConfig::Snake(c)      => c.bet_amount,
            GameConfig::StrokePlay(c) => c.bet_amount,
            GameConfig::BestBall(c)   => c.bet_amount,
            GameConfig::Vegas(c)      => c.bet_amount,
        }
    }
}

/// Everything one calculator call needs. Read-only snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRequest {
    pub players: Vec<Player>,
    #[serde(default)]
    pub holes: Vec<Hole>,
    pub config: GameConfig,
}

// ---------------------------------------------------------------------------
// Head-to-head tallies (Nassau, Match Play, presses, Best Ball)
// ---------------------------------------------------------------------------

/// Running hole-by-hole comparison over a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchTally {
    /// `None` when all square.
    pub winner_id: Option<PlayerId>,
    /// Absolute holes up; 0 iff all square.
    pub margin: u32,
    /// Signed from the first side's perspective.
    pub lead: i32,
    pub holes_played: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SegmentOutcome {
    /// Not scoreable yet, e.g. "Need 2 players" or "No scores yet".
    Pending { reason: String },
    Scored { tally: MatchTally, money: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentResult {
    pub segment: Segment,
    pub outcome: SegmentOutcome,
}

impl SegmentResult {
    pub fn tally(&self) -> Option<&MatchTally> {
        match &self.outcome {
            SegmentOutcome::Scored { tally, .. } => Some(tally),
            SegmentOutcome::Pending { .. } => None,
        }
    }

    pub fn status(&self) -> Option<&str> {
        match &self.outcome {
            SegmentOutcome::Pending { reason } => Some(reason.as_str()),
            SegmentOutcome::Scored { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PressResult {
    pub press: Press,
    /// 0 for a press on the segment itself, 1 for a press on that press, ...
    pub depth: u32,
    pub is_auto: bool,
    /// Side that was down when the press opened.
    pub pressed_by: Option<PlayerId>,
    pub tally: MatchTally,
    pub money: f64,
}

// ---------------------------------------------------------------------------
// Per-game results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NassauResult {
    pub front: SegmentResult,
    pub back: SegmentResult,
    pub overall: SegmentResult,
    pub presses: Vec<PressResult>,
    pub standings: Vec<Standing>,
    pub settlements: Vec<SettlementEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinHole {
    pub hole_number: u8,
    pub winner_id: Option<PlayerId>,
    /// Skin value on this hole (`bet + carryover` in effect).
    pub value: f64,
    pub carryover_after: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinsResult {
    pub holes: Vec<SkinHole>,
    pub total_pot: f64,
    pub carryover: f64,
    pub holes_compared: u32,
    pub standings: Vec<Standing>,
    pub settlements: Vec<SettlementEdge>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchState {
    InProgress,
    Won,
    Halved,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPlayResult {
    pub state: MatchState,
    /// "N UP", "N DOWN", "AS" from player 1, or a pending reason.
    pub status: String,
    /// "3&2", "1 UP", "HALVED" once decided.
    pub result: Option<String>,
    pub tally: Option<MatchTally>,
    pub closed_on_hole: Option<u8>,
    pub presses: Vec<PressResult>,
    pub standings: Vec<Standing>,
    pub settlements: Vec<SettlementEdge>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WolfOutcome {
    WolfSide,
    Pack,
    Push,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WolfHole {
    pub hole_number: u8,
    pub wolf_id: PlayerId,
    pub partner_id: Option<PlayerId>,
    pub is_lone_wolf: bool,
    pub is_blind: bool,
    pub outcome: WolfOutcome,
    /// Points the wolf gained (negative when the pack won).
    pub wolf_delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WolfResult {
    pub holes: Vec<WolfHole>,
    pub standings: Vec<Standing>,
    pub settlements: Vec<SettlementEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPoints {
    pub player_id: PlayerId,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolePoints {
    pub hole_number: u8,
    pub points: Vec<PlayerPoints>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NinesResult {
    pub points_table: Vec<f64>,
    pub holes: Vec<HolePoints>,
    pub standings: Vec<Standing>,
    pub settlements: Vec<SettlementEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StablefordResult {
    pub holes: Vec<HolePoints>,
    pub standings: Vec<Standing>,
    pub settlements: Vec<SettlementEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnakeEvent {
    pub hole_number: u8,
    pub player_id: PlayerId,
    pub putts: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnakeEntry {
    pub player_id: PlayerId,
    pub holds_snake: bool,
    pub three_putts: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnakeResult {
    pub holder_id: Option<PlayerId>,
    pub history: Vec<SnakeEvent>,
    pub entries: Vec<SnakeEntry>,
    pub standings: Vec<Standing>,
    pub settlements: Vec<SettlementEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeTotal {
    pub player_id: PlayerId,
    pub gross: i32,
    pub net: i32,
    pub holes_counted: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokePlayResult {
    pub totals: Vec<StrokeTotal>,
    pub winner_ids: Vec<PlayerId>,
    pub standings: Vec<Standing>,
    pub settlements: Vec<SettlementEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestBallResult {
    pub state: MatchState,
    /// From team one's perspective.
    pub status: String,
    pub result: Option<String>,
    pub lead: i32,
    pub holes_played: u32,
    pub closed_on_hole: Option<u8>,
    pub standings: Vec<Standing>,
    pub settlements: Vec<SettlementEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VegasHole {
    pub hole_number: u8,
    pub team_one_number: u32,
    pub team_two_number: u32,
    /// Positive when team one won the hole.
    pub swing: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VegasResult {
    pub holes: Vec<VegasHole>,
    pub team_one_points: i64,
    pub standings: Vec<Standing>,
    pub settlements: Vec<SettlementEdge>,
}

/// One result type per game tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "camelCase")]
pub enum GameOutcome {
    Nassau(NassauResult),
    Skins(SkinsResult),
    MatchPlay(MatchPlayResult),
    Wolf(WolfResult),
    Nines(NinesResult),
    Stableford(StablefordResult),
    Snake(SnakeResult),
    StrokePlay(StrokePlayResult),
    BestBall(BestBallResult),
    Vegas(VegasResult),
}

impl GameOutcome {
    pub fn kind(&self) -> GameKind {
        match self {
            GameOutcome::Nassau(_)     => GameKind::Nassau,
            GameOutcome::Skins(_)      => GameKind::Skins,
            GameOutcome::MatchPlay(_)  => GameKind::MatchPlay,
            GameOutcome::Wolf(_)       => GameKind::Wolf,
            GameOutcome::Nines(_)      => GameKind::Nines,
            GameOutcome::Stableford(_) => GameKind::Stableford,
            GameOutcome::Snake(_)      => GameKind::Snake,
            GameOutcome::StrokePlay(_) => GameKind::StrokePlay,
            GameOutcome::BestBall(_)   => GameKind::BestBall,
            GameOutcome::Vegas(_)      => GameKind::Vegas,
        }
    }

    pub fn standings(&self) -> &[Standing] {
        match self {
            GameOutcome::Nassau(r)     => &r.standings,
            GameOutcome::Skins(r)      => &r.standings,
            GameOutcome::MatchPlay(r)  => &r.standings,
            GameOutcome::Wolf(r)       => &r.standings,
            GameOutcome::Nines(r)      => &r.standings,
            GameOutcome::Stableford(r) => &r.standings,
            GameOutcome::Snake(r)      => &r.standings,
            GameOutcome::StrokePlay(r) => &r.standings,
            GameOutcome::BestBall(r)   => &r.standings,
            GameOutcome::Vegas(r)      => &r.standings,
        }
    }

    /// Raw (pre-consolidation) debts produced by this game.
    pub fn settlements(&self) -> &[SettlementEdge] {
        match self {
            GameOutcome::Nassau(r)     => &r.settlements,
            GameOutcome::Skins(r)      => &r.settlements,
            GameOutcome::MatchPlay(r)  => &r.settlements,
            GameOutcome::Wolf(r)       => &r.settlements,
            GameOutcome::Nines(r)      => &r.settlements,
            GameOutcome::Stableford(r) => &r.settlements,
            GameOutcome::Snake(r)      => &r.settlements,
            GameOutcome::StrokePlay(r) => &r.settlements,
            GameOutcome::BestBall(r)   => &r.settlements,
            GameOutcome::Vegas(r)      => &r.settlements,
        }
    }
}
