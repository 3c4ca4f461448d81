//! Press engine shared by Nassau and Match Play.
//!
//! Presses form a forest over one segment: a root press hangs off the segment
//! itself, a nested press ("press the press") hangs off another press. The
//! forest is stored as an arena of records indexed by position, each holding
//! an optional parent index. Every press is scored exactly like its parent
//! match, over its own window `[start_hole, segment end]`.
//!
//! ## Auto-press
//!
//! With auto-press on, every match in the forest (the segment and each press)
//! is walked hole by hole. Each time the margin reaches the threshold from
//! below, one new press opens on the next hole. Staying down does not open
//! another; recovering and falling back to the threshold does.

use std::collections::HashSet;

use crate::round_engine::{
    error::GameError,
    helpers::{from_cents, tally, to_cents, Duel},
    models::{PlayerId, Press, PressResult, Segment},
};

/// Largest stake multiple a single press may carry.
pub const MAX_BET_MULTIPLIER: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressSettings {
    pub auto: bool,
    pub threshold: u32,
    pub max_depth: u32,
}

#[derive(Debug, Clone)]
struct PressNode {
    press: Press,
    parent: Option<usize>,
    depth: u32,
    is_auto: bool,
    pressed_by: Option<PlayerId>,
}

/// All presses on one segment.
#[derive(Debug, Clone)]
pub struct PressArena<'a> {
    segment: Segment,
    /// Last hole any press on this segment counts.
    end_hole: u8,
    duels: &'a [Duel],
    sides: (&'a str, &'a str),
    nodes: Vec<PressNode>,
}

impl<'a> PressArena<'a> {
    /// Validate the manual presses for `segment` and open any auto-presses.
    ///
    /// `end_hole` is the segment's last counting hole (earlier than the
    /// window end when a match closed out).
    pub fn build(
        segment: Segment,
        end_hole: u8,
        duels: &'a [Duel],
        manual: &[Press],
        settings: &PressSettings,
        sides: (&'a str, &'a str),
    ) -> Result<Self, GameError> {
        let end_hole = end_hole.min(segment.window().1);
        let mut arena = PressArena { segment, end_hole, duels, sides, nodes: Vec::new() };

        let mut ordered: Vec<&Press> = manual.iter().filter(|p| p.segment == segment).collect();
        ordered.sort_by_key(|p| p.start_hole);
        for press in ordered {
            arena.insert_manual(press, settings)?;
        }

        if settings.auto {
            arena.spawn_auto(None, settings);
            let mut i = 0;
            while i < arena.nodes.len() {
                arena.spawn_auto(Some(i), settings);
                i += 1;
            }
        }
        Ok(arena)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Score every press. `bet_amount` is the parent stake; when `payable` is
    /// false (undecided match) the tallies are reported with zero money.
    pub fn score(&self, bet_amount: f64, payable: bool) -> Vec<PressResult> {
        let (first, second) = self.sides;
        self.nodes
            .iter()
            .map(|node| {
                let tally = tally(self.duels, node.press.start_hole, self.end_hole, first, second);
                let money = if payable && tally.winner_id.is_some() {
                    from_cents(to_cents(bet_amount * node.press.bet_multiplier))
                } else {
                    0.0
                };
                PressResult {
                    press: node.press.clone(),
                    depth: node.depth,
                    is_auto: node.is_auto,
                    pressed_by: node.pressed_by.clone(),
                    tally,
                    money,
                }
            })
            .collect()
    }

    fn match_start(&self, parent: Option<usize>) -> u8 {
        match parent {
            Some(i) => self.nodes[i].press.start_hole,
            None => self.segment.window().0,
        }
    }

    /// Side that is down, given a lead from the first side's perspective.
    fn trailing_side(&self, lead: i32) -> Option<PlayerId> {
        match lead.signum() {
            1 => Some(self.sides.1.to_string()),
            -1 => Some(self.sides.0.to_string()),
            _ => None,
        }
    }

    fn insert_manual(&mut self, press: &Press, settings: &PressSettings) -> Result<(), GameError> {
        let invalid = |reason: String| GameError::InvalidPress { press_id: press.id.clone(), reason };
        let (window_start, window_end) = self.segment.window();

        if self.nodes.iter().any(|n| n.press.id == press.id) {
            return Err(invalid("duplicate press id".into()));
        }
        if !press.bet_multiplier.is_finite() || press.bet_multiplier <= 0.0 {
            return Err(invalid(format!("bet multiplier must be positive (got {})", press.bet_multiplier)));
        }
        if press.bet_multiplier > MAX_BET_MULTIPLIER {
            return Err(invalid(format!(
                "bet multiplier {} exceeds the limit of {}",
                press.bet_multiplier, MAX_BET_MULTIPLIER
            )));
        }
        if press.start_hole <= window_start || press.start_hole > window_end {
            return Err(invalid(format!(
                "start hole {} is outside the {} window",
                press.start_hole, self.segment
            )));
        }

        let parent = match &press.parent_press_id {
            None => None,
            Some(pid) => {
                let idx = self
                    .nodes
                    .iter()
                    .position(|n| &n.press.id == pid)
                    .ok_or_else(|| invalid(format!("parent press {pid} not found on the {} segment", self.segment)))?;
                if self.nodes[idx].press.start_hole >= press.start_hole {
                    return Err(invalid(format!("must start after parent press {pid}")));
                }
                Some(idx)
            }
        };

        let (first, second) = self.sides;
        let parent_start = self.match_start(parent);
        let lead = tally(self.duels, parent_start, press.start_hole - 1, first, second).lead;
        if lead.unsigned_abs() < settings.threshold {
            return Err(invalid(format!(
                "neither side is {} down after hole {}",
                settings.threshold,
                press.start_hole - 1
            )));
        }

        let depth = parent.map(|i| self.nodes[i].depth + 1).unwrap_or(0);
        self.nodes.push(PressNode {
            press: press.clone(),
            parent,
            depth,
            is_auto: false,
            pressed_by: self.trailing_side(lead),
        });
        Ok(())
    }

    fn spawn_auto(&mut self, parent: Option<usize>, settings: &PressSettings) {
        let depth = parent.map(|i| self.nodes[i].depth + 1).unwrap_or(0);
        if depth >= settings.max_depth {
            return;
        }
        let start = self.match_start(parent);
        let mut lead = 0i32;
        let mut prev = 0u32;
        let mut openings = Vec::new();
        for d in self.duels.iter().filter(|d| d.hole_number >= start && d.hole_number <= self.end_hole) {
            lead += d.swing;
            let down = lead.unsigned_abs();
            if down >= settings.threshold && prev < settings.threshold && d.hole_number < self.end_hole {
                openings.push((d.hole_number + 1, lead));
            }
            prev = down;
        }

        for (start_hole, lead) in openings {
            let exists = self
                .nodes
                .iter()
                .any(|n| n.parent == parent && n.press.start_hole == start_hole);
            if exists {
                continue;
            }
            let id = match parent {
                Some(i) => format!("{}-{}", self.nodes[i].press.id, start_hole),
                None => format!("auto-{}-{}", segment_code(self.segment), start_hole),
            };
            log::debug!("auto-press {id} opened on the {} at hole {start_hole}", self.segment);
            self.nodes.push(PressNode {
                press: Press {
                    id,
                    parent_press_id: parent.map(|i| self.nodes[i].press.id.clone()),
                    segment: self.segment,
                    start_hole,
                    bet_multiplier: 1.0,
                },
                parent,
                depth,
                is_auto: true,
                pressed_by: self.trailing_side(lead),
            });
        }
    }
}

/// Reject presses on segments the game does not bet, and repeated ids.
pub fn check_press_list(presses: &[Press], allowed: &[Segment]) -> Result<(), GameError> {
    let mut seen = HashSet::with_capacity(presses.len());
    for press in presses {
        if !allowed.contains(&press.segment) {
            return Err(GameError::InvalidPress {
                press_id: press.id.clone(),
                reason: format!("the {} segment is not bet in this game", press.segment),
            });
        }
        if !seen.insert(press.id.as_str()) {
            return Err(GameError::InvalidPress {
                press_id: press.id.clone(),
                reason: "duplicate press id".into(),
            });
        }
    }
    Ok(())
}

fn segment_code(segment: Segment) -> &'static str {
    match segment {
        Segment::Front   => "front",
        Segment::Back    => "back",
        Segment::Overall => "overall",
        Segment::Match   => "match",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUTO: PressSettings = PressSettings { auto: true, threshold: 2, max_depth: 4 };
    const MANUAL: PressSettings = PressSettings { auto: false, threshold: 2, max_depth: 4 };

    fn duels(swings: &[i32]) -> Vec<Duel> {
        swings
            .iter()
            .enumerate()
            .map(|(i, &swing)| Duel { hole_number: i as u8 + 1, swing })
            .collect()
    }

    fn press(id: &str, parent: Option<&str>, start_hole: u8) -> Press {
        Press {
            id: id.into(),
            parent_press_id: parent.map(String::from),
            segment: Segment::Front,
            start_hole,
            bet_multiplier: 1.0,
        }
    }

    #[test]
    fn auto_press_fires_once_per_crossing() {
        // b wins 1 and 2 (a 2 down), stays down through 5, recovers, falls back on 8.
        let ds = duels(&[-1, -1, 0, 0, 0, 1, 0, -1, 0]);
        let arena = PressArena::build(Segment::Front, 9, &ds, &[], &AUTO, ("a", "b")).unwrap();
        let roots: Vec<u8> = arena
            .nodes
            .iter()
            .filter(|n| n.parent.is_none())
            .map(|n| n.press.start_hole)
            .collect();
        assert_eq!(roots, vec![3, 9]);
        assert!(arena.nodes.iter().all(|n| n.pressed_by.as_deref() == Some("a")));
    }

    #[test]
    fn no_press_opens_after_last_hole() {
        let ds = duels(&[0, 0, 0, 0, 0, 0, 0, 1, 1]);
        let arena = PressArena::build(Segment::Front, 9, &ds, &[], &AUTO, ("a", "b")).unwrap();
        assert!(arena.is_empty());
    }

    #[test]
    fn press_the_press_nests() {
        let ds = duels(&[1, 1, 1, 1, 0, 0, 0, 0, 0]);
        let arena = PressArena::build(Segment::Front, 9, &ds, &[], &AUTO, ("a", "b")).unwrap();
        // segment hits 2 after hole 2 -> press at 3; that press hits 2 after 4 -> nested at 5.
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.nodes[1].parent, Some(0));
        assert_eq!(arena.nodes[1].press.start_hole, 5);
        assert_eq!(arena.nodes[1].depth, 1);
        let results = arena.score(10.0, true);
        assert_eq!(results[0].tally.margin, 2);
        assert_eq!(results[0].money, 10.0);
        assert_eq!(results[1].tally.margin, 0);
        assert_eq!(results[1].money, 0.0);
    }

    #[test]
    fn manual_press_needs_two_down() {
        let ds = duels(&[1, 0, 0, 0, 0, 0, 0, 0, 0]);
        let err = PressArena::build(Segment::Front, 9, &ds, &[press("p1", None, 3)], &MANUAL, ("a", "b"))
            .unwrap_err();
        assert!(matches!(err, GameError::InvalidPress { .. }));
    }

    #[test]
    fn manual_press_outside_window_is_rejected() {
        let ds = duels(&[1, 1, 0, 0, 0, 0, 0, 0, 0]);
        let err = PressArena::build(Segment::Front, 9, &ds, &[press("p1", None, 12)], &MANUAL, ("a", "b"))
            .unwrap_err();
        assert!(err.to_string().contains("outside"));
    }

    #[test]
    fn manual_nested_press_validates_parent() {
        let ds = duels(&[1, 1, 1, 1, 0, 0, 0, 0, 0]);
        let ok = PressArena::build(
            Segment::Front,
            9,
            &ds,
            &[press("root", None, 3), press("child", Some("root"), 5)],
            &MANUAL,
            ("a", "b"),
        )
        .unwrap();
        assert_eq!(ok.len(), 2);

        let missing = PressArena::build(Segment::Front, 9, &ds, &[press("child", Some("nope"), 5)], &MANUAL, ("a", "b"));
        assert!(missing.is_err());
    }

    #[test]
    fn auto_does_not_duplicate_manual_press() {
        let ds = duels(&[-1, -1, 0, 0, 0, 0, 0, 0, 0]);
        let arena = PressArena::build(Segment::Front, 9, &ds, &[press("mine", None, 3)], &AUTO, ("a", "b")).unwrap();
        assert_eq!(arena.len(), 1);
        assert!(!arena.nodes[0].is_auto);
    }

    #[test]
    fn multiplier_scales_press_money() {
        let ds = duels(&[1, 1, 1, 0, 0, 0, 0, 0, 0]);
        let mut p = press("double", None, 3);
        p.bet_multiplier = 2.0;
        let arena = PressArena::build(Segment::Front, 9, &ds, &[p], &MANUAL, ("a", "b")).unwrap();
        let r = &arena.score(5.0, true)[0];
        assert_eq!(r.tally.winner_id.as_deref(), Some("a"));
        assert_eq!(r.money, 10.0);
        assert_eq!(arena.score(5.0, false)[0].money, 0.0);
    }

    #[test]
    fn oversized_multiplier_is_rejected() {
        let ds = duels(&[1, 1, 1, 0, 0, 0, 0, 0, 0]);
        let mut p = press("huge", None, 3);
        p.bet_multiplier = 1e300;
        assert!(matches!(
            PressArena::build(Segment::Front, 9, &ds, &[p.clone()], &MANUAL, ("a", "b")),
            Err(GameError::InvalidPress { .. })
        ));
        p.bet_multiplier = MAX_BET_MULTIPLIER;
        assert!(PressArena::build(Segment::Front, 9, &ds, &[p], &MANUAL, ("a", "b")).is_ok());
    }
}
