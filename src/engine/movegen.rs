use log::trace;

use crate::board::{BoardGraph, HoleId};
use crate::cards::{Card, CardRule};
use crate::peg::{LapProgress, Peg, PegMode, PegStatus};
use crate::state::{GameState, Move, MoveKind};
use crate::track::{Lane, RouteContext, TrackStep};
use crate::types::{Direction, PegId, SECTIONS};

/// Outcome of walking `n` holes from a starting point.
struct Walk {
    steps: Vec<TrackStep>,
    /// Stopped by one of the owner's own pegs.
    blocked: bool,
}

impl Walk {
    #[inline]
    fn complete(&self, n: usize) -> bool {
        !self.blocked && self.steps.len() == n
    }

    #[inline]
    fn holes(&self, upto: usize) -> impl Iterator<Item = HoleId> + '_ {
        self.steps[..upto].iter().map(|s| s.hole)
    }
}

/// Legal-move search for one player against the current board.
pub struct MoveGen<'a> {
    board: &'a BoardGraph,
    state: &'a GameState,
    player: usize,
    section: u8,
}

impl<'a> MoveGen<'a> {
    pub fn new(board: &'a BoardGraph, state: &'a GameState, player: usize) -> Self {
        Self {
            board,
            state,
            player,
            section: state.player(player).section,
        }
    }

    #[inline]
    fn own_ft(&self) -> HoleId {
        self.board.fasttrack(self.section)
    }

    #[inline]
    fn pegs(&self) -> &'a [Peg] {
        &self.state.player(self.player).pegs
    }

    #[inline]
    fn own_occupied(&self, hole: HoleId, mover: PegId) -> bool {
        matches!(self.state.occupant(hole), Some(p) if p.player() == self.player && p != mover)
    }

    /// Empty, or an opponent that has somewhere to go when cut.
    fn landing_ok(&self, mover: &Peg, to: HoleId) -> bool {
        match self.state.occupant(to) {
            None => true,
            Some(p) if p == mover.id => false,
            Some(p) if p.player() == self.player => false,
            Some(victim) => self.state.capture_destination(self.board, victim).is_some(),
        }
    }

    /// Own FastTrack hole, rotated backward past any hole one of our other pegs sits on.
    fn effective_exit(&self, mover: PegId) -> Option<HoleId> {
        let mut hole = self.own_ft();
        for _ in 0..SECTIONS {
            if !self.own_occupied(hole, mover) {
                return Some(hole);
            }
            hole = self.board.ring_step(hole, Direction::Backward)?;
        }
        None
    }

    fn safe_zone_full(&self) -> bool {
        self.board
            .safe_zone(self.section)
            .iter()
            .all(|h| matches!(self.state.occupant(*h), Some(p) if p.player() == self.player))
    }

    fn route_context(&self, mover: PegId) -> RouteContext {
        RouteContext {
            section: self.section,
            exit: self.effective_exit(mover).unwrap_or_else(|| self.own_ft()),
            safe_zone_full: self.safe_zone_full(),
        }
    }

    fn walk(
        &self,
        mover: PegId,
        from: HoleId,
        lane: Lane,
        lap: LapProgress,
        dir: Direction,
        n: usize,
    ) -> Walk {
        let ctx = self.route_context(mover);
        let mut steps = Vec::with_capacity(n);
        let mut blocked = false;
        for step in self.board.track_sequence_from(from, lane, lap, dir, ctx).take(n) {
            if self.own_occupied(step.hole, mover) {
                blocked = true;
                break;
            }
            steps.push(step);
        }
        Walk { steps, blocked }
    }

    #[inline]
    fn status_after(peg: &Peg, step: &TrackStep) -> PegStatus {
        let mode = match step.lane {
            Lane::Perimeter => PegMode::Perimeter,
            Lane::Ring { entered_at } => PegMode::FastTrack { entered_at },
            Lane::SafeZone => PegMode::SafeZone,
            Lane::HomeRun => PegMode::Finished,
        };
        PegStatus {
            mode,
            lap: step.lap,
            exited_bullseye: peg.status.exited_bullseye,
        }
    }

    fn new_move(kind: MoveKind, peg: &Peg, to: HoleId, path: Vec<HoleId>, after: PegStatus) -> Move {
        Move {
            kind,
            peg: peg.id,
            from: peg.hole,
            to,
            steps: u8::try_from(path.len()).unwrap_or(u8::MAX),
            path,
            is_fasttrack_entry: false,
            is_center_option: false,
            is_leave_fasttrack: false,
            after,
        }
    }

    /// All moves for a drawn card.
    pub fn moves_for_card(&self, rule: &CardRule) -> Vec<Move> {
        let mut out = Vec::new();

        if rule.can_split {
            let eligible = self.split_eligible(None);
            if eligible.len() >= 2 {
                for peg in eligible {
                    for k in 1..rule.movement {
                        self.peg_moves(peg, usize::from(k), rule.direction, MoveKind::SplitFirst, &mut out);
                    }
                }
                return out;
            }
        }

        let mut entry_offered = false;
        for peg in self.pegs() {
            match peg.status.mode {
                PegMode::Holding => {
                    if rule.enters_from_holding && !entry_offered {
                        if let Some(mv) = self.enter_move(peg, rule) {
                            out.push(mv);
                            entry_offered = true;
                        }
                    }
                }
                PegMode::Finished => {}
                PegMode::Bullseye => {
                    if rule.exits_bullseye {
                        out.extend(self.bullseye_exit(peg));
                    }
                }
                _ => self.peg_moves(
                    peg,
                    usize::from(rule.movement),
                    rule.direction,
                    MoveKind::Move,
                    &mut out,
                ),
            }
        }
        out
    }

    /// Moves for the remainder of a split card, on any eligible peg but the first.
    pub fn split_remainder(&self, first: PegId, remaining: u8) -> Vec<Move> {
        let mut out = Vec::new();
        if remaining == 0 {
            return out;
        }
        for peg in self.split_eligible(Some(first)) {
            self.peg_moves(
                peg,
                usize::from(remaining),
                Direction::Forward,
                MoveKind::SplitSecond,
                &mut out,
            );
        }
        out
    }

    /// Pegs that may take part in a split: on the board, not in the Bullseye,
    /// not finished. A FastTrack peg needs a completed lap or a FastTrack partner.
    fn split_eligible(&self, exclude: Option<PegId>) -> Vec<&'a Peg> {
        let ft_count = self.state.player(self.player).fasttrack_count();
        self.pegs()
            .iter()
            .filter(|p| Some(p.id) != exclude)
            .filter(|p| match p.status.mode {
                PegMode::Perimeter | PegMode::SafeZone => true,
                PegMode::FastTrack { .. } => p.status.lap.is_eligible() || ft_count >= 2,
                _ => false,
            })
            .collect()
    }

    fn enter_move(&self, peg: &Peg, rule: &CardRule) -> Option<Move> {
        let home = self.board.home(self.section);
        if self.state.occupant(home).is_some() {
            return None;
        }
        let after = PegStatus {
            exited_bullseye: peg.status.exited_bullseye,
            ..PegStatus::perimeter()
        };
        let mut mv = Self::new_move(MoveKind::Enter, peg, home, vec![home], after);
        mv.steps = rule.entry_movement.unwrap_or(0);
        Some(mv)
    }

    fn bullseye_exit(&self, peg: &Peg) -> Option<Move> {
        let exit = self.effective_exit(peg.id)?;
        if !self.landing_ok(peg, exit) {
            return None;
        }
        let after = PegStatus {
            mode: PegMode::Perimeter,
            lap: LapProgress::Locked,
            exited_bullseye: true,
        };
        Some(Self::new_move(MoveKind::BullseyeExit, peg, exit, vec![exit], after))
    }

    /// Whole-distance moves for one peg already on the board.
    fn peg_moves(&self, peg: &Peg, n: usize, dir: Direction, kind: MoveKind, out: &mut Vec<Move>) {
        if n == 0 {
            return;
        }
        match peg.status.mode {
            PegMode::Holding | PegMode::Finished | PegMode::Bullseye => {}
            PegMode::SafeZone => {
                if dir == Direction::Forward {
                    self.walk_moves(peg, Lane::SafeZone, dir, n, kind, false, out);
                }
            }
            PegMode::Perimeter => self.walk_moves(peg, Lane::Perimeter, dir, n, kind, false, out),
            PegMode::FastTrack { entered_at } => {
                if dir == Direction::Forward && !peg.must_exit_fasttrack {
                    self.walk_moves(peg, Lane::Ring { entered_at }, dir, n, kind, false, out);
                }
                self.walk_moves(peg, Lane::Perimeter, dir, n, kind, true, out);
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn walk_moves(
        &self,
        peg: &Peg,
        lane: Lane,
        dir: Direction,
        n: usize,
        kind: MoveKind,
        leave: bool,
        out: &mut Vec<Move>,
    ) {
        let walk = self.walk(peg.id, peg.hole, lane, peg.status.lap, dir, n);
        let on_ring = matches!(lane, Lane::Ring { .. });

        if dir == Direction::Forward && !leave {
            self.center_option(peg, &walk, n, kind, out);
        }

        if !walk.complete(n) {
            if on_ring {
                self.reroute_ring(peg, &walk, walk.steps.len(), n, kind, out);
            }
            return;
        }
        let last = walk.steps[n - 1];
        if !self.landing_ok(peg, last.hole) {
            if on_ring {
                self.reroute_ring(peg, &walk, n - 1, n, kind, out);
            }
            return;
        }
        if on_ring && self.overtakes_fasttrack_peg(peg, &last) {
            self.reroute_ring(peg, &walk, n - 1, n, kind, out);
            return;
        }

        let mut mv = Self::new_move(
            kind,
            peg,
            last.hole,
            walk.holes(n).collect(),
            Self::status_after(peg, &last),
        );
        mv.is_leave_fasttrack = leave;

        let offer_entry = dir == Direction::Forward
            && !leave
            && last.lane == Lane::Perimeter
            && self.may_enter_fasttrack(peg, &last);
        if offer_entry {
            let mut entry = mv.clone();
            entry.is_fasttrack_entry = true;
            entry.after.mode = PegMode::FastTrack {
                entered_at: last.hole,
            };
            out.push(mv);
            out.push(entry);
        } else {
            out.push(mv);
        }
    }

    fn may_enter_fasttrack(&self, peg: &Peg, last: &TrackStep) -> bool {
        self.board.is_fasttrack(last.hole)
            && last.hole != self.own_ft()
            && !last.lap.is_locked()
            && !peg.on_fasttrack()
            && !peg.must_exit_fasttrack
    }

    /// Offer the Bullseye when the hole before the last step is a FastTrack
    /// hole other than the peg's own (or the peg sits on one with a one-step card).
    fn center_option(&self, peg: &Peg, walk: &Walk, n: usize, kind: MoveKind, out: &mut Vec<Move>) {
        if peg.status.exited_bullseye || peg.in_safe_zone() {
            return;
        }
        let (pivot, lap, lane) = if n == 1 {
            let lane = match peg.status.mode {
                PegMode::FastTrack { entered_at } => Lane::Ring { entered_at },
                _ => Lane::Perimeter,
            };
            (peg.hole, peg.status.lap, lane)
        } else {
            if walk.steps.len() < n - 1 {
                return;
            }
            let s = walk.steps[n - 2];
            (s.hole, s.lap, s.lane)
        };
        if !matches!(lane, Lane::Perimeter | Lane::Ring { .. }) || lap.is_locked() {
            return;
        }
        if !self.board.is_fasttrack(pivot) || pivot == self.own_ft() {
            return;
        }
        let center = self.board.center();
        if !self.landing_ok(peg, center) {
            return;
        }
        let mut path: Vec<HoleId> = walk.holes(n - 1).collect();
        path.push(center);
        let after = PegStatus {
            mode: PegMode::Bullseye,
            lap,
            exited_bullseye: false,
        };
        let mut mv = Self::new_move(kind, peg, center, path, after);
        mv.is_center_option = true;
        out.push(mv);
    }

    /// A ring walk that cannot land: back off to the nearest earlier FastTrack
    /// hole on the path and leave for the perimeter from there instead.
    fn reroute_ring(
        &self,
        peg: &Peg,
        walk: &Walk,
        upper: usize,
        n: usize,
        kind: MoveKind,
        out: &mut Vec<Move>,
    ) {
        for j in (0..upper.min(walk.steps.len())).rev() {
            let pivot = walk.steps[j];
            if !matches!(pivot.lane, Lane::Ring { .. }) {
                continue;
            }
            let remaining = n - (j + 1);
            let tail = self.walk(
                peg.id,
                pivot.hole,
                Lane::Perimeter,
                pivot.lap,
                Direction::Forward,
                remaining,
            );
            if !tail.complete(remaining) {
                continue;
            }
            let last = tail.steps[remaining - 1];
            if !self.landing_ok(peg, last.hole) {
                continue;
            }
            let path: Vec<HoleId> = walk.holes(j + 1).chain(tail.holes(remaining)).collect();
            let mut mv = Self::new_move(kind, peg, last.hole, path, Self::status_after(peg, &last));
            mv.is_leave_fasttrack = true;
            out.push(mv);
            return;
        }
    }

    /// A FastTrack peg may not finish further along the ring than one of its
    /// owner's FastTrack pegs that was ahead of it.
    fn overtakes_fasttrack_peg(&self, peg: &Peg, last: &TrackStep) -> bool {
        let exit = self.own_ft();
        let remaining = |hole: HoleId| -> i32 {
            self.board
                .ring_distance(hole, exit)
                .map_or(-1, i32::from)
        };
        let start = remaining(peg.hole);
        let dest = match last.lane {
            Lane::Ring { .. } => remaining(last.hole),
            _ => -1,
        };
        self.pegs()
            .iter()
            .filter(|o| o.id != peg.id && o.on_fasttrack())
            .any(|o| {
                let ahead = remaining(o.hole);
                start > ahead && dest < ahead
            })
    }
}

/// Every legal move for `player` holding `card`. Empty means the turn is skipped.
pub fn legal_moves(board: &BoardGraph, state: &GameState, player: usize, card: Card) -> Vec<Move> {
    let rule = card.rule();
    let moves = MoveGen::new(board, state, player).moves_for_card(&rule);
    trace!("player {player} has {} moves for {card}", moves.len());
    moves
}

/// Moves for the second half of a split card.
pub fn split_remainder_moves(
    board: &BoardGraph,
    state: &GameState,
    player: usize,
    first: PegId,
    remaining: u8,
) -> Vec<Move> {
    MoveGen::new(board, state, player).split_remainder(first, remaining)
}
