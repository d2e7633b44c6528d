//! Lazy walks over the board: perimeter, FastTrack ring, safe zone and the
//! fifth-peg run to Home, with lap progress tracked step by step.

use crate::board::{BoardGraph, HoleId};
use crate::peg::LapProgress;
use crate::types::Direction;

/// Longest walk any card can ask for.
pub const MAX_WALK: usize = 30;

/// Which route a walking peg is following after a given step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    Perimeter,
    Ring { entered_at: HoleId },
    SafeZone,
    /// Past a full safe zone's entry, heading for Home.
    HomeRun,
}

/// Per-peg facts the walk needs but the board does not hold.
#[derive(Debug, Clone, Copy)]
pub struct RouteContext {
    pub section: u8,
    /// FastTrack hole where a ring traversal leaves for the perimeter.
    pub exit: HoleId,
    /// All four safe-zone holes already hold the owner's pegs.
    pub safe_zone_full: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackStep {
    pub hole: HoleId,
    pub lane: Lane,
    pub lap: LapProgress,
}

#[derive(Debug, Clone)]
pub struct TrackCursor<'a> {
    board: &'a BoardGraph,
    ctx: RouteContext,
    dir: Direction,
    hole: HoleId,
    lane: Lane,
    lap: LapProgress,
    taken: usize,
}

impl BoardGraph {
    /// Walk from `start` one hole at a time. Occupancy is not considered here;
    /// callers stop the walk on blocking pegs.
    pub fn track_sequence_from(
        &self,
        start: HoleId,
        lane: Lane,
        lap: LapProgress,
        dir: Direction,
        ctx: RouteContext,
    ) -> TrackCursor<'_> {
        TrackCursor {
            board: self,
            ctx,
            dir,
            hole: start,
            lane,
            lap,
            taken: 0,
        }
    }
}

impl Iterator for TrackCursor<'_> {
    type Item = TrackStep;

    fn next(&mut self) -> Option<TrackStep> {
        if self.taken >= MAX_WALK {
            return None;
        }
        let board = self.board;
        let section = self.ctx.section;
        let entry = board.safe_zone_entry(section);

        let (hole, mut lane) = match (self.dir, self.lane) {
            (Direction::Backward, _) => (
                board.track_step(self.hole, Direction::Backward)?,
                Lane::Perimeter,
            ),
            (Direction::Forward, Lane::HomeRun) => return None,
            (Direction::Forward, Lane::SafeZone) => {
                (board.safe_zone_after(self.hole)?, Lane::SafeZone)
            }
            (Direction::Forward, Lane::Ring { entered_at }) => (
                board.ring_step(self.hole, Direction::Forward)?,
                Lane::Ring { entered_at },
            ),
            (Direction::Forward, Lane::Perimeter) => {
                if self.hole == entry && self.lap.is_eligible() {
                    if self.ctx.safe_zone_full {
                        (board.home(section), Lane::HomeRun)
                    } else {
                        (board.safe_zone(section)[0], Lane::SafeZone)
                    }
                } else {
                    (
                        board.track_step(self.hole, Direction::Forward)?,
                        Lane::Perimeter,
                    )
                }
            }
        };

        match self.dir {
            Direction::Forward => {
                // Arriving at the entry from the hole just before it closes the lap.
                if lane == Lane::Perimeter
                    && hole == entry
                    && board.track_step(entry, Direction::Backward) == Some(self.hole)
                {
                    self.lap = LapProgress::Locked;
                }
                // Hyperspace: own exit reached after entering the ring elsewhere.
                if let Lane::Ring { entered_at } = lane {
                    if hole == self.ctx.exit && entered_at != hole {
                        self.lap = LapProgress::Locked;
                        lane = Lane::Perimeter;
                    }
                }
            }
            Direction::Backward => {
                if self.lap == LapProgress::Locked {
                    self.lap = LapProgress::Eligible;
                }
                if hole == entry && self.lap == LapProgress::Unfinished {
                    self.lap = LapProgress::Eligible;
                }
            }
        }

        self.hole = hole;
        self.lane = lane;
        self.taken += 1;
        Some(TrackStep {
            hole,
            lane,
            lap: self.lap,
        })
    }
}
