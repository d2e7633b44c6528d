//! Read-only consistency checks over a game state.
//!
//! The engine keeps these facts by construction; `audit` re-derives them so
//! callers that build or mutate positions by hand (tests, the simulator) can
//! detect drift. Nothing here repairs state.

use thiserror::Error;

use crate::board::BoardGraph;
use crate::peg::{Peg, PegMode};
use crate::state::GameState;
use crate::types::{HoleKind, PegId, PEGS_PER_PLAYER};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("{peg} records hole {hole} but the occupancy map disagrees")]
    OccupancyMismatch { peg: PegId, hole: String },
    #[error("hole {hole} is shared by {first} and {second}")]
    SharedHole {
        hole: String,
        first: PegId,
        second: PegId,
    },
    #[error("hole {hole} is marked occupied by {peg} which is elsewhere")]
    StaleOccupancy { peg: PegId, hole: String },
    #[error("{peg} in mode {mode:?} cannot sit on {hole}")]
    ModeHoleMismatch {
        peg: PegId,
        mode: PegMode,
        hole: String,
    },
    #[error("{0} must leave FastTrack but is not on it")]
    StrayMustExit(PegId),
    #[error("player {player} has {count} pegs")]
    PegCount { player: usize, count: usize },
}

fn mode_fits_hole(board: &BoardGraph, section: u8, peg: &Peg) -> bool {
    let hole = board.hole(peg.hole);
    let own = hole.section == Some(section);
    match peg.status.mode {
        PegMode::Holding => hole.kind == HoleKind::Holding && own,
        PegMode::Perimeter => hole.kind.is_track(),
        PegMode::FastTrack { entered_at } => {
            hole.kind == HoleKind::FastTrack && board.is_fasttrack(entered_at)
        }
        PegMode::Bullseye => hole.kind == HoleKind::Center,
        PegMode::SafeZone => hole.kind == HoleKind::SafeZone && own,
        PegMode::Finished => hole.kind == HoleKind::Home && own,
    }
}

/// Every violation found, in player then peg order. Empty means consistent.
pub fn audit(board: &BoardGraph, state: &GameState) -> Vec<Violation> {
    let mut out = Vec::new();
    let mut seen: Vec<Option<PegId>> = vec![None; board.len()];

    for player in &state.players {
        if player.pegs.len() != PEGS_PER_PLAYER {
            out.push(Violation::PegCount {
                player: player.index,
                count: player.pegs.len(),
            });
        }
        for peg in &player.pegs {
            let name = board.name(peg.hole).to_string();
            if state.occupant(peg.hole) != Some(peg.id) {
                out.push(Violation::OccupancyMismatch {
                    peg: peg.id,
                    hole: name.clone(),
                });
            }
            match seen[peg.hole.index()] {
                Some(first) => out.push(Violation::SharedHole {
                    hole: name.clone(),
                    first,
                    second: peg.id,
                }),
                None => seen[peg.hole.index()] = Some(peg.id),
            }
            if !mode_fits_hole(board, player.section, peg) {
                out.push(Violation::ModeHoleMismatch {
                    peg: peg.id,
                    mode: peg.status.mode,
                    hole: name,
                });
            }
            if peg.must_exit_fasttrack && !peg.on_fasttrack() {
                out.push(Violation::StrayMustExit(peg.id));
            }
        }
    }

    for (idx, slot) in state.occupancy().iter().enumerate() {
        if let Some(id) = slot {
            if seen[idx] != Some(*id) {
                let hole = board.holes()[idx].name.clone();
                out.push(Violation::StaleOccupancy { peg: *id, hole });
            }
        }
    }
    out
}
