use crate::board::{BoardGraph, HoleId};
use crate::error::GameError;
use crate::peg::{transition_allowed, PegMode};
use crate::state::{GameState, Move, MoveKind};
use crate::types::{HoleKind, PegId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture {
    pub peg: PegId,
    pub from: HoleId,
    pub to: HoleId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecutionResult {
    pub captured: Option<Capture>,
    pub completed_circuit: bool,
    pub won: bool,
    /// The moving peg was on, entered, or left FastTrack.
    pub touched_fasttrack: bool,
    pub entered: bool,
    pub entered_fasttrack: bool,
    pub entered_bullseye: bool,
    pub exited_bullseye: bool,
}

/// Apply one generated move in place.
///
/// Everything is validated before anything is mutated, so an error leaves
/// the state untouched: the peg must sit on `mv.from`, the mode change must
/// be in the transition table, and an opponent on `mv.to` must have
/// somewhere to go.
pub fn apply_move(
    board: &BoardGraph,
    state: &mut GameState,
    mv: &Move,
) -> Result<ExecutionResult, GameError> {
    let peg = state.peg(mv.peg).ok_or(GameError::NoSuchPeg(mv.peg))?;
    if peg.hole != mv.from {
        return Err(GameError::IllegalDestination);
    }
    let before = peg.status;
    if !transition_allowed(before.mode, mv.after.mode) {
        return Err(GameError::IllegalTransition {
            from: before.mode,
            to: mv.after.mode,
        });
    }

    // Resolve a cut before touching anything
    let capture = match state.occupant(mv.to) {
        None => None,
        Some(other) if other.player == mv.peg.player => {
            return Err(GameError::IllegalDestination)
        }
        Some(victim) => {
            let to = state
                .capture_destination(board, victim)
                .ok_or(GameError::IllegalDestination)?;
            Some(Capture {
                peg: victim,
                from: mv.to,
                to,
            })
        }
    };

    state.lift(mv.peg);
    if let Some(c) = capture {
        let victim_status = state
            .peg(c.peg)
            .map(|p| p.status)
            .ok_or(GameError::NoSuchPeg(c.peg))?;
        let to_home = board.kind(c.to) == HoleKind::Home;
        state.place_peg(board, c.peg, c.to, victim_status.captured(to_home))?;
    }
    state.place_peg(board, mv.peg, mv.to, mv.after)?;

    let player = mv.peg.player();
    let completed_circuit = mv.after.mode == PegMode::Finished;
    Ok(ExecutionResult {
        captured: capture,
        completed_circuit,
        won: state.has_won(player),
        touched_fasttrack: before.mode.is_fasttrack() || mv.after.mode.is_fasttrack(),
        entered: mv.kind == MoveKind::Enter,
        entered_fasttrack: mv.is_fasttrack_entry,
        entered_bullseye: mv.after.mode == PegMode::Bullseye,
        exited_bullseye: mv.kind == MoveKind::BullseyeExit,
    })
}
