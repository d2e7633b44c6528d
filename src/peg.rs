use serde::{Deserialize, Serialize};

use crate::board::HoleId;
use crate::deck::Deck;
use crate::types::PegId;

/// Where a peg is in its lifecycle. Exactly one applies at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PegMode {
    Holding,
    Perimeter,
    /// Traversing the inner ring; `entered_at` is where the traversal began.
    FastTrack { entered_at: HoleId },
    Bullseye,
    SafeZone,
    /// Resting on Home after the fifth-peg route.
    Finished,
}

impl PegMode {
    #[inline]
    pub fn is_fasttrack(self) -> bool {
        matches!(self, PegMode::FastTrack { .. })
    }

    /// On the board and not yet done.
    #[inline]
    pub fn is_active(self) -> bool {
        !matches!(self, PegMode::Holding | PegMode::Finished)
    }
}

/// Monotonic lap facts. The ordering makes `Locked` imply `Eligible`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LapProgress {
    Unfinished,
    /// May enter the safe zone when routed past the entry.
    Eligible,
    /// Must head for the safe zone: no FastTrack or Bullseye detours.
    Locked,
}

impl LapProgress {
    #[inline]
    pub fn is_eligible(self) -> bool {
        self >= LapProgress::Eligible
    }

    #[inline]
    pub fn is_locked(self) -> bool {
        self == LapProgress::Locked
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PegStatus {
    pub mode: PegMode,
    pub lap: LapProgress,
    /// Sticky: once out of the Bullseye a peg never goes back in.
    pub exited_bullseye: bool,
}

impl PegStatus {
    pub const HOLDING: PegStatus = PegStatus {
        mode: PegMode::Holding,
        lap: LapProgress::Unfinished,
        exited_bullseye: false,
    };

    #[inline]
    pub const fn new(mode: PegMode, lap: LapProgress) -> Self {
        Self {
            mode,
            lap,
            exited_bullseye: false,
        }
    }

    #[inline]
    pub const fn perimeter() -> Self {
        Self::new(PegMode::Perimeter, LapProgress::Unfinished)
    }

    /// Status after being cut. Lap facts reset; `exited_bullseye` survives.
    #[inline]
    pub fn captured(self, to_home: bool) -> Self {
        Self {
            mode: if to_home {
                PegMode::Perimeter
            } else {
                PegMode::Holding
            },
            lap: LapProgress::Unfinished,
            exited_bullseye: self.exited_bullseye,
        }
    }

    /// Status after losing FastTrack at the end of a turn.
    #[inline]
    pub fn dropped_from_fasttrack(self) -> Self {
        Self {
            mode: PegMode::Perimeter,
            ..self
        }
    }
}

/// The single mode transition table for executed moves. Captures go through
/// `PegStatus::captured` instead.
pub fn transition_allowed(from: PegMode, to: PegMode) -> bool {
    use PegMode::*;
    match (from, to) {
        (Holding, Perimeter) => true,
        (Perimeter, Perimeter | FastTrack { .. } | Bullseye | SafeZone | Finished) => true,
        (FastTrack { .. }, Perimeter | FastTrack { .. } | Bullseye | SafeZone | Finished) => true,
        (Bullseye, Perimeter) => true,
        (SafeZone, SafeZone) => true,
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Peg {
    pub id: PegId,
    pub hole: HoleId,
    pub status: PegStatus,
    /// Set when a backward card is drawn while on FastTrack; cleared at turn end.
    pub must_exit_fasttrack: bool,
}

impl Peg {
    #[inline]
    pub fn mode(&self) -> PegMode {
        self.status.mode
    }

    #[inline]
    pub fn is_holding(&self) -> bool {
        self.status.mode == PegMode::Holding
    }

    #[inline]
    pub fn on_fasttrack(&self) -> bool {
        self.status.mode.is_fasttrack()
    }

    #[inline]
    pub fn in_bullseye(&self) -> bool {
        self.status.mode == PegMode::Bullseye
    }

    #[inline]
    pub fn in_safe_zone(&self) -> bool {
        self.status.mode == PegMode::SafeZone
    }

    #[inline]
    pub fn completed_circuit(&self) -> bool {
        self.status.mode == PegMode::Finished
    }

    #[inline]
    pub fn eligible_for_safe_zone(&self) -> bool {
        self.status.lap.is_eligible()
    }

    #[inline]
    pub fn locked_to_safe_zone(&self) -> bool {
        self.status.lap.is_locked()
    }

    #[inline]
    pub fn has_exited_bullseye(&self) -> bool {
        self.status.exited_bullseye
    }

    #[inline]
    pub fn fasttrack_entry_hole(&self) -> Option<HoleId> {
        match self.status.mode {
            PegMode::FastTrack { entered_at } => Some(entered_at),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub index: usize,
    /// Physical seat on the board, distinct from turn order below six players.
    pub section: u8,
    pub pegs: Vec<Peg>,
    pub deck: Deck,
}

impl Player {
    #[inline]
    pub fn holding_count(&self) -> usize {
        self.pegs.iter().filter(|p| p.is_holding()).count()
    }

    #[inline]
    pub fn on_board_count(&self) -> usize {
        self.pegs.len() - self.holding_count()
    }

    #[inline]
    pub fn safe_zone_count(&self) -> usize {
        self.pegs.iter().filter(|p| p.in_safe_zone()).count()
    }

    #[inline]
    pub fn fasttrack_count(&self) -> usize {
        self.pegs.iter().filter(|p| p.on_fasttrack()).count()
    }

    /// Four pegs in the safe zone and the fifth finished on Home.
    #[inline]
    pub fn has_won(&self) -> bool {
        self.safe_zone_count() == 4 && self.pegs.iter().filter(|p| p.completed_circuit()).count() == 1
    }
}
