use serde::{Deserialize, Serialize};

use crate::board::{BoardGraph, HoleId};
use crate::cards::Card;
use crate::config::GameConfig;
use crate::deck::Deck;
use crate::error::GameError;
use crate::peg::{Peg, PegStatus, Player};
use crate::rng::rng_for_seat;
use crate::types::{PegId, HOLDING_SLOTS, PEGS_PER_PLAYER};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Waiting,
    Draw,
    Play,
    TurnEnding,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    Enter,
    Move,
    BullseyeExit,
    SplitFirst,
    SplitSecond,
}

/// One legal destination for one peg.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub kind: MoveKind,
    pub peg: PegId,
    pub from: HoleId,
    pub to: HoleId,
    pub steps: u8,
    /// Every hole stepped on, destination last.
    pub path: Vec<HoleId>,
    pub is_fasttrack_entry: bool,
    pub is_center_option: bool,
    pub is_leave_fasttrack: bool,
    /// Peg status once the move is applied.
    pub after: PegStatus,
}

/// External move contract, hole ids rendered as names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecord {
    #[serde(rename = "type")]
    pub kind: MoveKind,
    pub peg_id: String,
    pub from_hole_id: String,
    pub to_hole_id: String,
    pub steps: u8,
    pub path: Vec<String>,
    pub is_fast_track_entry: bool,
    pub is_center_option: bool,
    pub is_leave_fast_track: bool,
}

impl Move {
    pub fn record(&self, board: &BoardGraph) -> MoveRecord {
        MoveRecord {
            kind: self.kind,
            peg_id: self.peg.to_string(),
            from_hole_id: board.name(self.from).to_string(),
            to_hole_id: board.name(self.to).to_string(),
            steps: self.steps,
            path: self.path.iter().map(|h| board.name(*h).to_string()).collect(),
            is_fast_track_entry: self.is_fasttrack_entry,
            is_center_option: self.is_center_option,
            is_leave_fast_track: self.is_leave_fasttrack,
        }
    }
}

/// Second half of a split card still owed this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingSplit {
    pub first_peg: PegId,
    pub remaining: u8,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: Phase,
    pub players: Vec<Player>,
    // Indexed by HoleId; kept in step with every peg's `hole`
    occupancy: Vec<Option<PegId>>,
    pub current_player: usize,
    pub current_card: Option<Card>,
    pub turn_count: u32,
    pub extra_turn_pending: bool,
    pub ft_traversed_this_turn: bool,
    pub moved_this_turn: bool,
    pub pending_split: Option<PendingSplit>,
    pub winner: Option<usize>,
}

impl GameState {
    /// Opening position: four pegs in Holding and one on Home per player.
    pub fn new(board: &BoardGraph, config: &GameConfig) -> Result<Self, GameError> {
        let seats = config.seats()?;
        let mut occupancy = vec![None; board.len()];
        let mut players = Vec::with_capacity(seats.len());

        for (seat, &section) in (0u8..).zip(seats.iter()) {
            let mut pegs = Vec::with_capacity(PEGS_PER_PLAYER);
            for i in (0u8..).take(PEGS_PER_PLAYER) {
                let id = PegId::new(seat, i);
                let slot = usize::from(i);
                let (hole, status) = if slot < HOLDING_SLOTS {
                    (board.holding(section)[slot], PegStatus::HOLDING)
                } else {
                    (board.home(section), PegStatus::perimeter())
                };
                occupancy[hole.index()] = Some(id);
                pegs.push(Peg {
                    id,
                    hole,
                    status,
                    must_exit_fasttrack: false,
                });
            }
            players.push(Player {
                index: usize::from(seat),
                section,
                pegs,
                deck: Deck::new(rng_for_seat(config.seed, section)),
            });
        }

        Ok(Self {
            phase: Phase::Waiting,
            players,
            occupancy,
            current_player: 0,
            current_card: None,
            turn_count: 0,
            extra_turn_pending: false,
            ft_traversed_this_turn: false,
            moved_this_turn: false,
            pending_split: None,
            winner: None,
        })
    }

    #[inline]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    #[inline]
    pub fn player(&self, index: usize) -> &Player {
        &self.players[index]
    }

    #[inline]
    pub fn occupant(&self, hole: HoleId) -> Option<PegId> {
        self.occupancy[hole.index()]
    }

    #[inline]
    pub fn peg(&self, id: PegId) -> Option<&Peg> {
        self.players
            .get(id.player())
            .and_then(|p| p.pegs.get(usize::from(id.index)))
    }

    #[inline]
    pub(crate) fn peg_mut(&mut self, id: PegId) -> Option<&mut Peg> {
        self.players
            .get_mut(id.player())
            .and_then(|p| p.pegs.get_mut(usize::from(id.index)))
    }

    /// Iterate every peg of every player.
    #[inline]
    pub fn pegs(&self) -> impl Iterator<Item = &Peg> {
        self.players.iter().flat_map(|p| p.pegs.iter())
    }

    /// Put a peg on a hole with the given status. Used to set up positions and
    /// by the executor; the hole must be empty or already hold this peg.
    pub fn place_peg(
        &mut self,
        board: &BoardGraph,
        id: PegId,
        hole: HoleId,
        status: PegStatus,
    ) -> Result<(), GameError> {
        let old = self.peg(id).ok_or(GameError::NoSuchPeg(id))?.hole;
        match self.occupant(hole) {
            Some(other) if other != id => {
                return Err(GameError::HoleOccupied(board.name(hole).to_string()))
            }
            _ => {}
        }
        if self.occupancy[old.index()] == Some(id) {
            self.occupancy[old.index()] = None;
        }
        self.occupancy[hole.index()] = Some(id);
        if let Some(peg) = self.peg_mut(id) {
            peg.hole = hole;
            peg.status = status;
            if !status.mode.is_fasttrack() {
                peg.must_exit_fasttrack = false;
            }
        }
        Ok(())
    }

    /// Take a peg off the occupancy map without moving it; it must be placed again.
    #[inline]
    pub(crate) fn lift(&mut self, id: PegId) {
        if let Some(hole) = self.peg(id).map(|p| p.hole) {
            if self.occupancy[hole.index()] == Some(id) {
                self.occupancy[hole.index()] = None;
            }
        }
    }

    /// Where a cut peg would be sent: the owner's first free Holding slot,
    /// else their Home if it is empty. `None` means the cut is not allowed.
    pub fn capture_destination(&self, board: &BoardGraph, victim: PegId) -> Option<HoleId> {
        let section = self.players.get(victim.player())?.section;
        if let Some(slot) = board
            .holding(section)
            .iter()
            .copied()
            .find(|h| self.occupant(*h).is_none())
        {
            return Some(slot);
        }
        let home = board.home(section);
        self.occupant(home).is_none().then_some(home)
    }

    #[inline]
    pub fn has_won(&self, player: usize) -> bool {
        self.players.get(player).is_some_and(Player::has_won)
    }

    #[inline]
    pub(crate) fn occupancy(&self) -> &[Option<PegId>] {
        &self.occupancy
    }
}
