use log::{debug, info};

use crate::board::{build_topology, BoardGraph};
use crate::cards::Card;
use crate::config::GameConfig;
use crate::engine::apply::{apply_move, ExecutionResult};
use crate::engine::movegen::{legal_moves, split_remainder_moves};
use crate::error::GameError;
use crate::events::{CaptureRecord, EventSink, GameEvent};
use crate::state::{GameState, Move, MoveKind, MoveRecord, PendingSplit, Phase};
use crate::types::Direction;

/// The turn controller: the only entry point external callers drive.
///
/// Flow per turn: `draw` → (`choose_move` | `skip`) → next `draw`, with
/// extra turns keeping the same player. A card with no legal moves is
/// skipped automatically inside `draw`.
pub struct Game {
    board: BoardGraph,
    state: GameState,
    legal: Vec<Move>,
    sinks: Vec<Box<dyn EventSink>>,
}

impl Game {
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        let board = build_topology(config.player_count)?;
        let state = GameState::new(&board, config)?;
        Ok(Self::from_state(board, state))
    }

    /// Resume from an existing state, e.g. a prepared position.
    pub fn from_state(board: BoardGraph, state: GameState) -> Self {
        Self {
            board,
            state,
            legal: Vec::new(),
            sinks: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    #[inline]
    pub fn board(&self) -> &BoardGraph {
        &self.board
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for position setup; rule checks are bypassed.
    #[inline]
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Board and state together, for setup helpers that need both.
    #[inline]
    pub fn parts_mut(&mut self) -> (&BoardGraph, &mut GameState) {
        (&self.board, &mut self.state)
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    #[inline]
    pub fn current_player(&self) -> usize {
        self.state.current_player
    }

    #[inline]
    pub fn winner(&self) -> Option<usize> {
        self.state.winner
    }

    #[inline]
    pub fn legal_moves(&self) -> &[Move] {
        &self.legal
    }

    fn emit(&mut self, event: GameEvent) {
        for sink in &mut self.sinks {
            sink.emit(&event);
        }
    }

    fn require(&self, phase: Phase, action: &'static str) -> Result<(), GameError> {
        if self.state.phase == phase {
            Ok(())
        } else {
            Err(GameError::InvalidPhase {
                action,
                phase: self.state.phase,
            })
        }
    }

    fn records(&self) -> Vec<MoveRecord> {
        self.legal.iter().map(|m| m.record(&self.board)).collect()
    }

    /// Waiting → Draw for the first player.
    pub fn start(&mut self) -> Result<(), GameError> {
        self.require(Phase::Waiting, "start")?;
        self.state.phase = Phase::Draw;
        Ok(())
    }

    /// Draw for the current player and compute the legal moves.
    pub fn draw(&mut self) -> Result<Card, GameError> {
        self.require(Phase::Draw, "draw")?;
        let player = self.state.current_player;
        let card = self.state.players[player].deck.draw();
        let rule = card.rule();
        debug!("player {player} drew {card}");

        self.state.current_card = Some(card);
        self.state.ft_traversed_this_turn = false;
        self.state.moved_this_turn = false;
        self.state.pending_split = None;
        if rule.direction == Direction::Backward {
            for peg in &mut self.state.players[player].pegs {
                if peg.on_fasttrack() {
                    peg.must_exit_fasttrack = true;
                }
            }
        }
        self.emit(GameEvent::CardDrawn { player, card });

        self.legal = legal_moves(&self.board, &self.state, player, card);
        let moves = self.records();
        self.emit(GameEvent::LegalMovesReady { player, moves });
        self.state.phase = Phase::Play;

        if self.legal.is_empty() {
            debug!("player {player} has no legal move for {card}, skipping");
            self.end_turn(false);
        }
        Ok(card)
    }

    /// Execute one of the offered moves.
    pub fn choose_move(&mut self, mv: &Move) -> Result<ExecutionResult, GameError> {
        self.require(Phase::Play, "choose_move")?;
        if self.state.peg(mv.peg).is_none() {
            return Err(GameError::NoSuchPeg(mv.peg));
        }
        if !self.legal.contains(mv) {
            return Err(GameError::IllegalDestination);
        }
        let player = self.state.current_player;
        let result = apply_move(&self.board, &mut self.state, mv)?;
        debug!(
            "player {player} moved {} {} -> {}",
            mv.peg,
            self.board.name(mv.from),
            self.board.name(mv.to)
        );

        self.state.moved_this_turn = true;
        if result.touched_fasttrack {
            self.state.ft_traversed_this_turn = true;
        }
        let captured = result.captured.map(|c| CaptureRecord {
            peg_id: c.peg.to_string(),
            from_hole_id: self.board.name(c.from).to_string(),
            to_hole_id: self.board.name(c.to).to_string(),
        });
        self.emit(GameEvent::MoveExecuted {
            player,
            mv: mv.record(&self.board),
            captured,
            entered: result.entered,
            entered_fasttrack: result.entered_fasttrack,
            entered_bullseye: result.entered_bullseye,
            exited_bullseye: result.exited_bullseye,
            completed_circuit: result.completed_circuit,
        });

        if result.won {
            info!(
                "player {player} wins after {} turns",
                self.state.turn_count
            );
            self.state.winner = Some(player);
            self.state.phase = Phase::GameOver;
            self.legal.clear();
            self.emit(GameEvent::GameOver { winner: player });
            return Ok(result);
        }

        if mv.kind == MoveKind::SplitFirst {
            let total = self
                .state
                .current_card
                .map_or(0, |c| c.rule().movement);
            let remaining = total.saturating_sub(mv.steps);
            let second = split_remainder_moves(&self.board, &self.state, player, mv.peg, remaining);
            if !second.is_empty() {
                self.state.pending_split = Some(PendingSplit {
                    first_peg: mv.peg,
                    remaining,
                });
                self.legal = second;
                let moves = self.records();
                self.emit(GameEvent::LegalMovesReady { player, moves });
                return Ok(result);
            }
            debug!("player {player} forfeits {remaining} split steps");
        }

        self.end_turn(true);
        Ok(result)
    }

    /// Accept a move selection in its external form.
    pub fn choose_record(&mut self, record: &MoveRecord) -> Result<ExecutionResult, GameError> {
        let mv = self
            .legal
            .iter()
            .find(|m| m.record(&self.board) == *record)
            .cloned()
            .ok_or(GameError::IllegalDestination)?;
        self.choose_move(&mv)
    }

    #[inline]
    pub fn choose_move_index(&mut self, index: usize) -> Result<ExecutionResult, GameError> {
        let mv = self
            .legal
            .get(index)
            .cloned()
            .ok_or(GameError::IllegalDestination)?;
        self.choose_move(&mv)
    }

    /// Give up the rest of the turn. Never earns an extra turn.
    pub fn skip(&mut self) -> Result<(), GameError> {
        self.require(Phase::Play, "skip")?;
        self.end_turn(false);
        Ok(())
    }

    fn end_turn(&mut self, played: bool) {
        self.state.phase = Phase::TurnEnding;
        let player = self.state.current_player;
        self.state.pending_split = None;
        self.legal.clear();

        let card = self.state.current_card.take();
        if let Some(card) = card {
            self.state.players[player].deck.discard(card);
        }

        // FastTrack must be used every turn it is held
        if self.state.moved_this_turn && !self.state.ft_traversed_this_turn {
            for peg in &mut self.state.players[player].pegs {
                if peg.on_fasttrack() {
                    debug!("{} loses FastTrack", peg.id);
                    peg.status = peg.status.dropped_from_fasttrack();
                }
            }
        }
        for peg in &mut self.state.players[player].pegs {
            peg.must_exit_fasttrack = false;
        }

        let extra_turn = played && card.is_some_and(|c| c.rule().extra_turn);
        self.state.extra_turn_pending = extra_turn;
        self.emit(GameEvent::TurnEnded { player, extra_turn });

        if !extra_turn {
            self.state.current_player = (player + 1) % self.state.player_count();
            self.state.turn_count += 1;
        }
        self.state.phase = Phase::Draw;
    }
}
