#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // may be revisited

pub mod types;
pub mod board;
pub mod track;
pub mod cards;
pub mod deck;
pub mod rng;
pub mod peg;
pub mod config;
pub mod error;
pub mod events;
pub mod state;
pub mod audit;

pub mod engine {
    pub mod apply;
    pub mod movegen;
    pub mod turn;
}

// Re-exports: stable minimal API surface for external callers
pub use crate::audit::{audit, Violation};
pub use crate::board::{build_topology, BoardGraph, HoleId};
pub use crate::cards::{rules_for, Card, CardRule, Rank, Suit};
pub use crate::config::{load_config_from_json, GameConfig};
pub use crate::deck::Deck;
pub use crate::engine::apply::{apply_move, ExecutionResult};
pub use crate::engine::movegen::{legal_moves, split_remainder_moves};
pub use crate::engine::turn::Game;
pub use crate::error::{ConfigError, GameError};
pub use crate::events::{EventSink, GameEvent, JsonLinesSink};
pub use crate::peg::{LapProgress, Peg, PegMode, PegStatus};
pub use crate::rng::{rng_for_game, rng_for_seat};
pub use crate::state::{GameState, Move, MoveKind, MoveRecord, Phase};
pub use crate::types::{Direction, HoleKind, PegId};
