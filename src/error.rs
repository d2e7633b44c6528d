use std::path::PathBuf;

use thiserror::Error;

use crate::peg::PegMode;
use crate::state::Phase;
use crate::types::PegId;

/// Recoverable rejections. State is left unchanged whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("{action} is not allowed in phase {phase:?}")]
    InvalidPhase { action: &'static str, phase: Phase },
    #[error("no such peg {0}")]
    NoSuchPeg(PegId),
    #[error("move is not among the legal moves for this card")]
    IllegalDestination,
    #[error("peg cannot go from {from:?} to {to:?}")]
    IllegalTransition { from: PegMode, to: PegMode },
    #[error("hole {0} is already occupied")]
    HoleOccupied(String),
    #[error("unknown hole id '{0}'")]
    UnknownHole(String),
    #[error("unsupported player count {0} (expected 2..=6)")]
    InvalidPlayerCount(usize),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] GameError),
}
