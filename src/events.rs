use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use log::warn;
use serde::Serialize;

use crate::cards::Card;
use crate::state::MoveRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptureRecord {
    pub peg_id: String,
    pub from_hole_id: String,
    pub to_hole_id: String,
}

/// Everything the engine tells its collaborators (renderers, sessions, logs).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    CardDrawn {
        player: usize,
        card: Card,
    },
    LegalMovesReady {
        player: usize,
        moves: Vec<MoveRecord>,
    },
    MoveExecuted {
        player: usize,
        #[serde(rename = "move")]
        mv: MoveRecord,
        captured: Option<CaptureRecord>,
        entered: bool,
        entered_fasttrack: bool,
        entered_bullseye: bool,
        exited_bullseye: bool,
        completed_circuit: bool,
    },
    TurnEnded {
        player: usize,
        extra_turn: bool,
    },
    GameOver {
        winner: usize,
    },
}

pub trait EventSink {
    fn emit(&mut self, event: &GameEvent);
}

/// Shared in-memory log; keep a clone of the handle to read it back.
impl EventSink for Rc<RefCell<Vec<GameEvent>>> {
    fn emit(&mut self, event: &GameEvent) {
        self.borrow_mut().push(event.clone());
    }
}

/// Writes one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> EventSink for JsonLinesSink<W> {
    fn emit(&mut self, event: &GameEvent) {
        let res = serde_json::to_writer(&mut self.out, event)
            .map_err(std::io::Error::from)
            .and_then(|()| self.out.write_all(b"\n"));
        if let Err(e) = res {
            warn!("dropping event, write failed: {e}");
        }
    }
}
