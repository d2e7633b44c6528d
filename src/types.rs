use std::fmt;

use serde::{Deserialize, Serialize};

/// Board sections, one per seat around the cross.
pub const SECTIONS: u8 = 6;
pub const PEGS_PER_PLAYER: usize = 5;
pub const HOLDING_SLOTS: usize = 4;
pub const SAFE_ZONE_LEN: usize = 4;
/// Track holes per section: ft, 4 side-left, 3 outer, home, 1 outer, 4 side-right.
pub const TRACK_PER_SECTION: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoleKind {
    Holding,
    Home,
    Outer,
    Side,
    FastTrack,
    Center,
    SafeZone,
}

impl HoleKind {
    /// Kinds that make up the clockwise perimeter track.
    #[inline]
    pub fn is_track(self) -> bool {
        matches!(
            self,
            HoleKind::Home | HoleKind::Outer | HoleKind::Side | HoleKind::FastTrack
        )
    }
}

/// A peg handle: owning player index (turn order, not board section) and slot 0..5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PegId {
    pub player: u8,
    pub index: u8,
}

impl PegId {
    #[inline]
    pub const fn new(player: u8, index: u8) -> Self {
        Self { player, index }
    }

    #[inline]
    pub fn player(self) -> usize {
        usize::from(self.player)
    }
}

impl fmt::Display for PegId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "peg-{}-{}", self.player, self.index)
    }
}

/// Seat map: which board sections are used for a given player count.
pub fn seats_for(player_count: usize) -> Option<&'static [u8]> {
    match player_count {
        2 => Some(&[0, 3]),
        3 => Some(&[0, 2, 4]),
        4 => Some(&[0, 1, 3, 4]),
        5 => Some(&[0, 1, 2, 3, 4]),
        6 => Some(&[0, 1, 2, 3, 4, 5]),
        _ => None,
    }
}
