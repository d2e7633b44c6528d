use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::types::{
    Direction, HoleKind, HOLDING_SLOTS, SAFE_ZONE_LEN, SECTIONS, TRACK_PER_SECTION,
};

/// Opaque hole handle: an index into the board's hole table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HoleId(u16);

impl HoleId {
    #[inline]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

impl fmt::Display for HoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hole {
    pub id: HoleId,
    pub kind: HoleKind,
    /// Owning section; None only for the center.
    pub section: Option<u8>,
    /// Position within its kind group (hold 0..3, outer 0..3, side 1..4, safe 1..4).
    pub ordinal: u8,
    pub is_safe_zone_entry: bool,
    pub name: String,
}

/// Per-section hole handles, resolved once at build time.
#[derive(Debug, Clone)]
pub struct SectionHoles {
    pub holding: [HoleId; HOLDING_SLOTS],
    pub home: HoleId,
    pub outer: [HoleId; 4],
    pub side_left: [HoleId; 4],
    pub side_right: [HoleId; 4],
    pub fasttrack: HoleId,
    pub safe: [HoleId; SAFE_ZONE_LEN],
}

/// Immutable board description shared by every match.
#[derive(Debug, Clone)]
pub struct BoardGraph {
    holes: Vec<Hole>,
    by_name: HashMap<String, HoleId>,
    // Clockwise perimeter covering all six sections
    track: Vec<HoleId>,
    track_pos: Vec<Option<usize>>,
    sections: Vec<SectionHoles>,
    center: HoleId,
}

impl Default for BoardGraph {
    fn default() -> Self {
        Self::new()
    }
}

struct Builder {
    holes: Vec<Hole>,
    by_name: HashMap<String, HoleId>,
}

impl Builder {
    fn add(
        &mut self,
        name: String,
        kind: HoleKind,
        section: Option<u8>,
        ordinal: u8,
        is_safe_zone_entry: bool,
    ) -> HoleId {
        // The full board has 133 holes
        let id = HoleId(u16::try_from(self.holes.len()).unwrap_or(u16::MAX));
        self.by_name.insert(name.clone(), id);
        self.holes.push(Hole {
            id,
            kind,
            section,
            ordinal,
            is_safe_zone_entry,
            name,
        });
        id
    }
}

impl BoardGraph {
    /// Build the full six-section board. The layout does not depend on how
    /// many seats are occupied; unused sections stay part of the track.
    pub fn new() -> Self {
        let mut b = Builder {
            holes: Vec::with_capacity(usize::from(SECTIONS) * 30 + 1),
            by_name: HashMap::new(),
        };
        let mut sections = Vec::with_capacity(usize::from(SECTIONS));
        for s in 0..SECTIONS {
            let sec = Some(s);
            let holding = [0u8, 1, 2, 3]
                .map(|i| b.add(format!("hold-{s}-{i}"), HoleKind::Holding, sec, i, false));
            let home = b.add(format!("home-{s}"), HoleKind::Home, sec, 0, false);
            let outer = [0u8, 1, 2, 3]
                .map(|i| b.add(format!("outer-{s}-{i}"), HoleKind::Outer, sec, i, i == 2));
            let side_left = [1u8, 2, 3, 4]
                .map(|i| b.add(format!("side-left-{s}-{i}"), HoleKind::Side, sec, i, false));
            let side_right = [1u8, 2, 3, 4]
                .map(|i| b.add(format!("side-right-{s}-{i}"), HoleKind::Side, sec, i, false));
            let fasttrack = b.add(format!("ft-{s}"), HoleKind::FastTrack, sec, s, false);
            let safe = [1u8, 2, 3, 4]
                .map(|i| b.add(format!("safe-{s}-{i}"), HoleKind::SafeZone, sec, i, false));
            sections.push(SectionHoles {
                holding,
                home,
                outer,
                side_left,
                side_right,
                fasttrack,
                safe,
            });
        }
        let center = b.add("center".to_string(), HoleKind::Center, None, 0, false);

        let mut track = Vec::with_capacity(usize::from(SECTIONS) * TRACK_PER_SECTION);
        for sh in &sections {
            track.push(sh.fasttrack);
            track.extend_from_slice(&sh.side_left);
            track.extend_from_slice(&sh.outer[..3]);
            track.push(sh.home);
            track.push(sh.outer[3]);
            track.extend(sh.side_right.iter().rev());
        }
        let mut track_pos = vec![None; b.holes.len()];
        for (pos, id) in track.iter().enumerate() {
            track_pos[id.index()] = Some(pos);
        }

        Self {
            holes: b.holes,
            by_name: b.by_name,
            track,
            track_pos,
            sections,
            center,
        }
    }

    #[inline]
    pub fn hole(&self, id: HoleId) -> &Hole {
        &self.holes[id.index()]
    }

    #[inline]
    pub fn holes(&self) -> &[Hole] {
        &self.holes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.holes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.holes.is_empty()
    }

    #[inline]
    pub fn kind(&self, id: HoleId) -> HoleKind {
        self.hole(id).kind
    }

    #[inline]
    pub fn name(&self, id: HoleId) -> &str {
        &self.hole(id).name
    }

    #[inline]
    pub fn id(&self, name: &str) -> Option<HoleId> {
        self.by_name.get(name).copied()
    }

    /// Resolve an external hole id string (e.g. `outer-1-2`).
    pub fn parse_hole(&self, name: &str) -> Result<HoleId, GameError> {
        self.id(name)
            .ok_or_else(|| GameError::UnknownHole(name.to_string()))
    }

    #[inline]
    pub fn center(&self) -> HoleId {
        self.center
    }

    #[inline]
    pub fn section(&self, section: u8) -> &SectionHoles {
        &self.sections[usize::from(section)]
    }

    #[inline]
    pub fn home(&self, section: u8) -> HoleId {
        self.section(section).home
    }

    #[inline]
    pub fn holding(&self, section: u8) -> &[HoleId; HOLDING_SLOTS] {
        &self.section(section).holding
    }

    #[inline]
    pub fn fasttrack(&self, section: u8) -> HoleId {
        self.section(section).fasttrack
    }

    #[inline]
    pub fn safe_zone(&self, section: u8) -> &[HoleId; SAFE_ZONE_LEN] {
        &self.section(section).safe
    }

    #[inline]
    pub fn safe_zone_entry(&self, section: u8) -> HoleId {
        self.section(section).outer[2]
    }

    #[inline]
    pub fn track(&self) -> &[HoleId] {
        &self.track
    }

    #[inline]
    pub fn track_position(&self, id: HoleId) -> Option<usize> {
        self.track_pos[id.index()]
    }

    #[inline]
    pub fn is_track(&self, id: HoleId) -> bool {
        self.track_pos[id.index()].is_some()
    }

    #[inline]
    pub fn is_fasttrack(&self, id: HoleId) -> bool {
        self.kind(id) == HoleKind::FastTrack
    }

    /// One step along the perimeter; None for holes that are not on the track.
    #[inline]
    pub fn track_step(&self, id: HoleId, dir: Direction) -> Option<HoleId> {
        let pos = self.track_position(id)?;
        let n = self.track.len();
        let next = match dir {
            Direction::Forward => (pos + 1) % n,
            Direction::Backward => (pos + n - 1) % n,
        };
        Some(self.track[next])
    }

    /// One step around the inner FastTrack ring; None for non-FastTrack holes.
    #[inline]
    pub fn ring_step(&self, id: HoleId, dir: Direction) -> Option<HoleId> {
        let hole = self.hole(id);
        if hole.kind != HoleKind::FastTrack {
            return None;
        }
        let s = hole.section?;
        let next = match dir {
            Direction::Forward => (s + 1) % SECTIONS,
            Direction::Backward => (s + SECTIONS - 1) % SECTIONS,
        };
        Some(self.fasttrack(next))
    }

    /// Next safe-zone hole in the same section, None past the last one.
    #[inline]
    pub fn safe_zone_after(&self, id: HoleId) -> Option<HoleId> {
        let hole = self.hole(id);
        if hole.kind != HoleKind::SafeZone {
            return None;
        }
        let section = hole.section?;
        self.safe_zone(section).get(usize::from(hole.ordinal)).copied()
    }

    /// Ring distance from a FastTrack hole forward to `to`; None unless both are FastTrack holes.
    #[inline]
    pub fn ring_distance(&self, from: HoleId, to: HoleId) -> Option<u8> {
        if !self.is_fasttrack(from) || !self.is_fasttrack(to) {
            return None;
        }
        let a = self.hole(from).section?;
        let b = self.hole(to).section?;
        Some((b + SECTIONS - a) % SECTIONS)
    }
}

/// Build the board for a match. Every section is laid out regardless of the
/// seat count; the count is validated against the seat map.
pub fn build_topology(player_count: usize) -> Result<BoardGraph, GameError> {
    if crate::types::seats_for(player_count).is_none() {
        return Err(GameError::InvalidPlayerCount(player_count));
    }
    Ok(BoardGraph::new())
}
