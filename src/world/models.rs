//! Data structures representing world file components

use std::collections::HashSet;
use std::fmt;

use super::error::{Result, WorldError};

/// Oldest world format version with a section-pointer table.
pub const MIN_SUPPORTED_VERSION: i32 = 88;

/// Parsed world file header.
///
/// Combines the file preamble (version, section pointers, frame-important
/// table) with the identity and dimension fields from the header section.
/// Built once per file and never mutated afterwards.
#[derive(Debug)]
pub struct WorldHeader {
    pub version: WorldVersion,
    pub name: String,
    pub seed: String,
    pub generator_version: i64,
    pub world_id: i32,
    pub bounds: WorldBounds,
    /// Absolute byte offsets of the file's sections. Entries 0 and 1 are
    /// the header and tile sections; the rest (chests, signs, NPCs, ...)
    /// are not decoded by this crate.
    pub section_offsets: Vec<u32>,
    /// Tile types whose on-disk records carry two extra frame-coordinate
    /// shorts.
    pub frame_important: HashSet<u16>,
    /// Grid width in tiles (columns).
    pub width: u32,
    /// Grid height in tiles (rows).
    pub height: u32,
}

impl WorldHeader {
    pub fn header_offset(&self) -> u64 {
        u64::from(self.section_offsets[0])
    }

    pub fn tiles_offset(&self) -> u64 {
        u64::from(self.section_offsets[1])
    }
}

/// World edges in pixel coordinates, as stored in the header section.
#[derive(Debug, Clone, Copy)]
pub struct WorldBounds {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

/// World format version.
///
/// The format evolved linearly, so the version is kept as the raw number
/// with predicates for the layout thresholds that matter to this decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorldVersion(pub i32);

impl WorldVersion {
    /// Version 135 prepended a fixed magic tag, file type, revision and
    /// favorites bitmask to the file.
    pub fn has_magic_preamble(&self) -> bool {
        self.0 >= 135
    }

    /// Version 179 added a 16-byte GUID to the header section.
    pub fn has_guid(&self) -> bool {
        self.0 >= 179
    }
}

impl fmt::Display for WorldVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for WorldVersion {
    type Error = WorldError;

    fn try_from(v: i32) -> Result<Self> {
        if v < MIN_SUPPORTED_VERSION {
            Err(WorldError::UnsupportedVersion(v))
        } else {
            Ok(Self(v))
        }
    }
}

/// One RLE record from the tile stream: `run_length` consecutive rows of
/// one column sharing the same tile id, starting at `(column, row)`.
///
/// Runs are yielded one at a time and are meant to be consumed immediately;
/// the full grid is never held in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRun {
    pub column: u32,
    pub row: u32,
    /// `None` when the cell carries no tile (walls or liquid may still be
    /// present on disk, but they are consumed and discarded).
    pub tile_id: Option<u16>,
    /// Number of rows covered, including the starting one. Always at least 1
    /// and never crosses the column boundary.
    pub run_length: u32,
}
