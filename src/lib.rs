//! # wld-reader
//!
//! A reader for Terraria world files (`.wld`).
//! Parses the versioned header and section table, then scans the
//! RLE-compressed tile stream for a target tile id in a single forward
//! pass, without ever materializing the grid.
pub mod world;

// Re-export the main types for convenience
pub use world::{
    ScanResult, TileCensus, TileRun, WorldError, WorldFile, WorldHeader, WorldVersion,
};
