//! Core world reader module

pub mod error;
pub mod models;
mod cursor;
mod header;
mod scan;
mod tiles;

use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use log::info;

pub use cursor::ByteCursor;
pub use error::{Result, WorldError};
pub use models::{TileRun, WorldBounds, WorldHeader, WorldVersion, MIN_SUPPORTED_VERSION};
pub use scan::{ScanResult, TileCensus};
pub use tiles::TileStream;

/// The main reader for world files.
///
/// Opening a file parses the complete header (version gates, section
/// pointers, frame-important table, dimensions) up front. Queries then
/// walk the tile stream on demand; each query decodes independently, so
/// running the same query twice yields identical results.
pub struct WorldFile {
    file_path: PathBuf,
    header: WorldHeader,
}

impl WorldFile {
    /// Open a world file and parse its header.
    ///
    /// # Errors
    /// Returns an error if:
    /// - the path does not resolve to a file
    /// - the format version is below 88
    /// - the section table or dimensions are malformed
    /// - the file ends inside the header
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening world file: {}", path.display());
        let mut cursor = Self::cursor_for(path)?;
        let header = header::parse(&mut cursor)?;
        Ok(Self {
            file_path: path.to_path_buf(),
            header,
        })
    }

    /// The parsed header, available as soon as the file is open.
    pub fn header(&self) -> &WorldHeader {
        &self.header
    }

    fn cursor_for(path: &Path) -> Result<ByteCursor<BufReader<File>>> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => WorldError::FileNotFound {
                path: path.to_path_buf(),
                source: e,
            },
            _ => WorldError::Io(e),
        })?;
        ByteCursor::from_file(file)
    }

    /// Scan the tile stream for every cell holding `target_id`.
    ///
    /// Walks the whole stream exactly once. The match count and the
    /// highest (smallest-row) coordinate are read off the returned
    /// [`ScanResult`].
    pub fn find_tiles(&self, target_id: u16) -> Result<ScanResult> {
        let mut cursor = Self::cursor_for(&self.file_path)?;
        cursor.seek(self.header.tiles_offset())?;
        let result = scan::scan(TileStream::new(&mut cursor, &self.header), target_id)?;
        info!(
            "Found {} cells with tile id {}",
            result.match_count(),
            target_id
        );
        Ok(result)
    }

    /// Tally every tile id present in the grid.
    ///
    /// Walks the same stream as [`find_tiles`](Self::find_tiles) but keeps
    /// per-id counts instead of coordinates.
    pub fn tile_census(&self) -> Result<TileCensus> {
        let mut cursor = Self::cursor_for(&self.file_path)?;
        cursor.seek(self.header.tiles_offset())?;
        scan::census(TileStream::new(&mut cursor, &self.header))
    }
}
