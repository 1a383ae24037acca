//! Lazy decoding of the RLE-compressed tile stream.

use std::io::{Read, Seek};

use super::cursor::ByteCursor;
use super::error::Result;
use super::models::{TileRun, WorldHeader};

/// Iterator over tile runs in column-major order.
///
/// Each on-disk cell record starts with a flag byte whose bits announce
/// which optional fields follow, so a record's width is only known once it
/// has been read. The stream therefore decodes strictly forward: all rows
/// of column 0, then column 1, and so on until `width` columns are done.
/// Restarting requires re-seeking the cursor and constructing a new stream.
///
/// Any failed read ends the stream with that error; there is no
/// resynchronization after a malformed record.
pub struct TileStream<'a, R> {
    cursor: &'a mut ByteCursor<R>,
    header: &'a WorldHeader,
    column: u32,
    row: u32,
    failed: bool,
}

impl<'a, R: Read + Seek> TileStream<'a, R> {
    /// Expects the cursor to rest on the first byte of the tile section,
    /// where [`header::parse`](super::header::parse) leaves it.
    pub fn new(cursor: &'a mut ByteCursor<R>, header: &'a WorldHeader) -> Self {
        Self {
            cursor,
            header,
            column: 0,
            row: 0,
            failed: false,
        }
    }

    fn decode_cell(&mut self) -> Result<TileRun> {
        let cursor = &mut *self.cursor;
        let active_flags = cursor.read_u8()?;

        // Flag bytes cascade: bit 0 of each announces the next. A byte
        // that is not announced stays zero for every later test.
        let mut tile_flags = 0u8;
        let mut tile_flags2 = 0u8;
        if active_flags & 0x01 != 0 {
            tile_flags = cursor.read_u8()?;
            if tile_flags & 0x01 != 0 {
                tile_flags2 = cursor.read_u8()?;
                if tile_flags2 & 0x01 != 0 {
                    // tile_flags3: wiring and actuator bits, nothing this
                    // decoder keeps.
                    cursor.read_u8()?;
                }
            }
        }

        let mut tile_id = None;
        if active_flags & 0x02 != 0 {
            let mut id = u16::from(cursor.read_u8()?);
            if tile_flags & 0x20 != 0 {
                id |= u16::from(cursor.read_u8()?) << 8;
            }
            if self.header.frame_important.contains(&id) {
                // Frame coordinates; consumed only to keep the cursor
                // aligned.
                cursor.read_i16()?;
                cursor.read_i16()?;
            }
            tile_id = Some(id);
        }

        if active_flags & 0x04 != 0 {
            cursor.read_u8()?; // wall type
            if tile_flags & 0x40 != 0 {
                cursor.read_u8()?; // wall type high byte
            }
        }

        let liquid = (active_flags >> 3) & 0x03;
        if liquid != 0 {
            cursor.read_u8()?; // liquid amount
        }

        if tile_flags2 & 0x08 != 0 {
            cursor.read_u8()?; // tile color
        }
        if tile_flags2 & 0x10 != 0 {
            cursor.read_u8()?; // wall color
        }

        let rle = match (active_flags >> 6) & 0x03 {
            1 => u32::from(cursor.read_u8()?),
            2 => u32::from(cursor.read_u16()?),
            // 0 = single cell; 3 is reserved and treated the same.
            _ => 0,
        };

        // A run never spills into the next column: whatever the record
        // claims, it is truncated at the column boundary.
        let run_length = (rle + 1).min(self.header.height - self.row);

        Ok(TileRun {
            column: self.column,
            row: self.row,
            tile_id,
            run_length,
        })
    }
}

impl<'a, R: Read + Seek> Iterator for TileStream<'a, R> {
    type Item = Result<TileRun>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.column >= self.header.width {
            return None;
        }
        match self.decode_cell() {
            Ok(run) => {
                self.row += run.run_length;
                if self.row >= self.header.height {
                    self.row = 0;
                    self.column += 1;
                }
                Some(Ok(run))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
