//! World header and section-pointer parsing.

use std::collections::HashSet;
use std::io::{Read, Seek};

use log::{debug, info};

use super::cursor::ByteCursor;
use super::error::{Result, WorldError};
use super::models::{WorldBounds, WorldHeader, WorldVersion};

/// Parse the world file header.
///
/// File preamble structure:
/// - 4 bytes: format version (signed)
/// - version >= 135 only: 7-byte magic tag, 1-byte file type,
///   4-byte revision, 8-byte favorites bitmask (fixed widths)
/// - 2 bytes: section count (signed)
/// - section count x 4 bytes: absolute section offsets
/// - 2 bytes: frame-important entry count (signed)
/// - entry count x 2 bytes: frame-important tile ids
///
/// The dimension fields live inside the header section, so parsing makes
/// one forward pass over the preamble, seeks to the header section for the
/// identity and dimension fields, then seeks back to the tile section.
/// On success the cursor rests on the first byte of the tile stream.
pub fn parse<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> Result<WorldHeader> {
    let raw_version = cursor.read_i32()?;
    let version = WorldVersion::try_from(raw_version)?;
    info!("World format version {}", version);

    if version.has_magic_preamble() {
        let mut magic = [0u8; 7];
        cursor.read_exact_bytes(&mut magic)?;
        let file_type = cursor.read_u8()?;
        let revision = cursor.read_i32()?;
        let favorites = cursor.read_u64()?;
        debug!(
            "Preamble: tag={:?}, file type {}, revision {}, favorites {:#x}",
            String::from_utf8_lossy(&magic),
            file_type,
            revision,
            favorites
        );
    }

    let section_count = cursor.read_i16()?;
    if section_count < 2 {
        return Err(WorldError::MalformedHeader(format!(
            "{} section pointers declared, need at least a header and a tile section",
            section_count
        )));
    }
    let mut section_offsets = Vec::with_capacity(section_count as usize);
    for _ in 0..section_count {
        let offset = cursor.read_i32()?;
        if offset < 0 || offset as u64 > cursor.len() {
            return Err(WorldError::MalformedHeader(format!(
                "section offset {:#x} outside file bounds ({} bytes)",
                offset,
                cursor.len()
            )));
        }
        section_offsets.push(offset as u32);
    }
    debug!(
        "{} sections, header at {:#x}, tiles at {:#x}",
        section_count, section_offsets[0], section_offsets[1]
    );

    // Read as an explicit id list, one i16 per declared entry. Other tools
    // in this format family pack the table as a bitmask over all tile
    // types; a file written that way desynchronizes the cursor from here
    // on. Validate against a known-good world before trusting results.
    let frame_important_count = cursor.read_i16()?;
    let mut frame_important = HashSet::with_capacity(frame_important_count.max(0) as usize);
    for _ in 0..frame_important_count {
        frame_important.insert(cursor.read_i16()? as u16);
    }
    debug!("{} frame-important tile types", frame_important.len());

    // Identity and dimensions live in the header section.
    cursor.seek(u64::from(section_offsets[0]))?;
    let name = cursor.read_string()?;
    let seed = cursor.read_string()?;
    let generator_version = cursor.read_i64()?;
    if version.has_guid() {
        cursor.skip(16)?;
    }
    let world_id = cursor.read_i32()?;
    let bounds = WorldBounds {
        left: cursor.read_i32()?,
        right: cursor.read_i32()?,
        top: cursor.read_i32()?,
        bottom: cursor.read_i32()?,
    };
    // Stored height-first.
    let height = cursor.read_i32()?;
    let width = cursor.read_i32()?;
    if width <= 0 || height <= 0 {
        return Err(WorldError::MalformedHeader(format!(
            "non-positive grid dimensions {}x{}",
            width, height
        )));
    }

    info!("World \"{}\": {} x {} tiles", name, width, height);

    // Leave the cursor on the first tile record.
    cursor.seek(u64::from(section_offsets[1]))?;

    Ok(WorldHeader {
        version,
        name,
        seed,
        generator_version,
        world_id,
        bounds,
        section_offsets,
        frame_important,
        width: width as u32,
        height: height as u32,
    })
}
