//! Sequential little-endian reads over a world file.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};
use encoding_rs::UTF_8;

use super::error::{Result, WorldError};

/// Forward-reading cursor with explicit position tracking.
///
/// Every read checks the remaining length first, so running off the end of
/// the file surfaces as [`WorldError::UnexpectedEndOfStream`] with the
/// offset and requested width instead of a bare I/O error. Reads are
/// buffered and sequential; the file is never loaded whole.
pub struct ByteCursor<R> {
    inner: R,
    pos: u64,
    len: u64,
}

impl ByteCursor<BufReader<File>> {
    /// Wrap an open file, buffering reads.
    pub fn from_file(file: File) -> Result<Self> {
        let len = file.metadata()?.len();
        Ok(Self {
            inner: BufReader::new(file),
            pos: 0,
            len,
        })
    }
}

impl<R: Read + Seek> ByteCursor<R> {
    /// Wrap any seekable source. The total length is established once via
    /// a seek to the end.
    pub fn new(mut inner: R) -> Result<Self> {
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(0))?;
        Ok(Self { inner, pos: 0, len })
    }

    /// Current absolute offset.
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Total length of the underlying source in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn remaining(&self) -> u64 {
        self.len.saturating_sub(self.pos)
    }

    fn check(&self, wanted: usize) -> Result<()> {
        if self.remaining() < wanted as u64 {
            return Err(WorldError::UnexpectedEndOfStream {
                offset: self.pos,
                wanted,
            });
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.check(1)?;
        let v = self.inner.read_u8()?;
        self.pos += 1;
        Ok(v)
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.check(2)?;
        let v = self.inner.read_u16::<LittleEndian>()?;
        self.pos += 2;
        Ok(v)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        self.check(2)?;
        let v = self.inner.read_i16::<LittleEndian>()?;
        self.pos += 2;
        Ok(v)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.check(4)?;
        let v = self.inner.read_i32::<LittleEndian>()?;
        self.pos += 4;
        Ok(v)
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        self.check(8)?;
        let v = self.inner.read_i64::<LittleEndian>()?;
        self.pos += 8;
        Ok(v)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.check(8)?;
        let v = self.inner.read_u64::<LittleEndian>()?;
        self.pos += 8;
        Ok(v)
    }

    /// Fill `buf` exactly from the current position.
    pub fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        self.check(buf.len())?;
        self.inner.read_exact(buf)?;
        self.pos += buf.len() as u64;
        Ok(())
    }

    /// Read a length-prefixed string: one length byte, then that many
    /// bytes of UTF-8. A zero length yields an empty string. Invalid
    /// sequences are replaced rather than rejected.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_u8()? as usize;
        if len == 0 {
            return Ok(String::new());
        }
        let mut buf = vec![0u8; len];
        self.read_exact_bytes(&mut buf)?;
        let (text, _, _) = UTF_8.decode(&buf);
        Ok(text.into_owned())
    }

    /// Advance `n` bytes without decoding them.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.check(n)?;
        self.inner.seek(SeekFrom::Current(n as i64))?;
        self.pos += n as u64;
        Ok(())
    }

    /// Jump to an absolute offset, forward or backward.
    pub fn seek(&mut self, offset: u64) -> Result<()> {
        self.pos = self.inner.seek(SeekFrom::Start(offset))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_primitives_and_tracks_position() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
        let mut cursor = ByteCursor::new(Cursor::new(data.to_vec())).unwrap();

        assert_eq!(cursor.read_u8().unwrap(), 0x01);
        assert_eq!(cursor.read_u16().unwrap(), 0x0302);
        assert_eq!(cursor.read_i32().unwrap(), 0x07060504);
        assert_eq!(cursor.position(), 7);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn eof_error_carries_offset_and_width() {
        let mut cursor = ByteCursor::new(Cursor::new(vec![0xAA, 0xBB])).unwrap();
        cursor.read_u8().unwrap();

        match cursor.read_i32() {
            Err(WorldError::UnexpectedEndOfStream { offset, wanted }) => {
                assert_eq!(offset, 1);
                assert_eq!(wanted, 4);
            }
            other => panic!("expected UnexpectedEndOfStream, got {:?}", other),
        }
        // A failed check consumes nothing.
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn strings_are_length_prefixed_and_permissive() {
        let mut data = vec![5];
        data.extend_from_slice(b"he\xFFlo");
        data.push(0);
        let mut cursor = ByteCursor::new(Cursor::new(data)).unwrap();

        assert_eq!(cursor.read_string().unwrap(), "he\u{FFFD}lo");
        assert_eq!(cursor.read_string().unwrap(), "");
    }

    #[test]
    fn seek_and_skip_move_the_position() {
        let mut cursor = ByteCursor::new(Cursor::new((0u8..10).collect::<Vec<_>>())).unwrap();
        cursor.skip(3).unwrap();
        assert_eq!(cursor.read_u8().unwrap(), 3);
        cursor.seek(1).unwrap();
        assert_eq!(cursor.read_u8().unwrap(), 1);
        assert!(cursor.skip(20).is_err());
    }
}
