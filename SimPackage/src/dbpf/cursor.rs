//! Little-endian primitives shared by the DBPF codecs

use std::io::{self, Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

use super::key::Hex32;

/// Reads used by every DBPF structure.
///
/// All skips are relative to the current position.
pub(crate) trait DbpfRead: Read + Seek {
    fn read_dword(&mut self) -> io::Result<u32> {
        self.read_u32::<LittleEndian>()
    }

    fn read_word(&mut self) -> io::Result<i16> {
        self.read_i16::<LittleEndian>()
    }

    fn read_uword(&mut self) -> io::Result<u16> {
        self.read_u16::<LittleEndian>()
    }

    fn read_hex(&mut self) -> io::Result<Hex32> {
        self.read_dword().map(Hex32)
    }

    fn skip(&mut self, amount: i64) -> io::Result<()> {
        self.seek(SeekFrom::Current(amount))?;
        Ok(())
    }

    /// Seek to `offset` bytes past the package start at `base_offset`
    fn seek_package(&mut self, base_offset: u64, offset: u32) -> io::Result<()> {
        let position = base_offset.checked_add(u64::from(offset)).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("offset {offset:#x} past base {base_offset:#x} overflows"),
            )
        })?;
        self.seek(SeekFrom::Start(position))?;
        Ok(())
    }
}

impl<T: Read + Seek> DbpfRead for T {}
