//! Package index decoding

use std::io::{Read, Seek};

use super::cursor::DbpfRead;
use super::{
    ArchiveHeader, Catalogue, DIRECTORY_TYPE_ID, DecodePhase, DecodeProgress,
    EXTENDED_ENTRY_FLAG, IndexEntry, KeyCodec, PresentPackageValues, ProgressCallback,
};
use crate::error::Result;

const PPV_TYPE_BIT: u32 = 1 << 0;
const PPV_GROUP_BIT: u32 = 1 << 1;
const PPV_INSTANCE_BIT: u32 = 1 << 2;

/// Everything the index pass produces
#[derive(Debug, Clone, Default)]
pub struct IndexOutcome {
    pub catalogue: Catalogue,
    /// Last directory resource entry seen
    pub directory: Option<IndexEntry>,
    pub present_values: PresentPackageValues,
    /// Entries skipped for unrecognized compression flags
    pub dropped: usize,
}

/// Read the present-package-value bitmask and the values it announces
///
/// Expects the stream at the start of the index region.
pub fn read_present_values<R: Read + Seek>(reader: &mut R) -> Result<PresentPackageValues> {
    let mask = reader.read_dword()?;
    let mut values = PresentPackageValues::default();

    if mask & PPV_TYPE_BIT != 0 {
        values.type_id = Some(reader.read_hex()?);
    }
    if mask & PPV_GROUP_BIT != 0 {
        values.group_id = Some(reader.read_hex()?);
    }
    if mask & PPV_INSTANCE_BIT != 0 {
        values.instance_id = Some(reader.read_hex()?);
    }

    Ok(values)
}

/// Legacy tolerance: unknown compression flags drop the entry unless the
/// package minor version is 1
fn is_rejected(compression_flags: i16, minor_version: u32) -> bool {
    compression_flags != 0
        && compression_flags != -1
        && minor_version != 1
        && compression_flags != 1
}

fn decode_entry<R: Read + Seek>(
    reader: &mut R,
    codec: &KeyCodec,
    header: &ArchiveHeader,
) -> Result<IndexEntry> {
    let key = codec.decode(reader)?;
    let offset = reader.read_dword()?;
    let mut file_size = reader.read_dword()?;

    let mut true_size = 0;
    let mut compression_flags = 0;
    let mut flags = 0;

    if header.major_version == 2 {
        true_size = reader.read_dword()?;

        if file_size & EXTENDED_ENTRY_FLAG != 0 {
            file_size &= !EXTENDED_ENTRY_FLAG;

            if header.minor_version == 1 {
                flags = reader.read_uword()?;
                compression_flags = reader.read_word()?;
            } else {
                compression_flags = reader.read_word()?;
                flags = reader.read_uword()?;
            }
        }
    }

    Ok(IndexEntry {
        key,
        offset,
        file_size,
        true_size,
        compression_flags,
        flags,
        compressed: IndexEntry::is_compressed(compression_flags, flags),
    })
}

/// Decode the package index
///
/// Seeks to `base_offset + header.index_offset`, reads the present package
/// values (major version 2 only) and then `header.index_count` entries.
/// Entries sharing a key overwrite each other, the last one wins.
pub fn decode_index<R: Read + Seek>(
    reader: &mut R,
    base_offset: u64,
    header: &ArchiveHeader,
    progress: ProgressCallback,
) -> Result<IndexOutcome> {
    reader.seek_package(base_offset, header.index_offset)?;

    let present_values = if header.major_version == 2 {
        read_present_values(reader)?
    } else {
        PresentPackageValues::default()
    };

    let codec = KeyCodec::new(present_values, header.high_instance);
    let total = header.index_count as usize;

    let mut outcome = IndexOutcome {
        present_values,
        ..IndexOutcome::default()
    };

    for i in 0..total {
        let entry = decode_entry(reader, &codec, header)?;

        progress(&DecodeProgress::new(DecodePhase::ReadingIndex, i + 1, total));

        if is_rejected(entry.compression_flags, header.minor_version) {
            tracing::trace!(
                "Dropping index entry {} with compression flags {}",
                entry.key,
                entry.compression_flags
            );
            outcome.dropped += 1;
            continue;
        }

        if entry.key.type_id == DIRECTORY_TYPE_ID {
            outcome.directory = Some(entry.clone());
        }

        outcome.catalogue.insert(entry.key.to_string(), entry);
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::{LittleEndian, WriteBytesExt};
    use std::io::Cursor;

    fn modern_header(minor_version: u32, index_count: u32) -> ArchiveHeader {
        ArchiveHeader {
            major_version: 2,
            minor_version,
            index_count,
            ..ArchiveHeader::default()
        }
    }

    fn write_extended_entry(bytes: &mut Vec<u8>, instance: u32, first: u16, second: u16) {
        for value in [0x0333_406C, 0, instance, 0x100, 0x8000_0040, 0x80] {
            bytes.write_u32::<LittleEndian>(value).unwrap();
        }
        bytes.write_u16::<LittleEndian>(first).unwrap();
        bytes.write_u16::<LittleEndian>(second).unwrap();
    }

    #[test]
    fn test_rejection_rule() {
        assert!(is_rejected(2, 0));
        assert!(is_rejected(-2, 0));
        assert!(!is_rejected(2, 1));
        assert!(!is_rejected(1, 0));
        assert!(!is_rejected(-1, 0));
        assert!(!is_rejected(0, 0));
    }

    #[test]
    fn test_present_values_bitmask() {
        let mut bytes = Vec::new();
        for value in [0b1101, 0xAAAA_AAAA, 0xCCCC_CCCC] {
            bytes.write_u32::<LittleEndian>(value).unwrap();
        }
        let values = read_present_values(&mut Cursor::new(bytes)).unwrap();

        assert_eq!(values.type_id.unwrap().to_string(), "AAAAAAAA");
        assert_eq!(values.group_id, None);
        assert_eq!(values.instance_id.unwrap().to_string(), "CCCCCCCC");
    }

    #[test]
    fn test_minor_1_reads_flags_first() {
        let mut bytes = 0u32.to_le_bytes().to_vec();
        write_extended_entry(&mut bytes, 1, 23106, 0xFFFF);

        let header = modern_header(1, 1);
        let outcome = decode_index(&mut Cursor::new(bytes), 0, &header, &|_| {}).unwrap();
        let entry = &outcome.catalogue["0333406C:00000000:00000001"];

        assert_eq!(entry.flags, 23106);
        assert_eq!(entry.compression_flags, -1);
        assert_eq!(entry.file_size, 0x40);
        assert_eq!(entry.true_size, 0x80);
        assert!(entry.compressed);
    }

    #[test]
    fn test_minor_0_reads_compression_first() {
        let mut bytes = 0u32.to_le_bytes().to_vec();
        write_extended_entry(&mut bytes, 1, 0xFFFF, 23106);

        let header = modern_header(0, 1);
        let outcome = decode_index(&mut Cursor::new(bytes), 0, &header, &|_| {}).unwrap();
        let entry = &outcome.catalogue["0333406C:00000000:00000001"];

        assert_eq!(entry.compression_flags, -1);
        assert_eq!(entry.flags, 23106);
        assert!(entry.compressed);
    }

    #[test]
    fn test_entry_without_flag_bit_has_no_flags() {
        let mut bytes = 0u32.to_le_bytes().to_vec();
        for value in [1, 2, 3, 0x60, 0x40, 0x40] {
            bytes.write_u32::<LittleEndian>(value).unwrap();
        }

        let outcome = decode_index(&mut Cursor::new(bytes), 0, &modern_header(1, 1), &|_| {}).unwrap();
        let entry = &outcome.catalogue["00000001:00000002:00000003"];

        assert_eq!(entry.compression_flags, 0);
        assert_eq!(entry.flags, 0);
        assert!(!entry.compressed);
    }

    #[test]
    fn test_index_offset_past_base_overflow_is_io_error() {
        let header = ArchiveHeader {
            index_offset: 0x100,
            ..modern_header(1, 1)
        };
        let result = decode_index(&mut Cursor::new(vec![0u8; 64]), u64::MAX - 4, &header, &|_| {});

        assert!(matches!(result, Err(crate::Error::Io(e)) if e.kind() == std::io::ErrorKind::InvalidInput));
    }

    #[test]
    fn test_progress_reports_every_entry() {
        use std::cell::RefCell;

        let mut bytes = 0u32.to_le_bytes().to_vec();
        write_extended_entry(&mut bytes, 1, 0, 0);
        write_extended_entry(&mut bytes, 2, 0, 0);

        let seen = RefCell::new(Vec::new());
        decode_index(&mut Cursor::new(bytes), 0, &modern_header(1, 2), &|p| {
            seen.borrow_mut().push((p.current, p.total));
        })
        .unwrap();

        assert_eq!(seen.into_inner(), vec![(1, 2), (2, 2)]);
    }
}
