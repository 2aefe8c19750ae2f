//! Directory resource patching
//!
//! The directory resource (type `E86B1EEF`) lists the decompressed size of
//! every compressed resource. Its records are applied back onto the index.

use std::io::{Read, Seek};

use super::cursor::DbpfRead;
use super::{
    ArchiveHeader, Catalogue, DIRECTORY_RECORD_SIZE, DIRECTORY_RECORD_SIZE_HIGH_INSTANCE,
    IndexEntry, KeyCodec, PresentPackageValues,
};
use crate::error::Result;

/// Size of one directory record for this index version
#[must_use]
pub fn directory_record_size(header: &ArchiveHeader) -> u32 {
    if header.is_index_7_1() {
        DIRECTORY_RECORD_SIZE_HIGH_INSTANCE
    } else {
        DIRECTORY_RECORD_SIZE
    }
}

/// Mark every resource listed in the directory as compressed and record its
/// decompressed size.
///
/// Records whose key is not in the catalogue are skipped; their keys are
/// returned so the caller can report them.
pub fn patch_directory<R: Read + Seek>(
    reader: &mut R,
    base_offset: u64,
    catalogue: &mut Catalogue,
    directory: Option<&IndexEntry>,
    header: &ArchiveHeader,
    present_values: &PresentPackageValues,
) -> Result<Vec<String>> {
    let Some(directory) = directory else {
        return Ok(Vec::new());
    };

    reader.seek_package(base_offset, directory.offset)?;

    let record_count = directory.file_size / directory_record_size(header);
    let codec = KeyCodec::new(*present_values, header.high_instance);
    let mut unmatched = Vec::new();

    for _ in 0..record_count {
        let key = codec.decode(reader)?.to_string();
        let decompressed_size = reader.read_dword()?;

        if let Some(entry) = catalogue.get_mut(&key) {
            entry.compressed = true;
            entry.true_size = decompressed_size;
        } else {
            tracing::warn!("Directory record {key} has no index entry, skipping");
            unmatched.push(key);
        }
    }

    Ok(unmatched)
}
