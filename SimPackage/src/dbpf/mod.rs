//! DBPF package index reader
//!
//! Decodes the header, the resource index and the directory resource of a
//! DBPF ("Database Packed File") package as used by The Sims 2, 3 and 4.
//! Resource payloads are located but never decompressed.

mod cursor;
mod directory;
mod header;
mod index;
mod key;
mod reader;
mod types;

pub use directory::{directory_record_size, patch_directory};
pub use header::{ArchiveHeader, GameGeneration};
pub use index::{IndexOutcome, decode_index, read_present_values};
pub use key::{Hex32, InstanceId, KeyCodec, PresentPackageValues, TgiKey};
pub use reader::DbpfReader;
pub use types::*;

/// DBPF magic bytes
pub const MAGIC: [u8; 4] = *b"DBPF";

/// Type id of the directory resource listing decompressed sizes
pub const DIRECTORY_TYPE_ID: Hex32 = Hex32(0xE86B_1EEF);

/// Presence-flags value marking a compressed resource (`0x5A42`)
pub const COMPRESSION_MARKER: u16 = 23106;

/// Top bit of an index entry's file size, set when extra flags follow
pub const EXTENDED_ENTRY_FLAG: u32 = 0x8000_0000;

/// Size of a directory record (TGI + decompressed size)
pub const DIRECTORY_RECORD_SIZE: u32 = 16;

/// Size of a directory record whose instance spans two words
pub const DIRECTORY_RECORD_SIZE_HIGH_INSTANCE: u32 = 20;
