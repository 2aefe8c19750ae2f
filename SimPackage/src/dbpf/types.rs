//! Types for DBPF package handling

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use super::{ArchiveHeader, COMPRESSION_MARKER, Hex32, MAGIC, TgiKey};

/// Catalogue of index entries keyed by the text form of their TGI key
///
/// A key seen twice keeps its first position but holds the later entry.
pub type Catalogue = IndexMap<String, IndexEntry>;

/// Progress callback type
pub type ProgressCallback<'a> = &'a dyn Fn(&DecodeProgress);

/// Entry in the package index describing one resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    /// Identity of the resource
    pub key: TgiKey,
    /// Offset of the resource data from the start of the package
    pub offset: u32,
    /// Size of the resource data on disk, flag bit cleared
    pub file_size: u32,
    /// Decompressed size (zero until known)
    pub true_size: u32,
    /// Raw compression flags (modern packages with extended entries only)
    pub compression_flags: i16,
    /// Raw presence flags (modern packages with extended entries only)
    pub flags: u16,
    /// Whether the resource data is compressed
    pub compressed: bool,
}

impl IndexEntry {
    /// Compression rule shared by every index version
    #[must_use]
    pub fn is_compressed(compression_flags: i16, flags: u16) -> bool {
        compression_flags == -1 || compression_flags == 1 || flags == COMPRESSION_MARKER
    }

    /// Decompressed size if known, otherwise the on-disk size
    #[must_use]
    pub fn display_size(&self) -> u32 {
        if self.true_size > 0 {
            self.true_size
        } else {
            self.file_size
        }
    }
}

/// Irregularities recovered from while decoding
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecodeReport {
    /// Index entries skipped because of unrecognized compression flags
    pub dropped_entries: usize,
    /// Directory records whose key is not in the index
    pub unmatched_directory_keys: Vec<String>,
}

impl DecodeReport {
    /// Returns true if nothing was dropped or left unmatched
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.dropped_entries == 0 && self.unmatched_directory_keys.is_empty()
    }
}

/// Result of decoding a whole package index
#[derive(Debug, Clone, Serialize)]
pub struct DbpfContents {
    /// Leading 4 bytes of the package, unvalidated
    #[serde(serialize_with = "serialize_tag")]
    pub tag: [u8; 4],
    pub header: ArchiveHeader,
    pub catalogue: Catalogue,
    /// The directory resource entry, if the index has one
    pub directory: Option<IndexEntry>,
    pub report: DecodeReport,
}

impl DbpfContents {
    /// Returns true if the package starts with the `DBPF` tag
    #[must_use]
    pub fn has_dbpf_tag(&self) -> bool {
        self.tag == MAGIC
    }

    #[must_use]
    pub fn get(&self, key: &TgiKey) -> Option<&IndexEntry> {
        self.catalogue.get(&key.to_string())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.catalogue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.catalogue.is_empty()
    }

    /// Entries whose type id matches
    pub fn entries_of_type(&self, type_id: Hex32) -> impl Iterator<Item = &IndexEntry> {
        self.catalogue
            .values()
            .filter(move |entry| entry.key.type_id == type_id)
    }

    /// Number of compressed entries
    #[must_use]
    pub fn compressed_count(&self) -> usize {
        self.catalogue.values().filter(|e| e.compressed).count()
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_tag<S: Serializer>(tag: &[u8; 4], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(tag))
}

/// Progress information during package decoding
#[derive(Debug, Clone)]
pub struct DecodeProgress {
    /// Current decoding phase
    pub phase: DecodePhase,
    /// Current item number (1-indexed)
    pub current: usize,
    /// Total number of items
    pub total: usize,
}

impl DecodeProgress {
    #[must_use]
    pub fn new(phase: DecodePhase, current: usize, total: usize) -> Self {
        Self {
            phase,
            current,
            total,
        }
    }

    /// Get the progress percentage (0.0 - 1.0)
    #[must_use]
    pub fn percentage(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.current as f32 / self.total as f32
        }
    }
}

/// Phase of package decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodePhase {
    /// Reading package header
    ReadingHeader,
    /// Reading index entries
    ReadingIndex,
    /// Applying directory resource sizes
    PatchingDirectory,
    /// Decoding complete
    Complete,
}

impl DecodePhase {
    /// Get a human-readable description of this phase
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReadingHeader => "Reading header",
            Self::ReadingIndex => "Reading index",
            Self::PatchingDirectory => "Patching directory",
            Self::Complete => "Complete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_rule() {
        assert!(IndexEntry::is_compressed(-1, 0));
        assert!(IndexEntry::is_compressed(1, 0));
        assert!(IndexEntry::is_compressed(0, COMPRESSION_MARKER));
        assert!(!IndexEntry::is_compressed(0, 0));
        assert!(!IndexEntry::is_compressed(2, 1));
    }

    #[test]
    fn test_progress_percentage() {
        assert!((DecodeProgress::new(DecodePhase::ReadingIndex, 1, 4).percentage() - 0.25).abs() < f32::EPSILON);
        assert!((DecodeProgress::new(DecodePhase::Complete, 0, 0).percentage() - 1.0).abs() < f32::EPSILON);
    }
}
