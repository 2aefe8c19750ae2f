//! # `SimPackage`
//!
//! A pure-Rust reader for DBPF package indexes, the archive format of
//! The Sims 2, 3 and 4.
//!
//! ## What it decodes
//!
//! - **Header** - both the legacy (Sims 2) and the modern (Sims 3/4) layout
//! - **TGI keys** - including present package values and high instances
//! - **Index** - offsets, sizes and compression flags of every resource
//! - **Directory resource** - decompressed sizes patched back onto the index
//!
//! Resource payloads are located but not decompressed.
//!
//! ## Quick Start
//!
//! ```no_run
//! use simpackage::package::PackageOperations;
//!
//! let contents = PackageOperations::read("Objects.package")?;
//! println!("{} ({} resources)", contents.header.game.display_name(), contents.len());
//!
//! for (key, entry) in &contents.catalogue {
//!     println!("{key} @ {} ({} bytes)", entry.offset, entry.display_size());
//! }
//! # Ok::<(), simpackage::Error>(())
//! ```
//!
//! Any `Read + Seek` source works with the lower-level reader, including
//! packages embedded at an offset inside a larger stream:
//!
//! ```no_run
//! use std::io::Cursor;
//! use simpackage::dbpf::DbpfReader;
//!
//! let bytes: Vec<u8> = std::fs::read("Bundle.bin")?;
//! let contents = DbpfReader::with_base_offset(Cursor::new(bytes), 0x200).read_all(None)?;
//! assert!(contents.has_dbpf_tag());
//! # Ok::<(), simpackage::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `simpackage` command-line binary

pub mod dbpf;
pub mod error;
pub mod package;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};

    pub use crate::dbpf::{
        ArchiveHeader, Catalogue, DbpfContents, DbpfReader, DecodePhase, DecodeProgress,
        DecodeReport, GameGeneration, Hex32, IndexEntry, InstanceId, PresentPackageValues,
        TgiKey,
    };

    pub use crate::package::{PackageOperations, find_package_files};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
