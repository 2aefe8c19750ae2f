//! Package file operations module

mod discovery;
mod operations;

// Primary public API
pub use operations::PackageOperations;

pub use discovery::find_package_files;

pub use crate::dbpf::{DecodePhase, DecodeProgress, ProgressCallback};
