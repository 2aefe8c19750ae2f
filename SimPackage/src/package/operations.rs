//! Core package file operations

use std::fs::File;
use std::path::Path;

use super::ProgressCallback;
use crate::dbpf::{DbpfContents, DbpfReader, IndexEntry, MAGIC, TgiKey};
use crate::error::{Error, Result};

/// High-level package file operations.
pub struct PackageOperations;

impl PackageOperations {
    /// Read the index of a package file
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened or is truncated.
    /// Returns [`Error::InvalidPackageMagic`] if the file does not start with `DBPF`.
    ///
    /// [`Error::Io`]: crate::Error::Io
    /// [`Error::InvalidPackageMagic`]: crate::Error::InvalidPackageMagic
    pub fn read<P: AsRef<Path>>(package_path: P) -> Result<DbpfContents> {
        Self::read_with_progress(package_path, &|_| {})
    }

    /// Read the index of a package file with progress callback
    ///
    /// The callback receives [`DecodeProgress`](crate::dbpf::DecodeProgress)
    /// once per index entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened or is truncated.
    /// Returns [`Error::InvalidPackageMagic`] if the file does not start with `DBPF`.
    ///
    /// [`Error::Io`]: crate::Error::Io
    /// [`Error::InvalidPackageMagic`]: crate::Error::InvalidPackageMagic
    pub fn read_with_progress<P: AsRef<Path>>(
        package_path: P,
        progress: ProgressCallback,
    ) -> Result<DbpfContents> {
        let package_path = package_path.as_ref();
        let file = File::open(package_path)?;

        tracing::info!("Reading package index: {}", package_path.display());

        let mut reader = DbpfReader::new(file);
        let tag = reader.read_tag()?;
        if tag != MAGIC {
            return Err(Error::InvalidPackageMagic(tag));
        }

        let contents = reader.read_all(Some(progress))?;

        if !contents.report.unmatched_directory_keys.is_empty() {
            tracing::warn!(
                "{}: {} directory records without index entries",
                package_path.display(),
                contents.report.unmatched_directory_keys.len()
            );
        }

        Ok(contents)
    }

    /// List the TGI keys of a package
    ///
    /// # Errors
    ///
    /// Returns an error if the package cannot be read.
    pub fn list<P: AsRef<Path>>(package_path: P) -> Result<Vec<String>> {
        let contents = Self::read(package_path)?;
        Ok(contents.catalogue.into_keys().collect())
    }

    /// List the index entries of a package
    ///
    /// # Errors
    ///
    /// Returns an error if the package cannot be read.
    pub fn list_detailed<P: AsRef<Path>>(package_path: P) -> Result<Vec<IndexEntry>> {
        let contents = Self::read(package_path)?;
        Ok(contents.catalogue.into_values().collect())
    }

    /// Look up a single resource by key
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceNotFound`] if the key is not in the index.
    ///
    /// [`Error::ResourceNotFound`]: crate::Error::ResourceNotFound
    pub fn entry<P: AsRef<Path>>(package_path: P, key: &TgiKey) -> Result<IndexEntry> {
        let contents = Self::read(package_path)?;
        contents
            .get(key)
            .cloned()
            .ok_or_else(|| Error::ResourceNotFound(key.to_string()))
    }

    /// Serialize the package index as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the package cannot be read.
    pub fn to_json<P: AsRef<Path>>(package_path: P) -> Result<String> {
        let contents = Self::read(package_path)?;
        Ok(serde_json::to_string_pretty(&contents)?)
    }
}
