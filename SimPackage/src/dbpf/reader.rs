//! DBPF package reader
//!
//! One reader is one decode session: it owns the stream, the present package
//! values and the catalogue built from the index.

use std::io::{BufReader, Read, Seek, SeekFrom};
use std::time::Instant;

use super::{
    ArchiveHeader, Catalogue, DbpfContents, DecodePhase, DecodeProgress, DecodeReport,
    IndexEntry, PresentPackageValues, ProgressCallback, decode_index, patch_directory,
};
use crate::error::Result;

/// DBPF package reader
pub struct DbpfReader<R: Read + Seek> {
    reader: BufReader<R>,
    /// Position of the package inside the stream
    base_offset: u64,
    tag: Option<[u8; 4]>,
    header: Option<ArchiveHeader>,
    present_values: PresentPackageValues,
    catalogue: Catalogue,
    directory: Option<IndexEntry>,
    report: DecodeReport,
}

impl<R: Read + Seek> DbpfReader<R> {
    /// Create a new reader for a package starting at offset 0
    pub fn new(reader: R) -> Self {
        Self::with_base_offset(reader, 0)
    }

    /// Create a new reader for a package embedded at `base_offset`
    pub fn with_base_offset(reader: R, base_offset: u64) -> Self {
        Self {
            reader: BufReader::new(reader),
            base_offset,
            tag: None,
            header: None,
            present_values: PresentPackageValues::default(),
            catalogue: Catalogue::new(),
            directory: None,
            report: DecodeReport::default(),
        }
    }

    /// Read the 4-byte tag at the start of the package
    ///
    /// The tag is returned as-is; checking it against [`super::MAGIC`] is left
    /// to the caller.
    pub fn read_tag(&mut self) -> Result<[u8; 4]> {
        self.reader.seek(SeekFrom::Start(self.base_offset))?;

        let mut tag = [0u8; 4];
        self.reader.read_exact(&mut tag)?;
        self.tag = Some(tag);

        Ok(tag)
    }

    /// Read and decode the package header
    pub fn read_header(&mut self) -> Result<&ArchiveHeader> {
        self.read_tag()?;
        let header = ArchiveHeader::decode(&mut self.reader)?;
        Ok(self.header.insert(header))
    }

    fn ensure_header(&mut self) -> Result<ArchiveHeader> {
        if let Some(header) = &self.header {
            return Ok(header.clone());
        }
        Ok(self.read_header()?.clone())
    }

    /// Decode the index into the catalogue
    pub fn read_index(&mut self, progress: ProgressCallback) -> Result<&Catalogue> {
        let header = self.ensure_header()?;

        let start = Instant::now();
        let outcome = decode_index(&mut self.reader, self.base_offset, &header, progress)?;
        tracing::debug!(
            "Read {} index entries ({} dropped) in {:?}",
            outcome.catalogue.len(),
            outcome.dropped,
            start.elapsed()
        );

        self.present_values = outcome.present_values;
        self.catalogue = outcome.catalogue;
        self.directory = outcome.directory;
        self.report.dropped_entries = outcome.dropped;

        Ok(&self.catalogue)
    }

    /// Apply the directory resource to the catalogue
    ///
    /// Returns the number of directory records without an index entry.
    pub fn patch_directory(&mut self) -> Result<usize> {
        let header = self.ensure_header()?;

        let start = Instant::now();
        let unmatched = patch_directory(
            &mut self.reader,
            self.base_offset,
            &mut self.catalogue,
            self.directory.as_ref(),
            &header,
            &self.present_values,
        )?;
        tracing::debug!("Patched directory resource in {:?}", start.elapsed());

        let count = unmatched.len();
        self.report.unmatched_directory_keys = unmatched;
        Ok(count)
    }

    /// Decode the whole package: header, index and directory
    ///
    /// Any stream error aborts the decode; no partial catalogue is returned.
    pub fn read_all(mut self, progress: Option<ProgressCallback>) -> Result<DbpfContents> {
        let progress = progress.unwrap_or(&|_| {});

        progress(&DecodeProgress::new(DecodePhase::ReadingHeader, 0, 1));
        let tag = self.read_tag()?;
        let header = ArchiveHeader::decode(&mut self.reader)?;
        self.header = Some(header.clone());

        self.read_index(progress)?;

        if self.directory.is_some() {
            progress(&DecodeProgress::new(DecodePhase::PatchingDirectory, 0, 1));
            self.patch_directory()?;
        }

        let total = self.catalogue.len();
        progress(&DecodeProgress::new(DecodePhase::Complete, total, total));

        Ok(DbpfContents {
            tag,
            header,
            catalogue: self.catalogue,
            directory: self.directory,
            report: self.report,
        })
    }

    /// Get the decoded header, if read
    pub fn header(&self) -> Option<&ArchiveHeader> {
        self.header.as_ref()
    }

    /// Get the tag read from the package, if read
    pub fn tag(&self) -> Option<[u8; 4]> {
        self.tag
    }

    /// Present package values read from the index
    pub fn present_values(&self) -> &PresentPackageValues {
        &self.present_values
    }

    /// Catalogue built so far
    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    /// Irregularities recovered from so far
    pub fn report(&self) -> &DecodeReport {
        &self.report
    }

    /// Get the number of entries the header announces
    pub fn index_count(&self) -> Option<u32> {
        self.header.as_ref().map(|h| h.index_count)
    }

    /// Unwrap the underlying stream
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}
