//! DBPF package header
//!
//! Two layouts exist on disk. Major version 1 (The Sims 2) keeps a hole table
//! and stores the index minor version offset by one; every other major
//! version uses the layout introduced with The Sims 3.

use std::fmt;
use std::io::{Read, Seek};

use serde::Serialize;

use super::cursor::DbpfRead;
use crate::error::Result;

// Reserved byte runs in the legacy layout
const LEGACY_RESERVED_AFTER_VERSION: i64 = 20;
const LEGACY_RESERVED_TRAILER: i64 = 32;

// Reserved byte runs in the modern layout
const MODERN_RESERVED_AFTER_VERSION: i64 = 24;
const MODERN_RESERVED_AFTER_COUNT: i64 = 4;
const MODERN_RESERVED_AFTER_SIZE: i64 = 12;
const MODERN_RESERVED_TRAILER: i64 = 28;

/// Game generation inferred from the package version
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum GameGeneration {
    #[default]
    Unknown,
    /// The Sims 2
    Gen2,
    /// The Sims 3
    Gen3,
    /// The Sims 4
    Gen4,
}

impl GameGeneration {
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Gen2 => "The Sims 2",
            Self::Gen3 => "The Sims 3",
            Self::Gen4 => "The Sims 4",
        }
    }
}

/// Decoded package header with normalized index geometry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArchiveHeader {
    pub major_version: u32,
    pub minor_version: u32,
    pub index_major_version: u32,
    /// Legacy packages store this plus one; the stored value is already corrected.
    pub index_minor_version: u32,
    pub index_count: u32,
    pub index_offset: u32,
    pub index_size: u32,
    /// Hole table, legacy layout only
    pub holes_count: u32,
    pub holes_offset: u32,
    pub holes_size: u32,
    /// Instance ids span two words
    pub high_instance: bool,
    pub game: GameGeneration,
}

/// Fields that differ between the two header layouts
enum HeaderLayout {
    Legacy {
        index_major_version: u32,
        index_minor_version: u32,
        index_count: u32,
        index_offset: u32,
        index_size: u32,
        holes_count: u32,
        holes_offset: u32,
        holes_size: u32,
    },
    Modern {
        index_major_version: u32,
        index_count: u32,
        index_offset: u32,
        index_size: u32,
    },
}

impl HeaderLayout {
    fn read_legacy<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        reader.skip(LEGACY_RESERVED_AFTER_VERSION)?;

        let index_major_version = reader.read_dword()?;
        let index_count = reader.read_dword()?;
        let index_offset = reader.read_dword()?;
        let index_size = reader.read_dword()?;

        let holes_count = reader.read_dword()?;
        let holes_offset = reader.read_dword()?;
        let holes_size = reader.read_dword()?;

        let index_minor_version = reader.read_dword()?.wrapping_sub(1);
        reader.skip(LEGACY_RESERVED_TRAILER)?;

        Ok(Self::Legacy {
            index_major_version,
            index_minor_version,
            index_count,
            index_offset,
            index_size,
            holes_count,
            holes_offset,
            holes_size,
        })
    }

    fn read_modern<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        reader.skip(MODERN_RESERVED_AFTER_VERSION)?;
        let index_count = reader.read_dword()?;
        reader.skip(MODERN_RESERVED_AFTER_COUNT)?;
        let index_size = reader.read_dword()?;
        reader.skip(MODERN_RESERVED_AFTER_SIZE)?;
        let index_major_version = reader.read_dword()?;
        let index_offset = reader.read_dword()?;
        reader.skip(MODERN_RESERVED_TRAILER)?;

        Ok(Self::Modern {
            index_major_version,
            index_count,
            index_offset,
            index_size,
        })
    }
}

impl ArchiveHeader {
    /// Decode the header that follows the 4-byte tag
    pub fn decode<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let major_version = reader.read_dword()?;
        let minor_version = reader.read_dword()?;

        let layout = if major_version == 1 {
            HeaderLayout::read_legacy(reader)?
        } else {
            HeaderLayout::read_modern(reader)?
        };

        let mut header = Self::from_layout(major_version, minor_version, &layout);

        if header.is_index_7_1() {
            header.high_instance = true;
        }

        tracing::debug!(
            "DBPF {}.{} (index {}.{}): {} entries at {:#x}, game {:?}",
            header.major_version,
            header.minor_version,
            header.index_major_version,
            header.index_minor_version,
            header.index_count,
            header.index_offset,
            header.game
        );

        Ok(header)
    }

    fn from_layout(major_version: u32, minor_version: u32, layout: &HeaderLayout) -> Self {
        match *layout {
            HeaderLayout::Legacy {
                index_major_version,
                index_minor_version,
                index_count,
                index_offset,
                index_size,
                holes_count,
                holes_offset,
                holes_size,
            } => Self {
                major_version,
                minor_version,
                index_major_version,
                index_minor_version,
                index_count,
                index_offset,
                index_size,
                holes_count,
                holes_offset,
                holes_size,
                high_instance: false,
                game: GameGeneration::Gen2,
            },
            HeaderLayout::Modern {
                index_major_version,
                index_count,
                index_offset,
                index_size,
            } => Self {
                major_version,
                minor_version,
                index_major_version,
                index_minor_version: 0,
                index_count,
                index_offset,
                index_size,
                holes_count: 0,
                holes_offset: 0,
                holes_size: 0,
                high_instance: index_major_version == 3,
                game: match minor_version {
                    0 => GameGeneration::Gen3,
                    1 => GameGeneration::Gen4,
                    _ => GameGeneration::Unknown,
                },
            },
        }
    }

    /// Index version (7, 1): two-word instances and 20-byte directory records
    #[must_use]
    pub fn is_index_7_1(&self) -> bool {
        self.index_major_version == 7 && self.index_minor_version == 1
    }
}

impl fmt::Display for ArchiveHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DBPF header:")?;
        writeln!(f, "\tversion: {}.{}", self.major_version, self.minor_version)?;
        writeln!(
            f,
            "\tindex version: {}.{}",
            self.index_major_version, self.index_minor_version as i32
        )?;
        writeln!(f, "\tindex count: {}", self.index_count)?;
        writeln!(f, "\tindex offset: {}", self.index_offset)?;
        writeln!(f, "\tindex size: {}", self.index_size)?;
        writeln!(f, "\tholes count: {}", self.holes_count)?;
        writeln!(f, "\tholes offset: {}", self.holes_offset)?;
        writeln!(f, "\tholes size: {}", self.holes_size)?;
        writeln!(f, "\thigh instance: {}", self.high_instance)?;
        writeln!(f, "\tgame: {}", self.game.display_name())
    }
}
