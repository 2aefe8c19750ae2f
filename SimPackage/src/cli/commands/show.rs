//! CLI command for showing a single resource

use std::path::Path;

use crate::dbpf::TgiKey;
use crate::package::PackageOperations;

pub fn execute(source: &Path, key: &str) -> anyhow::Result<()> {
    let key: TgiKey = key.parse()?;
    let entry = PackageOperations::entry(source, &key)?;

    println!("Key:               {}", entry.key);
    println!("Offset:            {:#010x} ({})", entry.offset, entry.offset);
    println!("Size on disk:      {}", entry.file_size);
    println!("Decompressed size: {}", entry.true_size);
    println!("Compressed:        {}", entry.compressed);
    println!("Compression flags: {}", entry.compression_flags);
    println!("Flags:             {:#06x}", entry.flags);

    Ok(())
}
