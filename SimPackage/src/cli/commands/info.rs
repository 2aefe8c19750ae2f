//! CLI command for package information

use std::collections::HashMap;
use std::path::Path;

use crate::dbpf::{Hex32, directory_record_size};
use crate::package::PackageOperations;

use super::format_size;

/// Show header and aggregate info about a package
pub fn execute(source: &Path) -> anyhow::Result<()> {
    let contents = PackageOperations::read(source)?;

    let total_disk: u64 = contents.catalogue.values().map(|e| u64::from(e.file_size)).sum();
    let total_true: u64 = contents
        .catalogue
        .values()
        .map(|e| u64::from(e.display_size()))
        .sum();

    let mut by_type: HashMap<Hex32, (usize, u64)> = HashMap::new();
    for entry in contents.catalogue.values() {
        let (count, size) = by_type.entry(entry.key.type_id).or_insert((0, 0));
        *count += 1;
        *size += u64::from(entry.display_size());
    }

    println!("Package Information: {}", source.display());
    println!();
    print!("{}", contents.header);
    println!();

    println!("Resources: {}", contents.len());
    println!("Compressed: {}", contents.compressed_count());
    println!(
        "Size on disk: {} ({} bytes)",
        format_size(total_disk),
        total_disk
    );
    println!(
        "Size decompressed: {} ({} bytes)",
        format_size(total_true),
        total_true
    );
    if let Some(directory) = &contents.directory {
        let records = directory.file_size / directory_record_size(&contents.header);
        println!("Directory resource: {} ({records} records)", directory.key);
    }
    if contents.report.dropped_entries > 0 {
        println!("Dropped index entries: {}", contents.report.dropped_entries);
    }
    if !contents.report.unmatched_directory_keys.is_empty() {
        println!(
            "Directory records without index entry: {}",
            contents.report.unmatched_directory_keys.len()
        );
        for key in &contents.report.unmatched_directory_keys {
            println!("  {key}");
        }
    }
    println!();

    println!("Resources by type:");
    let mut type_list: Vec<_> = by_type.iter().collect();
    type_list.sort_by_key(|(type_id, (count, _))| (std::cmp::Reverse(*count), **type_id));
    for (type_id, (count, size)) in type_list {
        println!("  {type_id}  {count:>6} resources  {:>10}", format_size(*size));
    }

    Ok(())
}
