//! CLI command for listing package contents

use std::path::Path;
use std::time::Instant;

use crate::cli::progress::{LOOKING_GLASS, index_bar, print_done, print_step, update_bar};
use crate::dbpf::{DbpfContents, Hex32, IndexEntry};
use crate::package::PackageOperations;

use super::format_size;

pub fn execute(
    source: &Path,
    type_id: Option<&str>,
    detailed: bool,
    count: bool,
    json: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    let type_id: Option<Hex32> = type_id.map(str::parse::<Hex32>).transpose()?;
    let show_progress = !quiet && !json && !count;

    let start = Instant::now();
    let contents = if show_progress {
        print_step(1, 1, &LOOKING_GLASS, &format!("Reading {}...", source.display()));
        let pb = index_bar();
        let contents = PackageOperations::read_with_progress(source, &|p| update_bar(&pb, p));
        pb.finish_and_clear();
        contents?
    } else {
        PackageOperations::read(source)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&contents)?);
        return Ok(());
    }

    let filtered = filter_entries(&contents, type_id);

    if count {
        println!("{}", filtered.len());
        return Ok(());
    }

    if detailed {
        println!(
            "{:<35}  {:>10}  {:>10}  {:>10}  COMPRESSED",
            "KEY", "OFFSET", "SIZE", "TRUE SIZE"
        );
        for entry in &filtered {
            println!(
                "{:<35}  {:>10}  {:>10}  {:>10}  {}",
                entry.key.to_string(),
                entry.offset,
                format_size(u64::from(entry.file_size)),
                format_size(u64::from(entry.true_size)),
                if entry.compressed { "yes" } else { "no" }
            );
        }

        let total_disk: u64 = filtered.iter().map(|e| u64::from(e.file_size)).sum();
        println!();
        println!(
            "{} resources, {} on disk",
            filtered.len(),
            format_size(total_disk)
        );
    } else {
        for entry in &filtered {
            println!("{}", entry.key);
        }
    }

    if show_progress {
        print_done(start.elapsed());
    }

    Ok(())
}

fn filter_entries(contents: &DbpfContents, type_id: Option<Hex32>) -> Vec<&IndexEntry> {
    match type_id {
        Some(type_id) => contents.entries_of_type(type_id).collect(),
        None => contents.catalogue.values().collect(),
    }
}
