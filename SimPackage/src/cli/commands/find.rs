//! CLI command for finding package files

use std::path::Path;

use crate::package::find_package_files;

/// Find all package files in a directory
pub fn execute(dir: &Path) -> anyhow::Result<()> {
    let packages = find_package_files(dir);

    if packages.is_empty() {
        println!("No package files found in: {}", dir.display());
    } else {
        println!("Found {} package files:", packages.len());
        for package in &packages {
            // Show relative path if possible
            let display = package
                .strip_prefix(dir)
                .unwrap_or(package.as_path())
                .display();
            println!("  {display}");
        }
    }

    Ok(())
}
