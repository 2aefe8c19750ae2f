//! Package discovery

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Collect every DBPF package below `dir`
///
/// Matches regular files whose extension is `package` in any letter case
/// (`Objects.PACKAGE` counts). Symlinked directories are followed, and
/// entries that cannot be read are skipped. Paths come back sorted so mod
/// folders list the same way on every platform. A missing `dir` yields an
/// empty list.
pub fn find_package_files<P: AsRef<Path>>(dir: P) -> Vec<PathBuf> {
    let mut packages: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .flatten()
        .filter(|entry| entry.file_type().is_file() && is_package(entry.path()))
        .map(walkdir::DirEntry::into_path)
        .collect();

    packages.sort();
    packages
}

fn is_package(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("package"))
}
