use anyhow::Result;
use ignore::WalkBuilder;
use log::{debug, trace};
use std::path::{Path, PathBuf};

use crate::constants::{PACKAGE_DIR, SOURCE_EXTENSIONS};

/// Recursively discovers the source files to rewrite under `root`,
/// excluding the external package store subtree. Results are sorted so
/// the processing order is deterministic.
pub fn collect_source_files(root: &Path) -> Result<Vec<PathBuf>> {
    debug!("Walking directory tree from root: {}", root.display());
    let mut files: Vec<PathBuf> = Vec::new();
    let walker = WalkBuilder::new(root).hidden(false).ignore(true).git_ignore(true).build();

    for res in walker {
        let dent = res?;
        let p = dent.path();
        if !p.is_file() {
            continue;
        }

        if p.components().any(|c| c.as_os_str() == PACKAGE_DIR) {
            trace!("Skipping file under {}: {}", PACKAGE_DIR, p.display());
            continue;
        }

        if let Some(ext) = p.extension().and_then(|e| e.to_str())
            && SOURCE_EXTENSIONS.contains(&ext)
        {
            trace!("Found source file: {}", p.display());
            files.push(p.to_path_buf());
        }
    }

    files.sort();
    debug!("Collected {} source files", files.len());
    Ok(files)
}
