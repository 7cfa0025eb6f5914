use log::{debug, trace};
use std::path::{Path, PathBuf};

use crate::constants::PACKAGE_DIR;

/// Finds the nearest ancestor of `from` (inclusive) that contains a
/// `node_modules` directory, walking upward until the filesystem root.
///
/// Absence is not an error: the caller degrades to project-local
/// scanning only.
pub fn find_package_root(from: &Path) -> Option<PathBuf> {
    debug!("Searching for {} root from {}", PACKAGE_DIR, from.display());
    let mut current = from.to_path_buf();

    loop {
        let store = current.join(PACKAGE_DIR);
        trace!("Checking for {} at: {:?}", PACKAGE_DIR, store);
        if store.is_dir() {
            debug!("Found package root at: {:?}", current);
            return Some(current);
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => {
                debug!("No {} directory in any parent folder", PACKAGE_DIR);
                return None;
            }
        }
    }
}
