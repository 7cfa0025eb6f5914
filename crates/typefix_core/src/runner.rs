use anyhow::{Context, Result, anyhow};
use log::{debug, info, warn};
use std::fs;

use crate::{
    catalog::build_catalog, collector::collect_source_files, config::Config,
    constants::PACKAGE_DIR, locator::find_package_root, progress::ProgressSink,
    rewriter::rewrite_imports,
};

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub files_processed: usize,
    /// Size of the type-export catalog the run was performed against.
    pub type_names: usize,
}

/// Runs the whole conversion: validates the root, builds the catalog
/// once, then rewrites every discovered file in order.
///
/// The two precondition failures are the only errors raised before any
/// file is touched; afterwards only I/O failures abort, leaving files
/// already processed in their rewritten state.
pub fn run_conversion(cfg: &Config, progress: &mut dyn ProgressSink) -> Result<RunSummary> {
    if cfg.root.as_os_str().is_empty() {
        return Err(anyhow!("option 'in' was not set"));
    }
    if !cfg.root.is_dir() {
        return Err(anyhow!("folder not found: {}", cfg.root.display()));
    }
    let root = cfg.root.canonicalize().unwrap_or_else(|_| cfg.root.clone());
    info!("Rewriting type-only imports under {}", root.display());

    let files = collect_source_files(&root)?;
    info!("Found {} source files", files.len());

    let package_root = find_package_root(&root);
    if package_root.is_none() {
        warn!(
            "can't find a {} folder when traversing upwards from '{}' - type imports from packages cannot be fixed up",
            PACKAGE_DIR,
            root.display()
        );
    }

    let catalog = build_catalog(&files, package_root.as_deref(), &cfg.alias)?;
    info!("Catalog holds {} type-only names", catalog.len());

    let total = files.len();
    for (idx, file) in files.iter().enumerate() {
        debug!("Processing {}", file.display());
        let text = fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        let rewritten = rewrite_imports(&text, &catalog, cfg.consolidate);
        fs::write(file, rewritten)
            .with_context(|| format!("failed to write {}", file.display()))?;
        progress.file_processed((idx + 1) * 100 / total.max(1), total, file);
    }

    Ok(RunSummary { files_processed: total, type_names: catalog.len() })
}
