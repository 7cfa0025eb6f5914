//! Engine for rewriting TypeScript imports as explicitly type-only.
//!
//! This crate provides the full conversion pipeline:
//! - Discovering project source files (excluding the package store)
//! - Building a project-wide catalog of type-only export names,
//!   including names from external packages reachable through
//!   (possibly aliased) module specifiers
//! - Tokenizing each file and rewriting its import statements, with
//!   optional consolidation of fully type-only statements
//!
//! The catalog is a single flat name set: a name declared type-only
//! anywhere is treated as type-only at every import site. That keeps
//! the engine free of any module graph at the cost of cross-module
//! name collisions, which is the intended trade-off.

mod aliases;
mod catalog;
mod collector;
mod config;
mod constants;
mod locator;
mod progress;
mod rewriter;
mod runner;

// Re-export public API
pub use aliases::{AliasRule, resolve_specifier};
pub use catalog::build_catalog;
pub use collector::collect_source_files;
pub use config::Config;
pub use constants::{PACKAGE_DIR, SOURCE_EXTENSIONS};
pub use locator::find_package_root;
pub use progress::{NullProgress, ProgressSink};
pub use rewriter::rewrite_imports;
pub use runner::{RunSummary, run_conversion};
