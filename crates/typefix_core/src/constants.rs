//! Constants for file extensions and the package store layout.

/// File extensions for project source files that get rewritten
pub const SOURCE_EXTENSIONS: &[&str] = &[
    "ts",  // TypeScript
    "tsx", // TypeScript with JSX
];

/// Extension of files scanned inside external packages. Declaration
/// files and plain sources both end in `.ts`; `.tsx` never carries
/// exported type declarations worth scanning in practice.
pub const PACKAGE_SOURCE_EXTENSION: &str = "ts";

/// Conventional directory holding third-party package sources
pub const PACKAGE_DIR: &str = "node_modules";
