use anyhow::{Context, Result};
use ignore::WalkBuilder;
use log::{debug, error, trace, warn};
use regex::Regex;
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use crate::{
    aliases::{AliasRule, resolve_specifier},
    constants::{PACKAGE_DIR, PACKAGE_SOURCE_EXTENSION},
};

// `\s` spans newlines, so declarations broken across lines still match.
static TYPE_EXPORT_GLOBAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export\s+(?:interface|type)\s+[A-Za-z0-9_]+").unwrap());

static TYPE_EXPORT_LOCAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export\s+(?:interface|type)\s+(?<name>[A-Za-z0-9_]+)").unwrap());

static IMPORT_FROM_GLOBAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"import.* from "[^"]+""#).unwrap());

static IMPORT_FROM_LOCAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"import.* from "(?<module>[^"]+)""#).unwrap());

/// Builds the project-wide set of names known to be type-only.
///
/// Membership is global, not scoped to the declaring module: a name
/// declared type-only anywhere is treated as type-only at every import
/// site. This is a deliberate, documented approximation.
///
/// Nothing here is fatal except I/O failures, which propagate and abort
/// the run. Pattern anomalies and unresolvable packages degrade to
/// logged warnings.
pub fn build_catalog(
    files: &[PathBuf],
    package_root: Option<&Path>,
    rules: &[AliasRule],
) -> Result<HashSet<String>> {
    debug!("Building type export catalog from {} project files", files.len());
    let mut catalog = HashSet::new();
    let mut scanned_packages: HashSet<String> = HashSet::new();

    for file in files {
        let text = fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        collect_type_exports(&text, file, &mut catalog);
        if let Some(root) = package_root {
            collect_package_exports(&text, file, root, rules, &mut scanned_packages, &mut catalog)?;
        }
    }

    debug!(
        "Catalog contains {} type-only names ({} external packages scanned)",
        catalog.len(),
        scanned_packages.len()
    );
    Ok(catalog)
}

/// Extracts every `export interface X` / `export type X` identifier,
/// tolerant of arbitrary whitespace and newlines between the tokens.
fn collect_type_exports(text: &str, file: &Path, catalog: &mut HashSet<String>) {
    for m in TYPE_EXPORT_GLOBAL.find_iter(text) {
        let fragment = m.as_str();
        match TYPE_EXPORT_LOCAL.captures(fragment).and_then(|c| c.name("name")) {
            Some(name) => {
                trace!("Found type export '{}' in {}", name.as_str(), file.display());
                catalog.insert(name.as_str().to_string());
            }
            None => {
                // Never expected to fire; the captured form is a superset
                // of the outer pattern. Logged rather than fatal so one
                // odd fragment cannot abort the run.
                error!(
                    "type export pattern failed on '{}' for fragment: '{}'",
                    file.display(),
                    fragment
                );
            }
        }
    }
}

/// Resolves each import specifier in `text` and folds the type exports
/// of any reachable external package into the catalog.
fn collect_package_exports(
    text: &str,
    file: &Path,
    package_root: &Path,
    rules: &[AliasRule],
    scanned: &mut HashSet<String>,
    catalog: &mut HashSet<String>,
) -> Result<()> {
    for m in IMPORT_FROM_GLOBAL.find_iter(text) {
        let fragment = m.as_str();
        let Some(module) = IMPORT_FROM_LOCAL.captures(fragment).and_then(|c| c.name("module"))
        else {
            error!(
                "import specifier pattern failed on '{}' for fragment: '{}'",
                file.display(),
                fragment
            );
            continue;
        };

        let resolved = resolve_specifier(module.as_str(), rules);
        if resolved.starts_with('.') || resolved.starts_with('/') {
            trace!("Skipping local specifier '{}'", resolved);
            continue;
        }

        // Each package is scanned at most once per run.
        if !scanned.insert(resolved.clone()) {
            continue;
        }

        let package_dir = package_root.join(PACKAGE_DIR).join(&resolved);
        if !package_dir.is_dir() {
            warn!(
                "can't find package '{}' at '{}' - its type exports will not be processed",
                resolved,
                package_dir.display()
            );
            continue;
        }

        scan_package_dir(&package_dir, catalog)?;
    }
    Ok(())
}

fn scan_package_dir(dir: &Path, catalog: &mut HashSet<String>) -> Result<()> {
    trace!("Scanning package directory: {}", dir.display());
    // Package internals are not subject to the project's ignore files.
    let walker = WalkBuilder::new(dir).standard_filters(false).build();
    for res in walker {
        let dent = res?;
        let p = dent.path();
        if !p.is_file() {
            continue;
        }
        if p.extension().and_then(|e| e.to_str()) != Some(PACKAGE_SOURCE_EXTENSION) {
            continue;
        }
        let text =
            fs::read_to_string(p).with_context(|| format!("failed to read {}", p.display()))?;
        collect_type_exports(&text, p, catalog);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    #[test]
    fn test_collects_interface_and_type_exports() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let a = create_test_file(
            root,
            "a.ts",
            "export interface ICow { name: string; }\nexport type Moo = string;\n",
        );

        let catalog = build_catalog(&[a], None, &[]).unwrap();
        assert!(catalog.contains("ICow"));
        assert!(catalog.contains("Moo"));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_tolerates_newlines_between_keywords() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let a = create_test_file(root, "a.ts", "export\n    interface\n    ISpread { x: 1 }\n");

        let catalog = build_catalog(&[a], None, &[]).unwrap();
        assert!(catalog.contains("ISpread"));
    }

    #[test]
    fn test_value_exports_are_not_collected() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let a = create_test_file(
            root,
            "a.ts",
            "export const cow = 1;\nexport function moo() {}\nexport class Barn {}\n",
        );

        let catalog = build_catalog(&[a], None, &[]).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_external_package_exports_are_folded_in() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "node_modules/farm/index.ts", "export interface IBarn { x: 1 }");
        let main =
            create_test_file(root, "src/main.ts", "import { IBarn } from \"farm\";\nrun();\n");

        let catalog = build_catalog(&[main], Some(root), &[]).unwrap();
        assert!(catalog.contains("IBarn"));
    }

    #[test]
    fn test_scoped_package_directories_resolve() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(
            root,
            "node_modules/@farm/animals/types.ts",
            "export type Herd = string[];",
        );
        let main = create_test_file(root, "main.ts", "import { Herd } from \"@farm/animals\";\n");

        let catalog = build_catalog(&[main], Some(root), &[]).unwrap();
        assert!(catalog.contains("Herd"));
    }

    #[test]
    fn test_alias_resolving_to_local_path_skips_package_lookup() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let main = create_test_file(root, "main.ts", "import { X } from \"@app/widgets\";\n");
        let rules = [AliasRule { prefix: "@app/".to_string(), replacement: "./src/".to_string() }];

        // No node_modules/@app/widgets exists; the alias resolves the
        // specifier to a relative path, so no lookup happens at all.
        let catalog = build_catalog(&[main], Some(root), &rules).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_missing_package_is_nonfatal() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("node_modules")).unwrap();
        let main = create_test_file(
            root,
            "main.ts",
            "import { Gone } from \"nowhere\";\nexport type Kept = 1;\n",
        );

        let catalog = build_catalog(&[main], Some(root), &[]).unwrap();
        assert!(catalog.contains("Kept"));
        assert!(!catalog.contains("Gone"));
    }

    #[test]
    fn test_no_package_root_scans_project_only() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "node_modules/farm/index.ts", "export interface IBarn { x: 1 }");
        let main = create_test_file(root, "main.ts", "import { IBarn } from \"farm\";\n");

        let catalog = build_catalog(&[main], None, &[]).unwrap();
        assert!(!catalog.contains("IBarn"));
    }

    #[test]
    fn test_only_plain_ts_files_scanned_inside_packages() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "node_modules/farm/ui.tsx", "export interface IWidget { x: 1 }");
        create_test_file(root, "node_modules/farm/index.ts", "export type Milk = number;");
        let main = create_test_file(root, "main.ts", "import { Milk } from \"farm\";\n");

        let catalog = build_catalog(&[main], Some(root), &[]).unwrap();
        assert!(catalog.contains("Milk"));
        assert!(!catalog.contains("IWidget"));
    }
}
