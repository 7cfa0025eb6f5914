use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::aliases::AliasRule;

#[derive(Debug, Clone, Parser)]
#[command(name = "typefix")]
#[command(about = "Rewrite imports of type-only names as explicit type-only imports")]
pub struct Config {
    /// Root directory of the project to rewrite
    #[arg(long = "in", value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Keep per-name `type` markers instead of merging fully type-only
    /// imports into a single statement-level `import type`
    #[arg(long = "no-consolidate", action = ArgAction::SetFalse)]
    pub consolidate: bool,

    /// Module specifier alias as PREFIX=TARGET; may be repeated.
    /// Rules apply in the order given, first match wins
    #[arg(long = "alias", value_name = "PREFIX=TARGET")]
    pub alias: Vec<AliasRule>,
}

impl Default for Config {
    fn default() -> Self {
        Config { root: PathBuf::new(), consolidate: true, alias: Vec::new() }
    }
}
