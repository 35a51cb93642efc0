//! Patterns command implementation

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use super::utils::parse_csv;
use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::patterns::{explain, PatternSetBuilder};
use crate::utils::{clean_relative, relative_to};

#[derive(Args)]
pub struct PatternsArgs {
    /// Path to the project directory
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Comma-separated list of additional patterns
    #[arg(short = 'e', long, value_name = "PATTERNS")]
    pub exclude: Option<String>,

    /// Path to config file (project-formatter.toml or .pf.yml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Name of the ignore file read from the project root
    #[arg(long, value_name = "NAME")]
    pub ignore_file: Option<String>,

    /// Check whether these paths are excluded (repeatable)
    #[arg(long, value_name = "PATH")]
    pub check: Vec<String>,

    /// Treat checked paths as directories (a trailing '/' does the same)
    #[arg(long)]
    pub dir: bool,
}

pub fn run(args: PatternsArgs) -> Result<()> {
    if !args.directory.is_dir() {
        anyhow::bail!("{} is not a valid directory.", args.directory.display());
    }

    let config = load_config(&args.directory, args.config.as_deref())?;
    let config = merge_cli_with_config(
        config,
        CliOverrides {
            exclude: parse_csv(&args.exclude),
            ignore_file: args.ignore_file.clone(),
            ..CliOverrides::default()
        },
    );

    let patterns = PatternSetBuilder::new(&args.directory)
        .ignore_file(config.ignore_file.clone())
        .extra(config.exclude.iter().cloned())
        .build();

    if args.check.is_empty() {
        println!("Patterns ({}):", patterns.len());
        for (idx, pattern) in patterns.iter().enumerate() {
            println!("  {:>3}. {}", idx + 1, pattern.as_str());
        }
        return Ok(());
    }

    for raw in &args.check {
        let is_dir = args.dir || raw.ends_with('/') || raw.ends_with('\\');
        let rel = to_root_relative(&args.directory, raw);
        match explain(&rel, &patterns, is_dir) {
            Some(hit) => println!("{}: excluded by {}", rel, hit),
            None => println!("{}: not excluded", rel),
        }
    }

    Ok(())
}

/// Absolute paths under the root are made relative; everything else is
/// taken as already relative.
fn to_root_relative(root: &Path, raw: &str) -> String {
    let candidate = Path::new(raw);
    if candidate.is_absolute() {
        let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
        let absolute = candidate.canonicalize().unwrap_or_else(|_| candidate.to_path_buf());
        if let Some(rel) = relative_to(&root, &absolute) {
            return clean_relative(&rel);
        }
    }
    clean_relative(raw)
}
