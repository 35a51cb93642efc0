//! CLI overrides on top of file and environment configuration.

use crate::domain::Config;
use std::path::PathBuf;

/// Values given on the command line. `None` / `false` leaves the config alone.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub include_extensions: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub ignore_file: Option<String>,
    pub follow_symlinks: bool,
    pub encoding: Option<String>,
    pub tree: bool,
    pub output_file: Option<PathBuf>,
}

pub fn merge_cli_with_config(mut config: Config, cli: CliOverrides) -> Config {
    if let Some(extensions) = cli.include_extensions {
        config.include_extensions = extensions;
    }
    if let Some(exclude) = cli.exclude {
        config.exclude = exclude;
    }
    if let Some(ignore_file) = cli.ignore_file {
        config.ignore_file = ignore_file;
    }
    if cli.encoding.is_some() {
        config.encoding = cli.encoding;
    }
    if cli.output_file.is_some() {
        config.output_file = cli.output_file;
    }
    config.follow_symlinks |= cli.follow_symlinks;
    config.tree |= cli.tree;
    config
}
