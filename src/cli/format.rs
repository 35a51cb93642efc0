//! Format command implementation

use anyhow::Result;
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

use super::utils::parse_csv;
use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::formatter::{format_project, FormatOptions};
use crate::output::{deliver, Destination};
use crate::render::{summary_report, write_report};

#[derive(Args)]
pub struct FormatArgs {
    /// Path to the project directory
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Copy the formatted project structure to the clipboard
    #[arg(short = 'c', long)]
    pub clipboard: bool,

    /// Output file to write the formatted project structure
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Comma-separated list of file extensions to include
    #[arg(short = 'i', long, value_name = "EXTS")]
    pub include: Option<String>,

    /// Comma-separated list of additional files or directories to exclude
    #[arg(short = 'e', long, value_name = "PATTERNS")]
    pub exclude: Option<String>,

    /// Path to config file (project-formatter.toml or .pf.yml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Name of the ignore file read from the project root
    #[arg(long, value_name = "NAME")]
    pub ignore_file: Option<String>,

    /// Follow symbolic links to directories
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Decode files with this encoding instead of UTF-8
    #[arg(long, value_name = "LABEL")]
    pub encoding: Option<String>,

    /// Prepend a directory tree of the included files
    #[arg(long)]
    pub tree: bool,

    /// Also write a JSON report to this file
    #[arg(long, value_name = "FILE")]
    pub report_json: Option<PathBuf>,

    /// Do not print the summary report
    #[arg(long)]
    pub no_summary: bool,
}

pub fn run(args: FormatArgs) -> Result<()> {
    if !args.directory.is_dir() {
        anyhow::bail!("{} is not a valid directory.", args.directory.display());
    }

    let config = load_config(&args.directory, args.config.as_deref())?;
    let config = merge_cli_with_config(
        config,
        CliOverrides {
            include_extensions: parse_csv(&args.include),
            exclude: parse_csv(&args.exclude),
            ignore_file: args.ignore_file.clone(),
            follow_symlinks: args.follow_symlinks,
            encoding: args.encoding.clone(),
            tree: args.tree,
            output_file: args.output_file.clone(),
        },
    );

    let formatted = format_project(&args.directory, &FormatOptions::from(&config))?;

    let destination = Destination::choose(args.clipboard, config.output_file.clone());
    let message = deliver(&destination, &formatted.text)?;

    if let Some(report_path) = &args.report_json {
        write_report(report_path, &args.directory, &formatted.patterns, &formatted.result)?;
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match message {
        Some(line) => writeln!(out, "{}", line)?,
        None => writeln!(out, "{}", formatted.text)?,
    }
    if !args.no_summary {
        write!(out, "\n{}", summary_report(&formatted.result))?;
    }
    out.flush()?;

    Ok(())
}
