//! project-formatter: format a project directory into one labeled text blob
//! for pasting into prompts.

use anyhow::Result;

fn main() -> Result<()> {
    project_formatter::cli::run()
}
