//! project-formatter: concatenate a project's files into one labeled text blob
//!
//! The tree under a root directory is walked top-down. Directories matching
//! the exclusion patterns (a built-in baseline, the root's `.gitignore`, and
//! caller additions) are pruned before they are listed; surviving files are
//! read as text and rendered as `=== File: <path> ===` blocks.

pub mod cli;
pub mod config;
pub mod domain;
pub mod formatter;
pub mod output;
pub mod patterns;
pub mod render;
pub mod scan;
pub mod utils;

pub use formatter::{format_project, FormatError, FormatOptions, FormattedProject};
pub use patterns::{is_excluded, PatternSet};
pub use scan::aggregate;
