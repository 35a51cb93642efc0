//! The caller-facing entry point: patterns, walk and serialization in one call.

use std::path::Path;
use thiserror::Error;

use crate::domain::{Config, TraversalResult};
use crate::patterns::{PatternSet, PatternSetBuilder, DEFAULT_IGNORE_FILE};
use crate::render::{generate_tree, render_blob};
use crate::scan::{FsSource, ScanError, TreeAggregator};
use crate::utils::TextDecoder;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("unknown encoding label '{0}'")]
    UnknownEncoding(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Suffixes a file path must end with; `None` or empty keeps everything.
    pub include_extensions: Option<Vec<String>>,
    /// Patterns appended after the ignore file.
    pub additional_excludes: Vec<String>,
    pub ignore_file: String,
    pub follow_symlinks: bool,
    pub encoding: Option<String>,
    pub tree: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            include_extensions: None,
            additional_excludes: Vec::new(),
            ignore_file: DEFAULT_IGNORE_FILE.to_string(),
            follow_symlinks: false,
            encoding: None,
            tree: false,
        }
    }
}

impl From<&Config> for FormatOptions {
    fn from(config: &Config) -> Self {
        Self {
            include_extensions: (!config.include_extensions.is_empty())
                .then(|| config.include_extensions.clone()),
            additional_excludes: config.exclude.clone(),
            ignore_file: config.ignore_file.clone(),
            follow_symlinks: config.follow_symlinks,
            encoding: config.encoding.clone(),
            tree: config.tree,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormattedProject {
    /// The serialized blob, prefixed by the tree when requested.
    pub text: String,
    pub patterns: PatternSet,
    pub result: TraversalResult,
}

/// Format the project at `root` into one labeled text blob.
pub fn format_project(
    root: &Path,
    options: &FormatOptions,
) -> Result<FormattedProject, FormatError> {
    let decoder = match options.encoding.as_deref() {
        Some(label) => TextDecoder::for_label(label)
            .ok_or_else(|| FormatError::UnknownEncoding(label.to_string()))?,
        None => TextDecoder::default(),
    };

    let patterns = PatternSetBuilder::new(root)
        .ignore_file(options.ignore_file.clone())
        .extra(options.additional_excludes.iter().cloned())
        .build();

    let source = FsSource::new().follow_symlinks(options.follow_symlinks).decoder(decoder);
    let result = TreeAggregator::new(root, &patterns)
        .include_extensions(options.include_extensions.clone().unwrap_or_default())
        .aggregate(&source)?;

    let blob = render_blob(&result.records);
    let text = if options.tree {
        let root_name = root
            .canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
            .unwrap_or_else(|| ".".to_string());
        format!("{}\n\n{}", generate_tree(&root_name, &result.records), blob)
    } else {
        blob
    };

    Ok(FormattedProject { text, patterns, result })
}
