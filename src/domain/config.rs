//! User-facing configuration

use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

use crate::patterns::DEFAULT_IGNORE_FILE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Extension suffixes to keep; empty keeps everything.
    #[serde(deserialize_with = "string_or_list")]
    pub include_extensions: Vec<String>,

    /// Extra exclusion patterns appended after the ignore file.
    #[serde(deserialize_with = "string_or_list")]
    pub exclude: Vec<String>,

    /// Name of the gitignore-style file read from the scan root.
    pub ignore_file: String,

    pub follow_symlinks: bool,

    /// Encoding label used to decode files (UTF-8 when unset).
    pub encoding: Option<String>,

    /// Prepend a directory tree of the included files.
    pub tree: bool,

    pub output_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            include_extensions: Vec::new(),
            exclude: Vec::new(),
            ignore_file: DEFAULT_IGNORE_FILE.to_string(),
            follow_symlinks: false,
            encoding: None,
            tree: false,
            output_file: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrList {
    One(String),
    Many(Vec<String>),
}

/// Accept either `"a, b"` or `["a", "b"]`, trimming entries and dropping blanks.
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match StringOrList::deserialize(deserializer)? {
        StringOrList::One(value) => value.split(',').map(str::to_string).collect(),
        StringOrList::Many(values) => values,
    };
    Ok(raw
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect())
}
