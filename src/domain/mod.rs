//! Core data types shared by the matcher, the aggregator and the renderers.

pub mod config;

pub use config::Config;

/// One filesystem entry being considered during a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePath {
    /// Path relative to the scan root, `/`-separated.
    pub relative_path: String,
    pub is_dir: bool,
}

impl CandidatePath {
    pub fn dir(relative_path: impl Into<String>) -> Self {
        Self { relative_path: relative_path.into(), is_dir: true }
    }

    pub fn file(relative_path: impl Into<String>) -> Self {
        Self { relative_path: relative_path.into(), is_dir: false }
    }
}

/// A file that made it into the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub relative_path: String,
    pub content: String,
}

/// Everything one walk produced, in visitation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalResult {
    pub records: Vec<FileRecord>,
    pub processed: usize,
    pub excluded: usize,
    /// Files that were eligible but could not be read as text.
    pub unreadable: Vec<String>,
}

impl TraversalResult {
    /// Files counted by either counter. Unreadable files are not part of it.
    pub fn total(&self) -> usize {
        self.processed + self.excluded
    }
}
