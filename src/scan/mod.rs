//! Directory traversal and aggregation

pub mod aggregator;
pub mod source;

pub use aggregator::{aggregate, prune_directories, ScanError, TreeAggregator};
pub use source::{DirectorySource, EntryKind, FsSource, ListedEntry, MemorySource};
