//! Tree aggregation
//!
//! Walks a [`DirectorySource`] depth-first, pruning excluded directories
//! before they are listed, and collects the text of every file that passes
//! both the pattern set and the extension allow-list.

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::source::{DirectorySource, EntryKind, FsSource, ListedEntry};
use crate::domain::{CandidatePath, FileRecord, TraversalResult};
use crate::patterns::{explain, PatternSet};
use crate::utils::join_relative;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot list scan root {}: {source}", root.display())]
    RootUnreadable {
        root: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Keep the directories that survive the pattern set, in order.
pub fn prune_directories(patterns: &PatternSet, dirs: Vec<CandidatePath>) -> Vec<CandidatePath> {
    dirs.into_iter()
        .filter(|dir| match explain(&dir.relative_path, patterns, true) {
            Some(hit) => {
                tracing::debug!("Excluding directory {} (matched {})", dir.relative_path, hit);
                false
            }
            None => true,
        })
        .collect()
}

/// Suffix match against the full path. An empty list allows everything.
pub fn has_allowed_extension(path: &str, include_extensions: &[String]) -> bool {
    include_extensions.is_empty()
        || include_extensions.iter().any(|ext| path.ends_with(ext.as_str()))
}

/// Walks one root against one pattern set.
pub struct TreeAggregator<'p> {
    root: PathBuf,
    patterns: &'p PatternSet,
    include_extensions: Vec<String>,
}

impl<'p> TreeAggregator<'p> {
    pub fn new(root: impl Into<PathBuf>, patterns: &'p PatternSet) -> Self {
        Self { root: root.into(), patterns, include_extensions: Vec::new() }
    }

    /// Set extension suffixes to keep (e.g., ".rs", ".py")
    pub fn include_extensions(mut self, extensions: Vec<String>) -> Self {
        self.include_extensions = extensions;
        self
    }

    /// Walk the tree. Only an unlistable root is an error; everything below
    /// it degrades to skipping.
    pub fn aggregate<S: DirectorySource>(&self, source: &S) -> Result<TraversalResult, ScanError> {
        let entries = source
            .list(&self.root)
            .map_err(|source| ScanError::RootUnreadable { root: self.root.clone(), source })?;

        let mut walk = Walk { result: TraversalResult::default(), visited: HashSet::new() };
        if let Some(id) = source.identity(&self.root) {
            walk.visited.insert(id);
        }
        self.visit(source, "", entries, &mut walk);
        Ok(walk.result)
    }

    fn visit<S: DirectorySource>(
        &self,
        source: &S,
        rel_dir: &str,
        entries: Vec<ListedEntry>,
        walk: &mut Walk,
    ) {
        let (dirs, files): (Vec<ListedEntry>, Vec<ListedEntry>) =
            entries.into_iter().partition(|entry| entry.kind == EntryKind::Dir);

        let candidates: Vec<CandidatePath> =
            dirs.iter().map(|dir| CandidatePath::dir(join_relative(rel_dir, &dir.name))).collect();
        let mut by_path: HashMap<String, ListedEntry> = candidates
            .iter()
            .map(|candidate| candidate.relative_path.clone())
            .zip(dirs)
            .collect();
        let descend = prune_directories(self.patterns, candidates);

        for file in &files {
            self.visit_file(source, rel_dir, file, &mut walk.result);
        }

        for candidate in descend {
            let Some(dir) = by_path.remove(&candidate.relative_path) else {
                continue;
            };
            if let Some(id) = source.identity(&dir.path) {
                if !walk.visited.insert(id) {
                    tracing::debug!("Skipping visited directory {}", candidate.relative_path);
                    continue;
                }
            }
            match source.list(&dir.path) {
                Ok(children) => self.visit(source, &candidate.relative_path, children, walk),
                Err(err) => {
                    tracing::debug!("Error listing {}: {}", dir.path.display(), err);
                }
            }
        }
    }

    fn visit_file<S: DirectorySource>(
        &self,
        source: &S,
        rel_dir: &str,
        file: &ListedEntry,
        result: &mut TraversalResult,
    ) {
        let candidate = CandidatePath::file(join_relative(rel_dir, &file.name));
        let rel_path = candidate.relative_path;

        if let Some(hit) = explain(&rel_path, self.patterns, candidate.is_dir) {
            tracing::debug!("Excluding file {} (matched {})", rel_path, hit);
            result.excluded += 1;
            return;
        }

        if !has_allowed_extension(&file.path.to_string_lossy(), &self.include_extensions) {
            tracing::debug!("Excluding file {} (extension not included)", rel_path);
            result.excluded += 1;
            return;
        }

        match source.read_text(&file.path) {
            Ok(content) => {
                result.records.push(FileRecord { relative_path: rel_path, content });
                result.processed += 1;
            }
            Err(err) => {
                tracing::debug!("Error reading {}: {}", file.path.display(), err);
                result.unreadable.push(rel_path);
            }
        }
    }
}

struct Walk {
    result: TraversalResult,
    visited: HashSet<PathBuf>,
}

/// Aggregate a directory on disk.
pub fn aggregate(
    root: &Path,
    patterns: &PatternSet,
    include_extensions: Option<&[String]>,
) -> Result<TraversalResult, ScanError> {
    TreeAggregator::new(root, patterns)
        .include_extensions(include_extensions.map(<[String]>::to_vec).unwrap_or_default())
        .aggregate(&FsSource::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::source::MemorySource;
    use std::fs;
    use tempfile::TempDir;

    fn baseline() -> PatternSet {
        let baseline = crate::patterns::BASELINE_PATTERNS.iter().copied();
        PatternSet::from_patterns(baseline.chain([".gitignore"]))
    }

    fn paths(result: &TraversalResult) -> Vec<&str> {
        result.records.iter().map(|r| r.relative_path.as_str()).collect()
    }

    #[test]
    fn test_pruned_venv_is_never_visited() {
        let source = MemorySource::new("/proj")
            .with_file("a.py", "x")
            .with_file("b.txt", "y")
            .with_file("venv/c.py", "z");
        let patterns = baseline();

        let result = TreeAggregator::new("/proj", &patterns)
            .include_extensions(vec![".py".to_string()])
            .aggregate(&source)
            .expect("aggregate");

        assert_eq!(paths(&result), vec!["a.py"]);
        assert_eq!(result.records[0].content, "x");
        assert_eq!(result.processed, 1);
        assert_eq!(result.excluded, 1);
        assert_eq!(source.listed_dirs(), vec![PathBuf::from("/proj")]);
        assert_eq!(source.read_files(), vec![PathBuf::from("/proj/a.py")]);
    }

    #[test]
    fn test_baseline_dirs_pruned_regardless_of_ignore_rules() {
        let source = MemorySource::new("/proj")
            .with_file(".git/config", "[core]")
            .with_file(".git/objects/ab/cd", "blob")
            .with_file("env/lib/site.py", "")
            .with_file("main.py", "print()");
        let patterns = baseline();

        let result = TreeAggregator::new("/proj", &patterns).aggregate(&source).expect("aggregate");

        assert_eq!(paths(&result), vec!["main.py"]);
        assert_eq!(result.excluded, 0);
        assert_eq!(source.listed_dirs(), vec![PathBuf::from("/proj")]);
    }

    #[test]
    fn test_files_before_subdirectories_depth_first() {
        let source = MemorySource::new("/proj")
            .with_file("z.txt", "z")
            .with_file("a/inner/deep.txt", "d")
            .with_file("a/top.txt", "t")
            .with_file("b/one.txt", "1");
        let patterns = PatternSet::default();

        let result = TreeAggregator::new("/proj", &patterns).aggregate(&source).expect("aggregate");

        assert_eq!(paths(&result), vec!["z.txt", "a/top.txt", "a/inner/deep.txt", "b/one.txt"]);
    }

    #[test]
    fn test_unreadable_files_count_nowhere() {
        let source = MemorySource::new("/proj")
            .with_file("ok.txt", "fine")
            .with_unreadable("locked.txt")
            .with_file("skip.log", "noise");
        let patterns = PatternSet::from_patterns(["*.log"]);

        let result = TreeAggregator::new("/proj", &patterns).aggregate(&source).expect("aggregate");

        assert_eq!(result.processed, 1);
        assert_eq!(result.excluded, 1);
        assert_eq!(result.unreadable, vec!["locked.txt"]);
        assert!(!paths(&result).contains(&"locked.txt"));
        // visited = processed + excluded + unreadable
        assert_eq!(result.total() + result.unreadable.len(), 3);
    }

    #[test]
    fn test_pattern_exclusion_precedes_extension_filter() {
        let source = MemorySource::new("/proj")
            .with_file("keep.py", "k")
            .with_file("gen/skip.py", "s")
            .with_file("notes.txt", "n");
        let patterns = PatternSet::from_patterns(["gen/*"]);

        let result = TreeAggregator::new("/proj", &patterns)
            .include_extensions(vec![".py".to_string()])
            .aggregate(&source)
            .expect("aggregate");

        // gen/ is listed (no directory pattern), gen/skip.py is excluded by the file test.
        assert_eq!(paths(&result), vec!["keep.py"]);
        assert_eq!(result.excluded, 2);
        assert!(!source.read_files().contains(&PathBuf::from("/proj/gen/skip.py")));
    }

    #[test]
    fn test_log_files_excluded_at_any_depth() {
        let source = MemorySource::new("/proj")
            .with_file("run.log", "1")
            .with_file("a/b/run.log", "2")
            .with_file("a/b/keep.txt", "3");
        let patterns = PatternSet::from_patterns(["*.log"]);

        let result = TreeAggregator::new("/proj", &patterns).aggregate(&source).expect("aggregate");

        assert_eq!(paths(&result), vec!["a/b/keep.txt"]);
        assert_eq!(result.excluded, 2);
    }

    #[test]
    fn test_unlistable_subdirectory_is_skipped() {
        let source = MemorySource::new("/proj")
            .with_file("a.txt", "a")
            .with_unlistable("locked")
            .with_file("open/b.txt", "b");
        let patterns = PatternSet::default();

        let result = TreeAggregator::new("/proj", &patterns).aggregate(&source).expect("aggregate");

        assert_eq!(paths(&result), vec!["a.txt", "open/b.txt"]);
        assert_eq!(result.processed, 2);
        assert_eq!(result.excluded, 0);
        assert!(result.unreadable.is_empty());
        assert_eq!(source.listed_dirs(), vec![PathBuf::from("/proj"), PathBuf::from("/proj/open")]);
    }

    #[test]
    fn test_visit_descends_only_into_pruned_survivors() {
        let source = MemorySource::new("/proj")
            .with_file("build/out.txt", "o")
            .with_file("src/main.rs", "m")
            .with_file("web/node_modules/x.js", "x");
        let patterns = PatternSet::from_patterns(["build", "node_modules/"]);

        let result = TreeAggregator::new("/proj", &patterns).aggregate(&source).expect("aggregate");

        assert_eq!(paths(&result), vec!["src/main.rs", "web/node_modules/x.js"]);
        assert!(!source.listed_dirs().contains(&PathBuf::from("/proj/build")));
    }

    #[test]
    fn test_unlistable_root_is_fatal() {
        let patterns = PatternSet::default();
        let err = TreeAggregator::new("/missing", &patterns)
            .aggregate(&MemorySource::new("/proj"))
            .unwrap_err();
        assert!(matches!(err, ScanError::RootUnreadable { .. }));
    }

    #[test]
    fn test_prune_directories_filters_explicitly() {
        let patterns = PatternSet::from_patterns(["build", "node_modules/"]);
        let kept = prune_directories(
            &patterns,
            vec![
                CandidatePath::dir("src"),
                CandidatePath::dir("build"),
                CandidatePath::dir("node_modules"),
                CandidatePath::dir("web/node_modules"),
            ],
        );
        let kept: Vec<&str> = kept.iter().map(|c| c.relative_path.as_str()).collect();
        assert_eq!(kept, vec!["src", "web/node_modules"]);
    }

    #[test]
    fn test_extension_filter_is_plain_suffix() {
        let exts = vec![".py".to_string(), "file".to_string()];
        assert!(has_allowed_extension("/p/a.py", &exts));
        assert!(has_allowed_extension("/p/Makefile", &exts));
        assert!(!has_allowed_extension("/p/a.pyc", &exts));
        assert!(has_allowed_extension("/p/anything", &[]));
    }

    #[test]
    fn test_aggregate_on_disk_is_idempotent() {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path();
        fs::create_dir_all(root.join("src/nested")).expect("mkdir");
        fs::create_dir_all(root.join(".git")).expect("mkdir");
        fs::write(root.join(".git/HEAD"), "ref: refs/heads/main").expect("write");
        fs::write(root.join("src/lib.rs"), "pub fn a() {}\n").expect("write");
        fs::write(root.join("src/nested/b.rs"), "pub fn b() {}\n").expect("write");
        fs::write(root.join("blob.bin"), [0u8, 1, 2, 3]).expect("write");
        let patterns = baseline();

        let first = aggregate(root, &patterns, None).expect("first");
        let second = aggregate(root, &patterns, None).expect("second");

        similar_asserts::assert_eq!(first, second);
        assert_eq!(first.processed, 2);
        assert_eq!(first.unreadable, vec!["blob.bin"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loops_visited_once() {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path();
        fs::create_dir(root.join("a")).expect("mkdir");
        fs::write(root.join("a/file.txt"), "x").expect("write");
        std::os::unix::fs::symlink(root, root.join("a/back")).expect("symlink");
        let patterns = PatternSet::default();

        let result = TreeAggregator::new(root, &patterns)
            .aggregate(&FsSource::new().follow_symlinks(true))
            .expect("aggregate");

        assert_eq!(paths(&result), vec!["a/file.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlinks_are_counted() {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path();
        fs::write(root.join("ok.txt"), "fine").expect("write");
        std::os::unix::fs::symlink(root.join("gone.log"), root.join("dangling.log"))
            .expect("symlink");
        std::os::unix::fs::symlink(root.join("gone.txt"), root.join("dangling.txt"))
            .expect("symlink");
        let patterns = PatternSet::from_patterns(["*.log"]);

        let result = aggregate(root, &patterns, None).expect("aggregate");

        assert_eq!(paths(&result), vec!["ok.txt"]);
        assert_eq!(result.processed, 1);
        assert_eq!(result.excluded, 1);
        assert_eq!(result.unreadable, vec!["dangling.txt"]);
    }
}
