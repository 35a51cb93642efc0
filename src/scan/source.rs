//! Directory sources the aggregator walks.
//!
//! [`FsSource`] reads the real filesystem. [`MemorySource`] holds a tree in
//! memory and remembers what was listed and read, so walks can be checked
//! without touching disk.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::utils::{read_text_file, ReadError, TextDecoder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
}

/// One immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

pub trait DirectorySource {
    /// Immediate children of `dir`, sorted by name.
    fn list(&self, dir: &Path) -> io::Result<Vec<ListedEntry>>;

    fn read_text(&self, file: &Path) -> Result<String, ReadError>;

    /// Identity used to visit each directory at most once.
    fn identity(&self, dir: &Path) -> Option<PathBuf> {
        Some(dir.to_path_buf())
    }
}

/// The real filesystem.
#[derive(Debug, Clone, Default)]
pub struct FsSource {
    follow_symlinks: bool,
    decoder: TextDecoder,
}

impl FsSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether symlinked directories are descended into
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Set the decoder used for file contents
    pub fn decoder(mut self, decoder: TextDecoder) -> Self {
        self.decoder = decoder;
        self
    }

    fn classify(&self, entry: &fs::DirEntry) -> Option<EntryKind> {
        let file_type = entry.file_type().ok()?;
        if file_type.is_dir() {
            return Some(EntryKind::Dir);
        }
        if file_type.is_file() {
            return Some(EntryKind::File);
        }
        if file_type.is_symlink() {
            // A dangling link is a file that fails to read.
            let Ok(target) = fs::metadata(entry.path()) else {
                return Some(EntryKind::File);
            };
            if target.is_dir() {
                if self.follow_symlinks {
                    return Some(EntryKind::Dir);
                }
                tracing::debug!("Not following symlinked directory {}", entry.path().display());
                return None;
            }
            if target.is_file() {
                return Some(EntryKind::File);
            }
        }
        // Sockets, FIFOs and devices are never read.
        tracing::debug!("Skipping special file {}", entry.path().display());
        None
    }
}

impl DirectorySource for FsSource {
    fn list(&self, dir: &Path) -> io::Result<Vec<ListedEntry>> {
        let mut entries: Vec<ListedEntry> = fs::read_dir(dir)?
            .filter_map(|entry| {
                let entry = entry.ok()?;
                let kind = self.classify(&entry)?;
                Some(ListedEntry {
                    name: entry.file_name().to_string_lossy().to_string(),
                    path: entry.path(),
                    kind,
                })
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read_text(&self, file: &Path) -> Result<String, ReadError> {
        read_text_file(file, &self.decoder)
    }

    fn identity(&self, dir: &Path) -> Option<PathBuf> {
        fs::canonicalize(dir).ok()
    }
}

/// An in-memory tree rooted at a virtual path.
#[derive(Debug, Default)]
pub struct MemorySource {
    root: PathBuf,
    dirs: BTreeSet<PathBuf>,
    /// `None` marks a file that fails to read.
    files: BTreeMap<PathBuf, Option<String>>,
    unlistable: BTreeSet<PathBuf>,
    listed: RefCell<Vec<PathBuf>>,
    read: RefCell<Vec<PathBuf>>,
}

impl MemorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let mut dirs = BTreeSet::new();
        dirs.insert(root.clone());
        Self { root, dirs, ..Self::default() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Add a file at a `/`-separated path relative to the root.
    pub fn with_file(mut self, relative: &str, content: &str) -> Self {
        let path = self.insert_parents(relative);
        self.files.insert(path, Some(content.to_string()));
        self
    }

    /// Add a file whose reads always fail.
    pub fn with_unreadable(mut self, relative: &str) -> Self {
        let path = self.insert_parents(relative);
        self.files.insert(path, None);
        self
    }

    /// Add an empty directory.
    pub fn with_dir(mut self, relative: &str) -> Self {
        let path = self.insert_parents(relative);
        self.dirs.insert(path);
        self
    }

    /// Add a directory whose listing always fails.
    pub fn with_unlistable(mut self, relative: &str) -> Self {
        let path = self.insert_parents(relative);
        self.dirs.insert(path.clone());
        self.unlistable.insert(path);
        self
    }

    /// Directories listed so far, in order.
    pub fn listed_dirs(&self) -> Vec<PathBuf> {
        self.listed.borrow().clone()
    }

    /// Files read so far, in order.
    pub fn read_files(&self) -> Vec<PathBuf> {
        self.read.borrow().clone()
    }

    fn insert_parents(&mut self, relative: &str) -> PathBuf {
        let path = relative
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |path, segment| path.join(segment));
        let mut parent = path.parent();
        while let Some(dir) = parent {
            if dir == self.root || !dir.starts_with(&self.root) {
                break;
            }
            self.dirs.insert(dir.to_path_buf());
            parent = dir.parent();
        }
        path
    }
}

impl DirectorySource for MemorySource {
    fn list(&self, dir: &Path) -> io::Result<Vec<ListedEntry>> {
        if !self.dirs.contains(dir) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such directory"));
        }
        if self.unlistable.contains(dir) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"));
        }
        self.listed.borrow_mut().push(dir.to_path_buf());

        let child = |path: &PathBuf, kind| {
            (path.parent() == Some(dir)).then(|| ListedEntry {
                name: path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default(),
                path: path.clone(),
                kind,
            })
        };
        let mut entries: Vec<ListedEntry> = self
            .dirs
            .iter()
            .filter_map(|path| child(path, EntryKind::Dir))
            .chain(self.files.keys().filter_map(|path| child(path, EntryKind::File)))
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read_text(&self, file: &Path) -> Result<String, ReadError> {
        self.read.borrow_mut().push(file.to_path_buf());
        match self.files.get(file) {
            Some(Some(content)) => Ok(content.clone()),
            Some(None) => Err(ReadError::Io {
                path: file.to_path_buf(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
            }),
            None => Err(ReadError::Io {
                path: file.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
            }),
        }
    }
}
