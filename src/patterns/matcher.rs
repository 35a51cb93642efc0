//! Exclusion matching
//!
//! A pattern excludes a root-relative path when any of three tests passes:
//!
//! - directory-suffix: the entry is a directory, the pattern ends in `/`,
//!   and `path + "/"` matches it;
//! - file: the entry is a file and the whole path matches;
//! - segment: any single `/`-separated segment of the path matches.
//!
//! The segment test is what lets a bare `build` exclude an entry named
//! `build` at any depth. Patterns containing `/` can never pass it.

use std::fmt;

use super::{Pattern, PatternSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTest {
    DirectorySuffix,
    File,
    Segment,
}

impl fmt::Display for MatchTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchTest::DirectorySuffix => "directory-suffix",
            MatchTest::File => "file",
            MatchTest::Segment => "segment",
        };
        f.write_str(name)
    }
}

/// The first pattern that excluded a path, and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclusion {
    pub pattern: String,
    pub test: MatchTest,
    /// The matching segment, for [`MatchTest::Segment`].
    pub segment: Option<String>,
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.segment {
            Some(segment) => {
                write!(f, "pattern '{}' ({} test on '{}')", self.pattern, self.test, segment)
            }
            None => write!(f, "pattern '{}' ({} test)", self.pattern, self.test),
        }
    }
}

/// Whether `path` (relative to the scan root, `/`-separated) is excluded.
pub fn is_excluded(path: &str, patterns: &PatternSet, is_dir: bool) -> bool {
    explain(path, patterns, is_dir).is_some()
}

/// Like [`is_excluded`], but reports the winning pattern and test.
pub fn explain(path: &str, patterns: &PatternSet, is_dir: bool) -> Option<Exclusion> {
    patterns.iter().find_map(|pattern| match_pattern(pattern, path, is_dir))
}

fn match_pattern(pattern: &Pattern, path: &str, is_dir: bool) -> Option<Exclusion> {
    let found = |test, segment: Option<&str>| Exclusion {
        pattern: pattern.as_str().to_string(),
        test,
        segment: segment.map(str::to_string),
    };

    if is_dir && pattern.is_dir_pattern() && pattern.matches(&format!("{}/", path)) {
        return Some(found(MatchTest::DirectorySuffix, None));
    }
    if !is_dir && pattern.matches(path) {
        return Some(found(MatchTest::File, None));
    }
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .find(|segment| pattern.matches(segment))
        .map(|segment| found(MatchTest::Segment, Some(segment)))
}
