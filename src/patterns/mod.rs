//! Exclusion pattern sets
//!
//! A [`PatternSet`] is the ordered list of shell-style patterns a walk is
//! filtered against: the baseline, then the root's ignore file, then any
//! caller-supplied additions. There is no negation, so order only decides
//! which pattern gets reported as the match.

use globset::{GlobBuilder, GlobMatcher};
use std::path::{Path, PathBuf};

pub mod ignore_file;
pub mod matcher;

pub use matcher::{explain, is_excluded, Exclusion, MatchTest};

pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";

/// Directories excluded no matter what the ignore file says: version
/// control metadata and the usual virtualenv names. The ignore file's own
/// name is appended to these by the builder.
pub const BASELINE_PATTERNS: &[&str] = &[".git/", "venv/", "ENV/", "env/", "env.bak/", "venv.bak/"];

/// A single pattern with its compiled wildcard matcher.
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    glob: Option<GlobMatcher>,
}

impl Pattern {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let glob = compile_wildcard(&raw);
        Self { raw, glob }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Patterns ending in `/` only apply to directories under the suffix test.
    pub fn is_dir_pattern(&self) -> bool {
        self.raw.ends_with('/')
    }

    /// Shell-style match of the whole `candidate`. Malformed patterns never match.
    pub fn matches(&self, candidate: &str) -> bool {
        self.glob.as_ref().is_some_and(|glob| glob.is_match(candidate))
    }
}

/// Compile with fnmatch semantics: `*` crosses `/`, backslash is literal,
/// braces are literal, `**` is just `*`.
fn compile_wildcard(raw: &str) -> Option<GlobMatcher> {
    if raw.is_empty() {
        return None;
    }
    GlobBuilder::new(&fnmatch_to_glob(raw))
        .literal_separator(false)
        .backslash_escape(false)
        .build()
        .ok()
        .map(|glob| glob.compile_matcher())
}

/// Rewrite the parts of an fnmatch pattern globset reads differently.
///
/// Outside classes, runs of `*` collapse to one `*` (no recursive `**`) and
/// `{`/`}` become one-character classes (no alternation). Inside a class a
/// leading `^` is moved so it stays a literal instead of negating.
fn fnmatch_to_glob(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' => {
                out.push('*');
                while chars.get(i + 1) == Some(&'*') {
                    i += 1;
                }
            }
            '{' => out.push_str("[{]"),
            '}' => out.push_str("[}]"),
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    out.push_str(&rewrite_class(&chars[i + 1..end]));
                    i = end;
                }
                // Unclosed: left for globset to reject.
                None => out.push('['),
            },
            c => out.push(c),
        }
        i += 1;
    }
    out
}

/// Index of the `]` closing the class opened at `start`. A `]` right after
/// `[` or `[!` belongs to the class.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start + 1;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    (j..chars.len()).find(|&k| chars[k] == ']')
}

fn rewrite_class(body: &[char]) -> String {
    let body: String = body.iter().collect();
    let Some(rest) = body.strip_prefix('^') else {
        return format!("[{}]", body);
    };
    if rest.is_empty() {
        return "^".to_string();
    }
    // Keep a trailing `-` last so `^` does not start a range.
    match rest.strip_suffix('-') {
        Some(head) => format!("[{}^-]", head),
        None => format!("[{}^]", rest),
    }
}

/// Ordered, immutable set of exclusion patterns.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// Baseline + `<root>/.gitignore` + `extra`.
    pub fn build(root: &Path, extra: &[String]) -> Self {
        PatternSetBuilder::new(root).extra(extra.iter().cloned()).build()
    }

    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { patterns: patterns.into_iter().map(Pattern::new).collect() }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pattern> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn as_strings(&self) -> Vec<&str> {
        self.patterns.iter().map(Pattern::as_str).collect()
    }
}

impl<'a> IntoIterator for &'a PatternSet {
    type Item = &'a Pattern;
    type IntoIter = std::slice::Iter<'a, Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Builder for [`PatternSet`] with an overridable baseline and ignore-file name.
pub struct PatternSetBuilder {
    root: PathBuf,
    ignore_file: String,
    baseline: Vec<String>,
    extra: Vec<String>,
}

impl PatternSetBuilder {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            ignore_file: DEFAULT_IGNORE_FILE.to_string(),
            baseline: BASELINE_PATTERNS.iter().map(|s| s.to_string()).collect(),
            extra: Vec::new(),
        }
    }

    /// Set the name of the ignore file read from the root
    pub fn ignore_file(mut self, name: impl Into<String>) -> Self {
        self.ignore_file = name.into();
        self
    }

    /// Replace the baseline directory patterns
    pub fn baseline<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.baseline = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Append caller-supplied patterns, applied after the ignore file
    pub fn extra<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> PatternSet {
        let mut raw = self.baseline;
        raw.push(self.ignore_file.clone());

        let ignore_path = self.root.join(&self.ignore_file);
        if let Some(lines) = ignore_file::read_ignore_file(&ignore_path) {
            raw.extend(lines);
        }
        raw.extend(self.extra);

        tracing::info!("{} patterns: {:?}", self.ignore_file, raw);
        PatternSet::from_patterns(raw)
    }
}
