//! Gitignore-style file parsing

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Trimmed, non-blank, non-comment lines in file order.
pub fn parse_ignore_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Read an ignore file. A missing file gives `None`; an unreadable one is
/// logged and treated as missing.
pub fn read_ignore_file(path: &Path) -> Option<Vec<String>> {
    if !path.is_file() {
        return None;
    }
    match fs::read(path) {
        Ok(bytes) => Some(parse_ignore_lines(&String::from_utf8_lossy(&bytes))),
        Err(err) if err.kind() == ErrorKind::NotFound => None,
        Err(err) => {
            tracing::warn!("Failed to read ignore file {}: {}", path.display(), err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_skips_blank_and_comments() {
        let lines = parse_ignore_lines("# comment\n\n   \n*.pyc\n  build/  \n  # indented comment\r\nnode_modules\r\n");
        assert_eq!(lines, vec!["*.pyc", "build/", "node_modules"]);
    }

    #[test]
    fn test_missing_file_is_none() {
        let tmp = TempDir::new().expect("tmp");
        assert!(read_ignore_file(&tmp.path().join(".gitignore")).is_none());
    }

    #[test]
    fn test_directory_named_like_ignore_file_is_none() {
        let tmp = TempDir::new().expect("tmp");
        std::fs::create_dir(tmp.path().join(".gitignore")).expect("mkdir");
        assert!(read_ignore_file(&tmp.path().join(".gitignore")).is_none());
    }
}
