//! Where the formatted blob goes.

use anyhow::{Context, Result};
use std::path::PathBuf;

pub mod clipboard;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
    Clipboard,
}

impl Destination {
    /// Clipboard wins over an output file, which wins over stdout.
    pub fn choose(clipboard: bool, output_file: Option<PathBuf>) -> Self {
        if clipboard {
            Destination::Clipboard
        } else if let Some(path) = output_file {
            Destination::File(path)
        } else {
            Destination::Stdout
        }
    }
}

/// Send `text` to a non-stdout destination and return the confirmation line.
///
/// Stdout is written by the caller together with the summary, so for
/// [`Destination::Stdout`] this returns `None` without writing anything.
pub fn deliver(destination: &Destination, text: &str) -> Result<Option<String>> {
    match destination {
        Destination::Stdout => Ok(None),
        Destination::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Error writing to {}", path.display()))?;
            }
            std::fs::write(path, text)
                .with_context(|| format!("Error writing to {}", path.display()))?;
            Ok(Some(format!(
                "Formatted project structure has been written to {}.",
                path.display()
            )))
        }
        Destination::Clipboard => {
            clipboard::copy(text).context("Error copying to the clipboard")?;
            Ok(Some("Formatted project structure has been copied to the clipboard.".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_choose_precedence() {
        let file = Some(PathBuf::from("out.txt"));
        assert_eq!(Destination::choose(true, file.clone()), Destination::Clipboard);
        assert_eq!(Destination::choose(false, file), Destination::File(PathBuf::from("out.txt")));
        assert_eq!(Destination::choose(false, None), Destination::Stdout);
    }

    #[test]
    fn test_deliver_to_file() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("nested/out.txt");

        let message = deliver(&Destination::File(path.clone()), "=== File: a ===\nx\n")
            .expect("deliver");

        assert_eq!(std::fs::read_to_string(&path).expect("read"), "=== File: a ===\nx\n");
        assert!(message.expect("message").contains("has been written to"));
    }

    #[test]
    fn test_deliver_stdout_is_noop() {
        assert_eq!(deliver(&Destination::Stdout, "text").expect("deliver"), None);
    }
}
