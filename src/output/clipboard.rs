//! Clipboard copy through the platform's clipboard command.

use std::io::{self, Write};
use std::process::{Command, Stdio};

#[cfg(target_os = "macos")]
const CANDIDATES: &[&[&str]] = &[&["pbcopy"]];

#[cfg(target_os = "windows")]
const CANDIDATES: &[&[&str]] = &[&["clip"]];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const CANDIDATES: &[&[&str]] =
    &[&["wl-copy"], &["xclip", "-selection", "clipboard"], &["xsel", "--clipboard", "--input"]];

/// Pipe `text` into the first clipboard command that exists.
pub fn copy(text: &str) -> io::Result<()> {
    for candidate in CANDIDATES {
        match pipe_into(candidate, text) {
            Ok(()) => return Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("Clipboard command {} not available", candidate[0]);
            }
            Err(err) => return Err(err),
        }
    }
    Err(io::Error::new(io::ErrorKind::NotFound, "no clipboard command found"))
}

fn pipe_into(command: &[&str], text: &str) -> io::Result<()> {
    let mut child = Command::new(command[0])
        .args(&command[1..])
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("{} exited with {}", command[0], status)))
    }
}
