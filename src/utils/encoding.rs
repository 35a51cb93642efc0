//! Text reading with strict decoding and binary detection.
//!
//! Files are decoded exactly as written: invalid sequences are a read
//! failure rather than being replaced, so the formatted output never
//! contains mangled content.

use encoding_rs::{Encoding, UTF_8};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_SAMPLE_SIZE: usize = 8192;

/// Why a file could not be turned into text.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} looks like a binary file", path.display())]
    Binary { path: PathBuf },

    #[error("{} is not valid {encoding}", path.display())]
    Decode { path: PathBuf, encoding: &'static str },
}

/// Decoder for one text encoding, UTF-8 unless configured otherwise.
#[derive(Debug, Clone, Copy)]
pub struct TextDecoder {
    encoding: &'static Encoding,
}

impl Default for TextDecoder {
    fn default() -> Self {
        Self { encoding: UTF_8 }
    }
}

impl TextDecoder {
    /// Resolve an encoding label such as `latin1` or `utf-16le`.
    pub fn for_label(label: &str) -> Option<Self> {
        Encoding::for_label(label.trim().as_bytes()).map(|encoding| Self { encoding })
    }

    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Decode `bytes` read from `path`.
    ///
    /// ASCII-compatible encodings treat a NUL byte in the leading sample as
    /// proof of binary content.
    pub fn decode(&self, path: &Path, bytes: Vec<u8>) -> Result<String, ReadError> {
        if self.encoding.is_ascii_compatible() && is_binary_content(&bytes, DEFAULT_SAMPLE_SIZE) {
            return Err(ReadError::Binary { path: path.to_path_buf() });
        }

        if self.encoding == UTF_8 {
            return String::from_utf8(bytes).map_err(|_| ReadError::Decode {
                path: path.to_path_buf(),
                encoding: self.name(),
            });
        }

        self.encoding
            .decode_without_bom_handling_and_without_replacement(&bytes)
            .map(|text| text.into_owned())
            .ok_or_else(|| ReadError::Decode { path: path.to_path_buf(), encoding: self.name() })
    }
}

/// Check the first `sample_size` bytes for a NUL byte.
pub fn is_binary_content(bytes: &[u8], sample_size: usize) -> bool {
    let sample = &bytes[..bytes.len().min(sample_size)];
    sample.contains(&0)
}

/// Read a whole file as text.
///
/// The handle is dropped before decoding starts.
pub fn read_text_file(path: &Path, decoder: &TextDecoder) -> Result<String, ReadError> {
    let bytes =
        std::fs::read(path).map_err(|source| ReadError::Io { path: path.to_path_buf(), source })?;
    decoder.decode(path, bytes)
}
