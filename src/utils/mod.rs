//! Shared helpers: path normalization and text decoding.

pub mod encoding;
pub mod paths;

pub use encoding::{read_text_file, ReadError, TextDecoder};
pub use paths::{clean_relative, join_relative, normalize_path, relative_to};
