//! Output rendering (labeled blob, tree, reports)

pub mod blob;
pub mod report;
pub mod tree;

pub use blob::render_blob;
pub use report::{summary_report, write_report};
pub use tree::generate_tree;
