//! Utility functions

pub mod path;

pub use path::{expand_tilde, final_segment, normalize_path};
