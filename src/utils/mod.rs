//! Utility modules

pub mod encoding;
pub mod paths;

pub use encoding::{decode_bytes, read_config_text};
pub use paths::{has_glob_meta, normalize_path, split_glob_base};
