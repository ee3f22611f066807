//! anyconf: load, merge and dump configuration files in any common format
//!
//! Configuration is assembled from one or more files (JSON, YAML, TOML, INI,
//! XML, Java properties), each parsed into a [`ConfigTree`] by the backend its
//! extension (or a forced type) selects, then folded together under a
//! [`MergeStrategy`]. Trees can be written back out in any format that has a
//! writer; formats without one fall back to JSON.
//!
//! ```no_run
//! use anyconf::MergeStrategy;
//!
//! let config = anyconf::load("conf.d/*.yml", None, MergeStrategy::MergeMapsAndSequences)?;
//! anyconf::dump(&config, "merged.toml".as_ref(), None)?;
//! # Ok::<(), anyconf::Error>(())
//! ```

pub mod backend;
pub mod dump;
pub mod error;
pub mod literal;
pub mod load;
pub mod merge;
pub mod tree;
pub mod utils;

pub use backend::{Backend, Capabilities, FormatDescriptor, Registry};
pub use dump::Dumper;
pub use error::{Error, Result};
pub use load::{Loader, PathSpec};
pub use merge::{merge, merge_trees, MergeStrategy};
pub use tree::{ConfigTree, Mapping};

use std::path::Path;

/// Load one file, a list of files, or a glob pattern, merging in order.
pub fn load(
    path_spec: impl Into<PathSpec>,
    forced_type: Option<&str>,
    strategy: MergeStrategy,
) -> Result<ConfigTree> {
    Loader::new().forced_type(forced_type).strategy(strategy).load(path_spec)
}

/// Load exactly one file.
pub fn single_load(path: &Path, forced_type: Option<&str>) -> Result<ConfigTree> {
    Loader::new().forced_type(forced_type).load_single(path)
}

/// Load several files (or a pattern) and merge them in order.
pub fn multi_load(
    paths: impl Into<PathSpec>,
    forced_type: Option<&str>,
    strategy: MergeStrategy,
) -> Result<ConfigTree> {
    Loader::new().forced_type(forced_type).strategy(strategy).load_many(&paths.into())
}

/// Parse in-memory content.
pub fn loads(content: &str, forced_type: Option<&str>) -> Result<ConfigTree> {
    Loader::new().forced_type(forced_type).loads(content)
}

/// Write `tree` to `path`, in `forced_type` or the format the extension names.
pub fn dump(tree: &ConfigTree, path: &Path, forced_type: Option<&str>) -> Result<()> {
    Dumper::new().dump(tree, path, forced_type)
}

/// Serialize `tree` as `forced_type`.
pub fn dumps(tree: &ConfigTree, forced_type: &str) -> Result<String> {
    Dumper::new().dumps(tree, forced_type)
}

/// Type tags of every built-in format, in registration order.
pub fn list_supported_types() -> Vec<&'static str> {
    Registry::builtin().list_types()
}
