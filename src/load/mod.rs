//! Loading configuration from one or many files
//!
//! A [`PathSpec`] names the sources; the [`Loader`] resolves each file to a
//! backend through the [`Registry`], parses it, and folds the results through
//! the merge engine in path order.

pub mod glob;

use crate::backend::Registry;
use crate::error::{Error, Result};
use crate::literal;
use crate::merge::{merge_trees, MergeStrategy};
use crate::tree::ConfigTree;
use crate::utils::{has_glob_meta, read_config_text};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Which files to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSpec {
    /// One file.
    Single(PathBuf),
    /// Files in merge order; later entries override earlier ones.
    List(Vec<PathBuf>),
    /// A glob pattern, expanded in lexicographic path order.
    Pattern(String),
}

impl PathSpec {
    /// The concrete, ordered list of files named here.
    pub fn resolve(&self) -> Result<Vec<PathBuf>> {
        match self {
            PathSpec::Single(path) => Ok(vec![path.clone()]),
            PathSpec::List(paths) => Ok(paths.clone()),
            PathSpec::Pattern(pattern) => glob::expand(pattern),
        }
    }

    /// This path spec as a single existing file, if it names one.
    fn as_existing_path(&self) -> Option<&Path> {
        let path = match self {
            PathSpec::Single(path) => path.as_path(),
            PathSpec::Pattern(pattern) => Path::new(pattern),
            PathSpec::List(_) => return None,
        };
        path.exists().then_some(path)
    }
}

impl From<&str> for PathSpec {
    fn from(spec: &str) -> Self {
        if has_glob_meta(spec) {
            PathSpec::Pattern(spec.to_string())
        } else {
            PathSpec::Single(PathBuf::from(spec))
        }
    }
}

impl From<String> for PathSpec {
    fn from(spec: String) -> Self {
        PathSpec::from(spec.as_str())
    }
}

impl From<&Path> for PathSpec {
    fn from(path: &Path) -> Self {
        PathSpec::Single(path.to_path_buf())
    }
}

impl From<PathBuf> for PathSpec {
    fn from(path: PathBuf) -> Self {
        PathSpec::Single(path)
    }
}

impl<P: Into<PathBuf>> From<Vec<P>> for PathSpec {
    fn from(paths: Vec<P>) -> Self {
        PathSpec::List(paths.into_iter().map(Into::into).collect())
    }
}

/// Loads and merges configuration files.
///
/// ```no_run
/// use anyconf::{Loader, MergeStrategy};
///
/// let config = Loader::new()
///     .strategy(MergeStrategy::MergeMaps)
///     .load("/etc/app/conf.d/*.yml")?;
/// # Ok::<(), anyconf::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Loader<'r> {
    registry: &'r Registry,
    forced_type: Option<String>,
    strategy: MergeStrategy,
    parallel: bool,
}

impl Default for Loader<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader<'static> {
    /// A loader over the built-in formats.
    pub fn new() -> Self {
        Self::with_registry(Registry::builtin())
    }
}

impl<'r> Loader<'r> {
    pub fn with_registry(registry: &'r Registry) -> Self {
        Self { registry, forced_type: None, strategy: MergeStrategy::default(), parallel: false }
    }

    /// Parse every file as this type instead of going by extension.
    pub fn forced_type(mut self, forced_type: Option<&str>) -> Self {
        self.forced_type = forced_type.map(str::to_string);
        self
    }

    pub fn strategy(mut self, strategy: MergeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Read and parse files on the rayon pool. Merging still happens in path order.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Load one file.
    pub fn load_single(&self, path: &Path) -> Result<ConfigTree> {
        let descriptor = self
            .registry
            .resolve(Some(path), self.forced_type.as_deref())
            .ok_or_else(|| Error::unsupported(Some(path), self.forced_type.as_deref()))?;

        tracing::debug!("Loading: {}", path.display());
        let content = read_config_text(path)
            .map_err(|source| Error::Load { path: path.to_path_buf(), source })?;

        descriptor.backend().parse(&content).map_err(|source| Error::Parse {
            path: Some(path.to_path_buf()),
            format: descriptor.type_tag(),
            source,
        })
    }

    /// Load every file named by `spec` and merge them in order.
    ///
    /// Starts from an empty mapping, so a pattern matching nothing yields `{}`.
    pub fn load_many(&self, spec: &PathSpec) -> Result<ConfigTree> {
        let paths = spec.resolve()?;
        if paths.is_empty() {
            tracing::warn!("No configuration files found for {:?}", spec);
        }

        let mut merged = ConfigTree::empty_mapping();
        if self.parallel && paths.len() > 1 {
            let loaded: Vec<Result<ConfigTree>> = paths.par_iter().map(|p| self.load_single(p)).collect();
            for tree in loaded {
                merged = merge_trees(merged, tree?, self.strategy);
            }
        } else {
            for path in &paths {
                merged = merge_trees(merged, self.load_single(path)?, self.strategy);
            }
        }
        Ok(merged)
    }

    /// Load a single existing file directly, anything else through [`Loader::load_many`].
    pub fn load(&self, spec: impl Into<PathSpec>) -> Result<ConfigTree> {
        let spec = spec.into();
        match spec.as_existing_path() {
            Some(path) => self.load_single(path),
            None => self.load_many(&spec),
        }
    }

    /// Parse in-memory content.
    ///
    /// With a forced type the content goes through that backend; without one
    /// it is read as a literal expression (see [`crate::literal`]). An unknown
    /// forced type is [`Error::UnsupportedFormat`] rather than a silent
    /// fallback to literal parsing, so a typo in the type is never mistaken
    /// for literal input.
    pub fn loads(&self, content: &str) -> Result<ConfigTree> {
        let Some(forced_type) = self.forced_type.as_deref() else {
            return Ok(literal::parse(content));
        };
        let descriptor = self
            .registry
            .resolve(None, Some(forced_type))
            .ok_or_else(|| Error::unsupported(None, Some(forced_type)))?;

        descriptor.backend().parse(content).map_err(|source| Error::Parse {
            path: None,
            format: descriptor.type_tag(),
            source,
        })
    }
}
