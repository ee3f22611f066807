//! Serializing configuration trees
//!
//! A dump never fails just because the requested format cannot write: a
//! missing or parse-only backend falls back to JSON with a warning.

use crate::backend::{fallback_dumper, FormatDescriptor, Registry};
use crate::error::{Error, Result};
use crate::tree::ConfigTree;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub struct Dumper<'r> {
    registry: &'r Registry,
}

impl Default for Dumper<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Dumper<'static> {
    pub fn new() -> Self {
        Self::with_registry(Registry::builtin())
    }
}

impl<'r> Dumper<'r> {
    pub fn with_registry(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// The backend that will write `path` (or `forced_type`), after fallback.
    pub fn find_dumper(&self, path: Option<&Path>, forced_type: Option<&str>) -> &'r FormatDescriptor {
        match self.registry.resolve(path, forced_type) {
            Some(descriptor) if descriptor.can_dump() => descriptor,
            found => {
                let fallback = fallback_dumper();
                tracing::warn!(
                    "Dump method not implemented for {}. Fallback to {}",
                    found.map(FormatDescriptor::type_tag).or(forced_type).unwrap_or("unknown format"),
                    fallback.type_tag()
                );
                fallback
            }
        }
    }

    /// Serialize `tree` and write it to `path`.
    pub fn dump(&self, tree: &ConfigTree, path: &Path, forced_type: Option<&str>) -> Result<()> {
        let text = serialize_with(self.find_dumper(Some(path), forced_type), tree)?;
        tracing::debug!("Dumping: {}", path.display());
        std::fs::write(path, text).map_err(|source| Error::Dump { path: path.to_path_buf(), source })
    }

    /// Serialize `tree` as `forced_type`.
    pub fn dumps(&self, tree: &ConfigTree, forced_type: &str) -> Result<String> {
        serialize_with(self.find_dumper(None, Some(forced_type)), tree)
    }
}

fn serialize_with(descriptor: &FormatDescriptor, tree: &ConfigTree) -> Result<String> {
    descriptor
        .backend()
        .serialize(tree)
        .map_err(|source| Error::Serialize { format: descriptor.type_tag(), source })
}
