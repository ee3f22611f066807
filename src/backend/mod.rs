//! Format backends and the registry that dispatches to them
//!
//! A [`FormatDescriptor`] ties a type tag and a set of file extensions to a
//! [`Backend`]. The [`Registry`] answers "which backend handles this file or
//! this type"; registration order breaks ties between descriptors claiming
//! the same extension.

use crate::error::BoxError;
use crate::tree::ConfigTree;
use once_cell::sync::Lazy;
use std::fmt;
use std::path::Path;

pub mod ini;
pub mod json;
pub mod properties;
pub mod toml;
pub mod xml;
pub mod yaml;

/// Parse and (optionally) serialize one configuration format.
pub trait Backend: Send + Sync {
    fn parse(&self, content: &str) -> Result<ConfigTree, BoxError>;

    /// Only called when the owning descriptor advertises `can_dump`.
    fn serialize(&self, _tree: &ConfigTree) -> Result<String, BoxError> {
        Err("serialization is not implemented for this format".into())
    }
}

/// What a registered format is able to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub can_parse: bool,
    pub can_dump: bool,
}

impl Capabilities {
    pub const PARSE_ONLY: Capabilities = Capabilities { can_parse: true, can_dump: false };
    pub const PARSE_AND_DUMP: Capabilities = Capabilities { can_parse: true, can_dump: true };
}

pub struct FormatDescriptor {
    type_tag: &'static str,
    extensions: &'static [&'static str],
    capabilities: Capabilities,
    backend: Box<dyn Backend>,
}

impl FormatDescriptor {
    /// Extensions are matched case-insensitively and must be given without a dot.
    pub fn new(
        type_tag: &'static str,
        extensions: &'static [&'static str],
        capabilities: Capabilities,
        backend: impl Backend + 'static,
    ) -> Self {
        Self { type_tag, extensions, capabilities, backend: Box::new(backend) }
    }

    pub fn type_tag(&self) -> &'static str {
        self.type_tag
    }

    pub fn extensions(&self) -> &'static [&'static str] {
        self.extensions
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn can_dump(&self) -> bool {
        self.capabilities.can_dump
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    fn claims_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|candidate| candidate.eq_ignore_ascii_case(ext))
    }
}

impl fmt::Debug for FormatDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatDescriptor")
            .field("type_tag", &self.type_tag)
            .field("extensions", &self.extensions)
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}

impl PartialEq for FormatDescriptor {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

static BUILTIN: Lazy<Registry> = Lazy::new(Registry::with_builtin_formats);

/// Ordered set of format descriptors.
///
/// The process-wide [`Registry::builtin`] instance is populated once and never
/// mutated afterwards, so lookups need no locking.
#[derive(Debug, Default)]
pub struct Registry {
    descriptors: Vec<FormatDescriptor>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared registry holding every built-in format.
    pub fn builtin() -> &'static Registry {
        &BUILTIN
    }

    /// A fresh registry with the built-in formats, in their canonical order.
    pub fn with_builtin_formats() -> Self {
        let mut registry = Self::new();
        registry.register(json::descriptor());
        registry.register(yaml::descriptor());
        registry.register(toml::descriptor());
        registry.register(ini::descriptor());
        registry.register(xml::descriptor());
        registry.register(properties::descriptor());
        registry
    }

    /// Append a descriptor. Earlier registrations win extension ties.
    pub fn register(&mut self, descriptor: FormatDescriptor) -> &mut Self {
        self.descriptors.push(descriptor);
        self
    }

    /// Exact, case-sensitive lookup by type tag.
    pub fn find_by_type(&self, tag: &str) -> Option<&FormatDescriptor> {
        self.descriptors.iter().find(|d| d.type_tag == tag)
    }

    /// Lookup by the text after the last `.` of the file name.
    pub fn find_by_extension(&self, path: impl AsRef<Path>) -> Option<&FormatDescriptor> {
        let ext = file_suffix(path.as_ref())?;
        self.descriptors.iter().find(|d| d.claims_extension(&ext))
    }

    /// A forced type takes priority over the path's extension. Never fails;
    /// the caller decides what a missing backend means.
    pub fn resolve(&self, path: Option<&Path>, forced_type: Option<&str>) -> Option<&FormatDescriptor> {
        let found = match (forced_type, path) {
            (Some(tag), _) => self.find_by_type(tag),
            (None, Some(path)) => self.find_by_extension(path),
            (None, None) => None,
        };

        match found {
            Some(descriptor) => tracing::debug!("Using config parser: {}", descriptor.type_tag),
            None => match forced_type {
                Some(tag) => tracing::error!("No parser found for given type: {}", tag),
                None => tracing::error!(
                    "No parser found for given file: {}",
                    path.map(|p| p.display().to_string()).unwrap_or_default()
                ),
            },
        }
        found
    }

    /// Registered type tags, in registration order.
    pub fn list_types(&self) -> Vec<&'static str> {
        self.descriptors.iter().map(|d| d.type_tag).collect()
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &FormatDescriptor> {
        self.descriptors.iter()
    }
}

/// Lowercased text after the final `.` of the file name, if any.
fn file_suffix(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let (_, suffix) = name.rsplit_once('.')?;
    if suffix.is_empty() {
        return None;
    }
    Some(suffix.to_ascii_lowercase())
}

/// Always-available format used when a requested dump format cannot serialize.
pub(crate) fn fallback_dumper() -> &'static FormatDescriptor {
    static FALLBACK: Lazy<FormatDescriptor> = Lazy::new(json::descriptor);
    &FALLBACK
}
