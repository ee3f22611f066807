//! CLI settings loading
//!
//! Defaults are layered as CLI > Env (`ANYCONF_*`) > settings file > built-ins.

pub mod loader;

pub use loader::load_settings;
