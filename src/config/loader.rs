//! Settings file discovery and layering

use anyhow::{Context, Result};
use anyconf::MergeStrategy;
use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "ANYCONF_";

/// Defaults for the `merge` command.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Merge strategy token (`replace`, `merge_dicts`, `merge_dicts_and_lists`)
    pub merge: MergeStrategy,
    /// Parse every input as this type
    pub input_type: Option<String>,
    /// Write output in this type
    pub output_type: Option<String>,
    /// Parse inputs in parallel
    pub parallel: bool,
}

/// Build settings from defaults, a settings file and the environment.
///
/// An explicit `settings_path` that fails to load is an error. An
/// auto-discovered one only warns and falls back to defaults plus env.
pub fn load_settings(cwd: &Path, settings_path: Option<&Path>) -> Result<Settings> {
    let explicit = settings_path.is_some();
    let discovered = match settings_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_settings(cwd),
    };

    let base = Figment::from(Serialized::defaults(Settings::default()));
    let Some(settings_file) = discovered else {
        return extract(base);
    };

    if explicit && !settings_file.exists() {
        anyhow::bail!("Settings file not found: {}", settings_file.display());
    }

    let ext = settings_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    let with_file = match ext.as_str() {
        "toml" => base.clone().merge(Toml::file(&settings_file)),
        "yaml" | "yml" => base.clone().merge(Yaml::file(&settings_file)),
        other => {
            let err = anyhow::anyhow!(
                "Unsupported settings extension '.{}' for file {}",
                other,
                settings_file.display()
            );
            if explicit {
                return Err(err);
            }
            tracing::warn!("{}", err);
            return extract(base);
        }
    };

    match extract(with_file) {
        Ok(settings) => Ok(settings),
        Err(e) if !explicit => {
            tracing::warn!(
                "Failed to parse auto-discovered settings {}: {:#}",
                settings_file.display(),
                e
            );
            extract(base)
        }
        Err(e) => Err(e).with_context(|| format!("Invalid settings file: {}", settings_file.display())),
    }
}

fn extract(figment: Figment) -> Result<Settings> {
    figment
        .merge(Env::prefixed(ENV_PREFIX))
        .extract::<Settings>()
        .context("Failed to resolve anyconf settings")
}

fn discover_settings(cwd: &Path) -> Option<PathBuf> {
    let candidates = [
        "anyconf.toml",
        ".anyconf.toml",
        "anyconf.yaml",
        ".anyconf.yaml",
        "anyconf.yml",
        ".anyconf.yml",
    ];

    candidates.iter().map(|candidate| cwd.join(candidate)).find(|path| path.exists())
}
