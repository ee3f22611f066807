//! Glob expansion for multi-file loads
//!
//! Matches are returned sorted lexicographically by path. That order is the
//! merge order, so `conf.d/10-base.yml` is overridden by `conf.d/20-site.yml`.

use crate::error::{Error, Result};
use crate::utils::{normalize_path, split_glob_base};
use globset::GlobBuilder;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Expand `pattern` into the sorted list of files it matches.
///
/// `*` and `?` stay within one path component, `**` crosses directories.
/// A missing base directory expands to nothing.
pub fn expand(pattern: &str) -> Result<Vec<PathBuf>> {
    let normalized = normalize_path(pattern);
    let matcher = GlobBuilder::new(&normalized)
        .literal_separator(true)
        .build()
        .map_err(|source| Error::Pattern { pattern: pattern.to_string(), source })?
        .compile_matcher();

    let (base, depth) = split_glob_base(&normalized);
    let walk_root = if base.is_empty() { PathBuf::from(".") } else { PathBuf::from(&base) };
    if !walk_root.is_dir() {
        return Ok(Vec::new());
    }

    let mut walker = WalkDir::new(&walk_root).follow_links(true);
    if let Some(depth) = depth {
        walker = walker.max_depth(depth);
    }

    let mut matches: Vec<PathBuf> = walker
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| relative_to_pattern(entry.path(), base.is_empty()))
        .filter(|path| matcher.is_match(normalize_path(&path.to_string_lossy())))
        .collect();

    matches.sort();
    tracing::debug!("Pattern {} matched {} file(s)", pattern, matches.len());
    Ok(matches)
}

/// Walking `.` yields `./a.json`; a pattern like `*.json` expects `a.json`.
fn relative_to_pattern(path: &Path, walked_cwd: bool) -> PathBuf {
    if walked_cwd {
        path.strip_prefix(".").unwrap_or(path).to_path_buf()
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(path, "{}").expect("write");
    }

    fn names(root: &Path, found: &[PathBuf]) -> Vec<String> {
        found
            .iter()
            .map(|p| normalize_path(&p.strip_prefix(root).unwrap_or(p).to_string_lossy()))
            .collect()
    }

    #[test]
    fn matches_sorted_lexicographically() {
        let tmp = TempDir::new().expect("tmp");
        for name in ["b.json", "a.json", "10.json", "2.json", "c.yml"] {
            touch(tmp.path(), name);
        }
        let pattern = format!("{}/*.json", tmp.path().display());
        let found = expand(&pattern).expect("expand");
        assert_eq!(names(tmp.path(), &found), ["10.json", "2.json", "a.json", "b.json"]);
    }

    #[test]
    fn star_does_not_cross_directories() {
        let tmp = TempDir::new().expect("tmp");
        touch(tmp.path(), "top.json");
        touch(tmp.path(), "nested/deep.json");

        let shallow = expand(&format!("{}/*.json", tmp.path().display())).expect("expand");
        assert_eq!(names(tmp.path(), &shallow), ["top.json"]);

        let deep = expand(&format!("{}/**/*.json", tmp.path().display())).expect("expand");
        assert_eq!(names(tmp.path(), &deep), ["nested/deep.json", "top.json"]);
    }

    #[test]
    fn repeated_separators_still_match() {
        let tmp = TempDir::new().expect("tmp");
        touch(tmp.path(), "a.json");
        touch(tmp.path(), "nested/b.json");

        let found = expand(&format!("{}//*.json", tmp.path().display())).expect("expand");
        assert_eq!(names(tmp.path(), &found), ["a.json"]);

        let deep = expand(&format!("{}//nested///*.json", tmp.path().display())).expect("expand");
        assert_eq!(names(tmp.path(), &deep), ["nested/b.json"]);
    }

    #[test]
    fn missing_base_directory_matches_nothing() {
        let tmp = TempDir::new().expect("tmp");
        let found = expand(&format!("{}/absent/*.json", tmp.path().display())).expect("expand");
        assert!(found.is_empty());
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = expand("conf.d/[unclosed.json").unwrap_err();
        assert!(matches!(err, Error::Pattern { .. }));
    }
}
