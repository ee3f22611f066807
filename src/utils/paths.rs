//! Path normalization and glob pattern helpers

const GLOB_META: [char; 4] = ['*', '?', '[', '{'];

pub fn normalize_path(path: &str) -> String {
    // Forward slashes only, and `a//b` is `a/b`
    let mut normalized = String::with_capacity(path.len());
    for ch in path.chars().map(|c| if c == '\\' { '/' } else { c }) {
        if ch == '/' && normalized.ends_with('/') {
            continue;
        }
        normalized.push(ch);
    }
    normalized
}

pub fn has_glob_meta(text: &str) -> bool {
    text.contains(GLOB_META)
}

/// Split a normalized pattern into its literal directory prefix and the
/// component count of the remainder (`None` when `**` allows any depth).
///
/// `conf.d/*.yml` → `("conf.d", Some(1))`, `*.json` → `("", Some(1))`,
/// `/etc/app/**/*.toml` → `("/etc/app", None)`.
pub fn split_glob_base(pattern: &str) -> (String, Option<usize>) {
    let components: Vec<&str> = pattern.split('/').collect();
    let literal_len = components
        .iter()
        .position(|c| has_glob_meta(c))
        .unwrap_or(components.len().saturating_sub(1));

    let base = components[..literal_len].join("/");
    let base = if base.is_empty() && pattern.starts_with('/') { "/".to_string() } else { base };

    let rest = &components[literal_len..];
    let depth = if rest.iter().any(|c| c.contains("**")) { None } else { Some(rest.len()) };
    (base, depth)
}
