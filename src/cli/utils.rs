//! Shared CLI utilities.

use anyconf::{literal, ConfigTree, Mapping};
use anyhow::Result;

/// Turn `a.b.c=value` into `{a: {b: {c: value}}}`, parsing the value as a literal.
pub fn parse_override(assignment: &str) -> Result<ConfigTree> {
    let Some((key, value)) = assignment.split_once('=') else {
        anyhow::bail!("Invalid --set '{}': expected KEY=VALUE", assignment);
    };
    let key = key.trim();
    if key.is_empty() || key.split('.').any(str::is_empty) {
        anyhow::bail!("Invalid --set key '{}'", key);
    }

    let leaf = literal::parse(value);
    Ok(key.rsplit('.').fold(leaf, |inner, part| {
        let mut map = Mapping::new();
        map.insert(part.to_string(), inner);
        ConfigTree::Mapping(map)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_keys_nest() {
        let tree = parse_override("server.tls.port=8443").expect("override");
        assert_eq!(tree.get_path("server.tls.port"), Some(&ConfigTree::Integer(8443)));
    }

    #[test]
    fn value_may_contain_equals() {
        let tree = parse_override("query=a=b").expect("override");
        assert_eq!(tree.get("query").and_then(ConfigTree::as_str), Some("a=b"));
    }

    #[test]
    fn rejects_malformed_assignments() {
        assert!(parse_override("novalue").is_err());
        assert!(parse_override("=1").is_err());
        assert!(parse_override("a..b=1").is_err());
    }
}
