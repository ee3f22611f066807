//! Literal expressions for untyped input
//!
//! `loads` without a format and `--set key=value` overrides read their text
//! through [`parse`]:
//!
//! - `a:1,2;b:x` → `{a: [1, 2], b: "x"}`
//! - `1,2,x` → `[1, 2, "x"]`
//! - `true` / `42` / `1.5` / `'quoted'` / anything else → a scalar

use crate::tree::{ConfigTree, Mapping};
use once_cell::sync::Lazy;
use regex::Regex;

static ATTR_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([A-Za-z_][\w.-]*)\s*:(.*)$").expect("valid attr regex"));
static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-+]?(0|[1-9]\d*)$").expect("valid int regex"));
static FLOAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-+]?\d+\.\d+([eE][-+]?\d+)?$").expect("valid float regex"));
static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^(['"])(.*)(['"])$"#).expect("valid quote regex"));

pub fn parse(text: &str) -> ConfigTree {
    let text = text.trim();
    if QUOTED.is_match(text) {
        return parse_scalar(text);
    }
    if let Some(attrs) = parse_attr_list(text) {
        return attrs;
    }
    if text.contains(',') {
        return parse_list(text);
    }
    parse_scalar(text)
}

fn parse_attr_list(text: &str) -> Option<ConfigTree> {
    let mut map = Mapping::new();
    for segment in text.split(';').filter(|s| !s.trim().is_empty()) {
        let caps = ATTR_SEGMENT.captures(segment)?;
        if caps[2].starts_with("//") {
            return None;
        }
        let value = caps[2].trim();
        let value = if value.contains(',') { parse_list(value) } else { parse_scalar(value) };
        map.insert(caps[1].to_string(), value);
    }
    if map.is_empty() {
        None
    } else {
        Some(ConfigTree::Mapping(map))
    }
}

fn parse_list(text: &str) -> ConfigTree {
    ConfigTree::Sequence(
        text.split(',').map(str::trim).filter(|part| !part.is_empty()).map(parse_scalar).collect(),
    )
}

pub fn parse_scalar(text: &str) -> ConfigTree {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") {
        return ConfigTree::Bool(true);
    }
    if text.eq_ignore_ascii_case("false") {
        return ConfigTree::Bool(false);
    }
    if INTEGER.is_match(text) {
        if let Ok(i) = text.parse::<i64>() {
            return ConfigTree::Integer(i);
        }
    }
    if FLOAT.is_match(text) {
        if let Ok(f) = text.parse::<f64>() {
            return ConfigTree::Float(f);
        }
    }
    if let Some(caps) = QUOTED.captures(text) {
        if caps[1] == caps[3] {
            return ConfigTree::from(&caps[2]);
        }
    }
    ConfigTree::from(text)
}
