//! XML backend (quick-xml), parse only
//!
//! Each element becomes `{tag: {"attrs": {...}, "text": "...", "children": [...]}}`;
//! empty parts are omitted. There is no writer: dumping XML falls back to the
//! default format.

use super::{Backend, Capabilities, FormatDescriptor};
use crate::error::BoxError;
use crate::tree::{ConfigTree, Mapping};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

pub struct XmlBackend;

pub fn descriptor() -> FormatDescriptor {
    FormatDescriptor::new("xml", &["xml"], Capabilities::PARSE_ONLY, XmlBackend)
}

#[derive(Default)]
struct Element {
    tag: String,
    attrs: Mapping,
    text: String,
    children: Vec<ConfigTree>,
}

impl Element {
    fn open(start: &BytesStart<'_>) -> Result<Self, BoxError> {
        let mut attrs = Mapping::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            attrs.insert(key, ConfigTree::String(attr.unescape_value()?.into_owned()));
        }
        Ok(Self {
            tag: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            attrs,
            ..Self::default()
        })
    }

    fn into_tree(self) -> ConfigTree {
        let mut body = Mapping::new();
        if !self.attrs.is_empty() {
            body.insert("attrs".to_string(), ConfigTree::Mapping(self.attrs));
        }
        let text = self.text.trim();
        if !text.is_empty() {
            body.insert("text".to_string(), ConfigTree::from(text));
        }
        if !self.children.is_empty() {
            body.insert("children".to_string(), ConfigTree::Sequence(self.children));
        }
        let mut node = Mapping::new();
        node.insert(self.tag, ConfigTree::Mapping(body));
        ConfigTree::Mapping(node)
    }
}

impl Backend for XmlBackend {
    fn parse(&self, content: &str) -> Result<ConfigTree, BoxError> {
        let mut reader = Reader::from_str(content);
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<ConfigTree> = None;

        loop {
            let finished = match reader.read_event()? {
                Event::Start(start) => {
                    stack.push(Element::open(&start)?);
                    None
                }
                Event::Empty(start) => Some(Element::open(&start)?.into_tree()),
                Event::End(_) => {
                    let element = stack.pop().ok_or("unexpected closing tag")?;
                    Some(element.into_tree())
                }
                Event::Text(text) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&text.unescape()?);
                    }
                    None
                }
                Event::CData(data) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                    }
                    None
                }
                Event::Eof => break,
                _ => None,
            };

            if let Some(tree) = finished {
                match stack.last_mut() {
                    Some(parent) => parent.children.push(tree),
                    None if root.is_none() => root = Some(tree),
                    None => return Err("multiple root elements".into()),
                }
            }
        }

        if let Some(open) = stack.last() {
            return Err(format!("unclosed element <{}>", open.tag).into());
        }
        root.ok_or_else(|| "document has no root element".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elements_attributes_and_text() {
        let tree = XmlBackend
            .parse(
                r#"<?xml version="1.0"?>
<config name="app">
  <server port="8080">main &amp; only</server>
  <empty/>
</config>"#,
            )
            .unwrap();

        let config = tree.get("config").expect("root element");
        assert_eq!(config.get_path("attrs.name").and_then(ConfigTree::as_str), Some("app"));

        let children = config.get("children").and_then(ConfigTree::as_sequence).unwrap();
        assert_eq!(children.len(), 2);
        let server = children[0].get("server").unwrap();
        assert_eq!(server.get_path("attrs.port").and_then(ConfigTree::as_str), Some("8080"));
        assert_eq!(server.get("text").and_then(ConfigTree::as_str), Some("main & only"));
        assert_eq!(children[1].get("empty"), Some(&ConfigTree::empty_mapping()));
    }

    #[test]
    fn cdata_is_text() {
        let tree = XmlBackend.parse("<a><![CDATA[x < y]]></a>").unwrap();
        assert_eq!(tree.get_path("a.text").and_then(ConfigTree::as_str), Some("x < y"));
    }

    #[test]
    fn malformed_documents_are_errors() {
        assert!(XmlBackend.parse("<a><b></a>").is_err());
        assert!(XmlBackend.parse("<a>").is_err());
        assert!(XmlBackend.parse("").is_err());
        assert!(XmlBackend.parse("<a/><b/>").is_err());
    }

    #[test]
    fn has_no_writer() {
        assert!(XmlBackend.serialize(&ConfigTree::empty_mapping()).is_err());
    }
}
