//! Namespace-aware XML tree.
//!
//! Parts that need structural queries ("every `w:t` anywhere below this
//! `w:p`") are parsed into an owned [`Element`] tree. The root owns every
//! descendant; there are no parent links.

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;

/// A node inside an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Child element
    Element(Element),
    /// Character data (entity references already expanded)
    Text(String),
}

/// An attribute with its qualified name as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// An XML element with a resolved namespace.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Namespace URI, if the element name is bound to one
    pub namespace: Option<String>,
    /// Local name without prefix
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    /// Whether this element has the given namespace URI and local name.
    pub fn is(&self, namespace: &str, local_name: &str) -> bool {
        self.name == local_name && self.namespace.as_deref() == Some(namespace)
    }

    /// Concatenated character data of the direct text children.
    ///
    /// An element without text yields an empty string.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            if let Node::Text(t) = child {
                out.push_str(t);
            }
        }
        out
    }

    /// Look up an attribute by its qualified name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Direct child elements.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Every element below this one, depth-first in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        let mut stack: Vec<&Element> = self.elements().collect();
        stack.reverse();
        Descendants { stack }
    }

    /// Every element below this one with the given name, at any depth.
    pub fn find_all<'a>(
        &'a self,
        namespace: &'a str,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.descendants().filter(move |e| e.is(namespace, local_name))
    }
}

/// Pre-order iterator over descendant elements.
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        let start = self.stack.len();
        self.stack.extend(next.elements());
        self.stack[start..].reverse();
        Some(next)
    }
}

/// Parse an XML document into an element tree.
///
/// Fails with [`Error::XmlParse`] unless the input is a single well-formed
/// root element, optionally surrounded by a declaration, comments,
/// processing instructions and whitespace.
pub fn parse(xml: &str) -> Result<Element> {
    let mut reader = NsReader::from_str(xml);
    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let (ns, event) = reader.read_resolved_event_into(&mut buf)?;
        let namespace = match ns {
            ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.as_ref()).into_owned()),
            ResolveResult::Unbound => None,
            ResolveResult::Unknown(prefix) => {
                return Err(Error::XmlParse(format!(
                    "unbound namespace prefix '{}' at byte {}",
                    String::from_utf8_lossy(&prefix),
                    reader.buffer_position()
                )));
            }
        };

        match event {
            Event::Start(e) => {
                if stack.is_empty() && root.is_some() {
                    return Err(junk_after_root(&reader));
                }
                stack.push(new_element(namespace, &e)?);
            }
            Event::Empty(e) => {
                let element = new_element(namespace, &e)?;
                attach(&mut stack, &mut root, element, &reader)?;
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| {
                    Error::XmlParse(format!(
                        "unexpected end tag at byte {}",
                        reader.buffer_position()
                    ))
                })?;
                attach(&mut stack, &mut root, element, &reader)?;
            }
            Event::Text(e) => {
                let text = e.unescape()?;
                match stack.last_mut() {
                    Some(parent) => push_text(parent, &text),
                    None if text.trim().is_empty() => {}
                    None => return Err(junk_after_root(&reader)),
                }
            }
            Event::CData(e) => {
                let text = String::from_utf8(e.into_inner().into_owned())
                    .map_err(|err| Error::XmlParse(err.to_string()))?;
                match stack.last_mut() {
                    Some(parent) => push_text(parent, &text),
                    None => return Err(junk_after_root(&reader)),
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(Error::XmlParse(format!(
            "unclosed element '{}' at end of input",
            open.name
        )));
    }

    root.ok_or_else(|| Error::XmlParse("no root element".to_string()))
}

fn new_element(namespace: Option<String>, start: &BytesStart<'_>) -> Result<Element> {
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        attributes.push(Attribute {
            name: String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            value: attr.unescape_value()?.into_owned(),
        });
    }

    Ok(Element {
        namespace,
        name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
        attributes,
        children: Vec::new(),
    })
}

/// Hand a finished element to its parent, or make it the root.
fn attach<R>(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
    reader: &NsReader<R>,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None if root.is_none() => *root = Some(element),
        None => return Err(junk_after_root(reader)),
    }
    Ok(())
}

fn push_text(parent: &mut Element, text: &str) {
    if let Some(Node::Text(last)) = parent.children.last_mut() {
        last.push_str(text);
    } else {
        parent.children.push(Node::Text(text.to_string()));
    }
}

fn junk_after_root<R>(reader: &NsReader<R>) -> Error {
    Error::XmlParse(format!(
        "content outside the root element at byte {}",
        reader.buffer_position()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "urn:test";

    #[test]
    fn test_parse_tree() {
        let root = parse(
            r#"<?xml version="1.0"?>
<!-- comment -->
<x:root xmlns:x="urn:test" id="1"><x:a>one</x:a><b>two &amp; three</b></x:root>"#,
        )
        .unwrap();

        assert!(root.is(NS, "root"));
        assert_eq!(root.attribute("id"), Some("1"));
        let children: Vec<_> = root.elements().collect();
        assert_eq!(children.len(), 2);
        assert!(children[0].is(NS, "a"));
        assert_eq!(children[0].text(), "one");
        assert_eq!(children[1].namespace, None);
        assert_eq!(children[1].text(), "two & three");
    }

    #[test]
    fn test_default_namespace() {
        let root = parse(r#"<root xmlns="urn:test"><item/></root>"#).unwrap();
        assert!(root.is(NS, "root"));
        assert_eq!(root.find_all(NS, "item").count(), 1);
    }

    #[test]
    fn test_find_all_any_depth_in_order() {
        let root = parse(
            r#"<r xmlns="urn:test">
                <p>1</p>
                <tbl><tr><tc><p>2</p></tc></tr></tbl>
                <p>3<p>4</p></p>
            </r>"#,
        )
        .unwrap();

        let texts: Vec<String> = root.find_all(NS, "p").map(|p| p.text()).collect();
        assert_eq!(texts, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_whitespace_preserved() {
        let root = parse(r#"<t xmlns="urn:test">  padded </t>"#).unwrap();
        assert_eq!(root.text(), "  padded ");
    }

    #[test]
    fn test_cdata_is_text() {
        let root = parse("<t>a<![CDATA[<b>]]>c</t>").unwrap();
        assert_eq!(root.text(), "a<b>c");
    }

    #[test]
    fn test_empty_element_has_empty_text() {
        let root = parse("<t/>").unwrap();
        assert_eq!(root.text(), "");
    }

    #[test]
    fn test_ill_formed_inputs() {
        for bad in [
            "",
            "   ",
            "<a><b></a>",
            "<a>",
            "</a>",
            "<a/><b/>",
            "<a/>trailing",
            "<a>&bogus;</a>",
            "<x:a/>",
            "not xml at all",
        ] {
            let err = parse(bad).unwrap_err();
            assert!(matches!(err, Error::XmlParse(_)), "accepted {:?}", bad);
        }
    }
}
