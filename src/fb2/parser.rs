//! FictionBook XML → [`Document`] tree.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::Result;
use crate::util::{decode_text, extract_xml_encoding, local_name, resolve_entity};

use super::tree::{Document, Element, Node, Tag};

/// Parse raw file bytes, honouring the encoding named in the XML declaration.
pub fn parse_bytes(bytes: &[u8]) -> Result<Document> {
    let content = decode_text(bytes, extract_xml_encoding(bytes));
    parse_str(&content)
}

/// Parse a FictionBook document from a string.
pub fn parse_str(content: &str) -> Result<Document> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(false);

    let mut doc = Document::default();
    let mut stack: Vec<Element> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => stack.push(start_element(&e)?),
            Event::Empty(e) => {
                let element = start_element(&e)?;
                attach(&mut stack, &mut doc, element);
            }
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut doc, element);
                }
            }
            Event::Text(e) => push_text(&mut stack, &String::from_utf8_lossy(e.as_ref())),
            Event::CData(e) => push_text(&mut stack, &String::from_utf8_lossy(&e)),
            Event::GeneralRef(e) => {
                let entity = String::from_utf8_lossy(e.as_ref());
                match resolve_entity(&entity) {
                    Some(c) => push_text(&mut stack, c.encode_utf8(&mut [0; 4])),
                    None => log::warn!("Unknown entity reference '&{entity};'"),
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        log::warn!("Document ended with {} unclosed element(s)", stack.len());
        while let Some(element) = stack.pop() {
            attach(&mut stack, &mut doc, element);
        }
    }

    Ok(doc)
}

fn start_element(e: &BytesStart<'_>) -> Result<Element> {
    let name = e.name();
    let tag = Tag::from_name(&String::from_utf8_lossy(local_name(name.as_ref())));
    let mut element = Element::new(tag);

    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(local_name(attr.key.as_ref())).into_owned();
        let raw = String::from_utf8_lossy(&attr.value);
        let value = quick_xml::escape::unescape(&raw)
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| raw.to_string());
        element.attrs.push((key, value));
    }

    Ok(element)
}

fn attach(stack: &mut [Element], doc: &mut Document, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None => doc.nodes.push(element),
    }
}

/// Append character data to the open element, merging with a preceding text node.
fn push_text(stack: &mut [Element], text: &str) {
    let Some(parent) = stack.last_mut() else {
        return;
    };
    if let Some(Node::Text(last)) = parent.children.last_mut() {
        last.push_str(text);
    } else {
        parent.children.push(Node::Text(text.to_string()));
    }
}
