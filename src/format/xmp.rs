//! XMP extraction.
//!
//! XMP is an RDF/XML packet, normally stored in an APP1 segment behind the
//! namespace URI `http://ns.adobe.com/xap/1.0/`. The packet is located by
//! scanning for the ASCII anchor `"http"`; the two bytes before the anchor
//! are taken as the big-endian segment length:
//!
//! ```text
//! FF E1 LL LL "http://ns.adobe.com/xap/1.0/\0" <?xpacket ...?> <x:xmpmeta ...> ... </x:xmpmeta>
//!       ^^^^^ ^
//!       len   anchor
//! ```
//!
//! The `<x:xmpmeta ... xmpmeta>` element is cut out of the segment text.
//! Producers frequently omit namespace declarations for prefixes they use,
//! so a fixed set of well-known declarations is injected into the root tag
//! before parsing. The parsed tree is converted into nested
//! [`XmpNode`] mappings.
//!
//! # Conversion
//!
//! - Element attributes become string entries of the element's mapping
//! - Child elements are keyed by qualified name; repeated names form a list
//! - An element without attributes or children becomes its text
//! - Text of an element that also has attributes is stored under `#text`

use std::collections::BTreeMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;
use tracing::debug;

use crate::error::{MetadataError, MetadataKind};
use crate::format::jpeg::check_soi;
use crate::io::{ByteCursor, ByteOrder};

// =============================================================================
// Constants
// =============================================================================

/// Anchor searched for in the buffer
const XMP_ANCHOR: &[u8] = b"http";

/// Opening of the root element
pub const XMPMETA_OPEN: &str = "<x:xmpmeta";

/// Tail of the closing root element
const XMPMETA_CLOSE: &str = "xmpmeta>";

/// Key under which mixed-content text is stored
pub const TEXT_KEY: &str = "#text";

/// Namespace declarations added to the root element when missing.
pub const STANDARD_NAMESPACES: [(&str, &str); 11] = [
    ("Iptc4xmpCore", "http://iptc.org/std/Iptc4xmpCore/1.0/xmlns/"),
    ("xsi", "http://www.w3.org/2001/XMLSchema-instance"),
    ("tiff", "http://ns.adobe.com/tiff/1.0/"),
    ("plus", "http://schemas.android.com/apk/lib/com.google.android.gms.plus"),
    ("ext", "http://www.gettyimages.com/xsltExtension/1.0"),
    ("exif", "http://ns.adobe.com/exif/1.0/"),
    ("stEvt", "http://ns.adobe.com/xap/1.0/sType/ResourceEvent#"),
    ("stRef", "http://ns.adobe.com/xap/1.0/sType/ResourceRef#"),
    ("crs", "http://ns.adobe.com/camera-raw-settings/1.0/"),
    ("xapGImg", "http://ns.adobe.com/xap/1.0/g/img/"),
    ("Iptc4xmpExt", "http://iptc.org/std/Iptc4xmpExt/2008-02-29/"),
];

// =============================================================================
// Tree
// =============================================================================

/// A value in the converted XMP tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum XmpValue {
    Text(String),
    Node(XmpNode),
    List(Vec<XmpValue>),
}

impl XmpValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            XmpValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&XmpNode> {
        match self {
            XmpValue::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[XmpValue]> {
        match self {
            XmpValue::List(values) => Some(values),
            _ => None,
        }
    }
}

/// An element converted into a mapping of names to values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct XmpNode(BTreeMap<String, XmpValue>);

impl XmpNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&XmpValue> {
        self.0.get(key)
    }

    /// Follow a chain of keys through nested nodes.
    ///
    /// ```ignore
    /// xmp.path(&["x:xmpmeta", "rdf:RDF", "rdf:Description", "tiff:Make"])
    /// ```
    pub fn path(&self, keys: &[&str]) -> Option<&XmpValue> {
        let (last, parents) = keys.split_last()?;
        let mut node = self;
        for key in parents {
            node = node.get(key)?.as_node()?;
        }
        node.get(last)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &XmpValue)> {
        self.0.iter()
    }

    /// Insert a value, turning an existing entry into a list.
    fn append(&mut self, key: String, value: XmpValue) {
        match self.0.get_mut(&key) {
            None => {
                self.0.insert(key, value);
            }
            Some(XmpValue::List(values)) => values.push(value),
            Some(existing) => {
                let first = std::mem::replace(existing, XmpValue::List(Vec::new()));
                *existing = XmpValue::List(vec![first, value]);
            }
        }
    }

    fn insert(&mut self, key: String, value: XmpValue) {
        self.0.insert(key, value);
    }
}

// =============================================================================
// Packet Extraction
// =============================================================================

/// Locate the XMP packet and return it with namespaces injected.
///
/// # Errors
/// - `NotAJpeg` if the buffer does not start with SOI
/// - `NoEmbeddedMetadata(Xmp)` if no `<x:xmpmeta>` packet is found
pub fn extract_xmp_packet(data: &[u8]) -> Result<String, MetadataError> {
    check_soi(data)?;
    let cursor = ByteCursor::new(data);
    let mut from = 2;

    while let Some(anchor) = cursor.find(XMP_ANCHOR, from) {
        from = anchor + 1;

        let Ok(declared) = cursor.read_u16(anchor - 2, ByteOrder::BigEndian) else {
            continue;
        };
        let start = anchor - 1;
        let end = start
            .saturating_add((declared as usize).saturating_sub(1))
            .min(data.len());
        let text = String::from_utf8_lossy(&data[start..end]);

        if let Some(packet) = slice_xmpmeta(&text) {
            debug!(offset = anchor, len = packet.len(), "found XMP packet");
            return Ok(inject_namespaces(packet));
        }
    }

    Err(MetadataError::NoEmbeddedMetadata(MetadataKind::Xmp))
}

/// Cut the `<x:xmpmeta ... xmpmeta>` element out of a segment's text.
pub fn slice_xmpmeta(text: &str) -> Option<&str> {
    let open = text.find(XMPMETA_OPEN)?;
    let body = open + XMPMETA_OPEN.len();
    let close = text[body..].find(XMPMETA_CLOSE)?;
    Some(&text[open..body + close + XMPMETA_CLOSE.len()])
}

/// Add the standard namespace declarations the root tag does not already carry.
pub fn inject_namespaces(packet: &str) -> String {
    let Some(rest) = packet.strip_prefix(XMPMETA_OPEN) else {
        return packet.to_string();
    };
    let root_tag = rest.split('>').next().unwrap_or(rest);
    let declared = declared_prefixes(root_tag);

    let mut out = String::with_capacity(packet.len() + 800);
    out.push_str(XMPMETA_OPEN);
    for (prefix, uri) in STANDARD_NAMESPACES {
        if !declared.iter().any(|p| p == prefix) {
            out.push_str(" xmlns:");
            out.push_str(prefix);
            out.push_str("=\"");
            out.push_str(uri);
            out.push('"');
        }
    }
    out.push_str(rest);
    out
}

/// Prefixes declared by `xmlns:` attributes in the body of the root tag.
fn declared_prefixes(root_tag: &str) -> Vec<String> {
    let name = &XMPMETA_OPEN[1..];
    let start = BytesStart::from_content(format!("{}{}", name, root_tag), name.len());
    let mut attributes = start.attributes();
    attributes.with_checks(false);
    attributes
        .flatten()
        .filter_map(|attr| {
            let key = attr.key.as_ref();
            key.strip_prefix(b"xmlns:")
                .map(|prefix| String::from_utf8_lossy(prefix).into_owned())
        })
        .collect()
}

// =============================================================================
// XML Conversion
// =============================================================================

/// Element tree as read from the packet.
#[derive(Debug, Default)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> Result<Self, MetadataError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| MetadataError::Xml(e.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| MetadataError::Xml(e.to_string()))?
                .into_owned();
            attributes.push((key, value));
        }
        Ok(Element {
            name,
            attributes,
            ..Default::default()
        })
    }

    fn into_value(self) -> XmpValue {
        if self.attributes.is_empty() && self.children.is_empty() {
            return XmpValue::Text(self.text);
        }

        let mut node = XmpNode::new();
        for (key, value) in self.attributes {
            node.insert(key, XmpValue::Text(value));
        }
        let has_children = !self.children.is_empty();
        for child in self.children {
            let key = child.name.clone();
            node.append(key, child.into_value());
        }
        if !has_children && !self.text.is_empty() {
            node.insert(TEXT_KEY.to_string(), XmpValue::Text(self.text));
        }
        XmpValue::Node(node)
    }
}

/// Parse an XMP packet into a tree keyed by the root element name.
///
/// # Errors
/// `Xml` if the packet is not well-formed.
pub fn parse_xmp(xml: &str) -> Result<XmpNode, MetadataError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => stack.push(Element::from_start(e)?),
            Ok(Event::Empty(ref e)) => {
                let element = Element::from_start(e)?;
                attach(&mut stack, &mut root, element);
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| MetadataError::Xml("unexpected closing tag".into()))?;
                attach(&mut stack, &mut root, element);
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(|e| MetadataError::Xml(e.to_string()))?;
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(MetadataError::Xml(format!(
                    "error at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(MetadataError::Xml(format!("unclosed element <{}>", open.name)));
    }
    let root = root.ok_or_else(|| MetadataError::Xml("empty document".into()))?;

    let mut tree = XmpNode::new();
    let name = root.name.clone();
    tree.insert(name, root.into_value());
    Ok(tree)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

/// Extract and parse the XMP packet of a JPEG buffer.
///
/// # Errors
/// - `NotAJpeg` if the buffer does not start with SOI
/// - `NoEmbeddedMetadata(Xmp)` if no packet is found
/// - `Xml` if the packet is not well-formed
pub fn read_xmp(data: &[u8]) -> Result<XmpNode, MetadataError> {
    let packet = extract_xmp_packet(data)?;
    parse_xmp(&packet)
}

// =============================================================================
// Tests
// =============================================================================
