//! Plain-text rendering of extracted metadata.
//!
//! One `Name : value` line per tag. Rationals are followed by their exact
//! fraction, lists are summarised by their length:
//!
//! ```text
//! Make : Canon
//! ExposureTime : 0.004 [1/250]
//! GPSLatitude : [3 values]
//! ```

use std::fmt::Write;

use crate::format::exif::ExifData;
use crate::format::iptc::IptcFieldMap;
use crate::format::tiff::{RawTagMap, TagValue};
use crate::format::xmp::{XmpNode, XmpValue};
use crate::metadata::Metadata;
use crate::translate::{HumanTagMap, HumanTags, HumanValue};

/// Shown for an enumerated tag whose raw value has no label.
const NO_LABEL: &str = "(unknown)";

/// Render a raw or translated tag value.
pub fn format_tag_value(value: &TagValue) -> String {
    match value {
        TagValue::Rational(r) => format!("{} [{}/{}]", r, r.numerator, r.denominator),
        v if v.is_list() => format!("[{} values]", v.len()),
        v => v.to_string(),
    }
}

fn format_human_value(value: &HumanValue) -> String {
    match value {
        HumanValue::Raw(raw) => format_tag_value(raw),
        HumanValue::Label(label) => label.clone().unwrap_or_else(|| NO_LABEL.to_string()),
        HumanValue::Text(text) => text.clone(),
    }
}

fn write_human_map(out: &mut String, prefix: &str, tags: &HumanTagMap) {
    for (name, value) in tags {
        let _ = writeln!(out, "{}{} : {}", prefix, name, format_human_value(value));
    }
}

fn write_raw_map(out: &mut String, prefix: &str, tags: &RawTagMap) {
    for (id, value) in tags {
        let _ = writeln!(out, "{}0x{:04X} : {}", prefix, id, format_tag_value(value));
    }
}

/// Render translated EXIF tags; thumbnail tags are prefixed `thumbnail.`.
pub fn pretty_human(tags: &HumanTags) -> String {
    let mut out = String::new();
    write_human_map(&mut out, "", &tags.tags);
    if let Some(ref interop) = tags.interoperability {
        write_human_map(&mut out, "interoperability.", interop);
    }
    if let Some(ref thumbnail) = tags.thumbnail {
        write_human_map(&mut out, "thumbnail.", thumbnail);
    }
    out
}

/// Render raw EXIF tags keyed by hex id.
pub fn pretty_raw(exif: &ExifData) -> String {
    let mut out = String::new();
    write_raw_map(&mut out, "", &exif.tags);
    if let Some(ref interop) = exif.interoperability {
        write_raw_map(&mut out, "interoperability.", interop);
    }
    if let Some(ref thumbnail) = exif.thumbnail {
        write_raw_map(&mut out, "thumbnail.", &thumbnail.tags);
        if let Some(ref image) = thumbnail.image {
            let _ = writeln!(
                out,
                "thumbnail.image : {} ({} bytes)",
                image.mime_type,
                image.data.len()
            );
        }
    }
    out
}

/// Render IPTC fields; repeated fields are joined with `, `.
pub fn pretty_iptc(fields: &IptcFieldMap) -> String {
    let mut out = String::new();
    for (name, value) in fields {
        let _ = writeln!(out, "{} : {}", name, value.values().join(", "));
    }
    out
}

/// Render every text leaf of an XMP tree with its `/`-separated path.
pub fn pretty_xmp(xmp: &XmpNode) -> String {
    let mut out = String::new();
    write_xmp_node(&mut out, "", xmp);
    out
}

fn write_xmp_node(out: &mut String, path: &str, node: &XmpNode) {
    for (key, value) in node.iter() {
        let child = if path.is_empty() {
            key.clone()
        } else {
            format!("{}/{}", path, key)
        };
        write_xmp_value(out, &child, value);
    }
}

fn write_xmp_value(out: &mut String, path: &str, value: &XmpValue) {
    match value {
        XmpValue::Text(text) => {
            let _ = writeln!(out, "{} : {}", path, text);
        }
        XmpValue::Node(node) => write_xmp_node(out, path, node),
        XmpValue::List(values) => {
            for (i, item) in values.iter().enumerate() {
                write_xmp_value(out, &format!("{}[{}]", path, i), item);
            }
        }
    }
}

/// Render everything read from one file, one section per family.
///
/// EXIF is translated with `human` when given, otherwise printed raw.
pub fn pretty_metadata(metadata: &Metadata, human: Option<&HumanTags>) -> String {
    let mut out = String::new();

    if let Some(ref exif) = metadata.exif {
        out.push_str("[EXIF]\n");
        match human {
            Some(tags) => out.push_str(&pretty_human(tags)),
            None => out.push_str(&pretty_raw(exif)),
        }
    }
    if !metadata.iptc.is_empty() {
        out.push_str("[IPTC]\n");
        out.push_str(&pretty_iptc(&metadata.iptc));
    }
    if let Some(ref xmp) = metadata.xmp {
        out.push_str("[XMP]\n");
        out.push_str(&pretty_xmp(xmp));
    }

    out
}

// =============================================================================
// Tests
// =============================================================================
