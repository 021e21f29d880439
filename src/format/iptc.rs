//! IPTC extraction.
//!
//! IPTC records travel inside a Photoshop image resource block (resource id
//! 0x0404), usually in an APP13 segment. The block is found by a linear scan
//! for its signature rather than by walking segments:
//!
//! ```text
//! "8BIM" 04 04  NN  name...  LL LL LL LL  records...
//!  sig   id     name length  section length
//! ```
//!
//! Inside the section, each IIM dataset of record 2 starts with `1C 02`
//! followed by the dataset number and a 2-byte big-endian size:
//!
//! ```text
//! 1C 02 19 00 06 "sunset"     keywords = "sunset"
//! ```
//!
//! Dataset boundaries are not trusted: the scan advances one byte at a time
//! and picks up every `1C 02` pair whose dataset number is recognized.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{MetadataError, MetadataKind};
use crate::format::jpeg::check_soi;
use crate::io::{ByteCursor, ByteOrder};

// =============================================================================
// Constants
// =============================================================================

/// "8BIM" followed by the IPTC-NAA resource id 0x0404
pub const IPTC_RESOURCE_SIGNATURE: [u8; 6] = [0x38, 0x42, 0x49, 0x4D, 0x04, 0x04];

/// Tag marker and record number that open an application record dataset
const DATASET_MARKER: [u8; 2] = [0x1C, 0x02];

/// Name length assumed by writers older than Photoshop 6
const LEGACY_NAME_LENGTH: usize = 4;

/// Offset of the value from the start of a dataset
const DATASET_HEADER_SIZE: usize = 5;

// =============================================================================
// Fields
// =============================================================================

/// Recognized application-record datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum IptcField {
    Category = 0x0F,
    Keywords = 0x19,
    DateCreated = 0x37,
    Byline = 0x50,
    BylineTitle = 0x55,
    Headline = 0x69,
    Credit = 0x6E,
    Copyright = 0x74,
    Caption = 0x78,
    CaptionWriter = 0x7A,
}

impl IptcField {
    /// Create an IptcField from a dataset number.
    ///
    /// Returns `None` for datasets that are not collected.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x0F => Some(IptcField::Category),
            0x19 => Some(IptcField::Keywords),
            0x37 => Some(IptcField::DateCreated),
            0x50 => Some(IptcField::Byline),
            0x55 => Some(IptcField::BylineTitle),
            0x69 => Some(IptcField::Headline),
            0x6E => Some(IptcField::Credit),
            0x74 => Some(IptcField::Copyright),
            0x78 => Some(IptcField::Caption),
            0x7A => Some(IptcField::CaptionWriter),
            _ => None,
        }
    }

    /// Key used in the field map.
    pub const fn name(self) -> &'static str {
        match self {
            IptcField::Category => "category",
            IptcField::Keywords => "keywords",
            IptcField::DateCreated => "dateCreated",
            IptcField::Byline => "byline",
            IptcField::BylineTitle => "bylineTitle",
            IptcField::Headline => "headline",
            IptcField::Credit => "credit",
            IptcField::Copyright => "copyright",
            IptcField::Caption => "caption",
            IptcField::CaptionWriter => "captionWriter",
        }
    }
}

/// A collected field: a single string, or every occurrence in file order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum IptcValue {
    Single(String),
    Multiple(Vec<String>),
}

impl IptcValue {
    /// Add another occurrence, turning a single value into a list.
    fn push(&mut self, value: String) {
        match self {
            IptcValue::Single(first) => {
                let first = std::mem::take(first);
                *self = IptcValue::Multiple(vec![first, value]);
            }
            IptcValue::Multiple(values) => values.push(value),
        }
    }

    /// The first (or only) occurrence.
    pub fn first(&self) -> Option<&str> {
        match self {
            IptcValue::Single(value) => Some(value),
            IptcValue::Multiple(values) => values.first().map(String::as_str),
        }
    }

    /// All occurrences in file order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            IptcValue::Single(value) => vec![value.as_str()],
            IptcValue::Multiple(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

/// Field name to value(s).
pub type IptcFieldMap = BTreeMap<String, IptcValue>;

// =============================================================================
// Extraction
// =============================================================================

/// Location of the dataset section inside the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IptcSection {
    /// Offset of the 8BIM signature
    pub resource_offset: usize,

    /// Offset of the first dataset byte
    pub start: usize,

    /// Declared section length
    pub len: usize,
}

/// Find the IPTC resource block.
///
/// # Errors
/// - `NotAJpeg` if the buffer does not start with SOI
/// - `NoEmbeddedMetadata(Iptc)` if no resource block is found
/// - `TruncatedData` if the resource header is cut off
pub fn find_iptc_section(data: &[u8]) -> Result<IptcSection, MetadataError> {
    check_soi(data)?;
    let cursor = ByteCursor::new(data);

    let resource_offset = cursor
        .find(&IPTC_RESOURCE_SIGNATURE, 2)
        .ok_or(MetadataError::NoEmbeddedMetadata(MetadataKind::Iptc))?;

    let mut name_len = cursor.read_u8(resource_offset + 7)? as usize;
    if name_len % 2 != 0 {
        name_len += 1;
    }
    if name_len == 0 {
        name_len = LEGACY_NAME_LENGTH;
    }

    let len = cursor.read_u16(resource_offset + 6 + name_len, ByteOrder::BigEndian)? as usize;

    Ok(IptcSection {
        resource_offset,
        start: resource_offset + 8 + name_len,
        len,
    })
}

/// Collect recognized datasets from `len` bytes starting at `start`.
///
/// The range is clamped to the buffer. A dataset whose value runs past the
/// end of the buffer ends the scan; fields collected so far are kept.
pub fn parse_iptc_records(data: &[u8], start: usize, len: usize) -> IptcFieldMap {
    let cursor = ByteCursor::new(data);
    let end = start.saturating_add(len).min(data.len());
    let mut fields = IptcFieldMap::new();
    let mut pos = start;

    while pos < end {
        if !cursor.matches_at(pos, &DATASET_MARKER) {
            pos += 1;
            continue;
        }

        let Some(field) = cursor.read_u8(pos + 2).ok().and_then(IptcField::from_u8) else {
            pos += 1;
            continue;
        };

        let size = match cursor.read_i16(pos + 3, ByteOrder::BigEndian) {
            Ok(size) if size >= 0 => size as usize,
            Ok(size) => {
                trace!(offset = pos, size, "negative dataset size");
                pos += 1;
                continue;
            }
            Err(_) => break,
        };

        let value = match cursor.read_string(pos + DATASET_HEADER_SIZE, size) {
            Ok(value) => value,
            Err(err) => {
                debug!(field = field.name(), error = %err, "IPTC dataset truncated");
                break;
            }
        };

        match fields.get_mut(field.name()) {
            Some(existing) => existing.push(value),
            None => {
                fields.insert(field.name().to_string(), IptcValue::Single(value));
            }
        }

        pos += 1;
    }

    fields
}

/// Extract IPTC fields from a JPEG buffer.
///
/// # Errors
/// - `NotAJpeg` if the buffer does not start with SOI
/// - `NoEmbeddedMetadata(Iptc)` if no resource block is found
pub fn read_iptc(data: &[u8]) -> Result<IptcFieldMap, MetadataError> {
    let section = find_iptc_section(data)?;
    debug!(
        offset = section.resource_offset,
        len = section.len,
        "found IPTC resource"
    );
    Ok(parse_iptc_records(data, section.start, section.len))
}

// =============================================================================
// Tests
// =============================================================================
