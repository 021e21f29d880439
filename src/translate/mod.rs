//! Human-readable translation of raw EXIF tags.
//!
//! Raw tag maps are keyed by numeric id and hold decoded values. The
//! translator renames every tag from a [`TagTables`] name table and rewrites
//! a handful of values:
//!
//! - Tags with an enumeration table (LightSource, Flash, ...) become their
//!   label; a raw value without a label becomes an absent label (`null` in
//!   JSON)
//! - ExifVersion / FlashpixVersion become a 4-character string
//! - ComponentsConfiguration becomes the concatenated channel labels
//! - GPSVersionID becomes a dotted version string
//!
//! Tags without a name are keyed by their hex id (`0x9C9B`).

mod tables;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::format::exif::ExifData;
use crate::format::tiff::{RawTagMap, TagValue, TiffTag};

pub use tables::{LabelTable, NameTable, TagTables};

/// A translated tag value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HumanValue {
    /// Value passed through unchanged
    Raw(TagValue),

    /// Enumeration label; `None` when the raw value has no label
    Label(Option<String>),

    /// Bespoke rendering (versions, channel order)
    Text(String),
}

impl HumanValue {
    /// The value as a string, for labels and bespoke renderings.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            HumanValue::Label(label) => label.as_deref(),
            HumanValue::Text(text) => Some(text),
            HumanValue::Raw(value) => value.as_str(),
        }
    }
}

/// Tag name to translated value.
pub type HumanTagMap = BTreeMap<String, HumanValue>;

/// Translated EXIF metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HumanTags {
    #[serde(flatten)]
    pub tags: HumanTagMap,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<HumanTagMap>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub interoperability: Option<HumanTagMap>,
}

impl HumanTags {
    /// Look up a translated main tag by name.
    pub fn get(&self, name: &str) -> Option<&HumanValue> {
        self.tags.get(name)
    }
}

/// Directory a tag map came from; selects the name table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Namespace {
    Main,
    Thumbnail,
    Interoperability,
}

/// Converts raw tag maps using injected tables.
#[derive(Debug, Clone)]
pub struct Translator {
    tables: TagTables,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(TagTables::standard())
    }
}

impl Translator {
    pub fn new(tables: TagTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &TagTables {
        &self.tables
    }

    /// Translate decoded EXIF data, including its thumbnail and
    /// Interoperability directories.
    pub fn translate(&self, exif: &ExifData) -> HumanTags {
        HumanTags {
            tags: self.translate_map(&exif.tags, Namespace::Main),
            thumbnail: exif
                .thumbnail
                .as_ref()
                .map(|thumb| self.translate_map(&thumb.tags, Namespace::Thumbnail)),
            interoperability: exif
                .interoperability
                .as_ref()
                .map(|tags| self.translate_map(tags, Namespace::Interoperability)),
        }
    }

    /// Translate a merged IFD0/Exif/GPS tag map.
    pub fn translate_tags(&self, tags: &RawTagMap) -> HumanTagMap {
        self.translate_map(tags, Namespace::Main)
    }

    fn translate_map(&self, tags: &RawTagMap, namespace: Namespace) -> HumanTagMap {
        tags.iter()
            .map(|(&id, value)| {
                let name = self.name(id, namespace);
                let value = self.translate_value(id, &name, value, namespace);
                (name, value)
            })
            .collect()
    }

    fn name(&self, id: u16, namespace: Namespace) -> String {
        let table = match namespace {
            Namespace::Main => &self.tables.tags,
            Namespace::Thumbnail => &self.tables.thumbnail_tags,
            Namespace::Interoperability => &self.tables.interoperability_tags,
        };
        table
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("0x{:04X}", id))
    }

    fn translate_value(
        &self,
        id: u16,
        name: &str,
        value: &TagValue,
        namespace: Namespace,
    ) -> HumanValue {
        if namespace == Namespace::Interoperability {
            return HumanValue::Raw(value.clone());
        }

        if self.tables.is_enumerated(name) {
            return HumanValue::Label(
                value
                    .as_u32()
                    .and_then(|raw| self.tables.label(name, raw))
                    .map(str::to_string),
            );
        }

        let rendered = match TiffTag::from_u16(id) {
            Some(TiffTag::ExifVersion | TiffTag::FlashpixVersion) => version_string(value),
            Some(TiffTag::ComponentsConfiguration) => self.components(value),
            Some(TiffTag::GpsVersionId) if namespace == Namespace::Main => dotted(value),
            _ => None,
        };

        rendered
            .map(HumanValue::Text)
            .unwrap_or_else(|| HumanValue::Raw(value.clone()))
    }

    fn components(&self, value: &TagValue) -> Option<String> {
        let codes = value.as_unsigned_slice()?;
        Some(
            codes
                .iter()
                .take(4)
                .filter_map(|code| self.tables.components.get(code))
                .map(String::as_str)
                .collect(),
        )
    }
}

/// Four byte codes as ASCII ("0230").
fn version_string(value: &TagValue) -> Option<String> {
    if let Some(text) = value.as_str() {
        return Some(text.to_string());
    }
    let codes = value.as_unsigned_slice()?;
    if codes.len() < 4 {
        return None;
    }
    codes[..4]
        .iter()
        .map(|&c| u8::try_from(c).ok().map(char::from))
        .collect()
}

/// Four numbers joined by dots ("2.2.0.0").
fn dotted(value: &TagValue) -> Option<String> {
    let codes = value.as_unsigned_slice()?;
    if codes.len() < 4 {
        return None;
    }
    Some(
        codes[..4]
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join("."),
    )
}

// =============================================================================
// Tests
// =============================================================================
