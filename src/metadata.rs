//! Combined metadata read.
//!
//! [`read_metadata`] runs the EXIF, IPTC and XMP passes independently over
//! one buffer. A failing pass is logged and surfaces as an absent or empty
//! result; it never prevents the other passes from running.

use serde::Serialize;
use tracing::debug;

use crate::error::{MetadataError, MetadataKind};
use crate::format::exif::{read_exif, ExifData};
use crate::format::iptc::{read_iptc, IptcFieldMap};
use crate::format::xmp::{read_xmp, XmpNode};

/// Which metadata families to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    pub exif: bool,
    pub iptc: bool,
    pub xmp: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            exif: true,
            iptc: true,
            xmp: true,
        }
    }
}

impl ReadOptions {
    /// All families enabled.
    pub fn all() -> Self {
        Self::default()
    }
}

/// Metadata of one image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    /// Decoded EXIF, absent when missing, malformed or not requested
    pub exif: Option<ExifData>,

    /// IPTC fields, empty when missing or not requested
    pub iptc: IptcFieldMap,

    /// Parsed XMP tree, absent when missing, malformed or not requested
    pub xmp: Option<XmpNode>,
}

impl Metadata {
    /// Whether no family produced anything.
    pub fn is_empty(&self) -> bool {
        self.exif.is_none() && self.iptc.is_empty() && self.xmp.is_none()
    }
}

/// Extract every requested metadata family from a JPEG buffer.
///
/// Never fails: a buffer that is not a JPEG simply yields empty results.
pub fn read_metadata(data: &[u8], options: &ReadOptions) -> Metadata {
    let exif = if options.exif {
        family(MetadataKind::Exif, read_exif(data))
    } else {
        None
    };

    let iptc = if options.iptc {
        family(MetadataKind::Iptc, read_iptc(data)).unwrap_or_default()
    } else {
        IptcFieldMap::new()
    };

    let xmp = if options.xmp {
        family(MetadataKind::Xmp, read_xmp(data))
    } else {
        None
    };

    Metadata { exif, iptc, xmp }
}

fn family<T>(kind: MetadataKind, result: Result<T, MetadataError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(family = %kind, error = %err, "no metadata extracted");
            None
        }
    }
}
