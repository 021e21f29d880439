use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// The three independent metadata families found in a JPEG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataKind {
    Exif,
    Iptc,
    Xmp,
}

impl MetadataKind {
    /// Get a human-readable name for the family.
    pub const fn name(self) -> &'static str {
        match self {
            MetadataKind::Exif => "EXIF",
            MetadataKind::Iptc => "IPTC",
            MetadataKind::Xmp => "XMP",
        }
    }
}

impl fmt::Display for MetadataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors that can occur while extracting metadata from a JPEG buffer.
///
/// None of these are fatal for a combined read: each family (EXIF, IPTC,
/// XMP) fails on its own and surfaces as an empty or absent result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    /// The buffer does not start with the JPEG Start-Of-Image marker
    #[error("Not a JPEG: expected SOI marker 0xFFD8")]
    NotAJpeg,

    /// A read went past the end of the buffer
    #[error("Truncated data: requested {requested} bytes at offset {offset}, size is {size}")]
    TruncatedData {
        offset: usize,
        requested: usize,
        size: usize,
    },

    /// The EXIF payload does not carry a valid TIFF header
    #[error("Malformed TIFF: {0}")]
    MalformedTiff(#[from] TiffError),

    /// A directory entry uses a TIFF type code this decoder does not handle
    #[error("Unsupported tag type: {0}")]
    UnsupportedTagType(u16),

    /// The scan completed without finding the requested family
    #[error("No embedded {0} metadata found")]
    NoEmbeddedMetadata(MetadataKind),

    /// The XML parser rejected the XMP packet
    #[error("XML error: {0}")]
    Xml(String),
}

/// Errors that can occur when validating the TIFF header of an EXIF payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TiffError {
    /// Payload does not begin with "Exif"
    #[error("missing Exif signature")]
    MissingExifSignature,

    /// Invalid TIFF magic bytes (not II or MM)
    #[error("invalid byte order magic: expected 0x4949 (II) or 0x4D4D (MM), got 0x{0:04X}")]
    InvalidMagic(u16),

    /// Invalid TIFF version number
    #[error("invalid TIFF version: expected 42, got {0}")]
    InvalidVersion(u16),

    /// First IFD offset is smaller than the header itself
    #[error("invalid first IFD offset: {0}")]
    InvalidIfdOffset(u32),

    /// Numeric entry with a count of zero
    #[error("entry for tag 0x{0:04X} holds no values")]
    EmptyValue(u16),
}
