//! TIFF header and directory parsing.
//!
//! An EXIF APP1 payload wraps a complete classic TIFF stream. Every offset in
//! that stream is relative to the first byte of the TIFF header, not to the
//! start of the JPEG buffer.
//!
//! # EXIF Payload Structure
//!
//! ```text
//! Bytes 0-5: "Exif\0\0"
//! Bytes 6-7: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 8-9: Version (42 = 0x002A)
//! Bytes 10-13: Offset to IFD0, relative to byte 6 (must be >= 8)
//! ```
//!
//! # Directory Structure
//!
//! ```text
//! Bytes 0-1: Entry count N
//! N x 12 bytes: tag (2), type (2), count (4), value or offset (4)
//! Next 4 bytes: Offset of the next IFD (0 = none)
//! ```

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{MetadataError, TiffError};
use crate::io::{ByteCursor, ByteOrder};

use super::tags::FieldType;
use super::values::{decode_value, TagValue};

// =============================================================================
// Constants
// =============================================================================

/// Magic bytes indicating little-endian byte order ("II" for Intel)
const BYTE_ORDER_LITTLE_ENDIAN: u16 = 0x4949;

/// Magic bytes indicating big-endian byte order ("MM" for Motorola)
const BYTE_ORDER_BIG_ENDIAN: u16 = 0x4D4D;

/// Version number for classic TIFF
const VERSION_TIFF: u16 = 42;

/// Length of the "Exif\0\0" prefix in front of the TIFF header
pub const EXIF_HEADER_SIZE: usize = 6;

/// Size of the classic TIFF header in bytes
pub const TIFF_HEADER_SIZE: usize = 8;

/// Size of a single directory entry in bytes
pub const IFD_ENTRY_SIZE: usize = 12;

/// Tag id to decoded value, for one directory or a merge of several.
pub type RawTagMap = BTreeMap<u16, TagValue>;

// =============================================================================
// TiffHeader
// =============================================================================

/// Parsed TIFF header of an EXIF payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Byte order for all multi-byte values in the stream
    pub byte_order: ByteOrder,

    /// Absolute offset of the TIFF header; base for every stored offset
    pub tiff_start: usize,

    /// Offset of IFD0, relative to `tiff_start`
    pub first_ifd_offset: u32,
}

impl TiffHeader {
    /// Parse and validate the TIFF header of an EXIF payload.
    ///
    /// # Arguments
    /// * `cursor` - The whole JPEG buffer
    /// * `exif_start` - Absolute offset of the `"Exif\0\0"` signature
    ///
    /// # Errors
    /// - `MalformedTiff(MissingExifSignature)` if the payload is not EXIF
    /// - `MalformedTiff(InvalidMagic)` if byte order bytes are not II or MM
    /// - `MalformedTiff(InvalidVersion)` if the version is not 42
    /// - `MalformedTiff(InvalidIfdOffset)` if the IFD0 offset points into the header
    /// - `TruncatedData` if the header is cut off
    pub fn parse(cursor: &ByteCursor<'_>, exif_start: usize) -> Result<Self, MetadataError> {
        if !cursor.matches_at(exif_start, b"Exif") {
            return Err(TiffError::MissingExifSignature.into());
        }

        let tiff_start = exif_start + EXIF_HEADER_SIZE;

        // Read as big-endian; both valid magics are palindromes
        let magic = cursor.read_u16(tiff_start, ByteOrder::BigEndian)?;
        let byte_order = match magic {
            BYTE_ORDER_LITTLE_ENDIAN => ByteOrder::LittleEndian,
            BYTE_ORDER_BIG_ENDIAN => ByteOrder::BigEndian,
            _ => return Err(TiffError::InvalidMagic(magic).into()),
        };

        let version = cursor.read_u16(tiff_start + 2, byte_order)?;
        if version != VERSION_TIFF {
            return Err(TiffError::InvalidVersion(version).into());
        }

        let first_ifd_offset = cursor.read_u32(tiff_start + 4, byte_order)?;
        if (first_ifd_offset as usize) < TIFF_HEADER_SIZE {
            return Err(TiffError::InvalidIfdOffset(first_ifd_offset).into());
        }

        Ok(TiffHeader {
            byte_order,
            tiff_start,
            first_ifd_offset,
        })
    }

    /// Convert an offset stored in the stream into an absolute buffer offset.
    ///
    /// Returns `None` if the sum overflows.
    #[inline]
    pub fn absolute(&self, relative: u32) -> Option<usize> {
        self.tiff_start.checked_add(relative as usize)
    }
}

// =============================================================================
// IfdEntry
// =============================================================================

/// A raw 12-byte directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IfdEntry {
    /// Tag ID identifying what this entry represents
    pub tag: u16,

    /// Type code as stored; may be a type this decoder does not support
    pub field_type_raw: u16,

    /// Number of values (not bytes)
    pub count: u32,

    /// The value field interpreted as an offset relative to the TIFF header
    pub value_offset: u32,

    /// Absolute offset of the entry in the buffer
    pub entry_offset: usize,
}

impl IfdEntry {
    /// Parse the entry that starts at `entry_offset`.
    pub fn parse(
        cursor: &ByteCursor<'_>,
        entry_offset: usize,
        order: ByteOrder,
    ) -> Result<Self, MetadataError> {
        let bytes = cursor.slice(entry_offset, IFD_ENTRY_SIZE)?;
        Ok(IfdEntry {
            tag: order.read_u16(&bytes[0..2]),
            field_type_raw: order.read_u16(&bytes[2..4]),
            count: order.read_u32(&bytes[4..8]),
            value_offset: order.read_u32(&bytes[8..12]),
            entry_offset,
        })
    }

    /// The field type, if supported.
    #[inline]
    pub fn field_type(&self) -> Option<FieldType> {
        FieldType::from_u16(self.field_type_raw)
    }

    /// Absolute offset of the 4-byte inline value field.
    #[inline]
    pub fn inline_value_offset(&self) -> usize {
        self.entry_offset + 8
    }
}

// =============================================================================
// Directory reading
// =============================================================================

/// Decode every entry of the directory at `dir_offset` (absolute).
///
/// Entries with an unsupported type are skipped. A truncated entry or value
/// ends the walk; everything decoded up to that point is returned.
///
/// # Errors
/// `TruncatedData` if the entry count itself cannot be read.
pub fn read_directory(
    cursor: &ByteCursor<'_>,
    header: &TiffHeader,
    dir_offset: usize,
) -> Result<RawTagMap, MetadataError> {
    let order = header.byte_order;
    let entry_count = cursor.read_u16(dir_offset, order)?;
    let mut tags = RawTagMap::new();

    for i in 0..entry_count as usize {
        let entry_offset = dir_offset + 2 + i * IFD_ENTRY_SIZE;

        let entry = match IfdEntry::parse(cursor, entry_offset, order) {
            Ok(entry) => entry,
            Err(err) => {
                debug!(dir_offset, index = i, error = %err, "directory truncated");
                break;
            }
        };

        match decode_value(cursor, &entry, header.tiff_start, order) {
            Ok(value) => {
                tags.insert(entry.tag, value);
            }
            Err(MetadataError::UnsupportedTagType(code)) => {
                debug!(tag = entry.tag, field_type = code, "skipping unsupported tag type");
            }
            Err(MetadataError::MalformedTiff(TiffError::EmptyValue(tag))) => {
                debug!(tag, "skipping entry without values");
            }
            Err(err) => {
                debug!(tag = entry.tag, error = %err, "tag value out of range, stopping directory");
                break;
            }
        }
    }

    Ok(tags)
}

/// Read the offset of the directory that follows the one at `dir_offset`.
///
/// Returns the raw value (relative to the TIFF header); 0 means no further
/// directory.
pub fn next_ifd_offset(
    cursor: &ByteCursor<'_>,
    header: &TiffHeader,
    dir_offset: usize,
) -> Result<u32, MetadataError> {
    let order = header.byte_order;
    let entry_count = cursor.read_u16(dir_offset, order)? as usize;
    cursor.read_u32(dir_offset + 2 + entry_count * IFD_ENTRY_SIZE, order)
}

// =============================================================================
// Tests
// =============================================================================
