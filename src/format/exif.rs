//! EXIF extraction.
//!
//! Reads the TIFF stream carried by the EXIF APP1 segment and flattens the
//! primary directories into one tag map:
//!
//! ```text
//! IFD0 ──┬── 0x8769 ──> Exif sub-IFD ── 0xA005 ──> Interoperability IFD
//!        ├── 0x8825 ──> GPS sub-IFD
//!        └── next ────> IFD1 (thumbnail)
//! ```
//!
//! IFD0, Exif and GPS entries are merged in that order, later directories
//! overwriting earlier ones on id collisions. The Interoperability IFD and
//! the thumbnail directory are kept apart because their ids would clash with
//! the primary namespace.

use serde::Serialize;
use tracing::debug;

use crate::error::MetadataError;
use crate::format::jpeg::find_exif_segment;
use crate::format::tiff::{read_directory, read_thumbnail, RawTagMap, Thumbnail, TiffHeader, TiffTag};
use crate::io::{ByteCursor, ByteOrder};

/// Decoded EXIF metadata of one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExifData {
    /// Byte order declared by the TIFF header
    #[serde(skip)]
    pub byte_order: ByteOrder,

    /// IFD0, Exif and GPS tags merged by id
    pub tags: RawTagMap,

    /// Tags of the Interoperability IFD, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interoperability: Option<RawTagMap>,

    /// The thumbnail directory (IFD1), when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Thumbnail>,
}

impl ExifData {
    /// Look up a merged tag by id.
    pub fn get(&self, tag: u16) -> Option<&crate::format::tiff::TagValue> {
        self.tags.get(&tag)
    }
}

/// Extract EXIF metadata from a JPEG buffer.
///
/// # Errors
/// - `NotAJpeg` if the buffer does not start with SOI
/// - `NoEmbeddedMetadata(Exif)` if there is no EXIF APP1 segment
/// - `MalformedTiff` if the TIFF header is invalid
/// - `TruncatedData` if IFD0 cannot be read
pub fn read_exif(data: &[u8]) -> Result<ExifData, MetadataError> {
    let segment = find_exif_segment(data)?;
    let cursor = ByteCursor::new(data);
    let header = TiffHeader::parse(&cursor, segment.payload_offset)?;

    debug!(
        segment_offset = segment.offset,
        big_endian = header.byte_order.is_big_endian(),
        first_ifd = header.first_ifd_offset,
        "found EXIF segment"
    );

    let ifd0_offset = header
        .absolute(header.first_ifd_offset)
        .ok_or(MetadataError::TruncatedData {
            offset: header.tiff_start,
            requested: header.first_ifd_offset as usize,
            size: data.len(),
        })?;
    let mut tags = read_directory(&cursor, &header, ifd0_offset)?;

    let mut interoperability = None;
    if let Some(exif_tags) = read_sub_ifd(&cursor, &header, &tags, TiffTag::ExifIfdPointer) {
        interoperability = read_sub_ifd(
            &cursor,
            &header,
            &exif_tags,
            TiffTag::InteroperabilityIfdPointer,
        );
        tags.extend(exif_tags);
    }

    if let Some(gps_tags) = read_sub_ifd(&cursor, &header, &tags, TiffTag::GpsInfoIfdPointer) {
        tags.extend(gps_tags);
    }

    let thumbnail = read_thumbnail(&cursor, &header, ifd0_offset);

    debug!(
        tags = tags.len(),
        interoperability = interoperability.is_some(),
        thumbnail = thumbnail.is_some(),
        "decoded EXIF"
    );

    Ok(ExifData {
        byte_order: header.byte_order,
        tags,
        interoperability,
        thumbnail,
    })
}

/// Follow a pointer tag to its sub-directory.
///
/// A missing or zero pointer yields `None`, as does a directory that cannot
/// be read; the parent tags are unaffected either way.
fn read_sub_ifd(
    cursor: &ByteCursor<'_>,
    header: &TiffHeader,
    parent: &RawTagMap,
    pointer: TiffTag,
) -> Option<RawTagMap> {
    let relative = parent.get(&pointer.as_u16())?.as_u32().filter(|&o| o != 0)?;
    let offset = header.absolute(relative)?;

    match read_directory(cursor, header, offset) {
        Ok(tags) => Some(tags),
        Err(err) => {
            debug!(pointer = ?pointer, offset, error = %err, "unreadable sub-IFD");
            None
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
