//! Embedded thumbnail extraction (IFD1).
//!
//! The directory chained after IFD0 describes a reduced-size preview. Only
//! JPEG-compressed previews are materialised: the JPEG stream is located by
//! the `JPEGInterchangeFormat` offset (relative to the TIFF header) and its
//! length. Uncompressed TIFF and RGB previews are reported by their tags
//! alone.

use bytes::Bytes;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::error::MetadataError;
use crate::io::ByteCursor;

use super::parser::{next_ifd_offset, read_directory, RawTagMap, TiffHeader};
use super::tags::{Compression, TiffTag};

/// A thumbnail directory and, for JPEG previews, its image bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Thumbnail {
    /// Tags of IFD1, keyed by id
    pub tags: RawTagMap,

    /// The encoded preview, when it could be located
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ThumbnailImage>,
}

/// An encoded preview image copied out of the EXIF payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailImage {
    pub mime_type: &'static str,
    pub data: Bytes,
}

impl Serialize for ThumbnailImage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ThumbnailImage", 2)?;
        state.serialize_field("mime_type", self.mime_type)?;
        state.serialize_field("length", &self.data.len())?;
        state.end()
    }
}

/// Read the thumbnail that follows the directory at `ifd0_offset` (absolute).
///
/// Returns `None` when there is no further directory, when its offset lies
/// outside the buffer, or when it cannot be read.
pub fn read_thumbnail(
    cursor: &ByteCursor<'_>,
    header: &TiffHeader,
    ifd0_offset: usize,
) -> Option<Thumbnail> {
    let next = match next_ifd_offset(cursor, header, ifd0_offset) {
        Ok(0) => return None,
        Ok(next) => next,
        Err(err) => {
            debug!(error = %err, "no readable next-IFD pointer after IFD0");
            return None;
        }
    };

    let ifd1_offset = header.absolute(next).filter(|&o| o < cursor.len())?;

    let tags = match read_directory(cursor, header, ifd1_offset) {
        Ok(tags) => tags,
        Err(err) => {
            debug!(offset = ifd1_offset, error = %err, "unreadable thumbnail directory");
            return None;
        }
    };

    let image = match thumbnail_compression(&tags) {
        Some(Compression::Jpeg) => match extract_jpeg(cursor, header, &tags) {
            Ok(image) => image,
            Err(err) => {
                debug!(error = %err, "JPEG thumbnail out of range");
                None
            }
        },
        Some(compression) => {
            debug!(compression = compression.name(), "thumbnail image not extracted");
            None
        }
        None => {
            if tag_u32(&tags, TiffTag::PhotometricInterpretation) == Some(2) {
                debug!("RGB thumbnail image not extracted");
            }
            None
        }
    };

    Some(Thumbnail { tags, image })
}

/// Compression of the preview.
///
/// Some writers have been seen to store the scheme under 0x8825, which is
/// honoured when the standard tag is absent.
fn thumbnail_compression(tags: &RawTagMap) -> Option<Compression> {
    tag_u32(tags, TiffTag::Compression)
        .or_else(|| tag_u32(tags, TiffTag::GpsInfoIfdPointer))
        .and_then(|value| Compression::from_u16(u16::try_from(value).ok()?))
}

fn extract_jpeg(
    cursor: &ByteCursor<'_>,
    header: &TiffHeader,
    tags: &RawTagMap,
) -> Result<Option<ThumbnailImage>, MetadataError> {
    let (Some(offset), Some(length)) = (
        tag_u32(tags, TiffTag::JpegInterchangeFormat),
        tag_u32(tags, TiffTag::JpegInterchangeFormatLength),
    ) else {
        return Ok(None);
    };
    if length == 0 {
        return Ok(None);
    }

    let start = header
        .absolute(offset)
        .ok_or(MetadataError::TruncatedData {
            offset: header.tiff_start,
            requested: offset as usize,
            size: cursor.len(),
        })?;
    let data = cursor.copy_range(start, length as usize)?;

    Ok(Some(ThumbnailImage {
        mime_type: "image/jpeg",
        data,
    }))
}

fn tag_u32(tags: &RawTagMap, tag: TiffTag) -> Option<u32> {
    tags.get(&tag.as_u16()).and_then(|v| v.as_u32())
}
