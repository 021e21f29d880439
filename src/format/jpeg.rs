//! JPEG segment scanning.
//!
//! A JPEG stream is a sequence of marker-delimited segments. Metadata lives in
//! the application segments that precede the entropy-coded scan:
//!
//! ```text
//! FF D8                      SOI
//! FF E1 LL LL "Exif\0\0" ... APP1 carrying a TIFF stream (EXIF)
//! FF E1 LL LL "http://..."   APP1 carrying an XMP packet
//! FF ED LL LL "Photoshop"    APP13 carrying 8BIM resources (IPTC)
//! FF DA ...                  SOS, entropy-coded data follows
//! ```
//!
//! The length field `LL LL` is big-endian and counts itself, so the payload
//! of a segment at `offset` starts at `offset + 4` and is `LL LL - 2` bytes.
//!
//! Only the EXIF lookup walks segments. IPTC and XMP are located by linear
//! signature scans over the whole buffer (see [`super::iptc`] and
//! [`super::xmp`]), which also catches payloads that producers place in
//! unexpected segments.

use tracing::trace;

use crate::error::{MetadataError, MetadataKind};
use crate::io::{ByteCursor, ByteOrder};

// =============================================================================
// JPEG Markers
// =============================================================================

/// Start Of Image marker
pub const SOI: [u8; 2] = [0xFF, 0xD8];

/// End Of Image marker (second byte)
pub const EOI: u8 = 0xD9;

/// Start Of Scan marker (second byte)
pub const SOS: u8 = 0xDA;

/// Application segment 1 (EXIF / XMP) marker (second byte)
pub const APP1: u8 = 0xE1;

/// Application segment 13 (Photoshop IRB) marker (second byte)
pub const APP13: u8 = 0xED;

/// Prefix byte of every marker
const MARKER_PREFIX: u8 = 0xFF;

/// Signature that opens an EXIF APP1 payload.
///
/// Two padding bytes follow it before the TIFF header. Their value is not
/// checked; some writers do not zero them.
pub const EXIF_SIGNATURE: &[u8; 4] = b"Exif";

// =============================================================================
// Segments
// =============================================================================

/// A marker segment located inside a JPEG buffer.
///
/// Offsets are absolute positions in the scanned buffer. The payload length is
/// the value declared by the segment and may exceed the buffer for truncated
/// files; readers must still bounds-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegSegment {
    /// Marker byte following 0xFF (e.g. 0xE1 for APP1)
    pub marker: u8,

    /// Offset of the 0xFF prefix byte
    pub offset: usize,

    /// Offset of the first payload byte (after the length field)
    pub payload_offset: usize,

    /// Declared payload length (segment length minus the length field)
    pub payload_len: usize,
}

/// Check that the buffer starts with the JPEG SOI marker.
pub fn check_soi(data: &[u8]) -> Result<(), MetadataError> {
    if data.len() >= 2 && data[0..2] == SOI {
        Ok(())
    } else {
        Err(MetadataError::NotAJpeg)
    }
}

/// Iterator over the marker segments that precede the image scan.
///
/// Iteration stops at SOS or EOI, at the end of the buffer, or at the first
/// byte that should be a marker prefix but is not. A malformed stream simply
/// ends the iteration; it never produces an error.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    cursor: ByteCursor<'a>,
    offset: usize,
    done: bool,
}

/// Walk the segments of a JPEG buffer.
///
/// # Errors
/// `NotAJpeg` if the buffer does not start with SOI.
pub fn segments(data: &[u8]) -> Result<Segments<'_>, MetadataError> {
    check_soi(data)?;
    Ok(Segments {
        cursor: ByteCursor::new(data),
        offset: SOI.len(),
        done: false,
    })
}

impl Iterator for Segments<'_> {
    type Item = JpegSegment;

    fn next(&mut self) -> Option<JpegSegment> {
        while !self.done && self.offset < self.cursor.len() {
            let prefix = self.cursor.read_u8(self.offset).ok()?;
            if prefix != MARKER_PREFIX {
                trace!(
                    offset = self.offset,
                    found = prefix,
                    "invalid marker prefix, stopping segment scan"
                );
                self.done = true;
                return None;
            }

            let marker = match self.cursor.read_u8(self.offset + 1) {
                Ok(marker) => marker,
                Err(_) => {
                    self.done = true;
                    return None;
                }
            };

            // Fill bytes: a run of 0xFF may pad before the real marker
            if marker == MARKER_PREFIX {
                self.offset += 1;
                continue;
            }

            if marker == SOS || marker == EOI {
                self.done = true;
                return None;
            }

            let length = match self.cursor.read_u16(self.offset + 2, ByteOrder::BigEndian) {
                Ok(length) if length >= 2 => length as usize,
                _ => {
                    trace!(offset = self.offset, "unreadable segment length");
                    self.done = true;
                    return None;
                }
            };

            let segment = JpegSegment {
                marker,
                offset: self.offset,
                payload_offset: self.offset + 4,
                payload_len: length - 2,
            };
            self.offset += 2 + length;
            return Some(segment);
        }
        None
    }
}

/// Locate the APP1 segment that carries EXIF data.
///
/// APP1 segments whose payload does not start with `"Exif"` (typically the
/// XMP packet) are skipped.
///
/// # Errors
/// - `NotAJpeg` if the buffer does not start with SOI
/// - `NoEmbeddedMetadata(Exif)` if no EXIF APP1 segment precedes the scan
pub fn find_exif_segment(data: &[u8]) -> Result<JpegSegment, MetadataError> {
    let cursor = ByteCursor::new(data);
    segments(data)?
        .filter(|segment| segment.marker == APP1)
        .find(|segment| cursor.matches_at(segment.payload_offset, EXIF_SIGNATURE))
        .ok_or(MetadataError::NoEmbeddedMetadata(MetadataKind::Exif))
}

// =============================================================================
// Tests
// =============================================================================
