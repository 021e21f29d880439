//! TIFF decoding for EXIF payloads.
//!
//! EXIF stores its tags as a classic TIFF stream embedded in an APP1 segment.
//!
//! # Key Concepts
//!
//! - **Byte order**: The stream declares its endianness (II = little-endian,
//!   MM = big-endian) in the header. All multi-byte values must be read
//!   respecting this order.
//!
//! - **IFD (Image File Directory)**: A counted list of 12-byte entries. IFD0
//!   holds the primary tags and points to the Exif and GPS sub-directories;
//!   the directory chained after IFD0 (IFD1) describes the thumbnail.
//!
//! - **Inline vs offset values**: Values of at most 4 bytes are stored inside
//!   the entry, larger values at an offset relative to the TIFF header.

mod parser;
mod tags;
mod thumbnail;
mod values;

pub use parser::{
    next_ifd_offset, read_directory, IfdEntry, RawTagMap, TiffHeader, EXIF_HEADER_SIZE,
    IFD_ENTRY_SIZE, TIFF_HEADER_SIZE,
};
pub use tags::{Compression, FieldType, TiffTag};
pub use thumbnail::{read_thumbnail, Thumbnail, ThumbnailImage};
pub use values::{decode_value, Rational, TagValue};
