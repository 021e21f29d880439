//! # jpeg-meta
//!
//! Extract EXIF, IPTC and XMP metadata embedded in JPEG byte streams
//! without decoding any pixel data.
//!
//! ## Features
//!
//! - **EXIF**: IFD0, Exif, GPS and Interoperability directories, plus the
//!   IFD1 thumbnail and its embedded JPEG blob
//! - **IPTC**: IIM records from the Photoshop APP13 resource block
//! - **XMP**: the `x:xmpmeta` packet parsed into a generic tree
//! - **Translation**: numeric tag ids and enumerated values rendered with
//!   human-readable names through injectable tables
//!
//! ## Architecture
//!
//! - [`io`] - Bounds-checked, endian-aware access to the input buffer
//! - [`mod@format`] - Per-container parsers (JPEG segments, TIFF, IPTC, XMP)
//! - [`translate`] - Tag name and enumeration tables
//! - [`metadata`] - Combined read of every family
//! - [`report`] - Plain-text rendering used by the command-line tool
//! - [`config`] - CLI configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use jpeg_meta::{read_metadata, ReadOptions, Translator};
//!
//! let data = std::fs::read("photo.jpg").unwrap();
//! let metadata = read_metadata(&data, &ReadOptions::default());
//!
//! if let Some(exif) = &metadata.exif {
//!     let tags = Translator::default().translate(exif);
//!     println!("{:?}", tags.get("DateTimeOriginal"));
//! }
//! for (field, value) in &metadata.iptc {
//!     println!("{}: {:?}", field, value.values());
//! }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod io;
pub mod metadata;
pub mod report;
pub mod translate;

// Re-export commonly used types
pub use config::{Config, OutputFormat};
pub use error::{MetadataError, MetadataKind, TiffError};
pub use format::tiff::{
    Compression, FieldType, Rational, RawTagMap, TagValue, Thumbnail, ThumbnailImage, TiffHeader,
    TiffTag,
};
pub use format::{
    read_exif, read_iptc, read_xmp, ExifData, IptcField, IptcFieldMap, IptcValue, XmpNode,
    XmpValue,
};
pub use io::{ByteCursor, ByteOrder};
pub use metadata::{read_metadata, Metadata, ReadOptions};
pub use translate::{HumanTags, HumanValue, TagTables, Translator};
