//! Metadata parsers for JPEG files.
//!
//! Each metadata family has its own independent extraction pass over the
//! same buffer:
//!
//! - **EXIF**: APP1 segment located by walking markers ([`jpeg`]), decoded as
//!   a TIFF stream ([`tiff`], [`exif`])
//! - **IPTC**: Photoshop 8BIM resource located by signature scan ([`iptc`])
//! - **XMP**: RDF/XML packet located by text scan ([`xmp`])
//!
//! A failure in one pass never affects the others.

pub mod exif;
pub mod iptc;
pub mod jpeg;
pub mod tiff;
pub mod xmp;

pub use exif::{read_exif, ExifData};
pub use iptc::{read_iptc, IptcField, IptcFieldMap, IptcValue};
pub use jpeg::{check_soi, find_exif_segment, segments, JpegSegment};
pub use xmp::{read_xmp, XmpNode, XmpValue};
