//! TIFF tag and field type definitions.
//!
//! This module defines the vocabulary for EXIF directory parsing:
//! - Field types that determine how entry values are encoded
//! - Tag IDs that drive structure (sub-IFD pointers, thumbnail location) or
//!   receive special treatment when translated to human-readable form
//!
//! Tag ids are shared between namespaces (IFD0/Exif, GPS, IFD1,
//! Interoperability); the same number means different things depending on
//! which directory it came from.

// =============================================================================
// TIFF Field Types
// =============================================================================

/// TIFF field types that determine how values are encoded.
///
/// Each field type has a fixed element size, which decides whether a value
/// fits inline in the 4-byte value field of a directory entry. Types not
/// listed here (SBYTE, SSHORT, FLOAT, DOUBLE) are reported as unsupported and
/// the tag is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum FieldType {
    /// Unsigned 8-bit integer (1 byte)
    Byte = 1,

    /// 8-bit ASCII character, NUL terminated (1 byte)
    Ascii = 2,

    /// Unsigned 16-bit integer (2 bytes)
    Short = 3,

    /// Unsigned 32-bit integer (4 bytes)
    Long = 4,

    /// Two LONGs: numerator, denominator (8 bytes)
    Rational = 5,

    /// Undefined byte data (1 byte per element)
    Undefined = 7,

    /// Signed 32-bit integer (4 bytes)
    SLong = 9,

    /// Two SLONGs: numerator, denominator (8 bytes)
    SRational = 10,
}

impl FieldType {
    /// Maximum bytes that can be stored inline in an IFD entry.
    pub const INLINE_THRESHOLD: usize = 4;

    /// Size of a single value of this type in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            FieldType::Byte | FieldType::Ascii | FieldType::Undefined => 1,
            FieldType::Short => 2,
            FieldType::Long | FieldType::SLong => 4,
            FieldType::Rational | FieldType::SRational => 8,
        }
    }

    /// Create a FieldType from its numeric value.
    ///
    /// Returns `None` for unsupported or unknown type values.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(FieldType::Byte),
            2 => Some(FieldType::Ascii),
            3 => Some(FieldType::Short),
            4 => Some(FieldType::Long),
            5 => Some(FieldType::Rational),
            7 => Some(FieldType::Undefined),
            9 => Some(FieldType::SLong),
            10 => Some(FieldType::SRational),
            _ => None,
        }
    }

    /// Check if `count` values of this type fit in the entry's value field.
    #[inline]
    pub fn fits_inline(self, count: u32) -> bool {
        (self.size_in_bytes() as u64) * (count as u64) <= Self::INLINE_THRESHOLD as u64
    }
}

// =============================================================================
// Tags
// =============================================================================

/// EXIF/TIFF tag IDs with structural or presentational meaning.
///
/// Every other tag is decoded generically and keyed by its numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum TiffTag {
    // -------------------------------------------------------------------------
    // Directory structure (IFD0)
    // -------------------------------------------------------------------------
    /// Offset of the Exif sub-IFD
    ExifIfdPointer = 0x8769,

    /// Offset of the GPS sub-IFD
    GpsInfoIfdPointer = 0x8825,

    /// Offset of the Interoperability sub-IFD (inside the Exif sub-IFD)
    InteroperabilityIfdPointer = 0xA005,

    // -------------------------------------------------------------------------
    // Thumbnail (IFD1)
    // -------------------------------------------------------------------------
    /// Compression scheme (6 = JPEG thumbnail)
    Compression = 0x0103,

    /// Photometric interpretation (2 = RGB)
    PhotometricInterpretation = 0x0106,

    /// Offset of the JPEG thumbnail stream, relative to the TIFF header
    JpegInterchangeFormat = 0x0201,

    /// Length of the JPEG thumbnail stream
    JpegInterchangeFormatLength = 0x0202,

    // -------------------------------------------------------------------------
    // Values with bespoke formatting
    // -------------------------------------------------------------------------
    /// GPS tag version, four bytes (GPS namespace)
    GpsVersionId = 0x0000,

    /// Exif version, four ASCII bytes
    ExifVersion = 0x9000,

    /// Flashpix version, four ASCII bytes
    FlashpixVersion = 0xA000,

    /// Channel order, four component codes
    ComponentsConfiguration = 0x9101,

    /// Capture date and time
    DateTimeOriginal = 0x9003,

    // -------------------------------------------------------------------------
    // Enumerated values
    // -------------------------------------------------------------------------
    ExposureProgram = 0x8822,
    MeteringMode = 0x9207,
    LightSource = 0x9208,
    Flash = 0x9209,
    SensingMethod = 0xA217,
    FileSource = 0xA300,
    SceneType = 0xA301,
    CustomRendered = 0xA401,
    WhiteBalance = 0xA403,
    SceneCaptureType = 0xA406,
    GainControl = 0xA407,
    Contrast = 0xA408,
    Saturation = 0xA409,
    Sharpness = 0xA40A,
    SubjectDistanceRange = 0xA40C,
}

impl TiffTag {
    /// Tags that have a standard enumeration table.
    pub const ENUMERATED: [TiffTag; 15] = [
        TiffTag::LightSource,
        TiffTag::Flash,
        TiffTag::MeteringMode,
        TiffTag::ExposureProgram,
        TiffTag::SensingMethod,
        TiffTag::SceneCaptureType,
        TiffTag::SceneType,
        TiffTag::CustomRendered,
        TiffTag::WhiteBalance,
        TiffTag::GainControl,
        TiffTag::Contrast,
        TiffTag::Saturation,
        TiffTag::Sharpness,
        TiffTag::SubjectDistanceRange,
        TiffTag::FileSource,
    ];

    /// Create a TiffTag from its numeric value.
    ///
    /// Returns `None` for tags without special handling.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x8769 => Some(TiffTag::ExifIfdPointer),
            0x8825 => Some(TiffTag::GpsInfoIfdPointer),
            0xA005 => Some(TiffTag::InteroperabilityIfdPointer),
            0x0103 => Some(TiffTag::Compression),
            0x0106 => Some(TiffTag::PhotometricInterpretation),
            0x0201 => Some(TiffTag::JpegInterchangeFormat),
            0x0202 => Some(TiffTag::JpegInterchangeFormatLength),
            0x0000 => Some(TiffTag::GpsVersionId),
            0x9000 => Some(TiffTag::ExifVersion),
            0xA000 => Some(TiffTag::FlashpixVersion),
            0x9101 => Some(TiffTag::ComponentsConfiguration),
            0x9003 => Some(TiffTag::DateTimeOriginal),
            _ => Self::ENUMERATED
                .iter()
                .copied()
                .find(|tag| tag.as_u16() == value),
        }
    }

    /// Get the numeric tag ID.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

// =============================================================================
// Compression Values
// =============================================================================

/// TIFF compression scheme identifiers, as found in a thumbnail directory.
///
/// EXIF thumbnails use value 6 for an embedded JPEG stream and value 1 for
/// uncompressed strips. Only the JPEG case yields image bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Compression {
    /// No compression (uncompressed strips)
    None = 1,

    /// LZW compression
    Lzw = 5,

    /// JPEG interchange format stream (the EXIF thumbnail encoding)
    Jpeg = 6,

    /// "New-style" JPEG (TIFF technote 2)
    ModernJpeg = 7,

    /// Deflate/zlib compression
    Deflate = 8,
}

impl Compression {
    /// Create a Compression from its numeric value.
    ///
    /// Returns `None` for unrecognized compression values.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(Compression::None),
            5 => Some(Compression::Lzw),
            6 => Some(Compression::Jpeg),
            7 => Some(Compression::ModernJpeg),
            8 => Some(Compression::Deflate),
            _ => None,
        }
    }

    /// Get a human-readable name for the compression scheme.
    pub const fn name(self) -> &'static str {
        match self {
            Compression::None => "None",
            Compression::Lzw => "LZW",
            Compression::Jpeg => "JPEG",
            Compression::ModernJpeg => "JPEG (TIFF 6.0 technote 2)",
            Compression::Deflate => "Deflate",
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
