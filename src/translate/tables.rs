//! Tag name and enumeration tables (EXIF 2.3).

use std::collections::HashMap;

// =============================================================================
// Tag Names
// =============================================================================

/// Exif sub-IFD tags.
pub const EXIF_TAGS: &[(u16, &str)] = &[
    // version tags
    (0x9000, "ExifVersion"),
    (0xA000, "FlashpixVersion"),
    // colorspace tags
    (0xA001, "ColorSpace"),
    // image configuration
    (0xA002, "PixelXDimension"),
    (0xA003, "PixelYDimension"),
    (0x9101, "ComponentsConfiguration"),
    (0x9102, "CompressedBitsPerPixel"),
    // user information
    (0x927C, "MakerNote"),
    (0x9286, "UserComment"),
    // related file
    (0xA004, "RelatedSoundFile"),
    // date and time
    (0x9003, "DateTimeOriginal"),
    (0x9004, "DateTimeDigitized"),
    (0x9290, "SubsecTime"),
    (0x9291, "SubsecTimeOriginal"),
    (0x9292, "SubsecTimeDigitized"),
    // picture-taking conditions
    (0x829A, "ExposureTime"),
    (0x829D, "FNumber"),
    (0x8822, "ExposureProgram"),
    (0x8824, "SpectralSensitivity"),
    (0x8827, "ISOSpeedRatings"),
    (0x8828, "OECF"),
    (0x9201, "ShutterSpeedValue"),
    (0x9202, "ApertureValue"),
    (0x9203, "BrightnessValue"),
    (0x9204, "ExposureBias"),
    (0x9205, "MaxApertureValue"),
    (0x9206, "SubjectDistance"),
    (0x9207, "MeteringMode"),
    (0x9208, "LightSource"),
    (0x9209, "Flash"),
    (0x9214, "SubjectArea"),
    (0x920A, "FocalLength"),
    (0xA20B, "FlashEnergy"),
    (0xA20C, "SpatialFrequencyResponse"),
    (0xA20E, "FocalPlaneXResolution"),
    (0xA20F, "FocalPlaneYResolution"),
    (0xA210, "FocalPlaneResolutionUnit"),
    (0xA214, "SubjectLocation"),
    (0xA215, "ExposureIndex"),
    (0xA217, "SensingMethod"),
    (0xA300, "FileSource"),
    (0xA301, "SceneType"),
    (0xA302, "CFAPattern"),
    (0xA401, "CustomRendered"),
    (0xA402, "ExposureMode"),
    (0xA403, "WhiteBalance"),
    (0xA404, "DigitalZoomRation"),
    (0xA405, "FocalLengthIn35mmFilm"),
    (0xA406, "SceneCaptureType"),
    (0xA407, "GainControl"),
    (0xA408, "Contrast"),
    (0xA409, "Saturation"),
    (0xA40A, "Sharpness"),
    (0xA40B, "DeviceSettingDescription"),
    (0xA40C, "SubjectDistanceRange"),
    // other tags
    (0xA005, "InteroperabilityIFDPointer"),
    (0xA420, "ImageUniqueID"),
];

/// IFD0 (TIFF) tags.
pub const TIFF_TAGS: &[(u16, &str)] = &[
    (0x0100, "ImageWidth"),
    (0x0101, "ImageHeight"),
    (0x8769, "ExifIFDPointer"),
    (0x8825, "GPSInfoIFDPointer"),
    (0xA005, "InteroperabilityIFDPointer"),
    (0x0102, "BitsPerSample"),
    (0x0103, "Compression"),
    (0x0106, "PhotometricInterpretation"),
    (0x0112, "Orientation"),
    (0x0115, "SamplesPerPixel"),
    (0x011C, "PlanarConfiguration"),
    (0x0212, "YCbCrSubSampling"),
    (0x0213, "YCbCrPositioning"),
    (0x011A, "XResolution"),
    (0x011B, "YResolution"),
    (0x0128, "ResolutionUnit"),
    (0x0111, "StripOffsets"),
    (0x0116, "RowsPerStrip"),
    (0x0117, "StripByteCounts"),
    (0x0201, "JPEGInterchangeFormat"),
    (0x0202, "JPEGInterchangeFormatLength"),
    (0x012D, "TransferFunction"),
    (0x013E, "WhitePoint"),
    (0x013F, "PrimaryChromaticities"),
    (0x0211, "YCbCrCoefficients"),
    (0x0214, "ReferenceBlackWhite"),
    (0x0132, "DateTime"),
    (0x010E, "ImageDescription"),
    (0x010F, "Make"),
    (0x0110, "Model"),
    (0x0131, "Software"),
    (0x013B, "Artist"),
    (0x8298, "Copyright"),
];

/// GPS sub-IFD tags.
pub const GPS_TAGS: &[(u16, &str)] = &[
    (0x0000, "GPSVersionID"),
    (0x0001, "GPSLatitudeRef"),
    (0x0002, "GPSLatitude"),
    (0x0003, "GPSLongitudeRef"),
    (0x0004, "GPSLongitude"),
    (0x0005, "GPSAltitudeRef"),
    (0x0006, "GPSAltitude"),
    (0x0007, "GPSTimeStamp"),
    (0x0008, "GPSSatellites"),
    (0x0009, "GPSStatus"),
    (0x000A, "GPSMeasureMode"),
    (0x000B, "GPSDOP"),
    (0x000C, "GPSSpeedRef"),
    (0x000D, "GPSSpeed"),
    (0x000E, "GPSTrackRef"),
    (0x000F, "GPSTrack"),
    (0x0010, "GPSImgDirectionRef"),
    (0x0011, "GPSImgDirection"),
    (0x0012, "GPSMapDatum"),
    (0x0013, "GPSDestLatitudeRef"),
    (0x0014, "GPSDestLatitude"),
    (0x0015, "GPSDestLongitudeRef"),
    (0x0016, "GPSDestLongitude"),
    (0x0017, "GPSDestBearingRef"),
    (0x0018, "GPSDestBearing"),
    (0x0019, "GPSDestDistanceRef"),
    (0x001A, "GPSDestDistance"),
    (0x001B, "GPSProcessingMethod"),
    (0x001C, "GPSAreaInformation"),
    (0x001D, "GPSDateStamp"),
    (0x001E, "GPSDifferential"),
];

/// IFD1 (thumbnail) tags.
pub const IFD1_TAGS: &[(u16, &str)] = &[
    (0x0100, "ImageWidth"),
    (0x0101, "ImageHeight"),
    (0x0102, "BitsPerSample"),
    (0x0103, "Compression"),
    (0x0106, "PhotometricInterpretation"),
    (0x0111, "StripOffsets"),
    (0x0112, "Orientation"),
    (0x0115, "SamplesPerPixel"),
    (0x0116, "RowsPerStrip"),
    (0x0117, "StripByteCounts"),
    (0x011A, "XResolution"),
    (0x011B, "YResolution"),
    (0x011C, "PlanarConfiguration"),
    (0x0128, "ResolutionUnit"),
    // aka ThumbnailOffset / JPEGInterchangeFormat
    (0x0201, "JpegIFOffset"),
    // aka ThumbnailLength / JPEGInterchangeFormatLength
    (0x0202, "JpegIFByteCount"),
    (0x0211, "YCbCrCoefficients"),
    (0x0212, "YCbCrSubSampling"),
    (0x0213, "YCbCrPositioning"),
    (0x0214, "ReferenceBlackWhite"),
];

/// Interoperability IFD tags.
pub const INTEROPERABILITY_TAGS: &[(u16, &str)] = &[
    (0x0001, "InteroperabilityIndex"),
    (0x0002, "InteroperabilityVersion"),
    (0x1000, "RelatedImageFileFormat"),
    (0x1001, "RelatedImageWidth"),
    (0x1002, "RelatedImageLength"),
];

// =============================================================================
// Enumerations
// =============================================================================

pub const EXPOSURE_PROGRAM: &[(u32, &str)] = &[
    (0, "Not defined"),
    (1, "Manual"),
    (2, "Normal program"),
    (3, "Aperture priority"),
    (4, "Shutter priority"),
    (5, "Creative program"),
    (6, "Action program"),
    (7, "Portrait mode"),
    (8, "Landscape mode"),
];

pub const METERING_MODE: &[(u32, &str)] = &[
    (0, "Unknown"),
    (1, "Average"),
    (2, "CenterWeightedAverage"),
    (3, "Spot"),
    (4, "MultiSpot"),
    (5, "Pattern"),
    (6, "Partial"),
    (255, "Other"),
];

pub const LIGHT_SOURCE: &[(u32, &str)] = &[
    (0, "Unknown"),
    (1, "Daylight"),
    (2, "Fluorescent"),
    (3, "Tungsten (incandescent light)"),
    (4, "Flash"),
    (9, "Fine weather"),
    (10, "Cloudy weather"),
    (11, "Shade"),
    (12, "Daylight fluorescent (D 5700 - 7100K)"),
    (13, "Day white fluorescent (N 4600 - 5400K)"),
    (14, "Cool white fluorescent (W 3900 - 4500K)"),
    (15, "White fluorescent (WW 3200 - 3700K)"),
    (17, "Standard light A"),
    (18, "Standard light B"),
    (19, "Standard light C"),
    (20, "D55"),
    (21, "D65"),
    (22, "D75"),
    (23, "D50"),
    (24, "ISO studio tungsten"),
    (255, "Other"),
];

pub const FLASH: &[(u32, &str)] = &[
    (0x0000, "Flash did not fire"),
    (0x0001, "Flash fired"),
    (0x0005, "Strobe return light not detected"),
    (0x0007, "Strobe return light detected"),
    (0x0009, "Flash fired, compulsory flash mode"),
    (0x000D, "Flash fired, compulsory flash mode, return light not detected"),
    (0x000F, "Flash fired, compulsory flash mode, return light detected"),
    (0x0010, "Flash did not fire, compulsory flash mode"),
    (0x0018, "Flash did not fire, auto mode"),
    (0x0019, "Flash fired, auto mode"),
    (0x001D, "Flash fired, auto mode, return light not detected"),
    (0x001F, "Flash fired, auto mode, return light detected"),
    (0x0020, "No flash function"),
    (0x0041, "Flash fired, red-eye reduction mode"),
    (0x0045, "Flash fired, red-eye reduction mode, return light not detected"),
    (0x0047, "Flash fired, red-eye reduction mode, return light detected"),
    (0x0049, "Flash fired, compulsory flash mode, red-eye reduction mode"),
    (
        0x004D,
        "Flash fired, compulsory flash mode, red-eye reduction mode, return light not detected",
    ),
    (
        0x004F,
        "Flash fired, compulsory flash mode, red-eye reduction mode, return light detected",
    ),
    (0x0059, "Flash fired, auto mode, red-eye reduction mode"),
    (
        0x005D,
        "Flash fired, auto mode, return light not detected, red-eye reduction mode",
    ),
    (
        0x005F,
        "Flash fired, auto mode, return light detected, red-eye reduction mode",
    ),
];

pub const SENSING_METHOD: &[(u32, &str)] = &[
    (1, "Not defined"),
    (2, "One-chip color area sensor"),
    (3, "Two-chip color area sensor"),
    (4, "Three-chip color area sensor"),
    (5, "Color sequential area sensor"),
    (7, "Trilinear sensor"),
    (8, "Color sequential linear sensor"),
];

pub const SCENE_CAPTURE_TYPE: &[(u32, &str)] = &[
    (0, "Standard"),
    (1, "Landscape"),
    (2, "Portrait"),
    (3, "Night scene"),
];

pub const SCENE_TYPE: &[(u32, &str)] = &[(1, "Directly photographed")];

pub const CUSTOM_RENDERED: &[(u32, &str)] = &[(0, "Normal process"), (1, "Custom process")];

pub const WHITE_BALANCE: &[(u32, &str)] =
    &[(0, "Auto white balance"), (1, "Manual white balance")];

pub const GAIN_CONTROL: &[(u32, &str)] = &[
    (0, "None"),
    (1, "Low gain up"),
    (2, "High gain up"),
    (3, "Low gain down"),
    (4, "High gain down"),
];

pub const CONTRAST: &[(u32, &str)] = &[(0, "Normal"), (1, "Soft"), (2, "Hard")];

pub const SATURATION: &[(u32, &str)] =
    &[(0, "Normal"), (1, "Low saturation"), (2, "High saturation")];

pub const SHARPNESS: &[(u32, &str)] = &[(0, "Normal"), (1, "Soft"), (2, "Hard")];

pub const SUBJECT_DISTANCE_RANGE: &[(u32, &str)] = &[
    (0, "Unknown"),
    (1, "Macro"),
    (2, "Close view"),
    (3, "Distant view"),
];

pub const FILE_SOURCE: &[(u32, &str)] = &[(3, "DSC")];

/// Channel codes of ComponentsConfiguration.
pub const COMPONENTS: &[(u32, &str)] = &[
    (0, ""),
    (1, "Y"),
    (2, "Cb"),
    (3, "Cr"),
    (4, "R"),
    (5, "G"),
    (6, "B"),
];

/// Enumeration tables keyed by the tag name they apply to.
pub const ENUMERATIONS: &[(&str, &[(u32, &str)])] = &[
    ("ExposureProgram", EXPOSURE_PROGRAM),
    ("MeteringMode", METERING_MODE),
    ("LightSource", LIGHT_SOURCE),
    ("Flash", FLASH),
    ("SensingMethod", SENSING_METHOD),
    ("SceneCaptureType", SCENE_CAPTURE_TYPE),
    ("SceneType", SCENE_TYPE),
    ("CustomRendered", CUSTOM_RENDERED),
    ("WhiteBalance", WHITE_BALANCE),
    ("GainControl", GAIN_CONTROL),
    ("Contrast", CONTRAST),
    ("Saturation", SATURATION),
    ("Sharpness", SHARPNESS),
    ("SubjectDistanceRange", SUBJECT_DISTANCE_RANGE),
    ("FileSource", FILE_SOURCE),
];

// =============================================================================
// TagTables
// =============================================================================

/// Tag id to name.
pub type NameTable = HashMap<u16, String>;

/// Raw value to label.
pub type LabelTable = HashMap<u32, String>;

/// Lookup tables used by the translator.
///
/// Tables are plain owned data: callers can start from
/// [`TagTables::standard`] and override or extend individual entries, and
/// several translators with different tables can coexist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagTables {
    /// Names for the merged IFD0/Exif/GPS map
    pub tags: NameTable,

    /// Names for the thumbnail directory
    pub thumbnail_tags: NameTable,

    /// Names for the Interoperability directory
    pub interoperability_tags: NameTable,

    /// Enumeration tables keyed by tag name
    pub enumerations: HashMap<String, LabelTable>,

    /// Channel labels for ComponentsConfiguration
    pub components: LabelTable,
}

impl TagTables {
    /// The standard EXIF 2.3 tables.
    ///
    /// The main name table merges the Exif, TIFF and GPS tables in that
    /// order; later tables win on id collisions.
    pub fn standard() -> Self {
        let mut tags = NameTable::new();
        for table in [EXIF_TAGS, TIFF_TAGS, GPS_TAGS] {
            tags.extend(names(table));
        }

        TagTables {
            tags,
            thumbnail_tags: names(IFD1_TAGS).collect(),
            interoperability_tags: names(INTEROPERABILITY_TAGS).collect(),
            enumerations: ENUMERATIONS
                .iter()
                .map(|(name, table)| (name.to_string(), labels(table).collect()))
                .collect(),
            components: labels(COMPONENTS).collect(),
        }
    }

    /// Add or replace a main tag name.
    pub fn with_tag_name(mut self, tag: u16, name: impl Into<String>) -> Self {
        self.tags.insert(tag, name.into());
        self
    }

    /// Add or replace an enumeration label for the tag called `tag_name`.
    pub fn with_label(
        mut self,
        tag_name: impl Into<String>,
        value: u32,
        label: impl Into<String>,
    ) -> Self {
        self.enumerations
            .entry(tag_name.into())
            .or_default()
            .insert(value, label.into());
        self
    }

    /// Whether `tag_name` has an enumeration table.
    ///
    /// Values of such tags are always replaced by a label, absent when the
    /// table has no entry for the value.
    pub fn is_enumerated(&self, tag_name: &str) -> bool {
        self.enumerations.contains_key(tag_name)
    }

    /// Label for `value` in the enumeration of `tag_name`.
    pub fn label(&self, tag_name: &str, value: u32) -> Option<&str> {
        self.enumerations
            .get(tag_name)?
            .get(&value)
            .map(String::as_str)
    }
}

fn names(table: &'static [(u16, &str)]) -> impl Iterator<Item = (u16, String)> {
    table.iter().map(|&(id, name)| (id, name.to_string()))
}

fn labels(table: &'static [(u32, &str)]) -> impl Iterator<Item = (u32, String)> {
    table.iter().map(|&(value, label)| (value, label.to_string()))
}

// =============================================================================
// Tests
// =============================================================================
