//! Translation integration tests.
//!
//! Tests verify that decoded EXIF data from a JPEG comes out with
//! human-readable names and labels, including the thumbnail directory.

use jpeg_meta::{read_exif, HumanValue, Rational, TagTables, TagValue, Translator};

use super::test_utils::{camera_exif, create_test_rgb_jpeg, ByteOrderType, ExifBuilder, IfdBuilder};

#[test]
fn test_camera_tags_translated() {
    let exif = read_exif(&camera_exif(ByteOrderType::LittleEndian).build_jpeg()).unwrap();
    let tags = Translator::default().translate(&exif);

    assert_eq!(tags.get("Make").and_then(HumanValue::as_str), Some("Canon"));
    assert_eq!(
        tags.get("DateTimeOriginal").and_then(HumanValue::as_str),
        Some("2019:07:14 18:42:07")
    );
    assert_eq!(
        tags.get("ExposureTime"),
        Some(&HumanValue::Raw(TagValue::Rational(Rational::new(1, 250))))
    );
    assert_eq!(tags.get("ExifVersion").and_then(HumanValue::as_str), Some("0230"));
    assert_eq!(tags.get("FlashpixVersion").and_then(HumanValue::as_str), Some("0100"));
    assert_eq!(
        tags.get("ComponentsConfiguration").and_then(HumanValue::as_str),
        Some("YCbCr")
    );
    assert_eq!(tags.get("GPSVersionID").and_then(HumanValue::as_str), Some("2.3.0.0"));
    assert_eq!(tags.get("GPSLatitudeRef").and_then(HumanValue::as_str), Some("N"));
}

#[test]
fn test_enumerated_labels() {
    let exif = read_exif(&camera_exif(ByteOrderType::BigEndian).build_jpeg()).unwrap();
    let tags = Translator::default().translate(&exif);

    assert_eq!(tags.get("LightSource").and_then(HumanValue::as_str), Some("Other"));
    assert_eq!(tags.get("MeteringMode").and_then(HumanValue::as_str), Some("Pattern"));
    assert_eq!(
        tags.get("Flash").and_then(HumanValue::as_str),
        Some("Flash fired, auto mode")
    );
}

#[test]
fn test_unlabelled_light_source() {
    let data = ExifBuilder::new()
        .exif_ifd(IfdBuilder::new().short(0x9208, 99))
        .build_jpeg();
    let exif = read_exif(&data).unwrap();
    let tags = Translator::default().translate(&exif);

    assert_eq!(tags.get("LightSource"), Some(&HumanValue::Label(None)));
}

#[test]
fn test_thumbnail_tags_use_thumbnail_names() {
    let data = camera_exif(ByteOrderType::LittleEndian)
        .thumbnail_ifd(IfdBuilder::new().long(0x0100, 160))
        .jpeg_thumbnail(create_test_rgb_jpeg(16, 16, 75))
        .build_jpeg();
    let exif = read_exif(&data).unwrap();
    let tags = Translator::default().translate(&exif);

    let thumbnail = tags.thumbnail.unwrap();
    assert_eq!(thumbnail.get("Compression"), Some(&HumanValue::Raw(TagValue::Unsigned(6))));
    assert_eq!(thumbnail.get("ImageWidth"), Some(&HumanValue::Raw(TagValue::Unsigned(160))));
    assert!(thumbnail.contains_key("JpegIFOffset"));
    assert!(thumbnail.contains_key("JpegIFByteCount"));
}

#[test]
fn test_custom_tables() {
    let data = camera_exif(ByteOrderType::LittleEndian).build_jpeg();
    let exif = read_exif(&data).unwrap();

    let tables = TagTables::standard()
        .with_tag_name(0x010F, "CameraMaker")
        .with_label("LightSource", 255, "Something else");
    let tags = Translator::new(tables).translate(&exif);

    assert_eq!(tags.get("CameraMaker").and_then(HumanValue::as_str), Some("Canon"));
    assert!(tags.get("Make").is_none());
    assert_eq!(
        tags.get("LightSource").and_then(HumanValue::as_str),
        Some("Something else")
    );
}

#[test]
fn test_translated_json() {
    let exif = read_exif(&camera_exif(ByteOrderType::LittleEndian).build_jpeg()).unwrap();
    let tags = Translator::default().translate(&exif);
    let json = serde_json::to_value(&tags).unwrap();

    assert_eq!(json["Make"], "Canon");
    assert_eq!(json["LightSource"], "Other");
    assert_eq!(json["ExposureTime"]["numerator"], 1);
    assert_eq!(json["ExposureTime"]["denominator"], 250);
    assert_eq!(json["ExposureTime"]["value"], 0.004);
}
