//! Combined read integration tests.
//!
//! Tests verify:
//! - All three families are read from one buffer
//! - A broken family does not affect the others
//! - Non-JPEG input yields empty results
//! - Pretty output covers every family

use jpeg_meta::report::pretty_metadata;
use jpeg_meta::{read_metadata, IptcValue, ReadOptions, TagValue, Translator, XmpValue};

use super::test_utils::{
    camera_exif, create_test_rgb_jpeg, exif_segment, iptc_segment, jpeg_with_segments,
    xmp_packet, xmp_segment, ByteOrderType,
};

fn full_jpeg() -> Vec<u8> {
    jpeg_with_segments(&[
        exif_segment(camera_exif(ByteOrderType::LittleEndian).build()),
        xmp_segment(&xmp_packet("<xmp:Rating>4</xmp:Rating>")),
        iptc_segment(&[(0x19, "sunset"), (0x19, "beach")]),
    ])
}

#[test]
fn test_all_families_read() {
    let metadata = read_metadata(&full_jpeg(), &ReadOptions::default());

    let exif = metadata.exif.as_ref().unwrap();
    assert_eq!(exif.get(0x010F), Some(&TagValue::Ascii("Canon".into())));
    assert_eq!(
        metadata.iptc["keywords"],
        IptcValue::Multiple(vec!["sunset".into(), "beach".into()])
    );
    let rating = metadata
        .xmp
        .as_ref()
        .unwrap()
        .path(&["x:xmpmeta", "rdf:RDF", "rdf:Description", "xmp:Rating"])
        .and_then(XmpValue::as_text);
    assert_eq!(rating, Some("4"));
}

#[test]
fn test_broken_exif_does_not_affect_others() {
    let mut tiff = b"MM".to_vec();
    tiff.extend([0x00, 0x2B, 0x00, 0x00, 0x00, 0x08]);
    let data = jpeg_with_segments(&[
        exif_segment(tiff),
        iptc_segment(&[(0x69, "Headline")]),
    ]);

    let metadata = read_metadata(&data, &ReadOptions::default());
    assert!(metadata.exif.is_none());
    assert_eq!(metadata.iptc["headline"].first(), Some("Headline"));
}

#[test]
fn test_non_jpeg_yields_empty_results() {
    let png = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    let metadata = read_metadata(png, &ReadOptions::default());
    assert!(metadata.exif.is_none());
    assert!(metadata.iptc.is_empty());
    assert!(metadata.xmp.is_none());
}

#[test]
fn test_read_options_skip_families() {
    let options = ReadOptions {
        exif: false,
        iptc: true,
        xmp: false,
    };
    let metadata = read_metadata(&full_jpeg(), &options);
    assert!(metadata.exif.is_none());
    assert!(metadata.xmp.is_none());
    assert!(!metadata.iptc.is_empty());
}

#[test]
fn test_raw_json_shape() {
    let data = jpeg_with_segments(&[exif_segment(
        camera_exif(ByteOrderType::BigEndian)
            .jpeg_thumbnail(create_test_rgb_jpeg(8, 8, 70))
            .build(),
    )]);
    let metadata = read_metadata(&data, &ReadOptions::default());
    let json = serde_json::to_value(&metadata).unwrap();

    // Raw tags are keyed by decimal id
    assert_eq!(json["exif"]["tags"]["271"], "Canon");
    assert_eq!(json["exif"]["thumbnail"]["image"]["mime_type"], "image/jpeg");
    assert!(json["exif"]["thumbnail"]["image"]["length"].as_u64().unwrap() > 0);
    assert_eq!(json["iptc"], serde_json::json!({}));
    assert!(json["xmp"].is_null());
}

#[test]
fn test_pretty_output() {
    let metadata = read_metadata(&full_jpeg(), &ReadOptions::default());
    let human = metadata
        .exif
        .as_ref()
        .map(|exif| Translator::default().translate(exif));

    let text = pretty_metadata(&metadata, human.as_ref());
    assert!(text.starts_with("[EXIF]\n"));
    assert!(text.contains("Make : Canon\n"));
    assert!(text.contains("ExposureTime : 0.004 [1/250]\n"));
    assert!(text.contains("GPSLatitude : [3 values]\n"));
    assert!(text.contains("[IPTC]\nkeywords : sunset, beach\n"));
    assert!(text.contains("x:xmpmeta/rdf:RDF/rdf:Description/xmp:Rating : 4\n"));

    let raw = pretty_metadata(&metadata, None);
    assert!(raw.contains("0x010F : Canon\n"));
}
