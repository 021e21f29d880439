//! IPTC integration tests.

use jpeg_meta::{read_iptc, IptcValue, MetadataError, MetadataKind};

use super::test_utils::{camera_exif, exif_segment, iptc_segment, jpeg_with_segments, ByteOrderType};

#[test]
fn test_keywords_are_collected_in_order() {
    let data = jpeg_with_segments(&[iptc_segment(&[
        (0x19, "sunset"),
        (0x19, "beach"),
        (0x19, "summer"),
        (0x69, "Evening at the coast"),
    ])]);

    let fields = read_iptc(&data).unwrap();
    assert_eq!(
        fields["keywords"],
        IptcValue::Multiple(vec!["sunset".into(), "beach".into(), "summer".into()])
    );
    assert_eq!(fields["headline"].first(), Some("Evening at the coast"));
}

#[test]
fn test_unrecognized_datasets_are_ignored() {
    let data = jpeg_with_segments(&[iptc_segment(&[
        (0x00, "\u{0}\u{4}"),
        (0x05, "Object name"),
        (0x74, "(c) 2019 Jane Doe"),
    ])]);

    let fields = read_iptc(&data).unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields["copyright"], IptcValue::Single("(c) 2019 Jane Doe".into()));
}

#[test]
fn test_iptc_alongside_exif() {
    let data = jpeg_with_segments(&[
        exif_segment(camera_exif(ByteOrderType::BigEndian).build()),
        iptc_segment(&[(0x50, "Jane Doe"), (0x6E, "Agency")]),
    ]);

    let fields = read_iptc(&data).unwrap();
    assert_eq!(fields["byline"].first(), Some("Jane Doe"));
    assert_eq!(fields["credit"].first(), Some("Agency"));
}

#[test]
fn test_empty_resource() {
    let data = jpeg_with_segments(&[iptc_segment(&[])]);
    assert!(read_iptc(&data).unwrap().is_empty());
}

#[test]
fn test_missing_resource() {
    let data = jpeg_with_segments(&[(0xED, b"Photoshop 3.0\0".to_vec())]);
    assert_eq!(
        read_iptc(&data).unwrap_err(),
        MetadataError::NoEmbeddedMetadata(MetadataKind::Iptc)
    );
}

#[test]
fn test_non_jpeg() {
    assert_eq!(read_iptc(b"8BIM\x04\x04").unwrap_err(), MetadataError::NotAJpeg);
}

#[test]
fn test_truncated_dataset_keeps_earlier_fields() {
    let mut data = jpeg_with_segments(&[iptc_segment(&[(0x19, "sunset")])]);
    // Append a dataset claiming more bytes than the buffer holds
    data.extend([0x1C, 0x02, 0x19, 0x7F, 0xFF, b'x']);

    // Declared section length only covers the first dataset, so widen the
    // scan by parsing the records directly.
    let start = data.windows(3).position(|w| w == [0x1C, 0x02, 0x19]).unwrap();
    let fields = jpeg_meta::format::iptc::parse_iptc_records(&data, start, data.len());
    assert_eq!(fields["keywords"], IptcValue::Single("sunset".into()));
}
