//! EXIF integration tests.
//!
//! Tests verify:
//! - IFD0, Exif and GPS tags are merged into one map
//! - Little-endian and big-endian streams decode identically
//! - Malformed headers are rejected, hostile offsets are contained
//! - JPEG thumbnails are extracted intact

use jpeg_meta::{
    read_exif, MetadataError, MetadataKind, Rational, TagValue, TiffError,
};

use super::test_utils::{
    camera_exif, create_test_rgb_jpeg, exif_segment, is_valid_jpeg, jpeg_with_segments,
    xmp_packet, xmp_segment, ByteOrderType, EntryValue, ExifBuilder, IfdBuilder,
};

// =============================================================================
// Merged Tags
// =============================================================================

#[test]
fn test_date_time_original_is_exact() {
    let data = camera_exif(ByteOrderType::LittleEndian).build_jpeg();
    let exif = read_exif(&data).unwrap();

    assert_eq!(
        exif.get(0x9003),
        Some(&TagValue::Ascii("2019:07:14 18:42:07".to_string()))
    );
}

#[test]
fn test_ifd0_exif_and_gps_are_merged() {
    let data = camera_exif(ByteOrderType::LittleEndian).build_jpeg();
    let exif = read_exif(&data).unwrap();

    // IFD0
    assert_eq!(exif.get(0x010F), Some(&TagValue::Ascii("Canon".into())));
    assert_eq!(exif.get(0x0112), Some(&TagValue::Unsigned(1)));
    // Exif sub-IFD
    assert_eq!(exif.get(0x8827), Some(&TagValue::Unsigned(400)));
    assert_eq!(exif.get(0x9208), Some(&TagValue::Unsigned(255)));
    // GPS sub-IFD
    assert_eq!(exif.get(0x0001), Some(&TagValue::Ascii("N".into())));
    assert_eq!(
        exif.get(0x0002),
        Some(&TagValue::RationalList(vec![
            Rational::new(48, 1),
            Rational::new(51, 1),
            Rational::new(2940, 100),
        ]))
    );
}

#[test]
fn test_rational_round_trip() {
    let data = camera_exif(ByteOrderType::BigEndian).build_jpeg();
    let exif = read_exif(&data).unwrap();

    let exposure = exif.get(0x829A).and_then(TagValue::as_rational).unwrap();
    assert_eq!(exposure.numerator, 1);
    assert_eq!(exposure.denominator, 250);
    assert!((exposure.value() - 0.004).abs() < 1e-12);

    let bias = exif.get(0x9204).and_then(TagValue::as_rational).unwrap();
    assert_eq!(bias, Rational::new(-1, 3));
}

#[test]
fn test_zero_denominator_is_kept() {
    let data = ExifBuilder::new()
        .ifd0(IfdBuilder::new().rational(0x011A, 72, 0))
        .build_jpeg();
    let exif = read_exif(&data).unwrap();

    let value = exif.get(0x011A).and_then(TagValue::as_rational).unwrap();
    assert_eq!(value.denominator, 0);
    assert_eq!(value.checked_value(), None);
}

#[test]
fn test_big_and_little_endian_decode_identically() {
    let le = read_exif(&camera_exif(ByteOrderType::LittleEndian).build_jpeg()).unwrap();
    let be = read_exif(&camera_exif(ByteOrderType::BigEndian).build_jpeg()).unwrap();

    assert!(!le.byte_order.is_big_endian());
    assert!(be.byte_order.is_big_endian());
    assert_eq!(le.tags, be.tags);
}

#[test]
fn test_interoperability_kept_apart() {
    let data = camera_exif(ByteOrderType::LittleEndian)
        .interop_ifd(IfdBuilder::new().ascii(0x0001, "R98"))
        .build_jpeg();
    let exif = read_exif(&data).unwrap();

    let interop = exif.interoperability.as_ref().unwrap();
    assert_eq!(interop.get(&0x0001), Some(&TagValue::Ascii("R98".into())));
    // GPSLatitudeRef is not overwritten by the colliding interop id
    assert_eq!(exif.get(0x0001), Some(&TagValue::Ascii("N".into())));
}

#[test]
fn test_exif_found_after_other_app1() {
    let tiff = camera_exif(ByteOrderType::LittleEndian).build();
    let data = jpeg_with_segments(&[
        (0xE0, b"JFIF\0\x01\x02\0\0\x01\0\x01\0\0".to_vec()),
        xmp_segment(&xmp_packet("")),
        exif_segment(tiff),
    ]);

    let exif = read_exif(&data).unwrap();
    assert_eq!(exif.get(0x010F), Some(&TagValue::Ascii("Canon".into())));
}

#[test]
fn test_nonzero_signature_padding_is_accepted() {
    let tiff = ExifBuilder::new()
        .ifd0(IfdBuilder::new().short(0x0112, 6))
        .build();
    let mut payload = b"Exif\0\xFF".to_vec();
    payload.extend(tiff);
    let data = jpeg_with_segments(&[(0xE1, payload)]);

    let exif = read_exif(&data).unwrap();
    assert_eq!(exif.get(0x0112), Some(&TagValue::Unsigned(6)));
}

// =============================================================================
// Error Handling
// =============================================================================

#[test]
fn test_non_jpeg_rejected() {
    let err = read_exif(b"GIF89a\x01\x00\x01\x00").unwrap_err();
    assert_eq!(err, MetadataError::NotAJpeg);
}

#[test]
fn test_jpeg_without_exif() {
    let data = jpeg_with_segments(&[(0xE0, b"JFIF\0".to_vec())]);
    assert_eq!(
        read_exif(&data).unwrap_err(),
        MetadataError::NoEmbeddedMetadata(MetadataKind::Exif)
    );
}

#[test]
fn test_first_ifd_inside_header_is_malformed() {
    let mut tiff = b"II".to_vec();
    tiff.extend(42u16.to_le_bytes());
    tiff.extend(4u32.to_le_bytes());
    tiff.extend([0; 16]);
    let data = jpeg_with_segments(&[exif_segment(tiff)]);

    assert_eq!(
        read_exif(&data).unwrap_err(),
        MetadataError::MalformedTiff(TiffError::InvalidIfdOffset(4))
    );
}

#[test]
fn test_bad_magic_is_malformed() {
    let mut tiff = b"XX".to_vec();
    tiff.extend([0x00, 0x2A, 0x00, 0x00, 0x00, 0x08]);
    let data = jpeg_with_segments(&[exif_segment(tiff)]);

    assert!(matches!(
        read_exif(&data),
        Err(MetadataError::MalformedTiff(TiffError::InvalidMagic(_)))
    ));
}

#[test]
fn test_hostile_count_stops_directory() {
    let data = ExifBuilder::new()
        .ifd0(
            IfdBuilder::new()
                .ascii(0x010F, "Canon")
                .add(
                    0x0110,
                    EntryValue::Raw {
                        field_type: 4,
                        count: 0x4000_0000,
                        value_offset: 8,
                    },
                )
                .short(0x0112, 1),
        )
        .build_jpeg();

    let exif = read_exif(&data).unwrap();
    assert_eq!(exif.get(0x010F), Some(&TagValue::Ascii("Canon".into())));
    assert_eq!(exif.get(0x0110), None);
    // Entries after the bad one are not decoded
    assert_eq!(exif.get(0x0112), None);
}

#[test]
fn test_unsupported_type_is_skipped() {
    let data = ExifBuilder::new()
        .ifd0(
            IfdBuilder::new()
                .ascii(0x010F, "Canon")
                .add(
                    0x0110,
                    EntryValue::Raw {
                        field_type: 11,
                        count: 1,
                        value_offset: 0,
                    },
                )
                .short(0x0112, 6),
        )
        .build_jpeg();

    let exif = read_exif(&data).unwrap();
    assert_eq!(exif.get(0x0110), None);
    assert_eq!(exif.get(0x0112), Some(&TagValue::Unsigned(6)));
}

#[test]
fn test_zero_count_entry_is_skipped() {
    let data = ExifBuilder::new()
        .ifd0(
            IfdBuilder::new()
                .add(
                    0x0100,
                    EntryValue::Raw {
                        field_type: 3,
                        count: 0,
                        value_offset: 0,
                    },
                )
                .short(0x0112, 6),
        )
        .build_jpeg();

    let exif = read_exif(&data).unwrap();
    assert_eq!(exif.get(0x0100), None);
    assert_eq!(exif.get(0x0112), Some(&TagValue::Unsigned(6)));
}

#[test]
fn test_sub_ifd_pointer_out_of_range() {
    let data = ExifBuilder::new()
        .ifd0(IfdBuilder::new().ascii(0x010F, "Canon").long(0x8769, 0xFFFF_0000))
        .build_jpeg();

    let exif = read_exif(&data).unwrap();
    assert_eq!(exif.get(0x010F), Some(&TagValue::Ascii("Canon".into())));
    assert_eq!(exif.get(0x8769), Some(&TagValue::Unsigned(0xFFFF_0000)));
}

// =============================================================================
// Thumbnails
// =============================================================================

#[test]
fn test_real_thumbnail_decodes() {
    let jpeg = create_test_rgb_jpeg(32, 24, 80);
    let data = camera_exif(ByteOrderType::LittleEndian)
        .jpeg_thumbnail(jpeg.clone())
        .build_jpeg();

    let exif = read_exif(&data).unwrap();
    let thumbnail = exif.thumbnail.unwrap();
    let image = thumbnail.image.unwrap();

    assert_eq!(image.mime_type, "image/jpeg");
    assert_eq!(image.data.as_ref(), jpeg.as_slice());
    assert!(is_valid_jpeg(&image.data));

    let decoded = image::load_from_memory(&image.data).unwrap();
    assert_eq!(decoded.width(), 32);
    assert_eq!(decoded.height(), 24);
}

#[test]
fn test_thumbnail_offset_and_length() {
    let data = ExifBuilder::new()
        .with_byte_order(ByteOrderType::BigEndian)
        .ifd0(IfdBuilder::new().add(0xC4A5, EntryValue::Undefined((0..=255).collect())))
        .thumbnail_ifd(
            IfdBuilder::new()
                .short(0x0103, 6)
                .long(0x0201, 100)
                .long(0x0202, 50),
        )
        .build();
    let expected = data[100..150].to_vec();
    let jpeg = jpeg_with_segments(&[exif_segment(data)]);

    let exif = read_exif(&jpeg).unwrap();
    let image = exif.thumbnail.unwrap().image.unwrap();
    assert_eq!(image.data.len(), 50);
    assert_eq!(image.data.as_ref(), expected.as_slice());
}

#[test]
fn test_thumbnail_out_of_range_has_tags_only() {
    let data = ExifBuilder::new()
        .ifd0(IfdBuilder::new().ascii(0x010F, "Canon"))
        .thumbnail_ifd(
            IfdBuilder::new()
                .short(0x0103, 6)
                .long(0x0201, 0x0010_0000)
                .long(0x0202, 64),
        )
        .build_jpeg();

    let thumbnail = read_exif(&data).unwrap().thumbnail.unwrap();
    assert!(thumbnail.image.is_none());
    assert_eq!(thumbnail.tags.get(&0x0202), Some(&TagValue::Unsigned(64)));
}

#[test]
fn test_uncompressed_thumbnail_has_tags_only() {
    let data = ExifBuilder::new()
        .thumbnail_ifd(
            IfdBuilder::new()
                .short(0x0103, 1)
                .long(0x0100, 160)
                .long(0x0101, 120),
        )
        .build_jpeg();

    let thumbnail = read_exif(&data).unwrap().thumbnail.unwrap();
    assert!(thumbnail.image.is_none());
    assert_eq!(thumbnail.tags.get(&0x0100), Some(&TagValue::Unsigned(160)));
}

#[test]
fn test_no_thumbnail_without_ifd1() {
    let data = camera_exif(ByteOrderType::LittleEndian).build_jpeg();
    assert!(read_exif(&data).unwrap().thumbnail.is_none());
}
