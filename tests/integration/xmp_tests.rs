//! XMP integration tests.

use jpeg_meta::{read_xmp, MetadataError, MetadataKind, XmpValue};

use super::test_utils::{
    camera_exif, exif_segment, jpeg_with_segments, xmp_packet, xmp_segment, ByteOrderType,
};

fn description(data: &[u8]) -> jpeg_meta::XmpNode {
    let tree = read_xmp(data).unwrap();
    tree.path(&["x:xmpmeta", "rdf:RDF", "rdf:Description"])
        .and_then(XmpValue::as_node)
        .cloned()
        .unwrap()
}

#[test]
fn test_simple_properties() {
    let packet = xmp_packet(
        "<xmp:CreatorTool>Lightroom</xmp:CreatorTool><photoshop:City>Brest</photoshop:City>",
    );
    let data = jpeg_with_segments(&[xmp_segment(&packet)]);

    let description = description(&data);
    assert_eq!(
        description.get("xmp:CreatorTool").and_then(XmpValue::as_text),
        Some("Lightroom")
    );
    assert_eq!(
        description.get("photoshop:City").and_then(XmpValue::as_text),
        Some("Brest")
    );
    assert_eq!(
        description.get("rdf:about").and_then(XmpValue::as_text),
        Some("")
    );
}

#[test]
fn test_bag_items_become_list() {
    let packet = xmp_packet(
        "<dc:subject><rdf:Bag><rdf:li>sunset</rdf:li><rdf:li>beach</rdf:li></rdf:Bag></dc:subject>",
    );
    let data = jpeg_with_segments(&[xmp_segment(&packet)]);

    let description = description(&data);
    let items = description
        .path(&["dc:subject", "rdf:Bag", "rdf:li"])
        .and_then(XmpValue::as_list)
        .unwrap();
    let items: Vec<_> = items.iter().filter_map(XmpValue::as_text).collect();
    assert_eq!(items, vec!["sunset", "beach"]);
}

#[test]
fn test_standard_namespaces_injected() {
    let data = jpeg_with_segments(&[xmp_segment(&xmp_packet(""))]);
    let tree = read_xmp(&data).unwrap();

    let root = tree.get("x:xmpmeta").and_then(XmpValue::as_node).unwrap();
    assert_eq!(
        root.get("xmlns:x").and_then(XmpValue::as_text),
        Some("adobe:ns:meta/")
    );
    assert_eq!(
        root.get("xmlns:exif").and_then(XmpValue::as_text),
        Some("http://ns.adobe.com/exif/1.0/")
    );
}

#[test]
fn test_spaced_declaration_is_not_duplicated() {
    let packet = xmp_packet("<tiff:Model>EOS R5</tiff:Model>").replacen(
        "<x:xmpmeta xmlns:x=\"adobe:ns:meta/\"",
        "<x:xmpmeta xmlns:x=\"adobe:ns:meta/\" xmlns:tiff = \"http://ns.adobe.com/tiff/1.0/\"",
        1,
    );
    let data = jpeg_with_segments(&[xmp_segment(&packet)]);

    assert_eq!(
        description(&data).get("tiff:Model").and_then(XmpValue::as_text),
        Some("EOS R5")
    );
}

#[test]
fn test_xmp_after_exif() {
    let data = jpeg_with_segments(&[
        exif_segment(camera_exif(ByteOrderType::LittleEndian).build()),
        xmp_segment(&xmp_packet("<tiff:Make>Canon</tiff:Make>")),
    ]);

    assert_eq!(
        description(&data).get("tiff:Make").and_then(XmpValue::as_text),
        Some("Canon")
    );
}

#[test]
fn test_serialized_tree() {
    let data = jpeg_with_segments(&[xmp_segment(&xmp_packet(
        "<dc:format>image/jpeg</dc:format>",
    ))]);
    let tree = read_xmp(&data).unwrap();

    let json = serde_json::to_value(&tree).unwrap();
    assert_eq!(
        json["x:xmpmeta"]["rdf:RDF"]["rdf:Description"]["dc:format"],
        "image/jpeg"
    );
}

#[test]
fn test_missing_packet() {
    let data = jpeg_with_segments(&[(0xE1, b"http://example.com/no-packet".to_vec())]);
    assert_eq!(
        read_xmp(&data).unwrap_err(),
        MetadataError::NoEmbeddedMetadata(MetadataKind::Xmp)
    );
}

#[test]
fn test_malformed_packet() {
    let packet = "<x:xmpmeta xmlns:x=\"adobe:ns:meta/\"><rdf:RDF></x:xmpmeta>";
    let data = jpeg_with_segments(&[xmp_segment(packet)]);
    assert!(matches!(read_xmp(&data), Err(MetadataError::Xml(_))));
}

#[test]
fn test_non_jpeg() {
    let packet = xmp_packet("");
    assert_eq!(
        read_xmp(packet.as_bytes()).unwrap_err(),
        MetadataError::NotAJpeg
    );
}
