//! Structural checks on the generated PDF: header, fonts, page geometry.
//! Content streams are compressed, so these assertions read the object-level
//! dictionaries pdf-writer leaves in clear text.

mod common;

fn contains(bytes: &[u8], needle: &[u8]) -> bool {
    bytes.windows(needle.len()).any(|w| w == needle)
}

#[test]
fn output_is_a_pdf() {
    let pdf = abntdoc::render_pdf(&common::sample_document()).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
    assert!(contains(&pdf, b"%%EOF"));
}

#[test]
fn uses_base_times_family_without_embedding() {
    let pdf = abntdoc::render_pdf(&common::sample_document()).unwrap();
    assert!(contains(&pdf, b"/Times-Roman"));
    assert!(contains(&pdf, b"/Times-Bold"));
    assert!(contains(&pdf, b"/WinAnsiEncoding"));
    assert!(!contains(&pdf, b"/FontFile"));
}

#[test]
fn pages_are_a4() {
    let pdf = abntdoc::render_pdf(&common::sample_document()).unwrap();
    assert!(contains(&pdf, b"595.28"));
    assert!(contains(&pdf, b"841.89"));
}

#[test]
fn content_streams_are_compressed() {
    let pdf = abntdoc::render_pdf(&common::sample_document()).unwrap();
    assert!(contains(&pdf, b"/FlateDecode"));
}

#[test]
fn empty_document_produces_valid_empty_pdf() {
    let pdf = abntdoc::render_pdf(&[]).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
    assert!(contains(&pdf, b"/Count 0"));
}

#[test]
fn missing_image_degrades_to_placeholder() {
    let blocks = vec![common::block(
        "img",
        abntdoc::model::BlockBody::Image {
            image_url: Some("tests/fixtures/nao-existe.png".into()),
            alt: Some("Figura 1".into()),
            image_width: Some(50.0),
        },
    )];
    // Must still render a page rather than fail the export.
    let pdf = abntdoc::render_pdf(&blocks).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
    assert!(contains(&pdf, b"/Count 1"));
}
