//! Unzips the generated DOCX and parses its XML parts, asserting the package
//! shape and the formatting the rule table promises.

mod common;

use std::io::{Cursor, Read};

use abntdoc::model::{Block, BlockBody, CoverData};

fn read_part(docx: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(docx)).expect("valid zip");
    let mut file = archive.by_name(name).expect(name);
    let mut out = String::new();
    file.read_to_string(&mut out).expect("utf-8 part");
    out
}

fn document_xml(blocks: &[Block]) -> String {
    let docx = abntdoc::render_docx(blocks).unwrap();
    read_part(&docx, "word/document.xml")
}

#[test]
fn package_has_all_parts() {
    let docx = abntdoc::render_docx(&common::sample_document()).unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(docx)).unwrap();
    for name in [
        "[Content_Types].xml",
        "_rels/.rels",
        "word/_rels/document.xml.rels",
        "word/document.xml",
        "word/styles.xml",
        "word/numbering.xml",
    ] {
        assert!(archive.by_name(name).is_ok(), "missing part {name}");
    }
}

#[test]
fn every_part_is_well_formed_xml() {
    let docx = abntdoc::render_docx(&common::sample_document()).unwrap();
    for name in [
        "word/document.xml",
        "word/styles.xml",
        "word/numbering.xml",
    ] {
        let xml = read_part(&docx, name);
        roxmltree::Document::parse(&xml).unwrap_or_else(|e| panic!("{name}: {e}"));
    }
}

#[test]
fn section_margins_are_abnt() {
    let xml = document_xml(&common::sample_document());
    let doc = roxmltree::Document::parse(&xml).unwrap();
    let mar = doc
        .descendants()
        .find(|n| n.tag_name().name() == "pgMar")
        .expect("pgMar");
    let attr = |name: &str| {
        mar.attributes()
            .find(|a| a.name() == name)
            .map(|a| a.value())
            .unwrap_or("")
    };
    assert_eq!(attr("top"), "1701");
    assert_eq!(attr("left"), "1701");
    assert_eq!(attr("right"), "1134");
    assert_eq!(attr("bottom"), "1134");
}

#[test]
fn paragraphs_are_justified_with_first_line_indent() {
    let xml = document_xml(&[common::paragraph("p", "Um parágrafo de corpo.")]);
    assert!(xml.contains(r#"<w:jc w:val="both"/>"#));
    assert!(xml.contains(r#"<w:ind w:firstLine="709"/>"#));
    assert!(xml.contains(r#"<w:spacing w:line="360" w:lineRule="auto"/>"#));
}

#[test]
fn quote_indented_four_centimeters() {
    let xml = document_xml(&[common::block(
        "q",
        BlockBody::Quote {
            content: "Citação longa.".into(),
        },
    )]);
    assert!(xml.contains(r#"<w:ind w:left="2268"/>"#));
    assert!(xml.contains("<w:i/>"));
}

#[test]
fn table_is_rectangular_with_bold_shaded_header() {
    let blocks = vec![common::block(
        "t",
        BlockBody::Table {
            table_data: Some(abntdoc::model::TableData {
                headers: vec!["A".into(), "B".into()],
                rows: vec![
                    vec!["1".into()],
                    vec!["2".into(), "3".into(), "extra".into()],
                ],
            }),
        },
    )];
    let xml = document_xml(&blocks);
    let doc = roxmltree::Document::parse(&xml).unwrap();

    let rows: Vec<_> = doc
        .descendants()
        .filter(|n| n.tag_name().name() == "tr")
        .collect();
    assert_eq!(rows.len(), 3);
    for row in &rows {
        let cells = row
            .descendants()
            .filter(|n| n.tag_name().name() == "tc")
            .count();
        assert_eq!(cells, 2, "rows must be squared to the header count");
    }
    assert!(xml.contains(r#"w:fill="EEEEEE""#));
    assert!(!xml.contains("extra"), "overflow cells are dropped");
}

#[test]
fn cover_authors_sorted_and_title_uppercased() {
    let blocks = vec![common::block(
        "c",
        BlockBody::Cover {
            cover_data: Some(CoverData {
                title: "Estudo de caso".into(),
                subtitle: None,
                authors: vec!["ética Autora".into(), "Bruno".into()],
                institution: "UFMG".into(),
                city: "Belo Horizonte".into(),
                year: "2026".into(),
            }),
        },
    )];
    let xml = document_xml(&blocks);
    assert!(xml.contains("ESTUDO DE CASO"));
    let bruno = xml.find("Bruno").expect("author Bruno");
    let etica = xml.find("ética Autora").expect("author ética");
    assert!(bruno < etica, "accent-insensitive sort puts Bruno first");
}

#[test]
fn heading_one_uses_style_and_uppercase() {
    let xml = document_xml(&[common::title("t", "Introdução", 1)]);
    assert!(xml.contains(r#"<w:pStyle w:val="Heading1"/>"#));
    assert!(xml.contains("INTRODUÇÃO"));
}

#[test]
fn references_force_page_break_before() {
    let xml = document_xml(&[common::block(
        "r",
        BlockBody::References {
            references: vec!["AUTOR. Obra. 2020.".into()],
        },
    )]);
    assert!(xml.contains("<w:pageBreakBefore/>"));
    assert!(xml.contains("REFERÊNCIAS"));
}

#[test]
fn image_blocks_are_skipped() {
    let xml = document_xml(&[common::block(
        "img",
        BlockBody::Image {
            image_url: Some("foto.png".into()),
            alt: Some("Figura 1".into()),
            image_width: None,
        },
    )]);
    assert!(!xml.contains("Figura 1"));
    assert!(!xml.contains("foto.png"));
}

#[test]
fn lists_reference_numbering_definitions() {
    let xml = document_xml(&[
        common::block(
            "l",
            BlockBody::List {
                list_items: vec!["um".into()],
            },
        ),
        common::block(
            "ol",
            BlockBody::OrderedList {
                list_items: vec!["primeiro".into()],
            },
        ),
    ]);
    assert!(xml.contains(r#"<w:numId w:val="1"/>"#));
    assert!(xml.contains(r#"<w:numId w:val="2"/>"#));
}
