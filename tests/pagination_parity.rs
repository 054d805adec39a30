//! The preview and the printed PDF must agree on which block lands on which
//! page. Both feed the same engine with the same content height; these tests
//! pin that contract from the outside.

mod common;

use abntdoc::model::BlockBody;
use abntdoc::paginate::paginate;
use abntdoc::preview::{PreviewContent, render_preview};
use abntdoc::style::CONTENT_HEIGHT;

/// Number of pages in a generated PDF, read from the page tree `/Count`.
fn pdf_page_count(bytes: &[u8]) -> usize {
    let needle = b"/Count ";
    let pos = bytes
        .windows(needle.len())
        .position(|w| w == needle)
        .expect("page tree /Count missing");
    let digits: String = bytes[pos + needle.len()..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .map(|&b| b as char)
        .collect();
    digits.parse().expect("page count digits")
}

#[test]
fn preview_and_pdf_agree_on_page_count() {
    let blocks = common::sample_document();

    let preview = render_preview(&blocks);
    let pdf = abntdoc::render_pdf(&blocks).unwrap();

    assert_eq!(preview.len(), pdf_page_count(&pdf));
}

#[test]
fn preview_pages_mirror_engine_output() {
    let blocks = common::sample_document();

    let engine = paginate(&blocks, CONTENT_HEIGHT);
    let preview = render_preview(&blocks);

    assert_eq!(engine.len(), preview.len());
    for (engine_page, preview_page) in engine.iter().zip(&preview) {
        let engine_ids: Vec<&str> = engine_page
            .blocks
            .iter()
            .map(|&idx| blocks[idx].id.as_str())
            .collect();
        let preview_ids: Vec<&str> =
            preview_page.blocks.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(engine_ids, preview_ids);
    }
}

#[test]
fn cover_and_toc_sit_alone() {
    let blocks = common::sample_document();
    let preview = render_preview(&blocks);

    assert_eq!(preview[0].blocks.len(), 1);
    assert!(matches!(
        preview[0].blocks[0].content,
        PreviewContent::Cover { .. }
    ));
    assert_eq!(preview[1].blocks.len(), 1);
    assert!(matches!(
        preview[1].blocks[0].content,
        PreviewContent::Toc { .. }
    ));
}

#[test]
fn abstract_closes_its_page_and_references_open_one() {
    let blocks = common::sample_document();
    let preview = render_preview(&blocks);

    for page in &preview {
        for (i, b) in page.blocks.iter().enumerate() {
            if matches!(b.content, PreviewContent::Section { heading, .. } if heading == "RESUMO")
            {
                assert_eq!(i, page.blocks.len() - 1, "abstract must end its page");
            }
            if matches!(
                b.content,
                PreviewContent::Section { heading, .. } if heading == "REFERÊNCIAS"
            ) {
                assert_eq!(i, 0, "references must start a fresh page");
            }
        }
    }
}

#[test]
fn every_block_appears_exactly_once_in_order() {
    let blocks = common::sample_document();
    let pages = paginate(&blocks, CONTENT_HEIGHT);

    let flat: Vec<usize> = pages.iter().flat_map(|p| p.blocks.iter().copied()).collect();
    assert_eq!(flat, (0..blocks.len()).collect::<Vec<_>>());
}

#[test]
fn trailing_page_break_leaves_blank_page() {
    let blocks = vec![
        common::paragraph("p", "texto"),
        common::page_break("pb"),
    ];
    let preview = render_preview(&blocks);
    assert_eq!(preview.len(), 2);
    assert!(preview[1].blocks.is_empty());

    let pdf = abntdoc::render_pdf(&blocks).unwrap();
    assert_eq!(pdf_page_count(&pdf), 2);
}

#[test]
fn fixed_scenario_layout() {
    let blocks = vec![
        common::cover("b1"),
        common::block("b2", BlockBody::Toc {}),
        common::title("b3", "Introdução", 1),
        common::paragraph("b4", &"a".repeat(200)),
    ];
    let pages = paginate(&blocks, CONTENT_HEIGHT);
    let layout: Vec<Vec<usize>> = pages.iter().map(|p| p.blocks.clone()).collect();
    assert_eq!(layout, vec![vec![0], vec![1], vec![2, 3]]);
}
