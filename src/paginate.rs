//! Pagination engine: partitions a flat block sequence into simulated A4
//! pages using approximate per-block height costs. Pure function of the input
//! sequence and the page content height, so the preview and PDF renderers can
//! both call it on every change and are guaranteed the same page boundaries.

use crate::model::{Block, BlockBody, Kind};
use crate::style::{CONTENT_WIDTH, style_for};

/// One simulated page: ordered indices into the input block slice.
/// Concatenating all pages in order reproduces the input exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    pub blocks: Vec<usize>,
}

impl Page {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

pub fn paginate(blocks: &[Block], content_height: f32) -> Vec<Page> {
    let mut pages: Vec<Page> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut used: f32 = 0.0;
    // Set after an explicit page break so a trailing break still produces the
    // blank page the author asked for.
    let mut after_break = false;

    let mut flush = |current: &mut Vec<usize>, used: &mut f32, pages: &mut Vec<Page>| {
        pages.push(Page {
            blocks: std::mem::take(current),
        });
        *used = 0.0;
    };

    for (idx, block) in blocks.iter().enumerate() {
        let st = style_for(block);

        if block.kind() == Kind::PageBreak {
            // The break marker renders as nothing; it closes the current page
            // (possibly as an intentionally blank one).
            current.push(idx);
            flush(&mut current, &mut used, &mut pages);
            after_break = true;
            continue;
        }
        after_break = false;

        if st.own_page {
            if !current.is_empty() {
                flush(&mut current, &mut used, &mut pages);
            }
            pages.push(Page { blocks: vec![idx] });
            used = 0.0;
            continue;
        }

        if st.break_before && !current.is_empty() {
            flush(&mut current, &mut used, &mut pages);
        }

        let h = estimate_height(block);
        if !current.is_empty() && used + h > content_height {
            log::debug!(
                "page {} full at {:.0}pt, block {} ({:?}, {:.0}pt) starts a new page",
                pages.len() + 1,
                used,
                idx,
                block.kind(),
                h
            );
            flush(&mut current, &mut used, &mut pages);
        }
        current.push(idx);
        used += h;

        if st.break_after {
            flush(&mut current, &mut used, &mut pages);
        }
    }

    if !current.is_empty() {
        pages.push(Page { blocks: current });
    } else if after_break {
        // Trailing explicit break: preserve the requested blank page.
        pages.push(Page { blocks: Vec::new() });
    }

    pages
}

/// Approximate height of one block in points, including the rule table's
/// before/after spacing. A layout simulation, not a measurement: the
/// constants below are calibration values, tuned visually against the PDF
/// renderer, and safe to adjust.
pub fn estimate_height(block: &Block) -> f32 {
    let st = style_for(block);
    let spacing = st.space_before + st.space_after;
    let line_h = st.font_size * 1.2 * st.line_spacing;

    match &block.body {
        BlockBody::Title { .. } => {
            text_lines(block.display_content(), st.font_size, CONTENT_WIDTH) * line_h + spacing
        }
        BlockBody::Paragraph { .. } | BlockBody::Quote { .. } => {
            let width = CONTENT_WIDTH - st.indent_left;
            text_lines(block.display_content(), st.font_size, width) * line_h + spacing
        }
        BlockBody::Abstract { .. } => {
            // Centered RESUMO heading plus the body text.
            let heading = 20.0 * 1.8 + 12.0;
            heading + text_lines(block.display_content(), st.font_size, CONTENT_WIDTH) * line_h
                + spacing
        }
        BlockBody::List { list_items } | BlockBody::OrderedList { list_items } => {
            list_items.len().max(1) as f32 * line_h + spacing
        }
        BlockBody::Table { table_data } => {
            let nrows = table_data.as_ref().map(|t| t.rows.len()).unwrap_or(0);
            // Header row plus data rows, each one line of 12pt text in a
            // padded cell.
            (nrows + 1) as f32 * 24.0 + spacing
        }
        BlockBody::Image { image_width, .. } => {
            // Assume a 3:2 landscape photograph scaled to the requested
            // percentage of the text width, plus the caption line.
            let pct = image_width.unwrap_or(100.0).clamp(10.0, 100.0) / 100.0;
            CONTENT_WIDTH * pct * (2.0 / 3.0) + 16.0 + spacing
        }
        BlockBody::Footnote { .. } => {
            // Separator rule plus the note text.
            6.0 + text_lines(block.display_content(), st.font_size, CONTENT_WIDTH) * line_h
                + spacing
        }
        BlockBody::Keywords { keywords } => {
            let joined: f32 = keywords.iter().map(|k| k.len() + 2).sum::<usize>() as f32;
            let lines = (joined / 70.0).ceil().max(1.0);
            line_h + lines * line_h + spacing
        }
        BlockBody::References { .. } => {
            let heading = 20.0 * 1.8 + 18.0;
            let entries: f32 = block
                .display_references()
                .iter()
                .map(|r| text_lines(r, st.font_size, CONTENT_WIDTH) * line_h + st.space_after)
                .sum();
            heading + entries + st.space_before
        }
        // Own-page and break kinds never reach the accumulator.
        BlockBody::Cover { .. } | BlockBody::Toc {} | BlockBody::PageBreak {} => 0.0,
    }
}

/// Wrapped line count from character count at an assumed average glyph width
/// of half the font size.
fn text_lines(text: &str, font_size: f32, width: f32) -> f32 {
    let chars_per_line = (width / (font_size * 0.5)).max(1.0);
    (text.chars().count() as f32 / chars_per_line).ceil().max(1.0)
}
