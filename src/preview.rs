//! On-screen preview renderer. Produces a DOM-free render tree for the
//! embedding UI to paint: one `PreviewPage` per simulated page, each block
//! resolved through the shared defaults and rule table. Pure and read-only
//! over the model: call it again after every edit.

use crate::model::{Block, BlockBody, Kind};
use crate::paginate::paginate;
use crate::style::{self, BlockStyle, CONTENT_HEIGHT, style_for};

#[derive(Clone, Debug)]
pub struct PreviewPage {
    /// 1-based page number.
    pub number: usize,
    pub blocks: Vec<PreviewBlock>,
}

#[derive(Clone, Debug)]
pub struct PreviewBlock {
    pub id: String,
    pub style: BlockStyle,
    pub content: PreviewContent,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TocEntry {
    pub block_id: String,
    pub text: String,
    pub level: u8,
    /// Ordinal position among titles, not the printed page: the preview
    /// deliberately trades accuracy for cheap recomputation. The PDF renderer
    /// derives real page numbers instead.
    pub page: usize,
}

#[derive(Clone, Debug)]
pub enum PreviewContent {
    /// Title or body text, placeholder-substituted, uppercased when the rule
    /// table says so.
    Text(String),
    List {
        ordered: bool,
        items: Vec<String>,
    },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Image {
        url: Option<String>,
        caption: String,
        width_pct: f32,
    },
    Cover {
        institution: String,
        authors: Vec<String>,
        title: String,
        subtitle: Option<String>,
        city: String,
        year: String,
    },
    Toc {
        heading: &'static str,
        entries: Vec<TocEntry>,
    },
    /// Structural section with an uppercase heading: abstract, references.
    Section {
        heading: &'static str,
        body: Vec<String>,
    },
    Keywords {
        label: &'static str,
        text: String,
    },
    Footnote {
        number: u32,
        text: String,
    },
    /// Explicit page break; renders as nothing.
    Break,
}

pub fn render_preview(blocks: &[Block]) -> Vec<PreviewPage> {
    let toc = toc_entries(blocks);
    paginate(blocks, CONTENT_HEIGHT)
        .iter()
        .enumerate()
        .map(|(i, page)| PreviewPage {
            number: i + 1,
            blocks: page
                .blocks
                .iter()
                .map(|&idx| render_block(&blocks[idx], &toc))
                .collect(),
        })
        .collect()
}

/// Synthetic table of contents: every title block in document order, numbered
/// by its 1-based ordinal among titles.
pub fn toc_entries(blocks: &[Block]) -> Vec<TocEntry> {
    blocks
        .iter()
        .filter(|b| b.kind() == Kind::Title)
        .enumerate()
        .map(|(i, b)| TocEntry {
            block_id: b.id.clone(),
            text: b.display_content().to_string(),
            level: b.title_level(),
            page: i + 1,
        })
        .collect()
}

fn render_block(block: &Block, toc: &[TocEntry]) -> PreviewBlock {
    let st = style_for(block);
    let content = match &block.body {
        BlockBody::Title { .. } | BlockBody::Paragraph { .. } | BlockBody::Quote { .. } => {
            let text = block.display_content();
            PreviewContent::Text(if st.uppercase {
                text.to_uppercase()
            } else {
                text.to_string()
            })
        }
        BlockBody::Abstract { .. } => PreviewContent::Section {
            heading: style::section_heading(Kind::Abstract).unwrap_or_default(),
            body: vec![block.display_content().to_string()],
        },
        BlockBody::References { .. } => PreviewContent::Section {
            heading: style::section_heading(Kind::References).unwrap_or_default(),
            body: block.display_references(),
        },
        BlockBody::List { .. } => PreviewContent::List {
            ordered: false,
            items: block.display_items(),
        },
        BlockBody::OrderedList { .. } => PreviewContent::List {
            ordered: true,
            items: block.display_items(),
        },
        BlockBody::Table { table_data } => match table_data {
            Some(t) => PreviewContent::Table {
                headers: t.headers.clone(),
                rows: t
                    .rectangular_rows()
                    .into_iter()
                    .map(|row| row.into_iter().map(str::to_string).collect())
                    .collect(),
            },
            None => PreviewContent::Table {
                headers: Vec::new(),
                rows: Vec::new(),
            },
        },
        BlockBody::Image {
            image_url,
            image_width,
            ..
        } => PreviewContent::Image {
            url: image_url.clone(),
            caption: block.display_alt().to_string(),
            width_pct: image_width.unwrap_or(100.0).clamp(10.0, 100.0),
        },
        BlockBody::Keywords { keywords } => PreviewContent::Keywords {
            label: style::KEYWORDS_LABEL,
            text: format!("{}.", keywords.join("; ")),
        },
        BlockBody::Footnote { .. } => PreviewContent::Footnote {
            number: block.footnote_number(),
            text: block.display_content().to_string(),
        },
        BlockBody::Cover { cover_data } => {
            let data = cover_data.clone().unwrap_or_default();
            PreviewContent::Cover {
                institution: data.institution.to_uppercase(),
                authors: data.sorted_authors().iter().map(|a| a.to_string()).collect(),
                title: data.title.to_uppercase(),
                subtitle: data.subtitle.clone(),
                city: data.city.clone(),
                year: data.year.clone(),
            }
        }
        BlockBody::Toc {} => PreviewContent::Toc {
            heading: style::section_heading(Kind::Toc).unwrap_or_default(),
            entries: toc.to_vec(),
        },
        BlockBody::PageBreak {} => PreviewContent::Break,
    };

    PreviewBlock {
        id: block.id.clone(),
        style: st,
        content,
    }
}
