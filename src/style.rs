//! The single formatting rule table shared by the preview renderer, the PDF
//! renderer and the DOCX exporter. Visual divergence between backends almost
//! always traces back to one of them inventing its own numbers; everything
//! presentation-related lives here instead.

use crate::model::{Block, Kind};

pub const A4_WIDTH: f32 = 595.28;
pub const A4_HEIGHT: f32 = 841.89;

pub const MARGIN_TOP: f32 = 3.0 * PT_PER_CM;
pub const MARGIN_LEFT: f32 = 3.0 * PT_PER_CM;
pub const MARGIN_RIGHT: f32 = 2.0 * PT_PER_CM;
pub const MARGIN_BOTTOM: f32 = 2.0 * PT_PER_CM;

pub const PT_PER_CM: f32 = 28.3465;
/// OOXML length unit: 20ths of a point, 567 per centimeter.
pub const TWIPS_PER_CM: u32 = 567;

/// Usable height of one page, the constant both renderers must feed to the
/// pagination engine.
pub const CONTENT_HEIGHT: f32 = A4_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
pub const CONTENT_WIDTH: f32 = A4_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;

pub fn cm_to_pt(cm: f32) -> f32 {
    cm * PT_PER_CM
}

pub fn cm_to_twips(cm: f32) -> u32 {
    (cm * TWIPS_PER_CM as f32).round() as u32
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Align {
    Left,
    Center,
    Justify,
}

/// Presentation attributes for one block kind.
#[derive(Clone, Copy, Debug)]
pub struct BlockStyle {
    pub font_size: f32,
    pub bold: bool,
    pub italic: bool,
    pub uppercase: bool,
    pub align: Align,
    /// Line spacing multiplier: 1.0 single, 1.5 one-and-a-half.
    pub line_spacing: f32,
    pub first_line_indent: f32,
    pub indent_left: f32,
    pub space_before: f32,
    pub space_after: f32,
    /// Block always sits alone on its own page (cover, toc).
    pub own_page: bool,
    /// Block starts a new page when the current one has content (references).
    pub break_before: bool,
    /// Block is the last thing on its page (abstract).
    pub break_after: bool,
}

const BODY: BlockStyle = BlockStyle {
    font_size: 12.0,
    bold: false,
    italic: false,
    uppercase: false,
    align: Align::Justify,
    line_spacing: 1.5,
    first_line_indent: 1.25 * PT_PER_CM,
    indent_left: 0.0,
    space_before: 0.0,
    space_after: 12.0,
    own_page: false,
    break_before: false,
    break_after: false,
};

pub fn style_for(block: &Block) -> BlockStyle {
    style_for_kind(block.kind(), block.title_level())
}

pub fn style_for_kind(kind: Kind, title_level: u8) -> BlockStyle {
    match kind {
        Kind::Title => title_style(title_level),
        Kind::Paragraph => BODY,
        Kind::Abstract => BlockStyle {
            first_line_indent: 0.0,
            break_after: true,
            space_before: 12.0,
            ..BODY
        },
        Kind::Quote => BlockStyle {
            font_size: 11.0,
            italic: true,
            align: Align::Left,
            line_spacing: 1.0,
            first_line_indent: 0.0,
            indent_left: 4.0 * PT_PER_CM,
            space_before: 6.0,
            space_after: 12.0,
            ..BODY
        },
        Kind::List | Kind::OrderedList => BlockStyle {
            align: Align::Left,
            first_line_indent: 0.0,
            indent_left: cm_to_pt(0.75),
            ..BODY
        },
        Kind::Table => BlockStyle {
            align: Align::Left,
            line_spacing: 1.2,
            first_line_indent: 0.0,
            space_before: 12.0,
            ..BODY
        },
        Kind::Image => BlockStyle {
            align: Align::Center,
            first_line_indent: 0.0,
            space_before: 12.0,
            ..BODY
        },
        Kind::Footnote => BlockStyle {
            font_size: 9.0,
            align: Align::Left,
            line_spacing: 1.0,
            first_line_indent: 0.0,
            space_before: 10.0,
            space_after: 4.0,
            ..BODY
        },
        Kind::Keywords => BlockStyle {
            align: Align::Left,
            first_line_indent: 0.0,
            space_before: 10.0,
            ..BODY
        },
        Kind::References => BlockStyle {
            align: Align::Justify,
            first_line_indent: 0.0,
            space_after: 6.0,
            break_before: true,
            ..BODY
        },
        Kind::Cover => BlockStyle {
            align: Align::Center,
            first_line_indent: 0.0,
            own_page: true,
            ..BODY
        },
        Kind::Toc => BlockStyle {
            align: Align::Left,
            first_line_indent: 0.0,
            own_page: true,
            ..BODY
        },
        Kind::PageBreak => BlockStyle {
            font_size: 0.0,
            space_after: 0.0,
            ..BODY
        },
    }
}

/// Title tiers: level 1 is the centered uppercase section opener, 2..5
/// step down in size and finally weight.
pub fn title_style(level: u8) -> BlockStyle {
    let base = BlockStyle {
        bold: true,
        align: Align::Left,
        first_line_indent: 0.0,
        space_before: 12.0,
        ..BODY
    };
    match level.clamp(1, 5) {
        1 => BlockStyle {
            font_size: 20.0,
            uppercase: true,
            align: Align::Center,
            ..base
        },
        2 => BlockStyle {
            font_size: 16.0,
            ..base
        },
        3 => BlockStyle {
            font_size: 14.0,
            ..base
        },
        4 => BlockStyle {
            font_size: 12.0,
            ..base
        },
        // Level 5 keeps body size; bold stands in for the semibold weight
        // the on-screen stylesheet uses.
        _ => BlockStyle {
            font_size: 12.0,
            ..base
        },
    }
}

/// Section headings rendered for structural blocks (uppercase, centered).
pub fn section_heading(kind: Kind) -> Option<&'static str> {
    match kind {
        Kind::Toc => Some("SUMÁRIO"),
        Kind::Abstract => Some("RESUMO"),
        Kind::References => Some("REFERÊNCIAS"),
        _ => None,
    }
}

pub const KEYWORDS_LABEL: &str = "Palavras-chave:";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockBody;

    fn block(body: BlockBody) -> Block {
        Block {
            id: "x".into(),
            body,
        }
    }

    #[test]
    fn forced_break_flags() {
        assert!(style_for(&block(BlockBody::Cover { cover_data: None })).own_page);
        assert!(style_for(&block(BlockBody::Toc {})).own_page);
        assert!(
            style_for(&block(BlockBody::References {
                references: vec![]
            }))
            .break_before
        );
        assert!(
            style_for(&block(BlockBody::Abstract {
                content: String::new()
            }))
            .break_after
        );
        assert!(
            !style_for(&block(BlockBody::Paragraph {
                content: String::new()
            }))
            .own_page
        );
    }

    #[test]
    fn title_tiers() {
        assert_eq!(title_style(1).font_size, 20.0);
        assert!(title_style(1).uppercase);
        assert_eq!(title_style(1).align, Align::Center);
        assert_eq!(title_style(2).font_size, 16.0);
        assert_eq!(title_style(2).align, Align::Left);
        assert!(!title_style(2).uppercase);
        assert_eq!(title_style(5).font_size, 12.0);
        // clamped
        assert_eq!(title_style(0).font_size, 20.0);
        assert_eq!(title_style(200).font_size, 12.0);
    }

    #[test]
    fn abnt_margins_in_twips() {
        assert_eq!(cm_to_twips(3.0), 1701);
        assert_eq!(cm_to_twips(2.0), 1134);
        assert_eq!(cm_to_twips(1.25), 709);
        assert_eq!(cm_to_twips(4.0), 2268);
    }

    #[test]
    fn content_height_is_a4_minus_margins() {
        assert!((CONTENT_HEIGHT - (841.89 - 5.0 * PT_PER_CM)).abs() < 0.01);
    }
}
