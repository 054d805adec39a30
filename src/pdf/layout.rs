use pdf_writer::{Content, Name, Str};

use crate::fonts::{FontEntry, to_winansi_bytes};
use crate::style::Align;

pub(super) struct WordChunk {
    pub(super) text: String,
    pub(super) x_offset: f32, // x relative to line start
    pub(super) width: f32,
}

pub(super) struct TextLine {
    pub(super) chunks: Vec<WordChunk>,
    pub(super) total_width: f32,
}

fn finish_line(chunks: &mut Vec<WordChunk>) -> TextLine {
    let total_width = chunks.last().map(|c| c.x_offset + c.width).unwrap_or(0.0);
    TextLine {
        chunks: std::mem::take(chunks),
        total_width,
    }
}

/// Wrap text into lines of at most `max_width` points. The first line is
/// narrowed by `first_line_indent` (ABNT paragraph indent); words wider than
/// the line get a line of their own rather than being split.
pub(super) fn build_lines(
    text: &str,
    entry: &FontEntry,
    font_size: f32,
    max_width: f32,
    first_line_indent: f32,
) -> Vec<TextLine> {
    let space_w = entry.space_width(font_size);
    let mut lines: Vec<TextLine> = Vec::new();
    let mut current: Vec<WordChunk> = Vec::new();
    let mut current_x: f32 = 0.0;

    for word in text.split_whitespace() {
        let ww = entry.text_width(word, font_size);
        let proposed_x = if current.is_empty() {
            0.0
        } else {
            current_x + space_w
        };

        let line_max = if lines.is_empty() {
            (max_width - first_line_indent).max(font_size)
        } else {
            max_width
        };
        if !current.is_empty() && proposed_x + ww > line_max {
            lines.push(finish_line(&mut current));
            current_x = 0.0;
        } else {
            current_x = proposed_x;
        }

        current.push(WordChunk {
            text: word.to_string(),
            x_offset: current_x,
            width: ww,
        });
        current_x += ww;
    }

    if !current.is_empty() {
        lines.push(finish_line(&mut current));
    }
    if lines.is_empty() {
        lines.push(TextLine {
            chunks: vec![],
            total_width: 0.0,
        });
    }
    lines
}

/// Draw pre-built lines applying the block alignment. For justified blocks the
/// extra space is distributed across word gaps, last line left-aligned as
/// usual. Returns the height consumed.
#[allow(clippy::too_many_arguments)]
pub(super) fn render_lines(
    content: &mut Content,
    lines: &[TextLine],
    align: Align,
    margin_left: f32,
    text_width: f32,
    first_baseline_y: f32,
    line_h: f32,
    first_line_indent: f32,
    pdf_font: &str,
    font_size: f32,
) -> f32 {
    let last_line_idx = lines.len().saturating_sub(1);

    content.begin_text();
    content.set_font(Name(pdf_font.as_bytes()), font_size);
    let mut td_x = 0.0_f32;
    let mut td_y = 0.0_f32;

    for (line_num, line) in lines.iter().enumerate() {
        let y = first_baseline_y - line_num as f32 * line_h;

        let (eff_margin, eff_width) = if line_num == 0 {
            (margin_left + first_line_indent, text_width - first_line_indent)
        } else {
            (margin_left, text_width)
        };

        let is_justified =
            align == Align::Justify && line_num != last_line_idx && line.chunks.len() > 1;

        let line_start_x = match align {
            Align::Center => eff_margin + (eff_width - line.total_width) / 2.0,
            Align::Left | Align::Justify => eff_margin,
        };

        let extra_per_gap = if is_justified {
            (eff_width - line.total_width) / (line.chunks.len() - 1) as f32
        } else {
            0.0
        };

        for (chunk_idx, chunk) in line.chunks.iter().enumerate() {
            let x = line_start_x + chunk.x_offset + chunk_idx as f32 * extra_per_gap;
            content.next_line(x - td_x, y - td_y);
            td_x = x;
            td_y = y;
            content.show(Str(&to_winansi_bytes(&chunk.text)));
        }
    }
    content.end_text();

    lines.len() as f32 * line_h
}

/// Single centered line, no wrapping. Used for cover fields and headings
/// whose text is known to fit.
pub(super) fn draw_centered_line(
    content: &mut Content,
    text: &str,
    entry: &FontEntry,
    font_size: f32,
    center_x: f32,
    baseline_y: f32,
) {
    let w = entry.text_width(text, font_size);
    content.begin_text();
    content.set_font(Name(entry.pdf_name.as_bytes()), font_size);
    content.next_line(center_x - w / 2.0, baseline_y);
    content.show(Str(&to_winansi_bytes(text)));
    content.end_text();
}

/// Single left-aligned line at an absolute position.
pub(super) fn draw_line_at(
    content: &mut Content,
    text: &str,
    entry: &FontEntry,
    font_size: f32,
    x: f32,
    baseline_y: f32,
) {
    content.begin_text();
    content.set_font(Name(entry.pdf_name.as_bytes()), font_size);
    content.next_line(x, baseline_y);
    content.show(Str(&to_winansi_bytes(text)));
    content.end_text();
}
