//! Print/export renderer: draws the paginated document into a PDF. Page
//! boundaries come from the same pagination engine and content-height
//! constant as the preview, so the exported artifact matches the on-screen
//! pages exactly. Styling is read from the shared rule table only.

mod layout;

use std::collections::HashMap;

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref};

use crate::error::Result;
use crate::fonts::{FontEntry, FontVariant, register_base_fonts};
use crate::model::{Block, BlockBody, Kind};
use crate::paginate::{Page, paginate};
use crate::style::{
    self, A4_HEIGHT, A4_WIDTH, Align, BlockStyle, CONTENT_HEIGHT, CONTENT_WIDTH, MARGIN_BOTTOM,
    MARGIN_LEFT, MARGIN_TOP, style_for, title_style,
};

const ASCENDER: f32 = 0.75;
const CELL_PAD: f32 = 5.4;

struct EmbeddedImage {
    pdf_name: String,
    display_width: f32,
    display_height: f32,
}

struct Renderer<'a> {
    blocks: &'a [Block],
    fonts: HashMap<FontVariant, FontEntry>,
    /// Block index → embedded XObject; absent when the source failed to load.
    images: HashMap<usize, EmbeddedImage>,
    /// Title block id → true printed page number.
    title_pages: HashMap<&'a str, usize>,
}

pub fn render(blocks: &[Block]) -> Result<Vec<u8>> {
    let t0 = std::time::Instant::now();

    let pages = paginate(blocks, CONTENT_HEIGHT);
    let t_paginate = t0.elapsed();

    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();

    let fonts = register_base_fonts(&mut pdf, &mut alloc);

    // Embed every image that loads; failures degrade to a placeholder box at
    // draw time. All loads complete here, before any page is assembled.
    let mut images = HashMap::new();
    let mut image_xobjects: Vec<(String, Ref)> = Vec::new();
    for (idx, block) in blocks.iter().enumerate() {
        if let BlockBody::Image {
            image_url,
            image_width,
            ..
        } = &block.body
        {
            let Some(url) = image_url.as_deref().filter(|u| !u.is_empty()) else {
                continue;
            };
            match embed_image(url, *image_width, &mut pdf, &mut alloc, &mut image_xobjects) {
                Some(img) => {
                    images.insert(idx, img);
                }
                None => {
                    log::warn!("image block {} failed to load: {}", block.id, url);
                }
            }
        }
    }
    let t_images = t0.elapsed();

    let title_pages = true_title_pages(blocks, &pages);

    let renderer = Renderer {
        blocks,
        fonts,
        images,
        title_pages,
    };

    let mut all_contents: Vec<Content> = Vec::new();
    for page in &pages {
        let mut content = Content::new();
        renderer.draw_page(page, &mut content);
        all_contents.push(content);
    }
    let t_layout = t0.elapsed();

    let n = all_contents.len();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    for (i, c) in all_contents.into_iter().enumerate() {
        let raw = c.finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        pdf.stream(content_ids[i], &compressed)
            .filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);

    for i in 0..n {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, A4_WIDTH, A4_HEIGHT))
            .parent(pages_id)
            .contents(content_ids[i]);
        let mut resources = page.resources();
        {
            let mut fonts = resources.fonts();
            for entry in renderer.fonts.values() {
                fonts.pair(Name(entry.pdf_name.as_bytes()), entry.font_ref);
            }
        }
        if !image_xobjects.is_empty() {
            let mut xobjects = resources.x_objects();
            for (name, xobj_ref) in &image_xobjects {
                xobjects.pair(Name(name.as_bytes()), *xobj_ref);
            }
        }
    }

    let t_total = t0.elapsed();
    log::info!(
        "PDF render: paginate={:.1}ms, images={:.1}ms, layout={:.1}ms, assembly={:.1}ms ({} pages)",
        t_paginate.as_secs_f64() * 1000.0,
        (t_images - t_paginate).as_secs_f64() * 1000.0,
        (t_layout - t_images).as_secs_f64() * 1000.0,
        (t_total - t_layout).as_secs_f64() * 1000.0,
        n,
    );

    Ok(pdf.finish())
}

/// True page number for every title block, derived from the pagination
/// result. More accurate than the preview's ordinal approximation.
fn true_title_pages<'a>(blocks: &'a [Block], pages: &[Page]) -> HashMap<&'a str, usize> {
    let mut map = HashMap::new();
    for (page_idx, page) in pages.iter().enumerate() {
        for &block_idx in &page.blocks {
            if blocks[block_idx].kind() == Kind::Title {
                map.insert(blocks[block_idx].id.as_str(), page_idx + 1);
            }
        }
    }
    map
}

fn embed_image(
    url: &str,
    image_width: Option<f32>,
    pdf: &mut Pdf,
    alloc: &mut dyn FnMut() -> Ref,
    image_xobjects: &mut Vec<(String, Ref)>,
) -> Option<EmbeddedImage> {
    let data = std::fs::read(url).ok()?;
    let format = image::guess_format(&data).ok()?;
    let xobj_ref = alloc();
    let pdf_name = format!("Im{}", image_xobjects.len() + 1);

    let (px_w, px_h) = match format {
        image::ImageFormat::Jpeg => {
            let (w, h) = image::image_dimensions(url).ok()?;
            let mut xobj = pdf.image_xobject(xobj_ref, &data);
            xobj.filter(Filter::DctDecode);
            xobj.width(w as i32);
            xobj.height(h as i32);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
            (w, h)
        }
        image::ImageFormat::Png => {
            let decoded = image::load_from_memory_with_format(&data, format).ok()?;
            let rgba: image::RgbaImage = decoded.to_rgba8();
            let (w, h) = (rgba.width(), rgba.height());
            let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);

            let rgb_data: Vec<u8> = rgba.pixels().flat_map(|p| [p.0[0], p.0[1], p.0[2]]).collect();
            let compressed_rgb = miniz_oxide::deflate::compress_to_vec_zlib(&rgb_data, 6);

            let smask_ref = if has_alpha {
                let alpha_data: Vec<u8> = rgba.pixels().map(|p| p.0[3]).collect();
                let compressed_alpha = miniz_oxide::deflate::compress_to_vec_zlib(&alpha_data, 6);
                let mask_ref = alloc();
                let mut mask = pdf.image_xobject(mask_ref, &compressed_alpha);
                mask.filter(Filter::FlateDecode);
                mask.width(w as i32);
                mask.height(h as i32);
                mask.color_space().device_gray();
                mask.bits_per_component(8);
                Some(mask_ref)
            } else {
                None
            };

            let mut xobj = pdf.image_xobject(xobj_ref, &compressed_rgb);
            xobj.filter(Filter::FlateDecode);
            xobj.width(w as i32);
            xobj.height(h as i32);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
            if let Some(mask_ref) = smask_ref {
                xobj.s_mask(mask_ref);
            }
            (w, h)
        }
        _ => return None,
    };

    let pct = image_width.unwrap_or(100.0).clamp(10.0, 100.0) / 100.0;
    let mut display_width = CONTENT_WIDTH * pct;
    let mut display_height = display_width * px_h as f32 / px_w.max(1) as f32;
    // Cap like the preview does, preserving aspect.
    if display_height > 400.0 {
        display_width *= 400.0 / display_height;
        display_height = 400.0;
    }

    image_xobjects.push((pdf_name.clone(), xobj_ref));
    Some(EmbeddedImage {
        pdf_name,
        display_width,
        display_height,
    })
}

impl Renderer<'_> {
    fn font(&self, bold: bool, italic: bool) -> &FontEntry {
        &self.fonts[&FontVariant { bold, italic }]
    }

    fn font_for(&self, st: &BlockStyle) -> &FontEntry {
        self.font(st.bold, st.italic)
    }

    fn draw_page(&self, page: &Page, content: &mut Content) {
        let mut slot_top = A4_HEIGHT - MARGIN_TOP;
        for &idx in &page.blocks {
            let block = &self.blocks[idx];
            match &block.body {
                BlockBody::Cover { cover_data } => {
                    self.draw_cover(content, cover_data.as_ref());
                }
                BlockBody::Toc {} => self.draw_toc(content),
                BlockBody::Title { .. }
                | BlockBody::Paragraph { .. }
                | BlockBody::Quote { .. } => {
                    self.draw_text_block(content, block, &mut slot_top);
                }
                BlockBody::Abstract { .. } => self.draw_abstract(content, block, &mut slot_top),
                BlockBody::List { .. } | BlockBody::OrderedList { .. } => {
                    self.draw_list(content, block, &mut slot_top);
                }
                BlockBody::Table { table_data } => {
                    if let Some(t) = table_data {
                        self.draw_table(content, t, &mut slot_top);
                    }
                }
                BlockBody::Image { .. } => self.draw_image(content, block, idx, &mut slot_top),
                BlockBody::Footnote { .. } => self.draw_footnote(content, block, &mut slot_top),
                BlockBody::Keywords { keywords } => {
                    self.draw_keywords(content, keywords, &mut slot_top);
                }
                BlockBody::References { .. } => {
                    self.draw_references(content, block, &mut slot_top);
                }
                BlockBody::PageBreak {} => {}
            }
        }
    }

    /// Title/paragraph/quote: one uniform run wrapped and aligned per the
    /// rule table.
    fn draw_text_block(&self, content: &mut Content, block: &Block, slot_top: &mut f32) {
        let st = style_for(block);
        let entry = self.font_for(&st);
        let text = if st.uppercase {
            block.display_content().to_uppercase()
        } else {
            block.display_content().to_string()
        };

        let text_width = CONTENT_WIDTH - st.indent_left;
        let lines = layout::build_lines(&text, entry, st.font_size, text_width, st.first_line_indent);
        let line_h = st.font_size * 1.2 * st.line_spacing;
        let baseline = *slot_top - st.space_before - st.font_size * ASCENDER;

        let consumed = layout::render_lines(
            content,
            &lines,
            st.align,
            MARGIN_LEFT + st.indent_left,
            text_width,
            baseline,
            line_h,
            st.first_line_indent,
            &entry.pdf_name,
            st.font_size,
        );
        *slot_top -= st.space_before + consumed + st.space_after;
    }

    /// Uppercase centered section opener (SUMÁRIO, RESUMO, REFERÊNCIAS).
    fn draw_section_heading(&self, content: &mut Content, heading: &str, slot_top: &mut f32) {
        let st = title_style(1);
        let entry = self.font_for(&st);
        let baseline = *slot_top - st.space_before - st.font_size * ASCENDER;
        layout::draw_centered_line(
            content,
            heading,
            entry,
            st.font_size,
            MARGIN_LEFT + CONTENT_WIDTH / 2.0,
            baseline,
        );
        *slot_top -= st.space_before + st.font_size * 1.8 + st.space_after;
    }

    fn draw_cover(&self, content: &mut Content, data: Option<&crate::model::CoverData>) {
        let Some(data) = data else { return };
        let center_x = MARGIN_LEFT + CONTENT_WIDTH / 2.0;
        let top = A4_HEIGHT - MARGIN_TOP;

        // Top block: institution, then authors one per line, sorted for
        // display (stored order untouched).
        let mut y = top - 14.0 * ASCENDER;
        layout::draw_centered_line(
            content,
            &data.institution.to_uppercase(),
            self.font(true, false),
            14.0,
            center_x,
            y,
        );
        y -= 32.0;
        for author in data.sorted_authors() {
            layout::draw_centered_line(content, author, self.font(false, false), 12.0, center_x, y);
            y -= 18.0;
        }

        // Middle block: bold uppercase title, optional subtitle, vertically
        // centered in the content area.
        let title_entry = self.font(true, false);
        let title_lines = layout::build_lines(
            &data.title.to_uppercase(),
            title_entry,
            20.0,
            CONTENT_WIDTH,
            0.0,
        );
        let title_h = title_lines.len() as f32 * 20.0 * 1.2;
        let mid_baseline = MARGIN_BOTTOM + CONTENT_HEIGHT / 2.0 + title_h / 2.0;
        layout::render_lines(
            content,
            &title_lines,
            Align::Center,
            MARGIN_LEFT,
            CONTENT_WIDTH,
            mid_baseline,
            20.0 * 1.2,
            0.0,
            &title_entry.pdf_name,
            20.0,
        );
        if let Some(subtitle) = data.subtitle.as_deref().filter(|s| !s.is_empty()) {
            layout::draw_centered_line(
                content,
                subtitle,
                self.font(false, false),
                14.0,
                center_x,
                mid_baseline - title_h - 10.0,
            );
        }

        // Bottom block: city above year, anchored at the bottom margin.
        let regular = self.font(false, false);
        layout::draw_centered_line(content, &data.city, regular, 12.0, center_x, MARGIN_BOTTOM + 26.0);
        layout::draw_centered_line(content, &data.year, regular, 12.0, center_x, MARGIN_BOTTOM + 8.0);
    }

    fn draw_toc(&self, content: &mut Content) {
        let mut slot_top = A4_HEIGHT - MARGIN_TOP;
        self.draw_section_heading(content, style::section_heading(Kind::Toc).unwrap_or_default(), &mut slot_top);

        let entry = self.font(false, false);
        let line_h = 12.0 * 1.2 * 1.5;
        let mut y = slot_top - 12.0 * ASCENDER;
        for title in self.blocks.iter().filter(|b| b.kind() == Kind::Title) {
            if y < MARGIN_BOTTOM {
                // A table of contents longer than one page is out of scope
                // for the simulated layout; clip instead of overflowing.
                log::warn!("toc overflows its page, remaining entries clipped");
                break;
            }
            let indent = (title.title_level() - 1) as f32 * style::cm_to_pt(1.0);
            layout::draw_line_at(
                content,
                title.display_content(),
                entry,
                12.0,
                MARGIN_LEFT + indent,
                y,
            );
            // Right-aligned true page number from the pagination result.
            if let Some(page) = self.title_pages.get(title.id.as_str()) {
                let num = page.to_string();
                let w = entry.text_width(&num, 12.0);
                layout::draw_line_at(
                    content,
                    &num,
                    entry,
                    12.0,
                    MARGIN_LEFT + CONTENT_WIDTH - w,
                    y,
                );
            }
            y -= line_h;
        }
    }

    fn draw_abstract(&self, content: &mut Content, block: &Block, slot_top: &mut f32) {
        self.draw_section_heading(
            content,
            style::section_heading(Kind::Abstract).unwrap_or_default(),
            slot_top,
        );
        let st = style_for(block);
        let entry = self.font_for(&st);
        let lines = layout::build_lines(
            block.display_content(),
            entry,
            st.font_size,
            CONTENT_WIDTH,
            0.0,
        );
        let line_h = st.font_size * 1.2 * st.line_spacing;
        let baseline = *slot_top - st.font_size * ASCENDER;
        let consumed = layout::render_lines(
            content,
            &lines,
            Align::Justify,
            MARGIN_LEFT,
            CONTENT_WIDTH,
            baseline,
            line_h,
            0.0,
            &entry.pdf_name,
            st.font_size,
        );
        *slot_top -= consumed + st.space_after;
    }

    fn draw_references(&self, content: &mut Content, block: &Block, slot_top: &mut f32) {
        self.draw_section_heading(
            content,
            style::section_heading(Kind::References).unwrap_or_default(),
            slot_top,
        );
        let st = style_for(block);
        let entry = self.font_for(&st);
        let line_h = st.font_size * 1.2 * st.line_spacing;
        for reference in block.display_references() {
            let lines =
                layout::build_lines(&reference, entry, st.font_size, CONTENT_WIDTH, 0.0);
            let baseline = *slot_top - st.font_size * ASCENDER;
            let consumed = layout::render_lines(
                content,
                &lines,
                st.align,
                MARGIN_LEFT,
                CONTENT_WIDTH,
                baseline,
                line_h,
                0.0,
                &entry.pdf_name,
                st.font_size,
            );
            *slot_top -= consumed + st.space_after;
        }
    }

    fn draw_list(&self, content: &mut Content, block: &Block, slot_top: &mut f32) {
        let st = style_for(block);
        let entry = self.font_for(&st);
        let ordered = block.kind() == Kind::OrderedList;
        let line_h = st.font_size * 1.2 * st.line_spacing;
        let label_x = MARGIN_LEFT + st.indent_left;
        let text_x = label_x + style::cm_to_pt(0.5);
        let text_width = CONTENT_WIDTH - (text_x - MARGIN_LEFT);

        *slot_top -= st.space_before;
        for (i, item) in block.display_items().iter().enumerate() {
            let label = if ordered {
                format!("{}.", i + 1)
            } else {
                "\u{2022}".to_string()
            };
            let baseline = *slot_top - st.font_size * ASCENDER;
            layout::draw_line_at(content, &label, entry, st.font_size, label_x, baseline);
            let lines = layout::build_lines(item, entry, st.font_size, text_width, 0.0);
            let consumed = layout::render_lines(
                content,
                &lines,
                Align::Left,
                text_x,
                text_width,
                baseline,
                line_h,
                0.0,
                &entry.pdf_name,
                st.font_size,
            );
            *slot_top -= consumed;
        }
        *slot_top -= st.space_after;
    }

    fn draw_table(&self, content: &mut Content, table: &crate::model::TableData, slot_top: &mut f32) {
        let ncols = table.headers.len();
        if ncols == 0 {
            return;
        }
        let st = style::style_for_kind(Kind::Table, 1);
        let col_w = CONTENT_WIDTH / ncols as f32;
        let line_h = st.font_size * 1.2;
        *slot_top -= st.space_before;

        let mut draw_row = |cells: &[&str], bold: bool, shaded: bool, slot_top: &mut f32| {
            let entry = self.font(bold, false);
            let cell_text_w = col_w - 2.0 * CELL_PAD;
            let cell_lines: Vec<Vec<layout::TextLine>> = cells
                .iter()
                .map(|cell| layout::build_lines(cell, entry, st.font_size, cell_text_w, 0.0))
                .collect();
            let nlines = cell_lines.iter().map(Vec::len).max().unwrap_or(1);
            let row_h = nlines as f32 * line_h + 2.0 * CELL_PAD;
            let row_top = *slot_top;
            let row_bottom = row_top - row_h;

            if shaded {
                content.save_state();
                content.set_fill_gray(0.93);
                content.rect(MARGIN_LEFT, row_bottom, CONTENT_WIDTH, row_h);
                content.fill_nonzero();
                content.restore_state();
                content.set_fill_gray(0.0);
            }

            for (ci, lines) in cell_lines.iter().enumerate() {
                let cell_x = MARGIN_LEFT + ci as f32 * col_w + CELL_PAD;
                let baseline = row_top - CELL_PAD - st.font_size * ASCENDER;
                let align = if bold { Align::Center } else { Align::Left };
                layout::render_lines(
                    content,
                    lines,
                    align,
                    cell_x,
                    cell_text_w,
                    baseline,
                    line_h,
                    0.0,
                    &entry.pdf_name,
                    st.font_size,
                );
            }

            // Grid strokes, 0.5pt.
            content.save_state();
            content.set_line_width(0.5);
            content.set_stroke_gray(0.6);
            content.move_to(MARGIN_LEFT, row_top);
            content.line_to(MARGIN_LEFT + CONTENT_WIDTH, row_top);
            content.move_to(MARGIN_LEFT, row_bottom);
            content.line_to(MARGIN_LEFT + CONTENT_WIDTH, row_bottom);
            for ci in 0..=ncols {
                let x = MARGIN_LEFT + ci as f32 * col_w;
                content.move_to(x, row_top);
                content.line_to(x, row_bottom);
            }
            content.stroke();
            content.restore_state();

            *slot_top = row_bottom;
        };

        let headers: Vec<&str> = table.headers.iter().map(String::as_str).collect();
        draw_row(&headers, true, true, slot_top);
        for row in table.rectangular_rows() {
            draw_row(&row, false, false, slot_top);
        }
        *slot_top -= st.space_after;
    }

    fn draw_image(&self, content: &mut Content, block: &Block, idx: usize, slot_top: &mut f32) {
        let st = style_for(block);
        *slot_top -= st.space_before;
        let caption_entry = self.font(false, false);

        match self.images.get(&idx) {
            Some(img) => {
                let x = MARGIN_LEFT + (CONTENT_WIDTH - img.display_width) / 2.0;
                let y_bottom = *slot_top - img.display_height;
                content.save_state();
                content.transform([
                    img.display_width,
                    0.0,
                    0.0,
                    img.display_height,
                    x,
                    y_bottom,
                ]);
                content.x_object(Name(img.pdf_name.as_bytes()));
                content.restore_state();
                *slot_top = y_bottom;
            }
            None => {
                // Load failure or no source: captioned placeholder box, the
                // degraded-but-never-fatal policy.
                let box_h = 80.0;
                content.save_state();
                content.set_line_width(0.5);
                content.set_stroke_gray(0.6);
                content.rect(MARGIN_LEFT, *slot_top - box_h, CONTENT_WIDTH, box_h);
                content.stroke();
                content.restore_state();
                *slot_top -= box_h;
            }
        }

        // Caption below, small and gray like the preview.
        *slot_top -= 4.0;
        content.save_state();
        content.set_fill_gray(0.4);
        layout::draw_centered_line(
            content,
            block.display_alt(),
            caption_entry,
            9.0,
            MARGIN_LEFT + CONTENT_WIDTH / 2.0,
            *slot_top - 9.0 * ASCENDER,
        );
        content.restore_state();
        content.set_fill_gray(0.0);
        *slot_top -= 12.0 + st.space_after;
    }

    fn draw_footnote(&self, content: &mut Content, block: &Block, slot_top: &mut f32) {
        let st = style_for(block);
        let entry = self.font_for(&st);
        *slot_top -= st.space_before;

        // Separator rule, ~1/3 of the text width.
        content.save_state();
        content.set_line_width(0.5);
        content.move_to(MARGIN_LEFT, *slot_top);
        content.line_to(MARGIN_LEFT + 144.0_f32.min(CONTENT_WIDTH), *slot_top);
        content.stroke();
        content.restore_state();
        *slot_top -= 6.0;

        let num = block.footnote_number().to_string();
        let baseline = *slot_top - st.font_size * ASCENDER;
        // Superscript mark, then the note text.
        layout::draw_line_at(
            content,
            &num,
            entry,
            st.font_size * 0.65,
            MARGIN_LEFT,
            baseline + st.font_size * 0.3,
        );
        let num_w = entry.text_width(&num, st.font_size * 0.65) + 2.0;
        let text_width = CONTENT_WIDTH - num_w;
        let lines = layout::build_lines(
            block.display_content(),
            entry,
            st.font_size,
            text_width,
            0.0,
        );
        let line_h = st.font_size * 1.2 * st.line_spacing;
        let consumed = layout::render_lines(
            content,
            &lines,
            Align::Left,
            MARGIN_LEFT + num_w,
            text_width,
            baseline,
            line_h,
            0.0,
            &entry.pdf_name,
            st.font_size,
        );
        *slot_top -= consumed + st.space_after;
    }

    fn draw_keywords(&self, content: &mut Content, keywords: &[String], slot_top: &mut f32) {
        let st = style::style_for_kind(Kind::Keywords, 1);
        let line_h = st.font_size * 1.2 * st.line_spacing;
        *slot_top -= st.space_before;

        let bold = self.font(true, false);
        let baseline = *slot_top - st.font_size * ASCENDER;
        layout::draw_line_at(
            content,
            style::KEYWORDS_LABEL,
            bold,
            st.font_size,
            MARGIN_LEFT,
            baseline,
        );
        *slot_top -= line_h;

        let entry = self.font(false, false);
        let text = format!("{}.", keywords.join("; "));
        let lines = layout::build_lines(&text, entry, st.font_size, CONTENT_WIDTH, 0.0);
        let consumed = layout::render_lines(
            content,
            &lines,
            Align::Left,
            MARGIN_LEFT,
            CONTENT_WIDTH,
            *slot_top - st.font_size * ASCENDER,
            line_h,
            0.0,
            &entry.pdf_name,
            st.font_size,
        );
        *slot_top -= consumed + st.space_after;
    }
}
