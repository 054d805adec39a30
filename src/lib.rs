mod docx;
mod error;
mod fonts;
pub mod model;
pub mod paginate;
pub mod preview;
mod pdf;
mod storage;
pub mod style;

pub use error::Error;
pub use storage::{load_blocks, parse_blocks, save_blocks};

use std::path::Path;
use std::time::Instant;

use model::Block;

pub const DEFAULT_PDF_NAME: &str = "documento-abnt.pdf";
pub const DEFAULT_DOCX_NAME: &str = "documento-abnt.docx";

/// Render the document to PDF bytes without touching the filesystem.
pub fn render_pdf(blocks: &[Block]) -> Result<Vec<u8>, Error> {
    pdf::render(blocks)
}

/// Render the document to DOCX bytes without touching the filesystem.
pub fn render_docx(blocks: &[Block]) -> Result<Vec<u8>, Error> {
    docx::render(blocks)
}

pub fn export_pdf(blocks: &[Block], output: &Path) -> Result<(), Error> {
    let t0 = Instant::now();

    let bytes = pdf::render(blocks)?;
    let t_render = t0.elapsed();

    std::fs::write(output, &bytes).map_err(Error::Io)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_render.as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(())
}

pub fn export_docx(blocks: &[Block], output: &Path) -> Result<(), Error> {
    let t0 = Instant::now();

    let bytes = docx::render(blocks)?;
    let t_render = t0.elapsed();

    std::fs::write(output, &bytes).map_err(Error::Io)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_render.as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(())
}
