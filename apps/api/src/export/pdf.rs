//! PDF document assembly and pagination.
//!
//! Layout mirrors the printed program sheet: A4, title and generation date on
//! the first page, then the cleaned text at a fixed line step, breaking to a
//! new page when the cursor passes the page-bottom threshold.

use chrono::NaiveDate;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use thiserror::Error;

use crate::export::cleaner::clean_for_export;
use crate::export::metrics::wrap_lines;

pub const DOCUMENT_TITLE: &str = "Programme CP Sur-Mesure";

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_LEFT_MM: f32 = 20.0;
/// Text column width for body lines.
const TEXT_WIDTH_MM: f32 = 170.0;

const TITLE_Y_MM: f32 = 20.0;
const DATE_Y_MM: f32 = 35.0;
const BODY_START_Y_MM: f32 = 50.0;
/// Body resumes here on continuation pages.
const CONTINUATION_Y_MM: f32 = 20.0;
const LINE_STEP_MM: f32 = 6.0;
/// A new page starts once the cursor passes this.
const PAGE_BOTTOM_MM: f32 = 280.0;

const TITLE_SIZE_PT: f32 = 20.0;
const DATE_SIZE_PT: f32 = 12.0;
const BODY_SIZE_PT: f32 = 10.0;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF generation failed: {0}")]
    Generation(#[from] printpdf::Error),
}

/// Download filename for a program generated on `date`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("programme-cp-{}.pdf", date.format("%d-%m-%Y"))
}

/// Builds the paginated PDF for one generated program and returns its bytes.
pub fn generate_pdf(content: &str, date: NaiveDate) -> Result<Vec<u8>, PdfError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        DOCUMENT_TITLE,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    layer.use_text(
        DOCUMENT_TITLE,
        TITLE_SIZE_PT,
        Mm(MARGIN_LEFT_MM),
        from_top(TITLE_Y_MM),
        &bold,
    );
    layer.use_text(
        format!("Généré le: {}", date.format("%d/%m/%Y")),
        DATE_SIZE_PT,
        Mm(MARGIN_LEFT_MM),
        from_top(DATE_Y_MM),
        &regular,
    );

    let cleaned = clean_for_export(content);
    let lines = wrap_lines(&cleaned, BODY_SIZE_PT, TEXT_WIDTH_MM);

    let mut y = BODY_START_Y_MM;
    for line in &lines {
        if y > PAGE_BOTTOM_MM {
            let (page, page_layer) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            layer = doc.get_page(page).get_layer(page_layer);
            y = CONTINUATION_Y_MM;
        }
        if !line.is_empty() {
            layer.use_text(line, BODY_SIZE_PT, Mm(MARGIN_LEFT_MM), from_top(y), &regular);
        }
        y += LINE_STEP_MM;
    }

    Ok(doc.save_to_bytes()?)
}

/// printpdf's origin is the bottom-left corner; layout reasons from the top.
fn from_top(y_mm: f32) -> Mm {
    Mm(PAGE_HEIGHT_MM - y_mm)
}
