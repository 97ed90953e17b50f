// PDF export pipeline: markdown cleanup → line wrapping → paginated document.
// Illustration tags are display-only and never reach the PDF.

pub mod cleaner;
pub mod metrics;
pub mod pdf;

pub use cleaner::clean_for_export;
pub use pdf::{export_filename, generate_pdf, PdfError, DOCUMENT_TITLE};
