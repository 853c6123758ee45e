// Document layout: font metrics, pagination of the projected markdown, PDF output.
// Pagination is CPU-bound; async callers use paginator::render_blocking.

pub mod font_metrics;
pub mod paginator;
pub mod pdf;

// Re-export the public API consumed by handlers and app state.
pub use font_metrics::{default_page_geometry, PageGeometry};
pub use paginator::render_blocking;
pub use pdf::{write_pdf, EXPORT_FILE_NAME};
