//! PDF manipulation module

pub mod create;
pub mod fonts;
pub mod index;
pub mod links;
pub mod merge;
pub mod metadata;
pub mod pagenum;
pub mod title;

// Re-export commonly used items
pub use create::PdfWriter;
pub use fonts::{text_width, FontKind};
pub use index::{estimate_index_pages, render_index};
pub use links::annotate_index;
pub use merge::merge_documents;
pub use metadata::{count_pages, count_pages_or_zero};
pub use pagenum::{add_page_numbers, PageNumberOptions};
pub use title::render_title_page;
