//! Title page rendering
//!
//! Each paper gets a single generated page carrying its title, word-wrapped
//! to the usable width, with every line horizontally centered and the whole
//! block vertically centered.

use tempfile::NamedTempFile;

use crate::error::Result;
use crate::layout::{wrap_text, TitleLayout};
use crate::pdf::create::PdfWriter;
use crate::pdf::fonts::{text_width, FontKind};

/// Render a one-page title PDF into an owned temporary file.
///
/// The returned [`NamedTempFile`] deletes the page when dropped, so the
/// rendering is released on every exit path of the pipeline.
pub fn render_title_page(title: &str, layout: &TitleLayout) -> Result<NamedTempFile> {
    let file = tempfile::Builder::new()
        .prefix("paper-stitch-title-")
        .suffix(".pdf")
        .tempfile()?;

    let font = FontKind::Bold;
    let size = layout.font_size;
    let advance = size + layout.line_gap;
    let lines = wrap_text(title, font, size, layout.usable_width());

    let mut writer = PdfWriter::new(layout.page);
    writer.set_fill_color(layout.color);

    let block_height = lines.len() as f32 * advance;
    let mut y = layout.page.height / 2.0 + block_height / 2.0;
    for line in &lines {
        let x = (layout.page.width - text_width(line, font, size)) / 2.0;
        writer.draw_text(x, y, font, size, line);
        y -= advance;
    }

    writer.end_page();
    writer.save(file.path())?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::metadata::count_pages;

    #[test]
    fn test_title_page_is_single_page() {
        let layout = TitleLayout::default();
        let file = render_title_page("A Perfectly Ordinary Title", &layout).unwrap();
        assert_eq!(count_pages(file.path()).unwrap(), 1);
    }

    #[test]
    fn test_long_title_still_single_page() {
        let layout = TitleLayout::default();
        let title = "An Extremely Long and Thorough Investigation into the Asymptotic \
                     Behaviour of Deeply Nested Pagination Systems under Adversarial \
                     Wrapping Conditions with Applications to Document Assembly";
        let file = render_title_page(title, &layout).unwrap();
        assert_eq!(count_pages(file.path()).unwrap(), 1);
    }

    #[test]
    fn test_empty_title_still_renders_page() {
        let layout = TitleLayout::default();
        let file = render_title_page("", &layout).unwrap();
        assert_eq!(count_pages(file.path()).unwrap(), 1);
    }

    #[test]
    fn test_temp_file_removed_on_drop() {
        let layout = TitleLayout::default();
        let file = render_title_page("Ephemeral", &layout).unwrap();
        let path = file.path().to_path_buf();
        assert!(path.exists());
        drop(file);
        assert!(!path.exists());
    }
}
