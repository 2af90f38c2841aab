//! Index (table-of-contents) page rendering
//!
//! Entries are laid out as "ordinal. title", wrapped to the usable width.
//! The first line of each entry carries a dot leader out to its right-aligned
//! target page number; continuation lines are indented and carry neither.
//! When a line would fall below the bottom margin the renderer starts a new
//! page, so the output page count is only known after rendering — which is
//! what forces the resolver's estimate-measure-correct cycle.

use tempfile::NamedTempFile;

use crate::error::Result;
use crate::layout::{wrap_text, IndexLayout};
use crate::pdf::create::PdfWriter;
use crate::pdf::fonts::{text_width, FontKind};
use crate::resolve::IndexEntry;

/// Heading drawn at the top of the first index page
const HEADING: &str = "Table of contents";

/// Indent prefixed to wrapped continuation lines
const CONTINUATION_INDENT: &str = "    ";

/// Analytic first guess at the index page count, used to seed the resolver.
///
/// Assumes two lines per entry plus three lines of heading and spacing, at
/// thirty lines per page. Always at least one page.
pub fn estimate_index_pages(entry_count: usize) -> usize {
    const LINES_PER_ENTRY: usize = 2;
    const LINES_PER_PAGE: usize = 30;
    let total_lines = entry_count * LINES_PER_ENTRY + 3;
    total_lines.div_ceil(LINES_PER_PAGE).max(1)
}

/// Lay out one entry as the exact strings that will be drawn.
///
/// `ordinal` is the 1-based displayed position. Only the first line gets the
/// dot leader and page number; later lines are indented continuations.
fn entry_lines(ordinal: usize, entry: &IndexEntry, layout: &IndexLayout) -> Vec<String> {
    let font = FontKind::Regular;
    let size = layout.entry_font_size;
    let wrap_width = layout.usable_width() - layout.wrap_inset;

    let wrapped = wrap_text(&format!("{ordinal}. {}", entry.title), font, size, wrap_width);

    wrapped
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                let leader_space = layout.usable_width()
                    - text_width(line, font, size)
                    - layout.leader_inset;
                let dot_width = text_width(".", font, size);
                let dots = ".".repeat((leader_space / dot_width).max(0.0) as usize);
                format!("{line} {dots} {}", entry.target_page)
            } else {
                format!("{CONTINUATION_INDENT}{line}")
            }
        })
        .collect()
}

/// Render the index into an owned temporary file, one page or more.
///
/// Zero entries still produce a single heading-only page.
pub fn render_index(entries: &[IndexEntry], layout: &IndexLayout) -> Result<NamedTempFile> {
    let file = tempfile::Builder::new()
        .prefix("paper-stitch-index-")
        .suffix(".pdf")
        .tempfile()?;

    let mut writer = PdfWriter::new(layout.page);
    writer.draw_text(
        layout.margins.left,
        layout.heading_baseline(),
        FontKind::Bold,
        layout.heading_font_size,
        HEADING,
    );
    writer.set_fill_color(layout.entry_color);

    let mut y = layout.first_entry_baseline();
    for (ordinal, entry) in entries.iter().enumerate() {
        for line in entry_lines(ordinal + 1, entry, layout) {
            if y < layout.margins.bottom {
                writer.end_page();
                writer.set_fill_color(layout.entry_color);
                y = layout.page.height - layout.margins.top;
            }
            writer.draw_text(
                layout.margins.left,
                y,
                FontKind::Regular,
                layout.entry_font_size,
                &line,
            );
            y -= layout.line_spacing();
        }
        y -= layout.entry_gap;
    }

    writer.end_page();
    writer.save(file.path())?;
    Ok(file)
}
