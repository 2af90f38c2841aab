//! Page geometry and text layout
//!
//! All lengths are in PDF points (1/72 inch). The generated pages are A4 with
//! one-inch margins, matching the content the papers themselves typically use.

use crate::pdf::fonts::{text_width, FontKind};

/// RGB fill color with components in 0..=1.
pub type Rgb = (f32, f32, f32);

/// Indian red, used for title pages.
pub const INDIAN_RED: Rgb = (0.804, 0.361, 0.361);

/// 50% grey, used for index entries.
pub const GREY: Rgb = (0.5, 0.5, 0.5);

/// Steel blue, used for page-number stamps.
pub const STEEL_BLUE: Rgb = (0.275, 0.510, 0.706);

/// Page dimensions in points
#[derive(Debug, Clone, Copy)]
pub struct PageDimensions {
    pub width: f32,
    pub height: f32,
}

impl PageDimensions {
    /// A4 size (210mm × 297mm)
    pub fn a4() -> Self {
        Self {
            width: 595.28,
            height: 841.89,
        }
    }
}

/// Margins for page content
#[derive(Debug, Clone, Copy)]
pub struct Margins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Margins {
    /// Create margins with the same value on all sides
    pub fn uniform(margin: f32) -> Self {
        Self {
            top: margin,
            bottom: margin,
            left: margin,
            right: margin,
        }
    }

    /// Standard 1-inch margins on all sides
    pub fn standard() -> Self {
        Self::uniform(72.0)
    }
}

/// Layout for generated title pages
#[derive(Debug, Clone)]
pub struct TitleLayout {
    pub page: PageDimensions,
    pub font_size: f32,
    pub margin: f32,
    /// Extra points between baselines on top of the font size
    pub line_gap: f32,
    pub color: Rgb,
}

impl Default for TitleLayout {
    fn default() -> Self {
        Self {
            page: PageDimensions::a4(),
            font_size: 25.0,
            margin: 72.0,
            line_gap: 10.0,
            color: INDIAN_RED,
        }
    }
}

impl TitleLayout {
    pub fn usable_width(&self) -> f32 {
        self.page.width - 2.0 * self.margin
    }
}

/// Layout for the table-of-contents index pages
#[derive(Debug, Clone)]
pub struct IndexLayout {
    pub page: PageDimensions,
    pub margins: Margins,
    pub heading_font_size: f32,
    pub entry_font_size: f32,
    /// Extra vertical points after each entry's last line
    pub entry_gap: f32,
    /// Width reserved past the wrap limit so leaders never collide with text
    pub wrap_inset: f32,
    /// Gap the dot leader leaves before the right-aligned page number
    pub leader_inset: f32,
    pub entry_color: Rgb,
}

impl Default for IndexLayout {
    fn default() -> Self {
        Self {
            page: PageDimensions::a4(),
            margins: Margins::standard(),
            heading_font_size: 20.0,
            entry_font_size: 12.0,
            entry_gap: 4.0,
            wrap_inset: 60.0,
            leader_inset: 40.0,
            entry_color: GREY,
        }
    }
}

impl IndexLayout {
    /// Baseline-to-baseline distance for entry lines
    pub fn line_spacing(&self) -> f32 {
        self.entry_font_size + 6.0
    }

    /// Horizontal space between the margins
    pub fn usable_width(&self) -> f32 {
        self.page.width - self.margins.left - self.margins.right
    }

    /// Baseline of the heading line
    pub fn heading_baseline(&self) -> f32 {
        self.page.height - self.margins.top
    }

    /// Baseline of the first entry line on the first page
    pub fn first_entry_baseline(&self) -> f32 {
        self.heading_baseline() - 1.5 * self.heading_font_size
    }
}

/// Greedy word wrap against rendered text width.
///
/// Words are packed onto a line while the line's rendered width stays within
/// `max_width`; an overflowing word starts a new line. A single word wider
/// than `max_width` still occupies a line of its own.
pub fn wrap_text(text: &str, font: FontKind, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if current.is_empty() || text_width(&candidate, font, size) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_dimensions() {
        let a4 = PageDimensions::a4();
        assert!((a4.width - 595.28).abs() < 0.01);
        assert!((a4.height - 841.89).abs() < 0.01);
    }

    #[test]
    fn test_standard_margins() {
        let margins = Margins::standard();
        assert_eq!(margins.top, 72.0);
        assert_eq!(margins.bottom, 72.0);
        assert_eq!(margins.left, 72.0);
        assert_eq!(margins.right, 72.0);
    }

    #[test]
    fn test_index_line_spacing() {
        let layout = IndexLayout::default();
        assert_eq!(layout.line_spacing(), 18.0);
        assert!((layout.usable_width() - (595.28 - 144.0)).abs() < 0.01);
    }

    #[test]
    fn test_wrap_everything_fits_on_one_line() {
        let lines = wrap_text("short title", FontKind::Regular, 12.0, 10_000.0);
        assert_eq!(lines, vec!["short title"]);
    }

    #[test]
    fn test_wrap_breaks_at_rendered_width() {
        let size = 12.0;
        // Budget exactly the widest two-word pair per line.
        let budget = text_width("gamma delta", FontKind::Regular, size);
        let lines = wrap_text("alpha beta gamma delta", FontKind::Regular, size, budget);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "alpha beta");
        assert_eq!(lines[1], "gamma delta");
        for line in &lines {
            assert!(text_width(line, FontKind::Regular, size) <= budget);
        }
    }

    #[test]
    fn test_wrap_overlong_word_gets_own_line() {
        let size = 12.0;
        let budget = text_width("ab", FontKind::Regular, size);
        let lines = wrap_text("supercalifragilistic ab", FontKind::Regular, size, budget);
        assert_eq!(lines, vec!["supercalifragilistic", "ab"]);
    }

    #[test]
    fn test_wrap_empty_text() {
        let lines = wrap_text("", FontKind::Regular, 12.0, 100.0);
        assert!(lines.is_empty());
    }

    #[test]
    fn test_wrap_is_deterministic() {
        let a = wrap_text("one two three four five", FontKind::Bold, 25.0, 120.0);
        let b = wrap_text("one two three four five", FontKind::Bold, 25.0, 120.0);
        assert_eq!(a, b);
    }
}
