//! Font selection and text measurement
//!
//! Generated pages use the base-14 Helvetica family, so no font program is
//! embedded; viewers supply it. Measurement uses the standard AFM advance
//! widths (thousandths of the em square) for the printable ASCII range, which
//! is what word wrapping and dot-leader sizing are computed against.

/// Fonts available on generated pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontKind {
    Regular,
    Bold,
}

impl FontKind {
    /// PostScript base font name
    pub fn base_name(self) -> &'static str {
        match self {
            FontKind::Regular => "Helvetica",
            FontKind::Bold => "Helvetica-Bold",
        }
    }

    /// Name the font is registered under in page resources
    pub(crate) fn resource_name(self) -> &'static str {
        match self {
            FontKind::Regular => "F1",
            FontKind::Bold => "F2",
        }
    }

    fn widths(self) -> &'static [u16; 95] {
        match self {
            FontKind::Regular => &HELVETICA_WIDTHS,
            FontKind::Bold => &HELVETICA_BOLD_WIDTHS,
        }
    }
}

/// Advance width used for characters outside the table
const DEFAULT_GLYPH_WIDTH: f32 = 556.0;

/// Rendered width of `text` at `size` points.
pub fn text_width(text: &str, font: FontKind, size: f32) -> f32 {
    let widths = font.widths();
    let thousandths: f32 = text
        .chars()
        .map(|c| {
            let code = c as usize;
            if (32..=126).contains(&code) {
                widths[code - 32] as f32
            } else {
                DEFAULT_GLYPH_WIDTH
            }
        })
        .sum();
    thousandths * size / 1000.0
}

/// Helvetica AFM widths for characters 32..=126
const HELVETICA_WIDTHS: [u16; 95] = [
    278, // space
    278, // !
    355, // "
    556, // #
    556, // $
    889, // %
    667, // &
    191, // '
    333, // (
    333, // )
    389, // *
    584, // +
    278, // ,
    333, // -
    278, // .
    278, // /
    556, // 0
    556, // 1
    556, // 2
    556, // 3
    556, // 4
    556, // 5
    556, // 6
    556, // 7
    556, // 8
    556, // 9
    278, // :
    278, // ;
    584, // <
    584, // =
    584, // >
    556, // ?
    1015, // @
    667, // A
    667, // B
    722, // C
    722, // D
    667, // E
    611, // F
    778, // G
    722, // H
    278, // I
    500, // J
    667, // K
    556, // L
    833, // M
    722, // N
    778, // O
    667, // P
    778, // Q
    722, // R
    667, // S
    611, // T
    722, // U
    667, // V
    944, // W
    667, // X
    667, // Y
    611, // Z
    278, // [
    278, // \
    278, // ]
    469, // ^
    556, // _
    333, // `
    556, // a
    556, // b
    500, // c
    556, // d
    556, // e
    278, // f
    556, // g
    556, // h
    222, // i
    222, // j
    500, // k
    222, // l
    833, // m
    556, // n
    556, // o
    556, // p
    556, // q
    333, // r
    500, // s
    278, // t
    556, // u
    500, // v
    722, // w
    500, // x
    500, // y
    500, // z
    334, // {
    260, // |
    334, // }
    584, // ~
];

/// Helvetica-Bold AFM widths for characters 32..=126
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, // space
    333, // !
    474, // "
    556, // #
    556, // $
    889, // %
    722, // &
    238, // '
    333, // (
    333, // )
    389, // *
    584, // +
    278, // ,
    333, // -
    278, // .
    278, // /
    556, // 0
    556, // 1
    556, // 2
    556, // 3
    556, // 4
    556, // 5
    556, // 6
    556, // 7
    556, // 8
    556, // 9
    333, // :
    333, // ;
    584, // <
    584, // =
    584, // >
    611, // ?
    975, // @
    722, // A
    722, // B
    722, // C
    722, // D
    667, // E
    611, // F
    778, // G
    722, // H
    278, // I
    556, // J
    722, // K
    611, // L
    833, // M
    722, // N
    778, // O
    667, // P
    778, // Q
    722, // R
    667, // S
    611, // T
    722, // U
    667, // V
    944, // W
    667, // X
    667, // Y
    611, // Z
    333, // [
    278, // \
    333, // ]
    584, // ^
    556, // _
    333, // `
    556, // a
    611, // b
    556, // c
    611, // d
    556, // e
    333, // f
    611, // g
    611, // h
    278, // i
    278, // j
    556, // k
    278, // l
    889, // m
    611, // n
    611, // o
    611, // p
    611, // q
    389, // r
    556, // s
    333, // t
    611, // u
    556, // v
    778, // w
    556, // x
    556, // y
    500, // z
    389, // {
    280, // |
    389, // }
    584, // ~
];
