//! Standard Type1 fonts and their glyph metrics

/// Glyph widths (1/1000 em) for bytes 32..=126
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 32-47
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 48-63
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 64-79
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 80-95
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 96-111
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 112-126
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 32-47
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 48-63
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 64-79
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 80-95
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 96-111
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 112-126
];

/// Width used for the upper Latin-1 range
const EXTENDED_WIDTH: u16 = 556;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
}

impl Font {
    pub const ALL: [Font; 3] = [Font::Helvetica, Font::HelveticaBold, Font::HelveticaOblique];

    pub fn base_font(&self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
            Font::HelveticaOblique => "Helvetica-Oblique",
        }
    }

    /// Name in the page resource dictionary
    pub fn resource_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
            Font::HelveticaOblique => "F3",
        }
    }

    /// Width of one WinAnsi byte in 1/1000 em
    pub fn char_width(&self, byte: u8) -> u16 {
        // Oblique shares the regular metrics
        let table = match self {
            Font::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
            Font::Helvetica | Font::HelveticaOblique => &HELVETICA_WIDTHS,
        };
        match byte {
            32..=126 => table[(byte - 32) as usize],
            0xa0 => 278,
            0xa1..=0xff => EXTENDED_WIDTH,
            _ => 0,
        }
    }

    /// Width of a byte string in points
    pub fn string_width_pt(&self, bytes: &[u8], size_pt: f64) -> f64 {
        let units: u32 = bytes.iter().map(|b| self.char_width(*b) as u32).sum();
        units as f64 * size_pt / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_widths() {
        assert_eq!(Font::Helvetica.char_width(b' '), 278);
        assert_eq!(Font::Helvetica.char_width(b'A'), 667);
        assert_eq!(Font::Helvetica.char_width(b'i'), 222);
        assert_eq!(Font::Helvetica.char_width(b'~'), 584);
        assert_eq!(Font::HelveticaBold.char_width(b'b'), 611);
        assert_eq!(Font::HelveticaBold.char_width(b'@'), 975);
        assert_eq!(Font::HelveticaOblique.char_width(b'W'), 944);
        assert_eq!(Font::Helvetica.char_width(b'\n'), 0);
    }

    #[test]
    fn test_string_width() {
        // "ab" regular = 556 + 556
        let w = Font::Helvetica.string_width_pt(b"ab", 10.0);
        assert!((w - 11.12).abs() < 1e-9);
    }

    #[test]
    fn test_resource_names_are_distinct() {
        let names: Vec<&str> = Font::ALL.iter().map(Font::resource_name).collect();
        assert_eq!(names, vec!["F1", "F2", "F3"]);
    }
}
