//! Standard Times family (PDF base-14) with approximate WinAnsi width tables.
//! ABNT bodies are set in a serifed 12pt face; the built-in fonts keep the
//! exporter self-contained. Nothing is read from the host system and nothing
//! is embedded in the output.

use std::collections::HashMap;

use pdf_writer::{Name, Pdf, Ref};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct FontVariant {
    pub(crate) bold: bool,
    pub(crate) italic: bool,
}

impl FontVariant {
    pub(crate) const REGULAR: FontVariant = FontVariant {
        bold: false,
        italic: false,
    };
    pub(crate) const BOLD: FontVariant = FontVariant {
        bold: true,
        italic: false,
    };
    pub(crate) const ITALIC: FontVariant = FontVariant {
        bold: false,
        italic: true,
    };
    pub(crate) const BOLD_ITALIC: FontVariant = FontVariant {
        bold: true,
        italic: true,
    };

    pub(crate) const ALL: [FontVariant; 4] = [
        FontVariant::REGULAR,
        FontVariant::BOLD,
        FontVariant::ITALIC,
        FontVariant::BOLD_ITALIC,
    ];

    fn base_font(self) -> &'static str {
        match (self.bold, self.italic) {
            (false, false) => "Times-Roman",
            (true, false) => "Times-Bold",
            (false, true) => "Times-Italic",
            (true, true) => "Times-BoldItalic",
        }
    }
}

pub(crate) struct FontEntry {
    pub(crate) pdf_name: String,
    pub(crate) font_ref: Ref,
    /// Widths at 1000 units/em for WinAnsi bytes 32..=255.
    pub(crate) widths_1000: Vec<f32>,
}

impl FontEntry {
    /// Width of a string in points at the given size.
    pub(crate) fn text_width(&self, text: &str, font_size: f32) -> f32 {
        to_winansi_bytes(text)
            .iter()
            .filter(|&&b| b >= 32)
            .map(|&b| self.widths_1000[(b - 32) as usize] * font_size / 1000.0)
            .sum()
    }

    pub(crate) fn space_width(&self, font_size: f32) -> f32 {
        self.widths_1000[0] * font_size / 1000.0
    }
}

/// Register the four Times variants as base-14 Type1 fonts (WinAnsi encoded,
/// nothing embedded) and return their entries keyed by variant.
pub(crate) fn register_base_fonts(
    pdf: &mut Pdf,
    alloc: &mut dyn FnMut() -> Ref,
) -> HashMap<FontVariant, FontEntry> {
    let mut fonts = HashMap::new();
    for (i, variant) in FontVariant::ALL.into_iter().enumerate() {
        let font_ref = alloc();
        let pdf_name = format!("F{}", i + 1);
        pdf.type1_font(font_ref)
            .base_font(Name(variant.base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        fonts.insert(
            variant,
            FontEntry {
                pdf_name,
                font_ref,
                widths_1000: times_widths(variant),
            },
        );
    }
    fonts
}

pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .filter_map(|c| match c as u32 {
            0x0000..=0x007F => Some(c as u8),
            0x00A0..=0x00FF => Some(c as u8), // Latin-1 supplement maps directly
            0x20AC => Some(0x80),
            0x201A => Some(0x82),
            0x0192 => Some(0x83),
            0x201E => Some(0x84),
            0x2026 => Some(0x85),
            0x2020 => Some(0x86),
            0x2021 => Some(0x87),
            0x02C6 => Some(0x88),
            0x2030 => Some(0x89),
            0x0160 => Some(0x8A),
            0x2039 => Some(0x8B),
            0x0152 => Some(0x8C),
            0x017D => Some(0x8E),
            0x2018 => Some(0x91),
            0x2019 => Some(0x92),
            0x201C => Some(0x93),
            0x201D => Some(0x94),
            0x2022 => Some(0x95), // bullet
            0x2013 => Some(0x96),
            0x2014 => Some(0x97),
            0x02DC => Some(0x98),
            0x2122 => Some(0x99),
            0x0161 => Some(0x9A),
            0x203A => Some(0x9B),
            0x0153 => Some(0x9C),
            0x017E => Some(0x9E),
            0x0178 => Some(0x9F),
            _ => None,
        })
        .collect()
}

/// Approximate Times widths at 1000 units/em for WinAnsi chars 32..=255.
/// Class averages, not AFM data; line breaks land within a couple of points
/// of the real metrics, which is all the wrapped layout needs.
fn times_widths(variant: FontVariant) -> Vec<f32> {
    let wide = if variant.bold { 1.04 } else { 1.0 };
    (32u8..=255u8)
        .map(|b| {
            let w = match b {
                32 => 250.0,                    // space
                33..=47 => 333.0,               // punctuation
                48..=57 => 500.0,               // digits
                58..=64 => 395.0,               // : ; < = > ? @ mix
                73 | 74 => 356.0,               // I J (narrow uppercase)
                77 | 87 => 889.0,               // M W (wide)
                65..=90 => 688.0,               // uppercase average
                91..=96 => 333.0,               // brackets etc.
                105 | 106 | 108 => 278.0,       // i j l
                102 | 116 => 320.0,             // f t
                109 | 119 => 756.0,             // m w
                97..=122 => 478.0,              // lowercase average
                123..=126 => 400.0,             // braces, bar, tilde
                0xC0..=0xDD => 688.0,           // accented uppercase
                0xDF..=0xFF => 478.0,           // accented lowercase
                _ => 500.0,
            };
            w * wide
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winansi_handles_portuguese_text() {
        let bytes = to_winansi_bytes("Introdução");
        assert_eq!(bytes.len(), "Introdução".chars().count());
        assert_eq!(bytes[6], 0xE7); // ç
        assert_eq!(bytes[7], 0xE3); // ã
    }

    #[test]
    fn unmappable_chars_dropped() {
        assert_eq!(to_winansi_bytes("a\u{4E2D}b"), vec![b'a', b'b']);
    }

    #[test]
    fn width_tables_cover_winansi_range() {
        for variant in FontVariant::ALL {
            assert_eq!(times_widths(variant).len(), 224);
        }
        let entry = FontEntry {
            pdf_name: "F1".into(),
            font_ref: Ref::new(1),
            widths_1000: times_widths(FontVariant::REGULAR),
        };
        let w = entry.text_width("mmm", 12.0);
        assert!(w > entry.text_width("iii", 12.0));
        assert!(entry.space_width(12.0) > 0.0);
    }
}
