use crate::{
    refs::{ObjectReferences, RefType},
    PDFError, Pt,
};
use id_arena::Id;
use pdf_writer::{Name, Pdf};

const UNITS_PER_EM: f32 = 1000.0;

/// The standard-14 fonts this crate knows the metrics of. Standard fonts are never
/// embedded: every conforming PDF viewer ships them, so only their name is written
/// into the document.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
}

struct Metrics {
    base_font: &'static str,
    weight: u16,
    ascender: f32,
    descender: f32,
    /// font bounding box height minus (ascender - descender)
    line_gap: f32,
    /// advance widths for the printable ASCII range 0x20..=0x7E
    ascii_widths: [u16; 95],
}

#[rustfmt::skip]
const HELVETICA: Metrics = Metrics {
    base_font: "Helvetica",
    weight: 400,
    ascender: 718.0,
    descender: -207.0,
    line_gap: 231.0,
    ascii_widths: [
        // space ! " # $ % & ' ( ) * + , - . /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0-9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // : ; < = > ? @
        278, 278, 584, 584, 584, 556, 1015,
        // A-Z
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [ \ ] ^ _ `
        278, 278, 278, 469, 556, 333,
        // a-z
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // { | } ~
        334, 260, 334, 584,
    ],
};

#[rustfmt::skip]
const HELVETICA_BOLD: Metrics = Metrics {
    base_font: "Helvetica-Bold",
    weight: 700,
    ascender: 718.0,
    descender: -207.0,
    line_gap: 265.0,
    ascii_widths: [
        // space ! " # $ % & ' ( ) * + , - . /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0-9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // : ; < = > ? @
        333, 333, 584, 584, 584, 611, 975,
        // A-Z
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [ \ ] ^ _ `
        333, 278, 333, 584, 556, 333,
        // a-z
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // { | } ~
        389, 280, 389, 584,
    ],
};

/// A font that text can be measured and set in.
///
/// Fonts are stored "globally" within a [Document](crate::Document) and referred to
/// by their [Id] from spans; metrics are available without a document, which is what
/// lets the layout engine size content before anything is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub base: StandardFont,
}

impl Font {
    pub fn standard(base: StandardFont) -> Font {
        Font { base }
    }

    pub fn helvetica() -> Font {
        Font::standard(StandardFont::Helvetica)
    }

    pub fn helvetica_bold() -> Font {
        Font::standard(StandardFont::HelveticaBold)
    }

    fn metrics(&self) -> &'static Metrics {
        match self.base {
            StandardFont::Helvetica => &HELVETICA,
            StandardFont::HelveticaBold => &HELVETICA_BOLD,
        }
    }

    /// The PostScript name of the font, as written into the PDF
    pub fn name(&self) -> &'static str {
        self.metrics().base_font
    }

    /// Obtain the weight of the font (400 is normal, 700 is bold)
    pub fn weight(&self) -> u16 {
        self.metrics().weight
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: Pt) -> Pt {
        size * (self.metrics().ascender / UNITS_PER_EM)
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the given font size.
    /// Note: this is negative
    pub fn descent(&self, size: Pt) -> Pt {
        size * (self.metrics().descender / UNITS_PER_EM)
    }

    /// Calculate the leading (extra space between lines) for the given font size
    pub fn leading(&self, size: Pt) -> Pt {
        size * (self.metrics().line_gap / UNITS_PER_EM)
    }

    /// Calculate the default line height of the font for the given size. The returned value is
    /// how much to vertically offset a second row of text below a first row of text.
    pub fn line_height(&self, size: Pt) -> Pt {
        self.leading(size) + self.ascent(size) - self.descent(size)
    }

    /// The WinAnsi code of a character, if the standard fonts can show it
    pub fn encode_char(&self, ch: char) -> Option<u8> {
        winansi_code(ch)
    }

    /// Encode a whole string as WinAnsi bytes, failing on the first character the
    /// standard fonts cannot show
    pub fn encode_text(&self, text: &str) -> Result<Vec<u8>, PDFError> {
        text.chars()
            .map(|ch| winansi_code(ch).ok_or(PDFError::UnsupportedCharacter(ch)))
            .collect()
    }

    /// Advance width of a single character at the given size
    pub fn char_width(&self, ch: char, size: Pt) -> Result<Pt, PDFError> {
        let code = winansi_code(ch).ok_or(PDFError::UnsupportedCharacter(ch))?;
        Ok(size * (self.width_units(ch, code) as f32 / UNITS_PER_EM))
    }

    fn width_units(&self, ch: char, code: u8) -> u16 {
        let bold = self.base == StandardFont::HelveticaBold;
        let metrics = self.metrics();
        if (0x20..=0x7E).contains(&code) {
            return metrics.ascii_widths[(code - 0x20) as usize];
        }

        match ch {
            // dotless-i based accented letters are wider than a plain 'i'
            'ì' | 'í' | 'î' | 'ï' => 278,
            '\u{A0}' => metrics.ascii_widths[0],
            'Æ' | 'Œ' | '—' | '…' => 1000,
            'æ' => 889,
            'œ' => 944,
            'ß' => 611,
            '•' => 350,
            '°' => 400,
            'º' => 365,
            'ª' => 370,
            '©' | '®' => 737,
            '¡' | '´' | '¨' | '¸' | '¯' => 333,
            '×' | '÷' | '±' | '¬' => 584,
            '‘' | '’' | '‚' => {
                if bold {
                    278
                } else {
                    222
                }
            }
            '“' | '”' | '„' => {
                if bold {
                    500
                } else {
                    333
                }
            }
            _ => match base_letter(ch) {
                Some(base) => metrics.ascii_widths[(base as u8 - 0x20) as usize],
                None => 556,
            },
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let font_id = refs.gen(RefType::Font(id.index()));
        writer
            .type1_font(font_id)
            .base_font(Name(self.name().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }
}

/// The unaccented ASCII letter an accented Latin-1 letter is drawn on. Accented
/// letters share the advance width of their base letter.
fn base_letter(ch: char) -> Option<char> {
    let base = match ch {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ð' => 'D',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' | 'Ÿ' => 'Y',
        'Þ' => 'P',
        'Š' => 'S',
        'Ž' => 'Z',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ð' | 'ò'..='ö' | 'ø' => 'o',
        'ñ' => 'n',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        'þ' => 'p',
        'š' => 's',
        'ž' => 'z',
        _ => return None,
    };
    Some(base)
}

/// Map a Unicode character to its Windows-1252 (WinAnsi) code
fn winansi_code(ch: char) -> Option<u8> {
    match ch as u32 {
        0x0020..=0x007E => Some(ch as u8),
        0x00A0..=0x00FF => Some(ch as u8),
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
        0x2022 => Some(0x95),
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
    }
}
