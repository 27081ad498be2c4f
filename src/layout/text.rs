use crate::colour::Colour;
use crate::document::Document;
use crate::font::Font;
use crate::page::*;
use crate::units::Pt;
use crate::PDFError;

const TABSIZE: usize = 4;

/// Calculates the distance from the top of a line of text down to its baseline,
/// i.e. the ascent of the font at the given size.
pub fn baseline_offset(font: &Font, size: Pt) -> Pt {
    font.ascent(size)
}

/// Replaces tabs with spaces, normalizes newlines to `\n` and drops any other
/// control characters, so that measuring and drawing see exactly the same text.
pub fn normalize_text(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\t', &" ".repeat(TABSIZE))
        .chars()
        .filter(|&ch| ch == '\n' || !ch.is_control())
        .collect()
}

/// Calculate the width of a given string of text given the font and font size.
/// Fails if the text contains a character the font cannot show.
pub fn width_of_text(text: &str, font: &Font, size: Pt) -> Result<Pt, PDFError> {
    text.chars().map(|ch| font.char_width(ch, size)).sum()
}

/// Breaks text into the lines it occupies when set at `max_width`.
///
/// Explicit line breaks are honoured first; each resulting paragraph is then
/// word-wrapped at whitespace. A word wider than the whole line (a long e-mail
/// address, for example) falls back to character-level breaking, so no line
/// ever overflows `max_width` unless a single glyph is wider than it.
///
/// An empty string has no lines at all, while an empty paragraph in the middle
/// of the text (`"a\n\nb"`) still occupies a (blank) line.
pub fn wrap_text(text: &str, max_width: Pt, font: &Font, size: Pt) -> Result<Vec<String>, PDFError> {
    let text = normalize_text(text);
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let space_width = font.char_width(' ', size)?;
    let mut lines: Vec<String> = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_width = Pt::ZERO;

        for word in paragraph.split_whitespace() {
            let word_width = width_of_text(word, font, size)?;

            if !line.is_empty() {
                if line_width + space_width + word_width <= max_width {
                    line.push(' ');
                    line.push_str(word);
                    line_width += space_width + word_width;
                    continue;
                }
                lines.push(std::mem::take(&mut line));
                line_width = Pt::ZERO;
            }

            if word_width <= max_width {
                line.push_str(word);
                line_width = word_width;
                continue;
            }

            // no break point inside the word, split it between characters
            for ch in word.chars() {
                let char_width = font.char_width(ch, size)?;
                if !line.is_empty() && line_width + char_width > max_width {
                    lines.push(std::mem::take(&mut line));
                    line_width = Pt::ZERO;
                }
                line.push(ch);
                line_width += char_width;
            }
        }

        lines.push(line);
    }

    Ok(lines)
}

/// Measures the height `text` occupies when wrapped at `max_width`: the number of
/// wrapped lines times the line height (ascent + descent + leading) of the font.
///
/// This is a pure function of its inputs; sizing a box and then drawing into it
/// with the same arguments always agree.
///
/// ```
/// use voucher_pdf::{Font, Pt};
/// use voucher_pdf::layout::measure_text;
///
/// let font = Font::helvetica();
/// assert_eq!(measure_text("", Pt(200.0), &font, Pt(10.0)).unwrap(), Pt(0.0));
/// let two_lines = measure_text("Ana\nBruno", Pt(200.0), &font, Pt(10.0)).unwrap();
/// assert_eq!(two_lines, font.line_height(Pt(10.0)) * 2.0);
/// ```
pub fn measure_text(text: &str, max_width: Pt, font: &Font, size: Pt) -> Result<Pt, PDFError> {
    let lines = wrap_text(text, max_width, font, size)?;
    Ok(lines_height(lines.len(), font, size))
}

fn lines_height(count: usize, font: &Font, size: Pt) -> Pt {
    font.line_height(size) * count as f32
}

/// Horizontal placement of each line within the wrap width
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// A run of text in a single font and colour that is wrapped to whatever width it
/// is given. Blocks are the unit sections are built from.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub align: Align,
    /// Vertical space above the block. Only applies when the block has any text.
    pub space_before: Pt,
}

impl TextBlock {
    pub fn new<S: Into<String>>(text: S, font: SpanFont, colour: Colour) -> TextBlock {
        TextBlock {
            text: text.into(),
            font,
            colour,
            align: Align::Left,
            space_before: Pt::ZERO,
        }
    }

    pub fn aligned(mut self, align: Align) -> TextBlock {
        self.align = align;
        self
    }

    pub fn spaced(mut self, space_before: Pt) -> TextBlock {
        self.space_before = space_before;
        self
    }

    fn resolve_font<'d>(&self, document: &'d Document) -> Result<&'d Font, PDFError> {
        document
            .fonts
            .get(self.font.id)
            .ok_or(PDFError::FontMissing(self.font.id.index()))
    }

    /// The height this block occupies when wrapped at `width`
    pub fn height(&self, document: &Document, width: Pt) -> Result<Pt, PDFError> {
        let font = self.resolve_font(document)?;
        let lines = wrap_text(&self.text, width, font, self.font.size)?;
        Ok(self.occupied(lines.len(), font))
    }

    fn occupied(&self, line_count: usize, font: &Font) -> Pt {
        if line_count == 0 {
            return Pt::ZERO;
        }
        self.space_before + lines_height(line_count, font, self.font.size)
    }

    /// Lays the block out on `page`, with `origin` being the top-left corner of the
    /// block measured from the top-left of the page. Returns the height used, which
    /// is always equal to [TextBlock::height] for the same width.
    pub fn draw(
        &self,
        document: &Document,
        page: &mut Page,
        origin: (Pt, Pt),
        width: Pt,
    ) -> Result<Pt, PDFError> {
        let font = self.resolve_font(document)?;
        let size = self.font.size;
        let lines = wrap_text(&self.text, width, font, size)?;
        if lines.is_empty() {
            return Ok(Pt::ZERO);
        }

        let line_height = font.line_height(size);
        let mut top = origin.1 + self.space_before;
        for line in lines.iter() {
            if !line.is_empty() {
                let line_width = width_of_text(line, font, size)?;
                let x = match self.align {
                    Align::Left => origin.0,
                    Align::Center => origin.0 + (width - line_width).max(Pt::ZERO) / 2.0,
                    Align::Right => origin.0 + (width - line_width).max(Pt::ZERO),
                };
                let baseline = top + baseline_offset(font, size);
                page.add_span(SpanLayout {
                    text: line.clone(),
                    font: self.font,
                    colour: self.colour,
                    coords: (x, page.height() - baseline),
                });
            }
            top += line_height;
        }

        Ok(self.occupied(lines.len(), font))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colours;
    use crate::pagesize::A4;

    fn helvetica() -> Font {
        Font::helvetica()
    }

    #[test]
    fn empty_text_has_no_height() {
        let font = helvetica();
        assert!(wrap_text("", Pt(100.0), &font, Pt(10.0)).unwrap().is_empty());
        assert_eq!(measure_text("", Pt(100.0), &font, Pt(10.0)).unwrap(), Pt::ZERO);
    }

    #[test]
    fn explicit_line_breaks_are_kept() {
        let font = helvetica();
        let lines = wrap_text("1. Ana\n2. Bruno\r\n3. Carla", Pt(400.0), &font, Pt(10.0)).unwrap();
        assert_eq!(lines, vec!["1. Ana", "2. Bruno", "3. Carla"]);
        let blank = wrap_text("a\n\nb", Pt(400.0), &font, Pt(10.0)).unwrap();
        assert_eq!(blank, vec!["a", "", "b"]);
    }

    #[test]
    fn words_wrap_at_whitespace() {
        let font = helvetica();
        let size = Pt(10.0);
        let text = "Rua das Flores 123 Centro Belo Horizonte Minas Gerais";
        let width = Pt(120.0);
        let lines = wrap_text(text, width, &font, size).unwrap();
        assert!(lines.len() > 1);
        for line in lines.iter() {
            assert!(width_of_text(line, &font, size).unwrap() <= width);
            assert!(!line.starts_with(' ') && !line.ends_with(' '));
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn long_words_break_between_characters() {
        let font = helvetica();
        let size = Pt(10.0);
        let word = "reservas.operacionais.pousada@pedrabranca.example.com.br";
        let lines = wrap_text(word, Pt(80.0), &font, size).unwrap();
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in lines.iter() {
            assert!(width_of_text(line, &font, size).unwrap() <= Pt(80.0));
        }
    }

    #[test]
    fn height_is_line_count_times_line_height() {
        let font = helvetica();
        let size = Pt(10.0);
        let text = lipsum::lipsum(80);
        let lines = wrap_text(&text, Pt(300.0), &font, size).unwrap();
        let height = measure_text(&text, Pt(300.0), &font, size).unwrap();
        assert_eq!(height, font.line_height(size) * lines.len() as f32);
    }

    #[test]
    fn measuring_is_repeatable() {
        let font = helvetica();
        let text = lipsum::lipsum(60);
        let a = measure_text(&text, Pt(250.0), &font, Pt(10.0)).unwrap();
        let b = measure_text(&text, Pt(250.0), &font, Pt(10.0)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn tabs_and_control_characters_are_normalized() {
        assert_eq!(normalize_text("a\tb\u{7}c\rd"), "a    bc\nd");
    }

    #[test]
    fn unsupported_characters_fail_measurement() {
        let font = helvetica();
        let result = measure_text("Hóspede \u{4E2D}", Pt(200.0), &font, Pt(10.0));
        assert!(matches!(result, Err(PDFError::UnsupportedCharacter('\u{4E2D}'))));
    }

    #[test]
    fn drawn_height_matches_measured_height() {
        let mut doc = Document::default();
        let id = doc.add_font(Font::helvetica());
        let mut page = Page::new(A4, None);
        let block = TextBlock::new(
            lipsum::lipsum(40),
            SpanFont { id, size: Pt(10.0) },
            colours::TEXT,
        )
        .spaced(Pt(6.0));

        let measured = block.height(&doc, Pt(200.0)).unwrap();
        let drawn = block.draw(&doc, &mut page, (Pt(40.0), Pt(100.0)), Pt(200.0)).unwrap();
        assert_eq!(measured, drawn);

        let first = page.spans().next().expect("block drew text");
        let font = &doc.fonts[id];
        let expected_baseline = page.height() - (Pt(106.0) + font.ascent(Pt(10.0)));
        assert_eq!(first.coords, (Pt(40.0), expected_baseline));
    }

    #[test]
    fn empty_blocks_take_no_space() {
        let mut doc = Document::default();
        let id = doc.add_font(Font::helvetica());
        let mut page = Page::new(A4, None);
        let block = TextBlock::new("", SpanFont { id, size: Pt(10.0) }, colours::TEXT).spaced(Pt(6.0));
        assert_eq!(block.height(&doc, Pt(200.0)).unwrap(), Pt::ZERO);
        assert_eq!(
            block.draw(&doc, &mut page, (Pt(0.0), Pt(0.0)), Pt(200.0)).unwrap(),
            Pt::ZERO
        );
        assert_eq!(page.spans().count(), 0);
    }

    #[test]
    fn centred_lines_are_offset_by_half_the_slack() {
        let mut doc = Document::default();
        let id = doc.add_font(Font::helvetica_bold());
        let mut page = Page::new(A4, None);
        let size = Pt(18.0);
        let block = TextBlock::new("Voucher", SpanFont { id, size }, colours::ACCENT)
            .aligned(Align::Center);
        block.draw(&doc, &mut page, (Pt(40.0), Pt(40.0)), Pt(515.0)).unwrap();

        let width = width_of_text("Voucher", &doc.fonts[id], size).unwrap();
        let span = page.spans().next().unwrap();
        assert_eq!(span.coords.0, Pt(40.0) + (Pt(515.0) - width) / 2.0);
    }
}
