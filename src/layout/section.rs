use super::TextBlock;
use crate::colour::{colours, Colour};
use crate::document::Document;
use crate::page::*;
use crate::rect::Rect;
use crate::units::Pt;
use crate::PDFError;

/// How a [SectionBox] is painted and padded
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SectionStyle {
    pub fill: Option<Colour>,
    pub border: Option<Colour>,
    pub border_width: Pt,
    pub corner_radius: Pt,
    /// Space between the outline and the text, on all four sides
    pub padding: Pt,
    /// Space between the label and the body
    pub label_gap: Pt,
}

impl Default for SectionStyle {
    fn default() -> Self {
        SectionStyle {
            fill: Some(colours::SECTION_FILL),
            border: Some(colours::SECTION_BORDER),
            border_width: Pt(1.0),
            corner_radius: Pt(8.0),
            padding: Pt(14.0),
            label_gap: Pt(4.0),
        }
    }
}

/// A rounded, filled and outlined box with an optional label and a stack of text
/// blocks inside it.
///
/// The height of a section is always derived from its text: measuring and drawing
/// the same section at the same width give the same result, so the box can be
/// sized before anything lands on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBox {
    pub label: Option<TextBlock>,
    pub body: Vec<TextBlock>,
    pub style: SectionStyle,
    /// The box is never drawn shorter than this
    pub min_height: Pt,
}

impl SectionBox {
    pub fn new(style: SectionStyle) -> SectionBox {
        SectionBox {
            label: None,
            body: Vec::new(),
            style,
            min_height: Pt::ZERO,
        }
    }

    pub fn labelled(label: TextBlock, style: SectionStyle) -> SectionBox {
        SectionBox {
            label: Some(label),
            ..SectionBox::new(style)
        }
    }

    pub fn with_min_height(mut self, min_height: Pt) -> SectionBox {
        self.min_height = min_height;
        self
    }

    pub fn push(&mut self, block: TextBlock) -> &mut SectionBox {
        self.body.push(block);
        self
    }

    /// Width available to the text inside a box of the given outer width
    pub fn inner_width(&self, width: Pt) -> Pt {
        (width - self.style.padding * 2.0).max(Pt::ZERO)
    }

    fn label_height(&self, document: &Document, inner: Pt) -> Result<Pt, PDFError> {
        match &self.label {
            Some(label) => label.height(document, inner),
            None => Ok(Pt::ZERO),
        }
    }

    fn body_height(&self, document: &Document, inner: Pt) -> Result<Pt, PDFError> {
        self.body
            .iter()
            .map(|block| block.height(document, inner))
            .sum()
    }

    /// Height of the label and body text, without padding
    pub fn content_height(&self, document: &Document, width: Pt) -> Result<Pt, PDFError> {
        let inner = self.inner_width(width);
        let label = self.label_height(document, inner)?;
        let body = self.body_height(document, inner)?;
        let gap = if label > Pt::ZERO && body > Pt::ZERO {
            self.style.label_gap
        } else {
            Pt::ZERO
        };
        Ok(label + gap + body)
    }

    /// The full height of the box: padded content, but no less than the minimum
    pub fn measure(&self, document: &Document, width: Pt) -> Result<Pt, PDFError> {
        let padded = self.content_height(document, width)? + self.style.padding * 2.0;
        Ok(padded.max(self.min_height))
    }

    /// Draws the box with its top-left corner at `origin` (measured from the top-left
    /// of the page) and returns its height. The width is clamped so the box never
    /// extends past the right edge of the page's content box.
    pub fn draw(
        &self,
        document: &Document,
        page: &mut Page,
        origin: (Pt, Pt),
        width: Pt,
    ) -> Result<Pt, PDFError> {
        let width = width.min(page.content_box.x2 - origin.0).max(Pt::ZERO);
        let height = self.measure(document, width)?;

        if self.style.fill.is_some() || self.style.border.is_some() {
            page.add_shape(ShapeLayout {
                shape: Shape::RoundedRect {
                    rect: Rect::from_origin(origin.0, page.height() - origin.1 - height, width, height),
                    radius: self.style.corner_radius,
                },
                fill: self.style.fill,
                stroke: self.style.border,
                line_width: self.style.border_width,
            });
        }

        let inner = self.inner_width(width);
        let x = origin.0 + self.style.padding;
        let mut y = origin.1 + self.style.padding;

        let mut label = Pt::ZERO;
        if let Some(block) = &self.label {
            label = block.draw(document, page, (x, y), inner)?;
            y += label;
        }
        if label > Pt::ZERO && self.body_height(document, inner)? > Pt::ZERO {
            y += self.style.label_gap;
        }
        for block in self.body.iter() {
            y += block.draw(document, page, (x, y), inner)?;
        }

        log::trace!("section at ({}, {}) drawn {}x{}", origin.0, origin.1, width, height);
        Ok(height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::Font;
    use crate::layout::{Margins, TextBlock};
    use crate::pagesize::A4;

    struct Fixture {
        doc: Document,
        body: SpanFont,
        label: SpanFont,
    }

    fn fixture() -> Fixture {
        let mut doc = Document::default();
        let body = SpanFont {
            id: doc.add_font(Font::helvetica()),
            size: Pt(10.0),
        };
        let label = SpanFont {
            id: doc.add_font(Font::helvetica_bold()),
            size: Pt(11.0),
        };
        Fixture { doc, body, label }
    }

    #[test]
    fn height_is_padded_content() {
        let f = fixture();
        let mut section = SectionBox::labelled(
            TextBlock::new("Hotel", f.label, colours::ACCENT),
            SectionStyle::default(),
        );
        section.push(TextBlock::new("Pousada Pedra Branca", f.body, colours::TEXT));

        let bold = &f.doc.fonts[f.label.id];
        let regular = &f.doc.fonts[f.body.id];
        let expected = bold.line_height(Pt(11.0)) + Pt(4.0) + regular.line_height(Pt(10.0));
        let content = section.content_height(&f.doc, Pt(240.0)).unwrap();
        assert!((*content - *expected).abs() < 0.001);
        let measured = section.measure(&f.doc, Pt(240.0)).unwrap();
        assert!((*measured - (*expected + 28.0)).abs() < 0.001);
    }

    #[test]
    fn minimum_height_is_a_floor() {
        let f = fixture();
        let mut section = SectionBox::new(SectionStyle::default()).with_min_height(Pt(70.0));
        section.push(TextBlock::new("Empresa: ACME", f.body, colours::TEXT));
        assert_eq!(section.measure(&f.doc, Pt(515.0)).unwrap(), Pt(70.0));

        section.push(TextBlock::new(lipsum::lipsum(120), f.body, colours::TEXT));
        assert!(section.measure(&f.doc, Pt(515.0)).unwrap() > Pt(70.0));
    }

    #[test]
    fn label_gap_is_skipped_without_a_body() {
        let f = fixture();
        let mut section = SectionBox::labelled(
            TextBlock::new("Observações", f.label, colours::ACCENT),
            SectionStyle::default(),
        );
        section.push(TextBlock::new("", f.body, colours::TEXT));
        let label_only = f.doc.fonts[f.label.id].line_height(Pt(11.0));
        assert_eq!(section.content_height(&f.doc, Pt(300.0)).unwrap(), label_only);
    }

    #[test]
    fn drawing_matches_measuring() {
        let f = fixture();
        let mut page = Page::new(A4, Some(Margins::all(Pt(40.0))));
        let mut section = SectionBox::labelled(
            TextBlock::new("Contato", f.label, colours::ACCENT),
            SectionStyle::default(),
        );
        section.push(TextBlock::new(lipsum::lipsum(50), f.body, colours::TEXT));

        let measured = section.measure(&f.doc, Pt(255.0)).unwrap();
        let drawn = section
            .draw(&f.doc, &mut page, (Pt(300.0), Pt(200.0)), Pt(255.0))
            .unwrap();
        assert_eq!(measured, drawn);

        let shape = page.shapes().next().expect("box outline");
        match &shape.shape {
            Shape::RoundedRect { rect, radius } => {
                assert_eq!(*radius, Pt(8.0));
                assert_eq!(rect.x1, Pt(300.0));
                assert!((*rect.height() - *drawn).abs() < 0.001);
            }
            other => panic!("unexpected shape {other:?}"),
        }

        for span in page.spans() {
            assert!(span.coords.0 >= Pt(314.0));
            assert!(span.coords.1 < page.height() - Pt(214.0));
        }
    }

    #[test]
    fn width_is_clamped_to_the_content_box() {
        let f = fixture();
        let mut page = Page::new(A4, Some(Margins::all(Pt(40.0))));
        let mut section = SectionBox::new(SectionStyle::default());
        section.push(TextBlock::new("Contato", f.body, colours::TEXT));
        section
            .draw(&f.doc, &mut page, (Pt(300.0), Pt(40.0)), Pt(600.0))
            .unwrap();
        let shape = page.shapes().next().unwrap();
        let Shape::RoundedRect { rect, .. } = &shape.shape else {
            panic!("expected a rounded rect");
        };
        assert!(rect.x2 <= page.content_box.x2 + Pt(0.001));
    }
}
