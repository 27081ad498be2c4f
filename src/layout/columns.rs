use super::SectionBox;
use crate::document::Document;
use crate::page::Page;
use crate::units::Pt;
use crate::PDFError;

/// Two sections side by side, with fixed column widths and a gap between them.
/// Both columns start at the same height, and the row is as tall as the taller
/// of the two.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TwoColumnLayout {
    pub left_width: Pt,
    pub gap: Pt,
    pub right_width: Pt,
}

impl Default for TwoColumnLayout {
    fn default() -> Self {
        TwoColumnLayout {
            left_width: Pt(240.0),
            gap: Pt(20.0),
            right_width: Pt(255.0),
        }
    }
}

impl TwoColumnLayout {
    pub fn total_width(&self) -> Pt {
        self.left_width + self.gap + self.right_width
    }

    /// Shrinks both columns in proportion, keeping the gap, so the row is no wider
    /// than `width`. Rows that already fit are returned unchanged.
    pub fn fit(&self, width: Pt) -> TwoColumnLayout {
        let columns = self.left_width + self.right_width;
        if self.total_width() <= width || columns <= Pt::ZERO {
            return *self;
        }

        let available = (width - self.gap).max(Pt::ZERO);
        let left_width = self.left_width * (*available / *columns);
        TwoColumnLayout {
            left_width,
            gap: self.gap,
            right_width: available - left_width,
        }
    }

    /// Left edge of the right-hand column for a row starting at `x`
    pub fn right_x(&self, x: Pt) -> Pt {
        x + self.left_width + self.gap
    }

    pub fn measure(
        &self,
        document: &Document,
        left: &SectionBox,
        right: &SectionBox,
    ) -> Result<Pt, PDFError> {
        let left = left.measure(document, self.left_width)?;
        let right = right.measure(document, self.right_width)?;
        Ok(left.max(right))
    }

    /// Draws both sections with their tops at `origin.1` and returns the height of
    /// the row
    pub fn draw(
        &self,
        document: &Document,
        page: &mut Page,
        origin: (Pt, Pt),
        left: &SectionBox,
        right: &SectionBox,
    ) -> Result<Pt, PDFError> {
        let (x, y) = origin;
        let left = left.draw(document, page, (x, y), self.left_width)?;
        let right = right.draw(document, page, (self.right_x(x), y), self.right_width)?;
        Ok(left.max(right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colours;
    use crate::font::Font;
    use crate::layout::{PageGeometry, SectionStyle, TextBlock};
    use crate::page::{Shape, SpanFont};

    #[test]
    fn default_columns_fill_the_content_width() {
        let columns = TwoColumnLayout::default();
        assert_eq!(columns.total_width(), Pt(515.0));
        assert_eq!(columns.right_x(Pt(40.0)), Pt(300.0));
    }

    #[test]
    fn narrow_rows_shrink_both_columns() {
        let columns = TwoColumnLayout::default();
        assert_eq!(columns.fit(Pt(600.0)), columns);

        let narrow = columns.fit(Pt(339.5));
        assert_eq!(narrow.gap, Pt(20.0));
        assert!((*narrow.total_width() - 339.5).abs() < 0.001);
        assert!((*(narrow.left_width / *narrow.right_width) - 240.0 / 255.0).abs() < 0.001);
    }

    #[test]
    fn row_is_as_tall_as_the_taller_column() {
        let mut doc = Document::default();
        let body = SpanFont {
            id: doc.add_font(Font::helvetica()),
            size: Pt(10.0),
        };
        let mut short = SectionBox::new(SectionStyle::default());
        short.push(TextBlock::new("Hotel", body, colours::TEXT));
        let mut tall = SectionBox::new(SectionStyle::default());
        tall.push(TextBlock::new(lipsum::lipsum(60), body, colours::TEXT));

        let columns = TwoColumnLayout::default();
        let tall_height = tall.measure(&doc, columns.right_width).unwrap();
        assert_eq!(columns.measure(&doc, &short, &tall).unwrap(), tall_height);

        let mut page = PageGeometry::default().new_page();
        let height = columns
            .draw(&doc, &mut page, (Pt(40.0), Pt(120.0)), &short, &tall)
            .unwrap();
        assert_eq!(height, tall_height);

        let tops: Vec<Pt> = page
            .shapes()
            .filter_map(|s| match &s.shape {
                Shape::RoundedRect { rect, .. } => Some(rect.y2),
                _ => None,
            })
            .collect();
        assert_eq!(tops.len(), 2);
        assert!((*tops[0] - *tops[1]).abs() < 0.001);
    }
}
