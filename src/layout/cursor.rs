use super::Margins;
use crate::page::Page;
use crate::pagesize::{PageSize, A4};
use crate::units::Pt;

/// The size and margins shared by every page of a composition
#[derive(Debug, Clone, PartialEq)]
pub struct PageGeometry {
    pub size: PageSize,
    pub margins: Margins,
}

impl Default for PageGeometry {
    /// A4 portrait with 40pt margins on every side
    fn default() -> Self {
        PageGeometry {
            size: A4,
            margins: Margins::all(Pt(40.0)),
        }
    }
}

impl PageGeometry {
    pub fn new(size: PageSize, margins: Margins) -> PageGeometry {
        PageGeometry { size, margins }
    }

    pub fn width(&self) -> Pt {
        self.size.0
    }

    pub fn height(&self) -> Pt {
        self.size.1
    }

    /// Horizontal space between the left and right margins
    pub fn content_width(&self) -> Pt {
        self.width() - self.margins.horizontal()
    }

    /// The lowest position (from the top of the page) content may reach
    pub fn bottom_limit(&self) -> Pt {
        self.height() - self.margins.bottom
    }

    /// A blank page with this geometry
    pub fn new_page(&self) -> Page {
        Page::new(self.size, Some(self.margins))
    }
}

/// The current drawing position within a composition.
///
/// `y` is measured from the top of the page and only ever grows while on a page;
/// starting a new page resets it to the top margin.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    pub x: Pt,
    pub y: Pt,
    pub page_index: usize,
    geometry: PageGeometry,
}

impl Cursor {
    /// A cursor at the top-left corner of the content area of the first page
    pub fn new(geometry: PageGeometry) -> Cursor {
        Cursor {
            x: geometry.margins.left,
            y: geometry.margins.top,
            page_index: 0,
            geometry,
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn position(&self) -> (Pt, Pt) {
        (self.x, self.y)
    }

    /// Move down the page. Negative distances are ignored.
    pub fn advance(&mut self, dy: Pt) {
        self.y += dy.max(Pt::ZERO);
    }

    /// Jump to an absolute vertical position, as long as it is not above the
    /// current one
    pub fn set_y(&mut self, y: Pt) {
        if y < self.y {
            log::warn!("refusing to move the cursor up from {} to {}", self.y, y);
            return;
        }
        self.y = y;
    }

    /// Continue at the top of the next page
    pub fn new_page(&mut self) {
        self.page_index += 1;
        self.x = self.geometry.margins.left;
        self.y = self.geometry.margins.top;
    }

    /// Space left between the cursor and the bottom margin. Negative once content
    /// has run past the margin.
    pub fn remaining_height(&self) -> Pt {
        self.geometry.bottom_limit() - self.y
    }

    pub fn has_overflowed(&self) -> bool {
        self.y > self.geometry.bottom_limit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_the_top_left_margin() {
        let cursor = Cursor::new(PageGeometry::default());
        assert_eq!(cursor.position(), (Pt(40.0), Pt(40.0)));
        assert_eq!(cursor.page_index, 0);
        assert!((*cursor.remaining_height() - (841.8898 - 80.0)).abs() < 0.001);
    }

    #[test]
    fn only_moves_down() {
        let mut cursor = Cursor::new(PageGeometry::default());
        cursor.advance(Pt(100.0));
        cursor.advance(Pt(-50.0));
        assert_eq!(cursor.y, Pt(140.0));
        cursor.set_y(Pt(120.0));
        assert_eq!(cursor.y, Pt(140.0));
        cursor.set_y(Pt(300.0));
        assert_eq!(cursor.y, Pt(300.0));
    }

    #[test]
    fn new_page_resets_to_the_top_margin() {
        let mut cursor = Cursor::new(PageGeometry::default());
        cursor.advance(Pt(900.0));
        assert!(cursor.has_overflowed());
        cursor.new_page();
        assert_eq!(cursor.page_index, 1);
        assert_eq!(cursor.y, Pt(40.0));
        assert!(!cursor.has_overflowed());
    }

    #[test]
    fn geometry_describes_the_content_area() {
        let geometry = PageGeometry::default();
        assert!((*geometry.content_width() - 515.2756).abs() < 0.001);
        let page = geometry.new_page();
        assert_eq!(page.content_box.x1, Pt(40.0));
        assert_eq!(page.height(), geometry.height());
    }
}
