use super::Cursor;
use crate::units::Pt;

/// Extra clearance kept between the footer and the bottom margin
pub const SAFETY_MARGIN: Pt = Pt(10.0);

/// Where the footer ended up, see [PageBreakPolicy::place_footer]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FooterPlacement {
    /// Whether a new page was started to make room for the footer
    pub page_break: bool,
    /// Top of the footer, measured from the top of the page it is on
    pub y: Pt,
}

/// Decides whether the closing footer still fits on the current page.
///
/// The footer is pinned to the bottom of the page it lands on. If the content
/// above it would collide with it, the footer moves to a fresh page of its own.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PageBreakPolicy {
    pub safety_margin: Pt,
}

impl Default for PageBreakPolicy {
    fn default() -> Self {
        PageBreakPolicy {
            safety_margin: SAFETY_MARGIN,
        }
    }
}

impl PageBreakPolicy {
    /// True when placing a footer of `footer_height` directly below the cursor
    /// would reach past the bottom margin less the safety margin
    pub fn should_break_before_footer(&self, cursor: &Cursor, footer_height: Pt) -> bool {
        let limit = cursor.geometry().bottom_limit() - self.safety_margin;
        cursor.y + footer_height > limit
    }

    /// Top of a footer of `footer_height` sitting on the bottom margin
    pub fn footer_top(&self, cursor: &Cursor, footer_height: Pt) -> Pt {
        cursor.geometry().bottom_limit() - footer_height
    }

    /// Moves the cursor to where the footer belongs, starting a new page first if
    /// the footer does not fit below the current content.
    pub fn place_footer(&self, cursor: &mut Cursor, footer_height: Pt) -> FooterPlacement {
        let page_break = self.should_break_before_footer(cursor, footer_height);
        if page_break {
            log::debug!(
                "footer does not fit below y={} on page {}, starting a new page",
                cursor.y,
                cursor.page_index + 1
            );
            cursor.new_page();
        }

        let y = self.footer_top(cursor, footer_height).max(cursor.y);
        cursor.set_y(y);
        FooterPlacement { page_break, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PageGeometry;

    const FOOTER: Pt = Pt(36.0);

    #[test]
    fn footer_stays_when_it_fits() {
        let policy = PageBreakPolicy::default();
        let mut cursor = Cursor::new(PageGeometry::default());
        cursor.advance(Pt(500.0));
        assert!(!policy.should_break_before_footer(&cursor, FOOTER));

        let placement = policy.place_footer(&mut cursor, FOOTER);
        assert!(!placement.page_break);
        assert_eq!(cursor.page_index, 0);
        assert_eq!(placement.y, cursor.geometry().bottom_limit() - FOOTER);
        assert_eq!(cursor.y, placement.y);
    }

    #[test]
    fn footer_moves_to_a_new_page_when_it_collides() {
        let policy = PageBreakPolicy::default();
        let mut cursor = Cursor::new(PageGeometry::default());
        let limit = cursor.geometry().bottom_limit();
        cursor.advance(limit - SAFETY_MARGIN - FOOTER + Pt(1.0));
        assert!(policy.should_break_before_footer(&cursor, FOOTER));

        let placement = policy.place_footer(&mut cursor, FOOTER);
        assert!(placement.page_break);
        assert_eq!(cursor.page_index, 1);
        assert_eq!(placement.y, limit - FOOTER);
    }

    #[test]
    fn safety_margin_counts_against_the_footer() {
        let policy = PageBreakPolicy::default();
        let mut cursor = Cursor::new(PageGeometry::default());
        let limit = cursor.geometry().bottom_limit();
        cursor.set_y(limit - SAFETY_MARGIN - FOOTER - Pt(0.5));
        assert!(!policy.should_break_before_footer(&cursor, FOOTER));
        cursor.set_y(limit - FOOTER - Pt(5.0));
        assert!(policy.should_break_before_footer(&cursor, FOOTER));
    }
}
