use crate::units::Pt;

/// Margins are used when laying out objects on a page. There is no control
/// preventing objects on pages from overflowing the margins: the margins are
/// guidelines for the layout functions. Additionally, the margins are applied
/// to [`Page`](crate::Page)s to determine the `ArtBox` attribute of each page in the
/// generated PDF
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl(top: Pt, right: Pt, bottom: Pt, left: Pt) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create margins by specifying different values for vertical (top and bottom)
    /// and horizontal (left and right) margins
    pub fn symmetric(vertical: Pt, horizontal: Pt) -> Margins {
        Margins {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Create margins where all values are 0.0
    pub fn empty() -> Margins {
        Margins::all(Pt::ZERO)
    }

    /// Sum of the left and right margins
    pub fn horizontal(&self) -> Pt {
        self.left + self.right
    }

    /// Sum of the top and bottom margins
    pub fn vertical(&self) -> Pt {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_opposite_sides() {
        let margins = Margins::trbl(Pt(10.0), Pt(20.0), Pt(30.0), Pt(40.0));
        assert_eq!(margins.horizontal(), Pt(60.0));
        assert_eq!(margins.vertical(), Pt(40.0));

        let symmetric = Margins::symmetric(Pt(40.0), Pt(20.0));
        assert_eq!(symmetric, Margins::trbl(Pt(40.0), Pt(20.0), Pt(40.0), Pt(20.0)));
        assert_eq!(Margins::empty().horizontal(), Pt::ZERO);
    }
}
