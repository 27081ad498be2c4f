use derive_more::{Add, AddAssign, Deref, DerefMut, Display, From, Into, Sub, SubAssign, Sum};
use std::ops::{Div, Mul, Neg};

/// A length in PDF points (1/72 of an inch). Every coordinate and size handled by the
/// layout engine is expressed in points.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Sum,
    Deref,
    DerefMut,
    Display,
    From,
    Into,
)]
pub struct Pt(pub f32);

impl Pt {
    pub const ZERO: Pt = Pt(0.0);

    /// The larger of two lengths
    pub fn max(self, other: Pt) -> Pt {
        if other.0 > self.0 {
            other
        } else {
            self
        }
    }

    /// The smaller of two lengths
    pub fn min(self, other: Pt) -> Pt {
        if other.0 < self.0 {
            other
        } else {
            self
        }
    }
}

impl Mul<f32> for Pt {
    type Output = Pt;

    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

impl Neg for Pt {
    type Output = Pt;

    fn neg(self) -> Pt {
        Pt(-self.0)
    }
}

/// A length in millimetres, convertible into [Pt]
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Display, From, Into)]
pub struct Mm(pub f32);

impl From<Mm> for Pt {
    fn from(mm: Mm) -> Pt {
        Pt(mm.0 * 72.0 / 25.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_stays_in_points() {
        let a = Pt(10.0) + Pt(5.0) - Pt(2.5);
        assert_eq!(a, Pt(12.5));
        assert_eq!(a * 2.0, Pt(25.0));
        assert_eq!(a / 2.0, Pt(6.25));
        assert_eq!(-a, Pt(-12.5));
        let total: Pt = [Pt(1.0), Pt(2.0), Pt(3.0)].into_iter().sum();
        assert_eq!(total, Pt(6.0));
    }

    #[test]
    fn max_and_min_compare_lengths() {
        assert_eq!(Pt(3.0).max(Pt(7.0)), Pt(7.0));
        assert_eq!(Pt(3.0).min(Pt(7.0)), Pt(3.0));
    }

    #[test]
    fn millimetres_convert_to_points() {
        let a4_width: Pt = Mm(210.0).into();
        assert!((*a4_width - 595.2756).abs() < 0.001);
    }
}
