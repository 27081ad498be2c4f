/// A colour, expressed in RGB or CMYK colour spaces
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceCMYK colour; c, m, y, and k range from 0.0 to 1.0
    CMYK { c: f32, m: f32, y: f32, k: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a new colour in the Gray space, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }
}

/// Pre-defined colours, including the fixed voucher palette
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };

    /// Light grey background of every section box (#F5F6F8)
    pub const SECTION_FILL: Colour = Colour::RGB {
        r: 0.961,
        g: 0.965,
        b: 0.973,
    };
    /// Light grey-blue outline of every section box (#D0D7E2)
    pub const SECTION_BORDER: Colour = Colour::RGB {
        r: 0.816,
        g: 0.843,
        b: 0.886,
    };
    /// Accent blue used for the document title and section labels (#1F4E8C)
    pub const ACCENT: Colour = Colour::RGB {
        r: 0.122,
        g: 0.306,
        b: 0.549,
    };
    /// Body text (#333333)
    pub const TEXT: Colour = Colour::Grey { g: 0.2 };
    /// Secondary text such as the footer (#808080)
    pub const MUTED: Colour = Colour::Grey { g: 0.5 };
}
