//! Content stream rendering for pages.

use crate::colour::Colour;
use crate::font::Font;
use crate::page::{PageContents, Shape, ShapeLayout, SpanFont, SpanLayout};
use crate::rect::Rect;
use crate::units::Pt;
use crate::PDFError;
use id_arena::Arena;
use std::io::Write;

/// Bezier control point distance for approximating a quarter circle
const KAPPA: f32 = 0.552_284_75;

/// Renders page contents to a PDF content stream, converting the high-level content
/// items into low-level PDF operators.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(
    contents: &[PageContents],
    fonts: &Arena<Font>,
) -> Result<Vec<u8>, PDFError> {
    if contents.is_empty() {
        return Ok(Vec::default());
    }

    let mut content: Vec<u8> = Vec::default();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(spans) => {
                render_text_spans(&mut content, spans, fonts)?;
            }
            PageContents::Shape(shape) => {
                render_shape(&mut content, shape)?;
            }
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_text_spans(
    content: &mut Vec<u8>,
    spans: &[SpanLayout],
    fonts: &Arena<Font>,
) -> Result<(), PDFError> {
    let Some(first) = spans.first() else {
        return Ok(());
    };

    write!(content, "q\n")?;

    let mut current_font: SpanFont = first.font;
    let mut current_colour: Colour = first.colour;

    write!(
        content,
        "/F{} {} Tf\n",
        current_font.id.index(),
        current_font.size
    )?;
    write_fill_colour(content, current_colour)?;

    for span in spans.iter() {
        if span.font != current_font {
            current_font = span.font;
            write!(
                content,
                "/F{} {} Tf\n",
                current_font.id.index(),
                current_font.size
            )?;
        }
        if span.colour != current_colour {
            current_colour = span.colour;
            write_fill_colour(content, current_colour)?;
        }

        let font = fonts
            .get(current_font.id)
            .ok_or(PDFError::FontMissing(current_font.id.index()))?;

        write!(content, "BT\n")?;
        write!(content, "{} {} Td\n", span.coords.0, span.coords.1)?;
        write!(content, "<")?;
        for code in font.encode_text(&span.text)? {
            write!(content, "{code:02x}")?;
        }
        write!(content, "> Tj\n")?;
        write!(content, "ET\n")?;
    }

    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_shape(content: &mut Vec<u8>, layout: &ShapeLayout) -> Result<(), PDFError> {
    let paint = match (layout.fill, layout.stroke) {
        (Some(_), Some(_)) => "B",
        (Some(_), None) => "f",
        (None, Some(_)) => "S",
        (None, None) => return Ok(()),
    };

    write!(content, "q\n")?;
    write!(content, "{} w\n", layout.line_width)?;
    if let Some(fill) = layout.fill {
        write_fill_colour(content, fill)?;
    }
    if let Some(stroke) = layout.stroke {
        write_stroke_colour(content, stroke)?;
    }

    match &layout.shape {
        Shape::RoundedRect { rect, radius } => write_rounded_rect(content, rect, *radius)?,
        Shape::Line { from, to } => {
            write!(content, "{} {} m\n", from.0, from.1)?;
            write!(content, "{} {} l\n", to.0, to.1)?;
        }
    }

    write!(content, "{paint}\n")?;
    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn write_rounded_rect(content: &mut Vec<u8>, rect: &Rect, radius: Pt) -> Result<(), PDFError> {
    let (x, y) = (rect.x1, rect.y1);
    let (width, height) = (rect.width(), rect.height());

    let r = radius.min(width / 2.0).min(height / 2.0);
    if r <= Pt::ZERO {
        write!(content, "{x} {y} {width} {height} re\n")?;
        return Ok(());
    }

    let c = r * KAPPA;
    let right = x + width;
    let top = y + height;

    write!(content, "{} {} m\n", x + r, y)?;
    write!(content, "{} {} l\n", right - r, y)?;
    write!(
        content,
        "{} {} {} {} {} {} c\n",
        right - r + c,
        y,
        right,
        y + r - c,
        right,
        y + r
    )?;
    write!(content, "{} {} l\n", right, top - r)?;
    write!(
        content,
        "{} {} {} {} {} {} c\n",
        right,
        top - r + c,
        right - r + c,
        top,
        right - r,
        top
    )?;
    write!(content, "{} {} l\n", x + r, top)?;
    write!(
        content,
        "{} {} {} {} {} {} c\n",
        x + r - c,
        top,
        x,
        top - r + c,
        x,
        top - r
    )?;
    write!(content, "{} {} l\n", x, y + r)?;
    write!(
        content,
        "{} {} {} {} {} {} c\n",
        x,
        y + r - c,
        x + r - c,
        y,
        x + r,
        y
    )?;
    write!(content, "h\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn write_fill_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} rg\n"),
        Colour::CMYK { c, m, y, k } => write!(content, "{c} {m} {y} {k} k\n"),
        Colour::Grey { g } => write!(content, "{g} g\n"),
    }
}

#[allow(clippy::write_with_newline)]
fn write_stroke_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} RG\n"),
        Colour::CMYK { c, m, y, k } => write!(content, "{c} {m} {y} {k} K\n"),
        Colour::Grey { g } => write!(content, "{g} G\n"),
    }
}
