use crate::colour::Colour;
use crate::content::render_contents;
use crate::font::Font;
use crate::layout::Margins;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::*;
use crate::PDFError;
use id_arena::{Arena, Id};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Name, Pdf};

/// The font (and size) a span of text is set in
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A single line of text, positioned by its baseline origin in PDF user space
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub coords: (Pt, Pt),
}

/// Vector outlines that can be drawn on a page
#[derive(Clone, PartialEq, Debug)]
pub enum Shape {
    /// A rectangle whose corners are rounded with the given radius
    RoundedRect { rect: Rect, radius: Pt },
    /// A straight line segment
    Line { from: (Pt, Pt), to: (Pt, Pt) },
}

/// A shape plus how to paint it. A shape with neither fill nor stroke paints nothing.
#[derive(Clone, PartialEq, Debug)]
pub struct ShapeLayout {
    pub shape: Shape,
    pub fill: Option<Colour>,
    pub stroke: Option<Colour>,
    pub line_width: Pt,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(Vec<SpanLayout>),
    Shape(ShapeLayout),
}

pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    /// Everything drawn on the page, in painting order
    pub contents: Vec<PageContents>,
}

impl Page {
    /// Create an empty page of the given size. Without margins the content box
    /// covers the whole page.
    pub fn new(size: PageSize, margins: Option<Margins>) -> Page {
        let (width, height) = size;
        let margins = margins.unwrap_or_else(Margins::empty);
        Page {
            media_box: Rect {
                x1: Pt::ZERO,
                y1: Pt::ZERO,
                x2: width,
                y2: height,
            },
            content_box: Rect {
                x1: margins.left,
                y1: margins.bottom,
                x2: width - margins.right,
                y2: height - margins.top,
            },
            contents: Vec::default(),
        }
    }

    pub fn width(&self) -> Pt {
        self.media_box.width()
    }

    pub fn height(&self) -> Pt {
        self.media_box.height()
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.contents.push(PageContents::Text(vec![span]));
    }

    pub fn add_shape(&mut self, shape: ShapeLayout) {
        self.contents.push(PageContents::Shape(shape));
    }

    /// All text spans on the page, in painting order
    pub fn spans(&self) -> impl Iterator<Item = &SpanLayout> {
        self.contents.iter().flat_map(|c| match c {
            PageContents::Text(spans) => spans.as_slice(),
            PageContents::Shape(_) => &[][..],
        })
    }

    /// All shapes on the page, in painting order
    pub fn shapes(&self) -> impl Iterator<Item = &ShapeLayout> {
        self.contents.iter().filter_map(|c| match c {
            PageContents::Shape(shape) => Some(shape),
            PageContents::Text(_) => None,
        })
    }

    fn render(&self, fonts: &Arena<Font>) -> Result<Vec<u8>, PDFError> {
        render_contents(&self.contents, fonts)
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        writer: &mut Pdf,
    ) -> Result<(), PDFError> {
        let id = refs
            .get(RefType::Page(page_index))
            .ok_or(PDFError::PageMissing(page_index))?;
        let page_tree_id = refs
            .get(RefType::PageTree)
            .ok_or(PDFError::PageMissing(page_index))?;
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut font_refs = Vec::with_capacity(fonts.len());
        for (font_id, _) in fonts.iter() {
            let index = font_id.index();
            let font_ref = refs
                .get(RefType::Font(index))
                .ok_or(PDFError::FontMissing(index))?;
            font_refs.push((index, font_ref));
        }

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(page_tree_id);
        page.contents(content_id);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (index, font_ref) in font_refs {
            resource_fonts.pair(Name(format!("F{index}").as_bytes()), font_ref);
        }
        resource_fonts.finish();
        resources.finish();
        page.finish();

        let rendered = self.render(fonts)?;
        let compressed = compress_to_vec_zlib(&rendered, CompressionLevel::DefaultLevel as u8);
        writer
            .stream(content_id, compressed.as_slice())
            .filter(Filter::FlateDecode);

        Ok(())
    }
}
