use crate::{
    font::Font,
    info::Info,
    page::Page,
    refs::{ObjectReferences, RefType},
    PDFError,
};
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Pdf, Ref};
use std::io::Write;

#[derive(Default)]
/// A document is the main object that stores all the contents of the PDF
/// then renders it out with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    pub fonts: Arena<Font>,
}

impl Document {
    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document, returning the id of that page.
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    /// Number of pages in the document
    pub fn page_count(&self) -> usize {
        self.page_order.len()
    }

    /// The page at the given 0-based position in the document, if there is one
    pub fn page_at(&self, page_index: usize) -> Option<&Page> {
        self.page_order
            .get(page_index)
            .and_then(|id| self.pages.get(*id))
    }

    /// Add a font to the document structure. Fonts are stored "globally" within the
    /// document, such that any page can use it by referring to it by its id.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    /// Write the entire document to the writer. Note: although this can write to arbitrary
    /// streams, the entire document is "rendered" in memory first; nothing reaches the
    /// writer unless the whole document could be produced. The writer is flushed and
    /// dropped once the document is written, so no further output can follow it.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), PDFError> {
        let Document {
            info,
            pages,
            page_order,
            fonts,
        } = self;

        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = page_order
            .iter()
            .enumerate()
            .map(|(i, _id)| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (id, font) in fonts.iter() {
            font.write(&mut refs, id, &mut writer);
        }

        for (page_index, id) in page_order.iter().enumerate() {
            let page = pages.get(*id).ok_or(PDFError::PageMissing(page_index))?;
            page.write(&mut refs, page_index, &fonts, &mut writer)?;
        }

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        catalog.finish();

        w.write_all(writer.finish().as_slice())?;
        w.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Margins;
    use crate::pagesize::A4;
    use crate::{colours, SpanFont, SpanLayout};
    use crate::units::Pt;

    fn sample_document() -> Document {
        let mut doc = Document::default();
        let font = doc.add_font(Font::helvetica());
        let mut page = Page::new(A4, Some(Margins::all(Pt(40.0))));
        page.add_span(SpanLayout {
            text: "Olá".into(),
            font: SpanFont {
                id: font,
                size: Pt(12.0),
            },
            colour: colours::BLACK,
            coords: (Pt(40.0), Pt(800.0)),
        });
        doc.add_page(page);
        doc.add_page(Page::new(A4, None));
        doc
    }

    #[test]
    fn writes_a_complete_pdf() {
        let doc = sample_document();
        assert_eq!(doc.page_count(), 2);

        let mut out: Vec<u8> = Vec::new();
        doc.write(&mut out).expect("can write document");
        assert!(out.starts_with(b"%PDF-"));
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("/Count 2"));
        assert!(text.contains("/Helvetica"));
        assert!(text.contains("/WinAnsiEncoding"));
        assert!(text.trim_end().ends_with("%%EOF"));
    }

    #[test]
    fn output_is_reproducible() {
        let mut a: Vec<u8> = Vec::new();
        let mut b: Vec<u8> = Vec::new();
        sample_document().write(&mut a).expect("can write document");
        sample_document().write(&mut b).expect("can write document");
        assert_eq!(a, b);
    }
}
