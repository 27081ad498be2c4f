//! Layout utilities for positioning content on pages.
//!
//! Everything in this module works top-down: a vertical position is the distance
//! from the top edge of the page, which is how a [`Cursor`] moves through a
//! document. Conversion to PDF user space (origin at the bottom-left) only happens
//! when spans and shapes are placed on a [`Page`](crate::Page).
//!
//! The building blocks are:
//!
//! - [`measure_text`] and [`wrap_text`], which size text before it is drawn
//! - [`TextBlock`], a run of wrapped text in one font and colour
//! - [`SectionBox`], a padded, rounded, filled and outlined box holding text blocks
//! - [`TwoColumnLayout`], which puts two sections side by side
//! - [`PageBreakPolicy`], which decides whether a footer still fits on the page
//!
//! # Example
//!
//! ```
//! use voucher_pdf::{colours, Document, Font, Pt, SpanFont};
//! use voucher_pdf::layout::{Cursor, PageGeometry, SectionBox, SectionStyle, TextBlock};
//!
//! let mut doc = Document::default();
//! let body = SpanFont { id: doc.add_font(Font::helvetica()), size: Pt(10.0) };
//!
//! let geometry = PageGeometry::default();
//! let mut cursor = Cursor::new(geometry.clone());
//! let mut page = geometry.new_page();
//!
//! let mut section = SectionBox::new(SectionStyle::default());
//! section.push(TextBlock::new("Check-in: 10/03/2025", body, colours::TEXT));
//!
//! let height = section
//!     .draw(&doc, &mut page, cursor.position(), geometry.content_width())
//!     .expect("text can be set in Helvetica");
//! cursor.advance(height);
//! doc.add_page(page);
//! assert_eq!(doc.page_count(), 1);
//! ```

mod columns;
mod cursor;
mod margins;
mod pagebreak;
mod section;
mod text;

pub use columns::*;
pub use cursor::*;
pub use margins::*;
pub use pagebreak::*;
pub use section::*;
pub use text::*;
