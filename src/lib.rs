//! Lays out hotel booking vouchers and writes them as PDF documents.
//!
//! The crate is split in three layers:
//!
//! - a small PDF object model ([Document], [Page], [Font], [Info]) written out with
//!   [pdf_writer]
//! - a top-down [layout] engine that measures text before drawing it, so boxes are
//!   always exactly as tall as their content
//! - the [voucher] record and the composer that turns it into a document
//!
//! With the `server` feature the crate also provides the HTTP surface that fetches a
//! voucher from its store and responds with the rendered PDF.

mod colour;
pub use colour::*;

mod content;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod info;
pub use info::*;

/// Utility functions and structures to layout objects (mostly text) on pages
pub mod layout;

mod page;
pub use page::*;

/// Common paper sizes
pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Voucher records and their PDF layout
pub mod voucher;

#[cfg(feature = "server")]
pub mod store;

#[cfg(feature = "server")]
pub mod server;

/// Re-export PDF-writer functionality
pub use pdf_writer;
