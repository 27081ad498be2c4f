//! The voucher record and how it is laid out as a PDF.

mod compose;
mod model;

pub use compose::*;
pub use model::*;
