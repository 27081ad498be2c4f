use thiserror::Error;

/// All errors that can occur while laying out or writing a document
#[derive(Error, Debug)]
pub enum PDFError {
    #[error(transparent)]
    /// An I/O error occurred while writing to the output sink
    Io(#[from] std::io::Error),

    #[error("character {0:?} (U+{code:04X}) has no glyph in the standard PDF fonts", code = *.0 as u32)]
    /// The text contains a character that cannot be measured or drawn with the
    /// WinAnsi-encoded standard fonts
    UnsupportedCharacter(char),

    #[error("page {0} is missing from the document")]
    /// The page order refers to a page that is no longer stored in the document
    PageMissing(usize),

    #[error("font {0} is missing from the document")]
    /// A span refers to a font that was never added to the document
    FontMissing(usize),
}
