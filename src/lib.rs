mod constants;
mod container;
mod parse_presentation;
mod parse_rels;
mod parse_xml;
mod parser_config;
mod slide;
mod types;

pub use container::{PptxContainer, SlideEntry};
pub use parser_config::{ParserConfig, ParserConfigBuilder};
pub use types::*;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Missing package part: {0}")]
    MissingPart(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(&'static str),

    #[error("Image not found")]
    ImageNotFound,
}

/// Coarse classification of [`Error`] for callers that map failures onto a
/// transport-level distinction (bad input vs. internal fault).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The buffer is not a valid package: bad archive, missing required
    /// parts, or corrupt XML.
    MalformedPackage,
    /// An I/O failure outside the package itself.
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) => ErrorKind::Io,
            _ => ErrorKind::MalformedPackage,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Parses a complete presentation from an in-memory buffer in one call.
///
/// Opens `data` as a PPTX package and extracts every slide's shape tree
/// into the serializable [`ParseOutput`] structure. `file_name` and the
/// buffer length are echoed back in the output; they carry no meaning for
/// parsing itself.
///
/// # Errors
///
/// Fails with a [`ErrorKind::MalformedPackage`]-kinded error when the
/// buffer is not a valid archive, lacks a presentation part, or contains
/// corrupt XML. Failures scoped to a single shape do not surface here;
/// they are embedded as degraded shape records instead.
pub fn parse_presentation(data: Vec<u8>, file_name: &str, config: ParserConfig) -> Result<ParseOutput> {
    let mut container = PptxContainer::from_bytes(data, config)?;
    container.parse(file_name)
}
