use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Export-level failures. Malformed block data is never an error (renderers
/// degrade to the documented placeholders), so this only covers the artifact
/// boundary: filesystem, wire format, and serialization of the two outputs.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("block JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("PDF export error: {0}")]
    Pdf(String),

    #[error("DOCX export error: {0}")]
    Docx(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Docx(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = Error::Docx("bad entry".into());
        assert_eq!(err.to_string(), "DOCX export error: bad entry");
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
