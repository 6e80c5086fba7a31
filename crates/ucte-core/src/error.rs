//! Unified error type for the UCTE workspace
//!
//! Decoding and encoding never fail; errors only arise at the edges (file
//! access, file-name metadata, configuration).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UcteError {
    /// I/O errors (file access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File name does not follow the naming convention
    #[error("File name error: {0}")]
    FileName(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type UcteResult<T> = Result<T, UcteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = UcteError::FileName("missing area code".into());
        assert!(err.to_string().contains("File name error"));
        assert!(err.to_string().contains("missing area code"));
    }

    #[test]
    fn test_io_error_conversion() {
        fn open(path: &str) -> UcteResult<String> {
            Ok(std::fs::read_to_string(path)?)
        }

        let err = open("/nonexistent/ucte/grid.uct").unwrap_err();
        assert!(matches!(err, UcteError::Io(_)));
        assert!(err.to_string().starts_with("I/O error"));
    }
}
