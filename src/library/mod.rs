//! Audio file library
//!
//! A flat directory of audio files whose location is kept in a small JSON
//! config file. The command-line front end resolves file names against it.

pub mod config;
pub mod manager;

pub use config::LibraryConfig;
pub use manager::{Library, SUPPORTED_EXTENSIONS};

use std::fmt;
use std::path::PathBuf;

/// Errors from library bookkeeping
#[derive(Debug)]
pub enum LibraryError {
    /// Filesystem operation failed
    Io(std::io::Error),

    /// The config file could not be parsed or serialized
    Config(serde_json::Error),

    /// File extension is not one of [`SUPPORTED_EXTENSIONS`]
    UnsupportedFileType(String),

    /// A file with this name is already in the library
    AlreadyExists(String),

    /// No file with this name is in the library
    NotFound(String),

    /// The path is not an existing directory
    NotADirectory(PathBuf),

    /// No home directory to place the default config in
    NoHomeDirectory,
}

impl fmt::Display for LibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Io(err) => write!(f, "Library I/O error: {}", err),
            LibraryError::Config(err) => write!(f, "Library config error: {}", err),
            LibraryError::UnsupportedFileType(name) => {
                write!(f, "Unsupported file type: {}", name)
            }
            LibraryError::AlreadyExists(name) => write!(f, "{} is already in the library", name),
            LibraryError::NotFound(name) => write!(f, "{} is not in the library", name),
            LibraryError::NotADirectory(path) => {
                write!(f, "{} is not an existing directory", path.display())
            }
            LibraryError::NoHomeDirectory => write!(f, "Could not determine a home directory"),
        }
    }
}

impl std::error::Error for LibraryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LibraryError::Io(err) => Some(err),
            LibraryError::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        LibraryError::Io(err)
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::Config(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_io_error_keeps_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = LibraryConfig::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, LibraryError::Io(_)));

        let source = err.source().unwrap();
        let io = source.downcast_ref::<std::io::Error>().unwrap();
        assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_config_error_keeps_source() {
        let err = LibraryError::from(serde_json::from_str::<LibraryConfig>("{").unwrap_err());
        assert!(err.to_string().starts_with("Library config error: "));
        assert!(err.source().unwrap().is::<serde_json::Error>());
    }

    #[test]
    fn test_plain_variants_have_no_source() {
        assert!(LibraryError::NoHomeDirectory.source().is_none());
        assert!(LibraryError::NotFound("a.wav".to_string()).source().is_none());
    }
}
