//! # Error Types
//!
//! This module defines the error type used throughout the library.
//! All fallible operations return [`Result<T, MediacryptError>`](MediacryptError).

use thiserror::Error;

/// The error type for all container operations.
///
/// One variant per failure class: malformed containers, unsupported content,
/// I/O, cryptography and user-requested cancellation.
#[derive(Error, Debug)]
pub enum MediacryptError {
    /// I/O error while opening, reading, writing or creating directories.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The container header is truncated, has a malformed length field or
    /// carries an extension that is not valid UTF-8.
    #[error("Format error: {0}")]
    Format(String),

    /// The container is well-formed but holds something we refuse to decrypt
    /// (currently: directories).
    #[error("{0}")]
    UnsupportedContent(String),

    /// Key derivation or keystream failure.
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// The job stopped because cancellation was requested.
    ///
    /// Never shown to the user as an error; it only separates the cancelled
    /// terminal state from success and failure.
    #[error("decryption cancelled")]
    Cancelled,
}

/// Fieldless view of [`MediacryptError`] for matching on the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Io,
    Format,
    UnsupportedContent,
    Crypto,
    Cancelled,
}

impl MediacryptError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            MediacryptError::Io(_) => ErrorKind::Io,
            MediacryptError::Format(_) => ErrorKind::Format,
            MediacryptError::UnsupportedContent(_) => ErrorKind::UnsupportedContent,
            MediacryptError::Crypto(_) => ErrorKind::Crypto,
            MediacryptError::Cancelled => ErrorKind::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert_with_question_mark() {
        fn fails() -> Result<(), MediacryptError> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }
        let err = fails().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(err.to_string(), "I/O error: gone");
    }

    #[test]
    fn unsupported_content_message_is_verbatim() {
        let err = MediacryptError::UnsupportedContent("Cannot play encrypted directories.".into());
        assert_eq!(err.to_string(), "Cannot play encrypted directories.");
    }
}
