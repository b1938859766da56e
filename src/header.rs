//! # Header Parsing
//!
//! This module parses the fixed-size header that prefixes every encrypted media
//! container.
//!
//! # Header Format
//!
//! | Offset | Size | Field |
//! |---|---|---|
//! | 0 | 1 | extension length `L` |
//! | 1 | 256 | extension buffer, first `L` bytes are the UTF-8 extension |
//! | 257 | 1 | directory flag (`0` = file, `1` = directory) |
//! | 258 | 16 | key-derivation salt |
//! | 274 | 16 | cipher nonce / initial counter |
//! | 290 | .. | ciphertext, same length as the plaintext |

use std::io::{ErrorKind as IoErrorKind, Read};

use crate::aliases::{Nonce16, Salt16};
use crate::consts::{
    DIR_FLAG_OFFSET, EXT_FIELD_SIZE, EXT_OFFSET, HEADER_SIZE, NONCE_OFFSET, NONCE_SIZE,
    SALT_OFFSET, SALT_SIZE,
};
use crate::decryptor::read_exact_span;
use crate::error::MediacryptError;

/// Parsed container header.
///
/// Transient: built once per open request and consumed by the decryption path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHeader {
    /// Extension of the plaintext file, e.g. `".mp4"`.
    pub extension: String,
    /// `true` when the container wraps a directory rather than a single file.
    pub is_directory: bool,
    pub salt: Salt16,
    pub nonce: Nonce16,
}

impl ContainerHeader {
    /// Parse a header from the first [`HEADER_SIZE`] bytes of `bytes`.
    ///
    /// Bytes past the header are ignored, so the whole container may be passed.
    ///
    /// # Errors
    ///
    /// - [`MediacryptError::Format`] if fewer than 290 bytes are available, the
    ///   extension length exceeds the buffer, or the extension is not UTF-8.
    ///
    /// # Example
    ///
    /// ```
    /// use mediacrypt_rs::ContainerHeader;
    ///
    /// let mut raw = vec![0u8; 290];
    /// raw[0] = 4;
    /// raw[1..5].copy_from_slice(b".mp4");
    /// let header = ContainerHeader::parse(&raw)?;
    /// assert_eq!(header.extension, ".mp4");
    /// assert!(!header.is_directory);
    /// # Ok::<(), mediacrypt_rs::MediacryptError>(())
    /// ```
    pub fn parse(bytes: &[u8]) -> Result<Self, MediacryptError> {
        if bytes.len() < HEADER_SIZE {
            return Err(MediacryptError::Format(format!(
                "truncated header: expected {HEADER_SIZE} bytes, got {}",
                bytes.len()
            )));
        }

        let ext_len = bytes[0] as usize;
        if ext_len > EXT_FIELD_SIZE {
            return Err(MediacryptError::Format(format!(
                "extension length {ext_len} exceeds {EXT_FIELD_SIZE}"
            )));
        }

        // Only the declared prefix is significant, whatever follows is padding.
        let ext_bytes = &bytes[EXT_OFFSET..EXT_OFFSET + ext_len];
        let extension = std::str::from_utf8(ext_bytes)
            .map_err(|e| MediacryptError::Format(format!("extension is not valid UTF-8: {e}")))?
            .to_owned();

        let is_directory = bytes[DIR_FLAG_OFFSET] != 0;

        let mut salt = [0u8; SALT_SIZE];
        salt.copy_from_slice(&bytes[SALT_OFFSET..SALT_OFFSET + SALT_SIZE]);

        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(&bytes[NONCE_OFFSET..NONCE_OFFSET + NONCE_SIZE]);

        Ok(Self {
            extension,
            is_directory,
            salt,
            nonce,
        })
    }

    /// Fail with [`MediacryptError::UnsupportedContent`] if this header describes
    /// a directory. Must be checked before any key derivation happens.
    pub fn ensure_file(&self) -> Result<(), MediacryptError> {
        if self.is_directory {
            return Err(MediacryptError::UnsupportedContent(
                "Cannot play encrypted directories.".into(),
            ));
        }
        Ok(())
    }
}

/// Read and parse exactly [`HEADER_SIZE`] bytes from `reader`.
///
/// The reader is left positioned at the first ciphertext byte.
///
/// # Errors
///
/// - [`MediacryptError::Format`] if the reader ends before 290 bytes
/// - [`MediacryptError::Io`] for any other read failure
pub fn read_header<R: Read>(mut reader: R) -> Result<ContainerHeader, MediacryptError> {
    let raw = read_exact_span::<_, HEADER_SIZE>(&mut reader).map_err(|e| match e.kind() {
        IoErrorKind::UnexpectedEof => MediacryptError::Format(format!(
            "truncated header: expected {HEADER_SIZE} bytes"
        )),
        _ => MediacryptError::Io(e),
    })?;
    ContainerHeader::parse(&raw)
}

/// Ciphertext length for a container file of `file_len` bytes.
///
/// # Errors
///
/// [`MediacryptError::Format`] if the file is shorter than the header.
pub fn body_len(file_len: u64) -> Result<u64, MediacryptError> {
    file_len.checked_sub(HEADER_SIZE as u64).ok_or_else(|| {
        MediacryptError::Format(format!(
            "container is {file_len} bytes, shorter than the {HEADER_SIZE}-byte header"
        ))
    })
}
