//! src/builders/job_builder.rs
//! Decryption job builder, defaults match the container format

use std::path::PathBuf;

use crate::aliases::PasswordString;
use crate::consts::{CONTAINER_SUFFIX, DEFAULT_CHUNK_SIZE};
use crate::job::DecryptionJob;

/// Builder for [`DecryptionJob`].
///
/// Defaults: [`DEFAULT_CHUNK_SIZE`] (4096) bytes per chunk and the
/// [`CONTAINER_SUFFIX`] (`.enc`) stripped from output names.
///
/// The key-derivation iteration count is part of the container format and is
/// intentionally not configurable here.
///
/// # Example
///
/// ```
/// use mediacrypt_rs::aliases::PasswordString;
/// use mediacrypt_rs::DecryptJobBuilder;
///
/// let job = DecryptJobBuilder::new("movie.mp4.enc", "/tmp/out")
///     .with_chunk_size(64 * 1024)
///     .build(PasswordString::new("secret".to_string()));
/// assert_eq!(job.chunk_size(), 64 * 1024);
/// ```
#[derive(Debug, Clone)]
pub struct DecryptJobBuilder {
    input: PathBuf,
    output_dir: PathBuf,
    chunk_size: usize,
    container_suffix: String,
}

impl DecryptJobBuilder {
    #[must_use]
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            container_suffix: CONTAINER_SUFFIX.to_string(),
        }
    }

    /// Bytes per chunk (minimum 1).
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Suffix stripped (case-insensitively) from the input name.
    #[must_use]
    pub fn with_container_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.container_suffix = suffix.into();
        self
    }

    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    #[must_use]
    pub fn container_suffix(&self) -> &str {
        &self.container_suffix
    }

    /// Consume the builder and the password into a pending job.
    #[must_use]
    pub fn build(self, password: PasswordString) -> DecryptionJob {
        DecryptionJob::from_parts(
            self.input,
            self.output_dir,
            password,
            self.chunk_size,
            self.container_suffix,
        )
    }
}
