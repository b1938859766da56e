//! src/decryptor/stream/context.rs
//! AES-256-CTR keystream state for one container body.

use aes::cipher::{KeyIvInit, StreamCipher};

use crate::aliases::{Aes256Ctr, Aes256Key32, Nonce16};
use crate::error::MediacryptError;

/// Keystream state for one container body.
///
/// The header nonce is the initial 128-bit big-endian counter block. The
/// keystream position advances with every byte passed to [`update`](Self::update),
/// so chunks must be fed strictly in ascending offset order; a skipped or
/// reordered chunk corrupts everything after it.
pub struct StreamDecryptor {
    cipher: Aes256Ctr,
    processed: u64,
}

impl StreamDecryptor {
    #[inline]
    pub fn new(key: &Aes256Key32, nonce: &Nonce16) -> Self {
        Self {
            cipher: Aes256Ctr::new((&**key).into(), nonce.into()),
            processed: 0,
        }
    }

    /// Decrypt `chunk` in place. Output length equals input length.
    ///
    /// # Errors
    ///
    /// [`MediacryptError::Crypto`] if the 128-bit counter would wrap.
    #[inline]
    pub fn update(&mut self, chunk: &mut [u8]) -> Result<(), MediacryptError> {
        self.cipher.try_apply_keystream(chunk).map_err(|_| {
            MediacryptError::Crypto(format!(
                "keystream exhausted after {} bytes",
                self.processed
            ))
        })?;
        self.processed += chunk.len() as u64;
        Ok(())
    }

    /// Bytes decrypted so far.
    #[must_use]
    pub fn processed(&self) -> u64 {
        self.processed
    }

    /// Finish a clean pass.
    ///
    /// CTR carries no buffered block, so there is never residual output; the
    /// call consumes the keystream state so it cannot be fed again. Not called
    /// on the cancellation path.
    pub fn finalize(self) -> Result<Vec<u8>, MediacryptError> {
        Ok(Vec::new())
    }
}
