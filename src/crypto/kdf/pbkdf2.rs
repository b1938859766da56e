//! src/crypto/kdf/pbkdf2.rs

use pbkdf2::pbkdf2;
use tracing::trace;
use zeroize::Zeroizing;

use crate::aliases::{Aes256Key32, HmacSha256, PasswordString, Salt16};
use crate::consts::{KEY_SIZE, PBKDF2_ITERATIONS};
use crate::error::MediacryptError;

/// Derive PBKDF2-HMAC-SHA256 directly into a caller-provided key buffer.
///
/// # Errors
///
/// [`MediacryptError::Crypto`] if `iterations` is zero or the PRF rejects the
/// password as a key.
#[inline]
pub fn derive_pbkdf2_key(
    password: &PasswordString,
    salt: &Salt16,
    iterations: u32,
    out_key: &mut Aes256Key32,
) -> Result<(), MediacryptError> {
    if iterations == 0 {
        return Err(MediacryptError::Crypto("PBKDF2 iterations must be ≥1".into()));
    }

    pbkdf2::<HmacSha256>(password.as_bytes(), salt, iterations, &mut out_key[..])
        .map_err(|e| MediacryptError::Crypto(format!("PBKDF2 failed: {e}")))?;

    Ok(())
}

/// Derive the 32-byte container key for `password` and `salt`.
///
/// Deterministic: the same `(password, salt)` always yields the same key.
///
/// # Example
///
/// ```
/// use mediacrypt_rs::aliases::PasswordString;
/// use mediacrypt_rs::derive_key;
///
/// let password = PasswordString::new("hunter2".to_string());
/// let a = derive_key(&password, &[7u8; 16])?;
/// let b = derive_key(&password, &[7u8; 16])?;
/// assert_eq!(*a, *b);
/// # Ok::<(), mediacrypt_rs::MediacryptError>(())
/// ```
pub fn derive_key(
    password: &PasswordString,
    salt: &Salt16,
) -> Result<Aes256Key32, MediacryptError> {
    let mut key = Zeroizing::new([0u8; KEY_SIZE]);
    derive_pbkdf2_key(password, salt, PBKDF2_ITERATIONS, &mut key)?;
    trace!(iterations = PBKDF2_ITERATIONS, "container key derived");
    Ok(key)
}
