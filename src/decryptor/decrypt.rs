//! src/decryptor/decrypt.rs
//! One-shot, in-process container decryption.

use std::io::{Read, Write};

use crate::aliases::PasswordString;
use crate::cancel::CancelToken;
use crate::consts::DEFAULT_CHUNK_SIZE;
use crate::crypto::kdf::derive_key;
use crate::decryptor::stream::{decrypt_ciphertext_stream, StreamDecryptor};
use crate::error::MediacryptError;
use crate::header::{read_header, ContainerHeader};

/// Result of a successful [`decrypt`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptedContainer {
    pub header: ContainerHeader,
    /// Plaintext bytes written (equal to the ciphertext length).
    pub processed: u64,
}

/// Decrypt a whole container from `input` into `output` on the calling thread.
///
/// No progress reporting and no cancellation; use [`DecryptionJob`](crate::DecryptionJob)
/// for that. Directory containers are rejected before the key is derived.
///
/// # Errors
///
/// - [`MediacryptError::Format`] for a truncated or malformed header
/// - [`MediacryptError::UnsupportedContent`] for directory containers
/// - [`MediacryptError::Io`] / [`MediacryptError::Crypto`] from the stream
pub fn decrypt<R, W>(
    password: &PasswordString,
    mut input: R,
    output: W,
) -> Result<DecryptedContainer, MediacryptError>
where
    R: Read,
    W: Write,
{
    let header = read_header(&mut input)?;
    header.ensure_file()?;

    let decryptor = {
        let key = derive_key(password, &header.salt)?;
        StreamDecryptor::new(&key, &header.nonce)
    };

    let outcome = decrypt_ciphertext_stream(
        input,
        output,
        decryptor,
        DEFAULT_CHUNK_SIZE,
        &CancelToken::new(),
        |_| {},
    )?;

    Ok(DecryptedContainer {
        header,
        processed: outcome.processed(),
    })
}
