// src/decryptor/mod.rs

//! Stream cipher engine.
//!
//! Core API: `decrypt(&password, input, output)?` for one-shot decryption.
//! Building blocks: [`StreamDecryptor`] and [`decrypt_ciphertext_stream`] for
//! cancellable, progress-reporting flows such as [`DecryptionJob`](crate::DecryptionJob).

pub(crate) mod decrypt;
pub(crate) mod read;
pub(crate) mod stream;

pub use decrypt::{decrypt, DecryptedContainer};
pub use read::{read_chunk, read_exact_span};
pub use stream::{decrypt_ciphertext_stream, StreamDecryptor, StreamOutcome};
