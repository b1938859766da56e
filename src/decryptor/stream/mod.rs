// src/decryptor/stream/mod.rs
pub(crate) mod chunked;
pub(crate) mod context;

pub use chunked::{decrypt_ciphertext_stream, StreamOutcome};
pub use context::StreamDecryptor;
