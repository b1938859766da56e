// src/lib.rs

//! Streaming decryption of password-protected media containers.
//!
//! A container is a 290-byte header (plaintext extension, directory flag, salt,
//! nonce) followed by AES-256-CTR ciphertext keyed with PBKDF2-HMAC-SHA256.
//! Decryption runs chunk by chunk on a worker thread, reports integer progress
//! and can be cancelled between chunks.

#![forbid(unsafe_code)]

pub mod aliases;
pub mod builders;
pub mod cancel;
pub mod collab;
pub mod consts;
pub mod crypto;
pub mod decryptor;
pub mod error;
pub mod header;
pub mod job;
pub mod naming;
pub mod registry;
pub mod session;
pub mod utils;

// High-level API
pub use collab::{LogStatus, PasswordPrompt, PlaybackSink, StatusDisplay};
pub use session::{OpenOutcome, Session};

pub use builders::DecryptJobBuilder;
pub use cancel::CancelToken;
pub use error::{ErrorKind, MediacryptError};
pub use job::{DecryptionJob, JobEvent, JobHandle, JobState, ProgressTracker};
pub use registry::{TeardownReport, TempOutputRegistry};

// Building blocks for custom flows
pub use crypto::kdf::derive_key;
pub use decryptor::{
    decrypt, decrypt_ciphertext_stream, DecryptedContainer, StreamDecryptor, StreamOutcome,
};
pub use header::{body_len, read_header, ContainerHeader};
pub use naming::{is_container, is_supported_media, output_file_name, prepare_output_path};
