//! # Constants
//!
//! Byte layout of the encrypted media container, key-derivation policy and
//! streaming defaults used throughout the library.

/// Size of the extension-length field (1 byte).
pub const EXT_LEN_FIELD_SIZE: usize = 1;

/// Size of the fixed extension buffer.
///
/// Only the first `extension length` bytes are significant; the remainder is
/// unused and may contain garbage.
pub const EXT_FIELD_SIZE: usize = 256;

/// Size of the directory flag (1 byte, `0` = file, `1` = directory).
pub const DIR_FLAG_SIZE: usize = 1;

/// Key-derivation salt size (16 bytes).
pub const SALT_SIZE: usize = 16;

/// Cipher nonce / initial counter block size (16 bytes).
pub const NONCE_SIZE: usize = 16;

/// Total header size: `1 + 256 + 1 + 16 + 16 = 290` bytes.
pub const HEADER_SIZE: usize =
    EXT_LEN_FIELD_SIZE + EXT_FIELD_SIZE + DIR_FLAG_SIZE + SALT_SIZE + NONCE_SIZE;

/// Offset of the extension buffer.
pub const EXT_OFFSET: usize = EXT_LEN_FIELD_SIZE;

/// Offset of the directory flag.
pub const DIR_FLAG_OFFSET: usize = EXT_OFFSET + EXT_FIELD_SIZE;

/// Offset of the salt.
pub const SALT_OFFSET: usize = DIR_FLAG_OFFSET + DIR_FLAG_SIZE;

/// Offset of the nonce.
pub const NONCE_OFFSET: usize = SALT_OFFSET + SALT_SIZE;

/// PBKDF2-HMAC-SHA256 iteration count.
///
/// This is a fixed format property, not a tunable: every container ever written
/// was keyed with exactly this many iterations.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Derived key length (32 bytes = AES-256).
pub const KEY_SIZE: usize = 32;

/// Default number of ciphertext bytes processed per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// File-name suffix that marks an encrypted container (matched case-insensitively).
pub const CONTAINER_SUFFIX: &str = ".enc";

/// Plain media extensions that can be handed to playback without decryption.
pub const MEDIA_EXTENSIONS: &[&str] = &["mp4", "avi", "mkv", "mov", "mp3", "wav"];

/// Prefix of the session-scoped temporary output directory.
pub const TEMP_DIR_PREFIX: &str = "mediacrypt-";

/// Name given to the decryption worker thread.
pub const WORKER_THREAD_NAME: &str = "mediacrypt-decrypt";
