//! # Secret Type Aliases
//!
//! Type aliases for the secrets and fixed-size buffers that flow through the
//! decryption path. Secrets are wrapped in [`zeroize::Zeroizing`] so they are
//! wiped from memory when dropped.
//!
//! ## Secrets
//! - [`PasswordString`] - user-supplied password, discarded right after key derivation
//! - [`Aes256Key32`] - 32-byte AES-256 key produced by PBKDF2
//!
//! ## Public header fields
//! - [`Salt16`] - 16-byte key-derivation salt
//! - [`Nonce16`] - 16-byte initial counter block
//!
//! ## Primitives
//! - [`HmacSha256`] - PRF used by PBKDF2
//! - [`Aes256Ctr`] - AES-256 in CTR mode with a full 128-bit big-endian counter

use hmac::Hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::consts::{KEY_SIZE, NONCE_SIZE, SALT_SIZE};

pub type HmacSha256 = Hmac<Sha256>;

pub type Aes256Ctr = ctr::Ctr128BE<aes::Aes256>;

// ─────────────────────────────────────────────────────────────────────────────
// Secrets (zeroized on drop)
// ─────────────────────────────────────────────────────────────────────────────
pub type PasswordString = Zeroizing<String>;
pub type Aes256Key32 = Zeroizing<[u8; KEY_SIZE]>;

// ─────────────────────────────────────────────────────────────────────────────
// Header fields (public, not secret)
// ─────────────────────────────────────────────────────────────────────────────
pub type Salt16 = [u8; SALT_SIZE];
pub type Nonce16 = [u8; NONCE_SIZE];
