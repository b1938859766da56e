//! # Key Derivation
//!
//! Password → AES-256 key, using PBKDF2 with an HMAC-SHA256 core and the fixed
//! iteration count [`PBKDF2_ITERATIONS`](crate::consts::PBKDF2_ITERATIONS).
//!
//! The password is taken as raw UTF-8 bytes: no trimming, no Unicode
//! normalization.

pub mod pbkdf2;

pub use self::pbkdf2::{derive_key, derive_pbkdf2_key};
