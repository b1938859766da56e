// src/crypto/mod.rs

//! Low-level crypto primitives.
//!
//! Key derivation lives here; the keystream engine is in [`crate::decryptor`].

pub mod kdf;
