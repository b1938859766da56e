//! tests/common.rs
//! Container builders and fixtures shared across test files

#![allow(dead_code)] // Each test binary uses a different subset

use std::path::{Path, PathBuf};
use std::sync::Once;

use ctr::cipher::{KeyIvInit, StreamCipher};
use mediacrypt_rs::aliases::{Aes256Ctr, PasswordString};
use mediacrypt_rs::consts::{EXT_FIELD_SIZE, HEADER_SIZE};
use mediacrypt_rs::derive_key;
use serde::Deserialize;

/// Standard test password
pub const TEST_PASSWORD: &str = "Hello";

pub const TEST_SALT: [u8; 16] = [0x5a; 16];
pub const TEST_NONCE: [u8; 16] = [0xa5; 16];

pub fn password(s: &str) -> PasswordString {
    PasswordString::new(s.to_string())
}

/// Raw 290-byte header.
pub fn header_bytes(extension: &str, is_directory: bool, salt: &[u8; 16], nonce: &[u8; 16]) -> Vec<u8> {
    assert!(extension.len() <= EXT_FIELD_SIZE);
    let mut raw = Vec::with_capacity(HEADER_SIZE);
    raw.push(extension.len() as u8);
    let mut ext_field = [0u8; EXT_FIELD_SIZE];
    ext_field[..extension.len()].copy_from_slice(extension.as_bytes());
    raw.extend_from_slice(&ext_field);
    raw.push(u8::from(is_directory));
    raw.extend_from_slice(salt);
    raw.extend_from_slice(nonce);
    assert_eq!(raw.len(), HEADER_SIZE);
    raw
}

/// Full container: header + AES-256-CTR(PBKDF2(password, salt), nonce) over `plaintext`.
pub fn build_container(
    extension: &str,
    is_directory: bool,
    pw: &str,
    salt: &[u8; 16],
    nonce: &[u8; 16],
    plaintext: &[u8],
) -> Vec<u8> {
    let key = derive_key(&password(pw), salt).unwrap();
    let mut body = plaintext.to_vec();
    Aes256Ctr::new((&*key).into(), nonce.into()).apply_keystream(&mut body);

    let mut out = header_bytes(extension, is_directory, salt, nonce);
    out.extend_from_slice(&body);
    out
}

/// Write a container named `name` into `dir` and return its path.
pub fn write_container(dir: &Path, name: &str, extension: &str, plaintext: &[u8]) -> PathBuf {
    let path = dir.join(name);
    let bytes = build_container(extension, false, TEST_PASSWORD, &TEST_SALT, &TEST_NONCE, plaintext);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Deterministic non-trivial plaintext.
pub fn sample_plaintext(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 + 7) as u8).collect()
}

/// Install a test-writer tracing subscriber once per binary; `RUST_LOG` filters it.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[derive(Debug, Deserialize)]
pub struct ContainerVector {
    pub input_name: String,
    pub extension: String,
    pub password: String,
    pub salt_hex: String,
    pub nonce_hex: String,
    pub key_hex: String,
    pub plaintext_hex: String,
    pub container_hex: String,
    pub output_name: String,
}

pub fn load_vectors() -> Vec<ContainerVector> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("vector")
        .join("data")
        .join("container_vectors.json");

    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));

    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {e}", path.display()))
}
