//! tests/header_tests.rs
//! Header parsing against the container vectors and hand-built headers

mod common;

use common::{header_bytes, load_vectors};
use hex::decode;
use mediacrypt_rs::consts::{EXT_FIELD_SIZE, HEADER_SIZE};
use mediacrypt_rs::{body_len, read_header, ContainerHeader, ErrorKind};
use rstest::rstest;
use std::io::{Cursor, Read};

#[test]
fn vectors_parse_to_declared_fields() {
    for v in load_vectors() {
        let container = decode(&v.container_hex).unwrap();
        let header = ContainerHeader::parse(&container)
            .unwrap_or_else(|e| panic!("{}: {e}", v.input_name));

        assert_eq!(header.extension, v.extension, "{}", v.input_name);
        assert!(!header.is_directory);
        assert_eq!(header.salt.to_vec(), decode(&v.salt_hex).unwrap());
        assert_eq!(header.nonce.to_vec(), decode(&v.nonce_hex).unwrap());

        let plaintext_len = decode(&v.plaintext_hex).unwrap().len() as u64;
        assert_eq!(body_len(container.len() as u64).unwrap(), plaintext_len);
    }
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(HEADER_SIZE / 2)]
#[case(HEADER_SIZE - 1)]
fn truncated_vector_is_format_error(#[case] keep: usize) {
    let v = &load_vectors()[0];
    let container = decode(&v.container_hex).unwrap();

    let err = ContainerHeader::parse(&container[..keep]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);

    let err = read_header(Cursor::new(&container[..keep])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[rstest]
#[case("")]
#[case(".mp4")]
#[case(".ünïcödé")]
fn extension_round_trips_through_field(#[case] ext: &str) {
    let raw = header_bytes(ext, false, &[1; 16], &[2; 16]);
    assert_eq!(ContainerHeader::parse(&raw).unwrap().extension, ext);
}

#[test]
fn longest_encodable_extension_is_accepted() {
    let ext = "x".repeat(usize::from(u8::MAX));
    let raw = header_bytes(&ext, false, &[0; 16], &[0; 16]);
    let header = ContainerHeader::parse(&raw).unwrap();
    assert_eq!(header.extension.len(), 255);
    assert!(header.extension.len() < EXT_FIELD_SIZE);
}

#[test]
fn directory_container_is_flagged() {
    let raw = header_bytes(".mp4", true, &[0; 16], &[0; 16]);
    let header = ContainerHeader::parse(&raw).unwrap();
    assert!(header.is_directory);
    let err = header.ensure_file().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedContent);
    assert_eq!(err.to_string(), "Cannot play encrypted directories.");
}

#[test]
fn reader_is_left_at_first_ciphertext_byte() {
    let v = &load_vectors()[1];
    let container = decode(&v.container_hex).unwrap();
    let mut cursor = Cursor::new(&container);
    read_header(&mut cursor).unwrap();

    let mut body = Vec::new();
    cursor.read_to_end(&mut body).unwrap();
    assert_eq!(body, &container[HEADER_SIZE..]);
}
