//! src/decryptor/read.rs
//! Blocking read helpers for the header and the chunked body.

use std::io::{ErrorKind, Read};

/// Read exactly `N` bytes into a stack-allocated `[u8; N]`.
#[inline]
pub fn read_exact_span<R, const N: usize>(reader: &mut R) -> std::io::Result<[u8; N]>
where
    R: Read,
{
    let mut buf = [0u8; N];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

/// Fill `buf` from `reader` until it is full or the reader is exhausted.
///
/// A single `read` may return short in the middle of a stream (pipes, network
/// filesystems); looping keeps every chunk except the last one full-sized.
/// Returns the number of bytes read, `0` at end of input.
pub fn read_chunk<R>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize>
where
    R: Read,
{
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
