//! src/decryptor/stream/chunked.rs
//! Bounded-memory chunk loop: cancel check → read → decrypt → write.

use std::io::{Read, Write};

use tracing::trace;

use crate::cancel::CancelToken;
use crate::decryptor::read::read_chunk;
use crate::decryptor::stream::context::StreamDecryptor;
use crate::error::MediacryptError;

/// How a stream pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamOutcome {
    /// Input exhausted and the decryptor finalized.
    Completed { processed: u64 },
    /// Cancellation observed at a chunk boundary; `processed` bytes were written.
    Cancelled { processed: u64 },
}

impl StreamOutcome {
    #[must_use]
    pub fn processed(&self) -> u64 {
        match *self {
            StreamOutcome::Completed { processed } | StreamOutcome::Cancelled { processed } => {
                processed
            }
        }
    }
}

/// Decrypt everything left in `input` into `output`, `chunk_size` bytes at a time.
///
/// Before each chunk the `cancel` flag is checked; once set, the loop stops
/// without finalizing and leaves already written bytes untouched. After every
/// written chunk `on_chunk` receives the cumulative processed byte count.
///
/// Memory use is one `chunk_size` buffer regardless of body length. A
/// `chunk_size` of zero is treated as one.
pub fn decrypt_ciphertext_stream<R, W, F>(
    mut input: R,
    mut output: W,
    mut decryptor: StreamDecryptor,
    chunk_size: usize,
    cancel: &CancelToken,
    mut on_chunk: F,
) -> Result<StreamOutcome, MediacryptError>
where
    R: Read,
    W: Write,
    F: FnMut(u64),
{
    let mut buf = vec![0u8; chunk_size.max(1)];
    let mut chunks = 0u64;

    loop {
        if cancel.is_cancelled() {
            output.flush()?;
            let processed = decryptor.processed();
            trace!(chunks, processed, "stream cancelled at chunk boundary");
            return Ok(StreamOutcome::Cancelled { processed });
        }

        let n = read_chunk(&mut input, &mut buf)?;
        if n == 0 {
            break;
        }

        let chunk = &mut buf[..n];
        decryptor.update(chunk)?;
        output.write_all(chunk)?;
        chunks += 1;

        on_chunk(decryptor.processed());
    }

    let processed = decryptor.processed();
    let residual = decryptor.finalize()?;
    output.write_all(&residual)?;
    output.flush()?;

    trace!(chunks, processed, "stream completed");
    Ok(StreamOutcome::Completed { processed })
}
