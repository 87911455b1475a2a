// src/sample.rs

//! Bounded sampling of the input stream.
//!
//! The sample serves twice: it is shown to the model as an example of the
//! data, and it is the head of the stream the generated program later runs
//! against. Bytes read here are gone from the underlying reader, so the
//! executors re-inject them in front of the remaining input.

use std::io::IsTerminal;

use tokio::io::{AsyncRead, AsyncReadExt};

/// Default number of bytes captured as the example snippet.
pub const DEFAULT_SAMPLE_LEN: usize = 1024;

/// `true` when standard input is a pipe or file rather than a terminal.
pub fn stdin_is_piped() -> bool {
    !std::io::stdin().is_terminal()
}

/// Read up to `limit` bytes from `reader`.
///
/// Stops early at end-of-stream and returns exactly the bytes that were
/// available; it never waits for `limit` bytes once the stream is done.
pub async fn read_sample<R>(reader: &mut R, limit: usize) -> std::io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut sample = Vec::with_capacity(limit.min(64 * 1024));
    reader.take(limit as u64).read_to_end(&mut sample).await?;
    Ok(sample)
}
