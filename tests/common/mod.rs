#![allow(dead_code)]

pub use jsonsmith_test_utils::builders;
pub use jsonsmith_test_utils::fake_provider::FakeProvider;
pub use jsonsmith_test_utils::fake_sandbox::FakeSandbox;
pub use jsonsmith_test_utils::http_stub::StubServer;
pub use jsonsmith_test_utils::{init_tracing, on_path, with_timeout};

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::AsyncWrite;

/// A stdout whose reader has gone away: every write fails with `EPIPE`.
pub struct BrokenPipeWriter;

impl AsyncWrite for BrokenPipeWriter {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Poll::Ready(Err(io::Error::from(io::ErrorKind::BrokenPipe)))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Err(io::Error::from(io::ErrorKind::BrokenPipe)))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}
