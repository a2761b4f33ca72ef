//! Write half of the transport.
//!
//! `write` enqueues bytes for transmission and flushes; it does not wait for
//! any acknowledgment from the peer (the protocol has none).

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::Result;

/// Writer over the transmit half of the link.
pub struct TransportWriter<W> {
    /// Underlying stream (write half).
    inner: W,
}

impl<W: AsyncWrite + Unpin> TransportWriter<W> {
    /// Wrap a stream.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Write all of `bytes` to the peer and flush.
    pub async fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_all(bytes).await?;
        self.inner.flush().await?;
        Ok(())
    }

    /// Get a reference to the underlying stream.
    pub fn inner(&self) -> &W {
        &self.inner
    }
}
