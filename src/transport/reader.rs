//! Read half of the transport: exact reads over a fragmented stream.
//!
//! The stream has no inherent message boundaries, so arrivals may be split
//! at any byte. All incoming data lands in a single `BytesMut` accumulation
//! buffer; `read_exact` suspends until the buffer holds the requested count
//! and then splits it off zero-copy.
//!
//! # Example
//!
//! ```ignore
//! use ramlink::transport::TransportReader;
//!
//! let mut reader = TransportReader::new(read_half);
//! let header_bytes = reader.read_exact(17).await?;
//! ```

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::{RamLinkError, Result};

/// Initial accumulation buffer capacity.
const READ_BUFFER_CAPACITY: usize = 64 * 1024;

/// Chunk size used when draining bytes that will be discarded.
const DISCARD_CHUNK: usize = 64 * 1024;

/// Buffering reader over the receive half of the link.
pub struct TransportReader<R> {
    /// Underlying stream (read half).
    inner: R,
    /// Accumulated bytes not yet consumed.
    buffer: BytesMut,
}

impl<R: AsyncRead + Unpin> TransportReader<R> {
    /// Wrap a stream with the default buffer capacity.
    pub fn new(inner: R) -> Self {
        Self::with_capacity(inner, READ_BUFFER_CAPACITY)
    }

    /// Wrap a stream with a custom initial buffer capacity.
    pub fn with_capacity(inner: R, capacity: usize) -> Self {
        Self {
            inner,
            buffer: BytesMut::with_capacity(capacity),
        }
    }

    /// Number of bytes buffered and ready without suspending.
    #[inline]
    pub fn available(&self) -> usize {
        self.buffer.len()
    }

    /// Read exactly `n` bytes, suspending until they have all arrived.
    ///
    /// Never returns a short read and never times out: the protocol has no
    /// timeout layer, so a permanently silent peer stalls this call forever.
    ///
    /// # Errors
    ///
    /// [`RamLinkError::TransportClosed`] if the stream ends before `n` bytes
    /// arrive; [`RamLinkError::Io`] on stream failure.
    pub async fn read_exact(&mut self, n: usize) -> Result<Bytes> {
        if n > self.buffer.len() {
            self.buffer.reserve(n - self.buffer.len());
        }
        while self.buffer.len() < n {
            let read = self.inner.read_buf(&mut self.buffer).await?;
            if read == 0 {
                return Err(RamLinkError::TransportClosed);
            }
        }
        Ok(self.buffer.split_to(n).freeze())
    }

    /// Consume and drop exactly `n` bytes from the stream.
    ///
    /// Used to stay frame-aligned when a write request is rejected: the
    /// declared payload must still leave the stream, but never in one
    /// allocation of the declared size, since the length field is untrusted.
    pub async fn discard(&mut self, n: u64) -> Result<()> {
        let mut remaining = n;
        while remaining > 0 {
            let chunk = remaining.min(DISCARD_CHUNK as u64) as usize;
            let _ = self.read_exact(chunk).await?;
            remaining -= chunk as u64;
        }
        Ok(())
    }

    /// Get a reference to the underlying stream.
    pub fn inner(&self) -> &R {
        &self.inner
    }
}
