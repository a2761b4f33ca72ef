//! Session loop - the request-service state machine.
//!
//! Cycles between two states until shutdown or transport closure:
//!
//! ```text
//! AwaitHeader ──17 bytes──► decode ──write──► AwaitBody ──payload──► store
//!      ▲                      │                                        │
//!      │                      └──read──► store ──reply──► peer         │
//!      └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! The header-then-body split lets the loop learn the exact payload size
//! before consuming it, so variable-length transfers never desynchronize the
//! stream. Requests are serviced strictly in arrival order on a single task;
//! a write's effects are visible to every read serviced after it.
//!
//! # Example
//!
//! ```ignore
//! use ramlink::SessionBuilder;
//!
//! let stats = SessionBuilder::new()
//!     .capacity(1024 * 1024)
//!     .handshake(b'\n')
//!     .attach(stream)
//!     .run()
//!     .await?;
//! ```

use tokio::io::{AsyncRead, AsyncWrite, ReadHalf, WriteHalf};

use crate::error::{RamLinkError, Result};
use crate::protocol::{Header, Request, HEADER_SIZE};
use crate::store::{MemoryStore, DEFAULT_CAPACITY};
use crate::transport::{TransportReader, TransportWriter};

/// Builder for configuring a session.
///
/// Use the fluent API to set capacity and the optional startup handshake,
/// then call `attach()` with the peer stream.
pub struct SessionBuilder {
    capacity: usize,
    handshake: Option<u8>,
}

impl SessionBuilder {
    /// Create a new session builder with default settings.
    pub fn new() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            handshake: None,
        }
    }

    /// Set the store capacity in bytes.
    ///
    /// Default: 1 MiB.
    pub fn capacity(mut self, bytes: usize) -> Self {
        self.capacity = bytes;
        self
    }

    /// Send `sentinel` to the peer once, before the first request.
    ///
    /// Bus-master firmware commonly blocks on a single byte at boot before
    /// starting its transfer routine; peers that do not expect the byte
    /// simply leave this unset. Default: off.
    pub fn handshake(mut self, sentinel: u8) -> Self {
        self.handshake = Some(sentinel);
        self
    }

    /// Attach a duplex stream and build the session.
    pub fn attach<S>(self, stream: S) -> Session<ReadHalf<S>, WriteHalf<S>>
    where
        S: AsyncRead + AsyncWrite,
    {
        let (reader, writer) = tokio::io::split(stream);
        self.attach_split(reader, writer)
    }

    /// Attach pre-split read and write halves and build the session.
    pub fn attach_split<R, W>(self, reader: R, writer: W) -> Session<R, W>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        Session {
            reader: TransportReader::new(reader),
            writer: TransportWriter::new(writer),
            store: MemoryStore::new(self.capacity),
            handshake: self.handshake,
            stats: SessionStats::default(),
        }
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Totals accumulated over one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Read requests serviced with a reply.
    pub reads: u64,
    /// Write requests applied to the store.
    pub writes: u64,
    /// Requests rejected as out of range.
    pub rejected: u64,
}

/// A session servicing one bus master over one stream.
///
/// Owns the store and both transport halves for its entire lifetime.
pub struct Session<R, W> {
    reader: TransportReader<R>,
    writer: TransportWriter<W>,
    store: MemoryStore,
    handshake: Option<u8>,
    stats: SessionStats,
}

impl<R, W> Session<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Access the store (contents survive between requests).
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Totals so far.
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Run the loop until the peer closes the link.
    ///
    /// Returns the accumulated totals on orderly closure. Transport failure
    /// is fatal and propagates; an out-of-range request only fails that one
    /// request and the loop keeps going.
    pub async fn run(mut self) -> Result<SessionStats> {
        if let Some(sentinel) = self.handshake {
            self.writer.write(&[sentinel]).await?;
            tracing::debug!(sentinel, "sent startup handshake");
        }

        loop {
            let header_bytes = match self.reader.read_exact(HEADER_SIZE).await {
                Ok(bytes) => bytes,
                Err(RamLinkError::TransportClosed) => {
                    tracing::debug!(stats = ?self.stats, "peer closed the link");
                    return Ok(self.stats);
                }
                Err(e) => return Err(e),
            };

            let header = Header::decode(&header_bytes).expect("buffer has HEADER_SIZE bytes");
            let request = header.request();
            tracing::debug!(
                addr = request.address,
                data_size = request.length,
                rw = request.is_write as u8,
                "request"
            );

            if request.is_write {
                self.serve_write(request).await?;
            } else {
                self.serve_read(request).await?;
            }
        }
    }

    /// AwaitBody, write direction: consume the payload, then apply it.
    ///
    /// The range check happens before the payload is pulled in so a bogus
    /// length never turns into one giant allocation; the declared byte count
    /// is drained from the stream either way to keep framing synchronized.
    async fn serve_write(&mut self, request: Request) -> Result<()> {
        if let Err(e) = self.store.check_range(request.address, request.length) {
            self.stats.rejected += 1;
            tracing::warn!(%e, "write rejected, discarding payload to stay in sync");
            return self.reader.discard(request.length).await;
        }

        // In range, so length fits in usize
        let payload = self.reader.read_exact(request.length as usize).await?;
        self.store.write_at(request.address, &payload)?;
        self.stats.writes += 1;
        Ok(())
    }

    /// AwaitBody, read direction: reply with the requested range.
    ///
    /// An out-of-range read gets no reply at all; the protocol carries no
    /// error frames, so silence is the only rejection signal available.
    async fn serve_read(&mut self, request: Request) -> Result<()> {
        match self.store.read_at(request.address, request.length) {
            Ok(data) => {
                self.writer.write(&data).await?;
                self.stats.reads += 1;
            }
            Err(e @ RamLinkError::OutOfRangeAccess { .. }) => {
                self.stats.rejected += 1;
                tracing::warn!(%e, "read rejected, no reply sent");
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }
}
