//! Device-side client: the bus-master half of the protocol.
//!
//! From the device's point of view the host is external memory. This is the
//! counterpart of the session loop: it emits the same 17-byte headers,
//! streams write payloads out, and collects read replies. The integration
//! tests use it to drive a full session end to end; a simulator standing in
//! for the real bus master can use it directly.
//!
//! # Example
//!
//! ```ignore
//! use ramlink::device::RemoteMemory;
//!
//! let mut ram = RemoteMemory::connect(stream);
//! ram.write(0x100, b"samples").await?;
//! let back = ram.read(0x100, 7).await?;
//! ```

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncWrite, ReadHalf, WriteHalf};

use crate::error::Result;
use crate::protocol::{build_frame, Header};
use crate::transport::{TransportReader, TransportWriter};

/// Client view of the host's store over a duplex stream.
pub struct RemoteMemory<R, W> {
    reader: TransportReader<R>,
    writer: TransportWriter<W>,
}

impl<S> RemoteMemory<ReadHalf<S>, WriteHalf<S>>
where
    S: AsyncRead + AsyncWrite,
{
    /// Connect over a duplex stream.
    pub fn connect(stream: S) -> Self {
        let (reader, writer) = tokio::io::split(stream);
        Self::connect_split(reader, writer)
    }
}

impl<R, W> RemoteMemory<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Connect over pre-split read and write halves.
    pub fn connect_split(reader: R, writer: W) -> Self {
        Self {
            reader: TransportReader::new(reader),
            writer: TransportWriter::new(writer),
        }
    }

    /// Wait for the host's startup handshake and return the sentinel byte.
    ///
    /// Only meaningful against a session configured with a handshake.
    pub async fn wait_handshake(&mut self) -> Result<u8> {
        let byte = self.reader.read_exact(1).await?;
        Ok(byte[0])
    }

    /// Write `data` into the host store at `address`.
    ///
    /// Sends header and payload in one buffer; there is no acknowledgment to
    /// wait for.
    pub async fn write(&mut self, address: u64, data: &[u8]) -> Result<()> {
        let header = Header::write(address, data.len() as u64);
        self.writer.write(&build_frame(&header, data)).await
    }

    /// Read `length` bytes from the host store at `address`.
    ///
    /// Suspends until the full reply has arrived. Against a host that
    /// rejects the range this never completes, so only issue in-range reads
    /// (the protocol carries no error replies).
    pub async fn read(&mut self, address: u64, length: u64) -> Result<Bytes> {
        let header = Header::read(address, length);
        self.writer.write(&header.encode()).await?;
        self.reader.read_exact(length as usize).await
    }
}
