//! Frame struct: a header plus its optional payload.
//!
//! Uses `bytes::Bytes` for zero-copy payload sharing. Read requests carry no
//! payload; write requests carry exactly `header.length` bytes.
//!
//! # Example
//!
//! ```
//! use ramlink::protocol::{Frame, Header};
//! use bytes::Bytes;
//!
//! let header = Header::write(0x100, 5);
//! let frame = Frame::new(header, Bytes::from_static(b"hello"));
//!
//! assert_eq!(frame.address(), 0x100);
//! assert_eq!(frame.payload(), b"hello");
//! ```

use bytes::Bytes;

use super::wire_format::{Header, HEADER_SIZE};

/// A complete protocol frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Decoded header.
    pub header: Header,
    /// Payload bytes (empty for read requests).
    pub payload: Bytes,
}

impl Frame {
    /// Create a new frame from header and payload.
    pub fn new(header: Header, payload: Bytes) -> Self {
        Self { header, payload }
    }

    /// Create a frame from header and raw bytes (copies data).
    pub fn from_parts(header: Header, payload: &[u8]) -> Self {
        Self {
            header,
            payload: Bytes::copy_from_slice(payload),
        }
    }

    /// Get a reference to the payload bytes.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Get the payload length.
    #[inline]
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    /// Get the start address.
    #[inline]
    pub fn address(&self) -> u64 {
        self.header.address
    }

    /// Get the declared transfer length.
    #[inline]
    pub fn length(&self) -> u64 {
        self.header.length
    }

    /// Check if this is a write frame.
    #[inline]
    pub fn is_write(&self) -> bool {
        self.header.is_write()
    }
}

/// Build a complete frame as a single byte vector.
///
/// Encodes the header and appends the payload into a contiguous buffer,
/// ready to be written to the transport in one call.
///
/// # Example
///
/// ```
/// use ramlink::protocol::{build_frame, Header, HEADER_SIZE};
///
/// let header = Header::write(0, 5);
/// let bytes = build_frame(&header, b"hello");
/// assert_eq!(bytes.len(), HEADER_SIZE + 5);
/// ```
pub fn build_frame(header: &Header, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());
    buf.extend_from_slice(&header.encode());
    buf.extend_from_slice(payload);
    buf
}
