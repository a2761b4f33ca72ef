//! Wire format encoding and decoding.
//!
//! Implements the 17-byte request header:
//! ```text
//! ┌──────────┬──────────┬───────────┐
//! │ Address  │ Length   │ Direction │
//! │ 8 bytes  │ 8 bytes  │ 1 byte    │
//! │ u64 LE   │ u64 LE   │           │
//! └──────────┴──────────┴───────────┘
//! ```
//!
//! All multi-byte integers are Little Endian. A write request is followed by
//! exactly `length` payload bytes; a read request has no payload and the host
//! answers with `length` raw bytes from the store.

/// Header size in bytes (fixed, exactly 17).
pub const HEADER_SIZE: usize = 17;

/// Direction byte constants.
///
/// Only the zero/nonzero distinction matters on the wire: the bus master is
/// free to send any nonzero value for a write.
pub mod direction {
    /// Read request: the host replies with `length` bytes from the store.
    pub const READ: u8 = 0;
    /// Write request: `length` payload bytes follow the header.
    pub const WRITE: u8 = 1;
}

/// Decoded header from wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Start address in the store.
    pub address: u64,
    /// Transfer length in bytes.
    pub length: u64,
    /// Direction byte (0 = read, nonzero = write).
    pub direction: u8,
}

impl Header {
    /// Create a new header.
    pub fn new(address: u64, length: u64, direction: u8) -> Self {
        Self {
            address,
            length,
            direction,
        }
    }

    /// Create a read request header.
    pub fn read(address: u64, length: u64) -> Self {
        Self::new(address, length, direction::READ)
    }

    /// Create a write request header.
    pub fn write(address: u64, length: u64) -> Self {
        Self::new(address, length, direction::WRITE)
    }

    /// Encode header to bytes (Little Endian).
    ///
    /// # Example
    ///
    /// ```
    /// use ramlink::protocol::Header;
    ///
    /// let header = Header::write(0x10, 4);
    /// let bytes = header.encode();
    /// assert_eq!(bytes.len(), 17);
    /// ```
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        self.encode_into(&mut buf);
        buf
    }

    /// Encode header into an existing buffer.
    ///
    /// # Panics
    ///
    /// Panics if buffer is smaller than `HEADER_SIZE` (17 bytes).
    pub fn encode_into(&self, buf: &mut [u8]) {
        debug_assert!(buf.len() >= HEADER_SIZE);
        buf[0..8].copy_from_slice(&self.address.to_le_bytes());
        buf[8..16].copy_from_slice(&self.length.to_le_bytes());
        buf[16] = self.direction;
    }

    /// Decode header from bytes (Little Endian).
    ///
    /// Returns `None` if buffer is too short. Any 17-byte sequence decodes to
    /// some header; range validity is checked by the store access, not here.
    ///
    /// # Example
    ///
    /// ```
    /// use ramlink::protocol::Header;
    ///
    /// let mut bytes = [0u8; 17];
    /// bytes[0] = 1; // address = 1
    /// bytes[8] = 2; // length = 2
    /// bytes[16] = 1; // write
    /// let header = Header::decode(&bytes).unwrap();
    /// assert_eq!(header.address, 1);
    /// assert_eq!(header.length, 2);
    /// assert!(header.is_write());
    /// ```
    pub fn decode(buf: &[u8]) -> Option<Self> {
        if buf.len() < HEADER_SIZE {
            return None;
        }
        Some(Self {
            address: u64::from_le_bytes(buf[0..8].try_into().expect("slice is 8 bytes")),
            length: u64::from_le_bytes(buf[8..16].try_into().expect("slice is 8 bytes")),
            direction: buf[16],
        })
    }

    /// Check if this is a write request.
    ///
    /// Any nonzero direction byte counts as a write; dispatch follows the
    /// zero/nonzero boundary, not the canonical 0/1 values.
    #[inline]
    pub fn is_write(&self) -> bool {
        self.direction != 0
    }

    /// Derive the typed request for dispatch.
    #[inline]
    pub fn request(&self) -> Request {
        Request {
            address: self.address,
            length: self.length,
            is_write: self.is_write(),
        }
    }
}

/// A decoded request, immutable for the duration of one protocol cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    /// Start address in the store.
    pub address: u64,
    /// Transfer length in bytes.
    pub length: u64,
    /// Direction of the transfer.
    pub is_write: bool,
}

impl From<Header> for Request {
    fn from(header: Header) -> Self {
        header.request()
    }
}

/// Encode a header to bytes (standalone function).
#[inline]
pub fn encode_header(header: &Header) -> [u8; HEADER_SIZE] {
    header.encode()
}

/// Decode a header from bytes (standalone function).
#[inline]
pub fn decode_header(buf: &[u8]) -> Option<Header> {
    Header::decode(buf)
}

/// Decode a full header buffer into a request.
///
/// Infallible: every 17-byte sequence is some request.
#[inline]
pub fn decode_request(buf: &[u8; HEADER_SIZE]) -> Request {
    Header::decode(buf).expect("buffer has HEADER_SIZE bytes").request()
}
