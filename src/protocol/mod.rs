//! Protocol module - wire format and framing.
//!
//! This module implements the binary request protocol spoken by the bus
//! master:
//! - 17-byte header encoding/decoding
//! - Typed [`Request`] view used for dispatch
//! - [`Frame`] struct pairing a header with its payload

mod frame;
mod wire_format;

pub use frame::{build_frame, Frame};
pub use wire_format::{
    decode_header, decode_request, direction, encode_header, Header, Request, HEADER_SIZE,
};
