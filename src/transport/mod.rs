//! Transport module - byte-stream primitives over a duplex link.
//!
//! The core treats the link as an external collaborator exposing exactly
//! three operations: "bytes available", "read exactly N" (suspending until
//! satisfied) and "write bytes". In production the stream is whatever carries
//! the serial link (a socket here); tests use `tokio::io::duplex`.

mod reader;
mod writer;

pub use reader::TransportReader;
pub use writer::TransportWriter;
