//! # ramlink
//!
//! Host-side emulation of a random-access memory device behind a serial-style
//! byte link. An external bus master (an FPGA or microcontroller) sends framed
//! read/write requests; the host services them against a fixed-size,
//! zero-initialized byte store and streams read replies back.
//!
//! ## Architecture
//!
//! - **Transport** (byte stream): `available` / `read_exact` / `write`
//!   primitives over any duplex stream
//! - **Protocol**: fixed 17-byte header (address, length, direction),
//!   little-endian, raw payload for writes
//! - **Store**: the emulated memory buffer, exclusively owned by the session
//! - **Session**: the loop tying them together, one request at a time
//!
//! ## Example
//!
//! ```ignore
//! use ramlink::SessionBuilder;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let listener = TcpListener::bind("127.0.0.1:7464").await?;
//!     let (stream, _peer) = listener.accept().await?;
//!
//!     let stats = SessionBuilder::new()
//!         .capacity(1024 * 1024)
//!         .attach(stream)
//!         .run()
//!         .await?;
//!
//!     println!("served {} reads, {} writes", stats.reads, stats.writes);
//!     Ok(())
//! }
//! ```

pub mod device;
pub mod error;
pub mod protocol;
pub mod session;
pub mod store;
pub mod transport;

pub use error::RamLinkError;
pub use session::{Session, SessionBuilder, SessionStats};
pub use store::MemoryStore;
