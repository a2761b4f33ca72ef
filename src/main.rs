//! Host entry point: bind a listener, accept the bus master, serve memory.
//!
//! A deployment against real hardware opens a serial port by name; over a
//! development link the same byte stream rides TCP, so a listen address takes
//! the port name's place. One peer is served at a time, in arrival order.
//!
//! Configuration:
//! - first argument: listen address (default `127.0.0.1:7464`)
//! - `RAMLINK_CAPACITY`: store size in bytes (default 1 MiB)
//! - `RAMLINK_HANDSHAKE`: startup sentinel byte, decimal (off when unset)

use ramlink::store::DEFAULT_CAPACITY;
use ramlink::SessionBuilder;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:7464".to_string());
    let capacity = match std::env::var("RAMLINK_CAPACITY") {
        Ok(value) => value.parse()?,
        Err(_) => DEFAULT_CAPACITY,
    };
    let handshake = match std::env::var("RAMLINK_HANDSHAKE") {
        Ok(value) => Some(value.parse::<u8>()?),
        Err(_) => None,
    };

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, capacity, "ramlink listening");

    loop {
        let (stream, peer) = listener.accept().await?;
        tracing::info!(%peer, "bus master connected");

        let mut builder = SessionBuilder::new().capacity(capacity);
        if let Some(sentinel) = handshake {
            builder = builder.handshake(sentinel);
        }

        match builder.attach(stream).run().await {
            Ok(stats) => tracing::info!(?stats, "session ended"),
            Err(e) => tracing::error!(error = %e, "session failed"),
        }
    }
}
