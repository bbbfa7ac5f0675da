//! TCP transport for the deck's line protocol.
//!
//! The deck speaks plain ASCII over one TCP connection and frames nothing:
//! a reply is simply whatever bytes arrive before the line goes quiet.
//! This module owns that read strategy (`receive_until_quiet`) along with
//! connect/close lifecycle and raw sends.
//!
//! # Architecture
//!
//! ```text
//! DeckSession
//!     │
//!     ├─> TransportConnection ───(TCP 9993)───> deck
//!     │        │
//!     │        └─> receive_until_quiet (reply framing)
//!     │
//!     └─> parse_response / dispatch
//! ```
//!
//! # Design principles
//!
//! The transport is deliberately thin:
//! - **No automatic retry**: the caller decides reconnect strategy
//! - **No background reader**: strict request/reply, one exchange at a time
//! - **Exclusive ownership**: one connection per session, never shared
//!
//! # Timeout handling
//!
//! Reads are bounded by the caller-supplied window; an expired window is
//! not an error, it is how replies end. Connect has its own timeout, and
//! close bounds its flush/shutdown so a dead network cannot hang teardown.

use crate::config::SessionConfig;
use crate::error::{Result, SessionError};
use bytes::BytesMut;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, info, trace, warn};

/// One exclusively-owned TCP connection to a deck.
///
/// # Connection lifecycle
///
/// 1. Create with `new()`
/// 2. Open with `connect()`
/// 3. Exchange bytes with `send()` / `receive_until_quiet()`
/// 4. Close with `close()` (idempotent)
///
/// Not `Sync` and not shared: the protocol has no way to correlate
/// overlapping requests, so each deck gets its own connection on its own
/// task.
pub struct TransportConnection {
    addr: SocketAddr,
    stream: Option<TcpStream>,
    connect_timeout: Duration,
    quiet_timeout: Duration,
    read_chunk: usize,
}

impl TransportConnection {
    /// Create an unconnected transport from the session configuration.
    #[must_use]
    pub fn new(config: &SessionConfig) -> Self {
        debug!("creating transport for deck at {}", config.addr);
        Self {
            addr: config.addr,
            stream: None,
            connect_timeout: config.connect_timeout,
            quiet_timeout: config.quiet_timeout,
            read_chunk: config.read_chunk,
        }
    }

    /// The configured deck address.
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Whether the transport currently holds an open connection.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Open the TCP connection.
    ///
    /// Sets TCP_NODELAY: every exchange here is a short command line
    /// followed by a wait, exactly the pattern Nagle's algorithm penalizes.
    ///
    /// # Errors
    /// `ConnectTimeout` when the deck does not accept in time, `Io` on
    /// refusal or unreachable network.
    pub async fn connect(&mut self) -> Result<()> {
        info!("connecting to deck at {}", self.addr);

        let stream = match timeout(self.connect_timeout, TcpStream::connect(self.addr)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                warn!("connection to {} failed: {e}", self.addr);
                return Err(e.into());
            }
            Err(_) => {
                warn!(
                    "connection to {} timed out after {}ms",
                    self.addr,
                    self.connect_timeout.as_millis()
                );
                return Err(SessionError::ConnectTimeout(
                    self.connect_timeout.as_millis() as u64,
                ));
            }
        };

        if let Err(e) = stream.set_nodelay(true) {
            warn!("failed to set TCP_NODELAY: {e}");
        }

        self.stream = Some(stream);
        debug!("transport connected");
        Ok(())
    }

    /// Send a raw, already-encoded command line.
    ///
    /// # Errors
    /// `NotConnected` without an open connection, `Io` on write failure.
    pub async fn send(&mut self, buffer: &[u8]) -> Result<usize> {
        let stream = self.stream.as_mut().ok_or(SessionError::NotConnected)?;
        trace!(bytes = buffer.len(), "sending");
        stream.write_all(buffer).await?;
        Ok(buffer.len())
    }

    /// Read until the line goes quiet.
    ///
    /// The first read waits up to `initial_window`; every subsequent read
    /// waits one quiet window. The reply is complete when a read attempt
    /// yields nothing. An empty result means the deck sent nothing at all
    /// within the initial window, which the caller treats as a soft
    /// failure, not an error.
    ///
    /// # Errors
    /// `NotConnected` without an open connection, `Io` on read failure.
    pub async fn receive_until_quiet(&mut self, initial_window: Duration) -> Result<BytesMut> {
        let quiet = self.quiet_timeout;
        let mut buffer = BytesMut::with_capacity(self.read_chunk);
        let mut window = initial_window;

        loop {
            let chunk = self.recv_chunk(window).await?;
            if chunk.is_empty() {
                break;
            }
            buffer.extend_from_slice(&chunk);
            window = quiet;
        }

        trace!(bytes = buffer.len(), "receive complete");
        Ok(buffer)
    }

    /// One bounded read attempt. Returns an empty vec on window expiry or
    /// an orderly close by the deck.
    async fn recv_chunk(&mut self, window: Duration) -> Result<Vec<u8>> {
        let read_chunk = self.read_chunk;
        let stream = self.stream.as_mut().ok_or(SessionError::NotConnected)?;

        let mut chunk = vec![0u8; read_chunk];
        match timeout(window, stream.read(&mut chunk)).await {
            Ok(Ok(n)) => {
                chunk.truncate(n);
                Ok(chunk)
            }
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Ok(Vec::new()),
        }
    }

    /// Close the connection. Idempotent; safe to call when already closed.
    ///
    /// Flush and shutdown are each bounded to 500ms so a dead network
    /// cannot stall teardown; either failing is logged, not raised, and
    /// the stream is dropped regardless.
    pub async fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            info!("closing connection to {}", self.addr);

            let bound = Duration::from_millis(500);
            match timeout(bound, stream.flush()).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!("error flushing during close: {e}"),
                Err(_) => warn!("flush timed out during close"),
            }
            match timeout(bound, stream.shutdown()).await {
                Ok(Ok(())) => debug!("connection shut down cleanly"),
                Ok(Err(e)) => warn!("error shutting down connection: {e}"),
                Err(_) => warn!("shutdown timed out during close"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpListener;

    fn config_for(addr: SocketAddr) -> SessionConfig {
        SessionConfig {
            addr,
            // Generous quiet window so scheduling jitter cannot split a
            // reply in two during the test.
            quiet_timeout: Duration::from_millis(200),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn connect_and_close_round_trip() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mut transport = TransportConnection::new(&config_for(listener.local_addr().unwrap()));

        assert!(!transport.is_connected());
        transport.connect().await.unwrap();
        assert!(transport.is_connected());

        transport.close().await;
        assert!(!transport.is_connected());
        // Idempotent.
        transport.close().await;
    }

    #[tokio::test]
    async fn send_without_connection_fails() {
        let config = SessionConfig::default();
        let mut transport = TransportConnection::new(&config);
        assert!(matches!(
            transport.send(b"ping\r\n").await,
            Err(SessionError::NotConnected)
        ));
    }

    #[tokio::test]
    async fn quiet_window_ends_the_read() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mut transport = TransportConnection::new(&config_for(listener.local_addr().unwrap()));
        transport.connect().await.unwrap();

        let (mut peer, _) = listener.accept().await.unwrap();
        tokio::spawn(async move {
            // Two bursts inside the quiet window, then silence, then a
            // late burst that must not be folded into the first reply.
            peer.write_all(b"208 transport info:\r\n").await.unwrap();
            tokio::time::sleep(Duration::from_millis(50)).await;
            peer.write_all(b"status: stopped\r\n").await.unwrap();
            tokio::time::sleep(Duration::from_millis(600)).await;
            peer.write_all(b"200 ok\r\n").await.unwrap();
        });

        let first = transport
            .receive_until_quiet(Duration::from_secs(2))
            .await
            .unwrap();
        assert_eq!(&first[..], b"208 transport info:\r\nstatus: stopped\r\n");

        let second = transport
            .receive_until_quiet(Duration::from_secs(2))
            .await
            .unwrap();
        assert_eq!(&second[..], b"200 ok\r\n");
    }

    #[tokio::test]
    async fn silent_peer_yields_empty_buffer() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mut transport = TransportConnection::new(&config_for(listener.local_addr().unwrap()));
        transport.connect().await.unwrap();
        let _peer = listener.accept().await.unwrap();

        let buffer = transport
            .receive_until_quiet(Duration::from_millis(100))
            .await
            .unwrap();
        assert!(buffer.is_empty());
    }
}
