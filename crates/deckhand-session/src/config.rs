//! Session configuration.

use deckhand_core::constants::{
    BANNER_TIMEOUT_SECS, COMMAND_TIMEOUT_SECS, CONNECT_TIMEOUT_SECS, DEFAULT_PORT,
    QUIET_TIMEOUT_MS, REPLY_CHUNK_SIZE,
};
use std::net::SocketAddr;
use std::time::Duration;

/// Configuration for a deck session.
///
/// The defaults match the documented protocol timings; the only field most
/// callers set is `addr`. The timeouts deserve care: `quiet_timeout` is the
/// response framing mechanism itself, not a failure bound. The deck sends
/// no terminator, so a reply is considered complete once the socket stays
/// silent for one quiet window. Raising it makes every exchange slower;
/// lowering it risks truncating multi-line replies from a busy deck.
///
/// # Example
///
/// ```
/// use deckhand_session::SessionConfig;
///
/// let config = SessionConfig {
///     addr: "192.168.10.50:9993".parse().unwrap(),
///     ..Default::default()
/// };
/// assert_eq!(config.quiet_timeout.as_millis(), 100);
/// ```
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Deck address. The protocol listens on port 9993.
    pub addr: SocketAddr,

    /// Timeout for establishing the TCP connection.
    pub connect_timeout: Duration,

    /// Timeout for the initial 500 banner after the socket opens.
    pub banner_timeout: Duration,

    /// Overall bound on one command/response exchange.
    pub command_timeout: Duration,

    /// Silence window that ends a reply read.
    pub quiet_timeout: Duration,

    /// Maximum bytes pulled from the socket per read attempt.
    pub read_chunk: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            banner_timeout: Duration::from_secs(BANNER_TIMEOUT_SECS),
            command_timeout: Duration::from_secs(COMMAND_TIMEOUT_SECS),
            quiet_timeout: Duration::from_millis(QUIET_TIMEOUT_MS),
            read_chunk: REPLY_CHUNK_SIZE,
        }
    }
}
