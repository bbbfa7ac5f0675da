use thiserror::Error;

/// Errors surfaced by the session layer.
///
/// Only transport failures and handshake failures are errors here.
/// Protocol-semantic anomalies (unexpected status code, error-range codes,
/// an empty read window) are absorbed and logged so a single flaky
/// exchange does not tear down a working session; callers that need
/// certainty inspect the `matched` flag returned by `send_message`.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Operation attempted without an open transport.
    #[error("not connected to the deck")]
    NotConnected,

    /// TCP connect did not complete in time.
    #[error("connection timeout after {0}ms")]
    ConnectTimeout(u64),

    /// A mandatory handshake step failed during connect.
    #[error("handshake failed: {0}")]
    Handshake(String),

    /// Command construction or response parsing failed.
    #[error("protocol error: {0}")]
    Protocol(#[from] deckhand_core::Error),

    /// Low-level I/O failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SessionError>;
