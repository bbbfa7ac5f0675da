//! Session layer for HyperDeck-class recorders.
//!
//! Owns everything between the raw socket and the caller: the quiet-window
//! reply framing, the connect handshake, the command/response exchange,
//! and the cached [`DeviceState`] that dispatch keeps current.
//!
//! The design is strictly request/reply. The protocol has no message
//! terminator and no way to correlate overlapping requests, so the session
//! sends one command, reads until the line goes quiet, dispatches, and
//! only then accepts the next command. Unsolicited notifications are
//! disabled during the handshake and squelched again whenever one is
//! observed.

pub mod config;
mod dispatch;
pub mod error;
pub mod session;
pub mod state;
pub mod transport;

pub use config::SessionConfig;
pub use error::{Result, SessionError};
pub use session::DeckSession;
pub use state::DeviceState;
pub use transport::TransportConnection;
