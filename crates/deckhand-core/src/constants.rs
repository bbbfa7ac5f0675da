//! Protocol-level constants for the deck control protocol.
//!
//! The deck speaks a line-oriented ASCII protocol over TCP. Every exchange
//! is a command line terminated by CRLF, answered by a status line and zero
//! or more parameter lines. There is **no** end-of-message marker on the
//! wire: the only framing mechanism is a quiet window on the socket (see
//! [`QUIET_TIMEOUT_MS`]).
//!
//! # Message shapes
//!
//! ```text
//! outbound:  <opcode>\r\n
//!            <opcode>: <key>: <value> <key>: <value>\r\n
//! inbound:   <3-digit code> <message>:\r\n
//!            <key>: <value>\r\n
//!            <key>: hh:mm:ss:ff\r\n
//!            <clip id>: <name> <in-tc> <out-tc>\r\n
//! ```

// ============================================================================
// Transport defaults
// ============================================================================

/// TCP port the deck listens on.
pub const DEFAULT_PORT: u16 = 9993;

/// Maximum number of bytes pulled from the socket in one read attempt.
pub const REPLY_CHUNK_SIZE: usize = 1024;

/// Inactivity window that terminates an in-progress response read.
///
/// The wire format carries no message terminator, so a read attempt that
/// yields no bytes within this window is treated as "the response is
/// complete". A sender slower than this window would have its reply split
/// across two logical responses; that fragility is inherited from the
/// protocol and deliberately kept.
pub const QUIET_TIMEOUT_MS: u64 = 100;

/// Read window for the mandatory 500 boot banner sent right after connect.
pub const BANNER_TIMEOUT_SECS: u64 = 3;

/// Default overall timeout for one command/response exchange.
pub const COMMAND_TIMEOUT_SECS: u64 = 5;

/// Connect timeout for the initial TCP handshake.
pub const CONNECT_TIMEOUT_SECS: u64 = 3;

// ============================================================================
// Status codes
// ============================================================================

/// Plain acknowledgement for setter-style commands.
pub const CODE_OK: u16 = 200;

/// Reply to a `slot info` query.
pub const CODE_SLOT_INFO: u16 = 202;

/// Reply to a `device info` query.
pub const CODE_DEVICE_INFO: u16 = 204;

/// Reply to a `clips get` query (clip listing).
pub const CODE_CLIPS_INFO: u16 = 205;

/// Reply to a `transport info` query.
pub const CODE_TRANSPORT_INFO: u16 = 208;

/// Reply to a bare `notify` query (notification category states).
pub const CODE_NOTIFY: u16 = 209;

/// Reply to a bare `remote` query (remote-control state).
pub const CODE_REMOTE: u16 = 210;

/// Reply to a bare `configuration` query.
pub const CODE_CONFIGURATION: u16 = 211;

/// Unsolicited status message the deck sends once upon connection.
///
/// Carries the same payload shape as a `device info` reply and is folded
/// into the same state bucket.
pub const CODE_INITIAL_STATUS: u16 = 500;

/// Inclusive bounds of the deck's error status range.
///
/// Codes in this range indicate a device-reported error. The session logs
/// them and keeps going; they are never surfaced as a Rust error, so a
/// transient device complaint cannot tear down a working session.
pub const ERROR_CODE_RANGE: std::ops::RangeInclusive<u16> = 100..=199;
