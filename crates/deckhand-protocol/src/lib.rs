//! Wire protocol for HyperDeck-class recorders.
//!
//! This crate owns both directions of the deck's ASCII protocol:
//!
//! - **Encoding**: [`Command`] values are built through per-command
//!   constructors that validate and default their parameters, then
//!   serialize deterministically to a CRLF-terminated line.
//! - **Decoding**: [`parse_response`] turns a raw receive buffer (which
//!   may hold several physical lines accumulated by the quiet-window read)
//!   into one structured [`Response`].
//!
//! # Wire format
//!
//! ```text
//! outbound:  play: speed: 100 loop: true\r\n
//!            stop\r\n
//! inbound:   208 transport info:\r\n
//!            status: stopped\r\n
//!            timecode: 00:00:00:00\r\n
//!            1: clip.mov 00:00:00:00 00:01:00:00\r\n
//! ```
//!
//! The inbound stream has no message terminator; framing is the session
//! layer's problem (quiet-window reads). The parser here simply folds
//! whatever lines it is handed into a single [`Response`].

pub mod command;
pub mod commands;
pub mod parser;
pub mod response;
mod validation;

pub use command::{Command, Opcode};
pub use commands::{
    ConfigurationOptions, GotoOptions, NotifyOptions, PlayOptions, RecordOptions, RemoteOptions,
    SlotInfoOptions, SlotSelectOptions,
};
pub use parser::parse_response;
pub use response::{Param, Response};
