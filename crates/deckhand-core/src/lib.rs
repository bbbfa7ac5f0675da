//! Core types shared across the deckhand workspace.
//!
//! This crate defines the vocabulary of the deck's line-oriented ASCII
//! protocol: the status-code constants, the enumerated legal value sets for
//! command parameters, the [`Timecode`] wire value, and the shared error
//! taxonomy. It has no I/O and no protocol logic of its own; the encoding
//! and parsing live in `deckhand-protocol`, the socket handling in
//! `deckhand-session`.

pub mod constants;
pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{AudioInput, RecordingCodec, Timecode, VideoFormat, VideoInput};
