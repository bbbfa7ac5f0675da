//! Structured form of a deck reply.

use deckhand_core::Timecode;
use serde::Serialize;
use std::fmt;

/// One parameter extracted from a reply buffer.
///
/// The three shapes match the three parameter line forms on the wire.
/// A timecode-valued field is kept distinct from a generic field because
/// a generic value may not contain a colon while a timecode is mostly
/// colons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Param {
    /// `key: value`
    Field { key: String, value: String },
    /// `key: hh:mm:ss:ff`
    Timecode { key: String, value: Timecode },
    /// `id: name in-tc out-tc`
    Clip { id: u32, name: String },
}

/// A parsed reply.
///
/// One `Response` may aggregate parameters from several physical lines
/// when the quiet-window read collected more than one record; the last
/// status line seen wins, parameters accumulate in encounter order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub(crate) code: Option<u16>,
    pub(crate) message: String,
    pub(crate) params: Vec<Param>,
}

impl Response {
    /// The three-digit status code, when the buffer held a status line.
    #[must_use]
    pub const fn code(&self) -> Option<u16> {
        self.code
    }

    /// The status line's message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// All parameters in encounter order.
    #[must_use]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// The value of the first generic or timecode field named `key`.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<String> {
        self.params.iter().find_map(|param| match param {
            Param::Field { key: k, value } if k == key => Some(value.clone()),
            Param::Timecode { key: k, value } if k == key => Some(value.to_string()),
            _ => None,
        })
    }

    /// The first timecode-valued field named `key`.
    #[must_use]
    pub fn timecode(&self, key: &str) -> Option<Timecode> {
        self.params.iter().find_map(|param| match param {
            Param::Timecode { key: k, value } if k == key => Some(*value),
            _ => None,
        })
    }

    /// All generic and timecode fields as key/value string pairs, in
    /// encounter order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, String)> {
        self.params.iter().filter_map(|param| match param {
            Param::Field { key, value } => Some((key.as_str(), value.clone())),
            Param::Timecode { key, value } => Some((key.as_str(), value.to_string())),
            Param::Clip { .. } => None,
        })
    }

    /// All clip-listing entries, in encounter order.
    pub fn clips(&self) -> impl Iterator<Item = (u32, &str)> {
        self.params.iter().filter_map(|param| match param {
            Param::Clip { id, name } => Some((*id, name.as_str())),
            _ => None,
        })
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "[{} {}", code, self.message)?,
            None => write!(f, "[?? {}", self.message)?,
        }
        if !self.params.is_empty() {
            write!(f, " ({} params)", self.params.len())?;
        }
        write!(f, "]")
    }
}
