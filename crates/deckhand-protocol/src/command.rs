//! Outbound command values and their wire serialization.

use deckhand_core::constants::CODE_OK;
use serde::Serialize;
use std::fmt;

/// The command tokens the deck understands.
///
/// Multi-word tokens ("slot info", "clips get") are single opcodes on the
/// wire; the colon that may follow them belongs to the parameter list, not
/// the opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Opcode {
    Play,
    Record,
    Stop,
    Notify,
    Remote,
    Configuration,
    SlotSelect,
    Goto,
    DeviceInfo,
    SlotInfo,
    ClipsGet,
    TransportInfo,
    Quit,
    Ping,
}

impl Opcode {
    /// The wire token for this opcode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Opcode::Play => "play",
            Opcode::Record => "record",
            Opcode::Stop => "stop",
            Opcode::Notify => "notify",
            Opcode::Remote => "remote",
            Opcode::Configuration => "configuration",
            Opcode::SlotSelect => "slot select",
            Opcode::Goto => "goto",
            Opcode::DeviceInfo => "device info",
            Opcode::SlotInfo => "slot info",
            Opcode::ClipsGet => "clips get",
            Opcode::TransportInfo => "transport info",
            Opcode::Quit => "quit",
            Opcode::Ping => "ping",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fully-built outbound command.
///
/// Immutable once constructed: the per-command constructors in
/// [`crate::commands`] validate and default every parameter before the
/// value exists, so a `Command` always serializes to a legal line.
/// Parameters keep their declaration order, which makes [`encode`]
/// deterministic.
///
/// [`encode`]: Command::encode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Command {
    opcode: Opcode,
    params: Vec<(&'static str, String)>,
    expects: u16,
}

impl Command {
    pub(crate) fn new(opcode: Opcode) -> Self {
        Command {
            opcode,
            params: Vec::new(),
            expects: CODE_OK,
        }
    }

    pub(crate) fn with_expects(mut self, code: u16) -> Self {
        self.expects = code;
        self
    }

    pub(crate) fn params_mut(&mut self) -> &mut Vec<(&'static str, String)> {
        &mut self.params
    }

    /// The command's opcode.
    #[must_use]
    pub const fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// The validated protocol parameters, in serialization order.
    #[must_use]
    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    /// The status code the sender considers success for this command.
    ///
    /// Used to detect protocol drift only; dispatch is keyed on the code
    /// the deck actually returned.
    #[must_use]
    pub const fn expects(&self) -> u16 {
        self.expects
    }

    /// Serialize to the CRLF-terminated wire line.
    ///
    /// `opcode\r\n` when there are no parameters, otherwise
    /// `opcode: key: value key: value\r\n`.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut line = String::from(self.opcode.as_str());
        if !self.params.is_empty() {
            line.push(':');
            for (key, value) in &self.params {
                line.push(' ');
                line.push_str(key);
                line.push_str(": ");
                line.push_str(value);
            }
        }
        line.push_str("\r\n");
        line.into_bytes()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}", self.opcode)?;
        for (key, value) in &self.params {
            write!(f, " {key}: {value}")?;
        }
        write!(f, "]")
    }
}
