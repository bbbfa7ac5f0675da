use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Parse errors
    #[error("cannot parse a response from an empty buffer")]
    MalformedResponse,

    #[error("invalid timecode: {0}")]
    InvalidTimecode(String),

    #[error("invalid status code: {0}")]
    InvalidStatusCode(String),

    // Command construction errors
    #[error("invalid use of '{opcode}': {message}")]
    InvalidCommand {
        opcode: &'static str,
        message: String,
    },

    #[error("unknown {set} value: {value}")]
    UnknownEnumValue { set: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;
