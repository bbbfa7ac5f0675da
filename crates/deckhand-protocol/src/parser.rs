//! Reply tokenizer.
//!
//! The deck's replies carry no length prefix or terminator, so the session
//! layer hands over whatever bytes accumulated before the line went quiet.
//! That buffer is split into physical lines and each line is classified by
//! trying four shapes in priority order:
//!
//! 1. status line, `NNN message:?`
//! 2. clip listing, `id: name in-tc out-tc`
//! 3. timecode field, `key: hh:mm:ss:ff`
//! 4. generic field, `key: value`
//!
//! The timecode shape must be tried before the generic one: a timecode
//! value is full of colons, which the generic shape forbids in its value.
//! Lines matching none of the shapes are skipped with a trace log rather
//! than failing the whole buffer, since a slow deck can split a record
//! across two receive cycles.

use crate::response::{Param, Response};
use deckhand_core::{Error, Result, Timecode};
use tracing::trace;

/// Parse a raw receive buffer into one [`Response`].
///
/// Parameters accumulate in encounter order across all lines; if more than
/// one status line is present the last one wins.
///
/// # Errors
/// Returns `Error::MalformedResponse` when the buffer is empty.
pub fn parse_response(buffer: &[u8]) -> Result<Response> {
    if buffer.is_empty() {
        return Err(Error::MalformedResponse);
    }

    let text = String::from_utf8_lossy(buffer);
    let mut response = Response {
        code: None,
        message: String::new(),
        params: Vec::new(),
    };

    for line in text.split(['\r', '\n']) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((code, message)) = try_status(line) {
            response.code = Some(code);
            response.message = message;
        } else if let Some(param) = try_clip(line)
            .or_else(|| try_timecode_field(line))
            .or_else(|| try_generic_field(line))
        {
            response.params.push(param);
        } else {
            trace!(line, "skipping unclassifiable reply line");
        }
    }

    Ok(response)
}

/// `NNN message` or `NNN message:` with a non-empty message.
fn try_status(line: &str) -> Option<(u16, String)> {
    let bytes = line.as_bytes();
    if bytes.len() < 3 || !bytes[..3].iter().all(u8::is_ascii_digit) {
        return None;
    }
    if bytes.len() > 3 && !bytes[3].is_ascii_whitespace() {
        return None;
    }
    let code = line[..3].parse().ok()?;
    let rest = line[3..].trim_start();
    let message = rest.split(':').next().unwrap_or("").trim();
    if message.is_empty() {
        return None;
    }
    Some((code, message.to_string()))
}

/// `id: name in-tc out-tc`. The name may itself contain spaces; the two
/// trailing timecodes disambiguate where it ends.
fn try_clip(line: &str) -> Option<Param> {
    let (prefix, rest) = line.split_once(':')?;
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let id = prefix.parse().ok()?;

    let tokens: Vec<&str> = rest.split_whitespace().collect();
    let [name @ .., in_tc, out_tc] = tokens.as_slice() else {
        return None;
    };
    if name.is_empty() || !Timecode::matches(in_tc) || !Timecode::matches(out_tc) {
        return None;
    }
    Some(Param::Clip {
        id,
        name: name.join(" "),
    })
}

/// `key: hh:mm:ss:ff`. The key may not contain a colon.
fn try_timecode_field(line: &str) -> Option<Param> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    let value = Timecode::parse(value.trim()).ok()?;
    Some(Param::Timecode {
        key: key.to_string(),
        value,
    })
}

/// `key: value` where neither side contains a colon.
fn try_generic_field(line: &str) -> Option<Param> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() || value.is_empty() || value.contains(':') {
        return None;
    }
    Some(Param::Field {
        key: key.to_string(),
        value: value.to_string(),
    })
}
