//! Response dispatch.
//!
//! Each status code maps to one handler that mutates [`DeviceState`].
//! Two handlers additionally react: an observed notification subscription
//! is switched back off, and a lapsed remote-control grant is re-enabled.
//! Those reactions are returned as follow-up commands rather than sent
//! here, which keeps dispatch a pure function over the cache and lets the
//! session own all socket traffic.

use crate::state::DeviceState;
use deckhand_core::constants::{
    CODE_CLIPS_INFO, CODE_CONFIGURATION, CODE_DEVICE_INFO, CODE_INITIAL_STATUS, CODE_NOTIFY,
    CODE_OK, CODE_REMOTE, CODE_SLOT_INFO, CODE_TRANSPORT_INFO, ERROR_CODE_RANGE,
};
use deckhand_protocol::{Command, Response};
use std::collections::HashMap;
use tracing::{debug, error, warn};

/// Apply a reply to the cache. Returns a follow-up command when the reply
/// demands a corrective send.
pub(crate) fn apply(state: &mut DeviceState, response: &Response) -> Option<Command> {
    let Some(code) = response.code() else {
        debug!(%response, "response without a status code, nothing to dispatch");
        return None;
    };

    match code {
        CODE_OK => None,
        CODE_SLOT_INFO => {
            merge(&mut state.slot_info, response);
            None
        }
        CODE_DEVICE_INFO | CODE_INITIAL_STATUS => {
            merge(&mut state.device_info, response);
            None
        }
        CODE_CLIPS_INFO => {
            state.clips = response
                .clips()
                .map(|(id, name)| (id, name.to_string()))
                .collect();
            None
        }
        CODE_TRANSPORT_INFO => {
            merge(&mut state.transport_info, response);
            None
        }
        CODE_NOTIFY => handle_notify(response),
        CODE_REMOTE => handle_remote(response),
        CODE_CONFIGURATION => {
            merge(&mut state.configuration, response);
            None
        }
        code if ERROR_CODE_RANGE.contains(&code) => {
            error!(%response, "deck reported a protocol error");
            None
        }
        _ => {
            warn!(%response, "unhandled response code");
            None
        }
    }
}

fn merge(bucket: &mut HashMap<String, String>, response: &Response) {
    bucket.extend(response.fields().map(|(key, value)| (key.to_string(), value)));
}

/// Notifications cannot be told apart from solicited replies in a strict
/// request/reply design, so any category seen enabled is turned straight
/// back off.
fn handle_notify(response: &Response) -> Option<Command> {
    let enabled = response.fields().any(|(_, value)| value == "true");
    if enabled {
        warn!(%response, "notification category enabled, squelching");
        return Some(Command::notify_all_off());
    }
    None
}

/// Remote control is a precondition for every transport command; re-enable
/// it whenever the deck reports it lapsed.
fn handle_remote(response: &Response) -> Option<Command> {
    match response.field("enabled").as_deref() {
        Some("true") => None,
        _ => {
            debug!(%response, "remote control not enabled, re-enabling");
            Some(Command::remote_enable())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckhand_protocol::parse_response;

    fn response(raw: &[u8]) -> Response {
        parse_response(raw).unwrap()
    }

    #[test]
    fn slot_info_touches_only_its_bucket() {
        let mut state = DeviceState::default();
        let follow_up = apply(
            &mut state,
            &response(b"202 slot info:\r\nstatus: mounted\r\nslot id: 1\r\n"),
        );
        assert!(follow_up.is_none());
        assert_eq!(state.slot_info.get("status").map(String::as_str), Some("mounted"));
        assert!(state.configuration.is_empty());
        assert!(state.device_info.is_empty());
        assert!(state.transport_info.is_empty());
        assert!(state.clips.is_empty());
    }

    #[test]
    fn banner_and_device_info_share_a_bucket() {
        let mut state = DeviceState::default();
        apply(&mut state, &response(b"500 connection info:\r\nmodel: HyperDeck\r\n"));
        apply(
            &mut state,
            &response(b"204 device info:\r\nprotocol version: 1.8\r\n"),
        );
        assert_eq!(state.device_info.len(), 2);
    }

    #[test]
    fn clips_are_replaced_wholesale() {
        let mut state = DeviceState::default();
        state.clips = vec![(9, "stale.mov".to_string())];
        apply(
            &mut state,
            &response(b"205 clips info:\r\n1: a.mov 00:00:00:00 00:01:00:00\r\n"),
        );
        assert_eq!(state.clips, vec![(1, "a.mov".to_string())]);
    }

    #[test]
    fn ack_is_a_no_op() {
        let mut state = DeviceState::default();
        assert!(apply(&mut state, &response(b"200 ok\r\n")).is_none());
        assert_eq!(state, DeviceState::default());
    }

    #[test]
    fn enabled_notification_triggers_all_off() {
        let mut state = DeviceState::default();
        let follow_up = apply(
            &mut state,
            &response(b"209 notify:\r\ntransport: false\r\nslot: true\r\n"),
        );
        assert_eq!(follow_up, Some(Command::notify_all_off()));
    }

    #[test]
    fn all_off_notification_needs_no_follow_up() {
        let mut state = DeviceState::default();
        let follow_up = apply(
            &mut state,
            &response(b"209 notify:\r\ntransport: false\r\nslot: false\r\n"),
        );
        assert!(follow_up.is_none());
    }

    #[test]
    fn lapsed_remote_triggers_enable() {
        let mut state = DeviceState::default();
        let absent = apply(&mut state, &response(b"210 remote info:\r\n"));
        assert_eq!(absent, Some(Command::remote_enable()));

        let disabled = apply(
            &mut state,
            &response(b"210 remote info:\r\nenabled: false\r\n"),
        );
        assert_eq!(disabled, Some(Command::remote_enable()));

        let enabled = apply(
            &mut state,
            &response(b"210 remote info:\r\nenabled: true\r\n"),
        );
        assert!(enabled.is_none());
    }

    #[test]
    fn error_range_codes_mutate_nothing() {
        let mut state = DeviceState::default();
        assert!(apply(&mut state, &response(b"102 protocol error\r\n")).is_none());
        assert_eq!(state, DeviceState::default());
    }

    #[test]
    fn unmapped_codes_are_ignored() {
        let mut state = DeviceState::default();
        assert!(apply(&mut state, &response(b"300 whatever\r\n")).is_none());
        assert_eq!(state, DeviceState::default());
    }
}
