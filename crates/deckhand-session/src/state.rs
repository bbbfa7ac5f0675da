//! Cached device state.

use serde::Serialize;
use std::collections::HashMap;

/// Last-known device state, mirrored from the deck's replies.
///
/// Four flat buckets plus the clip list. Each bucket is written only by
/// the dispatch step for its status code; no other writer exists. The
/// cache is created empty at session start and merged into as replies
/// arrive, so a bucket stays empty until its query has round-tripped.
///
/// The clip list is kept in the order the deck reported it; clip ids are
/// assigned by the deck and are not guaranteed dense.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviceState {
    pub configuration: HashMap<String, String>,
    pub slot_info: HashMap<String, String>,
    pub device_info: HashMap<String, String>,
    pub transport_info: HashMap<String, String>,
    pub clips: Vec<(u32, String)>,
}

impl DeviceState {
    /// Look up a clip name by id.
    #[must_use]
    pub fn clip_name(&self, id: u32) -> Option<&str> {
        self.clips
            .iter()
            .find(|(clip_id, _)| *clip_id == id)
            .map(|(_, name)| name.as_str())
    }

    /// Drop everything. Used on reconnect so stale values from a previous
    /// session cannot leak into the new one.
    pub fn clear(&mut self) {
        self.configuration.clear();
        self.slot_info.clear();
        self.device_info.clear();
        self.transport_info.clear();
        self.clips.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_lookup() {
        let mut state = DeviceState::default();
        state.clips.push((3, "take.mov".to_string()));
        assert_eq!(state.clip_name(3), Some("take.mov"));
        assert_eq!(state.clip_name(1), None);
    }

    #[test]
    fn serializes_for_state_dumps() {
        let mut state = DeviceState::default();
        state.device_info.insert("model".into(), "HyperDeck".into());
        state.clips.push((1, "a.mov".into()));

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["device_info"]["model"], "HyperDeck");
        assert_eq!(json["clips"][0][1], "a.mov");
    }

    #[test]
    fn clear_empties_every_bucket() {
        let mut state = DeviceState::default();
        state.configuration.insert("a".into(), "b".into());
        state.clips.push((1, "x.mov".into()));
        state.clear();
        assert_eq!(state, DeviceState::default());
    }
}
