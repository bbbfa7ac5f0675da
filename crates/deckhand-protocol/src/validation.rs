//! Parameter validation for command construction.
//!
//! The deck rejects whole commands on a single bad parameter, so invalid
//! values are never serialized. Out-of-range or unknown values are replaced
//! with the documented default for that parameter and the substitution is
//! logged at warn level. Callers that need a hard failure validate before
//! building the command.

use crate::command::Command;
use std::fmt::Display;
use std::ops::RangeInclusive;
use tracing::warn;

impl Command {
    /// Push an enumerated parameter, substituting `default` when `value`
    /// is not in `legal`.
    pub(crate) fn push_enum(
        &mut self,
        key: &'static str,
        value: &str,
        legal: &'static [&'static str],
        default: &'static str,
    ) {
        let value = if legal.contains(&value) {
            value.to_string()
        } else {
            warn!(
                command = %self.opcode(),
                key,
                value,
                default,
                "unknown parameter value, substituting default"
            );
            default.to_string()
        };
        self.params_mut().push((key, value));
    }

    /// Push an integer parameter, substituting `default` when `value`
    /// falls outside `range`.
    pub(crate) fn push_int(
        &mut self,
        key: &'static str,
        value: i64,
        range: RangeInclusive<i64>,
        default: i64,
    ) {
        let value = if range.contains(&value) {
            value
        } else {
            warn!(
                command = %self.opcode(),
                key,
                value,
                default,
                "parameter out of range, substituting default"
            );
            default
        };
        self.params_mut().push((key, value.to_string()));
    }

    /// Push a free-form string parameter, substituting `default` when
    /// `value` is empty.
    pub(crate) fn push_string(&mut self, key: &'static str, value: &str, default: &'static str) {
        let value = if value.is_empty() {
            warn!(
                command = %self.opcode(),
                key,
                default,
                "empty parameter value, substituting default"
            );
            default
        } else {
            value
        };
        self.params_mut().push((key, value.to_string()));
    }

    /// Push a boolean parameter as the wire tokens `true`/`false`.
    ///
    /// Booleans have no invalid representation here, so no substitution
    /// path exists.
    pub(crate) fn push_bool(&mut self, key: &'static str, value: bool) {
        self.params_mut().push((key, value.to_string()));
    }

    /// Push a value whose validity the caller has already established.
    pub(crate) fn push_raw(&mut self, key: &'static str, value: impl Display) {
        self.params_mut().push((key, value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Opcode;

    #[test]
    fn enum_miss_substitutes_default() {
        let mut cmd = Command::new(Opcode::Configuration);
        cmd.push_enum("video input", "DisplayPort", &["SDI", "HDMI"], "SDI");
        assert_eq!(cmd.params(), &[("video input", "SDI".to_string())]);
    }

    #[test]
    fn int_out_of_range_substitutes_default() {
        let mut cmd = Command::new(Opcode::Play);
        cmd.push_int("speed", 500, 1..=200, 100);
        assert_eq!(cmd.params(), &[("speed", "100".to_string())]);
    }

    #[test]
    fn int_boundary_values_pass() {
        let mut cmd = Command::new(Opcode::Play);
        cmd.push_int("speed", 1, 1..=200, 100);
        cmd.push_int("speed", 200, 1..=200, 100);
        assert_eq!(
            cmd.params(),
            &[("speed", "1".to_string()), ("speed", "200".to_string())]
        );
    }

    #[test]
    fn empty_string_substitutes_default() {
        let mut cmd = Command::new(Opcode::Record);
        cmd.push_string("name", "", "testclip");
        assert_eq!(cmd.params(), &[("name", "testclip".to_string())]);
    }

    #[test]
    fn bool_serializes_lowercase() {
        let mut cmd = Command::new(Opcode::Play);
        cmd.push_bool("loop", true);
        cmd.push_bool("single clip", false);
        assert_eq!(
            cmd.params(),
            &[
                ("loop", "true".to_string()),
                ("single clip", "false".to_string())
            ]
        );
    }
}
