use crate::{Result, error::Error};
use serde::{Deserialize, Serialize};
use std::fmt;

/// SMPTE-style timecode as carried on the wire: `hh:mm:ss:ff`.
///
/// Each field is exactly two digits. The deck does not document frame-rate
/// bounds in the protocol itself, so no range validation beyond the
/// two-digit shape is applied; `99:99:99:99` round-trips unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timecode {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub frames: u8,
}

impl Timecode {
    /// The zero timecode, `00:00:00:00`.
    #[must_use]
    pub const fn zero() -> Self {
        Timecode {
            hours: 0,
            minutes: 0,
            seconds: 0,
            frames: 0,
        }
    }

    /// Parse from the wire shape `hh:mm:ss:ff`.
    ///
    /// # Errors
    /// Returns `Error::InvalidTimecode` unless the input is exactly four
    /// two-digit groups separated by colons.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidTimecode(s.to_string());

        let mut fields = [0u8; 4];
        let mut parts = s.split(':');
        for field in &mut fields {
            let part = parts.next().ok_or_else(invalid)?;
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            *field = part.parse().map_err(|_| invalid())?;
        }
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Timecode {
            hours: fields[0],
            minutes: fields[1],
            seconds: fields[2],
            frames: fields[3],
        })
    }

    /// Returns `true` if `s` has the `hh:mm:ss:ff` shape.
    #[must_use]
    pub fn matches(s: &str) -> bool {
        Self::parse(s).is_ok()
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds, self.frames
        )
    }
}

impl std::str::FromStr for Timecode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Timecode::parse(s)
    }
}

/// Declares the legal wire values of an enumerated command parameter.
///
/// The codec validates enumerated parameters against these sets and
/// silently substitutes the documented default on a miss, so the sets
/// themselves are the single source of truth for what the deck accepts.
macro_rules! protocol_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $set:literal {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// The wire token for this value.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }

            /// All legal wire tokens for this parameter.
            #[must_use]
            pub const fn wire_values() -> &'static [&'static str] {
                &[$($wire),+]
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err(Error::UnknownEnumValue {
                        set: $set,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

protocol_enum! {
    /// Selectable video input sources.
    VideoInput, "video input" {
        Sdi => "SDI",
        Hdmi => "HDMI",
        Component => "component",
    }
}

protocol_enum! {
    /// Selectable audio input sources.
    AudioInput, "audio input" {
        Embedded => "embedded",
        Xlr => "XLR",
        Rca => "RCA",
    }
}

protocol_enum! {
    /// Recording codecs selectable through the `file format` parameter.
    RecordingCodec, "file format" {
        QuickTimeUncompressed => "QuickTimeUncompressed",
        QuickTimeProResHq => "QuickTimeProResHQ",
        QuickTimeProRes => "QuickTimeProRes",
        QuickTimeProResLt => "QuickTimeProResLT",
        QuickTimeProResProxy => "QuickTimeProResProxy",
        QuickTimeDnxHd220 => "QuickTimeDNxHD220",
        DnxHd220 => "DNxHD220",
    }
}

protocol_enum! {
    /// Video formats accepted by `slot select`'s `video format` parameter.
    VideoFormat, "video format" {
        Ntsc => "NTSC",
        Pal => "PAL",
        NtscP => "NTSCp",
        PalP => "PALp",
        Hd720p50 => "720p50",
        Hd720p5994 => "720p5994",
        Hd720p60 => "720p60",
        Hd1080p23976 => "1080p23976",
        Hd1080p24 => "1080p24",
        Hd1080p25 => "1080p25",
        Hd1080p2997 => "1080p2997",
        Hd1080p30 => "1080p30",
        Hd1080i50 => "1080i50",
        Hd1080i5994 => "1080i5994",
        Hd1080i60 => "1080i60",
        Uhd4Kp23976 => "4Kp23976",
        Uhd4Kp24 => "4Kp24",
        Uhd4Kp25 => "4Kp25",
        Uhd4Kp2997 => "4Kp2997",
        Uhd4Kp30 => "4Kp30",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("00:00:00:00", Timecode::zero())]
    #[case("01:02:03:04", Timecode { hours: 1, minutes: 2, seconds: 3, frames: 4 })]
    #[case("23:59:59:24", Timecode { hours: 23, minutes: 59, seconds: 59, frames: 24 })]
    #[case("99:99:99:99", Timecode { hours: 99, minutes: 99, seconds: 99, frames: 99 })]
    fn timecode_valid(#[case] input: &str, #[case] expected: Timecode) {
        let tc: Timecode = input.parse().unwrap();
        assert_eq!(tc, expected);
        assert_eq!(tc.to_string(), input);
    }

    #[rstest]
    #[case("")]
    #[case("00:00:00")] // three groups
    #[case("00:00:00:00:00")] // five groups
    #[case("0:00:00:00")] // one-digit group
    #[case("00:00:00:0a")] // non-digit
    #[case("000:00:00:00")] // three-digit group
    fn timecode_invalid(#[case] input: &str) {
        assert!(Timecode::parse(input).is_err());
        assert!(!Timecode::matches(input));
    }

    #[test]
    fn video_input_round_trip() {
        for token in VideoInput::wire_values() {
            let value: VideoInput = token.parse().unwrap();
            assert_eq!(value.as_str(), *token);
        }
        assert!("DisplayPort".parse::<VideoInput>().is_err());
    }

    #[test]
    fn video_format_set_is_complete() {
        assert_eq!(VideoFormat::wire_values().len(), 20);
        assert_eq!(VideoFormat::Hd1080i50.as_str(), "1080i50");
    }

    #[test]
    fn codec_tokens_are_case_sensitive() {
        assert!("quicktimeproreshq".parse::<RecordingCodec>().is_err());
        assert_eq!(
            "QuickTimeProResHQ".parse::<RecordingCodec>().unwrap(),
            RecordingCodec::QuickTimeProResHq
        );
    }
}
