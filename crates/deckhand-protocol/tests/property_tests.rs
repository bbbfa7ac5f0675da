//! Property tests for the codec and the reply tokenizer.

use deckhand_protocol::{parse_response, Command, GotoOptions, PlayOptions, RecordOptions};
use proptest::prelude::*;

proptest! {
    // The tokenizer is fed raw socket bytes and must never panic,
    // whatever arrives.
    #[test]
    fn parser_never_panics(buffer in proptest::collection::vec(any::<u8>(), 0..512)) {
        let _ = parse_response(&buffer);
    }

    #[test]
    fn parser_accepts_all_text(text in "\\PC{0,200}") {
        let _ = parse_response(text.as_bytes());
    }

    // Every encoded command is a single CRLF-terminated line.
    #[test]
    fn play_encoding_is_one_line(speed in any::<i64>(), looped in any::<bool>()) {
        let cmd = Command::play(PlayOptions {
            speed: Some(speed),
            r#loop: Some(looped),
            single_clip: None,
        });
        let wire = cmd.encode();
        prop_assert!(wire.ends_with(b"\r\n"));
        let body = &wire[..wire.len() - 2];
        prop_assert!(!body.contains(&b'\r'));
        prop_assert!(!body.contains(&b'\n'));
    }

    // Whatever speed is requested, the serialized value is in range.
    #[test]
    fn play_speed_always_legal(speed in any::<i64>()) {
        let cmd = Command::play(PlayOptions { speed: Some(speed), ..Default::default() });
        let (_, value) = &cmd.params()[0];
        let sent: i64 = value.parse().unwrap();
        prop_assert!((1..=200).contains(&sent));
    }

    #[test]
    fn record_name_survives_round_trip(name in "[a-zA-Z0-9_]{1,32}") {
        let cmd = Command::record(RecordOptions { name: Some(name.clone()) });
        prop_assert_eq!(cmd.params(), &[("name", name)]);
    }

    // A status line produced by a deck always parses back to its code.
    #[test]
    fn status_lines_round_trip(code in 100u16..600, message in "[a-z ]{1,20}") {
        let message = message.trim().to_string();
        prop_assume!(!message.is_empty());
        let line = format!("{code} {message}:\r\n");
        let response = parse_response(line.as_bytes()).unwrap();
        prop_assert_eq!(response.code(), Some(code));
        prop_assert_eq!(response.message(), message);
    }

    #[test]
    fn goto_accepts_at_most_one_target(
        clip in proptest::option::of("[a-z]{1,8}"),
        timeline in proptest::option::of("(start|end)"),
    ) {
        let result = Command::goto(GotoOptions {
            clip: clip.clone(),
            timeline: timeline.clone(),
            ..Default::default()
        });
        prop_assert_eq!(result.is_err(), clip.is_some() && timeline.is_some());
    }
}
