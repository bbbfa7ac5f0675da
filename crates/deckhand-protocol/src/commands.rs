//! Per-command constructors with parameter validation and defaulting.
//!
//! Every constructor produces a [`Command`] whose parameters have already
//! been checked: enumerated values against their legal sets, integers
//! against their documented ranges, strings against emptiness. A bad value
//! is replaced by its default rather than rejected (the deck fails whole
//! commands on one bad parameter, which is worse than recording with a
//! default name). The one exception is `goto`, where supplying more than
//! one positioning option is a caller bug and returns an error.
//!
//! Query-by-arity: `configuration`, `notify` and `remote` answer with
//! their own info code (211/209/210) when sent bare, and with `200 ok`
//! when sent with parameters. The constructors set [`Command::expects`]
//! accordingly.

use crate::command::{Command, Opcode};
use deckhand_core::constants::{
    CODE_CLIPS_INFO, CODE_CONFIGURATION, CODE_DEVICE_INFO, CODE_NOTIFY, CODE_REMOTE,
    CODE_SLOT_INFO, CODE_TRANSPORT_INFO,
};
use deckhand_core::{
    AudioInput, Error, RecordingCodec, Result, Timecode, VideoFormat, VideoInput,
};

/// Optional parameters for [`Command::play`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayOptions {
    /// Playback speed as a percentage, 1 to 200. Out of range becomes 100.
    pub speed: Option<i64>,
    /// Loop playback at the end of the timeline.
    pub r#loop: Option<bool>,
    /// Restrict playback to the current clip.
    pub single_clip: Option<bool>,
}

/// Optional parameters for [`Command::record`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordOptions {
    /// Filename prefix for the recording. Empty becomes `testclip`.
    pub name: Option<String>,
}

/// Optional parameters for [`Command::slot_info`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotInfoOptions {
    /// Slot to query, 1 or 2. Out of range becomes 1.
    pub slot_id: Option<i64>,
}

/// Optional parameters for [`Command::configuration`].
///
/// With no fields set the command is a query and expects a `211`
/// configuration payload rather than `200 ok`. Values are free strings
/// checked against the legal wire sets at build time; an unknown value is
/// replaced with the deck's factory default for that parameter. Use the
/// typed enums from `deckhand_core` when you want the check at compile
/// time instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigurationOptions {
    /// One of [`VideoInput::wire_values`]. Unknown becomes `SDI`.
    pub video_input: Option<String>,
    /// One of [`AudioInput::wire_values`]. Unknown becomes `embedded`.
    pub audio_input: Option<String>,
    /// One of [`RecordingCodec::wire_values`]. Unknown becomes
    /// `QuickTimeUncompressed`.
    pub file_format: Option<String>,
}

/// Optional parameters for [`Command::notify`].
///
/// With no fields set the command is a query and expects `209`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotifyOptions {
    pub transport: Option<bool>,
    pub slot: Option<bool>,
    pub configuration: Option<bool>,
}

/// Optional parameters for [`Command::remote`].
///
/// With no fields set the command is a query and expects `210`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoteOptions {
    pub enable: Option<bool>,
    pub r#override: Option<bool>,
}

/// Optional parameters for [`Command::slot_select`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotSelectOptions {
    /// Slot to make active, 1 or 2. Out of range becomes 1.
    pub slot_id: Option<i64>,
    /// Timeline format to select, one of [`VideoFormat::wire_values`].
    /// Unknown becomes `1080i50`.
    pub video_format: Option<String>,
}

/// Positioning target for [`Command::goto`]. At most one may be set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GotoOptions {
    /// Jump to the clip with this id.
    pub clip_id: Option<String>,
    /// Move forward or back a clip count, e.g. `+1` or `-3`.
    pub clip_forward_back: Option<String>,
    /// `start` or `end` of the current clip.
    pub clip: Option<String>,
    /// `start` or `end` of the timeline.
    pub timeline: Option<String>,
    /// Jump to an absolute timecode.
    pub timecode: Option<Timecode>,
    /// Move by a signed timecode offset, e.g. `+00:00:10:00`.
    pub timecode_forward_back: Option<String>,
}

impl GotoOptions {
    fn supplied(&self) -> usize {
        usize::from(self.clip_id.is_some())
            + usize::from(self.clip_forward_back.is_some())
            + usize::from(self.clip.is_some())
            + usize::from(self.timeline.is_some())
            + usize::from(self.timecode.is_some())
            + usize::from(self.timecode_forward_back.is_some())
    }
}

impl Command {
    /// Start playback.
    #[must_use]
    pub fn play(opts: PlayOptions) -> Self {
        let mut cmd = Command::new(Opcode::Play);
        if let Some(speed) = opts.speed {
            cmd.push_int("speed", speed, 1..=200, 100);
        }
        if let Some(looped) = opts.r#loop {
            cmd.push_bool("loop", looped);
        }
        if let Some(single) = opts.single_clip {
            cmd.push_bool("single clip", single);
        }
        cmd
    }

    /// Start recording.
    #[must_use]
    pub fn record(opts: RecordOptions) -> Self {
        let mut cmd = Command::new(Opcode::Record);
        if let Some(name) = &opts.name {
            cmd.push_string("name", name, "testclip");
        }
        cmd
    }

    /// Stop the transport.
    #[must_use]
    pub fn stop() -> Self {
        Command::new(Opcode::Stop)
    }

    /// Ask the deck for a `200 ok`.
    #[must_use]
    pub fn ping() -> Self {
        Command::new(Opcode::Ping)
    }

    /// End the protocol session. The deck closes the socket after acking.
    #[must_use]
    pub fn quit() -> Self {
        Command::new(Opcode::Quit)
    }

    /// Query model and protocol revision.
    #[must_use]
    pub fn device_info() -> Self {
        Command::new(Opcode::DeviceInfo).with_expects(CODE_DEVICE_INFO)
    }

    /// Query the state of a media slot.
    #[must_use]
    pub fn slot_info(opts: SlotInfoOptions) -> Self {
        let mut cmd = Command::new(Opcode::SlotInfo).with_expects(CODE_SLOT_INFO);
        if let Some(slot_id) = opts.slot_id {
            cmd.push_int("slot id", slot_id, 1..=2, 1);
        }
        cmd
    }

    /// Query the transport state.
    #[must_use]
    pub fn transport_info() -> Self {
        Command::new(Opcode::TransportInfo).with_expects(CODE_TRANSPORT_INFO)
    }

    /// List the clips on the active slot.
    #[must_use]
    pub fn clips_get() -> Self {
        Command::new(Opcode::ClipsGet).with_expects(CODE_CLIPS_INFO)
    }

    /// Query or set the input/codec configuration.
    #[must_use]
    pub fn configuration(opts: ConfigurationOptions) -> Self {
        let mut cmd = Command::new(Opcode::Configuration);
        if opts == ConfigurationOptions::default() {
            return cmd.with_expects(CODE_CONFIGURATION);
        }
        if let Some(video) = &opts.video_input {
            cmd.push_enum(
                "video input",
                video,
                VideoInput::wire_values(),
                VideoInput::Sdi.as_str(),
            );
        }
        if let Some(audio) = &opts.audio_input {
            cmd.push_enum(
                "audio input",
                audio,
                AudioInput::wire_values(),
                AudioInput::Embedded.as_str(),
            );
        }
        if let Some(codec) = &opts.file_format {
            cmd.push_enum(
                "file format",
                codec,
                RecordingCodec::wire_values(),
                RecordingCodec::QuickTimeUncompressed.as_str(),
            );
        }
        cmd
    }

    /// Query or set the unsolicited-notification categories.
    #[must_use]
    pub fn notify(opts: NotifyOptions) -> Self {
        let mut cmd = Command::new(Opcode::Notify);
        if opts == NotifyOptions::default() {
            return cmd.with_expects(CODE_NOTIFY);
        }
        if let Some(transport) = opts.transport {
            cmd.push_bool("transport", transport);
        }
        if let Some(slot) = opts.slot {
            cmd.push_bool("slot", slot);
        }
        if let Some(configuration) = opts.configuration {
            cmd.push_bool("configuration", configuration);
        }
        cmd
    }

    /// Disable every notification category.
    #[must_use]
    pub fn notify_all_off() -> Self {
        Command::notify(NotifyOptions {
            transport: Some(false),
            slot: Some(false),
            configuration: Some(false),
        })
    }

    /// Query or set the remote-control state.
    #[must_use]
    pub fn remote(opts: RemoteOptions) -> Self {
        let mut cmd = Command::new(Opcode::Remote);
        if opts == RemoteOptions::default() {
            return cmd.with_expects(CODE_REMOTE);
        }
        if let Some(enable) = opts.enable {
            cmd.push_bool("enable", enable);
        }
        if let Some(override_enable) = opts.r#override {
            cmd.push_bool("override", override_enable);
        }
        cmd
    }

    /// Enable remote control.
    #[must_use]
    pub fn remote_enable() -> Self {
        Command::remote(RemoteOptions {
            enable: Some(true),
            r#override: None,
        })
    }

    /// Make a media slot active.
    #[must_use]
    pub fn slot_select(opts: SlotSelectOptions) -> Self {
        let mut cmd = Command::new(Opcode::SlotSelect);
        if let Some(slot_id) = opts.slot_id {
            cmd.push_int("slot id", slot_id, 1..=2, 1);
        }
        if let Some(format) = &opts.video_format {
            cmd.push_enum(
                "video format",
                format,
                VideoFormat::wire_values(),
                VideoFormat::Hd1080i50.as_str(),
            );
        }
        cmd
    }

    /// Move the transport to a position.
    ///
    /// # Errors
    /// Returns `Error::InvalidCommand` when more than one positioning
    /// option is supplied; the deck would act on an arbitrary one.
    pub fn goto(opts: GotoOptions) -> Result<Self> {
        if opts.supplied() > 1 {
            return Err(Error::InvalidCommand {
                opcode: Opcode::Goto.as_str(),
                message: "only one positioning option may be specified".to_string(),
            });
        }
        let mut cmd = Command::new(Opcode::Goto);
        if let Some(clip_id) = &opts.clip_id {
            cmd.push_string("clip id", clip_id, "???");
        }
        if let Some(step) = &opts.clip_forward_back {
            cmd.push_string("clip id", step, "+1");
        }
        if let Some(clip) = &opts.clip {
            cmd.push_string("clip", clip, "end");
        }
        if let Some(timeline) = &opts.timeline {
            cmd.push_string("timeline", timeline, "end");
        }
        if let Some(timecode) = opts.timecode {
            cmd.push_raw("timecode", timecode);
        }
        if let Some(offset) = &opts.timecode_forward_back {
            cmd.push_string("timecode", offset, "+00:00:00:00");
        }
        Ok(cmd)
    }
}
