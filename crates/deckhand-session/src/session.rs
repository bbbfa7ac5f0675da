//! Deck session: handshake, command/response exchange, state dispatch.

use crate::config::SessionConfig;
use crate::dispatch;
use crate::error::{Result, SessionError};
use crate::state::DeviceState;
use crate::transport::TransportConnection;
use deckhand_protocol::{
    parse_response, Command, ConfigurationOptions, GotoOptions, PlayOptions, RecordOptions,
    Response, SlotInfoOptions, SlotSelectOptions,
};
use std::collections::VecDeque;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Follow-up sends one dispatch may fan out into before the session gives
/// up. Two covers the legitimate cases (squelch then ack, enable then
/// ack); anything past four means the deck keeps contradicting us.
const MAX_FOLLOW_UPS: usize = 4;

/// A connected deck session.
///
/// Strictly request/reply: one command in flight, no background reader,
/// no unsolicited-message handling beyond the dispatch reactions. The
/// session owns the transport and the [`DeviceState`] cache exclusively;
/// controlling several decks means several sessions.
///
/// # Example
///
/// ```no_run
/// use deckhand_session::{DeckSession, SessionConfig};
/// use deckhand_protocol::PlayOptions;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = SessionConfig {
///     addr: "192.168.10.50:9993".parse()?,
///     ..Default::default()
/// };
/// let mut session = DeckSession::connect(config).await?;
///
/// let (matched, _) = session.play(PlayOptions::default()).await?;
/// assert!(matched);
///
/// println!("model: {:?}", session.state().device_info.get("model"));
/// session.disconnect().await;
/// # Ok(())
/// # }
/// ```
pub struct DeckSession {
    transport: TransportConnection,
    state: DeviceState,
    quiet_timeout: Duration,
    banner_timeout: Duration,
    command_timeout: Duration,
}

impl DeckSession {
    /// Connect to a deck and run the handshake.
    ///
    /// The handshake is fixed: read the 500 boot banner, query device
    /// info, slot info, transport info, configuration and clips, then
    /// disable all notification categories and enable remote control.
    /// Query failures are logged and tolerated (the cache just stays
    /// partial); a failed notify-disable or remote-enable makes the
    /// session unusable, so those tear the connection back down and fail
    /// the connect.
    ///
    /// # Errors
    /// `ConnectTimeout`/`Io` from the transport, `Handshake` when the
    /// banner never arrives or the configure steps fail.
    pub async fn connect(config: SessionConfig) -> Result<Self> {
        let mut transport = TransportConnection::new(&config);
        transport.connect().await?;

        let mut session = Self {
            transport,
            state: DeviceState::default(),
            quiet_timeout: config.quiet_timeout,
            banner_timeout: config.banner_timeout,
            command_timeout: config.command_timeout,
        };

        if let Err(e) = session.handshake().await {
            session.disconnect().await;
            return Err(e);
        }

        info!("deck session ready at {}", session.transport.addr());
        Ok(session)
    }

    async fn handshake(&mut self) -> Result<()> {
        // The deck announces itself with a 500 record as soon as the
        // socket opens; it carries the same fields as device info.
        let banner = self.transport.receive_until_quiet(self.banner_timeout).await?;
        let banner = parse_response(&banner)
            .map_err(|_| SessionError::Handshake("no boot banner received".to_string()))?;
        dispatch::apply(&mut self.state, &banner);

        let queries = [
            Command::device_info(),
            Command::slot_info(SlotInfoOptions::default()),
            Command::transport_info(),
            Command::configuration(ConfigurationOptions::default()),
            Command::clips_get(),
        ];
        let mut status_ok = true;
        for query in queries {
            let (matched, _) = self.send_message(query).await?;
            status_ok &= matched;
        }
        if !status_ok {
            error!("could not obtain full status for the deck");
        }

        let (notify_ok, _) = self.send_message(Command::notify_all_off()).await?;
        let (remote_ok, _) = self.send_message(Command::remote_enable()).await?;
        if !notify_ok || !remote_ok {
            return Err(SessionError::Handshake(
                "could not configure the deck for remote control".to_string(),
            ));
        }
        Ok(())
    }

    /// The cached device state.
    #[must_use]
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Whether the underlying transport is open.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    /// Send a command and process its reply, with the configured
    /// per-command timeout. See [`send_message_timeout`].
    ///
    /// [`send_message_timeout`]: DeckSession::send_message_timeout
    pub async fn send_message(&mut self, command: Command) -> Result<(bool, Option<Response>)> {
        let timeout = self.command_timeout;
        self.send_message_timeout(command, timeout).await
    }

    /// Send a command, read its reply, dispatch it into the cache.
    ///
    /// Returns `(matched, response)`:
    /// - `matched` is whether the reply carried the command's expected
    ///   status code. A mismatch is logged but still dispatched, since
    ///   the quiet-window framing can legitimately deliver a different
    ///   record than the one expected.
    /// - `(false, None)` means nothing arrived within the read window at
    ///   all. This is a soft failure, not an error; callers must check
    ///   the flag.
    ///
    /// When dispatch demands a corrective send (notification squelch,
    /// remote re-enable), that exchange happens here too before
    /// returning.
    ///
    /// # Errors
    /// Transport failures only. Protocol anomalies are logged, never
    /// raised.
    pub async fn send_message_timeout(
        &mut self,
        command: Command,
        timeout: Duration,
    ) -> Result<(bool, Option<Response>)> {
        match tokio::time::timeout(timeout, self.run_exchanges(command)).await {
            Ok(result) => result,
            Err(_) => {
                error!(
                    "command exchange did not complete within {}ms",
                    timeout.as_millis()
                );
                Ok((false, None))
            }
        }
    }

    /// Run one command exchange plus any follow-ups dispatch asks for.
    /// Follow-ups are queued, not recursed, and capped so a deck that
    /// keeps reporting a bad state cannot loop the session forever.
    async fn run_exchanges(&mut self, command: Command) -> Result<(bool, Option<Response>)> {
        let mut queue = VecDeque::from([command]);
        let mut first: Option<(bool, Option<Response>)> = None;
        let mut exchanges = 0usize;

        while let Some(command) = queue.pop_front() {
            if exchanges > MAX_FOLLOW_UPS {
                warn!(%command, "follow-up limit reached, dropping command");
                break;
            }
            exchanges += 1;

            let (matched, response) = self.exchange(&command).await?;
            if let Some(response) = &response
                && let Some(follow_up) = dispatch::apply(&mut self.state, response)
            {
                queue.push_back(follow_up);
            }
            if first.is_none() {
                first = Some((matched, response));
            }
        }

        Ok(first.unwrap_or((false, None)))
    }

    /// One raw exchange: send, read until quiet, parse, compare codes.
    /// Does not dispatch.
    async fn exchange(&mut self, command: &Command) -> Result<(bool, Option<Response>)> {
        debug!(%command, "sending command");
        self.transport.send(&command.encode()).await?;

        let buffer = self.transport.receive_until_quiet(self.quiet_timeout).await?;
        if buffer.is_empty() {
            error!(%command, "no response received");
            return Ok((false, None));
        }

        let response = parse_response(&buffer)?;
        let matched = response.code() == Some(command.expects());
        if !matched {
            error!(%command, %response, expected = command.expects(), "unexpected response");
        }
        Ok((matched, Some(response)))
    }

    /// End the session: best-effort quit, then close the transport.
    /// Idempotent; safe to call on an already-closed session.
    pub async fn disconnect(&mut self) {
        if self.transport.is_connected() {
            // The deck acks quit with 200 and drops the connection; a
            // failure here changes nothing about what follows.
            if let Err(e) = self.send_message(Command::quit()).await {
                debug!("quit during disconnect failed: {e}");
            }
        }
        self.transport.close().await;
    }

    // Transport controls. Thin wrappers that build the validated command
    // and hand it to the exchange path; state updates happen through
    // dispatch like any other reply.

    /// Start playback.
    pub async fn play(&mut self, opts: PlayOptions) -> Result<(bool, Option<Response>)> {
        self.send_message(Command::play(opts)).await
    }

    /// Start recording.
    pub async fn record(&mut self, opts: RecordOptions) -> Result<(bool, Option<Response>)> {
        self.send_message(Command::record(opts)).await
    }

    /// Stop the transport.
    pub async fn stop(&mut self) -> Result<(bool, Option<Response>)> {
        self.send_message(Command::stop()).await
    }

    /// Move the transport to a position.
    ///
    /// # Errors
    /// `Protocol` when more than one positioning option is supplied.
    pub async fn goto(&mut self, opts: GotoOptions) -> Result<(bool, Option<Response>)> {
        let command = Command::goto(opts)?;
        self.send_message(command).await
    }

    /// Select the active media slot. On success the clip list belongs to
    /// a different disk, so it is refreshed in the same call.
    pub async fn set_slot(&mut self, opts: SlotSelectOptions) -> Result<(bool, Option<Response>)> {
        let (matched, response) = self.send_message(Command::slot_select(opts)).await?;
        if matched {
            self.refresh_clips().await?;
        }
        Ok((matched, response))
    }

    /// Select the video input source.
    pub async fn set_video_input(
        &mut self,
        input: deckhand_core::VideoInput,
    ) -> Result<(bool, Option<Response>)> {
        self.send_message(Command::configuration(ConfigurationOptions {
            video_input: Some(input.to_string()),
            ..Default::default()
        }))
        .await
    }

    /// Select the audio input source.
    pub async fn set_audio_input(
        &mut self,
        input: deckhand_core::AudioInput,
    ) -> Result<(bool, Option<Response>)> {
        self.send_message(Command::configuration(ConfigurationOptions {
            audio_input: Some(input.to_string()),
            ..Default::default()
        }))
        .await
    }

    /// Select the recording codec.
    pub async fn set_file_format(
        &mut self,
        codec: deckhand_core::RecordingCodec,
    ) -> Result<(bool, Option<Response>)> {
        self.send_message(Command::configuration(ConfigurationOptions {
            file_format: Some(codec.to_string()),
            ..Default::default()
        }))
        .await
    }

    /// Re-query the clip list on the active slot.
    pub async fn refresh_clips(&mut self) -> Result<(bool, Option<Response>)> {
        self.send_message(Command::clips_get()).await
    }
}
