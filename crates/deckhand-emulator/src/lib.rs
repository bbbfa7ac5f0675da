//! Mock deck for testing the session layer without hardware.
//!
//! `MockDeck` listens on a local port, speaks just enough of the deck's
//! ASCII protocol to exercise a client: it sends the 500 boot banner on
//! accept, answers each received command line with a canned reply, and
//! records every line it receives so tests can assert on the outbound
//! traffic.
//!
//! # Design principles
//!
//! - **One connection at a time**: the real deck's protocol is
//!   single-session; so is the mock.
//! - **Replies by opcode**: the text before the first colon selects the
//!   reply. Tests override individual opcodes to provoke specific client
//!   behavior.
//! - **Deliberately imperfect delivery**: replies can be chunked and
//!   delayed to exercise the client's quiet-window framing.
//!
//! # Example
//!
//! ```no_run
//! use deckhand_emulator::MockDeck;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let deck = MockDeck::builder()
//!     .reply("play", "102 transport blocked\r\n")
//!     .spawn()
//!     .await?;
//! println!("mock deck on {}", deck.addr());
//! // ... connect a session to deck.addr() ...
//! assert!(deck.received().await.is_empty());
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

/// The banner a real deck sends as soon as the socket opens.
pub const BOOT_BANNER: &str = "500 connection info:\r\n\
    protocol version: 1.8\r\n\
    model: HyperDeck Studio Pro\r\n";

/// Builder for [`MockDeck`].
#[derive(Debug, Default)]
pub struct MockDeckBuilder {
    replies: HashMap<String, String>,
    banner: Option<String>,
    chunk_size: Option<usize>,
    chunk_delay: Duration,
    port: u16,
}

impl MockDeckBuilder {
    /// Bind to a fixed local port instead of an ephemeral one.
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Override the reply for one opcode. The opcode is the text before
    /// the first colon of the received line, e.g. `"slot info"`.
    #[must_use]
    pub fn reply(mut self, opcode: &str, reply: &str) -> Self {
        self.replies.insert(opcode.to_string(), reply.to_string());
        self
    }

    /// Replace the boot banner. An empty string suppresses it entirely,
    /// which makes connect handshakes fail.
    #[must_use]
    pub fn banner(mut self, banner: &str) -> Self {
        self.banner = Some(banner.to_string());
        self
    }

    /// Deliver each reply in chunks of `size` bytes with `delay` between
    /// them. The delay must stay well inside the client's quiet window or
    /// the reply will be split into two reads.
    #[must_use]
    pub fn chunked(mut self, size: usize, delay: Duration) -> Self {
        self.chunk_size = Some(size);
        self.chunk_delay = delay;
        self
    }

    /// Bind and start serving. Without [`port`], an ephemeral local port
    /// is chosen; read it back through [`MockDeck::addr`].
    ///
    /// # Errors
    /// Returns the bind error if the port cannot be opened.
    ///
    /// [`port`]: MockDeckBuilder::port
    pub async fn spawn(self) -> std::io::Result<MockDeck> {
        let listener = TcpListener::bind(("127.0.0.1", self.port)).await?;
        let addr = listener.local_addr()?;
        info!("mock deck listening on {addr}");

        let received = Arc::new(Mutex::new(Vec::new()));
        let behavior = Behavior {
            replies: self.replies,
            banner: self.banner.unwrap_or_else(|| BOOT_BANNER.to_string()),
            chunk_size: self.chunk_size,
            chunk_delay: self.chunk_delay,
        };

        let task_received = Arc::clone(&received);
        let task = tokio::spawn(async move {
            loop {
                let Ok((stream, peer)) = listener.accept().await else {
                    break;
                };
                debug!("mock deck accepted {peer}");
                serve(stream, &behavior, &task_received).await;
            }
        });

        Ok(MockDeck {
            addr,
            received,
            task,
        })
    }
}

#[derive(Debug)]
struct Behavior {
    replies: HashMap<String, String>,
    banner: String,
    chunk_size: Option<usize>,
    chunk_delay: Duration,
}

/// A running mock deck.
pub struct MockDeck {
    addr: SocketAddr,
    received: Arc<Mutex<Vec<String>>>,
    task: JoinHandle<()>,
}

impl MockDeck {
    /// Start a mock with default canned replies.
    ///
    /// # Errors
    /// Returns the bind error if the port cannot be opened.
    pub async fn spawn() -> std::io::Result<Self> {
        Self::builder().spawn().await
    }

    /// A builder for a mock with customized behavior.
    #[must_use]
    pub fn builder() -> MockDeckBuilder {
        MockDeckBuilder::default()
    }

    /// The address the mock is listening on.
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Every command line received so far, in arrival order, CRLF
    /// stripped.
    pub async fn received(&self) -> Vec<String> {
        self.received.lock().await.clone()
    }
}

impl Drop for MockDeck {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Serve one connection until the client quits or disconnects.
async fn serve(mut stream: TcpStream, behavior: &Behavior, received: &Arc<Mutex<Vec<String>>>) {
    if !behavior.banner.is_empty()
        && write_reply(&mut stream, behavior, &behavior.banner).await.is_err()
    {
        return;
    }

    let mut pending = String::new();
    let mut buffer = [0u8; 1024];
    loop {
        let n = match stream.read(&mut buffer).await {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        pending.push_str(&String::from_utf8_lossy(&buffer[..n]));

        while let Some(end) = pending.find('\n') {
            let line: String = pending.drain(..=end).collect();
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            trace!(line, "mock deck received");
            received.lock().await.push(line.to_string());

            let opcode = line.split(':').next().unwrap_or(line).trim();
            if opcode == "quit" {
                let _ = write_reply(&mut stream, behavior, "200 ok\r\n").await;
                debug!("mock deck closing on quit");
                return;
            }

            let reply = match behavior.replies.get(opcode) {
                Some(reply) => reply.clone(),
                None => default_reply(line, opcode),
            };
            if write_reply(&mut stream, behavior, &reply).await.is_err() {
                return;
            }
        }
    }
}

async fn write_reply(
    stream: &mut TcpStream,
    behavior: &Behavior,
    reply: &str,
) -> std::io::Result<()> {
    match behavior.chunk_size {
        Some(size) if size > 0 => {
            let bytes = reply.as_bytes();
            for chunk in bytes.chunks(size) {
                stream.write_all(chunk).await?;
                stream.flush().await?;
                tokio::time::sleep(behavior.chunk_delay).await;
            }
            Ok(())
        }
        _ => stream.write_all(reply.as_bytes()).await,
    }
}

/// Canned replies matching what a real deck sends.
///
/// `configuration`, `notify` and `remote` answer with their info record
/// when queried bare and with a plain ack when sent with parameters,
/// mirroring the deck's query-by-arity behavior.
fn default_reply(line: &str, opcode: &str) -> String {
    let has_params = line.len() > opcode.len();
    match opcode {
        "device info" => "204 device info:\r\n\
            protocol version: 1.8\r\n\
            model: HyperDeck Studio Pro\r\n\
            unique id: 101112131415\r\n"
            .to_string(),
        "slot info" => "202 slot info:\r\n\
            slot id: 1\r\n\
            status: mounted\r\n\
            volume name: Media1\r\n\
            recording time: 3600\r\n\
            video format: 1080i50\r\n"
            .to_string(),
        "transport info" => "208 transport info:\r\n\
            status: stopped\r\n\
            speed: 0\r\n\
            slot id: 1\r\n\
            display timecode: 00:00:00:00\r\n\
            timecode: 00:00:00:00\r\n\
            clip id: 1\r\n\
            video format: 1080i50\r\n\
            loop: false\r\n"
            .to_string(),
        "clips get" => "205 clips info:\r\n\
            clip count: 2\r\n\
            1: first_take.mov 00:00:00:00 00:02:00:00\r\n\
            2: second_take.mov 00:02:00:00 00:03:30:00\r\n"
            .to_string(),
        "configuration" if !has_params => "211 configuration:\r\n\
            video input: SDI\r\n\
            audio input: embedded\r\n\
            file format: QuickTimeProResHQ\r\n"
            .to_string(),
        "notify" if !has_params => "209 notify:\r\n\
            transport: false\r\n\
            slot: false\r\n\
            configuration: false\r\n\
            dropped frames: false\r\n"
            .to_string(),
        "remote" if !has_params => "210 remote info:\r\nenabled: true\r\noverride: false\r\n"
            .to_string(),
        "play" | "record" | "stop" | "goto" | "ping" | "slot select" | "configuration"
        | "notify" | "remote" => "200 ok\r\n".to_string(),
        _ => {
            warn!(opcode, "mock deck has no reply for opcode");
            "100 syntax error\r\n".to_string()
        }
    }
}
