//! Standalone mock deck.
//!
//! Serves the deck protocol on its standard port so a session can be
//! pointed at it interactively:
//!
//! ```sh
//! cargo run --bin deckhand-mock
//! ```

use anyhow::Result;
use deckhand_core::constants::DEFAULT_PORT;
use deckhand_emulator::MockDeck;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let deck = MockDeck::builder().port(DEFAULT_PORT).spawn().await?;
    info!("mock deck ready on {}", deck.addr());
    info!("press ctrl-c to stop");

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    Ok(())
}
