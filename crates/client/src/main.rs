//! StrikeFX scenario client binary.
//!
//! Replays a recorded table session against the animation engine and logs
//! every sequence it would draw.
//!
//! # Examples
//!
//! ```bash
//! # Bundled demo scenario
//! cargo run -p strikefx-client
//!
//! # Custom scenario with verbose resolution trail
//! STRIKEFX_SCENARIO=session.json RUST_LOG=info,runtime=trace cargo run -p strikefx-client
//! ```

use anyhow::Result;
use strikefx_client::{ClientConfig, Scenario, Session, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    // 1. Load configuration from environment
    let config = ClientConfig::from_env();

    // 2. Setup logging
    let _guard = logging::setup_logging(&config)?;

    // 3. Load the scenario
    let scenario = match &config.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::bundled()?,
    };
    tracing::info!(
        scenario = %scenario.name,
        events = scenario.events.len(),
        "Starting StrikeFX client"
    );

    // 4. Build the engine and replay
    let session = Session::build(&config, scenario)?;
    if !session.engine().is_ready() {
        tracing::warn!("Renderer module inactive, every attack will be skipped");
    }

    let summary = session.replay().await;

    tracing::info!(
        played = summary.played,
        failed = summary.failed,
        skipped = summary.skipped_total(),
        sequences = session.sequences_played(),
        "Replay complete"
    );
    for (reason, count) in &summary.skipped {
        tracing::info!(%reason, count, "skipped");
    }

    Ok(())
}
