//! Wait for cards forever, printing each identifier once

use std::time::Duration;

use nfcid::{AsyncReader, Config, Reader};
use tokio::time::sleep;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let reader = AsyncReader::new(Reader::libnfc().with_config(Config::from_env()?));
    reader.open().await?;

    loop {
        tokio::select! {
            id = reader.wait_for_card(Duration::from_millis(250)) => {
                info!("Card presented: {}", id?);

                // Give the holder time to take the card away
                sleep(Duration::from_secs(5)).await;
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    reader.close().await?;
    info!("Shutdown complete");

    Ok(())
}
