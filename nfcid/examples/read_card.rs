//! Poll a reader once and print the card identifier

use anyhow::Context;
use nfcid::{Config, Reader};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env().context("invalid reader configuration")?;
    let mut reader = Reader::libnfc().with_config(config);

    reader.open().context("failed to open NFC reader")?;
    if let Some(info) = reader.info() {
        println!("✓ Opened {}", info);
    }

    match reader.poll_for_id()? {
        Some(id) => println!("✓ Card: {}", id),
        None => println!("No card on the reader"),
    }

    reader.close()?;
    println!("✓ Closed");

    Ok(())
}
