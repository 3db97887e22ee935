//! # Data Converter Demo
//!
//! Runs the argument codec through the cases workers hit in practice.
//!
//! ```text
//! RUST_LOG=cadence_converter=trace cargo run -p data_converter -- [options.json]
//! ```

use anyhow::Context;
use cadence_converter::marker::LocalActivityMarkerHeader;
use cadence_converter::{ArgumentCodec, ArgumentCodecOptions, Payload};
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Serialize, Deserialize)]
struct Greeting {
    name: String,
    language: String,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_options() -> anyhow::Result<ArgumentCodecOptions> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(ArgumentCodecOptions::default());
    };
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read codec options from {}", path))?;
    Ok(ArgumentCodecOptions::from_json(&json)?)
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    println!("\n=== Cadence Rust Client - Data Converter Demo ===\n");

    let options = load_options()?;
    info!("Fallback types: {:?}", options.fallback_types);
    let codec = ArgumentCodec::from_options(&options);

    // Workflow started with two arguments
    let payload = codec.to_data(&("abc", 42))?;
    let (name, count): (String, i32) = codec.from_data_array(&payload)?;
    info!("Two arguments {} decoded as ({}, {})", payload, name, count);

    // Old single-argument payload read by a newer two-argument signature
    let payload = codec.to_data(&("x",))?;
    let (name, count): (String, i32) = codec.from_data_array(&payload)?;
    info!("Old payload {} decoded as ({}, {})", payload, name, count);

    // Structured argument
    let greeting = Greeting {
        name: "World".to_string(),
        language: "en".to_string(),
    };
    let payload = codec.to_data(&(greeting,))?;
    let decoded: Option<Greeting> = codec.from_data(&payload)?;
    info!("Structured argument {} decoded as {:?}", payload, decoded);

    // Null argument
    let payload = codec.to_data(&(None::<String>,))?;
    let decoded: Option<String> = codec.from_data(&payload)?;
    info!("Null argument gives empty payload: {}, decoded as {:?}", payload.is_empty(), decoded);

    // Marker header goes through the fallback converter
    let header = LocalActivityMarkerHeader::new("activity-1", "SayHello");
    let payload = codec.to_data(&(header,))?;
    let decoded: Option<LocalActivityMarkerHeader> = codec.from_data(&payload)?;
    info!("Marker header {} decoded as {:?}", payload, decoded);

    // Missing payload where an argument is required
    match codec.from_data_array::<(String,)>(&Payload::empty()) {
        Ok(_) => info!("Unexpectedly decoded an empty payload"),
        Err(e) => info!("Empty payload rejected: {}", e),
    }

    println!("\nDone.");
    Ok(())
}
