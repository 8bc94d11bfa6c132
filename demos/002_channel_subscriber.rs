//! Channel delivery with deferred and failing signals.
//!
//! Demonstrates:
//! - Deferred signal values resolved at most once
//! - Results arriving in completion order over a channel
//! - A failing signal leaving its siblings untouched
//!
//! Usage:
//!   cargo run --example 002_channel_subscriber
//!   cargo run --example 002_channel_subscriber -- --debug

mod common;

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use serde_json::{Value, json};
use tokio::time::sleep;

use common::Args;
use fingerprint_digest::{Pipeline, RawValue, SignalName, StaticSource};

// ============================================================================
// Main
// ============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    common::init_logging(args.debug);

    if let Err(e) = run().await {
        eprintln!("\n[ERROR] {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    println!("=== 002: Channel Subscriber ===\n");

    let source = StaticSource::from_components_json(common::SAMPLE_COMPONENTS)?;

    // Slow audio: finishes last even though it starts first.
    source.insert(
        SignalName::Audio,
        RawValue::deferred(|| async {
            sleep(Duration::from_millis(200)).await;
            Ok::<_, String>(json!(124.04347527516074))
        }),
    );

    // Math collection that throws.
    source.insert(
        SignalName::Math,
        RawValue::deferred(|| async { Err::<Value, _>("Math.acosh is not a function") }),
    );

    let pipeline = Pipeline::builder()
        .source(source)
        .resolve_timeout(Duration::from_secs(2))
        .build()?;

    let mut events = pipeline.subscribe();
    let printer = tokio::spawn(async move {
        let mut order = 1;
        while let Some(event) = events.recv().await {
            println!(
                "[{order}] {:<16} {}",
                event.signal.as_str(),
                event.outcome.digest_text()
            );
            order += 1;
        }
    });

    let report = pipeline.run().await;
    drop(pipeline);
    printer.await?;

    println!("\n[Done] {}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
