//! Digest a collector components document.
//!
//! Demonstrates:
//! - Loading a [`StaticSource`] from the collector's JSON output
//! - Receiving results through a callback
//! - Rendering the presentation triple per signal
//!
//! Usage:
//!   cargo run --example 001_digest_components
//!   cargo run --example 001_digest_components -- components.json
//!   cargo run --example 001_digest_components -- --debug

mod common;

// ============================================================================
// Imports
// ============================================================================

use anyhow::Result;

use common::Args;
use fingerprint_digest::{Pipeline, SignalEvent, StaticSource};

// ============================================================================
// Main
// ============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    common::init_logging(args.debug);

    if let Err(e) = run(args).await {
        eprintln!("\n[ERROR] {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    println!("=== 001: Digest Components ===\n");

    let components = args.components_json()?;
    let source = StaticSource::from_components_json(&components)?;
    println!("[Setup] Loaded {} signals\n", source.len());

    let pipeline = Pipeline::builder()
        .source(source)
        .on_signal(print_event)
        .build()?;

    let report = pipeline.run().await;

    println!(
        "[Done] run={} ready={} unavailable={} failed={}",
        report.run_id,
        report.ready_count(),
        report.unavailable_count(),
        report.failed_count()
    );

    Ok(())
}

fn print_event(event: &SignalEvent) {
    let view = event.presentation();
    println!("[{}]", event.signal);
    println!("  {:<24} {}", view.value_slot, first_line(&view.value));
    println!("  {:<24} {}", view.canonical_slot, first_line(&view.canonical));
    println!("  {:<24} {}\n", view.digest_slot, view.digest);
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}
