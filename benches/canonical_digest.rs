//! Canonicalization and digest benchmark suite.
//!
//! Benchmarks the per-signal hot path at different payload sizes:
//! - WebGL extension lists: 8, 64, 512 entries (sorting dominates)
//! - Math results: 16, 128 fields
//! - Full pipeline run over all five signals
//!
//! Run with: cargo bench --bench canonical_digest
//! Results saved to: target/criterion/

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use serde_json::{Map, Value, json};
use tokio::runtime::Runtime;

use fingerprint_digest::{Pipeline, SignalName, StaticSource, canonicalize, digest};

// ============================================================================
// Benchmark Parameters
// ============================================================================

const EXTENSION_COUNTS: &[usize] = &[8, 64, 512];
const MATH_FIELD_COUNTS: &[usize] = &[16, 128];

// ============================================================================
// Fixtures
// ============================================================================

fn extensions(count: usize) -> Value {
    // reversed so the sort has work to do
    let attrs: Vec<String> = (0..count).rev().map(|i| format!("attr_{i:04}=true")).collect();
    let precisions: Vec<String> = (0..count)
        .rev()
        .map(|i| format!("SHADER_{i:04}.HIGH_FLOAT=127,127,23"))
        .collect();
    json!({ "contextAttributes": attrs, "shaderPrecisions": precisions })
}

fn math(count: usize) -> Value {
    let mut fields = Map::new();
    for i in 0..count {
        fields.insert(format!("fn{i}"), json!(1.0 / (i as f64 + 3.0)));
    }
    Value::Object(fields)
}

fn components() -> StaticSource {
    StaticSource::new()
        .with(SignalName::Audio, json!(124.04347527516074))
        .with(
            SignalName::Canvas,
            json!({ "winding": true, "geometry": "data:image/png;base64,AAAA", "text": "data:image/png;base64,BBBB" }),
        )
        .with(SignalName::WebGlBasics, json!(-1))
        .with(SignalName::WebGlExtensions, extensions(64))
        .with(SignalName::Math, math(16))
}

// ============================================================================
// Benchmark: Extensions
// ============================================================================

fn bench_extensions(c: &mut Criterion) {
    let mut group = c.benchmark_group("webgl_extensions");

    for &count in EXTENSION_COUNTS {
        let value = extensions(count);
        group.bench_with_input(BenchmarkId::new("canonical_digest", count), &value, |b, v| {
            b.iter(|| {
                let canonical = canonicalize(SignalName::WebGlExtensions, v).unwrap();
                digest(canonical.text().unwrap())
            });
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Math
// ============================================================================

fn bench_math(c: &mut Criterion) {
    let mut group = c.benchmark_group("math");

    for &count in MATH_FIELD_COUNTS {
        let value = math(count);
        group.bench_with_input(BenchmarkId::new("canonical_digest", count), &value, |b, v| {
            b.iter(|| {
                let canonical = canonicalize(SignalName::Math, v).unwrap();
                digest(canonical.text().unwrap())
            });
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Full Run
// ============================================================================

fn bench_pipeline(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    c.bench_function("pipeline_run", |b| {
        b.iter(|| {
            rt.block_on(async {
                let pipeline = Pipeline::builder().source(components()).build().unwrap();
                pipeline.run().await
            })
        });
    });
}

criterion_group!(benches, bench_extensions, bench_math, bench_pipeline);
criterion_main!(benches);
