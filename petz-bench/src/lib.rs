//! Benchmark-only crate for PETZ. See `benches/engine.rs`.
