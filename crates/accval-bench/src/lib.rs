//! Filing generator and benchmark utilities for accval.
//!
//! This crate provides deterministic generation of consistent small-full
//! filings for benchmarking `accval-core`.

pub mod generator;

pub use generator::{Filing, GeneratorConfig, GeneratorError, SizeTier, generate_filings};
