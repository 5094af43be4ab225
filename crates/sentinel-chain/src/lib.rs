//! # sentinel-chain
//!
//! The single chokepoint all chain state passes through.
//!
//! ## Overview
//!
//! This crate provides:
//! - **Resilient Reader**: bounded retry with fixed inter-attempt delay
//!   around any read; never panics, always returns a tagged outcome
//! - **Chunked Log Fetcher**: historical event logs over arbitrarily large
//!   block ranges, split into provider-friendly windows
//!
//! Monitors call through these wrappers exclusively; the retry policy here
//! is the system's primary defense against transient RPC flakiness.

pub mod error;
pub mod fetcher;
pub mod ports;
pub mod retry;

pub use error::{ChainError, ChainResult};
pub use fetcher::{ChunkedLogFetcher, DEFAULT_CHUNK_SIZE};
pub use ports::{LogFilter, LogSource};
pub use retry::{ResilientReader, RetryPolicy};
