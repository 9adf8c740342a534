//! Error handling and run statistics.
//!
//! This module provides:
//! - Typed errors for initialization, configuration and certificate fetching
//! - Run statistics tracking (results per status, failures per kind)
//!
//! Per-host and per-channel failures never surface as `Err` from the pipeline;
//! they are carried as data (`FetchOutcome`, `SendOutcome`) and counted here.

mod stats;
mod types;

// Re-export public API
pub use stats::CheckStats;
pub use types::{ConfigError, FetchError, InitializationError};
