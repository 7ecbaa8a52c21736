//! Core utilities for the scene exporter.
//!
//! This crate provides foundational types used across the exporter:
//! - Error types and result aliases
//! - Logging initialization
//! - A stopwatch for profiling translation passes
//! - Export configuration

mod config;
mod error;
mod logging;
mod timer;

pub use config::ExportConfig;
pub use error::{Error, Result};
pub use logging::{DEFAULT_LOG_FILTER, init_logging};
pub use timer::Timer;
