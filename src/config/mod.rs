//! Configuration types for acquisition runs.
//!
//! This module provides:
//! - `SourceSpec`: Specification for a single source with its compiled pattern
//! - `AcquireConfig`: Deserializable configuration for complete runs
//! - `HttpConfig`: Remote fetch settings

mod pipeline;
mod spec;

pub use pipeline::{AcquireConfig, ConfigError, HttpConfig, SourceConfig};
pub use spec::SourceSpec;
