//! Error types and policies for sourcewalk.
//!
//! This module provides:
//! - `AcquireError`: Errors raised while resolving a single source
//! - `ErrorPolicy`: Controls whether to fail fast or accumulate errors
//! - `Stage`: Indicates where an error occurred when driving many sources
//! - `SingleIoError`: A single per-source error with context
//! - `AggregateError`: A collection of errors when using `Accumulate` policy

use std::fmt;
use std::io;

use thiserror::Error;

use crate::strategy::StrategyKind;

/// Errors raised while resolving a source into handles.
#[derive(Debug, Error)]
pub enum AcquireError {
    /// The source is not in the strategy's format.
    #[error("{strategy} does not apply to '{target}': {reason}")]
    Unsupported {
        strategy: StrategyKind,
        target: String,
        reason: String,
    },

    /// The gzip magic probe failed.
    #[error("'{target}' failed gzip validation: {source}")]
    GzipValidation {
        target: String,
        #[source]
        source: io::Error,
    },

    /// The bzip2 magic probe failed.
    #[error("'{target}' failed bzip2 validation: {source}")]
    Bzip2Validation {
        target: String,
        #[source]
        source: io::Error,
    },

    /// A strategy rejected its input after it had already delivered handles.
    #[error("{strategy} failed on '{target}' after delivering {handles} handle(s)")]
    Interrupted {
        strategy: StrategyKind,
        target: String,
        handles: usize,
        #[source]
        source: Box<AcquireError>,
    },

    /// Genuine open/read failure.
    #[error("I/O failure on '{target}': {source}")]
    Io {
        target: String,
        #[source]
        source: io::Error,
    },

    /// Remote fetch failure.
    #[error("failed to fetch '{url}': {source}")]
    Fetch {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The caller's visitor failed while consuming a handle.
    #[error("consumer failed on '{target}': {source}")]
    Consume {
        target: String,
        #[source]
        source: io::Error,
    },

    /// The name-filter pattern is not a valid regular expression.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A strategy name could not be parsed.
    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),
}

impl AcquireError {
    /// Build an `Unsupported` error from any displayable reason.
    pub fn unsupported(
        strategy: StrategyKind,
        target: impl Into<String>,
        reason: impl fmt::Display,
    ) -> Self {
        AcquireError::Unsupported {
            strategy,
            target: target.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the dispatcher should fall through to the next strategy.
    ///
    /// True for format mismatches, including the gzip and bzip2 probe
    /// failures. Everything else is terminal for the resolution call.
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            AcquireError::Unsupported { .. }
                | AcquireError::GzipValidation { .. }
                | AcquireError::Bzip2Validation { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop at the first error encountered
    FastFail,
    /// Collect all errors and return them together
    #[default]
    Accumulate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Compiling a per-source name pattern
    Pattern,
    Resolve,
    /// Error raised by the caller while consuming a handle
    Consume,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Pattern => write!(f, "Pattern"),
            Stage::Resolve => write!(f, "Resolve"),
            Stage::Consume => write!(f, "Consume"),
        }
    }
}

#[derive(Debug)]
pub struct SingleIoError {
    /// Stage where the error occurred
    pub stage: Stage,
    /// The source string the error belongs to
    pub target: String,
    /// The underlying error
    pub error: Box<dyn std::error::Error + Send + Sync>,
}

impl SingleIoError {
    /// Wrap an `AcquireError` raised while resolving `target`.
    pub fn from_acquire(target: impl Into<String>, error: AcquireError) -> Self {
        let stage = match &error {
            AcquireError::Consume { .. } => Stage::Consume,
            AcquireError::Pattern(_) => Stage::Pattern,
            _ => Stage::Resolve,
        };
        Self {
            stage,
            target: target.into(),
            error: Box::new(error),
        }
    }
}

impl fmt::Display for SingleIoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.stage, self.target, self.error)
    }
}

impl std::error::Error for SingleIoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.error.as_ref())
    }
}

/// An aggregate of multiple per-source errors.
///
/// This is returned when using `ErrorPolicy::Accumulate` and multiple errors occurred.
#[derive(Debug, Error)]
pub struct AggregateError {
    /// Collection of individual errors
    pub errors: Vec<SingleIoError>,
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "acquisition encountered {} error(s):", self.errors.len())?;
        for (i, e) in self.errors.iter().enumerate() {
            writeln!(f, "  #{}: {}", i + 1, e)?;
        }
        Ok(())
    }
}

impl AggregateError {
    /// Create a new aggregate error with a single error.
    pub fn single(error: SingleIoError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// Check if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

impl From<SingleIoError> for AggregateError {
    fn from(error: SingleIoError) -> Self {
        Self::single(error)
    }
}

#[cfg(feature = "miette")]
mod miette_impl;

#[cfg(feature = "miette")]
pub use miette_impl::*;
