//! CLI integration helpers for sourcewalk.
//!
//! Argument types for the `sarge` parser. Both accept repeated flags and
//! comma-separated values.
//!
//! # Example
//!
//! ```rust,ignore
//! use sarge::prelude::*;
//! use sourcewalk::cli::SourceArgs;
//!
//! let mut reader = ArgumentReader::new();
//! let sources = reader.add::<SourceArgs>(tag::both('s', "source"));
//! let args = reader.parse()?;
//!
//! let builder = AcquireBuilder::default()
//!     .with_source_args(&sources.get(&args).and_then(Result::ok).unwrap_or_default());
//! ```

use crate::error::AcquireError;
use crate::strategy::StrategyKind;

mod sarge;

/// Source paths or URLs given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceArgs(pub Vec<String>);

impl SourceArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.0.push(source.into());
        self
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any source is a URL.
    pub fn has_remote(&self) -> bool {
        self.0.iter().any(|s| crate::source::is_remote(s))
    }
}

/// Strategy subset and order given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrategyArgs(pub Vec<StrategyKind>);

impl StrategyArgs {
    pub fn as_slice(&self) -> &[StrategyKind] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Parse a strategy name or alias such as `dir`, `gz` or `txt`.
pub fn parse_strategy(s: &str) -> Result<StrategyKind, AcquireError> {
    s.trim().parse()
}
