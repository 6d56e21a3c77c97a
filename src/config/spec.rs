//! Per-source specifications.

use regex::Regex;

use crate::dispatch::compile_pattern;
use crate::error::AcquireError;

/// Specification for a single source to resolve.
#[derive(Debug, Clone)]
pub struct SourceSpec {
    /// Raw source string (path or URL)
    pub raw: String,
    /// Compiled name filter, `None` matches everything
    pub pattern: Option<Regex>,
}

impl SourceSpec {
    /// Create a specification matching every file.
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            pattern: None,
        }
    }

    /// Set the name filter from a pattern string.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, AcquireError> {
        self.pattern = compile_pattern(pattern)?;
        Ok(self)
    }

    /// Set an already compiled name filter.
    pub fn with_regex(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }
}
