//! Engine resolving many sources under one error policy.

use std::io;
use std::ops::ControlFlow;

use crate::config::SourceSpec;
use crate::dispatch::{Dispatcher, Outcome};
use crate::error::{AggregateError, ErrorPolicy, SingleIoError};
use crate::handle::{FileData, Handle};
use crate::strategy::StrategyRegistry;

/// Resolves a list of sources in order.
pub struct Acquirer {
    dispatcher: Dispatcher,
    error_policy: ErrorPolicy,
    sources: Vec<SourceSpec>,
}

impl Acquirer {
    pub fn new(dispatcher: Dispatcher, error_policy: ErrorPolicy, sources: Vec<SourceSpec>) -> Self {
        Self {
            dispatcher,
            error_policy,
            sources,
        }
    }

    pub fn registry(&self) -> &StrategyRegistry {
        self.dispatcher.registry()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn error_policy(&self) -> ErrorPolicy {
        self.error_policy
    }

    pub fn sources(&self) -> &[SourceSpec] {
        &self.sources
    }

    /// Deliver every handle of every source to `visit`.
    ///
    /// Returns one outcome per source that resolved without error, in
    /// source order. A `ControlFlow::Break` from the visitor stops the
    /// current source only.
    pub fn for_each<F>(&self, mut visit: F) -> Result<Vec<(String, Outcome)>, AggregateError>
    where
        F: FnMut(Handle<'_>) -> io::Result<ControlFlow<()>>,
    {
        let mut outcomes = Vec::with_capacity(self.sources.len());
        let mut errors = Vec::new();

        for spec in &self.sources {
            match self
                .dispatcher
                .resolve_matching(&spec.raw, spec.pattern.as_ref(), &mut visit)
            {
                Ok(outcome) => outcomes.push((spec.raw.clone(), outcome)),
                Err(e) => {
                    errors.push(SingleIoError::from_acquire(spec.raw.clone(), e));
                    if matches!(self.error_policy, ErrorPolicy::FastFail) {
                        return Err(AggregateError { errors });
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(outcomes)
        } else {
            Err(AggregateError { errors })
        }
    }

    /// Read every handle of every source into memory.
    pub fn read_all(&self) -> Result<Vec<FileData>, AggregateError> {
        let mut files = Vec::new();
        self.for_each(|handle| {
            files.push(handle.into_data()?);
            Ok(ControlFlow::Continue(()))
        })?;
        Ok(files)
    }

    /// Which strategy each source resolves with, discarding the contents.
    pub fn outcomes(&self) -> Result<Vec<(String, Outcome)>, AggregateError> {
        self.for_each(|_| Ok(ControlFlow::Continue(())))
    }
}
