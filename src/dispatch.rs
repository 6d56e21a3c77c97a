//! The dispatcher: tries registered strategies against a source in order.
//!
//! Handles are delivered through a visitor. Each handle is moved into the
//! visitor and dropped when the call returns, so at most one handle is open
//! per resolution call and it is released before the engine does any
//! further work, including when the visitor errors or asks to stop.
//!
//! Remote sources are fetched at most once per resolution call; a failed
//! fetch is remembered and reported again without retrying.
//!
//! Once a strategy has delivered a handle it is committed: a later format
//! rejection from the same strategy is reported as
//! [`AcquireError::Interrupted`] instead of falling through, so callers
//! never see a partial result followed by a second strategy's output.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::sync::Arc;

use regex::Regex;

use crate::config::HttpConfig;
use crate::error::AcquireError;
use crate::handle::{FileData, Handle};
use crate::io::{FileInput, Fetcher, InMemorySource, InputProvider, SeekRead, default_fetcher};
use crate::source;
use crate::strategy::{StrategyKind, StrategyRegistry, default_registry};

/// Visitor receiving handles one at a time.
pub type Visit<'v> = dyn FnMut(Handle<'_>) -> io::Result<ControlFlow<()>> + 'v;

/// Result of resolving one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// `strategy` applied and delivered `handles` handles. `stopped` is set
    /// when the visitor ended the resolution early.
    Matched {
        strategy: StrategyKind,
        handles: usize,
        stopped: bool,
    },
    /// Every registered strategy rejected the source.
    Unmatched,
}

impl Outcome {
    pub fn strategy(&self) -> Option<StrategyKind> {
        match self {
            Outcome::Matched { strategy, .. } => Some(*strategy),
            Outcome::Unmatched => None,
        }
    }

    /// Number of handles delivered (zero when unmatched).
    pub fn handles(&self) -> usize {
        match self {
            Outcome::Matched { handles, .. } => *handles,
            Outcome::Unmatched => 0,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, Outcome::Matched { .. })
    }

    pub fn was_stopped(&self) -> bool {
        matches!(self, Outcome::Matched { stopped: true, .. })
    }
}

/// Compile a name-filter pattern. The empty pattern matches everything.
///
/// Patterns must match the whole base name.
pub fn compile_pattern(pattern: &str) -> Result<Option<Regex>, AcquireError> {
    if pattern.is_empty() {
        return Ok(None);
    }
    Ok(Some(Regex::new(&format!("^(?:{pattern})$"))?))
}

/// Fetch results of one resolution call, failures included, so no URL is
/// requested twice.
#[derive(Debug, Default)]
pub(crate) struct FetchCache {
    results: RefCell<HashMap<String, Result<Arc<[u8]>, SharedError>>>,
}

type SharedError = Arc<dyn std::error::Error + Send + Sync>;

/// Per-call state handed to strategies.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    registry: &'a StrategyRegistry,
    pattern: Option<&'a Regex>,
    verbose: bool,
    fetcher: &'a dyn Fetcher,
    cache: &'a FetchCache,
}

impl<'a> Context<'a> {
    pub(crate) fn new(
        registry: &'a StrategyRegistry,
        pattern: Option<&'a Regex>,
        verbose: bool,
        fetcher: &'a dyn Fetcher,
        cache: &'a FetchCache,
    ) -> Self {
        Self {
            registry,
            pattern,
            verbose,
            fetcher,
            cache,
        }
    }

    pub fn registry(&self) -> &'a StrategyRegistry {
        self.registry
    }

    pub fn pattern(&self) -> Option<&'a Regex> {
        self.pattern
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// The same call state over a different registry.
    pub fn with_registry<'b>(&self, registry: &'b StrategyRegistry) -> Context<'b>
    where
        'a: 'b,
    {
        Context {
            registry,
            pattern: self.pattern,
            verbose: self.verbose,
            fetcher: self.fetcher,
            cache: self.cache,
        }
    }

    /// Whether a base file name passes the pattern.
    pub fn admits(&self, base_name: &str) -> bool {
        let admitted = self.pattern.is_none_or(|p| p.is_match(base_name));
        if !admitted {
            verbose!(self, name = base_name, "skipping name not matching pattern");
        }
        admitted
    }

    /// Open a seekable stream over `source`.
    ///
    /// Remote sources are fetched whole into memory, at most once per
    /// resolution call.
    pub fn open_source(&self, source: &str) -> Result<Box<dyn SeekRead>, AcquireError> {
        let provider: Box<dyn InputProvider> = if source::is_remote(source) {
            Box::new(InMemorySource::shared(source, self.fetch(source)?))
        } else {
            Box::new(FileInput::new(PathBuf::from(source)))
        };
        provider.open().map_err(|e| AcquireError::Io {
            target: provider.id().to_string(),
            source: e,
        })
    }

    fn fetch(&self, url: &str) -> Result<Arc<[u8]>, AcquireError> {
        let cached = self.cache.results.borrow().get(url).cloned();
        let result = match cached {
            Some(result) => result,
            None => {
                let result: Result<Arc<[u8]>, SharedError> = match self.fetcher.fetch(url) {
                    Ok(payload) => {
                        verbose!(self, url, bytes = payload.len(), "fetched remote source");
                        Ok(Arc::from(payload))
                    }
                    Err(AcquireError::Fetch { source, .. }) => Err(SharedError::from(source)),
                    Err(other) => Err(Arc::new(other) as SharedError),
                };
                self.cache
                    .results
                    .borrow_mut()
                    .insert(url.to_string(), result.clone());
                result
            }
        };
        result.map_err(|source| AcquireError::Fetch {
            url: url.to_string(),
            source: Box::new(source),
        })
    }

    /// Try every registered strategy against `source` in order.
    pub fn dispatch(&self, source: &str, visit: &mut Visit<'_>) -> Result<Outcome, AcquireError> {
        for strategy in self.registry.iter() {
            let kind = strategy.kind();
            let mut handles = 0usize;
            let result = {
                let mut counted = |handle: Handle<'_>| {
                    handles += 1;
                    visit(handle)
                };
                strategy.open(self, source, &mut counted)
            };

            match result {
                Ok(flow) => {
                    verbose!(self, strategy = %kind, source, handles, "strategy selected");
                    return Ok(Outcome::Matched {
                        strategy: kind,
                        handles,
                        stopped: flow.is_break(),
                    });
                }
                Err(err) if err.is_unsupported() && handles == 0 => {
                    verbose!(self, strategy = %kind, source, error = %err, "strategy does not apply");
                }
                Err(err) if err.is_unsupported() => {
                    return Err(AcquireError::Interrupted {
                        strategy: kind,
                        target: source.to_string(),
                        handles,
                        source: Box::new(err),
                    });
                }
                Err(err) => return Err(err),
            }
        }

        verbose!(self, source, "no strategy matched");
        Ok(Outcome::Unmatched)
    }
}

/// Hand `handle` to the visitor, tagging visitor failures with its origin.
///
/// Strategies should deliver every handle through this function so caller
/// errors surface as [`AcquireError::Consume`].
pub fn deliver(
    visit: &mut Visit<'_>,
    handle: Handle<'_>,
) -> Result<ControlFlow<()>, AcquireError> {
    let target = handle.origin().to_string();
    visit(handle).map_err(|source| AcquireError::Consume { target, source })
}

/// Resolves sources against a registry.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: StrategyRegistry,
    fetcher: Arc<dyn Fetcher>,
    verbose: bool,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Dispatcher::new(default_registry())
    }
}

impl Dispatcher {
    pub fn new(registry: StrategyRegistry) -> Self {
        Self {
            registry,
            fetcher: default_fetcher(&HttpConfig::default()),
            verbose: false,
        }
    }

    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// Emit a debug event for every skip and selection decision.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    /// Resolve `source`, delivering handles whose base name wholly matches
    /// `pattern` (empty matches everything).
    pub fn resolve<F>(&self, source: &str, pattern: &str, mut visit: F) -> Result<Outcome, AcquireError>
    where
        F: FnMut(Handle<'_>) -> io::Result<ControlFlow<()>>,
    {
        let pattern = compile_pattern(pattern)?;
        self.resolve_matching(source, pattern.as_ref(), &mut visit)
    }

    /// Resolve with an already compiled pattern.
    pub fn resolve_matching(
        &self,
        source: &str,
        pattern: Option<&Regex>,
        visit: &mut Visit<'_>,
    ) -> Result<Outcome, AcquireError> {
        let cache = FetchCache::default();
        let ctx = Context::new(&self.registry, pattern, self.verbose, self.fetcher.as_ref(), &cache);
        ctx.dispatch(source, visit)
    }

    /// Resolve `source` and read every handle into memory.
    pub fn read_all(&self, source: &str, pattern: &str) -> Result<(Outcome, Vec<FileData>), AcquireError> {
        let mut files = Vec::new();
        let outcome = self.resolve(source, pattern, |handle| {
            files.push(handle.into_data()?);
            Ok(ControlFlow::Continue(()))
        })?;
        Ok((outcome, files))
    }
}
