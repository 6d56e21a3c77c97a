//! Builder for creating Acquirer instances.

use std::sync::Arc;

use crate::config::{AcquireConfig, HttpConfig, SourceConfig, SourceSpec};
use crate::dispatch::{Dispatcher, compile_pattern};
use crate::engine::Acquirer;
use crate::error::{AcquireError, AggregateError, ErrorPolicy, SingleIoError, Stage};
use crate::io::{Fetcher, default_fetcher};
use crate::strategy::{Strategy, StrategyKind, StrategyRegistry};

pub struct AcquireBuilder {
    source_args: Vec<String>,
    source_specs: Vec<SourceSpec>,
    /// Pattern applied to plain source arguments
    pattern: String,
    registry: StrategyRegistry,
    order: Option<Vec<StrategyKind>>,
    error_policy: ErrorPolicy,
    verbose: bool,
    fetcher: Option<Arc<dyn Fetcher>>,
    http: HttpConfig,
}

impl AcquireBuilder {
    pub fn new(registry: StrategyRegistry) -> Self {
        Self {
            source_args: Vec::new(),
            source_specs: Vec::new(),
            pattern: String::new(),
            registry,
            order: None,
            error_policy: ErrorPolicy::Accumulate,
            verbose: false,
            fetcher: None,
            http: HttpConfig::default(),
        }
    }

    /// Register a custom strategy ahead of Plaintext.
    pub fn with_strategy(mut self, strategy: Arc<dyn Strategy>) -> Self {
        self.registry.register(strategy);
        self
    }

    pub fn sources_from_args(mut self, args: &[String]) -> Self {
        self.source_args = args.to_vec();
        self
    }

    #[cfg(feature = "sarge")]
    pub fn with_source_args(mut self, args: &crate::cli::SourceArgs) -> Self {
        self.source_args.extend(args.as_slice().iter().cloned());
        self
    }

    pub fn add_source(mut self, source: impl Into<String>) -> Self {
        self.source_args.push(source.into());
        self
    }

    /// Add a source with its own pattern. The pattern is compiled when
    /// the builder is built.
    pub fn add_source_with_pattern(
        mut self,
        source: impl Into<String>,
        pattern: &str,
    ) -> Result<Self, AcquireError> {
        let spec = SourceSpec::new(source).with_pattern(pattern)?;
        self.source_specs.push(spec);
        Ok(self)
    }

    pub fn add_source_spec(mut self, spec: SourceSpec) -> Self {
        self.source_specs.push(spec);
        self
    }

    /// Pattern for sources added with [`add_source`](Self::add_source).
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Restrict and reorder the strategies consulted.
    pub fn with_order(mut self, order: &[StrategyKind]) -> Self {
        self.order = Some(order.to_vec());
        self
    }

    pub fn with_mode(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Use `fetcher` for remote sources instead of the HTTP client.
    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn with_http_config(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    pub fn build(self) -> Result<Acquirer, AggregateError> {
        let mut sources = self.resolve_sources()?;
        sources.extend(self.source_specs);

        let registry = match &self.order {
            Some(order) => self.registry.select(order),
            None => self.registry,
        };
        let fetcher = self
            .fetcher
            .unwrap_or_else(|| default_fetcher(&self.http));
        let dispatcher = Dispatcher::new(registry)
            .with_fetcher(fetcher)
            .with_verbose(self.verbose);

        Ok(Acquirer::new(dispatcher, self.error_policy, sources))
    }

    fn resolve_sources(&self) -> Result<Vec<SourceSpec>, AggregateError> {
        let mut specs = Vec::with_capacity(self.source_args.len());
        let mut errors = Vec::new();

        let pattern = match compile_pattern(&self.pattern) {
            Ok(pattern) => pattern,
            Err(e) => return Err(SingleIoError::from_acquire(self.pattern.clone(), e).into()),
        };

        for raw in &self.source_args {
            if raw.is_empty() {
                errors.push(SingleIoError {
                    stage: Stage::Resolve,
                    target: raw.clone(),
                    error: Box::new(std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        "empty source",
                    )),
                });
                if matches!(self.error_policy, ErrorPolicy::FastFail) {
                    return Err(AggregateError { errors });
                }
                continue;
            }
            specs.push(SourceSpec {
                raw: raw.clone(),
                pattern: pattern.clone(),
            });
        }

        if errors.is_empty() {
            Ok(specs)
        } else {
            Err(AggregateError { errors })
        }
    }

    pub fn from_config(
        config: AcquireConfig,
        registry: StrategyRegistry,
    ) -> Result<Self, AggregateError> {
        let mut builder = AcquireBuilder::new(registry)
            .with_verbose(config.verbose)
            .with_http_config(config.http);

        if let Some(policy_str) = config.error_policy.as_deref() {
            let policy = match policy_str {
                "fast_fail" | "fastfail" => ErrorPolicy::FastFail,
                _ => ErrorPolicy::Accumulate,
            };
            builder = builder.with_mode(policy);
        }

        let mut errors = Vec::new();

        if let Some(order) = config.strategies.as_ref() {
            let mut kinds = Vec::with_capacity(order.len());
            for name in order {
                match name.parse::<StrategyKind>() {
                    Ok(kind) => kinds.push(kind),
                    Err(e) => {
                        errors.push(SingleIoError::from_acquire(name.clone(), e));
                        if matches!(builder.error_policy, ErrorPolicy::FastFail) {
                            return Err(AggregateError { errors });
                        }
                    }
                }
            }
            builder = builder.with_order(&kinds);
        }

        for source_cfg in config.sources {
            match source_from_config(&source_cfg) {
                Ok(spec) => builder.source_specs.push(spec),
                Err(e) => {
                    errors.push(e);
                    if matches!(builder.error_policy, ErrorPolicy::FastFail) {
                        return Err(AggregateError { errors });
                    }
                }
            }
        }

        if !errors.is_empty() {
            return Err(AggregateError { errors });
        }

        Ok(builder)
    }
}

fn source_from_config(cfg: &SourceConfig) -> Result<SourceSpec, SingleIoError> {
    let spec = SourceSpec::new(cfg.source.clone());
    match cfg.pattern.as_deref() {
        Some(pattern) => spec
            .with_pattern(pattern)
            .map_err(|e| SingleIoError::from_acquire(cfg.source.clone(), e)),
        None => Ok(spec),
    }
}

impl Default for AcquireBuilder {
    fn default() -> Self {
        AcquireBuilder::new(crate::strategy::default_registry())
    }
}
