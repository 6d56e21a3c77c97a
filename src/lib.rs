//! # sourcewalk
//!
//! Resolve any source descriptor into readable file streams.
//!
//! ## Overview
//!
//! Given a local file, a directory, a ZIP or TAR archive, a gzip or bzip2
//! compressed file, or a URL pointing at any of these, sourcewalk yields one
//! readable [`Handle`] per logical file without the caller knowing the
//! format up front.
//!
//! - **Ordered strategies**: Directory, Zip, Tar, Gzip, Bzip2, Plaintext are
//!   tried in that order; the first one that does not reject the source wins
//! - **Extensible**: implement [`Strategy`] and register it at startup
//! - **Scoped handles**: each handle lives for exactly one visitor call
//! - **Name filtering**: an optional regular expression matched against
//!   base file names
//! - **Multi-source runs**: [`AcquireBuilder`] / [`Acquirer`] with
//!   configurable error policies and config-file support
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::io::Read;
//! use std::ops::ControlFlow;
//!
//! let outcome = sourcewalk::resolve("data/", r".*\.csv", false, |mut handle| {
//!     let mut text = String::new();
//!     handle.read_to_string(&mut text)?;
//!     println!("{}: {} bytes", handle.origin(), text.len());
//!     Ok(ControlFlow::Continue(()))
//! })?;
//!
//! if !outcome.is_matched() {
//!     eprintln!("no strategy could open the source");
//! }
//! ```
//!
//! ## Features
//!
//! - `zip`, `tar`, `gzip`, `bzip2` - format strategies (enabled by default)
//! - `http` - fetch remote sources with `reqwest` (enabled by default)
//! - `json`, `yaml`, `toml` - config file formats (`yaml` enabled by default)
//! - `miette` - Pretty error reporting with miette
//! - `sarge` - CLI argument types and the `sourcewalk_list` binary
//!
//! ## Resolution semantics
//!
//! - A strategy rejects a source with an error for which
//!   [`AcquireError::is_unsupported`] holds; the dispatcher then tries the
//!   next one.
//! - Once a strategy has delivered a handle it is committed. A later
//!   rejection from it surfaces as [`AcquireError::Interrupted`].
//! - [`Outcome::Unmatched`] means no strategy applied, which is distinct
//!   from a match with zero handles (for example an empty directory).
//! - Remote archives and compressed streams are fetched whole into memory.

/// Emit a debug event only when the resolution call is verbose.
macro_rules! verbose {
    ($ctx:expr, $($arg:tt)+) => {
        if $ctx.verbose() {
            ::tracing::debug!($($arg)+);
        }
    };
}

// Core modules
pub mod builder;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod handle;
pub mod io;
pub mod source;
pub mod strategy;

#[cfg(feature = "sarge")]
pub mod cli;

use std::ops::ControlFlow;

// Re-exports for convenience
pub use builder::AcquireBuilder;
pub use config::{AcquireConfig, ConfigError, HttpConfig, SourceConfig, SourceSpec};
pub use dispatch::{Context, Dispatcher, Outcome, Visit, compile_pattern, deliver};
pub use engine::Acquirer;
pub use error::{AcquireError, AggregateError, ErrorPolicy, SingleIoError, Stage};
pub use handle::{FileData, Handle};
#[cfg(feature = "http")]
pub use io::HttpFetcher;
pub use io::{
    Fetcher, FileInput, InMemoryFetcher, InMemorySource, InputProvider, OfflineFetcher, SeekRead,
};
pub use source::is_remote;
pub use strategy::{Strategy, StrategyKind, StrategyRegistry, default_registry};

// Miette re-exports
#[cfg(feature = "miette")]
pub use error::AcquireDiagnostic;

/// Resolve `source` with the default registry and fetcher.
///
/// `pattern` is a regular expression that must wholly match a base file
/// name; the empty string matches everything. When `verbose` is false the
/// engine emits no diagnostic events.
pub fn resolve<F>(source: &str, pattern: &str, verbose: bool, visit: F) -> Result<Outcome, AcquireError>
where
    F: FnMut(Handle<'_>) -> std::io::Result<ControlFlow<()>>,
{
    Dispatcher::default()
        .with_verbose(verbose)
        .resolve(source, pattern, visit)
}

/// Build an [`Acquirer`] from an [`AcquireConfig`] using the default
/// registry.
pub fn build_acquirer_from_config(config: AcquireConfig) -> Result<Acquirer, AggregateError> {
    let registry = strategy::default_registry();
    builder::AcquireBuilder::from_config(config, registry)?.build()
}

/// Build an [`Acquirer`] from an [`AcquireConfig`], letting the caller
/// customize the builder first. This is the hook point for registering
/// custom strategies alongside a parsed configuration.
pub fn build_acquirer_from_config_with<F>(
    config: AcquireConfig,
    customize: F,
) -> Result<Acquirer, AggregateError>
where
    F: FnOnce(builder::AcquireBuilder) -> builder::AcquireBuilder,
{
    let registry = strategy::default_registry();
    let builder = builder::AcquireBuilder::from_config(config, registry)?;
    let builder = customize(builder);
    builder.build()
}

// Internal test modules (see src/tests)
#[cfg(test)]
mod tests;
