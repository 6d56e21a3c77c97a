//! Strategy abstraction for resolving sources into handles.
//!
//! This module provides:
//! - `StrategyKind`: Identity of a strategy
//! - `Strategy`: Trait implemented by every format-specific opener
//! - `StrategyRegistry`: Ordered registry consulted by the dispatcher
//! - Built-in strategies for directories, zip, tar, gzip, bzip2 and plaintext

use std::fmt::Debug;
use std::ops::ControlFlow;
use std::str::FromStr;
use std::sync::Arc;

use crate::dispatch::{Context, Visit};
use crate::error::AcquireError;

#[cfg(feature = "bzip2")]
mod bz2;
mod directory;
#[cfg(feature = "gzip")]
mod gzip;
mod plaintext;
#[cfg(feature = "tar")]
mod tar_archive;
#[cfg(feature = "zip")]
mod zip_archive;

#[cfg(feature = "bzip2")]
pub use bz2::Bzip2Strategy;
pub use directory::DirectoryStrategy;
#[cfg(feature = "gzip")]
pub use gzip::GzipStrategy;
pub use plaintext::PlaintextStrategy;
#[cfg(feature = "tar")]
pub use tar_archive::TarStrategy;
#[cfg(feature = "zip")]
pub use zip_archive::ZipStrategy;

/// Identity of a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// Recursive directory walk
    Directory,
    /// ZIP archive
    Zip,
    /// TAR archive, optionally gzip or bzip2 compressed
    Tar,
    /// Single gzip-compressed stream
    Gzip,
    /// Single bzip2-compressed stream
    Bzip2,
    /// Raw bytes, the universal fallback
    Plaintext,
    /// Custom strategy with a unique name
    Custom(&'static str),
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::Directory => write!(f, "directory"),
            StrategyKind::Zip => write!(f, "zip"),
            StrategyKind::Tar => write!(f, "tar"),
            StrategyKind::Gzip => write!(f, "gzip"),
            StrategyKind::Bzip2 => write!(f, "bzip2"),
            StrategyKind::Plaintext => write!(f, "plaintext"),
            StrategyKind::Custom(name) => write!(f, "{}", name),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = AcquireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "directory" | "dir" => Ok(StrategyKind::Directory),
            "zip" => Ok(StrategyKind::Zip),
            "tar" => Ok(StrategyKind::Tar),
            "gzip" | "gz" => Ok(StrategyKind::Gzip),
            "bzip2" | "bz2" => Ok(StrategyKind::Bzip2),
            "plaintext" | "text" | "txt" => Ok(StrategyKind::Plaintext),
            _ => Err(AcquireError::UnknownStrategy(s.to_string())),
        }
    }
}

impl StrategyKind {
    /// Check if this strategy is available (feature enabled).
    pub fn is_available(&self) -> bool {
        match self {
            #[cfg(feature = "zip")]
            StrategyKind::Zip => true,
            #[cfg(not(feature = "zip"))]
            StrategyKind::Zip => false,

            #[cfg(feature = "tar")]
            StrategyKind::Tar => true,
            #[cfg(not(feature = "tar"))]
            StrategyKind::Tar => false,

            #[cfg(feature = "gzip")]
            StrategyKind::Gzip => true,
            #[cfg(not(feature = "gzip"))]
            StrategyKind::Gzip => false,

            #[cfg(feature = "bzip2")]
            StrategyKind::Bzip2 => true,
            #[cfg(not(feature = "bzip2"))]
            StrategyKind::Bzip2 => false,

            StrategyKind::Directory | StrategyKind::Plaintext => true,

            // Availability of custom strategies is determined by registration
            StrategyKind::Custom(_) => true,
        }
    }
}

/// A format-specific opener.
///
/// `open` delivers every handle the source contains to `visit`, one at a
/// time. When the source is not in the strategy's format it must fail with
/// an error for which [`AcquireError::is_unsupported`] holds, so the
/// dispatcher can tell "wrong strategy" apart from "right strategy, broken
/// input".
pub trait Strategy: Send + Sync + Debug {
    /// Identity used for registry uniqueness and exclusion.
    fn kind(&self) -> StrategyKind;

    /// Enumerate handles for `source`, delivering each to `visit`.
    ///
    /// Returns `ControlFlow::Break` when the visitor asked to stop.
    fn open(
        &self,
        ctx: &Context<'_>,
        source: &str,
        visit: &mut Visit<'_>,
    ) -> Result<ControlFlow<()>, AcquireError>;
}

/// Ordered registry of strategies.
///
/// Order is significant: the dispatcher tries strategies front to back and
/// the first one that does not reject the source wins. Plaintext accepts
/// everything, so registration keeps it last.
#[derive(Debug, Clone, Default)]
pub struct StrategyRegistry {
    strategies: Vec<Arc<dyn Strategy>>,
}

impl StrategyRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Register a strategy.
    ///
    /// A strategy whose kind is already registered is ignored. While
    /// Plaintext is registered, new strategies are inserted before it.
    pub fn register(&mut self, strategy: Arc<dyn Strategy>) {
        let kind = strategy.kind();
        if self.has_strategy(&kind) {
            return;
        }
        match self
            .strategies
            .iter()
            .position(|s| s.kind() == StrategyKind::Plaintext)
        {
            Some(idx) => self.strategies.insert(idx, strategy),
            None => self.strategies.push(strategy),
        }
    }

    /// Register a strategy (builder pattern).
    pub fn with_strategy(mut self, strategy: Arc<dyn Strategy>) -> Self {
        self.register(strategy);
        self
    }

    /// Check if a strategy is registered.
    pub fn has_strategy(&self, kind: &StrategyKind) -> bool {
        self.strategies.iter().any(|s| s.kind() == *kind)
    }

    /// Get the strategy registered for `kind`.
    pub fn get(&self, kind: &StrategyKind) -> Option<&Arc<dyn Strategy>> {
        self.strategies.iter().find(|s| s.kind() == *kind)
    }

    /// A copy of this registry with the given kinds excluded.
    pub fn without(&self, excluded: &[StrategyKind]) -> Self {
        Self {
            strategies: self
                .strategies
                .iter()
                .filter(|s| !excluded.contains(&s.kind()))
                .cloned()
                .collect(),
        }
    }

    /// A copy holding only `kinds`, in the given order.
    ///
    /// Kinds that are not registered are skipped. Plaintext, if selected,
    /// is moved to the end.
    pub fn select(&self, kinds: &[StrategyKind]) -> Self {
        let mut selected = Self::new();
        for kind in kinds {
            if let Some(strategy) = self.get(kind) {
                selected.register(Arc::clone(strategy));
            }
        }
        if let Some(idx) = selected
            .strategies
            .iter()
            .position(|s| s.kind() == StrategyKind::Plaintext)
        {
            let plaintext = selected.strategies.remove(idx);
            selected.strategies.push(plaintext);
        }
        selected
    }

    /// Registered kinds, in dispatch order.
    pub fn kinds(&self) -> Vec<StrategyKind> {
        self.strategies.iter().map(|s| s.kind()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Strategy>> {
        self.strategies.iter()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

/// Create a default registry with all enabled strategies.
///
/// Order: Directory, Zip, Tar, Gzip, Bzip2, Plaintext.
pub fn default_registry() -> StrategyRegistry {
    let mut registry = StrategyRegistry::new();

    registry.register(Arc::new(DirectoryStrategy));

    #[cfg(feature = "zip")]
    registry.register(Arc::new(ZipStrategy));

    #[cfg(feature = "tar")]
    registry.register(Arc::new(TarStrategy));

    #[cfg(feature = "gzip")]
    registry.register(Arc::new(GzipStrategy));

    #[cfg(feature = "bzip2")]
    registry.register(Arc::new(Bzip2Strategy));

    registry.register(Arc::new(PlaintextStrategy));

    registry
}
