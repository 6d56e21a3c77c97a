//! Directory strategy: walks a local tree and dispatches every file.

use std::ops::ControlFlow;
use std::path::Path;

use walkdir::WalkDir;

use super::{Strategy, StrategyKind};
use crate::dispatch::{Context, Outcome, Visit};
use crate::error::AcquireError;
use crate::source;

/// Walks a directory recursively, sorted by file name, and resolves each
/// regular file with the registry minus this strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryStrategy;

impl Strategy for DirectoryStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Directory
    }

    fn open(
        &self,
        ctx: &Context<'_>,
        source: &str,
        visit: &mut Visit<'_>,
    ) -> Result<ControlFlow<()>, AcquireError> {
        if source::is_remote(source) || !Path::new(source).is_dir() {
            return Err(AcquireError::unsupported(
                StrategyKind::Directory,
                source,
                "not a directory",
            ));
        }

        let registry = ctx.registry().without(&[StrategyKind::Directory]);
        let nested = ctx.with_registry(&registry);

        for entry in WalkDir::new(source).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    verbose!(ctx, source, error = %err, "skipping unreadable directory entry");
                    continue;
                }
            };
            // Symlinks to files count as files.
            if !entry.path().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                verbose!(ctx, path = %entry.path().display(), "skipping non UTF-8 file name");
                continue;
            };
            if !ctx.admits(name) {
                continue;
            }

            let path = std::path::absolute(entry.path()).map_err(|e| AcquireError::Io {
                target: entry.path().to_string_lossy().into_owned(),
                source: e,
            })?;
            let path = path.to_string_lossy();

            match nested.dispatch(&path, &mut *visit)? {
                Outcome::Matched { stopped: true, .. } => return Ok(ControlFlow::Break(())),
                Outcome::Matched { .. } => {}
                Outcome::Unmatched => {
                    verbose!(ctx, path = %path, "no strategy matched file in directory");
                }
            }
        }

        Ok(ControlFlow::Continue(()))
    }
}
