//! ZIP archive strategy.

use std::ops::ControlFlow;

use super::{Strategy, StrategyKind};
use crate::dispatch::{Context, Visit, deliver};
use crate::error::AcquireError;
use crate::handle::Handle;
use crate::source;

/// Yields one handle per file entry of a ZIP archive.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipStrategy;

impl Strategy for ZipStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Zip
    }

    fn open(
        &self,
        ctx: &Context<'_>,
        source: &str,
        visit: &mut Visit<'_>,
    ) -> Result<ControlFlow<()>, AcquireError> {
        let unsupported = |reason: &dyn std::fmt::Display| {
            AcquireError::unsupported(StrategyKind::Zip, source, reason)
        };

        let reader = ctx.open_source(source).map_err(|e| unsupported(&e))?;
        let mut archive = ::zip::ZipArchive::new(reader).map_err(|e| unsupported(&e))?;

        // The central directory parsed, so entry failures are broken input.
        for index in 0..archive.len() {
            let origin = source::join_origin(source, archive.name_for_index(index).unwrap_or_default());
            let file = archive.by_index(index).map_err(|e| AcquireError::Io {
                target: origin.clone(),
                source: std::io::Error::other(e),
            })?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            if !ctx.admits(source::entry_base_name(&name)) {
                continue;
            }

            let handle = Handle::new(origin, StrategyKind::Zip, Box::new(file))
                .with_entry(name);
            if deliver(visit, handle)?.is_break() {
                return Ok(ControlFlow::Break(()));
            }
        }

        Ok(ControlFlow::Continue(()))
    }
}
