//! Plaintext strategy: the universal fallback.

use std::ops::ControlFlow;

use super::{Strategy, StrategyKind};
use crate::dispatch::{Context, Visit, deliver};
use crate::error::AcquireError;
use crate::handle::Handle;
use crate::source;

/// Yields the raw bytes of any readable source as a single handle.
///
/// No validation is done, so this strategy never rejects a source; open
/// and fetch failures are genuine errors and propagate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextStrategy;

impl Strategy for PlaintextStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Plaintext
    }

    fn open(
        &self,
        ctx: &Context<'_>,
        source: &str,
        visit: &mut Visit<'_>,
    ) -> Result<ControlFlow<()>, AcquireError> {
        if !ctx.admits(source::base_name(source)) {
            return Ok(ControlFlow::Continue(()));
        }

        let reader = ctx.open_source(source)?;
        deliver(visit, Handle::new(source, StrategyKind::Plaintext, Box::new(reader)))
    }
}
