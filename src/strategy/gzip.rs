//! Gzip strategy: one decompressed handle per source.

use std::io::{self, Read, Seek};
use std::ops::ControlFlow;

use flate2::read::MultiGzDecoder;

use super::{Strategy, StrategyKind};
use crate::dispatch::{Context, Visit, deliver};
use crate::error::AcquireError;
use crate::handle::Handle;
use crate::io::SeekRead;
use crate::source;

const MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Debug, Clone, Copy, Default)]
pub struct GzipStrategy;

impl Strategy for GzipStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Gzip
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

        let mut reader = ctx
            .open_source(source)
            .map_err(|e| AcquireError::unsupported(StrategyKind::Gzip, source, e))?;
        probe(&mut reader).map_err(|e| AcquireError::GzipValidation {
            target: source.to_string(),
            source: e,
        })?;

        let handle = Handle::new(source, StrategyKind::Gzip, Box::new(MultiGzDecoder::new(reader)));
        deliver(visit, handle)
    }
}

/// Check the magic header and decompress one byte, leaving the stream
/// rewound to the start.
fn probe(reader: &mut Box<dyn SeekRead>) -> io::Result<()> {
    let mut magic = [0u8; 2];
    reader.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "not a gzip stream"));
    }
    reader.rewind()?;

    let mut byte = [0u8; 1];
    MultiGzDecoder::new(&mut *reader).read(&mut byte)?;
    reader.rewind()
}
