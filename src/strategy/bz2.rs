//! Bzip2 strategy: one decompressed handle per source.

use std::io::{self, Read, Seek};
use std::ops::ControlFlow;

use ::bzip2::read::MultiBzDecoder;

use super::{Strategy, StrategyKind};
use crate::dispatch::{Context, Visit, deliver};
use crate::error::AcquireError;
use crate::handle::Handle;
use crate::io::SeekRead;
use crate::source;

const MAGIC: &[u8; 3] = b"BZh";

#[derive(Debug, Clone, Copy, Default)]
pub struct Bzip2Strategy;

impl Strategy for Bzip2Strategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Bzip2
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
            .map_err(|e| AcquireError::unsupported(StrategyKind::Bzip2, source, e))?;
        probe(&mut reader).map_err(|e| AcquireError::Bzip2Validation {
            target: source.to_string(),
            source: e,
        })?;

        let handle = Handle::new(source, StrategyKind::Bzip2, Box::new(MultiBzDecoder::new(reader)));
        deliver(visit, handle)
    }
}

fn probe(reader: &mut Box<dyn SeekRead>) -> io::Result<()> {
    let mut magic = [0u8; 3];
    reader.read_exact(&mut magic)?;
    if &magic != MAGIC {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "not a bzip2 stream"));
    }
    reader.rewind()?;

    let mut byte = [0u8; 1];
    MultiBzDecoder::new(&mut *reader).read(&mut byte)?;
    reader.rewind()
}
