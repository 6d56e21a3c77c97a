//! TAR archive strategy, including gzip and bzip2 compressed tarballs.

use std::io::{Cursor, Read, Seek};
use std::ops::ControlFlow;

use super::{Strategy, StrategyKind};
use crate::dispatch::{Context, Visit, deliver};
use crate::error::AcquireError;
use crate::handle::Handle;
use crate::io::SeekRead;
use crate::source;

const BLOCK: usize = 512;
const CHECKSUM: std::ops::Range<usize> = 148..156;

/// Yields one handle per regular-file entry of a TAR archive.
///
/// The first header block must carry a valid checksum; an empty or
/// all-zero archive is rejected like any other non-tar input.
#[derive(Debug, Clone, Copy, Default)]
pub struct TarStrategy;

impl Strategy for TarStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Tar
    }

    fn open(
        &self,
        ctx: &Context<'_>,
        source: &str,
        visit: &mut Visit<'_>,
    ) -> Result<ControlFlow<()>, AcquireError> {
        let unsupported = |reason: &dyn std::fmt::Display| {
            AcquireError::unsupported(StrategyKind::Tar, source, reason)
        };

        let reader = ctx.open_source(source).map_err(|e| unsupported(&e))?;
        let mut stream = decompressed(reader).map_err(|e| unsupported(&e))?;

        let mut first = [0u8; BLOCK];
        stream
            .read_exact(&mut first)
            .map_err(|e| unsupported(&e))?;
        if !is_header_block(&first) {
            return Err(unsupported(&"bad tar header checksum"));
        }

        // Past the checksum the source is a tarball; later failures are broken input.
        let broken = |e: std::io::Error| AcquireError::Io {
            target: source.to_string(),
            source: e,
        };

        let mut archive = ::tar::Archive::new(Cursor::new(first).chain(stream));
        let entries = archive.entries().map_err(broken)?;

        for entry in entries {
            let entry = entry.map_err(broken)?;
            let entry_type = entry.header().entry_type();
            let name = entry.path().map_err(broken)?.to_string_lossy().into_owned();
            if !entry_type.is_file() {
                verbose!(ctx, entry = %name, kind = ?entry_type, "skipping non-file tar entry");
                continue;
            }
            if !ctx.admits(source::entry_base_name(&name)) {
                continue;
            }

            let handle = Handle::new(source::join_origin(source, &name), StrategyKind::Tar, Box::new(entry))
                .with_entry(name);
            if deliver(visit, handle)?.is_break() {
                return Ok(ControlFlow::Break(()));
            }
        }

        Ok(ControlFlow::Continue(()))
    }
}

/// Wrap `reader` in a decoder when its magic bytes announce a compressed
/// tarball.
fn decompressed(mut reader: Box<dyn SeekRead>) -> std::io::Result<Box<dyn Read>> {
    let mut magic = [0u8; 3];
    let mut filled = 0;
    while filled < magic.len() {
        match reader.read(&mut magic[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    reader.rewind()?;

    match &magic[..filled] {
        #[cfg(feature = "gzip")]
        [0x1f, 0x8b, ..] => Ok(Box::new(flate2::read::MultiGzDecoder::new(reader))),
        #[cfg(feature = "bzip2")]
        [b'B', b'Z', b'h'] => Ok(Box::new(::bzip2::read::MultiBzDecoder::new(reader))),
        _ => Ok(Box::new(reader)),
    }
}

/// Checks the header checksum of a tar block.
///
/// The checksum is the sum of all header bytes with the checksum field
/// itself counted as spaces.
fn is_header_block(block: &[u8; BLOCK]) -> bool {
    if block.iter().all(|&b| b == 0) {
        return false;
    }
    let field = &block[CHECKSUM];
    let digits: String = field
        .iter()
        .map(|&b| b as char)
        .filter(|c| !matches!(c, '\0' | ' '))
        .collect();
    let Ok(stored) = u32::from_str_radix(&digits, 8) else {
        return false;
    };
    let computed: u32 = block
        .iter()
        .enumerate()
        .map(|(i, &b)| if CHECKSUM.contains(&i) { u32::from(b' ') } else { u32::from(b) })
        .sum();
    stored == computed
}
