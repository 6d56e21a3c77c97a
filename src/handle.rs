//! Scoped readable handles delivered to callers.

use std::fmt;
use std::io::{self, Read};

use crate::source;
use crate::strategy::StrategyKind;

/// One logical file produced by a strategy.
///
/// A handle borrows whatever the producing strategy holds open (an archive,
/// a decoder, a file). It is passed by value into the caller's visitor and
/// cannot outlive that call, so it is always closed before the next handle
/// is produced.
pub struct Handle<'a> {
    origin: String,
    entry: Option<String>,
    strategy: StrategyKind,
    reader: Box<dyn Read + 'a>,
}

impl<'a> Handle<'a> {
    pub fn new(origin: impl Into<String>, strategy: StrategyKind, reader: Box<dyn Read + 'a>) -> Self {
        Self {
            origin: origin.into(),
            entry: None,
            strategy,
            reader,
        }
    }

    /// Record the entry name within a container.
    pub fn with_entry(mut self, entry: impl Into<String>) -> Self {
        self.entry = Some(entry.into());
        self
    }

    /// Originating path or URL, joined with the entry name for containers.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Entry name within the container, if the handle came from an archive.
    pub fn entry(&self) -> Option<&str> {
        self.entry.as_deref()
    }

    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    /// Base file name of the logical file.
    pub fn name(&self) -> &str {
        match &self.entry {
            Some(entry) => source::entry_base_name(entry),
            None => source::base_name(&self.origin),
        }
    }

    /// Drain the handle into an owned snapshot.
    pub fn into_data(mut self) -> io::Result<FileData> {
        let mut bytes = Vec::new();
        self.reader.read_to_end(&mut bytes)?;
        Ok(FileData {
            origin: self.origin,
            entry: self.entry,
            strategy: self.strategy,
            bytes,
        })
    }
}

impl Read for Handle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl fmt::Debug for Handle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("origin", &self.origin)
            .field("entry", &self.entry)
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}

/// Owned contents of a handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileData {
    pub origin: String,
    pub entry: Option<String>,
    pub strategy: StrategyKind,
    pub bytes: Vec<u8>,
}

impl FileData {
    /// Base file name of the logical file.
    pub fn name(&self) -> &str {
        match &self.entry {
            Some(entry) => source::entry_base_name(entry),
            None => source::base_name(&self.origin),
        }
    }

    /// Contents decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}
