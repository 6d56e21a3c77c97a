//! Input provider trait definition.

use std::fmt::Debug;
use std::io::{Read, Seek};

/// A readable, seekable byte stream.
///
/// Archive readers need random access and the compressed-stream probes
/// rewind after peeking, so every opened source is seekable.
pub trait SeekRead: Read + Seek + Send {}

impl<T: Read + Seek + Send> SeekRead for T {}

/// Trait for synchronous input providers.
///
/// Implementors provide a way to open a readable stream from a local file
/// or an already fetched remote payload.
pub trait InputProvider: Send + Sync + Debug {
    /// Returns a unique identifier for this input source.
    ///
    /// This is used for error messages and logging.
    fn id(&self) -> &str;

    /// Open and return a new readable stream.
    ///
    /// Each call should return a fresh stream positioned at the beginning.
    fn open(&self) -> std::io::Result<Box<dyn SeekRead>>;
}
