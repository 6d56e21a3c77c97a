//! I/O abstractions for opening sources.
//!
//! This module provides:
//! - `InputProvider`: Trait for openable inputs yielding seekable streams
//! - `FileInput`: Local file implementation
//! - `Fetcher`: Trait for retrieving remote payloads, with an HTTP implementation
//! - In-memory implementations for fetched payloads and testing

mod fetch;
mod input;
mod memory;
mod std_io;

#[cfg(feature = "http")]
pub use fetch::HttpFetcher;
pub use fetch::{Fetcher, OfflineFetcher, default_fetcher};
pub use input::{InputProvider, SeekRead};
pub use memory::{InMemoryFetcher, InMemorySource};
pub use std_io::FileInput;
