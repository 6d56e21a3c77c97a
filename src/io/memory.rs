//! In-memory inputs: fetched remote payloads and test doubles.

use std::collections::HashMap;
use std::io::{self, Cursor};
use std::sync::{Arc, Mutex};

use super::{Fetcher, InputProvider, SeekRead};
use crate::error::AcquireError;

/// In-memory input source.
///
/// Remote payloads are held this way for the duration of a resolution call.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    id: String,
    data: Arc<[u8]>,
}

impl InMemorySource {
    /// Create a new in-memory source with the given data.
    pub fn new(id: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            data: data.into(),
        }
    }

    /// Create a source over an already shared buffer without copying it.
    pub fn shared(id: impl Into<String>, data: Arc<[u8]>) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// Create a new in-memory source from a string.
    pub fn from_string(id: impl Into<String>, data: impl Into<String>) -> Self {
        Self::new(id, data.into().into_bytes())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl InputProvider for InMemorySource {
    fn id(&self) -> &str {
        &self.id
    }

    fn open(&self) -> io::Result<Box<dyn SeekRead>> {
        Ok(Box::new(Cursor::new(Arc::clone(&self.data))))
    }
}

/// Fetcher serving canned payloads by URL, for tests and offline use.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFetcher {
    payloads: HashMap<String, Arc<[u8]>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl InMemoryFetcher {
    /// Create a new fetcher with no payloads.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `data` for `url` (builder pattern).
    pub fn with_payload(mut self, url: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        let data: Vec<u8> = data.into();
        self.payloads.insert(url.into(), Arc::from(data));
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl Fetcher for InMemoryFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, AcquireError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }
        self.payloads
            .get(url)
            .map(|data| data.to_vec())
            .ok_or_else(|| AcquireError::Fetch {
                url: url.to_string(),
                source: Box::new(io::Error::new(
                    io::ErrorKind::NotFound,
                    "no payload registered for url",
                )),
            })
    }
}
