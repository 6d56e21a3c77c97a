//! Remote payload retrieval.
//!
//! Remote archives and compressed streams are fetched whole into memory;
//! there is no streaming of remote content.

use std::fmt::Debug;
use std::sync::Arc;

use crate::config::HttpConfig;
use crate::error::AcquireError;

/// Retrieves the full payload behind a remote source.
pub trait Fetcher: Send + Sync + Debug {
    /// Fetch the complete body for `url`.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, AcquireError>;
}

/// Blocking HTTP(S) fetcher built on `reqwest`.
///
/// The client is created on first use so constructing the fetcher never fails.
#[cfg(feature = "http")]
#[derive(Debug, Default)]
pub struct HttpFetcher {
    config: HttpConfig,
    client: std::sync::OnceLock<reqwest::blocking::Client>,
}

#[cfg(feature = "http")]
impl HttpFetcher {
    pub fn new(config: HttpConfig) -> Self {
        Self {
            config,
            client: std::sync::OnceLock::new(),
        }
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    fn client(&self) -> Result<&reqwest::blocking::Client, AcquireError> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }

        let mut builder = reqwest::blocking::Client::builder();
        if let Some(secs) = self.config.timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        if let Some(agent) = self.config.user_agent.as_deref() {
            builder = builder.user_agent(agent);
        }
        if !self.config.proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| AcquireError::HttpClient(Box::new(e)))?;

        // A concurrent initializer may have won; either client is equivalent.
        Ok(self.client.get_or_init(|| client))
    }
}

#[cfg(feature = "http")]
impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, AcquireError> {
        let fetch_err = |e: reqwest::Error| AcquireError::Fetch {
            url: url.to_string(),
            source: Box::new(e),
        };

        let response = self
            .client()?
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(fetch_err)?;
        let body = response.bytes().map_err(fetch_err)?;

        tracing::trace!(url, bytes = body.len(), "fetched remote payload");
        Ok(body.to_vec())
    }
}

/// Fetcher used when HTTP support is compiled out; every fetch fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineFetcher;

impl Fetcher for OfflineFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, AcquireError> {
        Err(AcquireError::Fetch {
            url: url.to_string(),
            source: "remote sources require the `http` feature".into(),
        })
    }
}

/// The fetcher used when none is configured explicitly.
pub fn default_fetcher(config: &HttpConfig) -> Arc<dyn Fetcher> {
    #[cfg(feature = "http")]
    {
        Arc::new(HttpFetcher::new(config.clone()))
    }
    #[cfg(not(feature = "http"))]
    {
        let _ = config;
        Arc::new(OfflineFetcher)
    }
}
