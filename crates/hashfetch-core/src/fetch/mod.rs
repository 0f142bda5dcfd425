//! HTTP GET of a single address.
//!
//! Uses the curl crate (libcurl). `FetchClient` holds the transfer options
//! shared by every fetch in a batch; each call to [`FetchClient::fetch`]
//! configures its own Easy handle from them and performs exactly one attempt.

mod error;
mod headers;

pub use error::FetchError;

use headers::HeaderTracker;
use std::time::Duration;

/// Total per-request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Redirect hop limit applied when none is configured.
pub const DEFAULT_MAX_REDIRECTIONS: u32 = 10;

/// Transfer options shared by all fetches of one client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientOptions {
    /// Total time allowed for one request, connect through last body byte.
    pub timeout: Duration,
    /// Optional separate cap on connection establishment.
    pub connect_timeout: Option<Duration>,
    /// Maximum redirect hops followed.
    pub max_redirections: u32,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: None,
            max_redirections: DEFAULT_MAX_REDIRECTIONS,
        }
    }
}

/// Shared, read-only HTTP client. Wrap in `Arc` and hand to the dispatcher.
#[derive(Debug, Clone, Default)]
pub struct FetchClient {
    options: ClientOptions,
}

impl FetchClient {
    pub fn new(options: ClientOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// GETs `address` and returns the full response body.
    ///
    /// Any completed response is returned regardless of its status code.
    /// Blocks the current thread; call from `spawn_blocking` if used from
    /// async code.
    pub fn fetch(&self, address: &str) -> Result<Vec<u8>, FetchError> {
        let network = |source: curl::Error| FetchError::Network {
            address: address.to_string(),
            source,
        };

        let mut easy = curl::easy::Easy::new();
        self.configure(&mut easy, address).map_err(network)?;

        let mut tracker = HeaderTracker::default();
        let mut body: Vec<u8> = Vec::new();
        let performed = {
            let mut transfer = easy.transfer();
            transfer
                .header_function(|data| {
                    tracker.line(data);
                    true
                })
                .map_err(network)?;
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(network)?;
            transfer.perform()
        };

        if let Err(source) = performed {
            if tracker.started() || !body.is_empty() {
                return Err(FetchError::BodyRead {
                    address: address.to_string(),
                    source,
                });
            }
            return Err(network(source));
        }

        tracing::debug!(
            address,
            status = tracker.status().unwrap_or(0),
            bytes = body.len(),
            "fetched"
        );
        Ok(body)
    }

    fn configure(&self, easy: &mut curl::easy::Easy, address: &str) -> Result<(), curl::Error> {
        easy.url(address)?;
        easy.get(true)?;
        easy.signal(false)?;
        // A proxy's CONNECT reply is not the origin's response.
        easy.suppress_connect_headers(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.options.max_redirections)?;
        easy.timeout(self.options.timeout)?;
        if let Some(connect) = self.options.connect_timeout {
            easy.connect_timeout(connect)?;
        }
        Ok(())
    }
}
