//! Per-address fetch failures.

use thiserror::Error;

/// Why a single address produced no fingerprint.
///
/// Every variant carries the (normalized) address it belongs to, so a failure
/// can be printed on its own without the surrounding result.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, DNS, request setup or timeout before a response arrived.
    #[error("failed to make request to {address}: {source}")]
    Network {
        address: String,
        #[source]
        source: curl::Error,
    },
    /// The response started but the body could not be read to the end.
    #[error("failed to read body from {address}: {source}")]
    BodyRead {
        address: String,
        #[source]
        source: curl::Error,
    },
    /// The blocking worker running the fetch panicked or was shut down.
    #[error("fetch worker for {address} did not complete: {message}")]
    Worker { address: String, message: String },
}

impl FetchError {
    pub fn address(&self) -> &str {
        match self {
            FetchError::Network { address, .. }
            | FetchError::BodyRead { address, .. }
            | FetchError::Worker { address, .. } => address,
        }
    }

    /// True if the underlying transfer hit the client timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            FetchError::Network { source, .. } | FetchError::BodyRead { source, .. } => {
                source.is_operation_timedout()
            }
            FetchError::Worker { .. } => false,
        }
    }
}
