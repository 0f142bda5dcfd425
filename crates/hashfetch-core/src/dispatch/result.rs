//! One entry of the output stream.

use crate::fetch::FetchError;
use crate::fingerprint::Fingerprint;
use std::fmt;

/// Outcome for one address: a fingerprint or the reason there is none.
#[derive(Debug)]
pub struct FetchResult {
    /// Address after scheme normalization.
    pub address: String,
    pub outcome: Result<Fingerprint, FetchError>,
}

impl FetchResult {
    pub fn fingerprint(&self) -> Option<Fingerprint> {
        self.outcome.as_ref().ok().copied()
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.outcome.as_ref().err()
    }

    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// `<address> <fingerprint>` on success, the error description otherwise.
impl fmt::Display for FetchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Ok(fp) => write!(f, "{} {}", self.address, fp),
            Err(e) => write!(f, "{}", e),
        }
    }
}
