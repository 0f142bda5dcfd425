//! Address normalization.
//!
//! Addresses given on the command line may omit the scheme (`example.com/x`).
//! Anything that does not already start with `http://` or `https://` gets
//! `http://` prepended; everything else is left for the fetcher to reject.

const HTTP_PREFIX: &str = "http://";
const HTTPS_PREFIX: &str = "https://";

/// Ensures `address` carries an HTTP(S) scheme.
///
/// # Examples
///
/// - `normalize_address("example.com/path")` → `"http://example.com/path"`
/// - `normalize_address("https://x")` → `"https://x"`
pub fn normalize_address(address: &str) -> String {
    if address.starts_with(HTTP_PREFIX) || address.starts_with(HTTPS_PREFIX) {
        address.to_string()
    } else {
        format!("{}{}", HTTP_PREFIX, address)
    }
}
