pub mod config;
pub mod logging;

pub mod address;
pub mod dispatch;
pub mod fetch;
pub mod fingerprint;
