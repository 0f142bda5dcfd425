//! Result lines on stdout.

use hashfetch_core::dispatch::FetchResult;
use std::io::{self, Write};

/// Writes one line per result: `<address> <fingerprint>` or the error text.
pub(super) fn write_result<W: Write>(out: &mut W, res: &FetchResult) -> io::Result<()> {
    writeln!(out, "{}", res)
}

/// Per-run tallies, logged when the stream closes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(super) struct RunSummary {
    pub ok: usize,
    pub failed: usize,
}

impl RunSummary {
    pub(super) fn record(&mut self, res: &FetchResult) {
        if res.is_ok() {
            self.ok += 1;
        } else {
            self.failed += 1;
        }
    }
}
