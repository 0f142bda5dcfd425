//! Tracks header blocks seen during a transfer.
//!
//! With redirects enabled libcurl reports one header block per hop. The
//! response counts as started only once a non-redirect block has been
//! terminated; a transfer error after that point is a body read failure.

#[derive(Debug, Default)]
pub(super) struct HeaderTracker {
    status: Option<u32>,
    started: bool,
}

impl HeaderTracker {
    /// Feed one raw header line as delivered by libcurl (CRLF included).
    pub(super) fn line(&mut self, raw: &[u8]) {
        let line = String::from_utf8_lossy(raw);
        let line = line.trim_end();
        if line.is_empty() {
            if let Some(code) = self.status {
                if code >= 200 && !is_redirect(code) {
                    self.started = true;
                }
            }
            return;
        }
        if line.starts_with("HTTP/") {
            self.status = parse_status_line(line);
        }
    }

    /// Status code of the most recent status line, if any.
    pub(super) fn status(&self) -> Option<u32> {
        self.status
    }

    pub(super) fn started(&self) -> bool {
        self.started
    }
}

fn is_redirect(code: u32) -> bool {
    (300..400).contains(&code) && code != 304
}

fn parse_status_line(line: &str) -> Option<u32> {
    line.split_whitespace().nth(1)?.parse().ok()
}
