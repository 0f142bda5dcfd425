//! Minimal HTTP/1.1 server for dispatcher integration tests.
//!
//! Serves a single static body to every GET. The query string shapes the
//! response:
//! - `delay=<n>ms|<n>s` sleeps before answering,
//! - `status=<code>` answers with that status (body unchanged),
//! - `truncate` advertises more bytes than it sends, then closes,
//! - `redirect=<target>` answers 302 with `Location: <target>` (the target
//!   is encoded with [`DelayServer::redirect_to`]).
//!
//! The server counts requests and tracks how many were being handled at once.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Default)]
pub struct ServerStats {
    requests: AtomicUsize,
    active: AtomicUsize,
    peak_active: AtomicUsize,
}

impl ServerStats {
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn peak_active(&self) -> usize {
        self.peak_active.load(Ordering::SeqCst)
    }
}

pub struct DelayServer {
    /// Base address without scheme, e.g. "127.0.0.1:12345".
    pub host: String,
    pub stats: Arc<ServerStats>,
}

impl DelayServer {
    /// Full URL for `path_and_query` (which must start with '/').
    pub fn url(&self, path_and_query: &str) -> String {
        format!("http://{}{}", self.host, path_and_query)
    }

    /// URL of a request that answers after `delay`.
    pub fn delayed(&self, delay: &str) -> String {
        self.url(&format!("/?delay={}", delay))
    }

    /// URL that redirects to `target`, a path on this server or a full URL.
    pub fn redirect_to(&self, target: &str) -> String {
        self.url(&format!("/?redirect={}", encode(target)))
    }
}

/// Starts a server in a background thread serving `body`. The server runs
/// until the process exits.
pub fn start(body: Vec<u8>) -> DelayServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    let stats = Arc::new(ServerStats::default());
    let server_stats = Arc::clone(&stats);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let stats = Arc::clone(&server_stats);
            thread::spawn(move || handle(stream, &body, &stats));
        }
    });
    DelayServer {
        host: format!("127.0.0.1:{}", port),
        stats,
    }
}

/// Address of a port nothing listens on (connection refused).
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

fn handle(mut stream: TcpStream, body: &[u8], stats: &ServerStats) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let query = parse_query(&request);

    stats.requests.fetch_add(1, Ordering::SeqCst);
    let now = stats.active.fetch_add(1, Ordering::SeqCst) + 1;
    stats.peak_active.fetch_max(now, Ordering::SeqCst);

    if let Some(delay) = query.delay {
        thread::sleep(delay);
    }
    // Leave the active set before answering so the count never outlives the
    // client's view of the request.
    stats.active.fetch_sub(1, Ordering::SeqCst);

    if let Some(location) = query.redirect {
        let head = format!(
            "HTTP/1.1 302 Found\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            location
        );
        let _ = stream.write_all(head.as_bytes());
        let _ = stream.flush();
        return;
    }

    let status = query.status.unwrap_or(200);
    let advertised = if query.truncate {
        body.len() + 1024
    } else {
        body.len()
    };
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason(status),
        advertised
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
    let _ = stream.flush();
}

#[derive(Debug, Default)]
struct Query {
    delay: Option<Duration>,
    status: Option<u16>,
    truncate: bool,
    redirect: Option<String>,
}

/// Reads the query string of the request line ("GET /?a=b HTTP/1.1").
fn parse_query(request: &str) -> Query {
    let mut q = Query::default();
    let target = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/");
    let Some((_, query)) = target.split_once('?') else {
        return q;
    };
    for pair in query.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        match key {
            "delay" => q.delay = parse_duration(value),
            "status" => q.status = value.parse().ok(),
            "truncate" => q.truncate = true,
            "redirect" => q.redirect = Some(decode(value)),
            _ => {}
        }
    }
    q
}

/// Escapes the characters that would otherwise split the outer query.
fn encode(target: &str) -> String {
    target
        .replace('%', "%25")
        .replace('?', "%3F")
        .replace('&', "%26")
        .replace('=', "%3D")
}

fn decode(value: &str) -> String {
    value
        .replace("%3D", "=")
        .replace("%26", "&")
        .replace("%3F", "?")
        .replace("%25", "%")
}

/// "200ms" or "1s".
fn parse_duration(value: &str) -> Option<Duration> {
    if let Some(ms) = value.strip_suffix("ms") {
        return ms.parse().ok().map(Duration::from_millis);
    }
    value
        .strip_suffix('s')
        .and_then(|s| s.parse().ok())
        .map(Duration::from_secs)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        302 => "Found",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}
