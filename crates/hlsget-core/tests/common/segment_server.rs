//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves fixed bodies by request path, counts how many times each path is
//! requested, and records the User-Agent header of every request. Paths in
//! the failing set always answer 500.

use std::collections::{HashMap, HashSet};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

/// Handle to a running server. The server runs until the process exits.
pub struct SegmentServer {
    base_url: String,
    hits: Arc<Mutex<HashMap<String, usize>>>,
    user_agents: Arc<Mutex<Vec<String>>>,
}

impl SegmentServer {
    /// Base URL of the server, always ending in `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// How many times `path` (including any query) was requested.
    pub fn hits(&self, path: &str) -> usize {
        self.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }

    /// Total requests received.
    pub fn total_hits(&self) -> usize {
        self.hits.lock().unwrap().values().sum()
    }

    /// User-Agent header values of all requests, in arrival order.
    pub fn user_agents(&self) -> Vec<String> {
        self.user_agents.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread serving `bodies` (path -> body).
pub fn start(bodies: HashMap<String, Vec<u8>>) -> SegmentServer {
    start_with_failures(bodies, HashSet::new())
}

/// Like `start`, but every path in `failing` answers 500.
pub fn start_with_failures(
    bodies: HashMap<String, Vec<u8>>,
    failing: HashSet<String>,
) -> SegmentServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let bodies = Arc::new(bodies);
    let failing = Arc::new(failing);
    let hits: Arc<Mutex<HashMap<String, usize>>> = Arc::new(Mutex::new(HashMap::new()));
    let user_agents: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    {
        let hits = Arc::clone(&hits);
        let user_agents = Arc::clone(&user_agents);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let bodies = Arc::clone(&bodies);
                let failing = Arc::clone(&failing);
                let hits = Arc::clone(&hits);
                let user_agents = Arc::clone(&user_agents);
                thread::spawn(move || handle(stream, &bodies, &failing, &hits, &user_agents));
            }
        });
    }

    SegmentServer {
        base_url: format!("http://127.0.0.1:{}/", port),
        hits,
        user_agents,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    bodies: &HashMap<String, Vec<u8>>,
    failing: &HashSet<String>,
    hits: &Mutex<HashMap<String, usize>>,
    user_agents: &Mutex<Vec<String>>,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let (method, path, user_agent) = parse_request(request);
    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        return;
    }

    *hits.lock().unwrap().entry(path.to_string()).or_insert(0) += 1;
    if let Some(ua) = user_agent {
        user_agents.lock().unwrap().push(ua.to_string());
    }

    if failing.contains(path) {
        let body = b"oops";
        let response = format!(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        let _ = stream.write_all(response.as_bytes());
        let _ = stream.write_all(body);
        return;
    }

    match bodies.get(path) {
        Some(body) => {
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.write_all(body);
        }
        None => {
            let _ = stream.write_all(
                b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            );
        }
    }
}

/// Returns (method, request path including query, User-Agent header value).
fn parse_request(request: &str) -> (&str, &str, Option<&str>) {
    let mut lines = request.lines();
    let request_line = lines.next().unwrap_or("");
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("/");

    let mut user_agent = None;
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("user-agent") {
                user_agent = Some(value.trim());
            }
        }
    }
    (method, path, user_agent)
}
