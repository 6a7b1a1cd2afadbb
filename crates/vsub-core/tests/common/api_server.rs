//! Minimal HTTP/1.1 server that mimics the container, episode and subtitle endpoints.
//!
//! Routes are keyed by request path; a route registered as `path#page=N`
//! only answers requests whose `page` query parameter is N. Unknown paths
//! get 404. Every request head is recorded for assertions.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

pub struct ApiServer {
    /// Base URL to use as `api.base_url`, e.g. `http://127.0.0.1:12345/v4`.
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl ApiServer {
    /// Raw request heads received so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Request targets (path and query) received so far.
    pub fn targets(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|head| head.split_whitespace().nth(1).map(str::to_string))
            .collect()
    }
}

#[derive(Default)]
pub struct Routes(HashMap<String, (u16, Vec<u8>)>);

impl Routes {
    pub fn route(mut self, path: &str, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.0.insert(path.to_string(), (status, body.into()));
        self
    }

    pub fn page(self, path: &str, page: u32, body: &str) -> Self {
        self.route(&format!("{path}#page={page}"), 200, body)
    }

    /// Starts the server in a background thread. It runs until the process exits.
    pub fn start(self) -> ApiServer {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let routes = Arc::new(self.0);
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                let log = Arc::clone(&log);
                thread::spawn(move || handle(stream, &routes, &log));
            }
        });
        ApiServer {
            base_url: format!("http://127.0.0.1:{}/v4", port),
            requests,
        }
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    routes: &HashMap<String, (u16, Vec<u8>)>,
    log: &Mutex<Vec<String>>,
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
        Ok(s) => s.to_string(),
        Err(_) => return,
    };
    let target = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    log.lock().unwrap().push(request);

    let (path, query) = target.split_once('?').unwrap_or((target.as_str(), ""));
    let page = query
        .split('&')
        .find_map(|pair| pair.strip_prefix("page="));
    let hit = page
        .and_then(|p| routes.get(&format!("{path}#page={p}")))
        .or_else(|| routes.get(path));

    let (status, body): (u16, &[u8]) = match hit {
        Some((status, body)) => (*status, body.as_slice()),
        None => (404, &b"not found"[..]),
    };
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        if status == 200 { "OK" } else { "Error" },
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}
