// tests/helpers/mod.rs
//
// One-shot mock HTTP server for exercising the blocking clients without a
// running Anki or a real API key. Serves a single canned response and hands
// back the raw request for assertions.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

pub struct MockServer {
    url: String,
    handle: JoinHandle<String>,
}

/// Serve exactly one request with the given status line (e.g. `"200 OK"`)
/// and JSON body.
pub fn one_shot(status: &str, body: &str) -> MockServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
    let addr = listener.local_addr().expect("mock server addr");
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = thread::spawn(move || {
        let (mut socket, _) = listener.accept().expect("accept connection");
        let request = read_request(&mut socket);
        socket.write_all(response.as_bytes()).expect("write response");
        socket.flush().expect("flush response");
        request
    });

    MockServer {
        url: format!("http://{addr}"),
        handle,
    }
}

impl MockServer {
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Wait for the server thread and return the raw request it captured.
    pub fn request(self) -> String {
        self.handle.join().expect("mock server thread panicked")
    }
}

/// Extract the JSON body of a captured request.
pub fn request_body(raw: &str) -> serde_json::Value {
    let body = raw
        .split_once("\r\n\r\n")
        .map(|(_, body)| body)
        .unwrap_or_default();
    serde_json::from_str(body).expect("request body should be JSON")
}

fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).expect("read request");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(header_end) = find_header_end(&buf) {
            let headers = String::from_utf8_lossy(&buf[..header_end]);
            if buf.len() >= header_end + 4 + content_length(&headers) {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn content_length(headers: &str) -> usize {
    headers
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse().ok()
            } else {
                None
            }
        })
        .unwrap_or(0)
}
