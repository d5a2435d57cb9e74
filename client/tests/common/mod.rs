//! Scripted HTTP backend for client tests.
//!
//! Each test lists the responses it expects to serve, in order. The backend
//! accepts one connection per response, records the raw request for
//! assertions and replies with the canned payload.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use presensi_client::{ClientConfig, TableClient};

/// One scripted HTTP response.
pub struct CannedResponse {
    status: u16,
    reason: &'static str,
    content_type: &'static str,
    body: String,
    delay: Option<Duration>,
}

impl CannedResponse {
    /// A JSON response with the given status.
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            reason: reason(status),
            content_type: "application/json",
            body: body.to_string(),
            delay: None,
        }
    }

    /// An HTML response, the backend's error page shape.
    pub fn html(status: u16, body: &str) -> Self {
        Self {
            status,
            reason: reason(status),
            content_type: "text/html",
            body: body.to_string(),
            delay: None,
        }
    }

    /// Delay the response to provoke client timeouts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// The standard reason phrase for a status line.
fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// A one-shot-per-response HTTP server on a loopback port.
pub struct StubBackend {
    base_url: String,
    requests: Receiver<String>,
    handle: JoinHandle<()>,
}

impl StubBackend {
    /// Start serving the scripted responses on an ephemeral port.
    pub fn start(responses: Vec<CannedResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let address = listener.local_addr().expect("stub listener address");
        let (sender, requests) = mpsc::channel();

        let handle = thread::spawn(move || {
            for response in responses {
                let (mut stream, _) = match listener.accept() {
                    Ok(accepted) => accepted,
                    Err(_) => return,
                };

                let request = read_request(&mut stream);
                if sender.send(request).is_err() {
                    return;
                }

                if let Some(delay) = response.delay {
                    thread::sleep(delay);
                }

                let head = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    response.status,
                    response.reason,
                    response.content_type,
                    response.body.len()
                );
                // The client may already have hung up after a timeout
                let _ = stream.write_all(head.as_bytes());
                let _ = stream.write_all(response.body.as_bytes());
                let _ = stream.flush();
            }
        });

        Self {
            base_url: format!("http://{}", address),
            requests,
            handle,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The next recorded request; panics when none arrives.
    pub fn request(&self) -> String {
        self.requests
            .recv_timeout(Duration::from_secs(5))
            .expect("request not received")
    }

    /// The next recorded request, or `None` when the client stayed quiet.
    pub fn try_request(&self) -> Option<String> {
        self.requests.recv_timeout(Duration::from_millis(300)).ok()
    }

    /// Wait for all scripted responses to be served.
    pub fn finish(self) {
        self.handle.join().expect("stub backend thread panicked");
    }
}

/// A client pointed at the stub with default settings.
pub fn test_client(backend: &StubBackend) -> TableClient {
    let config = ClientConfig::new(backend.base_url());
    TableClient::new(config).expect("client construction")
}

/// Extract and decode one query parameter from a raw request.
pub fn query_param(request: &str, name: &str) -> Option<String> {
    let target = request.lines().next()?.split_whitespace().nth(1)?;
    let (_, query) = target.split_once('?')?;

    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key == name {
            Some(percent_decode(value))
        } else {
            None
        }
    })
}

fn percent_decode(encoded: &str) -> String {
    let mut decoded = Vec::with_capacity(encoded.len());
    let mut bytes = encoded.bytes();

    while let Some(byte) = bytes.next() {
        match byte {
            b'%' => {
                let pair = [bytes.next().unwrap_or(b'0'), bytes.next().unwrap_or(b'0')];
                let hex = std::str::from_utf8(&pair).unwrap_or("00");
                decoded.push(u8::from_str_radix(hex, 16).unwrap_or(b'?'));
            }
            b'+' => decoded.push(b' '),
            other => decoded.push(other),
        }
    }

    String::from_utf8_lossy(&decoded).to_string()
}

/// Read one HTTP request, headers plus declared body.
fn read_request(stream: &mut TcpStream) -> String {
    let mut bytes = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => break None,
            Ok(read) => {
                bytes.extend_from_slice(&chunk[..read]);
                if let Some(position) = bytes.windows(4).position(|window| window == b"\r\n\r\n") {
                    break Some(position + 4);
                }
            }
        }
    };

    if let Some(header_end) = header_end {
        let headers = String::from_utf8_lossy(&bytes[..header_end]).to_string();
        let expected = header_end + content_length(&headers);
        while bytes.len() < expected {
            match stream.read(&mut chunk) {
                Ok(0) | Err(_) => break,
                Ok(read) => bytes.extend_from_slice(&chunk[..read]),
            }
        }
    }

    String::from_utf8_lossy(&bytes).to_string()
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
