//! Blocking mock JSON:API server for client tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

/// A captured request for assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    /// Request target exactly as sent, path and query included.
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A mock response to return.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
}

impl MockResponse {
    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
        }
    }

    pub fn error(status: u16, detail: &str) -> Self {
        Self {
            status,
            body: format!(r#"{{"errors":[{{"detail":"{}"}}]}}"#, detail),
        }
    }
}

/// Serves the queued responses, one connection per response, then stops.
pub struct MockBackend {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    worker: Option<JoinHandle<()>>,
}

impl MockBackend {
    pub fn start(responses: Vec<MockResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
        let addr = listener.local_addr().expect("mock server address");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let captured = Arc::clone(&requests);
        let worker = thread::spawn(move || {
            let mut queue: VecDeque<MockResponse> = responses.into();
            while let Some(response) = queue.pop_front() {
                let Ok((stream, _)) = listener.accept() else {
                    return;
                };
                if let Some(request) = serve(stream, &response) {
                    captured.lock().expect("requests lock").push(request);
                }
            }
        });

        Self {
            addr,
            requests,
            worker: Some(worker),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Waits for every queued response to be served and returns the requests.
    pub fn finish(mut self) -> Vec<CapturedRequest> {
        if let Some(worker) = self.worker.take() {
            worker.join().expect("mock server thread");
        }
        self.requests.lock().expect("requests lock").clone()
    }
}

fn serve(stream: TcpStream, response: &MockResponse) -> Option<CapturedRequest> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?.to_string();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).ok()?;
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    let length = headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0; length];
    reader.read_exact(&mut body).ok()?;

    let reply = format!(
        "HTTP/1.1 {} Mock\r\nContent-Type: application/vnd.api+json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        response.body.len(),
        response.body
    );
    let mut stream = reader.into_inner();
    stream.write_all(reply.as_bytes()).ok()?;
    stream.flush().ok()?;

    Some(CapturedRequest {
        method,
        target,
        headers,
        body,
    })
}
