//! Scripted HTTP responder for client tests.
//!
//! Serves one canned response per connection, in order, then stops. Every
//! response closes its connection so each request arrives on a fresh socket.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::JoinHandle;
use std::time::Duration;

use fabsync_client::{AccessToken, ClientSettings, FabricClient};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

pub struct Reply {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Reply {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".into(), "application/json".into())],
            body: body.to_string(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

pub struct MockServer {
    listener: TcpListener,
}

impl MockServer {
    pub fn bind() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
        Self { listener }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.listener.local_addr().expect("local addr"))
    }

    pub fn serve(self, replies: Vec<Reply>) -> JoinHandle<Vec<Recorded>> {
        std::thread::spawn(move || {
            let mut recorded = Vec::new();
            for reply in replies {
                let (mut stream, _) = self.listener.accept().expect("accept");
                recorded.push(read_request(&mut stream));
                write_reply(&mut stream, &reply);
            }
            recorded
        })
    }
}

/// Settings pointing every endpoint at `base`, with no polling delays.
pub fn settings(base: &str) -> ClientSettings {
    ClientSettings {
        api_base: format!("{base}/v1"),
        authority_base: base.to_string(),
        timeout: Duration::from_secs(5),
        initial_poll_delay: Duration::ZERO,
        poll_interval: Duration::ZERO,
        max_wait: Duration::from_secs(5),
        ..ClientSettings::default()
    }
}

pub fn client(base: &str) -> FabricClient {
    FabricClient::new(AccessToken("test-token".into()), settings(base))
}

fn read_request(stream: &mut TcpStream) -> Recorded {
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .expect("read timeout");
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let head_end = loop {
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
        let n = stream.read(&mut chunk).expect("read request");
        assert!(n > 0, "client closed before sending headers");
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let mut lines = head.lines();
    let request_line = lines.next().unwrap_or_default().to_string();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut content_length = 0usize;
    let mut authorization = None;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.parse().unwrap_or(0);
            } else if name.eq_ignore_ascii_case("authorization") {
                authorization = Some(value.to_string());
            }
        }
    }

    while buf.len() < head_end + content_length {
        let n = stream.read(&mut chunk).expect("read body");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body = String::from_utf8_lossy(&buf[head_end..]).to_string();

    Recorded {
        method,
        path,
        authorization,
        body,
    }
}

fn write_reply(stream: &mut TcpStream, reply: &Reply) {
    let mut out = format!("HTTP/1.1 {} Mock\r\n", reply.status);
    for (name, value) in &reply.headers {
        out.push_str(&format!("{name}: {value}\r\n"));
    }
    out.push_str(&format!(
        "Content-Length: {}\r\nConnection: close\r\n\r\n",
        reply.body.len()
    ));
    out.push_str(&reply.body);
    stream.write_all(out.as_bytes()).expect("write reply");
    stream.flush().expect("flush reply");
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
