//! One-shot HTTP server used by client tests.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use rustlatch_core::LatchConfig;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::clock::FixedClock;
use crate::transport::Transport;

/// A request as seen by the mock server.
#[derive(Debug)]
pub struct CapturedRequest {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2015, 2, 15, 14, 53, 0).unwrap()
}

/// Serve exactly one request with `status` and `body`, returning the base URL
/// and a handle resolving to the captured request.
pub async fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut raw = Vec::new();
        let mut buf = [0_u8; 4096];

        let header_end = loop {
            let n = stream.read(&mut buf).await.unwrap();
            assert!(n > 0, "connection closed before headers were complete");
            raw.extend_from_slice(&buf[..n]);
            if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos;
            }
        };

        let head = String::from_utf8(raw[..header_end].to_vec()).unwrap();
        let mut lines = head.split("\r\n");
        let request_line = lines.next().unwrap().to_owned();
        let mut parts = request_line.split(' ');
        let method = parts.next().unwrap().to_owned();
        let target = parts.next().unwrap().to_owned();
        let headers: Vec<(String, String)> = lines
            .filter_map(|line| line.split_once(':'))
            .map(|(k, v)| (k.trim().to_owned(), v.trim().to_owned()))
            .collect();

        let content_length = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
            .map_or(0, |(_, v)| v.parse::<usize>().unwrap());
        let mut request_body = raw[header_end + 4..].to_vec();
        while request_body.len() < content_length {
            let n = stream.read(&mut buf).await.unwrap();
            assert!(n > 0, "connection closed before body was complete");
            request_body.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len(),
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();

        CapturedRequest {
            method,
            target,
            headers,
            body: String::from_utf8(request_body).unwrap(),
        }
    });

    (format!("http://{addr}"), handle)
}

/// Transport pointed at `base_url` with a frozen clock.
pub fn transport_for(base_url: &str) -> Transport {
    let config = LatchConfig {
        api_url: base_url.to_owned(),
        ..LatchConfig::default()
    };
    Transport::new(config)
        .unwrap()
        .with_clock(FixedClock(fixed_time()))
}

/// Shared counter of observer callbacks.
#[derive(Debug, Default)]
pub struct CountingObserver {
    pub started: std::sync::atomic::AtomicUsize,
    pub received: std::sync::atomic::AtomicUsize,
}

impl crate::observer::RequestObserver for CountingObserver {
    fn on_request_start(&self, _descriptor: &rustlatch_auth::RequestDescriptor) {
        self.started
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
    }

    fn on_response_receive(
        &self,
        _descriptor: &rustlatch_auth::RequestDescriptor,
        _status: http::StatusCode,
        _body: &str,
    ) {
        self.received
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
    }
}

pub fn counting_observer() -> Arc<CountingObserver> {
    Arc::new(CountingObserver::default())
}
