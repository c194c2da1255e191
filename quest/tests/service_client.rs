//! Integration tests driving the execution client over a real socket.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

use quest::io::config::ClientConfig;
use quest::io::service::{ExecutionClient, RunService, ServiceError};

/// Serve exactly one canned HTTP response on a loopback socket and return
/// the base URL to reach it.
fn one_shot_server(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        drain_request(&mut stream);
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).expect("write response");
    });
    format!("http://{addr}")
}

/// Read the request head and as much payload as Content-Length announces,
/// so the client is never cut off mid-write.
fn drain_request(stream: &mut TcpStream) {
    let mut data = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        let n = stream.read(&mut buf).expect("read request");
        if n == 0 {
            return;
        }
        data.extend_from_slice(&buf[..n]);
        if let Some(header_end) = find_header_end(&data) {
            let headers = String::from_utf8_lossy(&data[..header_end]).to_ascii_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if data.len() >= header_end + 4 + content_length {
                return;
            }
        }
    }
}

fn find_header_end(data: &[u8]) -> Option<usize> {
    data.windows(4).position(|window| window == b"\r\n\r\n")
}

fn client_for(base_url: String) -> ExecutionClient {
    let config = ClientConfig {
        service_url: base_url,
        request_timeout_secs: 5,
        ..ClientConfig::default()
    };
    ExecutionClient::new(&config).expect("build client")
}

#[test]
fn run_round_trips_a_success_response() {
    let base_url = one_shot_server(
        "200 OK",
        r#"{"passed": 2, "failed": 1, "coverage_percent": 88, "score": 103, "output": "2 passed, 1 failed in 0.04s"}"#,
    );
    let client = client_for(base_url);

    let result = client
        .run("def add(a, b):\n    return a + b\n", "def test(): pass\n")
        .expect("run succeeds");

    assert_eq!(result.passed, 2);
    assert_eq!(result.failed, 1);
    assert_eq!(result.coverage_percent, Some(88.0));
    assert_eq!(result.score, Some(103.0));
    assert!(result.output.contains("2 passed"));
}

#[test]
fn error_detail_from_the_service_is_surfaced() {
    let base_url = one_shot_server(
        "422 Unprocessable Entity",
        r#"{"detail": "Tests cannot contain only whitespace"}"#,
    );
    let client = client_for(base_url);

    let err = client.run("code", "   ").expect_err("service rejects");
    assert_eq!(
        err,
        ServiceError::Protocol("Tests cannot contain only whitespace".to_string())
    );
}

#[test]
fn status_without_detail_synthesizes_a_message() {
    let base_url = one_shot_server("500 Internal Server Error", "{}");
    let client = client_for(base_url);

    let err = client.run("code", "tests").expect_err("server error");
    assert_eq!(err, ServiceError::Protocol("HTTP 500".to_string()));
}

#[test]
fn unreachable_service_is_a_network_error() {
    // Bind and immediately drop to get a port nothing listens on.
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        listener.local_addr().expect("local addr")
    };
    let client = client_for(format!("http://{addr}"));

    let err = client.run("code", "tests").expect_err("nothing listening");
    assert!(matches!(err, ServiceError::Network(_)));
}

#[test]
fn health_check_accepts_a_success_status() {
    let base_url = one_shot_server("200 OK", r#"{"status": "ok"}"#);
    let client = client_for(base_url);
    client.health().expect("healthy service");
}

#[test]
fn health_check_rejects_a_failure_status() {
    let base_url = one_shot_server("503 Service Unavailable", "{}");
    let client = client_for(base_url);
    let err = client.health().expect_err("unhealthy service");
    assert_eq!(err, ServiceError::Protocol("HTTP 503".to_string()));
}
