use axum::body::Body;
use axum::http::header::{ACCEPT_ENCODING, CONTENT_ENCODING};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use tracing::Level;
use wormhole_gateway::App;
use wormhole_generator::RandomGenerator;

/// Collects everything the fmt subscriber writes.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn take_lines(&self) -> Vec<String> {
        let bytes = std::mem::take(&mut *self.0.lock().unwrap());
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn field<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    line.split_whitespace()
        .find_map(|token| token.strip_prefix(name)?.strip_prefix('='))
}

fn find<'a>(lines: &'a [String], message: &str) -> &'a str {
    lines
        .iter()
        .find(|line| line.contains(message))
        .unwrap_or_else(|| panic!("no `{message}` event in {lines:#?}"))
}

struct Exchange {
    status: StatusCode,
    received: usize,
    lines: Vec<String>,
}

async fn exchange(app: &Router, logs: &CapturedLogs, request: Request<Body>) -> Exchange {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let received = response.into_body().collect().await.unwrap().to_bytes().len();
    Exchange {
        status,
        received,
        lines: logs.take_lines(),
    }
}

fn assert_logged_as_sent(exchange: &Exchange, method: &str, uri: &str) {
    let request_line = find(&exchange.lines, "request received");
    assert_eq!(field(request_line, "method"), Some(method));
    assert_eq!(field(request_line, "uri"), Some(uri));

    let response_line = find(&exchange.lines, "response sent");
    let status = exchange.status.as_u16().to_string();
    let size = exchange.received.to_string();
    assert_eq!(field(response_line, "status"), Some(status.as_str()));
    assert_eq!(field(response_line, "size"), Some(size.as_str()));
}

#[tokio::test]
async fn logged_status_and_size_match_the_wire() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .without_time()
        .with_max_level(Level::INFO)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let app = App::in_memory(RandomGenerator::with_length(10), None);

    let redirect = exchange(
        &app,
        &logs,
        Request::get("/sharaga").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(redirect.status, StatusCode::TEMPORARY_REDIRECT);
    assert_logged_as_sent(&redirect, "GET", "/sharaga");

    let miss = exchange(
        &app,
        &logs,
        Request::get("/nope").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(miss.status, StatusCode::BAD_REQUEST);
    assert_eq!(miss.received, "Invalid URL for GET".len());
    assert_logged_as_sent(&miss, "GET", "/nope");

    let rejected = exchange(
        &app,
        &logs,
        Request::builder()
            .method(Method::PUT)
            .uri("/x/y")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(rejected.status, StatusCode::BAD_REQUEST);
    assert_logged_as_sent(&rejected, "PUT", "/x/y");

    let compressed_rejection = exchange(
        &app,
        &logs,
        Request::post("/x/y")
            .header(ACCEPT_ENCODING, "gzip")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(compressed_rejection.status, StatusCode::BAD_REQUEST);
    assert_ne!(compressed_rejection.received, "Invalid URL".len());
    assert_logged_as_sent(&compressed_rejection, "POST", "/x/y");

    let bad_gzip = exchange(
        &app,
        &logs,
        Request::post("/")
            .header(CONTENT_ENCODING, "gzip")
            .body(Body::from("not gzip"))
            .unwrap(),
    )
    .await;
    assert_eq!(bad_gzip.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_logged_as_sent(&bad_gzip, "POST", "/");
}
