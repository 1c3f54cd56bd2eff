//! Integration tests for HttpFetcher against a throwaway local server.

use std::time::Duration;

use showcase_config::AssetSpec;
use showcase_fetch::{FetchError, Fetcher, HttpFetcher};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve exactly one connection with a canned raw HTTP response.
async fn serve_once(response: Vec<u8>) -> String {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();

  tokio::spawn(async move {
    let (mut socket, _) = listener.accept().await.unwrap();
    read_request_head(&mut socket).await;
    socket.write_all(&response).await.unwrap();
    socket.shutdown().await.ok();
  });

  format!("http://{addr}/image.jpg")
}

async fn read_request_head(socket: &mut tokio::net::TcpStream) {
  let mut buf = Vec::new();
  let mut chunk = [0u8; 1024];
  while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
    let n = socket.read(&mut chunk).await.unwrap();
    if n == 0 {
      break;
    }
    buf.extend_from_slice(&chunk[..n]);
  }
}

fn raw_response(status_line: &str, body: &[u8]) -> Vec<u8> {
  let mut out = format!(
    "HTTP/1.1 {status_line}\r\nContent-Type: image/jpeg\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
    body.len()
  )
  .into_bytes();
  out.extend_from_slice(body);
  out
}

fn fetcher(timeout: Duration) -> HttpFetcher {
  HttpFetcher::new(timeout).expect("failed to build fetcher")
}

#[tokio::test]
async fn test_fetch_success_returns_body() {
  let body = b"\xff\xd8\xff\xe0not-really-a-jpeg".to_vec();
  let url = serve_once(raw_response("200 OK", &body)).await;

  let asset = AssetSpec::new("a.jpg", url);
  let bytes = fetcher(Duration::from_secs(5))
    .fetch(&asset)
    .await
    .expect("fetch should succeed");

  assert_eq!(bytes.as_ref(), body.as_slice());
}

#[tokio::test]
async fn test_fetch_non_success_status_is_failure() {
  let url = serve_once(raw_response("404 Not Found", b"missing")).await;

  let asset = AssetSpec::new("a.jpg", url.clone());
  let err = fetcher(Duration::from_secs(5)).fetch(&asset).await.unwrap_err();

  assert_eq!(err, FetchError::Status { url, status: 404 });
}

#[tokio::test]
async fn test_fetch_server_error_is_failure() {
  let url = serve_once(raw_response("503 Service Unavailable", b"")).await;

  let asset = AssetSpec::new("a.jpg", url);
  let err = fetcher(Duration::from_secs(5)).fetch(&asset).await.unwrap_err();

  assert!(matches!(err, FetchError::Status { status: 503, .. }));
}

#[tokio::test]
async fn test_fetch_times_out() {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();

  // Accept and hold the connection open without ever answering.
  let server = tokio::spawn(async move {
    let (socket, _) = listener.accept().await.unwrap();
    tokio::time::sleep(Duration::from_secs(5)).await;
    drop(socket);
  });

  let asset = AssetSpec::new("slow.jpg", format!("http://{addr}/slow.jpg"));
  let err = fetcher(Duration::from_millis(200))
    .fetch(&asset)
    .await
    .unwrap_err();

  assert!(matches!(err, FetchError::Timeout { .. }), "got {err:?}");
  server.abort();
}

#[tokio::test]
async fn test_fetch_connection_refused() {
  // Bind then drop to obtain a port with nothing listening.
  let addr = {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
  };

  let asset = AssetSpec::new("gone.jpg", format!("http://{addr}/gone.jpg"));
  let err = fetcher(Duration::from_secs(5)).fetch(&asset).await.unwrap_err();

  assert!(matches!(err, FetchError::Connect { .. }), "got {err:?}");
}
