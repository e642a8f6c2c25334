//! Unit tests for the HTTP OTP backend against a local one-shot responder

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use kyc_core::{AccountIdentity, OtpBackend, OtpChannelAdapter, OtpError, Role};
use kyc_shared::config::BackendConfig;

use crate::backend::HttpOtpBackend;

/// Request as seen by the responder
#[derive(Debug)]
struct CapturedRequest {
    request_line: String,
    body: serde_json::Value,
}

/// Serve exactly one request with `status` and `body`
async fn respond_once(
    status: &'static str,
    body: &'static str,
) -> (SocketAddr, oneshot::Receiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();

        let mut buffer = Vec::new();
        let mut chunk = [0u8; 1024];
        let header_end = loop {
            let n = stream.read(&mut chunk).await.unwrap();
            buffer.extend_from_slice(&chunk[..n]);
            if let Some(pos) = find(&buffer, b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
        let content_length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        while buffer.len() < header_end + content_length {
            let n = stream.read(&mut chunk).await.unwrap();
            buffer.extend_from_slice(&chunk[..n]);
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();

        let _ = tx.send(CapturedRequest {
            request_line: head.lines().next().unwrap_or_default().to_string(),
            body: serde_json::from_slice(&buffer[header_end..header_end + content_length])
                .unwrap_or(serde_json::Value::Null),
        });
    });

    (addr, rx)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn backend_for(addr: SocketAddr) -> HttpOtpBackend {
    let mut config = BackendConfig::new(format!("http://{}/api", addr));
    config.request_timeout_secs = 5;
    HttpOtpBackend::new(&config).unwrap()
}

#[tokio::test]
async fn test_send_posts_to_customer_path() {
    let (addr, captured) = respond_once("200 OK", r#"{"success":true,"message":"Sent"}"#).await;

    let response = backend_for(addr)
        .endpoints(Role::Customer)
        .send("0xabc", "9876543210")
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(response.message(), Some("Sent"));

    let request = captured.await.unwrap();
    assert_eq!(request.request_line, "POST /api/kyc/customer/otp/send HTTP/1.1");
    assert_eq!(
        request.body,
        serde_json::json!({"walletAddress": "0xabc", "phone": "9876543210"})
    );
}

#[tokio::test]
async fn test_verify_posts_to_agent_path() {
    let (addr, captured) =
        respond_once("200 OK", r#"{"success":false,"message":"Invalid OTP"}"#).await;

    let response = backend_for(addr)
        .endpoints(Role::Agent)
        .verify("0xabc", "123456")
        .await
        .unwrap();

    assert!(!response.success);
    assert_eq!(response.message(), Some("Invalid OTP"));

    let request = captured.await.unwrap();
    assert_eq!(request.request_line, "POST /api/kyc/agent/otp/verify HTTP/1.1");
    assert_eq!(request.body, serde_json::json!({"walletAddress": "0xabc", "otp": "123456"}));
}

#[tokio::test]
async fn test_resend_body_carries_only_identity() {
    let (addr, captured) = respond_once("200 OK", r#"{"success":true}"#).await;

    backend_for(addr)
        .endpoints(Role::Customer)
        .resend("0xabc")
        .await
        .unwrap();

    let request = captured.await.unwrap();
    assert_eq!(request.request_line, "POST /api/kyc/customer/otp/resend HTTP/1.1");
    assert_eq!(request.body, serde_json::json!({"walletAddress": "0xabc"}));
}

#[tokio::test]
async fn test_rejection_with_error_status_is_a_reply() {
    let (addr, _captured) =
        respond_once("400 Bad Request", r#"{"success":false,"message":"Invalid OTP"}"#).await;

    let response = backend_for(addr)
        .endpoints(Role::Customer)
        .verify("0xabc", "123456")
        .await
        .unwrap();

    assert!(!response.success);
    assert_eq!(response.message(), Some("Invalid OTP"));
}

#[tokio::test]
async fn test_wrong_code_with_error_status_allows_retry() {
    let (addr, _captured) =
        respond_once("400 Bad Request", r#"{"success":false,"message":"Invalid OTP"}"#).await;
    let backend = backend_for(addr);
    let adapter = OtpChannelAdapter::for_role(&backend, Role::Customer);
    let identity = AccountIdentity::new("0xabc").unwrap();

    let err = adapter.verify(&identity, "123456").await.unwrap_err();

    assert_eq!(
        err,
        OtpError::InvalidCode {
            message: "Invalid OTP".to_string()
        }
    );
    assert!(err.allows_code_retry());
}

#[tokio::test]
async fn test_error_status_surfaces_body_message() {
    let (addr, _captured) = respond_once(
        "429 Too Many Requests",
        r#"{"error":"rate_limited","message":"Too many attempts"}"#,
    )
    .await;

    let err = backend_for(addr)
        .endpoints(Role::Customer)
        .send("0xabc", "9876543210")
        .await
        .unwrap_err();

    assert_eq!(err.message.as_deref(), Some("Too many attempts"));
    assert!(err.detail.contains("429"));
}

#[tokio::test]
async fn test_error_status_without_message() {
    let (addr, _captured) = respond_once("502 Bad Gateway", r#"{"error":"upstream"}"#).await;

    let err = backend_for(addr)
        .endpoints(Role::Agent)
        .resend("0xabc")
        .await
        .unwrap_err();

    assert!(err.message.is_none());
    assert!(err.detail.contains("502"));
}

#[tokio::test]
async fn test_success_flag_with_error_status_is_a_transport_error() {
    let (addr, _captured) = respond_once("500 Internal Server Error", r#"{"success":true}"#).await;

    let err = backend_for(addr)
        .endpoints(Role::Customer)
        .send("0xabc", "9876543210")
        .await
        .unwrap_err();

    assert!(err.detail.contains("500"));
}

#[tokio::test]
async fn test_unparseable_success_body_is_a_transport_error() {
    let (addr, _captured) = respond_once("200 OK", r#"{"ok":1}"#).await;

    let err = backend_for(addr)
        .endpoints(Role::Customer)
        .verify("0xabc", "123456")
        .await
        .unwrap_err();

    assert!(err.detail.contains("Failed to parse"));
}

#[tokio::test]
async fn test_unreachable_backend_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = backend_for(addr)
        .endpoints(Role::Customer)
        .send("0xabc", "9876543210")
        .await
        .unwrap_err();

    assert!(err.detail.contains("Failed to reach"));
    assert!(err.message.is_none());
}
