//! Unit tests for the OTP channel adapter

use std::sync::Arc;

use kyc_shared::types::ChannelResponse;

use crate::domain::entities::Role;
use crate::domain::value_objects::AccountIdentity;
use crate::errors::{OtpError, TransportError};
use crate::services::otp_channel::OtpChannelAdapter;

use super::mocks::{Call, ScriptedBackend, ScriptedEndpoints};

fn identity() -> AccountIdentity {
    AccountIdentity::new("0xWallet").unwrap()
}

#[tokio::test]
async fn test_role_selects_endpoint_triple() {
    let backend = ScriptedBackend::new();

    let agent = OtpChannelAdapter::for_role(&backend, Role::Agent);
    agent.send(&identity(), "9876543210").await.unwrap();

    assert_eq!(backend.agent.call_count(), 1);
    assert_eq!(backend.customer.call_count(), 0);

    let customer = OtpChannelAdapter::for_role(&backend, Role::Customer);
    customer.resend(&identity()).await.unwrap();

    assert_eq!(backend.customer.calls(), vec![Call::Resend { identity: "0xwallet".to_string() }]);
    assert_eq!(customer.role(), Role::Customer);
}

#[tokio::test]
async fn test_send_success_keeps_backend_message() {
    let endpoints = Arc::new(ScriptedEndpoints::new());
    endpoints.push(Ok(ChannelResponse::ok().with_message("Code dispatched")));
    let adapter = OtpChannelAdapter::new(Role::Customer, endpoints.clone());

    let receipt = adapter.send(&identity(), "9876543210").await.unwrap();
    assert_eq!(receipt.message.as_deref(), Some("Code dispatched"));
    assert_eq!(
        endpoints.calls(),
        vec![Call::Send {
            identity: "0xwallet".to_string(),
            phone: "9876543210".to_string()
        }]
    );
}

#[tokio::test]
async fn test_send_rejection_surfaces_backend_message() {
    let endpoints = Arc::new(ScriptedEndpoints::new());
    endpoints.push_rejected("Too many requests");
    let adapter = OtpChannelAdapter::new(Role::Customer, endpoints);

    let err = adapter.send(&identity(), "9876543210").await.unwrap_err();
    assert_eq!(
        err,
        OtpError::ChannelError {
            message: "Too many requests".to_string()
        }
    );
}

#[tokio::test]
async fn test_rejection_without_message_uses_fallback() {
    let endpoints = Arc::new(ScriptedEndpoints::new());
    endpoints.push(Ok(ChannelResponse {
        success: false,
        message: None,
    }));
    endpoints.push(Ok(ChannelResponse {
        success: false,
        message: None,
    }));
    let adapter = OtpChannelAdapter::new(Role::Agent, endpoints);

    let err = adapter.send(&identity(), "9876543210").await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to send OTP. Please try again.");

    let err = adapter.resend(&identity()).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to resend OTP. Please try again.");
}

#[tokio::test]
async fn test_verify_rejection_is_invalid_code() {
    let endpoints = Arc::new(ScriptedEndpoints::new());
    endpoints.push(Ok(ChannelResponse {
        success: false,
        message: None,
    }));
    let adapter = OtpChannelAdapter::new(Role::Customer, endpoints);

    let err = adapter.verify(&identity(), "123456").await.unwrap_err();
    assert!(matches!(err, OtpError::InvalidCode { .. }));
    assert!(err.allows_code_retry());
    assert_eq!(err.to_string(), "Invalid OTP. Please try again.");
}

#[tokio::test]
async fn test_verify_transport_failure_is_channel_error() {
    let endpoints = Arc::new(ScriptedEndpoints::new());
    endpoints.push_transport_error("connection refused");
    let adapter = OtpChannelAdapter::new(Role::Customer, endpoints);

    let err = adapter.verify(&identity(), "123456").await.unwrap_err();
    assert_eq!(
        err,
        OtpError::ChannelError {
            message: "An error occurred while verifying OTP. Please try again.".to_string()
        }
    );
    assert!(!err.allows_code_retry());
}

#[tokio::test]
async fn test_transport_failure_with_body_message() {
    let endpoints = Arc::new(ScriptedEndpoints::new());
    endpoints.push(Err(
        TransportError::new("HTTP 429").with_message("Rate limit exceeded, try later")
    ));
    let adapter = OtpChannelAdapter::new(Role::Customer, endpoints);

    let err = adapter.resend(&identity()).await.unwrap_err();
    assert_eq!(err.to_string(), "Rate limit exceeded, try later");
}

#[tokio::test]
async fn test_preconditions_reject_without_calling_backend() {
    let endpoints = Arc::new(ScriptedEndpoints::new());
    let adapter = OtpChannelAdapter::new(Role::Customer, endpoints.clone());

    let err = adapter.send(&identity(), "98765").await.unwrap_err();
    assert!(matches!(err, OtpError::InvalidPhone { .. }));

    let err = adapter.send(&identity(), "987-654-3210").await.unwrap_err();
    assert!(matches!(err, OtpError::InvalidPhone { .. }));

    for code in ["12345", "1234567", "12a456", ""] {
        let err = adapter.verify(&identity(), code).await.unwrap_err();
        assert_eq!(err, OtpError::InvalidCodeFormat { expected: 6 });
    }

    assert_eq!(endpoints.call_count(), 0);
}
