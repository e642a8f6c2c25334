//! Integration tests for the verification flow through the public API

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use kyc_core::{
    CompletionSink, FormField, OtpBackend, OtpChallengeState, OtpChannelAdapter, OtpEndpoints,
    OtpError, Role, StaticIdentity, SubmissionCoordinator, SubmissionError, TransportError,
    VerificationConfig, VerificationRecord, VerificationSession,
};
use kyc_shared::types::ChannelResponse;

const ACCEPTED_CODE: &str = "654321";

/// Endpoint triple that accepts a single fixed code
#[derive(Default)]
struct FixedCodeEndpoints {
    sends: AtomicUsize,
    verifies: AtomicUsize,
    resends: AtomicUsize,
}

#[async_trait]
impl OtpEndpoints for FixedCodeEndpoints {
    async fn send(&self, _identity: &str, _phone: &str) -> Result<ChannelResponse, TransportError> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        Ok(ChannelResponse::ok())
    }

    async fn verify(&self, _identity: &str, code: &str) -> Result<ChannelResponse, TransportError> {
        self.verifies.fetch_add(1, Ordering::SeqCst);
        if code == ACCEPTED_CODE {
            Ok(ChannelResponse::ok())
        } else {
            Ok(ChannelResponse::rejected("Incorrect OTP"))
        }
    }

    async fn resend(&self, _identity: &str) -> Result<ChannelResponse, TransportError> {
        self.resends.fetch_add(1, Ordering::SeqCst);
        Ok(ChannelResponse::ok())
    }
}

#[derive(Default)]
struct TwoRoleBackend {
    customer: Arc<FixedCodeEndpoints>,
    agent: Arc<FixedCodeEndpoints>,
}

impl OtpBackend for TwoRoleBackend {
    fn endpoints(&self, role: Role) -> Arc<dyn OtpEndpoints> {
        match role {
            Role::Customer => self.customer.clone(),
            Role::Agent => self.agent.clone(),
        }
    }
}

#[derive(Default)]
struct CollectingSink {
    records: Mutex<Vec<VerificationRecord>>,
}

#[async_trait]
impl CompletionSink for CollectingSink {
    async fn complete(&self, record: &VerificationRecord) -> Result<(), String> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

struct Flow {
    backend: TwoRoleBackend,
    sink: Arc<CollectingSink>,
    session: VerificationSession,
}

fn start_flow(role: Role) -> Flow {
    let backend = TwoRoleBackend::default();
    let sink = Arc::new(CollectingSink::default());
    let session = VerificationSession::new(
        OtpChannelAdapter::for_role(&backend, role),
        Arc::new(StaticIdentity::new("0xFeedBeef")),
        SubmissionCoordinator::new(sink.clone()),
        VerificationConfig::default(),
    )
    .expect("valid config");

    Flow {
        backend,
        sink,
        session,
    }
}

async fn fill(session: &VerificationSession, full_name: &str) {
    session.set_field(FormField::FullName, full_name).await.unwrap();
    session.set_field(FormField::Phone, "9876543210").await.unwrap();
    session
        .set_field(FormField::NationalId, "123456789012")
        .await
        .unwrap();
    session.set_field(FormField::TaxId, "ABCDE1234F").await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn scenario_a_send_starts_sixty_second_cooldown() {
    let flow = start_flow(Role::Customer);
    fill(&flow.session, "Asha Rao").await;

    let event = flow.session.request_send().await.unwrap();
    assert_eq!(event.message(), "OTP sent successfully to your mobile number!");

    let snapshot = flow.session.snapshot().await;
    assert_eq!(snapshot.state, OtpChallengeState::Sent);
    assert_eq!(snapshot.cooldown_remaining, 60);
    assert_eq!(flow.backend.customer.sends.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn scenario_b_rejected_code_returns_to_sent() {
    let flow = start_flow(Role::Customer);
    fill(&flow.session, "Asha Rao").await;
    flow.session.request_send().await.unwrap();

    tokio::time::sleep(Duration::from_millis(5_500)).await;
    let err = flow.session.request_verify("123456").await.unwrap_err();
    assert_eq!(
        err,
        OtpError::InvalidCode {
            message: "Incorrect OTP".to_string()
        }
    );

    let snapshot = flow.session.snapshot().await;
    assert_eq!(snapshot.state, OtpChallengeState::Sent);
    assert_eq!(snapshot.cooldown_remaining, 55);
}

#[tokio::test(start_paused = true)]
async fn scenario_c_resend_refused_at_forty_five_seconds() {
    let flow = start_flow(Role::Agent);
    fill(&flow.session, "Asha Rao").await;
    flow.session.request_send().await.unwrap();

    tokio::time::sleep(Duration::from_millis(15_500)).await;
    assert_eq!(
        flow.session.request_resend().await.unwrap_err(),
        OtpError::CooldownActive {
            remaining_seconds: 45
        }
    );
    assert_eq!(flow.backend.agent.resends.load(Ordering::SeqCst), 0);
    assert_eq!(flow.backend.customer.sends.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn scenario_d_empty_name_fails_validation_only() {
    let flow = start_flow(Role::Customer);
    fill(&flow.session, "").await;
    flow.session.request_send().await.unwrap();
    flow.session.request_verify(ACCEPTED_CODE).await.unwrap();

    match flow.session.submit().await.error() {
        Some(SubmissionError::ValidationFailed(errors)) => {
            assert_eq!(errors.field_names(), vec!["full_name"]);
        }
        other => panic!("Expected ValidationFailed, got {:?}", other),
    }
    assert!(flow.sink.records.lock().unwrap().is_empty());
}

#[tokio::test]
async fn round_trip_submits_without_resend() {
    let flow = start_flow(Role::Agent);
    fill(&flow.session, "Ravi Kumar").await;

    flow.session.request_send().await.unwrap();
    flow.session.enter_code(ACCEPTED_CODE).await.unwrap();
    flow.session.verify_entered_code().await.unwrap();

    let record = flow.session.submit().await.into_result().unwrap();
    assert_eq!(record.role, Role::Agent);
    assert_eq!(record.identity.as_str(), "0xfeedbeef");
    assert_eq!(record.role.dashboard_route(), "/agent-dashboard");

    assert_eq!(flow.sink.records.lock().unwrap().len(), 1);
    assert_eq!(flow.backend.agent.resends.load(Ordering::SeqCst), 0);
    assert!(!flow.session.is_alive().await);
}
