//! Mock OTP backend
//!
//! In-process stand-in for the OTP service used in development and tests.
//! Codes are generated locally and logged instead of being delivered by SMS.

use async_trait::async_trait;
use rand::Rng;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, warn};

use kyc_core::{OtpBackend, OtpEndpoints, Role, TransportError};
use kyc_shared::phone::mask_phone_number;
use kyc_shared::types::ChannelResponse;

/// Failure the mock should simulate on every call until cleared
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockFailure {
    /// Answer `{success: false, message}`
    Reject(String),
    /// Fail as if the backend were unreachable
    Transport(String),
}

#[derive(Debug, Clone)]
struct IssuedChallenge {
    phone: String,
    code: Option<String>,
}

/// One role's endpoint triple held in memory
#[derive(Debug)]
pub struct MockOtpEndpoints {
    role: Role,
    code_length: usize,
    challenges: Mutex<HashMap<String, IssuedChallenge>>,
    failure: Mutex<Option<MockFailure>>,
    send_count: AtomicU64,
    verify_count: AtomicU64,
    resend_count: AtomicU64,
}

impl MockOtpEndpoints {
    pub fn new(role: Role, code_length: usize) -> Self {
        Self {
            role,
            code_length,
            challenges: Mutex::new(HashMap::new()),
            failure: Mutex::new(None),
            send_count: AtomicU64::new(0),
            verify_count: AtomicU64::new(0),
            resend_count: AtomicU64::new(0),
        }
    }

    /// Enable or clear failure simulation
    pub fn set_failure(&self, failure: Option<MockFailure>) {
        *lock(&self.failure) = failure;
    }

    /// Code currently outstanding for `identity`
    pub fn issued_code(&self, identity: &str) -> Option<String> {
        lock(&self.challenges)
            .get(identity)
            .and_then(|challenge| challenge.code.clone())
    }

    pub fn send_count(&self) -> u64 {
        self.send_count.load(Ordering::SeqCst)
    }

    pub fn verify_count(&self) -> u64 {
        self.verify_count.load(Ordering::SeqCst)
    }

    pub fn resend_count(&self) -> u64 {
        self.resend_count.load(Ordering::SeqCst)
    }

    fn simulated(&self) -> Option<Result<ChannelResponse, TransportError>> {
        lock(&self.failure).clone().map(|failure| {
            warn!(role = %self.role, event = "mock_otp_failure", "Mock OTP backend simulating failure");
            match failure {
                MockFailure::Reject(message) => Ok(ChannelResponse::rejected(message)),
                MockFailure::Transport(detail) => Err(TransportError::new(detail)),
            }
        })
    }

    fn generate_code(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.code_length)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    }

    fn issue(&self, identity: &str, phone: String) -> String {
        let code = self.generate_code();
        info!(
            target: "otp_backend",
            provider = "mock",
            role = %self.role,
            identity = %identity,
            phone = %mask_phone_number(&phone),
            code = %code,
            "OTP issued (mock)"
        );
        lock(&self.challenges).insert(
            identity.to_string(),
            IssuedChallenge {
                phone,
                code: Some(code.clone()),
            },
        );
        code
    }
}

#[async_trait]
impl OtpEndpoints for MockOtpEndpoints {
    async fn send(&self, identity: &str, phone: &str) -> Result<ChannelResponse, TransportError> {
        self.send_count.fetch_add(1, Ordering::SeqCst);
        if let Some(outcome) = self.simulated() {
            return outcome;
        }

        self.issue(identity, phone.to_string());
        Ok(ChannelResponse::ok())
    }

    async fn verify(&self, identity: &str, code: &str) -> Result<ChannelResponse, TransportError> {
        self.verify_count.fetch_add(1, Ordering::SeqCst);
        if let Some(outcome) = self.simulated() {
            return outcome;
        }

        let mut challenges = lock(&self.challenges);
        let Some(challenge) = challenges.get_mut(identity) else {
            return Ok(ChannelResponse::rejected("No OTP requested for this account"));
        };

        if challenge.code.as_deref() == Some(code) {
            // Codes are single use
            challenge.code = None;
            info!(role = %self.role, identity = %identity, event = "mock_otp_verified", "OTP verified (mock)");
            Ok(ChannelResponse::ok())
        } else {
            Ok(ChannelResponse::rejected("Invalid OTP"))
        }
    }

    async fn resend(&self, identity: &str) -> Result<ChannelResponse, TransportError> {
        self.resend_count.fetch_add(1, Ordering::SeqCst);
        if let Some(outcome) = self.simulated() {
            return outcome;
        }

        let phone = lock(&self.challenges)
            .get(identity)
            .map(|challenge| challenge.phone.clone());
        match phone {
            Some(phone) => {
                self.issue(identity, phone);
                Ok(ChannelResponse::ok())
            }
            None => Ok(ChannelResponse::rejected("No OTP requested for this account")),
        }
    }
}

/// Mock backend with independent customer and agent state
#[derive(Debug, Clone)]
pub struct MockOtpBackend {
    customer: Arc<MockOtpEndpoints>,
    agent: Arc<MockOtpEndpoints>,
}

impl MockOtpBackend {
    pub fn new(code_length: usize) -> Self {
        Self {
            customer: Arc::new(MockOtpEndpoints::new(Role::Customer, code_length)),
            agent: Arc::new(MockOtpEndpoints::new(Role::Agent, code_length)),
        }
    }

    /// Concrete endpoints for `role`, for inspection in tests
    pub fn role_endpoints(&self, role: Role) -> &Arc<MockOtpEndpoints> {
        match role {
            Role::Customer => &self.customer,
            Role::Agent => &self.agent,
        }
    }
}

impl OtpBackend for MockOtpBackend {
    fn endpoints(&self, role: Role) -> Arc<dyn OtpEndpoints> {
        self.role_endpoints(role).clone()
    }
}

// A panic while holding the lock leaves the maps consistent; keep serving.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
