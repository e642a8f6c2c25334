//! Verification session
//!
//! One live intake flow: the form, its field errors and the phone-challenge
//! state machine behind a single async mutex, plus the cooldown clock.
//!
//! Every OTP operation runs in two phases. The first locks the session,
//! checks guards and marks the operation in flight. The backend call then
//! runs unlocked on a detached task, and the second phase relocks to apply
//! the outcome. A caller that stops waiting does not strand the in-flight
//! flag, and a session closed in between discards the late result.

use std::future::Future;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, error, info, trace, warn};

use kyc_shared::phone::mask_phone_number;

use crate::domain::entities::{FormField, Role, VerificationForm};
use crate::domain::events::{
    OtpEvent, DEFAULT_RESENT_MESSAGE, DEFAULT_SENT_MESSAGE, DEFAULT_VERIFIED_MESSAGE,
};
use crate::domain::value_objects::{AccountIdentity, FieldErrors, OtpOperation};
use crate::errors::{DomainResult, OtpError, SubmissionError};
use crate::services::otp_channel::{ChannelReceipt, OtpChannelAdapter};
use crate::services::submission::{SubmissionCoordinator, SubmissionResult};
use crate::services::validation::validate;

use super::config::VerificationConfig;
use super::state_machine::OtpStateMachine;
use super::traits::IdentityProvider;
use super::types::SessionSnapshot;

struct SessionInner {
    form: VerificationForm,
    field_errors: FieldErrors,
    machine: OtpStateMachine,
    submitting: bool,
    alive: bool,
    ticker: Option<JoinHandle<()>>,
}

impl SessionInner {
    fn stop_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }
}

/// A single identity-verification flow
///
/// Cloning yields another handle to the same session.
#[derive(Clone)]
pub struct VerificationSession {
    adapter: OtpChannelAdapter,
    identity: Arc<dyn IdentityProvider>,
    coordinator: SubmissionCoordinator,
    config: VerificationConfig,
    inner: Arc<Mutex<SessionInner>>,
}

impl VerificationSession {
    /// Start a flow bound to the adapter's role
    pub fn new(
        adapter: OtpChannelAdapter,
        identity: Arc<dyn IdentityProvider>,
        coordinator: SubmissionCoordinator,
        config: VerificationConfig,
    ) -> DomainResult<Self> {
        config.validate()?;

        let adapter = adapter.with_code_length(config.code_length);
        let inner = SessionInner {
            form: VerificationForm::new(),
            field_errors: FieldErrors::new(),
            machine: OtpStateMachine::new(config.cooldown_seconds, config.code_length),
            submitting: false,
            alive: true,
            ticker: None,
        };

        info!(role = %adapter.role(), event = "session_started", "Verification session started");

        Ok(Self {
            adapter,
            identity,
            coordinator,
            config,
            inner: Arc::new(Mutex::new(inner)),
        })
    }

    pub fn role(&self) -> Role {
        self.adapter.role()
    }

    pub fn config(&self) -> &VerificationConfig {
        &self.config
    }

    pub async fn is_alive(&self) -> bool {
        self.inner.lock().await.alive
    }

    /// Edit a form field, clearing that field's error
    pub async fn set_field(&self, field: FormField, value: &str) -> Result<(), OtpError> {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        if !inner.alive {
            return Err(OtpError::SessionClosed);
        }
        if field == FormField::Phone && inner.machine.phone_locked() {
            return Err(OtpError::PhoneLocked);
        }

        inner.form.set(field, value);
        inner.field_errors.clear(field);
        Ok(())
    }

    /// Store the code as typed; keeps digits only, truncated to the code length
    pub async fn enter_code(&self, raw: &str) -> Result<String, OtpError> {
        let mut guard = self.inner.lock().await;
        if !guard.alive {
            return Err(OtpError::SessionClosed);
        }
        Ok(guard.machine.enter_code(raw).to_string())
    }

    /// Recompute and store the form's field errors
    pub async fn validate_form(&self) -> FieldErrors {
        let mut guard = self.inner.lock().await;
        let errors = validate(&guard.form);
        guard.field_errors = errors.clone();
        errors
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let guard = self.inner.lock().await;
        SessionSnapshot {
            role: self.role(),
            state: guard.machine.state(),
            cooldown_remaining: guard.machine.cooldown_remaining(),
            sending: guard.machine.is_sending(),
            verifying: guard.machine.is_verifying(),
            submitting: guard.submitting,
            phone_locked: guard.machine.phone_locked(),
            entered_code: guard.machine.entered_code().to_string(),
            code_ready: guard.machine.is_code_ready(),
            form: guard.form.clone(),
            field_errors: guard.field_errors.clone(),
            alive: guard.alive,
        }
    }

    /// Send a challenge code to the phone on the form
    pub async fn request_send(&self) -> Result<OtpEvent, OtpError> {
        let (identity, phone) = {
            let mut guard = self.inner.lock().await;
            let inner = &mut *guard;
            if !inner.alive {
                return Err(OtpError::SessionClosed);
            }
            let identity = self.require_identity()?;

            match inner.machine.begin_send(&inner.form.phone) {
                Ok(phone) => {
                    inner.field_errors.clear(FormField::Phone);
                    (identity, phone)
                }
                Err(err) => {
                    if let OtpError::InvalidPhone { kind, message } = &err {
                        inner
                            .field_errors
                            .insert(FormField::Phone, *kind, message.clone());
                    }
                    warn!(
                        role = %self.role(),
                        code = err.code(),
                        event = "otp_send_refused",
                        "OTP send refused: {}",
                        err
                    );
                    return Err(err);
                }
            }
        };

        info!(
            role = %self.role(),
            phone = %mask_phone_number(&phone),
            event = "otp_send_started",
            "Sending OTP"
        );

        let session = self.clone();
        self.run_detached(OtpOperation::Send, async move {
            let result = session.adapter.send(&identity, &phone).await;
            session.complete_send(result).await
        })
        .await
    }

    /// Verify a code that must already be exactly the code length
    pub async fn request_verify(&self, code: &str) -> Result<OtpEvent, OtpError> {
        let identity = {
            let mut guard = self.inner.lock().await;
            if !guard.alive {
                return Err(OtpError::SessionClosed);
            }
            let identity = self.require_identity()?;
            if let Err(err) = guard.machine.begin_verify(code) {
                warn!(
                    role = %self.role(),
                    code = err.code(),
                    event = "otp_verify_refused",
                    "OTP verify refused: {}",
                    err
                );
                return Err(err);
            }
            identity
        };

        debug!(role = %self.role(), event = "otp_verify_started", "Verifying OTP");

        let session = self.clone();
        let code = code.to_string();
        self.run_detached(OtpOperation::Verify, async move {
            let result = session.adapter.verify(&identity, &code).await;
            session.complete_verify(result).await
        })
        .await
    }

    /// Verify whatever is in the entered-code buffer
    pub async fn verify_entered_code(&self) -> Result<OtpEvent, OtpError> {
        let code = self.inner.lock().await.machine.entered_code().to_string();
        self.request_verify(&code).await
    }

    /// Re-deliver a challenge code once the cooldown has elapsed
    pub async fn request_resend(&self) -> Result<OtpEvent, OtpError> {
        let identity = {
            let mut guard = self.inner.lock().await;
            if !guard.alive {
                return Err(OtpError::SessionClosed);
            }
            let identity = self.require_identity()?;
            if let Err(err) = guard.machine.begin_resend() {
                warn!(
                    role = %self.role(),
                    code = err.code(),
                    event = "resend_refused",
                    "OTP resend refused: {}",
                    err
                );
                return Err(err);
            }
            identity
        };

        info!(role = %self.role(), event = "otp_resend_started", "Resending OTP");

        let session = self.clone();
        self.run_detached(OtpOperation::Resend, async move {
            let result = session.adapter.resend(&identity).await;
            session.complete_resend(result).await
        })
        .await
    }

    /// Attempt final submission; a success closes the session
    pub async fn submit(&self) -> SubmissionResult {
        let (form, state, identity) = {
            let mut guard = self.inner.lock().await;
            let inner = &mut *guard;
            if !inner.alive {
                return SubmissionResult::Failure(SubmissionError::SessionClosed);
            }

            inner.field_errors = validate(&inner.form);
            let state = inner.machine.state();
            if !state.is_verified() {
                return SubmissionResult::Failure(SubmissionError::NotVerified);
            }
            // Field errors are reported ahead of a pending operation
            if !inner.field_errors.is_empty() {
                return SubmissionResult::Failure(SubmissionError::ValidationFailed(
                    inner.field_errors.clone(),
                ));
            }
            if inner.submitting || inner.machine.is_busy() {
                return SubmissionResult::Failure(SubmissionError::InFlight);
            }

            inner.submitting = true;
            (inner.form.clone(), state, self.current_identity())
        };

        let session = self.clone();
        let handle = tokio::spawn(async move {
            let result = session
                .coordinator
                .submit(&form, session.role(), identity.as_ref(), state)
                .await;
            session.complete_submit(&result).await;
            result
        });

        match handle.await {
            Ok(result) => result,
            Err(err) => {
                error!(error = %err, event = "submission_task_failed", "Submission task failed");
                self.inner.lock().await.submitting = false;
                SubmissionResult::Failure(SubmissionError::Delivery {
                    message: "Submission was interrupted".to_string(),
                })
            }
        }
    }

    /// End the flow; any in-flight result is discarded on arrival
    pub async fn close(&self) {
        let mut guard = self.inner.lock().await;
        if !guard.alive {
            return;
        }
        guard.alive = false;
        guard.machine.close();
        guard.stop_ticker();

        info!(
            role = %self.role(),
            state = %guard.machine.state(),
            event = "session_closed",
            "Verification session closed"
        );
    }

    async fn complete_send(
        &self,
        result: Result<ChannelReceipt, OtpError>,
    ) -> Result<OtpEvent, OtpError> {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        if !inner.alive {
            debug!(event = "otp_result_discarded", operation = "send", "Session closed before send completed");
            return Err(OtpError::SessionClosed);
        }

        match result {
            Ok(receipt) => {
                let cooldown_seconds = inner.machine.finish_send(true);
                self.restart_ticker(inner);
                info!(role = %self.role(), cooldown_seconds, event = "otp_sent", "OTP sent");
                Ok(OtpEvent::CodeSent {
                    message: receipt
                        .message
                        .unwrap_or_else(|| DEFAULT_SENT_MESSAGE.to_string()),
                    cooldown_seconds,
                })
            }
            Err(err) => {
                inner.machine.finish_send(false);
                Err(err)
            }
        }
    }

    async fn complete_verify(
        &self,
        result: Result<ChannelReceipt, OtpError>,
    ) -> Result<OtpEvent, OtpError> {
        let mut guard = self.inner.lock().await;
        if !guard.alive {
            debug!(event = "otp_result_discarded", operation = "verify", "Session closed before verify completed");
            return Err(OtpError::SessionClosed);
        }

        guard.machine.finish_verify(result.is_ok());
        let receipt = result?;
        info!(role = %self.role(), event = "otp_verified", "Phone number verified");
        Ok(OtpEvent::CodeVerified {
            message: receipt
                .message
                .unwrap_or_else(|| DEFAULT_VERIFIED_MESSAGE.to_string()),
        })
    }

    async fn complete_resend(
        &self,
        result: Result<ChannelReceipt, OtpError>,
    ) -> Result<OtpEvent, OtpError> {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        if !inner.alive {
            debug!(event = "otp_result_discarded", operation = "resend", "Session closed before resend completed");
            return Err(OtpError::SessionClosed);
        }

        match result {
            Ok(receipt) => {
                let cooldown_seconds = inner.machine.finish_resend(true);
                self.restart_ticker(inner);
                info!(role = %self.role(), cooldown_seconds, event = "otp_resent", "OTP resent");
                Ok(OtpEvent::CodeResent {
                    message: receipt
                        .message
                        .unwrap_or_else(|| DEFAULT_RESENT_MESSAGE.to_string()),
                    cooldown_seconds,
                })
            }
            Err(err) => {
                inner.machine.finish_resend(false);
                Err(err)
            }
        }
    }

    async fn complete_submit(&self, result: &SubmissionResult) {
        let mut guard = self.inner.lock().await;
        guard.submitting = false;
        if result.is_success() && guard.alive {
            guard.alive = false;
            guard.stop_ticker();
            info!(role = %self.role(), event = "session_completed", "Verification session completed");
        }
    }

    /// Await a detached operation, recovering the in-flight flag if it died
    async fn run_detached<F>(&self, operation: OtpOperation, task: F) -> Result<OtpEvent, OtpError>
    where
        F: Future<Output = Result<OtpEvent, OtpError>> + Send + 'static,
    {
        match tokio::spawn(task).await {
            Ok(result) => result,
            Err(err) => {
                error!(
                    operation = %operation,
                    error = %err,
                    event = "otp_task_failed",
                    "OTP task failed"
                );
                self.inner.lock().await.machine.abandon();
                Err(OtpError::ChannelError {
                    message: format!("The OTP {} request was interrupted. Please try again.", operation),
                })
            }
        }
    }

    fn restart_ticker(&self, inner: &mut SessionInner) {
        inner.stop_ticker();
        inner.ticker = Some(spawn_ticker(
            Arc::downgrade(&self.inner),
            inner.machine.cooldown_generation(),
            self.config.tick_interval,
        ));
    }

    fn current_identity(&self) -> Option<AccountIdentity> {
        self.identity
            .connected_account()
            .as_deref()
            .and_then(AccountIdentity::new)
    }

    fn require_identity(&self) -> Result<AccountIdentity, OtpError> {
        self.current_identity().ok_or(OtpError::IdentityMissing)
    }
}

impl std::fmt::Debug for VerificationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationSession")
            .field("role", &self.role())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Cooldown clock for one restart generation
///
/// Exits once the cooldown reaches zero, the session closes or is dropped,
/// or a later restart supersedes it.
fn spawn_ticker(
    inner: Weak<Mutex<SessionInner>>,
    generation: u64,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = interval_at(Instant::now() + period, period);
        loop {
            interval.tick().await;

            let Some(session) = inner.upgrade() else {
                break;
            };
            let mut guard = session.lock().await;
            if !guard.alive || guard.machine.cooldown_generation() != generation {
                break;
            }

            let remaining = guard.machine.tick();
            trace!(remaining, event = "cooldown_tick");
            if remaining == 0 {
                debug!(event = "cooldown_elapsed", "Resend available");
                break;
            }
        }
    })
}
