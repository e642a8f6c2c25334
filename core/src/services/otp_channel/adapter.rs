//! Role-bound OTP channel adapter

use std::sync::Arc;
use tracing::{debug, warn};

use kyc_shared::config::otp::DEFAULT_CODE_LENGTH;
use kyc_shared::phone::{is_valid_phone, mask_phone_number, PHONE_DIGITS};
use kyc_shared::types::ChannelResponse;
use kyc_shared::validation::validators;

use crate::domain::entities::Role;
use crate::domain::value_objects::{AccountIdentity, OtpOperation};
use crate::errors::{FieldErrorKind, OtpError, TransportError};

use super::traits::{OtpBackend, OtpEndpoints};

/// Normalized successful channel result
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChannelReceipt {
    /// Message supplied by the backend, if any
    pub message: Option<String>,
}

/// Fallback when the backend rejects without a message
fn rejection_fallback(operation: OtpOperation) -> &'static str {
    match operation {
        OtpOperation::Send => "Failed to send OTP. Please try again.",
        OtpOperation::Verify => "Invalid OTP. Please try again.",
        OtpOperation::Resend => "Failed to resend OTP. Please try again.",
    }
}

/// Fallback when the transport fails without a backend message
fn transport_fallback(operation: OtpOperation) -> &'static str {
    match operation {
        OtpOperation::Send => "An error occurred while sending OTP. Please try again.",
        OtpOperation::Verify => "An error occurred while verifying OTP. Please try again.",
        OtpOperation::Resend => "An error occurred while resending OTP. Please try again.",
    }
}

/// Channel adapter bound to a single role's endpoint triple
///
/// The binding is chosen once at construction; both triples are treated as
/// behaviorally identical. Every expected failure is normalized into
/// [`OtpError`].
#[derive(Clone)]
pub struct OtpChannelAdapter {
    role: Role,
    endpoints: Arc<dyn OtpEndpoints>,
    code_length: usize,
}

impl OtpChannelAdapter {
    /// Bind the endpoint triple for `role` from `backend`
    pub fn for_role(backend: &dyn OtpBackend, role: Role) -> Self {
        Self::new(role, backend.endpoints(role))
    }

    pub fn new(role: Role, endpoints: Arc<dyn OtpEndpoints>) -> Self {
        Self {
            role,
            endpoints,
            code_length: DEFAULT_CODE_LENGTH,
        }
    }

    pub fn with_code_length(mut self, code_length: usize) -> Self {
        self.code_length = code_length;
        self
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn code_length(&self) -> usize {
        self.code_length
    }

    /// Deliver a challenge code to a 10-digit phone number
    pub async fn send(
        &self,
        identity: &AccountIdentity,
        phone: &str,
    ) -> Result<ChannelReceipt, OtpError> {
        if phone.len() != PHONE_DIGITS || !is_valid_phone(phone) {
            return Err(OtpError::InvalidPhone {
                kind: FieldErrorKind::InvalidFormat,
                message: format!("Please enter a valid {}-digit phone number", PHONE_DIGITS),
            });
        }

        debug!(
            role = %self.role,
            phone = %mask_phone_number(phone),
            event = "otp_channel_send",
            "Dispatching OTP send"
        );
        let result = self.endpoints.send(identity.as_str(), phone).await;
        self.normalize(OtpOperation::Send, result)
    }

    /// Check a challenge code
    pub async fn verify(
        &self,
        identity: &AccountIdentity,
        code: &str,
    ) -> Result<ChannelReceipt, OtpError> {
        if !validators::is_digits_of_len(code, self.code_length) {
            return Err(OtpError::InvalidCodeFormat {
                expected: self.code_length,
            });
        }

        debug!(role = %self.role, event = "otp_channel_verify", "Dispatching OTP verify");
        let result = self.endpoints.verify(identity.as_str(), code).await;
        self.normalize(OtpOperation::Verify, result)
    }

    /// Re-deliver a challenge code to the phone on file
    pub async fn resend(&self, identity: &AccountIdentity) -> Result<ChannelReceipt, OtpError> {
        debug!(role = %self.role, event = "otp_channel_resend", "Dispatching OTP resend");
        let result = self.endpoints.resend(identity.as_str()).await;
        self.normalize(OtpOperation::Resend, result)
    }

    fn normalize(
        &self,
        operation: OtpOperation,
        result: Result<ChannelResponse, TransportError>,
    ) -> Result<ChannelReceipt, OtpError> {
        match result {
            Ok(response) if response.success => Ok(ChannelReceipt {
                message: response.message().map(str::to_string),
            }),
            Ok(response) => {
                let message = response
                    .message()
                    .unwrap_or_else(|| rejection_fallback(operation))
                    .to_string();
                warn!(
                    role = %self.role,
                    operation = %operation,
                    reason = %message,
                    event = "otp_channel_rejected",
                    "Backend rejected OTP request"
                );
                Err(match operation {
                    OtpOperation::Verify => OtpError::InvalidCode { message },
                    OtpOperation::Send | OtpOperation::Resend => OtpError::ChannelError { message },
                })
            }
            Err(err) => {
                warn!(
                    role = %self.role,
                    operation = %operation,
                    error = %err,
                    event = "otp_channel_transport_error",
                    "OTP transport failure"
                );
                let message = err
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| transport_fallback(operation).to_string());
                Err(OtpError::ChannelError { message })
            }
        }
    }
}

impl std::fmt::Debug for OtpChannelAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtpChannelAdapter")
            .field("role", &self.role)
            .field("code_length", &self.code_length)
            .finish_non_exhaustive()
    }
}
