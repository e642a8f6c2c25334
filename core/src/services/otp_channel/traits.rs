//! Traits for backend OTP service integration

use async_trait::async_trait;
use std::sync::Arc;

use kyc_shared::types::ChannelResponse;

use crate::domain::entities::Role;
use crate::errors::TransportError;

/// One send/verify/resend endpoint triple
///
/// A rejected request is `Ok` with `success == false`; `Err` is reserved for
/// transport failures (connection refused, non-JSON body, error status).
#[async_trait]
pub trait OtpEndpoints: Send + Sync {
    /// Deliver a challenge code to `phone`
    async fn send(&self, identity: &str, phone: &str) -> Result<ChannelResponse, TransportError>;
    /// Check a challenge code
    async fn verify(&self, identity: &str, code: &str) -> Result<ChannelResponse, TransportError>;
    /// Re-deliver a challenge code to the phone already on file
    async fn resend(&self, identity: &str) -> Result<ChannelResponse, TransportError>;
}

/// Backend exposing one endpoint triple per role
pub trait OtpBackend: Send + Sync {
    /// Endpoint triple bound to `role`
    fn endpoints(&self, role: Role) -> Arc<dyn OtpEndpoints>;
}
