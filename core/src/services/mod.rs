//! Services containing the intake flow's logic.

pub mod otp_channel;
pub mod submission;
pub mod validation;
pub mod verification;

// Re-export commonly used types
pub use otp_channel::{ChannelReceipt, OtpBackend, OtpChannelAdapter, OtpEndpoints};
pub use submission::{CompletionSink, SubmissionCoordinator, SubmissionResult, SubmissionSummary};
pub use validation::{validate, validate_phone_for_send};
pub use verification::{
    IdentityProvider, SessionSnapshot, StaticIdentity, VerificationConfig, VerificationSession,
};
