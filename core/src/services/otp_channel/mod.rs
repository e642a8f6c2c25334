//! OTP channel module
//!
//! Routes send/verify/resend to the backend endpoint triple selected by the
//! party's role and normalizes the backend's `{success, message?}` replies
//! and transport failures into [`OtpError`](crate::errors::OtpError).

mod adapter;
mod traits;

#[cfg(test)]
pub(crate) mod tests;

pub use adapter::{ChannelReceipt, OtpChannelAdapter};
pub use traits::{OtpBackend, OtpEndpoints};
