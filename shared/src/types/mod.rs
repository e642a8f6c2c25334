//! Type definitions shared across layers
//!
//! - `response` - body shape returned by the backend OTP endpoints

pub mod response;

pub use response::ChannelResponse;
