//! Completion Sink Module
//!
//! Receivers for verification records produced by a successful submission:
//! - **Tracing**: logs the record and the dashboard it would route to
//! - **Channel**: forwards records over an mpsc channel to a consumer task

pub mod channel_sink;
pub mod tracing_sink;

pub use channel_sink::ChannelCompletionSink;
pub use tracing_sink::TracingCompletionSink;
