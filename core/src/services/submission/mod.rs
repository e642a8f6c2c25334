//! Submission module
//!
//! Gates the final record on a verified phone and a valid form, then hands
//! it to a caller-supplied [`CompletionSink`].

mod coordinator;
mod traits;
mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use coordinator::{evaluate, SubmissionCoordinator};
pub use traits::CompletionSink;
pub use types::{SubmissionResult, SubmissionSummary};
