//! Completion hook integration

use async_trait::async_trait;

use crate::domain::entities::VerificationRecord;

/// Receiver of successfully assembled verification records
///
/// Persistence and any post-completion navigation live behind this hook.
#[async_trait]
pub trait CompletionSink: Send + Sync {
    /// Accept a record; an `Err` is reported to the submitter as a delivery failure
    async fn complete(&self, record: &VerificationRecord) -> Result<(), String>;
}
