//! Submission coordinator

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::entities::{Role, VerificationForm, VerificationRecord};
use crate::domain::value_objects::{AccountIdentity, OtpChallengeState};
use crate::errors::SubmissionError;
use crate::services::validation::validate;

use super::traits::CompletionSink;
use super::types::SubmissionResult;

/// Check the submit preconditions and assemble the record
///
/// Preconditions are checked in order and the first failure wins:
/// phone verified, form valid, identity connected.
pub fn evaluate(
    form: &VerificationForm,
    role: Role,
    identity: Option<&AccountIdentity>,
    state: OtpChallengeState,
) -> SubmissionResult {
    if !state.is_verified() {
        return SubmissionResult::Failure(SubmissionError::NotVerified);
    }

    let errors = validate(form);
    if !errors.is_empty() {
        return SubmissionResult::Failure(SubmissionError::ValidationFailed(errors));
    }

    match identity {
        Some(identity) => {
            SubmissionResult::Success(VerificationRecord::new(identity.clone(), form, role))
        }
        None => SubmissionResult::Failure(SubmissionError::IdentityMissing),
    }
}

/// Assembles verification records and hands them to the completion hook
#[derive(Clone)]
pub struct SubmissionCoordinator {
    sink: Arc<dyn CompletionSink>,
}

impl SubmissionCoordinator {
    pub fn new(sink: Arc<dyn CompletionSink>) -> Self {
        Self { sink }
    }

    /// Evaluate a submit attempt and deliver a successful record to the sink
    pub async fn submit(
        &self,
        form: &VerificationForm,
        role: Role,
        identity: Option<&AccountIdentity>,
        state: OtpChallengeState,
    ) -> SubmissionResult {
        let record = match evaluate(form, role, identity, state) {
            SubmissionResult::Success(record) => record,
            failure => {
                if let Some(error) = failure.error() {
                    warn!(
                        role = %role,
                        code = error.code(),
                        event = "submission_refused",
                        "Submission refused: {}",
                        error
                    );
                }
                return failure;
            }
        };

        if let Err(message) = self.sink.complete(&record).await {
            warn!(
                record_id = %record.id,
                role = %role,
                error = %message,
                event = "submission_delivery_failed",
                "Completion hook rejected verification record"
            );
            return SubmissionResult::Failure(SubmissionError::Delivery { message });
        }

        info!(
            record_id = %record.id,
            role = %role,
            event = "submission_completed",
            "Verification record submitted"
        );
        SubmissionResult::Success(record)
    }
}

impl std::fmt::Debug for SubmissionCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionCoordinator").finish_non_exhaustive()
    }
}
