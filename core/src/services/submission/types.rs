//! Types for submission outcomes

use serde::Serialize;

use crate::domain::entities::VerificationRecord;
use crate::errors::SubmissionError;

/// Outcome of a single submit attempt; never persisted by the core
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Success(VerificationRecord),
    Failure(SubmissionError),
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Success(_))
    }

    pub fn record(&self) -> Option<&VerificationRecord> {
        match self {
            SubmissionResult::Success(record) => Some(record),
            SubmissionResult::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&SubmissionError> {
        match self {
            SubmissionResult::Success(_) => None,
            SubmissionResult::Failure(error) => Some(error),
        }
    }

    pub fn into_result(self) -> Result<VerificationRecord, SubmissionError> {
        self.into()
    }
}

impl From<SubmissionResult> for Result<VerificationRecord, SubmissionError> {
    fn from(result: SubmissionResult) -> Self {
        match result {
            SubmissionResult::Success(record) => Ok(record),
            SubmissionResult::Failure(error) => Err(error),
        }
    }
}

impl From<Result<VerificationRecord, SubmissionError>> for SubmissionResult {
    fn from(result: Result<VerificationRecord, SubmissionError>) -> Self {
        match result {
            Ok(record) => SubmissionResult::Success(record),
            Err(error) => SubmissionResult::Failure(error),
        }
    }
}

/// Serializable summary of a submit attempt for logs and presentation
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionSummary {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<uuid::Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&SubmissionResult> for SubmissionSummary {
    fn from(result: &SubmissionResult) -> Self {
        match result {
            SubmissionResult::Success(record) => Self {
                success: true,
                record_id: Some(record.id),
                error: None,
            },
            SubmissionResult::Failure(error) => Self {
                success: false,
                record_id: None,
                error: Some(error.code().to_string()),
            },
        }
    }
}
