use thiserror::Error;

use crate::llm_client::LlmError;
use crate::store::StoreError;

/// Failure of one unit of pipeline work (an applicant or a team).
/// Caught per item by the pipeline, logged, and the run moves on.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}
