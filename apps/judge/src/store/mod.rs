//! Applicant Store — the shared table applicants live in.
//!
//! The pipeline only needs read-all and update-by-id. `AirtableStore` is the
//! production implementation.

pub mod airtable;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::applicant::ApplicantRecord;

pub use airtable::AirtableStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait ApplicantStore: Send + Sync {
    /// Every record in the table.
    async fn list_all(&self) -> Result<Vec<ApplicantRecord>, StoreError>;

    /// Overwrites the given fields on one record; other fields are untouched.
    async fn update(&self, record_id: &str, fields: Map<String, Value>) -> Result<(), StoreError>;
}
