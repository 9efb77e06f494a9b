use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::models::applicant::ApplicantRecord;
use crate::store::{ApplicantStore, StoreError};

const AIRTABLE_API_URL: &str = "https://api.airtable.com";

/// One page of `GET /v0/{base}/{table}`.
#[derive(Debug, Deserialize)]
struct ListPage {
    records: Vec<ApplicantRecord>,
    offset: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AirtableError {
    error: AirtableErrorBody,
}

/// Airtable sends either `{"error": "NOT_FOUND"}` or `{"error": {"type", "message"}}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AirtableErrorBody {
    Code(String),
    Detail { message: String },
}

/// Airtable REST client for the applicant table.
#[derive(Clone)]
pub struct AirtableStore {
    client: Client,
    api_key: String,
    base_url: String,
    base_id: String,
    table_name: String,
}

impl AirtableStore {
    pub fn new(api_key: String, base_id: String, table_name: String) -> Result<Self, StoreError> {
        Self::with_base_url(api_key, base_id, table_name, AIRTABLE_API_URL.to_string())
    }

    pub fn with_base_url(
        api_key: String,
        base_id: String,
        table_name: String,
        base_url: String,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            base_id,
            table_name,
        })
    }

    fn table_url(&self) -> Result<reqwest::Url, StoreError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| StoreError::InvalidResponse(format!("bad base url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| StoreError::InvalidResponse("base url cannot be a base".into()))?
            .extend(["v0", self.base_id.as_str(), self.table_name.as_str()]);
        Ok(url)
    }

    async fn check(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<AirtableError>(&body) {
            Ok(AirtableError {
                error: AirtableErrorBody::Detail { message },
            }) => message,
            Ok(AirtableError {
                error: AirtableErrorBody::Code(code),
            }) => code,
            Err(_) => body,
        };
        Err(StoreError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ApplicantStore for AirtableStore {
    async fn list_all(&self) -> Result<Vec<ApplicantRecord>, StoreError> {
        let url = self.table_url()?;
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut request = self.client.get(url.clone()).bearer_auth(&self.api_key);
            if let Some(offset) = &offset {
                request = request.query(&[("offset", offset)]);
            }

            let response = Self::check(request.send().await?).await?;
            let body = response.text().await?;
            let page: ListPage = serde_json::from_str(&body)
                .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;

            debug!("Fetched {} records from Airtable", page.records.len());
            records.extend(page.records);

            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        Ok(records)
    }

    async fn update(&self, record_id: &str, fields: Map<String, Value>) -> Result<(), StoreError> {
        let mut url = self.table_url()?;
        url.path_segments_mut()
            .map_err(|_| StoreError::InvalidResponse("base url cannot be a base".into()))?
            .push(record_id);

        let response = self
            .client
            .patch(url)
            .bearer_auth(&self.api_key)
            .json(&json!({ "fields": fields }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store_for(server: &MockServer) -> AirtableStore {
        AirtableStore::with_base_url(
            "pat-test".to_string(),
            "appBase".to_string(),
            "Applicants 2025".to_string(),
            server.uri(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_all_follows_offset_pagination() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v0/appBase/Applicants%202025"))
            .and(query_param("offset", "itr2"))
            .and(header("authorization", "Bearer pat-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": [{"id": "rec3", "createdTime": "2025-01-01T00:00:00.000Z", "fields": {}}]
            })))
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v0/appBase/Applicants%202025"))
            .and(header("authorization", "Bearer pat-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": [
                    {"id": "rec1", "fields": {"First Name": "Ada", "Team Code": "A"}},
                    {"id": "rec2", "fields": {"First Name": "Alan"}}
                ],
                "offset": "itr2"
            })))
            .mount(&server)
            .await;

        let records = store_for(&server).list_all().await.unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["rec1", "rec2", "rec3"]);
        assert_eq!(records[0].first_name(), "Ada");
        assert!(records[2].fields.is_empty());
    }

    #[tokio::test]
    async fn test_update_patches_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/v0/appBase/Applicants%202025/rec1"))
            .and(header("authorization", "Bearer pat-test"))
            .and(body_json(json!({
                "fields": {"Individual Score": 72, "Individual Feedback": "good"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "rec1", "fields": {}})))
            .expect(1)
            .mount(&server)
            .await;

        let mut fields = Map::new();
        fields.insert("Individual Score".to_string(), json!(72));
        fields.insert("Individual Feedback".to_string(), json!("good"));
        store_for(&server).update("rec1", fields).await.unwrap();
    }

    #[tokio::test]
    async fn test_api_error_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "error": {"type": "INVALID_VALUE_FOR_COLUMN", "message": "Field \"Individual Score\" cannot accept the provided value"}
            })))
            .mount(&server)
            .await;

        let err = store_for(&server).update("rec1", Map::new()).await.unwrap_err();
        match err {
            StoreError::Api { status, message } => {
                assert_eq!(status, 422);
                assert!(message.contains("cannot accept"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_all_error_code_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "NOT_FOUND"})))
            .mount(&server)
            .await;

        let err = store_for(&server).list_all().await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Api { status: 404, ref message } if message == "NOT_FOUND"
        ));
    }
}
