//! Users API over HTTP
//!
//! Native transport built on `reqwest`. Each call is one round trip; there
//! are no retries.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};

use super::{response, user_url, users_url, Operation, ResponseParts, UsersApi};
use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};
use crate::model::{Record, RecordDraft};

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// `reqwest`-backed users API client
#[derive(Debug, Clone)]
pub struct HttpUsersApi {
    client: Client,
    base_url: String,
}

impl HttpUsersApi {
    /// Create a client for the API described by `config`
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ClientError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send the request and read the whole response
    async fn execute(
        &self,
        op: Operation,
        url: &str,
        request: RequestBuilder,
    ) -> ClientResult<ResponseParts> {
        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(
            request_id = %request_id,
            method = op.method(),
            url = %url,
            "Sending request"
        );

        let response = request
            .header(REQUEST_ID_HEADER, &request_id)
            .send()
            .await
            .map_err(|e| {
                let err = if e.is_timeout() {
                    ClientError::Network("Request timed out".to_string())
                } else if e.is_connect() {
                    ClientError::Network(format!("Cannot connect to {}", self.base_url))
                } else {
                    ClientError::Network(e.to_string())
                };
                tracing::warn!(request_id = %request_id, error = %e, "Request failed");
                err
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Network(format!("Failed to read response: {}", e)))?;

        tracing::debug!(
            request_id = %request_id,
            status = status.as_u16(),
            bytes = body.len(),
            "Received response"
        );

        Ok(ResponseParts::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            body.to_vec(),
        ))
    }
}

#[async_trait(?Send)]
impl UsersApi for HttpUsersApi {
    async fn list(&self) -> ClientResult<Vec<Record>> {
        let url = users_url(&self.base_url);
        let parts = self
            .execute(Operation::List, &url, self.client.get(&url))
            .await?;
        response::decode_list(&parts)
    }

    async fn create(&self, draft: &RecordDraft) -> ClientResult<Record> {
        let url = users_url(&self.base_url);
        let parts = self
            .execute(Operation::Create, &url, self.client.post(&url).json(draft))
            .await?;
        response::decode_record(Operation::Create, &parts)
    }

    async fn update(&self, id: u64, draft: &RecordDraft) -> ClientResult<Record> {
        let url = user_url(&self.base_url, id);
        let parts = self
            .execute(Operation::Update, &url, self.client.put(&url).json(draft))
            .await?;
        response::decode_record(Operation::Update, &parts)
    }

    async fn delete(&self, id: u64) -> ClientResult<()> {
        let url = user_url(&self.base_url, id);
        let parts = self
            .execute(Operation::Delete, &url, self.client.delete(&url))
            .await?;
        response::decode_deleted(&parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let config = ApiConfig {
            base_url: "http://localhost:8000/api/".to_string(),
            ..ApiConfig::default()
        };
        let api = HttpUsersApi::new(&config).unwrap();
        assert_eq!(api.base_url(), "http://localhost:8000/api");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        // Nothing listens on the discard port
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9/api".to_string(),
            request_timeout_secs: 2,
        };
        let api = HttpUsersApi::new(&config).unwrap();
        let err = api.list().await.unwrap_err();
        assert!(matches!(err, ClientError::Network(_)));
    }
}
