//! HTTP API Client
//!
//! `fetch`-backed [`UsersApi`] for the browser. Responses are read whole and
//! classified by the core, the same way the native transport does it.

use async_trait::async_trait;
use gloo_net::http::Request;

use formsync::api::{response, user_url, users_url, DEFAULT_BASE_PATH};
use formsync::{
    ClientError, ClientResult, Operation, Record, RecordDraft, ResponseParts, UsersApi,
};

/// Local storage key overriding the API base URL
pub const API_URL_KEY: &str = "formsync_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_BASE_PATH.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

#[derive(Debug, Clone)]
pub struct GlooUsersApi {
    base_url: String,
}

impl GlooUsersApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Client for the base URL configured in local storage
    pub fn from_storage() -> Self {
        Self::new(get_api_base())
    }

    async fn execute(
        &self,
        request: Result<Request, gloo_net::Error>,
    ) -> ClientResult<ResponseParts> {
        let request =
            request.map_err(|e| ClientError::Network(format!("Request build error: {}", e)))?;

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let body = response
            .binary()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(ResponseParts::new(
            response.status(),
            response.status_text(),
            body,
        ))
    }
}

#[async_trait(?Send)]
impl UsersApi for GlooUsersApi {
    async fn list(&self) -> ClientResult<Vec<Record>> {
        let parts = self
            .execute(Request::get(&users_url(&self.base_url)).build())
            .await?;
        response::decode_list(&parts)
    }

    async fn create(&self, draft: &RecordDraft) -> ClientResult<Record> {
        let parts = self
            .execute(Request::post(&users_url(&self.base_url)).json(draft))
            .await?;
        response::decode_record(Operation::Create, &parts)
    }

    async fn update(&self, id: u64, draft: &RecordDraft) -> ClientResult<Record> {
        let parts = self
            .execute(Request::put(&user_url(&self.base_url, id)).json(draft))
            .await?;
        response::decode_record(Operation::Update, &parts)
    }

    async fn delete(&self, id: u64) -> ClientResult<()> {
        let parts = self
            .execute(Request::delete(&user_url(&self.base_url, id)).build())
            .await?;
        response::decode_deleted(&parts)
    }
}
