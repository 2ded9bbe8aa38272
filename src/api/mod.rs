//! Users REST API
//!
//! The client consumes four endpoints under a configurable base path
//! (default `/api`):
//!
//! - `GET /users` - list all users
//! - `POST /users` - create a user from `{name, mail}`
//! - `PUT /users/{id}` - replace a user's `{name, mail}`
//! - `DELETE /users/{id}` - delete a user
//!
//! [`UsersApi`] is the seam between [`crate::FormSyncClient`] and a
//! transport. Transports read the whole response and hand it to the
//! functions in [`response`], so every host classifies failures the same
//! way.

pub mod memory;
pub mod response;

#[cfg(feature = "native")]
mod http;

#[cfg(feature = "native")]
pub use http::HttpUsersApi;
pub use memory::MemoryUsersApi;
pub use response::ResponseParts;

use async_trait::async_trait;

use crate::error::ClientResult;
use crate::model::{Record, RecordDraft};

/// Default base path of the users API
pub const DEFAULT_BASE_PATH: &str = "/api";

/// Transport for the users API
///
/// Futures are not required to be `Send`: the browser transport is built on
/// JS promises and the client runs on a single thread.
#[async_trait(?Send)]
pub trait UsersApi {
    /// `GET /users`
    async fn list(&self) -> ClientResult<Vec<Record>>;

    /// `POST /users`
    async fn create(&self, draft: &RecordDraft) -> ClientResult<Record>;

    /// `PUT /users/{id}`
    async fn update(&self, id: u64, draft: &RecordDraft) -> ClientResult<Record>;

    /// `DELETE /users/{id}`
    async fn delete(&self, id: u64) -> ClientResult<()>;
}

/// The four calls, used to pick failure messages and log fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Message used when the server gives no `detail`
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::List => "Failed to load users",
            Operation::Create => "Failed to create user",
            Operation::Update => "Failed to update user",
            Operation::Delete => "Failed to delete user",
        }
    }

    /// Whether a `detail` field in an error body is shown to the user
    pub fn uses_detail(self) -> bool {
        matches!(self, Operation::Create | Operation::Update)
    }

    pub fn method(self) -> &'static str {
        match self {
            Operation::List => "GET",
            Operation::Create => "POST",
            Operation::Update => "PUT",
            Operation::Delete => "DELETE",
        }
    }
}

/// `<base>/users`
pub fn users_url(base: &str) -> String {
    format!("{}/users", base.trim_end_matches('/'))
}

/// `<base>/users/{id}`
pub fn user_url(base: &str, id: u64) -> String {
    format!("{}/users/{}", base.trim_end_matches('/'), id)
}
