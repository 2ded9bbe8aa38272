//! # Formsync
//!
//! Form-bound CRUD client for user records served by a REST backend.
//!
//! A single form creates or edits records, a table lists them, and every
//! successful mutation is followed by a full refresh of the table.
//!
//! ## Modules
//!
//! - [`client`]: [`FormSyncClient`], the state/view synchronization loop
//! - [`api`]: the [`UsersApi`] transport seam and response classification
//! - [`form`], [`table`], [`banner`]: the state the client renders
//! - [`terminal`]: line-oriented host for the native binary
//!
//! The `native` feature (on by default) adds the `reqwest` transport, config
//! loading, logging setup and the terminal host. Without it the crate builds
//! for `wasm32-unknown-unknown` and is driven by the browser front end.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use formsync::{AssumeYes, Config, FormSyncClient, HttpUsersApi, TerminalView};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default()?;
//!     let api = HttpUsersApi::new(&config.api)?;
//!     let view = TerminalView::stdio(false);
//!
//!     let mut client = FormSyncClient::new(api, view, AssumeYes);
//!     client.refresh().await?;
//!
//!     client.set_name("Ann");
//!     client.set_mail("a@x.com");
//!     let created = client.submit().await?;
//!     println!("Created user {}", created.id);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod banner;
pub mod client;
pub mod error;
pub mod form;
pub mod model;
pub mod table;

#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod logging;
#[cfg(feature = "native")]
pub mod terminal;

// Re-export top-level types for convenience
pub use api::{MemoryUsersApi, Operation, ResponseParts, UsersApi};

#[cfg(feature = "native")]
pub use api::HttpUsersApi;

pub use banner::{Banner, BannerTicket, BANNER_TIMEOUT};

pub use client::{AssumeYes, Confirm, Deletion, FormSyncClient, View, DELETE_CONFIRMATION};

pub use error::{ClientError, ClientResult, ErrorKind};

pub use form::{FormLabels, FormState, Mode, Submission};

pub use model::{Record, RecordDraft, RecordList};

pub use table::{RecordRow, RowAction, TableRow, TableView};

#[cfg(feature = "native")]
pub use config::{ApiConfig, Config, ConfigError, LoggingConfig, UiConfig};

#[cfg(feature = "native")]
pub use terminal::{StdinConfirm, TerminalView};
