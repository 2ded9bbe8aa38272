//! Form/table synchronization
//!
//! [`FormSyncClient`] owns the form state, the last fetched records and the
//! error banner. It turns user intent into calls on a [`UsersApi`] and pushes
//! every state change to a [`View`]. Hosts (the terminal shell, the browser
//! page) implement [`View`] and [`Confirm`] and forward their input events
//! to the user-action methods: [`submit`](FormSyncClient::submit),
//! [`cancel`](FormSyncClient::cancel), [`handle`](FormSyncClient::handle),
//! [`request_delete`](FormSyncClient::request_delete) and
//! [`refresh`](FormSyncClient::refresh).
//!
//! User-action methods report failures through the banner and also return
//! them, so one-shot callers can pick an exit status.

use std::time::Duration;

use crate::api::UsersApi;
use crate::banner::{Banner, BannerTicket, BANNER_TIMEOUT};
use crate::error::ClientResult;
use crate::form::{FormState, Submission};
use crate::model::{Record, RecordDraft, RecordList};
use crate::table::{self, RowAction, TableView};

/// Question asked before deleting
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this user?";

/// Banner prefix for failed refreshes
pub const LOAD_ERROR_PREFIX: &str = "Error loading users";

/// Banner prefix for failed deletes
pub const DELETE_ERROR_PREFIX: &str = "Error deleting user";

/// Rendering surface driven by the client
pub trait View {
    /// Replace the table contents
    fn render_table(&mut self, table: &TableView);

    /// Show the form's mode, labels and buffers
    fn render_form(&mut self, form: &FormState);

    fn set_loading(&mut self, loading: bool);

    /// Show `message`, replacing any visible one. After `ttl` the host hands
    /// `ticket` back through [`FormSyncClient::dismiss_banner`].
    fn show_banner(&mut self, message: &str, ticket: BannerTicket, ttl: Duration);

    fn hide_banner(&mut self);

    /// Bring the form into view
    fn focus_form(&mut self) {}

    /// A form submission started or finished
    fn set_submitting(&mut self, _submitting: bool) {}
}

/// Interactive yes/no question
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<C: Confirm + ?Sized> Confirm for Box<C> {
    fn confirm(&mut self, message: &str) -> bool {
        (**self).confirm(message)
    }
}

/// Answers yes without asking
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _message: &str) -> bool {
        true
    }
}

/// Outcome of a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    Deleted,
    /// The user declined the confirmation; nothing was sent
    Cancelled,
}

/// Client-side state/view synchronization loop
pub struct FormSyncClient<A, V, C> {
    api: A,
    view: V,
    confirm: C,
    form: FormState,
    records: RecordList,
    banner: Banner,
    banner_timeout: Duration,
}

impl<A: UsersApi, V: View, C: Confirm> FormSyncClient<A, V, C> {
    pub fn new(api: A, view: V, confirm: C) -> Self {
        Self {
            api,
            view,
            confirm,
            form: FormState::new(),
            records: RecordList::new(),
            banner: Banner::new(),
            banner_timeout: BANNER_TIMEOUT,
        }
    }

    /// Builder method: set how long error banners stay up
    pub fn with_banner_timeout(mut self, timeout: Duration) -> Self {
        self.banner_timeout = timeout;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn records(&self) -> &[Record] {
        self.records.as_slice()
    }

    pub fn banner(&self) -> &Banner {
        &self.banner
    }

    /// Initial render: empty form, then the first fetch
    pub async fn start(&mut self) -> ClientResult<()> {
        self.view.render_form(&self.form);
        self.refresh().await
    }

    /// Fetch all records, replace the list and re-render the table.
    ///
    /// The loading indicator is up for the duration of the request. On
    /// failure the previous list and table are kept.
    pub async fn list_records(&mut self) -> ClientResult<&[Record]> {
        self.view.set_loading(true);
        self.banner.clear();
        self.view.hide_banner();

        let result = self.api.list().await;
        self.view.set_loading(false);
        let records = result?;

        tracing::debug!(count = records.len(), "Fetched users");
        self.records.replace(records);
        self.view.render_table(&table::render(self.records.as_slice()));
        Ok(self.records.as_slice())
    }

    /// [`list_records`](Self::list_records), reporting failures
    pub async fn refresh(&mut self) -> ClientResult<()> {
        let result = self.list_records().await.map(|_| ());
        if let Err(e) = &result {
            self.report_error(&format!("{}: {}", LOAD_ERROR_PREFIX, e));
        }
        result
    }

    /// Create a record; on success reset the form and refresh
    pub async fn create_record(&mut self, draft: &RecordDraft) -> ClientResult<Record> {
        let record = self.api.create(draft).await?;
        tracing::info!(id = record.id, "Created user");
        self.after_save().await;
        Ok(record)
    }

    /// Update record `id`; on success reset the form and refresh
    pub async fn update_record(&mut self, id: u64, draft: &RecordDraft) -> ClientResult<Record> {
        let record = self.api.update(id, draft).await?;
        tracing::info!(id = record.id, "Updated user");
        self.after_save().await;
        Ok(record)
    }

    async fn after_save(&mut self) {
        self.reset_form();
        // A failed refresh is reported on its own; the save itself succeeded
        let _ = self.refresh().await;
    }

    /// Ask for confirmation, then delete record `id` and refresh
    pub async fn delete_record(&mut self, id: u64) -> ClientResult<Deletion> {
        if !self.confirm.confirm(DELETE_CONFIRMATION) {
            tracing::debug!(id, "Delete cancelled");
            return Ok(Deletion::Cancelled);
        }

        self.api.delete(id).await?;
        tracing::info!(id, "Deleted user");
        let _ = self.refresh().await;
        Ok(Deletion::Deleted)
    }

    /// Submit the form: create when creating, update when editing.
    ///
    /// On failure the form keeps its mode and buffers.
    pub async fn submit(&mut self) -> ClientResult<Record> {
        self.view.set_submitting(true);
        let result = match self.form.submission() {
            Submission::Create(draft) => self.create_record(&draft).await,
            Submission::Update(id, draft) => self.update_record(id, &draft).await,
        };
        self.view.set_submitting(false);

        if let Err(e) = &result {
            self.report_error(&e.to_string());
        }
        result
    }

    /// [`delete_record`](Self::delete_record), reporting failures
    pub async fn request_delete(&mut self, id: u64) -> ClientResult<Deletion> {
        let result = self.delete_record(id).await;
        if let Err(e) = &result {
            self.report_error(&format!("{}: {}", DELETE_ERROR_PREFIX, e));
        }
        result
    }

    /// Run a row's action button
    pub async fn handle(&mut self, action: &RowAction) -> ClientResult<()> {
        match action {
            RowAction::Edit { id, name, mail } => {
                self.enter_edit_mode(*id, name.clone(), mail.clone());
                Ok(())
            }
            RowAction::Delete { id } => self.request_delete(*id).await.map(|_| ()),
        }
    }

    /// Start editing a record from the current list; `false` if it isn't listed
    pub fn edit(&mut self, id: u64) -> bool {
        match self.records.get(id).cloned() {
            Some(record) => {
                self.enter_edit_mode(record.id, record.name, record.mail);
                true
            }
            None => false,
        }
    }

    pub fn enter_edit_mode(&mut self, id: u64, name: impl Into<String>, mail: impl Into<String>) {
        self.form.enter_edit(id, name, mail);
        self.view.render_form(&self.form);
        self.view.focus_form();
    }

    pub fn reset_form(&mut self) {
        self.form.reset();
        self.view.render_form(&self.form);
    }

    /// The Cancel button
    pub fn cancel(&mut self) {
        self.reset_form();
    }

    /// Name input changed
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.form.set_name(name);
    }

    /// Mail input changed
    pub fn set_mail(&mut self, mail: impl Into<String>) {
        self.form.set_mail(mail);
    }

    /// Show a transient error banner
    pub fn report_error(&mut self, message: &str) {
        tracing::warn!(message, "Reporting error");
        let ticket = self.banner.show(message);
        self.view.show_banner(message, ticket, self.banner_timeout);
    }

    /// A banner's timeout passed; hide it unless a newer message replaced it
    pub fn dismiss_banner(&mut self, ticket: BannerTicket) -> bool {
        let dismissed = self.banner.dismiss(ticket);
        if dismissed {
            self.view.hide_banner();
        }
        dismissed
    }
}
