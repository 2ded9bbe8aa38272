//! Application State
//!
//! The `formsync` client drives a [`SignalView`]; components read the
//! signals and send user actions through [`AppState`].

use std::rc::Rc;
use std::time::Duration;

use futures_util::lock::Mutex;
use leptos::*;

use formsync::{
    BannerTicket, Confirm, FormState, FormSyncClient, Mode, RowAction, TableView, View,
};

use crate::api::GlooUsersApi;

/// Element id of the form container, scrolled to when editing starts
pub const FORM_ID: &str = "user-form";

/// View state as Leptos signals
#[derive(Clone, Copy)]
pub struct SignalView {
    pub table: RwSignal<TableView>,
    pub mode: RwSignal<Mode>,
    /// Name input, bound to the DOM
    pub name: RwSignal<String>,
    /// Mail input, bound to the DOM
    pub mail: RwSignal<String>,
    pub loading: RwSignal<bool>,
    pub submitting: RwSignal<bool>,
    /// Message on the error banner, mirrored from the client
    pub banner: RwSignal<Option<String>>,
    /// Set by the dismissal timer; handed back to the client
    pub expired: RwSignal<Option<BannerTicket>>,
}

impl SignalView {
    pub fn new() -> Self {
        Self {
            table: create_rw_signal(TableView::default()),
            mode: create_rw_signal(Mode::default()),
            name: create_rw_signal(String::new()),
            mail: create_rw_signal(String::new()),
            loading: create_rw_signal(false),
            submitting: create_rw_signal(false),
            banner: create_rw_signal(None),
            expired: create_rw_signal(None),
        }
    }

    /// Start a submission: returns the input values, or `None` while one is
    /// already in flight
    pub fn begin_submit(&self) -> Option<(String, String)> {
        if self.submitting.get_untracked() {
            return None;
        }
        self.submitting.set(true);
        Some((self.name.get_untracked(), self.mail.get_untracked()))
    }
}

impl View for SignalView {
    fn render_table(&mut self, table: &TableView) {
        self.table.set(table.clone());
    }

    fn render_form(&mut self, form: &FormState) {
        self.mode.set(form.mode());
        self.name.set(form.name().to_string());
        self.mail.set(form.mail().to_string());
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading.set(loading);
    }

    fn show_banner(&mut self, message: &str, ticket: BannerTicket, ttl: Duration) {
        self.banner.set(Some(message.to_string()));

        let expired = self.expired;
        gloo_timers::callback::Timeout::new(timeout_millis(ttl), move || {
            expired.set(Some(ticket));
        })
        .forget();
    }

    fn hide_banner(&mut self) {
        self.banner.set(None);
    }

    fn focus_form(&mut self) {
        if let Some(element) = document().get_element_by_id(FORM_ID) {
            let mut options = web_sys::ScrollIntoViewOptions::new();
            options.behavior(web_sys::ScrollBehavior::Smooth);
            element.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }

    fn set_submitting(&mut self, submitting: bool) {
        self.submitting.set(submitting);
    }
}

/// Timer delay in milliseconds, saturating at what `setTimeout` takes
fn timeout_millis(ttl: Duration) -> u32 {
    u32::try_from(ttl.as_millis()).unwrap_or(u32::MAX)
}

/// The browser's `confirm()` dialog
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserConfirm;

impl Confirm for BrowserConfirm {
    fn confirm(&mut self, message: &str) -> bool {
        match window().confirm_with_message(message) {
            Ok(answer) => answer,
            Err(e) => {
                web_sys::console::error_2(&"confirm() failed:".into(), &e);
                false
            }
        }
    }
}

type BrowserClient = FormSyncClient<GlooUsersApi, SignalView, BrowserConfirm>;

/// Shared handle provided to all components
#[derive(Clone)]
pub struct AppState {
    pub view: SignalView,
    client: Rc<Mutex<BrowserClient>>,
}

/// Provide app state to the component tree
pub fn provide_app_state() -> AppState {
    let view = SignalView::new();
    let client = FormSyncClient::new(GlooUsersApi::from_storage(), view, BrowserConfirm);
    let state = AppState {
        view,
        client: Rc::new(Mutex::new(client)),
    };

    // Dismissal timers report back here; the client ignores stale tickets
    let expired = view.expired;
    let client = state.client.clone();
    create_effect(move |_| {
        if let Some(ticket) = expired.get() {
            let client = client.clone();
            spawn_local(async move {
                client.lock().await.dismiss_banner(ticket);
            });
        }
    });

    provide_context(state.clone());
    state
}

pub fn use_app_state() -> AppState {
    expect_context::<AppState>()
}

impl AppState {
    /// Initial render and first fetch
    pub fn start(&self) {
        let client = self.client.clone();
        spawn_local(async move {
            let _ = client.lock().await.start().await;
        });
    }

    /// Submit the form with the input values at the time of the click.
    ///
    /// Ignored while a submission is queued or running.
    pub fn submit(&self) {
        let Some((name, mail)) = self.view.begin_submit() else {
            return;
        };
        let client = self.client.clone();
        spawn_local(async move {
            let mut client = client.lock().await;
            client.set_name(name);
            client.set_mail(mail);
            let _ = client.submit().await;
        });
    }

    pub fn cancel(&self) {
        let client = self.client.clone();
        spawn_local(async move {
            client.lock().await.cancel();
        });
    }

    /// Run a table row's Edit or Delete button
    pub fn row_action(&self, action: RowAction) {
        let client = self.client.clone();
        spawn_local(async move {
            let _ = client.lock().await.handle(&action).await;
        });
    }
}
