//! Error Banner Component

use leptos::*;

use crate::state::use_app_state;

/// Transient error message; hidden when empty
#[component]
pub fn ErrorBanner() -> impl IntoView {
    let state = use_app_state();
    let banner = state.view.banner;

    view! {
        {move || {
            banner.get().map(|message| view! {
                <div id="error" class="error" role="alert">
                    {message}
                </div>
            })
        }}
    }
}
