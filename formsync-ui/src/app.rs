//! App Root Component

use leptos::*;

use crate::components::{ErrorBanner, UserForm, UsersTable};
use crate::state::provide_app_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let state = provide_app_state();

    // Initial render and first fetch
    state.start();

    view! {
        <div class="container">
            <h1>"User Management"</h1>

            <ErrorBanner />

            <UserForm />

            <UsersTable />
        </div>
    }
}
