//! User Form Component
//!
//! Creates a user, or updates the one being edited.

use leptos::*;

use crate::state::{use_app_state, FORM_ID};

#[component]
pub fn UserForm() -> impl IntoView {
    let state = use_app_state();
    let view = state.view;
    let labels = move || view.mode.get().labels();

    let submit_state = state.clone();
    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        submit_state.submit();
    };

    let on_cancel = move |_| state.cancel();

    view! {
        <div id=FORM_ID class="form-container">
            <h2 id="form-title">{move || labels().title}</h2>

            <form on:submit=on_submit>
                <div class="form-group">
                    <label for="user-name">"Name"</label>
                    <input
                        id="user-name"
                        type="text"
                        required
                        prop:value=move || view.name.get()
                        on:input=move |ev| view.name.set(event_target_value(&ev))
                    />
                </div>

                <div class="form-group">
                    <label for="user-mail">"Mail"</label>
                    <input
                        id="user-mail"
                        type="email"
                        required
                        prop:value=move || view.mail.get()
                        on:input=move |ev| view.mail.set(event_target_value(&ev))
                    />
                </div>

                <div class="form-actions">
                    <button
                        id="submit-btn"
                        type="submit"
                        class="btn-primary"
                        disabled=move || view.submitting.get()
                    >
                        {move || labels().submit}
                    </button>

                    <Show when=move || labels().cancel_visible>
                        <button
                            id="cancel-btn"
                            type="button"
                            class="btn-secondary"
                            on:click=on_cancel.clone()
                        >
                            "Cancel"
                        </button>
                    </Show>
                </div>
            </form>
        </div>
    }
}
