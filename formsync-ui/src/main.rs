//! Formsync User Management Page
//!
//! Browser host for the form/table client, built with Leptos (WASM).
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. The `formsync` core owns the form, table and banner state;
//! this crate supplies the `fetch` transport, a signal-backed view and the
//! browser's `confirm()` dialog.

use leptos::*;

mod api;
mod app;
mod components;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
