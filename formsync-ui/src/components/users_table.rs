//! Users Table Component

use leptos::*;

use formsync::{RecordRow, RowAction, TableRow};

use crate::state::use_app_state;

#[component]
pub fn UsersTable() -> impl IntoView {
    let state = use_app_state();
    let view = state.view;

    view! {
        <div class="table-container">
            <h2>"Users"</h2>

            <Show when=move || view.loading.get()>
                <div id="loading" class="loading">"Loading users..."</div>
            </Show>

            <table>
                <thead>
                    <tr>
                        {move || view.table.with(|t| t.columns)
                            .iter()
                            .map(|column| view! { <th>{*column}</th> })
                            .collect_view()}
                    </tr>
                </thead>
                <tbody id="users-tbody">
                    {move || view.table.with(|t| t.rows.clone())
                        .into_iter()
                        .map(|row| match row {
                            TableRow::Placeholder { text, colspan } => view! {
                                <tr>
                                    <td colspan=colspan style="text-align: center;">{text}</td>
                                </tr>
                            }.into_view(),
                            TableRow::Record(record) => view! {
                                <UserRow row=record />
                            }.into_view(),
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn UserRow(row: RecordRow) -> impl IntoView {
    let state = use_app_state();
    let [id, name, mail] = row.cells;
    let buttons = row
        .actions
        .into_iter()
        .map(|action| {
            let class = match action {
                RowAction::Edit { .. } => "btn-edit",
                RowAction::Delete { .. } => "btn-delete",
            };
            let label = action.label();
            let state = state.clone();
            view! {
                <button class=class on:click=move |_| state.row_action(action.clone())>
                    {label}
                </button>
            }
        })
        .collect_view();

    view! {
        <tr>
            <td>{id}</td>
            <td>{name}</td>
            <td>{mail}</td>
            <td>
                <div class="action-buttons">{buttons}</div>
            </td>
        </tr>
    }
}
