//! HTTP transport against a local users backend

#![cfg(feature = "native")]

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::json;

use formsync::{
    ApiConfig, AssumeYes, ClientError, ErrorKind, FormSyncClient, HttpUsersApi, Record,
    RecordDraft, TerminalView, UsersApi,
};

#[derive(Default)]
struct Backend {
    users: Vec<Record>,
    next_id: u64,
    fail_list: bool,
}

type Shared = Arc<Mutex<Backend>>;

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

fn validate(draft: &RecordDraft) -> Option<Response> {
    if draft.name.is_empty() {
        let body = json!({
            "detail": [{ "loc": ["body", "name"], "msg": "Name must not be empty", "type": "value_error" }]
        });
        return Some((StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response());
    }
    None
}

async fn list_users(State(backend): State<Shared>) -> Response {
    let backend = backend.lock().unwrap();
    if backend.fail_list {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    Json(backend.users.clone()).into_response()
}

async fn create_user(State(backend): State<Shared>, Json(draft): Json<RecordDraft>) -> Response {
    if let Some(rejection) = validate(&draft) {
        return rejection;
    }
    let mut backend = backend.lock().unwrap();
    if backend.users.iter().any(|u| u.mail == draft.mail) {
        return detail(StatusCode::BAD_REQUEST, "Email already exists");
    }
    backend.next_id += 1;
    let record = Record::new(backend.next_id, draft.name, draft.mail);
    backend.users.push(record.clone());
    (StatusCode::CREATED, Json(record)).into_response()
}

async fn update_user(
    State(backend): State<Shared>,
    Path(id): Path<u64>,
    Json(draft): Json<RecordDraft>,
) -> Response {
    if let Some(rejection) = validate(&draft) {
        return rejection;
    }
    let mut backend = backend.lock().unwrap();
    if backend.users.iter().any(|u| u.mail == draft.mail && u.id != id) {
        return detail(StatusCode::BAD_REQUEST, "Email already exists");
    }
    match backend.users.iter_mut().find(|u| u.id == id) {
        Some(user) => {
            user.name = draft.name;
            user.mail = draft.mail;
            Json(user.clone()).into_response()
        }
        None => detail(StatusCode::NOT_FOUND, "User not found"),
    }
}

async fn delete_user(State(backend): State<Shared>, Path(id): Path<u64>) -> Response {
    let mut backend = backend.lock().unwrap();
    let before = backend.users.len();
    backend.users.retain(|u| u.id != id);
    if backend.users.len() == before {
        detail(StatusCode::NOT_FOUND, "User not found")
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

/// Serve a fresh backend on an ephemeral port
async fn spawn_backend() -> (HttpUsersApi, Shared) {
    let backend = Shared::default();
    let app = Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/:id", put(update_user).delete(delete_user))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = ApiConfig {
        base_url: format!("http://{}/api/", addr),
        request_timeout_secs: 5,
    };
    (HttpUsersApi::new(&config).unwrap(), backend)
}

fn draft(name: &str, mail: &str) -> RecordDraft {
    RecordDraft::from_input(name, mail)
}

#[tokio::test]
async fn test_crud_round_trips() {
    let (api, _) = spawn_backend().await;
    assert!(api.list().await.unwrap().is_empty());

    let ann = api.create(&draft("Ann", "a@x.com")).await.unwrap();
    assert_eq!(ann, Record::new(1, "Ann", "a@x.com"));

    let updated = api.update(ann.id, &draft("Anna", "anna@x.com")).await.unwrap();
    assert_eq!(updated, Record::new(1, "Anna", "anna@x.com"));
    assert_eq!(api.list().await.unwrap(), vec![updated]);

    api.delete(ann.id).await.unwrap();
    assert!(api.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_server_detail_is_surfaced() {
    let (api, _) = spawn_backend().await;
    api.create(&draft("Ann", "a@x.com")).await.unwrap();

    let err = api.create(&draft("Other", "a@x.com")).await.unwrap_err();
    assert_eq!(
        err,
        ClientError::Api {
            status: 400,
            detail: "Email already exists".to_string()
        }
    );
    assert_eq!(err.kind(), ErrorKind::ApiDetail);

    let err = api.create(&draft("  ", "b@x.com")).await.unwrap_err();
    assert_eq!(err.status(), Some(422));
    assert_eq!(err.to_string(), "Name must not be empty");

    let err = api.update(42, &draft("X", "x@x.com")).await.unwrap_err();
    assert_eq!(err.to_string(), "User not found");
}

#[tokio::test]
async fn test_generic_failures() {
    let (api, backend) = spawn_backend().await;

    let err = api.delete(42).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to delete user");
    assert_eq!(err.kind(), ErrorKind::NetworkOrStatus);

    backend.lock().unwrap().fail_list = true;
    let err = api.list().await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to load users: Internal Server Error");
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_client_session_over_http() {
    let (api, backend) = spawn_backend().await;
    let view = TerminalView::new(Vec::new(), Vec::new(), false);
    let mut client = FormSyncClient::new(api, view, AssumeYes);
    client.start().await.unwrap();

    client.set_name(" Bo ");
    client.set_mail("b@x.com");
    let bo = client.submit().await.unwrap();
    assert_eq!(client.records(), &[bo.clone()]);

    assert!(client.edit(bo.id));
    client.set_mail("bo@x.com");
    client.submit().await.unwrap();
    assert_eq!(client.records(), &[Record::new(bo.id, "Bo", "bo@x.com")]);

    client.set_name("Cy");
    client.set_mail("bo@x.com");
    assert!(client.submit().await.is_err());
    assert_eq!(client.banner().message(), Some("Email already exists"));
    assert_eq!(client.form().name(), "Cy");

    client.request_delete(bo.id).await.unwrap();
    assert!(client.records().is_empty());
    assert!(backend.lock().unwrap().users.is_empty());

    let out = String::from_utf8(client.view().out().clone()).unwrap();
    assert!(out.contains("No users found"));
    assert!(out.contains("bo@x.com"));
}
