use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{response, Operation, ResponseParts, UsersApi};
use crate::error::{ClientError, ClientResult};
use crate::model::{Record, RecordDraft};

/// In-memory users backend for tests and offline sessions.
///
/// Clones share the same records, so a test can keep a handle after moving
/// one into a client. Assigns ids like an auto-increment column and answers
/// duplicate mails and unknown ids the way the real backend does.
#[derive(Clone, Debug, Default)]
pub struct MemoryUsersApi {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    records: Vec<Record>,
    next_id: u64,
    /// Injected outcomes, optionally reserved for one operation
    injected: VecDeque<(Option<Operation>, Injected)>,
    calls: Vec<Operation>,
}

#[derive(Debug)]
enum Injected {
    Response(ResponseParts),
    Network(String),
}

impl MemoryUsersApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with existing records; new ids continue after the highest one
    pub fn with_records(records: Vec<Record>) -> Self {
        let next_id = records.iter().map(|r| r.id).max().unwrap_or(0);
        Self {
            inner: Arc::new(Mutex::new(Inner {
                records,
                next_id,
                ..Inner::default()
            })),
        }
    }

    /// Answer the next call with this response instead of touching state
    pub fn respond_next(&self, parts: ResponseParts) {
        self.lock()
            .injected
            .push_back((None, Injected::Response(parts)));
    }

    /// Answer the next call of `op` with this response; other calls pass by
    pub fn respond_on(&self, op: Operation, parts: ResponseParts) {
        self.lock()
            .injected
            .push_back((Some(op), Injected::Response(parts)));
    }

    /// Fail the next call as if the connection dropped
    pub fn fail_next(&self, message: impl Into<String>) {
        self.lock()
            .injected
            .push_back((None, Injected::Network(message.into())));
    }

    /// Current backend contents
    pub fn records(&self) -> Vec<Record> {
        self.lock().records.clone()
    }

    /// Every call received so far, in order
    pub fn calls(&self) -> Vec<Operation> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock only means a test panicked mid-call
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn begin(&self, op: Operation) -> Option<ClientResult<ResponseParts>> {
        let mut inner = self.lock();
        inner.calls.push(op);
        let index = inner
            .injected
            .iter()
            .position(|(only, _)| only.map_or(true, |only| only == op))?;
        inner.injected.remove(index).map(|(_, injected)| match injected {
            Injected::Response(parts) => Ok(parts),
            Injected::Network(message) => Err(ClientError::Network(message)),
        })
    }
}

fn json_response(status: u16, reason: &str, body: serde_json::Value) -> ResponseParts {
    ResponseParts::new(status, reason, body.to_string())
}

fn detail(status: u16, reason: &str, detail: &str) -> ResponseParts {
    json_response(status, reason, serde_json::json!({ "detail": detail }))
}

impl Inner {
    fn mail_taken(&self, mail: &str, except: Option<u64>) -> bool {
        self.records
            .iter()
            .any(|r| r.mail == mail && Some(r.id) != except)
    }

    fn create(&mut self, draft: &RecordDraft) -> ResponseParts {
        if self.mail_taken(&draft.mail, None) {
            return detail(400, "Bad Request", "Email already exists");
        }
        self.next_id += 1;
        let record = Record::new(self.next_id, draft.name.clone(), draft.mail.clone());
        self.records.push(record.clone());
        json_response(201, "Created", serde_json::json!(record))
    }

    fn update(&mut self, id: u64, draft: &RecordDraft) -> ResponseParts {
        if self.mail_taken(&draft.mail, Some(id)) {
            return detail(400, "Bad Request", "Email already exists");
        }
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.name = draft.name.clone();
                record.mail = draft.mail.clone();
                json_response(200, "OK", serde_json::json!(record))
            }
            None => detail(404, "Not Found", "User not found"),
        }
    }

    fn delete(&mut self, id: u64) -> ResponseParts {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() == before {
            detail(404, "Not Found", "User not found")
        } else {
            ResponseParts::new(204, "No Content", Vec::new())
        }
    }
}

#[async_trait(?Send)]
impl UsersApi for MemoryUsersApi {
    async fn list(&self) -> ClientResult<Vec<Record>> {
        let parts = match self.begin(Operation::List) {
            Some(injected) => injected?,
            None => json_response(200, "OK", serde_json::json!(self.lock().records)),
        };
        response::decode_list(&parts)
    }

    async fn create(&self, draft: &RecordDraft) -> ClientResult<Record> {
        let parts = match self.begin(Operation::Create) {
            Some(injected) => injected?,
            None => self.lock().create(draft),
        };
        response::decode_record(Operation::Create, &parts)
    }

    async fn update(&self, id: u64, draft: &RecordDraft) -> ClientResult<Record> {
        let parts = match self.begin(Operation::Update) {
            Some(injected) => injected?,
            None => self.lock().update(id, draft),
        };
        response::decode_record(Operation::Update, &parts)
    }

    async fn delete(&self, id: u64) -> ClientResult<()> {
        let parts = match self.begin(Operation::Delete) {
            Some(injected) => injected?,
            None => self.lock().delete(id),
        };
        response::decode_deleted(&parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, mail: &str) -> RecordDraft {
        RecordDraft::from_input(name, mail)
    }

    #[tokio::test]
    async fn test_crud_cycle() {
        let api = MemoryUsersApi::new();
        assert!(api.list().await.unwrap().is_empty());

        let ann = api.create(&draft("Ann", "a@x.com")).await.unwrap();
        let bo = api.create(&draft("Bo", "b@x.com")).await.unwrap();
        assert_eq!((ann.id, bo.id), (1, 2));

        let updated = api.update(bo.id, &draft("Bob", "bob@x.com")).await.unwrap();
        assert_eq!(updated, Record::new(2, "Bob", "bob@x.com"));

        api.delete(ann.id).await.unwrap();
        assert_eq!(api.list().await.unwrap(), vec![Record::new(2, "Bob", "bob@x.com")]);
    }

    #[tokio::test]
    async fn test_duplicate_and_missing() {
        let api = MemoryUsersApi::with_records(vec![Record::new(4, "Ann", "a@x.com")]);

        let err = api.create(&draft("Other", "a@x.com")).await.unwrap_err();
        assert_eq!(err.to_string(), "Email already exists");

        let err = api.update(99, &draft("X", "x@x.com")).await.unwrap_err();
        assert_eq!(err.to_string(), "User not found");

        let err = api.delete(99).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to delete user");

        let created = api.create(&draft("Cy", "c@x.com")).await.unwrap();
        assert_eq!(created.id, 5);
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let api = MemoryUsersApi::new();
        api.fail_next("connection refused");
        api.respond_next(ResponseParts::new(503, "Service Unavailable", ""));

        assert_eq!(
            api.list().await.unwrap_err(),
            ClientError::Network("connection refused".into())
        );
        assert_eq!(
            api.list().await.unwrap_err().to_string(),
            "Failed to load users: Service Unavailable"
        );
        assert!(api.list().await.is_ok());
        assert_eq!(api.calls(), vec![Operation::List; 3]);
    }

    #[tokio::test]
    async fn test_response_reserved_for_operation() {
        let api = MemoryUsersApi::new();
        api.respond_on(Operation::List, ResponseParts::new(500, "Internal Server Error", ""));

        let created = api.create(&draft("Ann", "a@x.com")).await.unwrap();
        assert_eq!(created.id, 1);
        assert!(api.list().await.is_err());
        assert_eq!(api.list().await.unwrap(), vec![created]);
    }
}
