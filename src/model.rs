//! Core data types for user records
//!
//! - `Record`: a user as returned by the backend
//! - `RecordDraft`: the `{name, mail}` body sent on create and update
//! - `RecordList`: the most recently fetched records, used for rendering

use serde::{Deserialize, Serialize};

/// A user record owned by the backend
///
/// `id` is assigned by the server on creation and never changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Record {
    pub id: u64,
    pub name: String,
    pub mail: String,
}

impl Record {
    pub fn new(id: u64, name: impl Into<String>, mail: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            mail: mail.into(),
        }
    }

    /// The editable part of this record
    pub fn draft(&self) -> RecordDraft {
        RecordDraft {
            name: self.name.clone(),
            mail: self.mail.clone(),
        }
    }
}

/// Request body for `POST /users` and `PUT /users/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordDraft {
    pub name: String,
    pub mail: String,
}

impl RecordDraft {
    /// Build a draft from raw input buffers, trimming surrounding whitespace
    pub fn from_input(name: &str, mail: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            mail: mail.trim().to_string(),
        }
    }
}

/// The last successfully fetched list of records
///
/// Never diffed: every successful fetch replaces the whole list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordList {
    records: Vec<Record>,
}

impl RecordList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with a freshly fetched list
    pub fn replace(&mut self, records: Vec<Record>) {
        self.records = records;
    }

    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, id: u64) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<Record>> for RecordList {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_wire_format() {
        let record: Record =
            serde_json::from_str(r#"{"id": 3, "name": "Ann", "mail": "a@x.com"}"#).unwrap();
        assert_eq!(record, Record::new(3, "Ann", "a@x.com"));

        let body = serde_json::to_value(record.draft()).unwrap();
        assert_eq!(body, serde_json::json!({"name": "Ann", "mail": "a@x.com"}));
    }

    #[test]
    fn test_draft_trims_input() {
        let draft = RecordDraft::from_input("  Bo ", "\tb@x.com\n");
        assert_eq!(draft.name, "Bo");
        assert_eq!(draft.mail, "b@x.com");
    }

    #[test]
    fn test_record_list_replaces_wholesale() {
        let mut list = RecordList::from(vec![Record::new(1, "a", "a@x"), Record::new(2, "b", "b@x")]);
        assert_eq!(list.len(), 2);

        list.replace(vec![Record::new(5, "e", "e@x")]);
        assert_eq!(list.len(), 1);
        assert!(list.get(1).is_none());
        assert_eq!(list.get(5).map(|r| r.name.as_str()), Some("e"));

        list.replace(Vec::new());
        assert!(list.is_empty());
    }
}
