//! Form state
//!
//! The form is either creating a new record or editing an existing one.
//! The editing target lives in [`Mode`] so that the id can never outlive the
//! edit: leaving edit mode drops it.

use crate::model::RecordDraft;

pub const CREATE_TITLE: &str = "Add New User";
pub const EDIT_TITLE: &str = "Edit User";
pub const CREATE_SUBMIT: &str = "Add User";
pub const EDIT_SUBMIT: &str = "Update User";

/// What a submission of the form will do
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Submitting creates a new record
    #[default]
    Creating,
    /// Submitting updates the record with this id
    Editing(u64),
}

/// Labels shown on the form for a given mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormLabels {
    pub title: &'static str,
    pub submit: &'static str,
    pub cancel_visible: bool,
}

impl Mode {
    pub fn labels(self) -> FormLabels {
        match self {
            Mode::Creating => FormLabels {
                title: CREATE_TITLE,
                submit: CREATE_SUBMIT,
                cancel_visible: false,
            },
            Mode::Editing(_) => FormLabels {
                title: EDIT_TITLE,
                submit: EDIT_SUBMIT,
                cancel_visible: true,
            },
        }
    }
}

/// The request a form submission turns into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(RecordDraft),
    Update(u64, RecordDraft),
}

/// Transient form state: mode plus the two input buffers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    mode: Mode,
    name: String,
    mail: String,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to editing `id`, loading its current values into the buffers
    pub fn enter_edit(&mut self, id: u64, name: impl Into<String>, mail: impl Into<String>) {
        self.mode = Mode::Editing(id);
        self.name = name.into();
        self.mail = mail.into();
    }

    /// Back to an empty creating form
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_mail(&mut self, mail: impl Into<String>) {
        self.mail = mail.into();
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn editing_id(&self) -> Option<u64> {
        match self.mode {
            Mode::Creating => None,
            Mode::Editing(id) => Some(id),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mail(&self) -> &str {
        &self.mail
    }

    pub fn labels(&self) -> FormLabels {
        self.mode.labels()
    }

    /// Trimmed request body built from the buffers
    pub fn draft(&self) -> RecordDraft {
        RecordDraft::from_input(&self.name, &self.mail)
    }

    pub fn submission(&self) -> Submission {
        match self.mode {
            Mode::Creating => Submission::Create(self.draft()),
            Mode::Editing(id) => Submission::Update(id, self.draft()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_yields_creating_form() {
        let mut form = FormState::new();
        form.enter_edit(3, "x", "y");
        form.reset();

        assert_eq!(form.mode(), Mode::Creating);
        assert_eq!(form.editing_id(), None);
        assert_eq!(form.name(), "");
        assert_eq!(form.mail(), "");
        assert_eq!(form.labels().title, "Add New User");
        assert_eq!(form.labels().submit, "Add User");
        assert!(!form.labels().cancel_visible);
    }

    #[test]
    fn test_enter_edit() {
        let mut form = FormState::new();
        form.enter_edit(7, "Ann", "a@x.com");

        assert_eq!(form.editing_id(), Some(7));
        assert_eq!((form.name(), form.mail()), ("Ann", "a@x.com"));
        assert_eq!(form.labels().title, "Edit User");
        assert_eq!(form.labels().submit, "Update User");
        assert!(form.labels().cancel_visible);
    }

    #[test]
    fn test_submission_follows_mode() {
        let mut form = FormState::new();
        form.set_name(" Bo ");
        form.set_mail("b@x.com ");
        assert_eq!(
            form.submission(),
            Submission::Create(RecordDraft {
                name: "Bo".into(),
                mail: "b@x.com".into()
            })
        );

        form.enter_edit(4, "Cy", "c@x.com");
        form.set_mail("cy@x.com");
        assert_eq!(
            form.submission(),
            Submission::Update(
                4,
                RecordDraft {
                    name: "Cy".into(),
                    mail: "cy@x.com".into()
                }
            )
        );
    }
}
