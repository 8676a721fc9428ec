//! Create/edit form: draft fields, validation and submission state.
//!
//! Everything here is a pure transition over [`FormState`]; the event loop
//! feeds key presses and controller results in as [`FormEvent`]s and acts on
//! the returned [`FormOutcome`].

use std::collections::BTreeMap;
use std::sync::LazyLock;
use std::time::{Duration, Instant};

use regex::Regex;

use crate::model::{CreateUserDraft, UpdateUserDraft, User, UserField, UserSubmission};

/// Pause between a successful create and the draft being emptied.
pub const RESET_DELAY: Duration = Duration::from_millis(1000);

/// Whether the form is creating a new record or editing an existing one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

/// Raw text of the five editable fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub company: String,
    pub job_title: String,
}

impl UserDraft {
    /// Draft populated from a record; absent optional fields become "".
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            surname: user.surname.clone(),
            email: user.email.clone(),
            company: user.company.clone().unwrap_or_default(),
            job_title: user.job_title.clone().unwrap_or_default(),
        }
    }

    /// Current text of `field`.
    pub fn get(&self, field: UserField) -> &str {
        match field {
            UserField::Name => &self.name,
            UserField::Surname => &self.surname,
            UserField::Email => &self.email,
            UserField::Company => &self.company,
            UserField::JobTitle => &self.job_title,
        }
    }

    pub fn set(&mut self, field: UserField, value: String) {
        match field {
            UserField::Name => self.name = value,
            UserField::Surname => self.surname = value,
            UserField::Email => self.email = value,
            UserField::Company => self.company = value,
            UserField::JobTitle => self.job_title = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        UserField::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    fn to_create(&self) -> CreateUserDraft {
        CreateUserDraft {
            name: self.name.clone(),
            surname: self.surname.clone(),
            email: self.email.clone(),
            company: Some(self.company.clone()),
            job_title: Some(self.job_title.clone()),
        }
    }

    fn to_update(&self, id: &str) -> UpdateUserDraft {
        UpdateUserDraft {
            id: id.to_string(),
            name: self.name.clone(),
            surname: self.surname.clone(),
            email: self.email.clone(),
            company: Some(self.company.clone()),
            job_title: Some(self.job_title.clone()),
        }
    }
}

/// `local@domain.tld` with no whitespace and exactly one `@`.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL_RE is a valid regex pattern")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Validate every field at once; an empty map means the draft is valid.
pub fn validate(draft: &UserDraft) -> BTreeMap<UserField, String> {
    let mut errors = BTreeMap::new();
    for field in UserField::ALL {
        let value = draft.get(field);
        if value.trim().is_empty() {
            errors.insert(field, format!("{} is required", field.label()));
        } else if field == UserField::Email && !is_valid_email(value) {
            errors.insert(field, "Please enter a valid email".to_string());
        }
    }
    errors
}

/// Inputs to the form state machine.
#[derive(Clone, Debug)]
pub enum FormEvent {
    /// Controller designated a record for editing (`Some`) or left edit mode (`None`).
    Load(Option<User>),
    /// A field's text changed.
    Input { field: UserField, value: String },
    FocusNext,
    FocusPrev,
    /// Submit attempt.
    Submit,
    /// Controller reported the outcome of the last submission.
    SubmitFinished { success: bool, now: Instant },
    /// Clock tick; applies a due post-create reset.
    Tick(Instant),
    Cancel,
}

/// What the owner of the form must do after a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormOutcome {
    None,
    /// Persist this submission and report back with `SubmitFinished`.
    Submit(UserSubmission),
    /// Leave edit mode.
    CancelEdit,
}

/// Input state of the create/edit form.
///
/// Owned by [`AppState`](crate::app::AppState) and only changed through
/// [`FormState::apply`].
#[derive(Clone, Debug)]
pub struct FormState {
    pub mode: FormMode,
    pub draft: UserDraft,
    pub errors: BTreeMap<UserField, String>,
    pub submitting: bool,
    pub focused: UserField,
    pub reset_at: Option<Instant>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            mode: FormMode::Create,
            draft: UserDraft::default(),
            errors: BTreeMap::new(),
            submitting: false,
            focused: UserField::Name,
            reset_at: None,
        }
    }
}

impl FormState {
    /// True in Edit mode.
    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    /// Validation message for `field`, if it failed the last submit.
    pub fn error(&self, field: UserField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Panel title for the current mode.
    pub fn title(&self) -> &'static str {
        if self.is_editing() { "Edit User Information" } else { "Add New User" }
    }

    /// Label of the submit control; `busy` also covers a save pending in the controller.
    pub fn submit_label(&self, busy: bool) -> &'static str {
        match (self.is_editing(), busy || self.submitting) {
            (false, false) => "Add User",
            (true, false) => "Update User",
            (false, true) => "Adding...",
            (true, true) => "Updating...",
        }
    }

    /// Apply one event and return the next state with what the owner must do.
    /// Submit and Cancel are ignored while a submission is pending.
    pub fn apply(mut self, event: FormEvent) -> (Self, FormOutcome) {
        match event {
            FormEvent::Load(user) => {
                match user {
                    Some(u) => {
                        self.draft = UserDraft::from_user(&u);
                        self.mode = FormMode::Edit { id: u.id };
                    }
                    None => {
                        self.draft = UserDraft::default();
                        self.mode = FormMode::Create;
                    }
                }
                self.errors.clear();
                self.reset_at = None;
                self.focused = UserField::Name;
            }
            FormEvent::Input { field, value } => {
                self.draft.set(field, value);
                self.errors.remove(&field);
            }
            FormEvent::FocusNext => self.focused = self.focused.next(),
            FormEvent::FocusPrev => self.focused = self.focused.prev(),
            FormEvent::Submit => {
                if self.submitting {
                    return (self, FormOutcome::None);
                }
                self.errors = validate(&self.draft);
                if !self.errors.is_empty() {
                    return (self, FormOutcome::None);
                }
                let submission = match &self.mode {
                    FormMode::Create => UserSubmission::Create(self.draft.to_create()),
                    FormMode::Edit { id } => UserSubmission::Update(self.draft.to_update(id)),
                };
                self.submitting = true;
                return (self, FormOutcome::Submit(submission));
            }
            FormEvent::SubmitFinished { success, now } => {
                self.submitting = false;
                if success && !self.is_editing() {
                    self.reset_at = Some(now + RESET_DELAY);
                }
            }
            FormEvent::Tick(now) => {
                if let Some(due) = self.reset_at {
                    if now >= due {
                        self.reset_at = None;
                        self.draft = UserDraft::default();
                        self.errors.clear();
                        self.focused = UserField::Name;
                    }
                }
            }
            FormEvent::Cancel => {
                if self.submitting {
                    return (self, FormOutcome::None);
                }
                if self.is_editing() {
                    self.errors.clear();
                    return (self, FormOutcome::CancelEdit);
                }
                self.draft = UserDraft::default();
                self.errors.clear();
            }
        }
        (self, FormOutcome::None)
    }
}
