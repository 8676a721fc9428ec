//! Page controller: owns the user list, the edit selection and the notices,
//! and turns form submissions into API commands.
//!
//! [`PageState::apply`] is synchronous and never touches the network. Work
//! that needs the backend comes back as a [`Command`]; run it with
//! [`execute`] and feed the resulting [`PageEvent`] back in.

use std::collections::VecDeque;

use tracing::{debug, error, info};

use crate::api::UserApi;
use crate::app::list::{ListEvent, UserListState};
use crate::error::{ApiError, notice_text};
use crate::model::{CreateUserDraft, UpdateUserDraft, User, UserSubmission};

pub const LOAD_FAILED: &str = "Failed to load users. Please try again.";
pub const SAVE_FAILED: &str = "Failed to save user. Please try again.";
pub const USER_ADDED: &str = "User added successfully!";
pub const USER_UPDATED: &str = "User updated successfully!";

/// Whether a notice reports success or failure.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A dismissible message shown over the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self.kind {
            NoticeKind::Success => "Success",
            NoticeKind::Error => "Error",
        }
    }
}

#[derive(Debug)]
pub enum PageEvent {
    /// The page came up; triggers the one initial fetch.
    Mounted,
    UsersLoaded(Result<Vec<User>, ApiError>),
    EditRequested(User),
    CancelEdit,
    SubmitRequested(UserSubmission),
    Saved(Result<User, ApiError>),
    DismissNotice,
}

/// Backend work requested by the controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    FetchUsers,
    Create(CreateUserDraft),
    Update(UpdateUserDraft),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageOutcome {
    None,
    Run(Command),
    /// A save completed; the form decides whether to reset from this.
    SaveFinished { success: bool },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum SaveKind {
    Create,
    Update,
}

/// Page controller state: the user list, the record being edited, queued
/// notices and the in-flight save.
#[derive(Debug, Default)]
pub struct PageState {
    pub list: UserListState,
    pub editing: Option<User>,
    pub notices: VecDeque<Notice>,
    mounted: bool,
    saving: Option<SaveKind>,
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a create or update is in flight.
    pub fn is_saving(&self) -> bool {
        self.saving.is_some()
    }

    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    fn update_list(&mut self, event: ListEvent) {
        self.list = std::mem::take(&mut self.list).apply(event);
    }

    fn notify(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.notices.push_back(Notice {
            kind,
            message: message.into(),
        });
    }

    /// Apply one event without touching the network. A `Run` outcome carries
    /// backend work whose result must be fed back as another event.
    pub fn apply(&mut self, event: PageEvent) -> PageOutcome {
        match event {
            PageEvent::Mounted => {
                if self.mounted {
                    return PageOutcome::None;
                }
                self.mounted = true;
                self.update_list(ListEvent::FetchStarted);
                PageOutcome::Run(Command::FetchUsers)
            }
            PageEvent::UsersLoaded(Ok(users)) => {
                info!(count = users.len(), "users loaded successfully");
                self.update_list(ListEvent::FetchSucceeded(users));
                PageOutcome::None
            }
            PageEvent::UsersLoaded(Err(e)) => {
                error!(error = %e, "loading users failed");
                self.update_list(ListEvent::FetchFailed);
                self.notify(NoticeKind::Error, notice_text(&e, LOAD_FAILED));
                PageOutcome::None
            }
            PageEvent::EditRequested(user) => {
                debug!(id = %user.id, "editing user");
                self.editing = Some(user);
                PageOutcome::None
            }
            PageEvent::CancelEdit => {
                debug!("cancelled editing");
                self.editing = None;
                PageOutcome::None
            }
            PageEvent::SubmitRequested(submission) => {
                if self.saving.is_some() {
                    return PageOutcome::None;
                }
                let command = match (submission, &self.editing) {
                    (UserSubmission::Update(draft), Some(_)) => {
                        self.saving = Some(SaveKind::Update);
                        Command::Update(draft)
                    }
                    (UserSubmission::Update(draft), None) => {
                        self.saving = Some(SaveKind::Create);
                        Command::Create(CreateUserDraft {
                            name: draft.name,
                            surname: draft.surname,
                            email: draft.email,
                            company: draft.company,
                            job_title: draft.job_title,
                        })
                    }
                    (UserSubmission::Create(draft), _) => {
                        self.saving = Some(SaveKind::Create);
                        Command::Create(draft)
                    }
                };
                PageOutcome::Run(command)
            }
            PageEvent::Saved(result) => {
                let Some(kind) = self.saving.take() else {
                    return PageOutcome::None;
                };
                match result {
                    Ok(user) => {
                        info!(id = %user.id, ?kind, "user saved");
                        match kind {
                            SaveKind::Update => {
                                self.update_list(ListEvent::Updated(user));
                                self.notify(NoticeKind::Success, USER_UPDATED);
                                self.editing = None;
                            }
                            SaveKind::Create => {
                                self.update_list(ListEvent::Created(user));
                                self.notify(NoticeKind::Success, USER_ADDED);
                            }
                        }
                        PageOutcome::SaveFinished { success: true }
                    }
                    Err(e) => {
                        error!(error = %e, ?kind, "saving user failed");
                        self.notify(NoticeKind::Error, notice_text(&e, SAVE_FAILED));
                        PageOutcome::SaveFinished { success: false }
                    }
                }
            }
            PageEvent::DismissNotice => {
                self.notices.pop_front();
                PageOutcome::None
            }
        }
    }

    /// Apply `event` and run any resulting commands to completion against `api`.
    pub async fn dispatch<A: UserApi + ?Sized>(&mut self, api: &A, event: PageEvent) -> PageOutcome {
        let mut outcome = self.apply(event);
        while let PageOutcome::Run(command) = outcome {
            let next = execute(api, command).await;
            outcome = self.apply(next);
        }
        outcome
    }

    /// Persist a submission; `true` when the backend accepted it.
    pub async fn submit<A: UserApi + ?Sized>(&mut self, api: &A, submission: UserSubmission) -> bool {
        matches!(
            self.dispatch(api, PageEvent::SubmitRequested(submission)).await,
            PageOutcome::SaveFinished { success: true }
        )
    }
}

/// Run a command against the backend and wrap the result as the event that reports it.
pub async fn execute<A: UserApi + ?Sized>(api: &A, command: Command) -> PageEvent {
    match command {
        Command::FetchUsers => PageEvent::UsersLoaded(api.list().await),
        Command::Create(draft) => PageEvent::Saved(api.create(&draft).await),
        Command::Update(draft) => PageEvent::Saved(api.update(&draft).await),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mk_user(id: &str, name: &str) -> User {
        User {
            id: id.into(),
            name: name.into(),
            surname: "Doe".into(),
            email: format!("{name}@example.com"),
            company: Some("Acme".into()),
            job_title: Some("Dev".into()),
        }
    }

    fn draft(name: &str) -> CreateUserDraft {
        CreateUserDraft {
            name: name.into(),
            surname: "Doe".into(),
            email: format!("{name}@example.com"),
            company: Some("Acme".into()),
            job_title: Some("Dev".into()),
        }
    }

    fn loaded(users: Vec<User>) -> PageState {
        let mut page = PageState::new();
        page.apply(PageEvent::Mounted);
        page.apply(PageEvent::UsersLoaded(Ok(users)));
        page
    }

    #[test]
    fn mount_fetches_exactly_once() {
        let mut page = PageState::new();
        assert_eq!(page.apply(PageEvent::Mounted), PageOutcome::Run(Command::FetchUsers));
        assert!(page.list.loading);
        assert_eq!(page.apply(PageEvent::Mounted), PageOutcome::None);
    }

    #[test]
    fn load_failure_produces_one_notice_and_empty_list() {
        let mut page = PageState::new();
        page.apply(PageEvent::Mounted);
        page.apply(PageEvent::UsersLoaded(Err(ApiError::status(500, "Failed to fetch users"))));
        assert!(page.list.is_empty());
        assert!(!page.list.loading);
        assert_eq!(page.notices.len(), 1);
        let notice = page.current_notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.message.contains("Failed to fetch users"));
    }

    #[test]
    fn create_appends_and_notifies() {
        let mut page = loaded(vec![mk_user("1", "ann")]);
        let outcome = page.apply(PageEvent::SubmitRequested(UserSubmission::Create(draft("bob"))));
        assert_eq!(outcome, PageOutcome::Run(Command::Create(draft("bob"))));
        assert!(page.is_saving());

        let outcome = page.apply(PageEvent::Saved(Ok(mk_user("2", "bob"))));
        assert_eq!(outcome, PageOutcome::SaveFinished { success: true });
        assert!(!page.is_saving());
        assert_eq!(page.list.users.last().unwrap().id, "2");
        assert_eq!(page.current_notice().unwrap().message, USER_ADDED);
    }

    #[test]
    fn update_replaces_entry_and_leaves_edit_mode() {
        let mut page = loaded(vec![mk_user("1", "ann"), mk_user("2", "bob")]);
        page.apply(PageEvent::EditRequested(mk_user("1", "ann")));
        assert!(page.editing.is_some());

        let update = UpdateUserDraft {
            id: "1".into(),
            name: "anna".into(),
            surname: "Doe".into(),
            email: "anna@example.com".into(),
            company: Some("Acme".into()),
            job_title: Some("Dev".into()),
        };
        let outcome = page.apply(PageEvent::SubmitRequested(UserSubmission::Update(update.clone())));
        assert_eq!(outcome, PageOutcome::Run(Command::Update(update)));

        page.apply(PageEvent::Saved(Ok(mk_user("1", "anna"))));
        assert!(page.editing.is_none());
        assert_eq!(page.list.users[0].name, "anna");
        assert_eq!(page.list.users[1].name, "bob");
        assert_eq!(page.current_notice().unwrap().message, USER_UPDATED);
    }

    #[test]
    fn failed_save_leaves_list_and_selection() {
        let mut page = loaded(vec![mk_user("1", "ann")]);
        page.apply(PageEvent::EditRequested(mk_user("1", "ann")));
        let before = page.list.clone();
        page.apply(PageEvent::SubmitRequested(UserSubmission::Create(draft("x"))));
        let outcome = page.apply(PageEvent::Saved(Err(ApiError::status(422, ""))));
        assert_eq!(outcome, PageOutcome::SaveFinished { success: false });
        assert_eq!(page.list, before);
        assert!(page.editing.is_some());
        assert_eq!(page.notices.len(), 1);
        assert_eq!(page.current_notice().unwrap().message, SAVE_FAILED);
    }

    #[test]
    fn submit_ignored_while_saving() {
        let mut page = loaded(vec![]);
        page.apply(PageEvent::SubmitRequested(UserSubmission::Create(draft("a"))));
        let outcome = page.apply(PageEvent::SubmitRequested(UserSubmission::Create(draft("b"))));
        assert_eq!(outcome, PageOutcome::None);
    }

    #[test]
    fn cancel_clears_selection_without_command() {
        let mut page = loaded(vec![mk_user("1", "ann")]);
        page.apply(PageEvent::EditRequested(mk_user("1", "ann")));
        assert_eq!(page.apply(PageEvent::CancelEdit), PageOutcome::None);
        assert!(page.editing.is_none());
    }

    #[test]
    fn notices_dismiss_in_order() {
        let mut page = loaded(vec![]);
        page.apply(PageEvent::SubmitRequested(UserSubmission::Create(draft("a"))));
        page.apply(PageEvent::Saved(Ok(mk_user("1", "a"))));
        page.apply(PageEvent::SubmitRequested(UserSubmission::Create(draft("b"))));
        page.apply(PageEvent::Saved(Err(ApiError::status(500, "Failed to create user"))));
        assert_eq!(page.notices.len(), 2);
        assert_eq!(page.current_notice().unwrap().kind, NoticeKind::Success);
        page.apply(PageEvent::DismissNotice);
        assert_eq!(page.current_notice().unwrap().kind, NoticeKind::Error);
        page.apply(PageEvent::DismissNotice);
        assert!(page.current_notice().is_none());
    }
}
