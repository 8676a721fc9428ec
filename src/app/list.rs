//! Canonical in-memory user list and its reconciliation rules.

use tracing::warn;

use crate::model::User;

/// The users shown in the table, in fetch order then creation order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserListState {
    pub users: Vec<User>,
    pub loading: bool,
}

/// Changes to the list, each the result of a backend call.
#[derive(Clone, Debug)]
pub enum ListEvent {
    FetchStarted,
    FetchSucceeded(Vec<User>),
    FetchFailed,
    /// A record returned by a successful create.
    Created(User),
    /// A record returned by a successful update.
    Updated(User),
}

impl UserListState {
    /// Apply one event. Ids stay unique and updates keep the record's position.
    pub fn apply(mut self, event: ListEvent) -> Self {
        match event {
            ListEvent::FetchStarted => self.loading = true,
            ListEvent::FetchSucceeded(users) => {
                self.users = users;
                self.loading = false;
            }
            ListEvent::FetchFailed => {
                self.users.clear();
                self.loading = false;
            }
            ListEvent::Created(user) => {
                // ids stay unique: a server echoing a known id replaces that entry
                match self.position(&user.id) {
                    Some(idx) => {
                        warn!(id = %user.id, "created record reused an existing id");
                        self.users[idx] = user;
                    }
                    None => self.users.push(user),
                }
            }
            ListEvent::Updated(user) => match self.position(&user.id) {
                Some(idx) => self.users[idx] = user,
                None => warn!(id = %user.id, "updated record not present in list"),
            },
        }
        self
    }

    /// Index of the record with `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.users.iter().position(|u| u.id == id)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mk_user(id: &str, name: &str) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            surname: "Doe".to_string(),
            email: format!("{name}@example.com"),
            company: None,
            job_title: None,
        }
    }

    fn seeded() -> UserListState {
        UserListState::default().apply(ListEvent::FetchSucceeded(vec![
            mk_user("1", "ann"),
            mk_user("2", "bob"),
            mk_user("3", "cid"),
        ]))
    }

    #[test]
    fn fetch_toggles_loading() {
        let state = UserListState::default().apply(ListEvent::FetchStarted);
        assert!(state.loading);
        let state = state.apply(ListEvent::FetchSucceeded(vec![mk_user("1", "ann")]));
        assert!(!state.loading);
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn fetch_failure_leaves_list_empty() {
        let state = UserListState::default()
            .apply(ListEvent::FetchStarted)
            .apply(ListEvent::FetchFailed);
        assert!(state.is_empty());
        assert!(!state.loading);
    }

    #[test]
    fn created_is_appended() {
        let state = seeded().apply(ListEvent::Created(mk_user("9", "dan")));
        let ids: Vec<_> = state.users.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "9"]);
    }

    #[test]
    fn updated_replaces_in_place() {
        let mut changed = mk_user("2", "bobby");
        changed.company = Some("Acme".into());
        let state = seeded().apply(ListEvent::Updated(changed.clone()));
        assert_eq!(state.users[1], changed);
        assert_eq!(state.users[0], mk_user("1", "ann"));
        assert_eq!(state.users[2], mk_user("3", "cid"));
    }

    #[test]
    fn update_for_unknown_id_is_a_no_op() {
        let before = seeded();
        let after = before.clone().apply(ListEvent::Updated(mk_user("404", "ghost")));
        assert_eq!(before, after);
    }

    #[test]
    fn created_with_known_id_keeps_ids_unique() {
        let state = seeded().apply(ListEvent::Created(mk_user("2", "again")));
        assert_eq!(state.len(), 3);
        assert_eq!(state.users[1].name, "again");
    }
}
