//! User record model and its create/update variants.
//!
//! Field names follow the backend's JSON (`jobTitle` is camelCase on the wire).

use serde::{Deserialize, Serialize};

/// A persisted user record. `id` is assigned by the server and never changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
}

/// Payload for `POST /users`. Carries no identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDraft {
    pub name: String,
    pub surname: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
}

/// Payload for `PUT /users/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDraft {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
}

/// What the form hands to the controller once a draft passes validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserSubmission {
    Create(CreateUserDraft),
    Update(UpdateUserDraft),
}

impl UserSubmission {
    /// Identifier of the record being updated, `None` for a create.
    pub fn id(&self) -> Option<&str> {
        match self {
            UserSubmission::Create(_) => None,
            UserSubmission::Update(d) => Some(d.id.as_str()),
        }
    }
}

/// The five user-editable fields, in form order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UserField {
    Name,
    Surname,
    Email,
    Company,
    JobTitle,
}

impl UserField {
    pub const ALL: [UserField; 5] = [
        UserField::Name,
        UserField::Surname,
        UserField::Email,
        UserField::Company,
        UserField::JobTitle,
    ];

    /// Human label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            UserField::Name => "Name",
            UserField::Surname => "Surname",
            UserField::Email => "Email",
            UserField::Company => "Company",
            UserField::JobTitle => "Job Title",
        }
    }

    /// JSON key of the field.
    pub fn key(self) -> &'static str {
        match self {
            UserField::Name => "name",
            UserField::Surname => "surname",
            UserField::Email => "email",
            UserField::Company => "company",
            UserField::JobTitle => "jobTitle",
        }
    }

    pub fn next(self) -> Self {
        match self {
            UserField::Name => UserField::Surname,
            UserField::Surname => UserField::Email,
            UserField::Email => UserField::Company,
            UserField::Company => UserField::JobTitle,
            UserField::JobTitle => UserField::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            UserField::Name => UserField::JobTitle,
            UserField::Surname => UserField::Name,
            UserField::Email => UserField::Surname,
            UserField::Company => UserField::Email,
            UserField::JobTitle => UserField::Company,
        }
    }
}
