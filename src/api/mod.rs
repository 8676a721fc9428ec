//! REST client for the users backend.
//!
//! [`UserApi`] is the seam the controller talks to; [`HttpUserApi`] is the
//! reqwest-backed implementation used by the binary.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::error::{ApiError, Result};
use crate::model::{CreateUserDraft, UpdateUserDraft, User};

/// The four operations the backend contract offers.
#[async_trait]
pub trait UserApi: Send + Sync {
    /// `GET /users`.
    async fn list(&self) -> Result<Vec<User>>;

    /// `POST /users`; the returned record carries the server-assigned id.
    async fn create(&self, draft: &CreateUserDraft) -> Result<User>;

    /// `PUT /users/{id}`.
    async fn update(&self, draft: &UpdateUserDraft) -> Result<User>;

    /// The backend has no delete endpoint. This always succeeds without
    /// touching the network and does not remove anything.
    async fn delete(&self, id: &str) -> Result<()> {
        warn!(id, "DELETE endpoint not implemented in backend");
        Ok(())
    }
}

/// `UserApi` over HTTP with JSON bodies.
#[derive(Clone, Debug)]
pub struct HttpUserApi {
    http: Client,
    users_url: String,
}

impl HttpUserApi {
    /// Build a client rooted at `base_url` (for example `http://localhost:8000`).
    pub fn new(base_url: &str) -> Result<Self> {
        let users_url = users_url(base_url)?;
        let http = Client::builder()
            .user_agent(format!("usrapi-manager/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, users_url })
    }

    /// Collection URL, `{base}/users`.
    pub fn users_url(&self) -> &str {
        &self.users_url
    }

    fn user_url(&self, id: &str) -> String {
        format!("{}/{}", self.users_url, id)
    }
}

/// Validate and normalize a base URL into the users collection URL.
pub fn users_url(base_url: &str) -> Result<String> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidUrl("URL cannot be empty".into()));
    }
    let parsed = Url::parse(trimmed).map_err(|e| ApiError::InvalidUrl(format!("{trimmed}: {e}")))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ApiError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }
    Ok(format!("{}/users", trimmed.trim_end_matches('/')))
}

async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    failure: &str,
) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::status(status.as_u16(), failure));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait]
impl UserApi for HttpUserApi {
    async fn list(&self) -> Result<Vec<User>> {
        debug!(url = %self.users_url, "GET users");
        let response = self.http.get(&self.users_url).send().await?;
        decode(response, "Failed to fetch users").await
    }

    async fn create(&self, draft: &CreateUserDraft) -> Result<User> {
        debug!(url = %self.users_url, "POST user");
        let response = self
            .http
            .post(&self.users_url)
            .json(draft)
            .send()
            .await?;
        decode(response, "Failed to create user").await
    }

    async fn update(&self, draft: &UpdateUserDraft) -> Result<User> {
        let url = self.user_url(&draft.id);
        debug!(url = %url, "PUT user");
        let response = self.http.put(&url).json(draft).send().await?;
        decode(response, "Failed to update user").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn users_url_trims_trailing_slash() {
        assert_eq!(
            users_url("http://localhost:8000/").unwrap(),
            "http://localhost:8000/users"
        );
        assert_eq!(
            users_url("https://api.example.com/v1").unwrap(),
            "https://api.example.com/v1/users"
        );
    }

    #[test]
    fn users_url_rejects_empty_and_non_http() {
        assert!(matches!(users_url(""), Err(ApiError::InvalidUrl(_))));
        assert!(matches!(
            users_url("ftp://example.com"),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(users_url("not a url"), Err(ApiError::InvalidUrl(_))));
    }
}
