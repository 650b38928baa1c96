// Session endpoints
//
// Cookie-based auth: a successful login sets an HttpOnly `token` cookie
// in the client's jar; every subsequent request carries it. The client
// never sees or stores the token itself.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::SwitchClient;
use crate::error::Error;
use crate::models::{ChangePasswordRequest, RawSession};

impl SwitchClient {
    /// Authenticate and establish a session cookie.
    ///
    /// `POST /api/login`
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<RawSession, Error> {
        let url = self.api_url("login")?;
        debug!(username, "logging in");
        let body = json!({
            "username": username,
            "password": password.expose_secret(),
        });
        self.post(url, &body).await
    }

    /// Fetch the current session identity, if the cookie is still valid.
    ///
    /// `GET /api/me`
    pub async fn current_session(&self) -> Result<RawSession, Error> {
        let url = self.api_url("me")?;
        self.get(url).await
    }

    /// Invalidate the session cookie.
    ///
    /// `POST /api/logout`
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.api_url("logout")?;
        debug!("logging out");
        self.post_empty(url).await
    }

    /// Change the current user's password. Validation failures come back
    /// as plain-text messages in [`Error::Api`] / [`Error::Authentication`],
    /// surfaced verbatim to the caller.
    ///
    /// `POST /api/change-password`
    pub async fn change_password(
        &self,
        old_password: &SecretString,
        new_password: &SecretString,
    ) -> Result<(), Error> {
        let url = self.api_url("change-password")?;
        debug!("changing password");
        let req = ChangePasswordRequest {
            old_password: old_password.expose_secret().to_owned(),
            new_password: new_password.expose_secret().to_owned(),
        };
        let resp = self
            .http()
            .post(url)
            .json(&req)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::expect_success(resp).await
    }
}
