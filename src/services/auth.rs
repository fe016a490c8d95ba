//! Login, logout and the current-user lookup.

use tracing::info;

use crate::error::ApiError;
use crate::net::client::{ApiClient, ApiRequest};
use crate::net::session::Session;
use crate::net::types::{CurrentUser, LoginRequest, LoginResponse};

pub const LOGIN_PATH: &str = "/api/auth/login/";
pub const ME_PATH: &str = "/api/auth/me/";

/// Exchange credentials for tokens and persist the session.
///
/// When the login response omits the user, it is fetched from the `me`
/// endpoint with the new tokens before returning.
///
/// # Errors
///
/// Returns the server's status error for bad credentials, or
/// [`ApiError::Session`] if the session cannot be stored.
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<CurrentUser, ApiError> {
    let body = LoginRequest { email: email.trim().to_owned(), password: password.to_owned() };
    let response: LoginResponse = client
        .send_json(&ApiRequest::post(LOGIN_PATH).json(&body)?.anonymous())
        .await?;

    let mut session = Session::new(response.access, response.refresh);
    client.store().set(session.clone())?;

    let user = match response.user {
        Some(user) => user,
        None => me(client).await?,
    };
    session.user = Some(user.clone());
    client.store().set(session)?;

    info!(user_id = user.id, "auth: logged in");
    Ok(user)
}

/// Drop the stored session. No server call is made.
///
/// # Errors
///
/// Returns [`ApiError::Session`] if the store cannot be cleared.
pub fn logout(client: &ApiClient) -> Result<(), ApiError> {
    client.store().clear()?;
    info!("auth: logged out");
    Ok(())
}

/// # Errors
///
/// Propagates client errors.
pub async fn me(client: &ApiClient) -> Result<CurrentUser, ApiError> {
    client.send_json(&ApiRequest::get(ME_PATH)).await
}

/// The user cached with the session, if any.
#[must_use]
pub fn cached_user(client: &ApiClient) -> Option<CurrentUser> {
    client.store().get().and_then(|session| session.user)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
