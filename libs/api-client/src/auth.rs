//! Authentication endpoints
//!
//! The server issues a JWT session cookie on sign-in; the client's cookie
//! store carries it on every later request, so no token plumbing is exposed
//! here.

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::UserProfile;
use serde_json::json;
use tracing::info;

impl ApiClient {
    /// Register a new account.
    pub async fn sign_up(&self, username: &str, email: &str, password: &str) -> Result<()> {
        let response = self
            .client
            .post(self.url("/api/auth/signup"))
            .json(&json!({
                "username": username,
                "email": email,
                "password": password,
            }))
            .send()
            .await?;
        Self::decode_body::<serde_json::Value>(response).await?;
        info!(%username, "account created");
        Ok(())
    }

    /// Sign in with email and password, returning the profile the session
    /// now belongs to.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile> {
        let response = self
            .client
            .post(self.url("/api/auth/signin"))
            .json(&json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await?;
        let profile: UserProfile = Self::decode_body(response).await?;
        info!(user = %profile.username, "signed in");
        Ok(profile)
    }

    /// Sign in (or register) via a Google identity.
    pub async fn sign_in_with_google(
        &self,
        name: &str,
        email: &str,
        photo_url: Option<&str>,
    ) -> Result<UserProfile> {
        let response = self
            .client
            .post(self.url("/auth/google"))
            .json(&json!({
                "name": name,
                "email": email,
                "photo": photo_url,
            }))
            .send()
            .await?;
        Self::decode_body(response).await
    }

    /// End the current session.
    pub async fn sign_out(&self) -> Result<()> {
        let response = self.client.get(self.url("/auth/signout")).send().await?;
        Self::decode_body::<serde_json::Value>(response).await?;
        info!("signed out");
        Ok(())
    }
}
