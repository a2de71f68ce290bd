//! User profile endpoints

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{Listing, UserProfile, UserUpdate};

impl ApiClient {
    /// Update the signed-in user's profile fields.
    pub async fn update_user(&self, id: &str, update: &UserUpdate) -> Result<UserProfile> {
        let url = format!("{}/{}", self.url("/user/update"), id);
        let response = self.client.post(&url).json(update).send().await?;
        Self::decode_body(response).await
    }

    /// Delete the signed-in user's account.
    pub async fn delete_user(&self, id: &str) -> Result<()> {
        let url = format!("{}/{}", self.url("/user/delete"), id);
        let response = self.client.delete(&url).send().await?;
        Self::decode_body::<serde_json::Value>(response).await?;
        Ok(())
    }

    /// Fetch every listing owned by a user.
    pub async fn user_listings(&self, id: &str) -> Result<Vec<Listing>> {
        let url = format!("{}/{}", self.url("/user/listings"), id);
        let response = self.client.get(&url).send().await?;
        Self::decode_body(response).await
    }
}
