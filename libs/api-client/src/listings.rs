//! Listing search and CRUD endpoints

use crate::client::ApiClient;
use crate::error::{Error, Result};
use crate::models::{Listing, ListingDraft};
use haven_search_state::{codec, FilterState, PAGE_SIZE};
use tracing::debug;

/// Maximum images accepted per listing.
const MAX_IMAGES: usize = 14;

impl ApiClient {
    /// Fetch one page of search results.
    ///
    /// Carries the same non-default query keys the URL codec emits, plus
    /// `limit=9` and, when paginating, `startIndex`. Returns the raw batch;
    /// the lookahead/append policy belongs to the pagination reducer.
    pub async fn fetch_page(
        &self,
        filters: &FilterState,
        start_index: usize,
    ) -> Result<Vec<Listing>> {
        let mut query = codec::encode(filters);
        query.push_str(&format!("&limit={}", PAGE_SIZE));
        if start_index > 0 {
            query.push_str(&format!("&startIndex={}", start_index));
        }

        let url = format!("{}?{}", self.url("/listing/get"), query);
        debug!(%url, "fetching listings page");

        let response = self.client.get(&url).send().await?;
        Self::decode_body(response).await
    }

    /// Fetch a single listing by id.
    pub async fn get_listing(&self, id: &str) -> Result<Listing> {
        let url = format!("{}/{}", self.url("/listing/get"), id);
        let response = self.client.get(&url).send().await?;
        Self::decode_body(response).await
    }

    /// Create a listing. The draft is validated locally first; invalid
    /// drafts never reach the server.
    pub async fn create_listing(&self, draft: &ListingDraft) -> Result<Listing> {
        validate_draft(draft)?;
        let response = self
            .client
            .post(self.url("/listing/create"))
            .json(draft)
            .send()
            .await?;
        Self::decode_body(response).await
    }

    /// Update an existing listing owned by the signed-in user.
    pub async fn update_listing(&self, id: &str, draft: &ListingDraft) -> Result<Listing> {
        validate_draft(draft)?;
        let url = format!("{}/{}", self.url("/listing/update"), id);
        let response = self.client.put(&url).json(draft).send().await?;
        Self::decode_body(response).await
    }

    /// Delete a listing owned by the signed-in user.
    pub async fn delete_listing(&self, id: &str) -> Result<()> {
        let url = format!("{}/{}", self.url("/listing/delete"), id);
        let response = self.client.delete(&url).send().await?;
        Self::decode_body::<serde_json::Value>(response).await?;
        Ok(())
    }
}

/// Check a draft against the rules the listing form enforces.
fn validate_draft(draft: &ListingDraft) -> Result<()> {
    if draft.image_urls.is_empty() {
        return Err(Error::Validation(
            "a listing must have at least one image".to_string(),
        ));
    }
    if draft.image_urls.len() > MAX_IMAGES {
        return Err(Error::Validation(format!(
            "a listing can have at most {} images",
            MAX_IMAGES
        )));
    }
    if draft.discount_price > draft.regular_price {
        return Err(Error::Validation(
            "discount price must be lower than regular price".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ListingDraft {
        ListingDraft {
            name: "Hill Country Estate".to_string(),
            description: "Estate on one acre".to_string(),
            address: "8900 Ranch Road 620".to_string(),
            listing_type: "sale".to_string(),
            bedrooms: 6,
            bathrooms: 5,
            regular_price: 2_150_000.0,
            discount_price: 1_990_000.0,
            offer: true,
            parking: true,
            furnished: false,
            image_urls: vec!["https://img.example/estate.jpg".to_string()],
            user_ref: "user-1".to_string(),
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(validate_draft(&draft()).is_ok());
    }

    #[test]
    fn draft_requires_an_image() {
        let mut d = draft();
        d.image_urls.clear();
        assert!(matches!(validate_draft(&d), Err(Error::Validation(_))));
    }

    #[test]
    fn draft_caps_image_count() {
        let mut d = draft();
        d.image_urls = (0..15).map(|i| format!("https://img.example/{i}.jpg")).collect();
        assert!(matches!(validate_draft(&d), Err(Error::Validation(_))));
    }

    #[test]
    fn discount_above_regular_price_is_rejected() {
        let mut d = draft();
        d.discount_price = d.regular_price + 1.0;
        assert!(matches!(validate_draft(&d), Err(Error::Validation(_))));

        d.discount_price = d.regular_price;
        assert!(validate_draft(&d).is_ok());
    }
}
