//! Data models for the marketplace API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A listing as returned by the server.
///
/// Read-only projection: the search view and the profile's "my listings"
/// panel both render this shape verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub address: String,
    pub regular_price: f64,
    pub discount_price: f64,
    pub bathrooms: u32,
    pub bedrooms: u32,
    pub furnished: bool,
    pub parking: bool,
    /// `rent` or `sale`.
    #[serde(rename = "type")]
    pub listing_type: String,
    pub offer: bool,
    #[serde(default)]
    pub image_urls: Vec<String>,
    /// Id of the owning user.
    #[serde(default)]
    pub user_ref: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Listing {
    /// Price to display: the discounted price when the listing has an offer.
    pub fn effective_price(&self) -> f64 {
        if self.offer {
            self.discount_price
        } else {
            self.regular_price
        }
    }
}

/// A listing draft submitted to create/update endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListingDraft {
    pub name: String,
    pub description: String,
    pub address: String,
    /// `rent` or `sale`.
    #[serde(rename = "type")]
    pub listing_type: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub regular_price: f64,
    pub discount_price: f64,
    pub offer: bool,
    pub parking: bool,
    pub furnished: bool,
    pub image_urls: Vec<String>,
    pub user_ref: String,
}

/// The signed-in user's profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Partial profile update; unset fields are left unchanged by the server.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Error envelope every endpoint uses for failures.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}
