//! Haven Marketplace API Client
//!
//! This crate provides async-first access to the haven real-estate
//! marketplace REST API: listing search with "show more" pagination, listing
//! CRUD, authentication, profile management and image upload.
//!
//! # Examples
//!
//! ## Search from a URL query string
//!
//! ```rust,no_run
//! use haven_api_client::{ApiClient, SearchController};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::with_base_url("https://api.haven.example".to_string())?;
//! let mut search = SearchController::new(client);
//! search.submit_query("type=rent&furnished=true&sort=regularPrice&order=asc").await;
//! for listing in search.listings() {
//!     println!("{}: {}", listing.name, listing.effective_price());
//! }
//! if search.has_more() {
//!     search.show_more().await;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Sign in and create a listing
//!
//! ```rust,no_run
//! use haven_api_client::{ApiClient, ListingDraft};
//!
//! # async fn example(draft: ListingDraft) -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new()?;
//! client.sign_in("me@example.com", "secret").await?;
//! let created = client.create_listing(&draft).await?;
//! println!("created {}", created.id);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod listings;
pub mod media;
pub mod models;
pub mod search;
pub mod users;

pub use client::ApiClient;
pub use error::{Error, Result};
pub use media::UploadConfig;
pub use models::{ErrorEnvelope, Listing, ListingDraft, UserProfile, UserUpdate};
pub use search::SearchController;

// Re-export search-state types for convenience
pub use haven_search_state::{FilterEvent, FilterState, ListingType, SortField, SortOrder};
