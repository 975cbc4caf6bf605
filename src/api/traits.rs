use crate::api::types::{NewListing, SearchParams};
use crate::error::Result;
use crate::models::{
    AuthResponse, LoginRequest, ProfileUpdate, Property, PropertyId, RegisterRequest, UserId,
    UserProfile,
};
use async_trait::async_trait;
use std::path::Path;

/// Everything the client needs from the listing backend.
///
/// Views only talk to this trait, so they can be driven by the HTTP client
/// or by an in-memory backend in tests.
#[async_trait]
pub trait ListingApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse>;

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse>;

    /// Search listings. With a token, snapshots carry the caller's favorite flag.
    async fn search(&self, params: &SearchParams, token: Option<&str>) -> Result<Vec<Property>>;

    async fn featured(&self) -> Result<Vec<Property>>;

    async fn property(&self, id: PropertyId, token: Option<&str>) -> Result<Property>;

    async fn properties_by_user(&self, user_id: UserId) -> Result<Vec<Property>>;

    /// Publish a listing; returns the backend's confirmation text
    async fn create_property(&self, token: &str, listing: &NewListing) -> Result<String>;

    /// Flip the caller's favorite relation for one property. Only the status matters.
    async fn toggle_favorite(&self, token: &str, id: PropertyId) -> Result<()>;

    async fn me(&self, token: &str) -> Result<UserProfile>;

    async fn update_me(&self, token: &str, update: &ProfileUpdate) -> Result<UserProfile>;

    /// Upload a profile picture; returns the stored file name
    async fn upload_avatar(&self, token: &str, file: &Path) -> Result<String>;

    async fn my_properties(&self, token: &str) -> Result<Vec<Property>>;

    async fn my_favorites(&self, token: &str) -> Result<Vec<Property>>;

    async fn public_user(&self, user_id: UserId) -> Result<UserProfile>;

    /// Name of the backend, for logs
    fn backend_name(&self) -> &str;
}
