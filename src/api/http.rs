use crate::api::traits::ListingApi;
use crate::api::types::{NewListing, SearchParams};
use crate::error::{ClientError, Result};
use crate::models::{
    AuthResponse, LoginRequest, ProfileUpdate, Property, PropertyId, RegisterRequest, UserId,
    UserProfile,
};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// REST client for the listing backend
pub struct HttpApi {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl HttpApi {
    /// Create a client for the backend rooted at `base_url` (e.g. `http://localhost:8080/api`)
    pub fn new(base_url: &str) -> Result<Self> {
        // No client-side timeout; the transport default applies.
        let client = Client::builder()
            .user_agent(concat!("estate-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = self.url(path);
        debug!("GET {}", url);
        with_token(self.client.get(url), token)
    }

    fn post(&self, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = self.url(path);
        debug!("POST {}", url);
        with_token(self.client.post(url), token)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = checked(request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// Listing arrays are decoded per row; see [`Property::from_rows`]
    async fn send_properties(&self, request: RequestBuilder) -> Result<Vec<Property>> {
        let rows: Vec<serde_json::Value> = self.send_json(request).await?;
        Ok(Property::from_rows(rows))
    }

    async fn send_text(&self, request: RequestBuilder) -> Result<String> {
        let response = checked(request.send().await?).await?;
        Ok(response.text().await?)
    }
}

fn with_token(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// Turn a non-success status into `ClientError::Api`, keeping the backend's `message`
async fn checked(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or(body);
    warn!("Backend returned status {}: {}", status, message);
    Err(ClientError::Api { status, message })
}

async fn file_part(path: &Path) -> Result<Part> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    Ok(Part::bytes(bytes).file_name(file_name))
}

#[async_trait]
impl ListingApi for HttpApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        self.send_json(self.post("/auth/login", None).json(request)).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        self.send_json(self.post("/auth/register", None).json(request)).await
    }

    async fn search(&self, params: &SearchParams, token: Option<&str>) -> Result<Vec<Property>> {
        let request = self.get("/properties/search", token).query(&params.query());
        self.send_properties(request).await
    }

    async fn featured(&self) -> Result<Vec<Property>> {
        self.send_properties(self.get("/properties/featured", None)).await
    }

    async fn property(&self, id: PropertyId, token: Option<&str>) -> Result<Property> {
        self.send_json(self.get(&format!("/properties/{}", id), token)).await
    }

    async fn properties_by_user(&self, user_id: UserId) -> Result<Vec<Property>> {
        self.send_properties(self.get(&format!("/properties/user/{}", user_id), None))
            .await
    }

    async fn create_property(&self, token: &str, listing: &NewListing) -> Result<String> {
        let mut form = Form::new();
        for (name, value) in listing.text_fields() {
            form = form.text(name, value);
        }
        for image in &listing.images {
            form = form.part("imageFiles", file_part(image).await?);
        }

        self.send_text(self.post("/properties", Some(token)).multipart(form))
            .await
    }

    async fn toggle_favorite(&self, token: &str, id: PropertyId) -> Result<()> {
        let request = self
            .post(&format!("/properties/{}/favorite", id), Some(token))
            .json(&serde_json::json!({}));
        checked(request.send().await?).await?;
        Ok(())
    }

    async fn me(&self, token: &str) -> Result<UserProfile> {
        self.send_json(self.get("/users/me", Some(token))).await
    }

    async fn update_me(&self, token: &str, update: &ProfileUpdate) -> Result<UserProfile> {
        let url = self.url("/users/me");
        debug!("PUT {}", url);
        let request = self.client.put(url).bearer_auth(token).json(update);
        self.send_json(request).await
    }

    async fn upload_avatar(&self, token: &str, file: &Path) -> Result<String> {
        let form = Form::new().part("file", file_part(file).await?);
        self.send_text(self.post("/users/me/avatar", Some(token)).multipart(form))
            .await
    }

    async fn my_properties(&self, token: &str) -> Result<Vec<Property>> {
        self.send_properties(self.get("/users/me/properties", Some(token))).await
    }

    async fn my_favorites(&self, token: &str) -> Result<Vec<Property>> {
        self.send_properties(self.get("/users/me/favorites", Some(token))).await
    }

    async fn public_user(&self, user_id: UserId) -> Result<UserProfile> {
        self.send_json(self.get(&format!("/users/{}", user_id), None)).await
    }

    fn backend_name(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn response(status: u16, body: &str) -> Response {
        http::Response::builder()
            .status(status)
            .body(body.to_string())
            .unwrap()
            .into()
    }

    async fn api_error(status: u16, body: &str) -> (StatusCode, String) {
        match checked(response(status, body)).await {
            Err(ClientError::Api { status, message }) => (status, message),
            other => panic!("expected an API error, got {:?}", other.map(|r| r.status())),
        }
    }

    #[tokio::test]
    async fn backend_message_is_kept() {
        let (status, message) =
            api_error(400, r#"{"message":"Email is already in use","status":400}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "Email is already in use");
    }

    #[tokio::test]
    async fn plain_text_body_becomes_the_message() {
        let (status, message) = api_error(500, "Internal Server Error").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Internal Server Error");
    }

    #[tokio::test]
    async fn empty_body_uses_the_caller_fallback() {
        let err = checked(response(403, "")).await.unwrap_err();
        assert!(matches!(&err, ClientError::Api { message, .. } if message.is_empty()));
        assert_eq!(err.user_message("Failed to update profile"), "Failed to update profile");
    }

    #[tokio::test]
    async fn json_without_message_keeps_the_raw_body() {
        let (_, message) = api_error(404, r#"{"error":"Not Found"}"#).await;
        assert_eq!(message, r#"{"error":"Not Found"}"#);
    }

    #[tokio::test]
    async fn success_passes_through_whatever_the_body() {
        // Toggling a favorite answers with a free-form body the client ignores.
        let ok = checked(response(200, "Favorite status updated")).await.unwrap();
        assert_eq!(ok.status(), StatusCode::OK);
        assert_eq!(ok.text().await.unwrap(), "Favorite status updated");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = HttpApi::new("http://localhost:8080/api/").unwrap();
        assert_eq!(api.url("/properties/3"), "http://localhost:8080/api/properties/3");
        assert_eq!(api.backend_name(), "http://localhost:8080/api");
    }
}
