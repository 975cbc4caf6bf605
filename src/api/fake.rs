//! In-memory backend for tests

use crate::api::traits::ListingApi;
use crate::api::types::{NewListing, SearchParams};
use crate::error::{ClientError, Result};
use crate::models::{
    AuthResponse, LoginRequest, ProfileUpdate, Property, PropertyId, RegisterRequest, UserId,
    UserProfile,
};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Mutex;

#[derive(Default)]
struct State {
    properties: Vec<Property>,
    users: Vec<UserProfile>,
    passwords: HashMap<String, String>,
    tokens: HashMap<String, UserId>,
    favorites: HashSet<(UserId, PropertyId)>,
    failing: HashSet<&'static str>,
    failing_toggles: HashSet<PropertyId>,
    toggle_calls: usize,
    created: Vec<NewListing>,
}

#[derive(Default)]
pub struct FakeApi {
    state: Mutex<State>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_properties(self, properties: Vec<Property>) -> Self {
        self.lock().properties = properties;
        self
    }

    /// Register a user who is already signed in with `token`
    pub fn with_user(self, token: &str, user: UserProfile, password: &str) -> Self {
        {
            let mut state = self.lock();
            state.passwords.insert(user.email.clone(), password.to_string());
            state.tokens.insert(token.to_string(), user.user_id);
            state.users.push(user);
        }
        self
    }

    pub fn with_favorite(self, user_id: UserId, id: PropertyId) -> Self {
        self.lock().favorites.insert((user_id, id));
        self
    }

    /// Make every call of the named operation fail with a 500
    pub fn fail(&self, operation: &'static str) {
        self.lock().failing.insert(operation);
    }

    pub fn fail_toggle(&self, id: PropertyId) {
        self.lock().failing_toggles.insert(id);
    }

    pub fn toggle_calls(&self) -> usize {
        self.lock().toggle_calls
    }

    pub fn is_favorite(&self, user_id: UserId, id: PropertyId) -> bool {
        self.lock().favorites.contains(&(user_id, id))
    }

    pub fn created(&self) -> Vec<NewListing> {
        self.lock().created.clone()
    }

    pub fn user(&self, user_id: UserId) -> Option<UserProfile> {
        self.lock().users.iter().find(|u| u.user_id == user_id).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }
}

fn server_error() -> ClientError {
    ClientError::Api {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: "simulated failure".to_string(),
    }
}

fn bad_request(message: &str) -> ClientError {
    ClientError::Api {
        status: StatusCode::BAD_REQUEST,
        message: message.to_string(),
    }
}

impl State {
    fn check(&self, operation: &'static str) -> Result<()> {
        if self.failing.contains(operation) {
            Err(server_error())
        } else {
            Ok(())
        }
    }

    fn user_for(&self, token: &str) -> Result<UserId> {
        self.tokens.get(token).copied().ok_or(ClientError::Api {
            status: StatusCode::UNAUTHORIZED,
            message: String::new(),
        })
    }

    fn viewer(&self, token: Option<&str>) -> Option<UserId> {
        token.and_then(|t| self.tokens.get(t).copied())
    }

    fn snapshot(&self, property: &Property, viewer: Option<UserId>) -> Property {
        let mut snapshot = property.clone();
        snapshot.is_favorite =
            viewer.is_some_and(|u| self.favorites.contains(&(u, property.property_id)));
        snapshot
    }

    fn auth_for(&self, user_id: UserId) -> AuthResponse {
        let user = self.users.iter().find(|u| u.user_id == user_id);
        AuthResponse {
            token: format!("token-{}", user_id),
            first_name: user.map(|u| u.first_name.clone()),
            last_name: user.map(|u| u.last_name.clone()),
            role: Some("USER".to_string()),
            user_id: Some(user_id),
        }
    }
}

#[async_trait]
impl ListingApi for FakeApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        let mut state = self.lock();
        state.check("login")?;
        if state.passwords.get(&request.email) != Some(&request.password) {
            return Err(bad_request("Invalid email or password"));
        }
        let user_id = state
            .users
            .iter()
            .find(|u| u.email == request.email)
            .map(|u| u.user_id)
            .ok_or_else(|| bad_request("User not found"))?;
        let auth = state.auth_for(user_id);
        state.tokens.insert(auth.token.clone(), user_id);
        Ok(auth)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        let mut state = self.lock();
        state.check("register")?;
        if state.passwords.contains_key(&request.email) {
            return Err(bad_request("Email is already in use"));
        }
        let user_id = state.users.len() as UserId + 100;
        state.users.push(UserProfile {
            user_id,
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            email: request.email.clone(),
            phone_number: Some(request.phone_number.clone()),
            ..Default::default()
        });
        state
            .passwords
            .insert(request.email.clone(), request.password.clone());
        let auth = state.auth_for(user_id);
        state.tokens.insert(auth.token.clone(), user_id);
        Ok(auth)
    }

    async fn search(&self, params: &SearchParams, token: Option<&str>) -> Result<Vec<Property>> {
        let state = self.lock();
        state.check("search")?;
        let viewer = state.viewer(token);
        Ok(state
            .properties
            .iter()
            .filter(|p| {
                params
                    .location
                    .as_deref()
                    .map_or(true, |l| p.location.to_lowercase().contains(&l.to_lowercase()))
            })
            .filter(|p| params.purpose.map_or(true, |purpose| p.purpose == purpose))
            .filter(|p| params.property_type.map_or(true, |t| p.property_type == t))
            .filter(|p| params.max_price.map_or(true, |max| p.price <= max))
            .filter(|p| params.min_price.map_or(true, |min| p.price >= min))
            .map(|p| state.snapshot(p, viewer))
            .collect())
    }

    async fn featured(&self) -> Result<Vec<Property>> {
        let state = self.lock();
        state.check("featured")?;
        Ok(state
            .properties
            .iter()
            .rev()
            .take(3)
            .map(|p| state.snapshot(p, None))
            .collect())
    }

    async fn property(&self, id: PropertyId, token: Option<&str>) -> Result<Property> {
        let state = self.lock();
        state.check("property")?;
        let viewer = state.viewer(token);
        state
            .properties
            .iter()
            .find(|p| p.property_id == id)
            .map(|p| state.snapshot(p, viewer))
            .ok_or_else(|| bad_request("Property not found"))
    }

    async fn properties_by_user(&self, user_id: UserId) -> Result<Vec<Property>> {
        let state = self.lock();
        state.check("properties_by_user")?;
        Ok(state
            .properties
            .iter()
            .filter(|p| p.owner_id == Some(user_id))
            .map(|p| state.snapshot(p, None))
            .collect())
    }

    async fn create_property(&self, token: &str, listing: &NewListing) -> Result<String> {
        let mut state = self.lock();
        state.check("create_property")?;
        state.user_for(token)?;
        state.created.push(listing.clone());
        Ok("Property Listed Successfully".to_string())
    }

    async fn toggle_favorite(&self, token: &str, id: PropertyId) -> Result<()> {
        let mut state = self.lock();
        state.toggle_calls += 1;
        state.check("toggle_favorite")?;
        if state.failing_toggles.contains(&id) {
            return Err(server_error());
        }
        let user_id = state.user_for(token)?;
        if !state.favorites.remove(&(user_id, id)) {
            state.favorites.insert((user_id, id));
        }
        Ok(())
    }

    async fn me(&self, token: &str) -> Result<UserProfile> {
        let state = self.lock();
        state.check("me")?;
        let user_id = state.user_for(token)?;
        state
            .users
            .iter()
            .find(|u| u.user_id == user_id)
            .cloned()
            .ok_or_else(|| bad_request("User not found"))
    }

    async fn update_me(&self, token: &str, update: &ProfileUpdate) -> Result<UserProfile> {
        let mut state = self.lock();
        state.check("update_me")?;
        let user_id = state.user_for(token)?;
        let email = state
            .users
            .iter()
            .find(|u| u.user_id == user_id)
            .map(|u| u.email.clone())
            .unwrap_or_default();
        if update.new_password.is_some()
            && state.passwords.get(&email) != update.old_password.as_ref()
        {
            return Err(bad_request("Current password is incorrect"));
        }
        if let Some(new_password) = &update.new_password {
            state.passwords.insert(email, new_password.clone());
        }
        let user = state
            .users
            .iter_mut()
            .find(|u| u.user_id == user_id)
            .ok_or_else(|| bad_request("User not found"))?;
        user.first_name = update.first_name.clone();
        user.last_name = update.last_name.clone();
        user.email = update.email.clone();
        user.phone_number = update.phone_number.clone();
        user.bio = update.bio.clone();
        Ok(user.clone())
    }

    async fn upload_avatar(&self, token: &str, file: &Path) -> Result<String> {
        let mut state = self.lock();
        state.check("upload_avatar")?;
        let user_id = state.user_for(token)?;
        let name = format!(
            "avatar-{}-{}",
            user_id,
            file.file_name().unwrap().to_string_lossy()
        );
        if let Some(user) = state.users.iter_mut().find(|u| u.user_id == user_id) {
            user.profile_picture_url = Some(name.clone());
        }
        Ok(name)
    }

    async fn my_properties(&self, token: &str) -> Result<Vec<Property>> {
        let state = self.lock();
        state.check("my_properties")?;
        let user_id = state.user_for(token)?;
        Ok(state
            .properties
            .iter()
            .filter(|p| p.owner_id == Some(user_id))
            .map(|p| state.snapshot(p, Some(user_id)))
            .collect())
    }

    async fn my_favorites(&self, token: &str) -> Result<Vec<Property>> {
        let state = self.lock();
        state.check("my_favorites")?;
        let user_id = state.user_for(token)?;
        Ok(state
            .properties
            .iter()
            .filter(|p| state.favorites.contains(&(user_id, p.property_id)))
            .map(|p| state.snapshot(p, Some(user_id)))
            .collect())
    }

    async fn public_user(&self, user_id: UserId) -> Result<UserProfile> {
        let state = self.lock();
        state.check("public_user")?;
        state
            .users
            .iter()
            .find(|u| u.user_id == user_id)
            .cloned()
            .ok_or_else(|| bad_request("User not found"))
    }

    fn backend_name(&self) -> &str {
        "fake"
    }
}
