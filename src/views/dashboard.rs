//! The signed-in user's dashboard: profile settings, own listings, favorites.
//!
//! `owned` and `favorited` are fetched independently and may overlap.
//! Every confirmed favorite toggle from a card in either tab goes through
//! [`Dashboard::reconcile`], which is the only place either list changes.

use crate::api::ListingApi;
use crate::error::{ClientError, Result};
use crate::models::{ProfileUpdate, Property, PropertyId, UserProfile};
use crate::session::SessionContext;
use crate::views::listing::{FavoriteListener, ListingView, ToggleOutcome};
use std::path::Path;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Listings,
    Favorites,
}

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    user: Option<UserProfile>,
    owned: Vec<Property>,
    favorited: Vec<Property>,
}

impl Dashboard {
    pub fn new(user: Option<UserProfile>, owned: Vec<Property>, favorited: Vec<Property>) -> Self {
        Self {
            user,
            owned,
            favorited,
        }
    }

    /// Fetch profile, own listings and favorites concurrently.
    ///
    /// A failed fetch is logged and leaves its part empty.
    pub async fn load(api: &dyn ListingApi, session: &SessionContext) -> Result<Self> {
        let token = session.token().ok_or(ClientError::LoginRequired)?;

        let (user, owned, favorited) = tokio::join!(
            api.me(token),
            api.my_properties(token),
            api.my_favorites(token)
        );

        let user = user
            .map_err(|e| error!("Failed to load profile: {}", e))
            .ok();
        let owned = owned.unwrap_or_else(|e| {
            error!("Failed to load own listings: {}", e);
            Vec::new()
        });
        let favorited = favorited.unwrap_or_else(|e| {
            error!("Failed to load favorites: {}", e);
            Vec::new()
        });

        info!(
            "Dashboard loaded: {} listings, {} favorites",
            owned.len(),
            favorited.len()
        );
        Ok(Self::new(user, owned, favorited))
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn owned(&self) -> &[Property] {
        &self.owned
    }

    pub fn favorited(&self) -> &[Property] {
        &self.favorited
    }

    /// Propagate one confirmed favorite change to both lists.
    ///
    /// Adding needs a full snapshot, which is only available from `owned`.
    /// A property that is neither owned nor already in `favorited` is
    /// therefore not added.
    pub fn reconcile(&mut self, id: PropertyId, liked: bool) {
        for property in self.owned.iter_mut().filter(|p| p.property_id == id) {
            property.is_favorite = liked;
        }

        if liked {
            let Some(source) = self.owned.iter().find(|p| p.property_id == id) else {
                debug!("Property {} is not among own listings, favorites left as-is", id);
                return;
            };
            if !self.favorited.iter().any(|p| p.property_id == id) {
                let mut copy = source.clone();
                copy.is_favorite = true;
                self.favorited.push(copy);
            }
        } else {
            self.favorited.retain(|p| p.property_id != id);
        }
    }

    /// Card for `id` as shown in `tab`. Cards in the favorites tab are always shown liked.
    pub fn card(&self, tab: Tab, id: PropertyId) -> Option<ListingView> {
        let (list, favorited_override) = match tab {
            Tab::Listings => (&self.owned, None),
            Tab::Favorites => (&self.favorited, Some(true)),
        };
        list.iter()
            .find(|p| p.property_id == id)
            .map(|p| ListingView::new(p.clone(), favorited_override))
    }

    pub fn cards(&self, tab: Tab) -> Vec<ListingView> {
        match tab {
            Tab::Listings => self
                .owned
                .iter()
                .map(|p| ListingView::new(p.clone(), None))
                .collect(),
            Tab::Favorites => self
                .favorited
                .iter()
                .map(|p| ListingView::new(p.clone(), Some(true)))
                .collect(),
        }
    }

    /// Toggle the favorite on a card in `tab`, reconciling both lists on success
    pub async fn toggle_favorite(
        &mut self,
        api: &dyn ListingApi,
        session: &SessionContext,
        tab: Tab,
        id: PropertyId,
    ) -> Result<ToggleOutcome> {
        let mut card = self.card(tab, id).ok_or_else(|| {
            ClientError::Validation(format!("Property {} is not on this tab", id))
        })?;
        Ok(card
            .toggle(api, session, Some(self as &mut dyn FavoriteListener))
            .await)
    }

    /// Save profile settings; on success the session's display name follows the new first name
    pub async fn save_settings(
        &mut self,
        api: &dyn ListingApi,
        session: &mut SessionContext,
        form: &SettingsForm,
    ) -> Result<&UserProfile> {
        let update = form.validate()?;
        let token = session.token().ok_or(ClientError::LoginRequired)?;

        let user = api.update_me(token, &update).await?;
        session.rename(&user.first_name)?;
        info!("Profile updated for {}", user.email);
        Ok(&*self.user.insert(user))
    }

    pub async fn upload_avatar(
        &mut self,
        api: &dyn ListingApi,
        session: &SessionContext,
        file: &Path,
    ) -> Result<String> {
        let token = session.token().ok_or(ClientError::LoginRequired)?;
        let file_name = api.upload_avatar(token, file).await?;
        if let Some(user) = self.user.as_mut() {
            user.profile_picture_url = Some(file_name.clone());
        }
        Ok(file_name)
    }
}

impl FavoriteListener for Dashboard {
    fn favorite_changed(&mut self, id: PropertyId, liked: bool) {
        self.reconcile(id, liked);
    }
}

/// Settings tab form. Password fields are optional; a new password needs a matching confirmation.
#[derive(Debug, Clone, Default)]
pub struct SettingsForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub bio: Option<String>,
    pub old_password: Option<String>,
    pub new_password: Option<String>,
    pub confirm_password: Option<String>,
}

impl SettingsForm {
    /// Pre-filled from the current profile
    pub fn from_profile(user: &UserProfile) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone_number: user.phone_number.clone(),
            bio: user.bio.clone(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<ProfileUpdate> {
        let new_password = self.new_password.clone().filter(|p| !p.is_empty());
        if let Some(new_password) = &new_password {
            if self.confirm_password.as_ref() != Some(new_password) {
                return Err(ClientError::Validation("Passwords do not match".to_string()));
            }
        }

        Ok(ProfileUpdate {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            bio: self.bio.clone(),
            old_password: self.old_password.clone().filter(|p| !p.is_empty()),
            new_password,
        })
    }
}
