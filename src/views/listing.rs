//! A single property card and its favorite toggle.
//!
//! The toggle is optimistic: the new state is shown before the backend is
//! asked, and a failed request quietly restores the previous state. The two
//! halves are exposed separately ([`ListingView::begin_toggle`] and
//! [`ListingView::settle`]) so overlapping toggles can be driven explicitly.
//! Overlapping toggles are not coalesced: each failure restores the value
//! seen when *that* toggle began, so the card can end up disagreeing with
//! the backend.

use crate::api::ListingApi;
use crate::error::{ClientError, Result};
use crate::models::{Property, PropertyId};
use crate::session::SessionContext;
use crate::views::format::{format_number, format_price, purpose_badge, upload_url, PLACEHOLDER_IMAGE};
use tracing::{debug, error};

/// Parent collection that wants to hear about confirmed favorite changes
pub trait FavoriteListener {
    fn favorite_changed(&mut self, id: PropertyId, liked: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The backend accepted the change; `liked` is the requested value
    Applied { liked: bool },
    /// The backend call failed and the card went back to `liked`
    Reverted { liked: bool },
    /// No session; nothing changed and nothing was sent
    LoginRequired,
}

/// An optimistic change waiting for the backend's answer
#[must_use = "a pending toggle must be settled"]
#[derive(Debug)]
pub struct PendingToggle {
    property_id: PropertyId,
    previous: bool,
    requested: bool,
}

impl PendingToggle {
    pub fn requested(&self) -> bool {
        self.requested
    }
}

#[derive(Debug, Clone)]
pub struct ListingView {
    property: Property,
    liked: bool,
}

impl ListingView {
    /// `favorited_override` wins over the snapshot's own flag when set
    pub fn new(property: Property, favorited_override: Option<bool>) -> Self {
        let liked = favorited_override.unwrap_or(property.is_favorite);
        Self { property, liked }
    }

    pub fn property(&self) -> &Property {
        &self.property
    }

    pub fn id(&self) -> PropertyId {
        self.property.property_id
    }

    pub fn is_liked(&self) -> bool {
        self.liked
    }

    /// Flip the displayed state immediately. Fails only when nobody is signed in.
    pub fn begin_toggle(&mut self, session: &SessionContext) -> Result<PendingToggle> {
        if !session.is_authenticated() {
            return Err(ClientError::LoginRequired);
        }

        let previous = self.liked;
        self.liked = !previous;
        debug!(
            "Property {} optimistically set to liked={}",
            self.property.property_id, self.liked
        );

        Ok(PendingToggle {
            property_id: self.property.property_id,
            previous,
            requested: !previous,
        })
    }

    /// Apply the backend's answer to an earlier [`begin_toggle`](Self::begin_toggle)
    pub fn settle(
        &mut self,
        pending: PendingToggle,
        result: Result<()>,
        listener: Option<&mut dyn FavoriteListener>,
    ) -> ToggleOutcome {
        match result {
            Ok(()) => {
                if let Some(listener) = listener {
                    listener.favorite_changed(pending.property_id, pending.requested);
                }
                ToggleOutcome::Applied {
                    liked: pending.requested,
                }
            }
            Err(e) => {
                error!(
                    "Failed to toggle favorite for property {}: {}",
                    pending.property_id, e
                );
                self.liked = pending.previous;
                ToggleOutcome::Reverted {
                    liked: pending.previous,
                }
            }
        }
    }

    pub async fn toggle(
        &mut self,
        api: &dyn ListingApi,
        session: &SessionContext,
        listener: Option<&mut dyn FavoriteListener>,
    ) -> ToggleOutcome {
        let (Some(token), Ok(pending)) = (session.token(), self.begin_toggle(session)) else {
            return ToggleOutcome::LoginRequired;
        };

        let result = api.toggle_favorite(token, pending.property_id).await;
        self.settle(pending, result, listener)
    }

    pub fn main_image_url(&self, uploads_base_url: &str) -> String {
        match self.property.image_urls.first() {
            Some(name) => upload_url(uploads_base_url, name),
            None => PLACEHOLDER_IMAGE.to_string(),
        }
    }

    /// Plain-text card, as printed by the CLI
    pub fn render(&self, uploads_base_url: &str) -> String {
        let p = &self.property;
        let heart = if self.liked { "♥" } else { "♡" };
        let rules = p.property_type.category().fields();

        let mut specs = Vec::new();
        if rules.rooms.is_visible() {
            specs.push(format!("{} rooms", p.room_count.unwrap_or(0)));
        }
        if rules.baths.is_visible() {
            specs.push(format!("{} baths", p.bath_count.unwrap_or(0)));
        }
        specs.push(format!("{} m²", format_number(p.area)));

        format!(
            "[{}] {} #{} {} ({})\n   {}\n   {} | {}\n   {}",
            purpose_badge(p.purpose),
            heart,
            p.property_id,
            p.title,
            p.property_type,
            p.location,
            specs.join(", "),
            format_price(p.price),
            self.main_image_url(uploads_base_url),
        )
    }
}
