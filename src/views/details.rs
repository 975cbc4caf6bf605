use crate::api::ListingApi;
use crate::error::Result;
use crate::models::{Property, PropertyId, UserId, UserProfile};
use crate::session::SessionContext;
use crate::views::format::{upload_url, PLACEHOLDER_IMAGE};
use crate::views::listing::{ListingView, ToggleOutcome};
use tracing::debug;

/// Where clicking the owner's name leads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerLink {
    /// The viewer owns this listing
    MyDashboard,
    PublicProfile(UserId),
    /// The snapshot carries no owner
    Unknown,
}

/// Full-page view of one listing
pub struct PropertyDetails {
    listing: ListingView,
    current_user: Option<UserProfile>,
    gallery: Gallery,
}

impl PropertyDetails {
    /// Fetch the listing and, for signed-in viewers, who they are.
    /// Failing to identify the viewer is not an error.
    pub async fn load(
        api: &dyn ListingApi,
        session: &SessionContext,
        id: PropertyId,
        uploads_base_url: &str,
    ) -> Result<Self> {
        let property = api.property(id, session.token()).await?;

        let current_user = match session.token() {
            Some(token) => match api.me(token).await {
                Ok(user) => Some(user),
                Err(e) => {
                    debug!("Could not identify viewer: {}", e);
                    None
                }
            },
            None => None,
        };

        Ok(Self::new(property, current_user, uploads_base_url))
    }

    pub fn new(property: Property, current_user: Option<UserProfile>, uploads_base_url: &str) -> Self {
        let gallery = Gallery::for_property(&property, uploads_base_url);
        Self {
            listing: ListingView::new(property, None),
            current_user,
            gallery,
        }
    }

    pub fn property(&self) -> &Property {
        self.listing.property()
    }

    pub fn listing(&self) -> &ListingView {
        &self.listing
    }

    pub fn is_liked(&self) -> bool {
        self.listing.is_liked()
    }

    pub async fn toggle_favorite(&mut self, api: &dyn ListingApi, session: &SessionContext) -> ToggleOutcome {
        self.listing.toggle(api, session, None).await
    }

    pub fn owner_link(&self) -> OwnerLink {
        let Some(owner_id) = self.property().owner_id else {
            return OwnerLink::Unknown;
        };
        match &self.current_user {
            Some(user) if user.user_id == owner_id => OwnerLink::MyDashboard,
            _ => OwnerLink::PublicProfile(owner_id),
        }
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn gallery_mut(&mut self) -> &mut Gallery {
        &mut self.gallery
    }
}

/// Photo carousel; moving past either end wraps around
#[derive(Debug, Clone)]
pub struct Gallery {
    images: Vec<String>,
    index: usize,
}

impl Gallery {
    pub fn for_property(property: &Property, uploads_base_url: &str) -> Self {
        let images = if property.image_urls.is_empty() {
            vec![PLACEHOLDER_IMAGE.to_string()]
        } else {
            property
                .image_urls
                .iter()
                .map(|name| upload_url(uploads_base_url, name))
                .collect()
        };
        Self { images, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> &str {
        &self.images[self.index]
    }

    pub fn open(&mut self, index: usize) {
        self.index = index.min(self.images.len() - 1);
    }

    pub fn next(&mut self) -> &str {
        self.index = (self.index + 1) % self.images.len();
        self.current()
    }

    pub fn previous(&mut self) -> &str {
        self.index = if self.index == 0 {
            self.images.len() - 1
        } else {
            self.index - 1
        };
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::models::fixtures;

    const UPLOADS: &str = "http://localhost:8080/uploads";

    fn backend() -> FakeApi {
        let mut mine = fixtures::property(1, "My flat");
        mine.owner_id = Some(1);
        let mut theirs = fixtures::property(2, "Their villa");
        theirs.owner_id = Some(2);
        theirs.image_urls = vec!["a.jpg".to_string(), "b.jpg".to_string(), "c.jpg".to_string()];
        FakeApi::new()
            .with_properties(vec![mine, theirs])
            .with_user("token-1", fixtures::user(1, "Omar"), "secret1")
            .with_favorite(1, 2)
    }

    #[tokio::test]
    async fn owner_link_depends_on_viewer() {
        let api = backend();
        let session = SessionContext::signed_in("token-1", "Omar");

        let mine = PropertyDetails::load(&api, &session, 1, UPLOADS).await.unwrap();
        assert_eq!(mine.owner_link(), OwnerLink::MyDashboard);

        let theirs = PropertyDetails::load(&api, &session, 2, UPLOADS).await.unwrap();
        assert_eq!(theirs.owner_link(), OwnerLink::PublicProfile(2));

        let as_guest = PropertyDetails::load(&api, &SessionContext::guest(), 1, UPLOADS)
            .await
            .unwrap();
        assert_eq!(as_guest.owner_link(), OwnerLink::PublicProfile(1));
    }

    #[tokio::test]
    async fn favorite_flag_comes_from_the_viewer() {
        let api = backend();
        let signed_in = PropertyDetails::load(&api, &SessionContext::signed_in("token-1", "Omar"), 2, UPLOADS)
            .await
            .unwrap();
        assert!(signed_in.is_liked());

        let guest = PropertyDetails::load(&api, &SessionContext::guest(), 2, UPLOADS)
            .await
            .unwrap();
        assert!(!guest.is_liked());
    }

    #[tokio::test]
    async fn viewer_lookup_failure_is_ignored() {
        let api = backend();
        api.fail("me");
        let session = SessionContext::signed_in("token-1", "Omar");

        let details = PropertyDetails::load(&api, &session, 1, UPLOADS).await.unwrap();
        assert_eq!(details.owner_link(), OwnerLink::PublicProfile(1));
    }

    #[tokio::test]
    async fn toggle_from_details_page() {
        let api = backend();
        let session = SessionContext::signed_in("token-1", "Omar");
        let mut details = PropertyDetails::load(&api, &session, 2, UPLOADS).await.unwrap();

        assert_eq!(
            details.toggle_favorite(&api, &session).await,
            ToggleOutcome::Applied { liked: false }
        );
        assert!(!api.is_favorite(1, 2));
    }

    #[tokio::test]
    async fn missing_property_is_an_error() {
        let api = backend();
        assert!(PropertyDetails::load(&api, &SessionContext::guest(), 404, UPLOADS)
            .await
            .is_err());
    }

    #[test]
    fn gallery_wraps_in_both_directions() {
        let mut property = fixtures::property(2, "Villa");
        property.image_urls = vec!["a.jpg".to_string(), "b.jpg".to_string(), "c.jpg".to_string()];
        let mut gallery = Gallery::for_property(&property, UPLOADS);

        assert_eq!(gallery.previous(), "http://localhost:8080/uploads/c.jpg");
        assert_eq!(gallery.next(), "http://localhost:8080/uploads/a.jpg");
        gallery.open(1);
        assert_eq!(gallery.next(), "http://localhost:8080/uploads/c.jpg");
        assert_eq!(gallery.next(), "http://localhost:8080/uploads/a.jpg");
    }

    #[tokio::test]
    async fn details_gallery_opens_a_chosen_photo() {
        let api = backend();
        let mut details = PropertyDetails::load(&api, &SessionContext::guest(), 2, UPLOADS)
            .await
            .unwrap();

        details.gallery_mut().open(2);
        assert_eq!(details.gallery().index(), 2);
        assert_eq!(details.gallery().current(), "http://localhost:8080/uploads/c.jpg");

        details.gallery_mut().open(99);
        assert_eq!(details.gallery().index(), 2);
    }

    #[test]
    fn gallery_without_photos_shows_placeholder() {
        let gallery = Gallery::for_property(&fixtures::property(1, "Flat"), UPLOADS);
        assert_eq!(gallery.images(), &[PLACEHOLDER_IMAGE.to_string()]);
    }
}
