use crate::api::ListingApi;
use crate::models::{Property, UserId, UserProfile};
use tracing::error;

/// Another user's public page: their profile and listings
#[derive(Debug, Clone)]
pub struct PublicProfile {
    pub profile: UserProfile,
    pub listings: Vec<Property>,
}

impl PublicProfile {
    /// `None` when the user cannot be fetched. If only the listings fail, the
    /// profile is still returned with no listings.
    pub async fn load(api: &dyn ListingApi, user_id: UserId) -> Option<Self> {
        let profile = match api.public_user(user_id).await {
            Ok(profile) => profile,
            Err(e) => {
                error!("Failed to fetch public profile {}: {}", user_id, e);
                return None;
            }
        };

        let listings = api.properties_by_user(user_id).await.unwrap_or_else(|e| {
            error!("Failed to fetch listings of user {}: {}", user_id, e);
            Vec::new()
        });

        Some(Self { profile, listings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::models::fixtures;

    fn backend() -> FakeApi {
        let mut listing = fixtures::property(5, "Office downtown");
        listing.owner_id = Some(2);
        FakeApi::new()
            .with_properties(vec![listing, fixtures::property(6, "Not theirs")])
            .with_user("token-2", fixtures::user(2, "Lina"), "secret2")
    }

    #[tokio::test]
    async fn loads_profile_with_listings() {
        let api = backend();
        let page = PublicProfile::load(&api, 2).await.unwrap();
        assert_eq!(page.profile.first_name, "Lina");
        assert_eq!(page.listings.len(), 1);
        assert_eq!(page.listings[0].property_id, 5);
    }

    #[tokio::test]
    async fn unknown_user_is_none() {
        assert!(PublicProfile::load(&backend(), 77).await.is_none());
    }

    #[tokio::test]
    async fn listing_failure_keeps_the_profile() {
        let api = backend();
        api.fail("properties_by_user");
        let page = PublicProfile::load(&api, 2).await.unwrap();
        assert!(page.listings.is_empty());
    }
}
