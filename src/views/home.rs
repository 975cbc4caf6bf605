use crate::api::{ListingApi, SearchParams};
use crate::models::Property;
use crate::session::SessionContext;
use crate::views::results::ResultsPage;
use tracing::{error, info};

/// Run a search and paginate the results. A failed search is logged and shows no results.
pub async fn search(
    api: &dyn ListingApi,
    session: &SessionContext,
    params: &SearchParams,
    page_size: usize,
) -> ResultsPage<Property> {
    let results = match api.search(params, session.token()).await {
        Ok(results) => results,
        Err(e) => {
            error!("Search failed: {}", e);
            Vec::new()
        }
    };
    info!("Search returned {} properties", results.len());
    ResultsPage::new(results, page_size)
}

/// Featured listings for the landing page; empty on failure
pub async fn featured(api: &dyn ListingApi) -> Vec<Property> {
    api.featured().await.unwrap_or_else(|e| {
        error!("Failed to load featured listings: {}", e);
        Vec::new()
    })
}
