pub mod http;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use http::HttpApi;
pub use traits::ListingApi;
pub use types::{NewListing, SearchParams};
