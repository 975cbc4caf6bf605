pub mod auth;
pub mod dashboard;
pub mod details;
pub mod format;
pub mod home;
pub mod listing;
pub mod profile;
pub mod results;
pub mod submit;

pub use dashboard::{Dashboard, SettingsForm, Tab};
pub use details::{Gallery, OwnerLink, PropertyDetails};
pub use listing::{FavoriteListener, ListingView, ToggleOutcome};
pub use profile::PublicProfile;
pub use results::ResultsPage;
pub use submit::ListingDraft;
