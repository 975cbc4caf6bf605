pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod views;

pub use error::{ClientError, Result};
