use anyhow::Context;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_UPLOADS_URL: &str = "http://localhost:8080/uploads";
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Runtime configuration, read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub uploads_base_url: String,
    pub page_size: usize,
    pub session_file: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let page_size = match env::var("ESTATE_PAGE_SIZE") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("ESTATE_PAGE_SIZE is not a number: {}", raw))?,
            Err(_) => DEFAULT_PAGE_SIZE,
        };
        if page_size == 0 {
            anyhow::bail!("ESTATE_PAGE_SIZE must be at least 1");
        }

        let session_file = match env::var("ESTATE_SESSION_FILE") {
            Ok(path) => PathBuf::from(path),
            Err(_) => default_session_file()?,
        };

        Ok(Self {
            api_base_url: env::var("ESTATE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            uploads_base_url: env::var("ESTATE_UPLOADS_URL")
                .unwrap_or_else(|_| DEFAULT_UPLOADS_URL.to_string()),
            page_size,
            session_file,
        })
    }
}

fn default_session_file() -> anyhow::Result<PathBuf> {
    let dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(dir.join("estate-client").join("session.json"))
}
