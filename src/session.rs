//! Session credential and display name, held by an explicit context object.
//!
//! Views never touch storage directly; they read the token from a
//! [`SessionContext`] handed to them, and only the auth and profile flows
//! update it.

use crate::error::Result;
use crate::models::AuthResponse;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Ar,
            Language::Ar => Language::En,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::En => f.write_str("EN"),
            Language::Ar => f.write_str("AR"),
        }
    }
}

/// What gets persisted between runs
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StoredSession {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub language: Language,
}

/// Persistent backing for a [`SessionContext`]
pub trait SessionStore: Send + Sync {
    /// Load the stored session. A missing store is a guest, not an error.
    fn load(&self) -> Result<StoredSession>;

    fn save(&self, session: &StoredSession) -> Result<()>;
}

/// JSON file store
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<StoredSession> {
        if !self.path.exists() {
            debug!("No session file at {}, starting as guest", self.path.display());
            return Ok(StoredSession::default());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, session: &StoredSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)?;

        // The file holds a bearer token: owner read/write only.
        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;
        file.write_all(json.as_bytes())?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            // `mode` only applies on creation; tighten files left by older runs.
            file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }
}

/// In-process store, used when nothing should outlive the process
#[derive(Default)]
pub struct MemorySessionStore {
    inner: Mutex<StoredSession>,
}

impl MemorySessionStore {
    pub fn new(session: StoredSession) -> Self {
        Self {
            inner: Mutex::new(session),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<StoredSession> {
        Ok(self.inner.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save(&self, session: &StoredSession) -> Result<()> {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = session.clone();
        Ok(())
    }
}

/// The signed-in user (or guest), read once at startup and written through
/// on every change.
pub struct SessionContext {
    store: Box<dyn SessionStore>,
    state: StoredSession,
}

impl SessionContext {
    pub fn open(store: Box<dyn SessionStore>) -> Result<Self> {
        let state = store.load()?;
        Ok(Self { store, state })
    }

    /// Guest session that is never persisted
    pub fn guest() -> Self {
        Self {
            store: Box::new(MemorySessionStore::default()),
            state: StoredSession::default(),
        }
    }

    /// In-memory session that is already signed in
    pub fn signed_in(token: &str, display_name: &str) -> Self {
        let state = StoredSession {
            token: Some(token.to_string()),
            display_name: Some(display_name.to_string()),
            language: Language::default(),
        };
        Self {
            store: Box::new(MemorySessionStore::new(state.clone())),
            state,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.state.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Name shown in the header; `None` for guests
    pub fn display_name(&self) -> Option<&str> {
        self.token()?;
        Some(
            self.state
                .display_name
                .as_deref()
                .filter(|n| !n.is_empty())
                .unwrap_or("User"),
        )
    }

    pub fn language(&self) -> Language {
        self.state.language
    }

    /// Start a session from a successful login or registration
    pub fn begin(&mut self, auth: &AuthResponse) -> Result<()> {
        self.state.token = Some(auth.token.clone());
        self.state.display_name = auth.first_name.clone();
        self.store.save(&self.state)?;
        info!("Signed in as {}", self.display_name().unwrap_or("User"));
        Ok(())
    }

    /// Update the cached display name after a profile change
    pub fn rename(&mut self, display_name: &str) -> Result<()> {
        self.state.display_name = Some(display_name.to_string());
        self.store.save(&self.state)
    }

    /// Sign out. The language preference is kept.
    pub fn clear(&mut self) -> Result<()> {
        self.state.token = None;
        self.state.display_name = None;
        self.store.save(&self.state)?;
        info!("Signed out");
        Ok(())
    }

    pub fn toggle_language(&mut self) -> Result<Language> {
        self.state.language = self.state.language.toggled();
        self.store.save(&self.state)?;
        Ok(self.state.language)
    }
}
