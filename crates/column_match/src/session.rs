//! Signed-in identity: cached credentials and their verification.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::{Credentials, RemoteService};

/// Credential store failure with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Persistent storage for the cached sign-in.
///
/// [`SessionManager`] is the only writer.
pub trait CredentialStore: Send + Sync {
    /// Reads the cached credentials, if any.
    fn load(&self) -> Result<Option<Credentials>, StoreError>;

    /// Replaces the cached credentials.
    fn save(&self, credentials: &Credentials) -> Result<(), StoreError>;

    /// Removes the cached credentials.
    fn clear(&self) -> Result<(), StoreError>;
}

#[derive(Serialize, Deserialize)]
struct CachedSignIn {
    signed_in_as: String,
    signed_in_password: String,
}

/// Credential store backed by a TOML file that survives restarts.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Uses the file at `path`; it is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<Option<Credentials>, StoreError> {
        if !self.path.exists() {
            debug!("No cached sign-in");
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| StoreError::new(format!("Failed to read credentials: {}", e)))?;
        let cached: CachedSignIn = toml::from_str(&content)
            .map_err(|e| StoreError::new(format!("Failed to parse credentials: {}", e)))?;

        Ok(Some(Credentials::new(
            cached.signed_in_as,
            cached.signed_in_password,
        )))
    }

    #[instrument(
        skip(self, credentials),
        fields(path = %self.path.display(), username = %credentials.username)
    )]
    fn save(&self, credentials: &Credentials) -> Result<(), StoreError> {
        let cached = CachedSignIn {
            signed_in_as: credentials.username.clone(),
            signed_in_password: credentials.password.clone(),
        };
        let content = toml::to_string(&cached)
            .map_err(|e| StoreError::new(format!("Failed to encode credentials: {}", e)))?;
        std::fs::write(&self.path, content)
            .map_err(|e| StoreError::new(format!("Failed to write credentials: {}", e)))?;
        debug!("Credentials cached");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::new(format!(
                "Failed to remove credentials: {}",
                e
            ))),
        }
    }
}

/// In-process credential store.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    cached: Arc<Mutex<Option<Credentials>>>,
}

impl MemoryCredentialStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<Credentials>>, StoreError> {
        self.cached
            .lock()
            .map_err(|_| StoreError::new("Credential store lock poisoned"))
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<Credentials>, StoreError> {
        Ok(self.slot()?.clone())
    }

    fn save(&self, credentials: &Credentials) -> Result<(), StoreError> {
        *self.slot()? = Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.slot()? = None;
        Ok(())
    }
}

/// Current identity and whether the service accepted it.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Session {
    /// Cached username.
    username: String,
    /// Cached password.
    credential: String,
    /// True once the service confirmed the credentials.
    verified: bool,
}

impl Session {
    /// A session that never verified.
    pub fn signed_out() -> Self {
        Self {
            username: String::new(),
            credential: String::new(),
            verified: false,
        }
    }

    /// Verified username, if signed in.
    pub fn signed_in_as(&self) -> Option<&str> {
        self.verified.then_some(self.username.as_str())
    }
}

/// Result of an account creation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountCreation {
    /// The account exists and its credentials are cached.
    Created,
    /// Username or password was empty; nothing was sent.
    InvalidInput,
    /// The service refused or could not be reached.
    Failed,
}

/// Caches credentials and checks them against the remote service.
///
/// Every remote failure degrades to "signed out"; none is returned.
pub struct SessionManager {
    store: Box<dyn CredentialStore>,
    remote: Arc<dyn RemoteService>,
    current: Session,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Creates a manager over `store` and `remote`, initially signed out.
    #[instrument(skip_all)]
    pub fn new(store: Box<dyn CredentialStore>, remote: Arc<dyn RemoteService>) -> Self {
        info!("Creating SessionManager");
        Self {
            store,
            remote,
            current: Session::signed_out(),
        }
    }

    /// Current session.
    pub fn session(&self) -> &Session {
        &self.current
    }

    /// Checks credentials with the service.
    ///
    /// False for empty credentials (without contacting the service), for a
    /// refusal, and for any transport failure.
    #[instrument(skip(self, password))]
    pub async fn verify(&self, username: &str, password: &str) -> bool {
        if username.is_empty() {
            debug!("Empty username, treating as signed out");
            return false;
        }

        let credentials = Credentials::new(username.to_string(), password.to_string());
        match self.remote.sign_in(&credentials).await {
            Ok(accepted) => {
                info!(accepted, "Sign-in checked");
                accepted
            }
            Err(e) => {
                warn!(error = %e, "Sign-in failed, treating as signed out");
                false
            }
        }
    }

    /// Stores credentials for the next [`SessionManager::restore`].
    ///
    /// Written before verification; the next restore re-checks them.
    #[instrument(skip(self, password))]
    pub fn cache(&mut self, username: &str, password: &str) {
        let credentials = Credentials::new(username.to_string(), password.to_string());
        if let Err(e) = self.store.save(&credentials) {
            warn!(error = %e, "Failed to cache credentials");
        }
        self.current = Session {
            username: credentials.username,
            credential: credentials.password,
            verified: false,
        };
    }

    /// Signs out: erases cached credentials.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear cached credentials");
        }
        self.current = Session::signed_out();
        info!("Signed out");
    }

    /// Reloads cached credentials and verifies them.
    #[instrument(skip(self))]
    pub async fn restore(&mut self) -> &Session {
        let cached = match self.store.load() {
            Ok(cached) => cached,
            Err(e) => {
                warn!(error = %e, "Failed to read cached credentials");
                None
            }
        };

        self.current = match cached {
            Some(credentials) => {
                let verified = self
                    .verify(&credentials.username, &credentials.password)
                    .await;
                Session {
                    username: credentials.username,
                    credential: credentials.password,
                    verified,
                }
            }
            None => Session::signed_out(),
        };

        info!(
            username = %self.current.username,
            verified = self.current.verified,
            "Session restored"
        );
        &self.current
    }

    /// Caches then verifies, mirroring a sign-in request followed by reload.
    #[instrument(skip(self, password))]
    pub async fn sign_in(&mut self, username: &str, password: &str) -> &Session {
        self.cache(username, password);
        self.restore().await
    }

    /// Creates an account and caches its credentials on success.
    #[instrument(skip(self, password))]
    pub async fn create_account(&mut self, username: &str, password: &str) -> AccountCreation {
        let credentials = Credentials::new(username.to_string(), password.to_string());
        if credentials.is_blank() {
            debug!("Blank username or password");
            return AccountCreation::InvalidInput;
        }

        match self.remote.create_account(&credentials).await {
            Ok(()) => {
                self.cache(username, password);
                AccountCreation::Created
            }
            Err(e) => {
                warn!(error = %e, "Account creation failed");
                AccountCreation::Failed
            }
        }
    }
}
