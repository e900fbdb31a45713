//! Account and leaderboard commands run against the score service.

use std::sync::Arc;

use anyhow::Result;
use column_match::{
    AccountCreation, FileCredentialStore, HttpRemote, RemoteService, SessionManager,
    fetch_leaderboard,
};
use tracing::{info, instrument};

use crate::ClientConfig;

/// Session manager over the configured credential file and service.
pub fn session_manager(config: &ClientConfig) -> SessionManager {
    let store = FileCredentialStore::new(config.credentials_path().clone());
    let remote: Arc<dyn RemoteService> = Arc::new(HttpRemote::new(config.server_url()));
    SessionManager::new(Box::new(store), remote)
}

/// Creates an account and remembers it on success.
#[instrument(skip(manager, password))]
pub async fn sign_up(manager: &mut SessionManager, username: &str, password: &str) -> String {
    match manager.create_account(username, password).await {
        AccountCreation::Created => format!("Account created. Signed in as {}", username),
        AccountCreation::InvalidInput => "Please enter a valid username and password".to_string(),
        AccountCreation::Failed => "Account creation failed".to_string(),
    }
}

/// Remembers the credentials and reports whether the service accepted them.
#[instrument(skip(manager, password))]
pub async fn sign_in(manager: &mut SessionManager, username: &str, password: &str) -> String {
    let session = manager.sign_in(username, password).await;
    match session.signed_in_as() {
        Some(name) => format!("Signed in as {}", name),
        None => "Sign-in failed".to_string(),
    }
}

/// Forgets the remembered credentials.
pub fn sign_out(manager: &mut SessionManager) -> String {
    manager.clear();
    "Signed out".to_string()
}

/// Verifies the remembered credentials.
#[instrument(skip(manager))]
pub async fn who_am_i(manager: &mut SessionManager) -> String {
    match manager.restore().await.signed_in_as() {
        Some(name) => format!("Signed in as {}", name),
        None => "Not signed in".to_string(),
    }
}

/// Fetches the leaderboard lines.
#[instrument(skip(remote))]
pub async fn leaderboard(remote: &dyn RemoteService) -> Vec<String> {
    let lines = fetch_leaderboard(remote).await;
    info!(lines = lines.len(), "Leaderboard fetched");
    lines
}

/// Prints the leaderboard for `config`.
pub async fn print_leaderboard(config: &ClientConfig) -> Result<()> {
    let remote = HttpRemote::new(config.server_url());
    let lines = leaderboard(&remote).await;
    if lines.is_empty() {
        println!("Leaderboard unavailable");
    }
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}
