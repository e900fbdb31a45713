//! Tests for session caching, verification and account creation.

mod support;

use std::sync::Arc;

use column_match::{
    AccountCreation, CredentialStore, Credentials, FileCredentialStore, MemoryCredentialStore,
    SessionManager, fetch_leaderboard,
};
use tempfile::TempDir;

use support::FakeRemote;

fn manager(remote: Arc<FakeRemote>) -> (MemoryCredentialStore, SessionManager) {
    let store = MemoryCredentialStore::new();
    let manager = SessionManager::new(Box::new(store.clone()), remote);
    (store, manager)
}

#[tokio::test]
async fn test_empty_cached_username_is_signed_out_without_remote_call() {
    let remote = Arc::new(FakeRemote::accepting());
    let (store, mut manager) = manager(remote.clone());
    store
        .save(&Credentials::new(String::new(), "secret".to_string()))
        .expect("Save failed");

    let session = manager.restore().await;
    assert!(!session.verified());
    assert_eq!(session.signed_in_as(), None);
    assert!(remote.sign_in_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_no_cached_credentials_is_signed_out() {
    let remote = Arc::new(FakeRemote::accepting());
    let (_store, mut manager) = manager(remote.clone());
    let session = manager.restore().await;
    assert!(!session.verified());
    assert!(remote.sign_in_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_sign_in_caches_then_verifies() {
    let remote = Arc::new(FakeRemote::accepting());
    let (store, mut manager) = manager(remote.clone());

    let session = manager.sign_in("carol", "pw").await;
    assert_eq!(session.signed_in_as(), Some("carol"));

    let cached = store.load().expect("Load failed").expect("Nothing cached");
    assert_eq!(cached.username, "carol");
    assert_eq!(remote.sign_in_calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_refused_sign_in_stays_cached_but_unverified() {
    let remote = Arc::new(FakeRemote::default());
    let (store, mut manager) = manager(remote);

    let session = manager.sign_in("dave", "wrong").await;
    assert!(!session.verified());
    assert!(store.load().expect("Load failed").is_some());
}

#[tokio::test]
async fn test_remote_failure_degrades_to_signed_out() {
    let remote = Arc::new(FakeRemote::failing());
    let (_store, manager) = manager(remote);
    assert!(!manager.verify("erin", "pw").await);
}

#[tokio::test]
async fn test_clear_signs_out() {
    let remote = Arc::new(FakeRemote::accepting());
    let (store, mut manager) = manager(remote);
    manager.sign_in("frank", "pw").await;

    manager.clear();
    assert!(!manager.session().verified());
    assert!(store.load().expect("Load failed").is_none());
}

#[tokio::test]
async fn test_create_account_caches_credentials() {
    let remote = Arc::new(FakeRemote::accepting());
    let (store, mut manager) = manager(remote.clone());

    let result = manager.create_account("gina", "pw").await;
    assert_eq!(result, AccountCreation::Created);
    assert_eq!(remote.accounts.lock().unwrap().len(), 1);
    assert_eq!(
        store.load().expect("Load failed"),
        Some(Credentials::new("gina".to_string(), "pw".to_string()))
    );
}

#[tokio::test]
async fn test_create_account_rejects_blank_input() {
    let remote = Arc::new(FakeRemote::accepting());
    let (store, mut manager) = manager(remote.clone());

    assert_eq!(
        manager.create_account("", "pw").await,
        AccountCreation::InvalidInput
    );
    assert_eq!(
        manager.create_account("hal", "").await,
        AccountCreation::InvalidInput
    );
    assert!(remote.accounts.lock().unwrap().is_empty());
    assert!(store.load().expect("Load failed").is_none());
}

#[tokio::test]
async fn test_create_account_failure_caches_nothing() {
    let remote = Arc::new(FakeRemote::failing());
    let (store, mut manager) = manager(remote);
    assert_eq!(
        manager.create_account("ivy", "pw").await,
        AccountCreation::Failed
    );
    assert!(store.load().expect("Load failed").is_none());
}

#[test]
fn test_file_store_survives_reopen() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("session.toml");

    let store = FileCredentialStore::new(&path);
    assert!(store.load().expect("Load failed").is_none());
    store
        .save(&Credentials::new("jo".to_string(), "pw".to_string()))
        .expect("Save failed");

    let reopened = FileCredentialStore::new(&path);
    let cached = reopened.load().expect("Load failed").expect("Nothing cached");
    assert_eq!(cached.username, "jo");
    assert_eq!(cached.password, "pw");

    reopened.clear().expect("Clear failed");
    assert!(store.load().expect("Load failed").is_none());
    reopened.clear().expect("Clearing twice should succeed");
}

#[test]
fn test_file_store_rejects_garbage() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("session.toml");
    std::fs::write(&path, "not toml !!!@@@").expect("Write failed");

    let store = FileCredentialStore::new(&path);
    assert!(store.load().is_err());
}

#[tokio::test]
async fn test_leaderboard_lines() {
    let remote = FakeRemote {
        leaderboard: "Connect4 champion players (top 5):\n1) kim:  WINS-2 PLAYED-3  WINRATE-67%\n\n"
            .to_string(),
        ..FakeRemote::default()
    };
    let lines = fetch_leaderboard(&remote).await;
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], "1) kim:  WINS-2 PLAYED-3  WINRATE-67%");
}

#[tokio::test]
async fn test_leaderboard_failure_is_empty() {
    let remote = FakeRemote::failing();
    assert!(fetch_leaderboard(&remote).await.is_empty());
}
